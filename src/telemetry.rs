// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization. Plays the role the original appliance gave to
//! `syslog`: `tracing::debug!`/`info!`/`warn!`/`error!` calls throughout the
//! crate correspond to the original's `LOG_DEBUG`/`LOG_INFO`/`LOG_ERR`
//! levels at the same call sites.

use tracing_subscriber::EnvFilter;

/// Installs a `tracing-subscriber` formatter driven by the `AESDSOCKET_LOG`
/// environment variable, defaulting to `info` when unset.
pub fn init() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .with_env_var("AESDSOCKET_LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}
