// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The periodic timestamp writer: an external collaborator that appends a
//! formatted wall-clock line to the log every `interval` seconds. Only
//! meaningful for the file-backed configuration — the in-memory ring has no
//! external file surface for a human to observe mid-session, and the
//! character-device configuration (not implemented here) would produce its
//! own sequence-of-packets view instead, per the appliance's design notes.
//!
//! Shares only the Log Store's append interface and its lock with the rest
//! of the system; it does not participate in the virtual byte stream's
//! packet accounting.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use crate::log::LogStore;
use crate::shutdown::Shutdown;

/// Runs until `shutdown` fires, appending a `timestamp: YYYY/MM/DD
/// HH:MM:SS\n` line every `interval`.
pub async fn run(store: Arc<LogStore>, shutdown: Shutdown, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; skip it so the first timestamp
    // lands after a full interval, matching the source's sleep-then-write
    // ordering.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.requested() => {
                tracing::debug!("timestamp writer stopping");
                return;
            }
            _ = ticker.tick() => {
                let line = format!("timestamp: {}\n", Local::now().format("%Y/%m/%d %H:%M:%S"));
                if let Err(err) = store.append_raw_line(&line) {
                    tracing::warn!(%err, "timestamp writer failed to append");
                }
            }
        }
    }
}
