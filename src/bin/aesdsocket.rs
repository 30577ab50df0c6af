// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Process entry point: parses configuration, binds the listening socket,
//! optionally daemonizes, then runs the appliance to completion.
//!
//! Deliberately not `#[tokio::main]`: the optional `fork()` for
//! daemonization must happen before any worker threads exist, so the
//! listening socket is bound and the fork (if requested) happens on a
//! plain single-threaded `main`, and only afterward is the multi-threaded
//! Tokio runtime constructed.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use aesdsocket::config::{Backend, Config};
use aesdsocket::log::LogStore;
use aesdsocket::{daemonize, listener, shutdown, timestamp};

fn main() -> ExitCode {
    aesdsocket::telemetry::init();
    let config = Config::parse();

    let socket = match listener::bind(config.port) {
        Ok(socket) => socket,
        Err(err) => {
            tracing::error!(%err, "setup failed: could not bind listening socket");
            return ExitCode::FAILURE;
        }
    };

    if config.daemonize {
        if let Err(err) = daemonize::daemonize() {
            tracing::error!(%err, "setup failed: daemonization failed");
            return ExitCode::FAILURE;
        }
    }

    let listener = match listener::listen(socket) {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, "setup failed: could not listen on bound socket");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(%err, "setup failed: could not start async runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config, listener)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config, listener: std::net::TcpListener) -> aesdsocket::error::AppResult<()> {
    let store = Arc::new(match config.backend {
        Backend::Memory => LogStore::in_memory(),
        Backend::File => LogStore::file_backed(&config.file_path)?,
    });

    let shutdown = shutdown::Shutdown::new();
    let signal_task = shutdown::install_signal_handlers(shutdown.clone());

    let timestamp_task = matches!(config.backend, Backend::File).then(|| {
        tokio::spawn(timestamp::run(
            store.clone(),
            shutdown.clone(),
            std::time::Duration::from_secs(config.timestamp_interval_secs),
        ))
    });

    let result =
        aesdsocket::net::acceptor::run(listener, store.clone(), config.max_packet_bytes, shutdown)
            .await;

    if let Some(timestamp_task) = timestamp_task {
        let _ = timestamp_task.await;
    }
    signal_task.abort();

    store.remove_backing_file()?;
    tracing::info!("clean shutdown");

    result
}
