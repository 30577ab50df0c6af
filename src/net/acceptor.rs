// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Acceptor & Worker Registry (C5): binds the listening socket, accepts
//! connections, spawns one worker task per connection, and reaps finished
//! workers.
//!
//! The registry itself is a [`tokio::task::JoinSet`] rather than a
//! hand-rolled intrusive list: it is the idiomatic async equivalent of
//! "spawn, and periodically sweep for completions", and only the Acceptor
//! ever touches it, exactly as the appliance's concurrency discipline
//! requires.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::error::AppResult;
use crate::log::LogStore;
use crate::net::worker::handle_connection;
use crate::shutdown::Shutdown;

/// Runs the accept loop over an already-bound-and-listening socket until
/// `shutdown` fires, then drains and joins every in-flight worker before
/// returning.
///
/// The listening socket is bound by the caller (see
/// [`crate::listener::bind`]) rather than here, so that binding can happen
/// before an optional `fork()` for daemonization, matching the appliance's
/// own bind-then-optionally-daemonize-then-listen sequencing.
pub async fn run(
    listener: std::net::TcpListener,
    store: Arc<LogStore>,
    max_packet_bytes: usize,
    shutdown: Shutdown,
) -> AppResult<()> {
    listener.set_nonblocking(true)?;
    let listener = TcpListener::from_std(listener)?;
    tracing::info!(local_addr = %listener.local_addr()?, "listening");

    let mut workers = JoinSet::new();

    loop {
        tokio::select! {
            biased;

            _ = shutdown.requested() => {
                tracing::info!("shutdown requested, no longer accepting connections");
                break;
            }

            accepted = listener.accept() => {
                match accepted {
                    Ok((socket, peer)) => {
                        let store = store.clone();
                        workers.spawn(handle_connection(socket, peer, store, max_packet_bytes));
                    }
                    Err(err) => {
                        tracing::warn!(%err, "accept failed");
                    }
                }
            }

            // Reap any worker that finished while we were waiting for the
            // next accept or the shutdown signal, so the registry never
            // grows unbounded across a long-lived server.
            Some(result) = workers.join_next(), if !workers.is_empty() => {
                if let Err(err) = result {
                    tracing::warn!(%err, "worker task panicked");
                }
            }
        }
    }

    tracing::info!(outstanding = workers.len(), "joining remaining workers");
    while let Some(result) = workers.join_next().await {
        if let Err(err) = result {
            tracing::warn!(%err, "worker task panicked during shutdown join");
        }
    }

    Ok(())
}
