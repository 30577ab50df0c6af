// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle & Shutdown (C7): a single shared flag, set by SIGINT/SIGTERM,
//! observed by the Acceptor between accepts. Workers never observe it
//! directly — they are reaped by the Acceptor once their own socket
//! closes, exactly as the appliance's design requires.

use std::sync::Arc;

use tokio::sync::Notify;

/// A cloneable handle to the process-wide shutdown signal.
#[derive(Clone)]
pub struct Shutdown {
    notify: Arc<Notify>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self {
            notify: Arc::new(Notify::new()),
        }
    }

    /// Resolves once a shutdown has been requested. Safe to call
    /// concurrently from many tasks; every waiter is woken.
    pub async fn requested(&self) {
        self.notify.notified().await
    }

    /// Wakes every task currently waiting on [`Shutdown::requested`].
    ///
    /// `notify_waiters` only wakes tasks already waiting at the moment it
    /// is called; a `requested().await` issued afterward would hang
    /// forever, so every caller selects on it alongside other work rather
    /// than awaiting it unconditionally after the fact.
    pub fn trigger(&self) {
        self.notify.notify_waiters();
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns a task that waits for SIGINT or SIGTERM and triggers `shutdown`
/// when either arrives.
pub fn install_signal_handlers(shutdown: Shutdown) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigint =
                signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

            tokio::select! {
                _ = sigint.recv() => tracing::info!("caught SIGINT"),
                _ = sigterm.recv() => tracing::info!("caught SIGTERM"),
            }
        }

        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("caught ctrl-c");
        }

        shutdown.trigger();
    })
}
