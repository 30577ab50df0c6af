// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Crate-wide error taxonomy.
//!
//! Mirrors the abstract error kinds of the appliance this crate implements:
//! invalid-argument, resource-exhaustion, io-failure, interrupted, and
//! not-permitted. Each is scoped to the operation that produced it rather
//! than to a single call site, so the same variant can surface from the
//! control parser, the log store, or the connection worker.

use thiserror::Error;

/// Errors produced by the log store, control parser, and connection
/// handling paths.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// A malformed control command, an out-of-range seek target, or other
    /// caller-supplied value that cannot be honored.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An allocation or growth limit was exceeded (e.g. the assembly buffer
    /// grew past its configured cap).
    #[error("resource exhausted: {0}")]
    ResourceExhaustion(String),

    /// A socket or file operation failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking operation was interrupted before it could complete.
    ///
    /// Never constructed by this crate: `log::store::LogStore` serializes
    /// access with a `parking_lot::Mutex` held only across a memcpy or a
    /// single file write, never across an `.await` point, so there is no
    /// blocking lock acquisition for a signal to interrupt. Kept in the
    /// taxonomy because it is one of spec.md §7's abstract error kinds and
    /// a future blocking backend (e.g. one that waits on a condvar) could
    /// reach it; see DESIGN.md.
    #[error("interrupted: {0}")]
    Interrupted(String),

    /// Required per-connection or per-store state was missing, or an
    /// operation was invoked against a backend that does not support it
    /// (e.g. the timestamp writer's raw-line append against an in-memory
    /// store).
    #[error("not permitted: {0}")]
    NotPermitted(String),
}

pub type AppResult<T> = Result<T, AppError>;
