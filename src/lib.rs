// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! A bounded write-ordered packet log exposed as a readable byte stream
//! over TCP.
//!
//! [`log`] implements the circular log (C1) and the lock-serialized store
//! wrapped around it (C2). [`net`] implements the TCP ingest/echo server:
//! the per-connection packet assembler (C3), the connection worker (C4),
//! and the accept loop (C5). [`control`] implements the seek-to-entry
//! control command grammar (C6). [`shutdown`] implements the signal-driven
//! shutdown flag (C7). [`config`], [`error`], and [`telemetry`] are the
//! ambient CLI, error, and logging surfaces a complete binary needs.

pub mod config;
pub mod control;
pub mod daemonize;
pub mod error;
pub mod listener;
pub mod log;
pub mod net;
pub mod shutdown;
pub mod telemetry;
pub mod timestamp;
