// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Ambient configuration surface. Every flag beyond `-d` defaults to the
//! appliance's literal constants, so the zero-flag invocation matches the
//! documented wire contract exactly.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_MAX_PACKET_BYTES: usize = 512 * 1024;
pub const DEFAULT_TIMESTAMP_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_FILE_BACKEND_PATH: &str = "/var/tmp/aesdsocketdata";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// The bounded in-memory circular log (default).
    Memory,
    /// Mirrors the circular log to an append-only file and enables the
    /// periodic timestamp writer.
    File,
}

/// A newline-delimited packet log with a TCP ingest/echo front end.
#[derive(Debug, Parser)]
#[command(name = "aesdsocket", version, about)]
pub struct Config {
    /// Daemonize after the listening socket is bound.
    #[arg(short = 'd', long)]
    pub daemonize: bool,

    /// TCP port to listen on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Storage backend for the packet log.
    #[arg(long, value_enum, default_value_t = Backend::Memory)]
    pub backend: Backend,

    /// Path to the backing file when `--backend file` is selected.
    #[arg(long, default_value = DEFAULT_FILE_BACKEND_PATH)]
    pub file_path: PathBuf,

    /// Upper bound on a single assembled packet before the connection is
    /// dropped.
    #[arg(long, default_value_t = DEFAULT_MAX_PACKET_BYTES)]
    pub max_packet_bytes: usize,

    /// Interval, in seconds, between timestamp lines. Only meaningful with
    /// `--backend file`.
    #[arg(long, default_value_t = DEFAULT_TIMESTAMP_INTERVAL_SECS)]
    pub timestamp_interval_secs: u64,
}
