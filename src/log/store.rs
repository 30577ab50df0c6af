// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Log Store (C2): wraps the circular log in a single serializing lock and
//! hides the in-memory vs. file-backed choice behind one contract.
//!
//! The lock must be held across `find_at` plus the copy in `read_at` so an
//! interleaved append cannot evict the packet a reader is mid-copy on. It
//! is a `parking_lot::Mutex`, never held across an `.await` point, so the
//! blocking it does is always bounded by a memcpy or a single file write.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use parking_lot::Mutex;

use crate::error::{AppError, AppResult};
use crate::log::ring::CircularLog;

/// The two arguments of a parsed seek-to-entry control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekCommand {
    pub write_cmd: u32,
    pub write_cmd_offset: u32,
}

enum Backend {
    Memory(CircularLog),
    /// Mirrors the same bounded ring in memory (so `find_at`/`seek_to_entry`
    /// addressing is unchanged) while additionally persisting every append
    /// to `path`, append-only, for the session's lifetime. All file access
    /// happens while `LogStore`'s mutex is held, so a reader can never
    /// observe the file mid-write.
    File {
        ring: CircularLog,
        file: File,
        path: PathBuf,
    },
}

impl Backend {
    fn ring(&self) -> &CircularLog {
        match self {
            Backend::Memory(ring) => ring,
            Backend::File { ring, .. } => ring,
        }
    }

    fn ring_mut(&mut self) -> &mut CircularLog {
        match self {
            Backend::Memory(ring) => ring,
            Backend::File { ring, .. } => ring,
        }
    }
}

/// Serializes access to a [`CircularLog`] (or a file-backed mirror of one)
/// on behalf of many concurrent connection workers.
pub struct LogStore {
    inner: Mutex<Backend>,
}

impl LogStore {
    /// An in-memory store: packets live only in the ring, nothing touches
    /// disk. Used by the default (non-`--backend file`) configuration.
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(Backend::Memory(CircularLog::new())),
        }
    }

    /// A file-backed store. `path` is truncated and recreated so each
    /// session starts from an empty file, matching the source contract
    /// that the backing file is removed on clean shutdown and therefore
    /// never pre-exists at the start of the next one.
    pub fn file_backed(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self {
            inner: Mutex::new(Backend::File {
                ring: CircularLog::new(),
                file,
                path,
            }),
        })
    }

    /// Appends `packet` to the log. Atomic: no other store operation can
    /// interleave. Any evicted packet is simply dropped once this returns.
    pub fn append_packet(&self, packet: Bytes) -> AppResult<()> {
        let mut guard = self.inner.lock();
        match &mut *guard {
            Backend::Memory(ring) => {
                ring.append(packet);
            }
            Backend::File { ring, file, .. } => {
                file.seek(SeekFrom::End(0))?;
                file.write_all(&packet)?;
                ring.append(packet);
            }
        }
        Ok(())
    }

    /// Appends a raw diagnostic line (used by the timestamp writer) without
    /// going through the packet ring — it is not part of the virtual byte
    /// stream's packet accounting, only of the on-disk file surface.
    ///
    /// Only the file-backed store has a file surface for a timestamp line to
    /// land on; calling this against an in-memory store is a caller error
    /// (the timestamp task is only ever spawned for `Backend::File`) and
    /// reports [`AppError::NotPermitted`] rather than silently discarding
    /// the line.
    pub fn append_raw_line(&self, line: &str) -> AppResult<()> {
        let mut guard = self.inner.lock();
        match &mut *guard {
            Backend::File { file, .. } => {
                file.seek(SeekFrom::End(0))?;
                file.write_all(line.as_bytes())?;
                Ok(())
            }
            Backend::Memory(_) => Err(AppError::NotPermitted(
                "append_raw_line requires a file-backed store".to_string(),
            )),
        }
    }

    /// Copies up to `out.len()` bytes starting at `cursor` into `out`.
    /// Returns the number of bytes copied; `0` means EOF (`cursor` is at or
    /// past the end of the virtual byte stream). Does not mutate `cursor` —
    /// callers advance their own cursor by the return value.
    pub fn read_at(&self, cursor: usize, out: &mut [u8]) -> AppResult<usize> {
        let guard = self.inner.lock();
        let ring = guard.ring();
        let Some((slot, inner_offset)) = ring.find_at(cursor) else {
            return Ok(0);
        };
        let packet = ring.slot(slot).expect("find_at only returns occupied slots");
        let available = &packet[inner_offset..];
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        Ok(n)
    }

    /// Resolves a seek-to-entry control command into an absolute byte
    /// offset into the virtual byte stream: `total_of_slots_before_w + u`.
    /// Fails with [`AppError::InvalidArgument`] if `w` is out of range,
    /// slot `w` is unoccupied, or `u` is at or past that slot's size.
    pub fn seek_to_entry(&self, cmd: SeekCommand) -> AppResult<usize> {
        let w = cmd.write_cmd as usize;
        let u = cmd.write_cmd_offset as usize;

        let guard = self.inner.lock();
        let ring = guard.ring();

        if w >= CircularLog::CAPACITY {
            return Err(AppError::InvalidArgument(format!(
                "write_cmd {w} out of range (capacity {})",
                CircularLog::CAPACITY
            )));
        }
        let Some(packet) = ring.slot(w) else {
            return Err(AppError::InvalidArgument(format!("slot {w} is empty")));
        };
        if u >= packet.len() {
            return Err(AppError::InvalidArgument(format!(
                "write_cmd_offset {u} out of range for slot {w} (size {})",
                packet.len()
            )));
        }

        Ok(ring.bytes_before_slot(w) + u)
    }

    /// Sum of the sizes of all occupied slots.
    pub fn total_bytes(&self) -> usize {
        self.inner.lock().ring().total_bytes()
    }

    /// Removes the backing file, if any. Called once at clean shutdown.
    pub fn remove_backing_file(&self) -> AppResult<()> {
        let guard = self.inner.lock();
        if let Backend::File { path, .. } = &*guard {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
