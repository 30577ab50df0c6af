// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Packet Assembler (C3): per-connection buffer that accumulates received
//! bytes until a terminating newline appears.
//!
//! Bounded, unlike the appliance this crate is modeled on: growth stops at
//! `max_bytes` and `feed` reports [`AppError::ResourceExhaustion`] instead
//! of growing forever, so a client that never sends a newline cannot pin an
//! unbounded amount of memory to one worker task.

use bytes::{Bytes, BytesMut};

use crate::error::{AppError, AppResult};

const INITIAL_CAPACITY: usize = 1024;

pub struct Assembler {
    buf: BytesMut,
    max_bytes: usize,
    newline_at: Option<usize>,
}

impl Assembler {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
            max_bytes,
            newline_at: None,
        }
    }

    /// Appends `chunk` to the assembly buffer. Returns `true` if a newline
    /// is now present (the packet is complete). Fails if the buffer would
    /// grow past `max_bytes` without ever finding one.
    pub fn feed(&mut self, chunk: &[u8]) -> AppResult<bool> {
        if self.newline_at.is_some() {
            return Ok(true);
        }

        if self.buf.len() + chunk.len() > self.max_bytes {
            return Err(AppError::ResourceExhaustion(format!(
                "assembly buffer would exceed {} bytes",
                self.max_bytes
            )));
        }

        let start = self.buf.len();
        self.buf.extend_from_slice(chunk);
        self.newline_at = self.buf[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| start + i);

        Ok(self.newline_at.is_some())
    }

    /// Takes the assembled packet, including its terminating newline, and
    /// resets the assembler for the next packet on this connection. Panics
    /// if `feed` has not yet reported a newline — callers must check first.
    pub fn take_packet(&mut self) -> Bytes {
        let newline_at = self
            .newline_at
            .expect("take_packet called before feed reported a newline");
        let packet = self.buf.split_to(newline_at + 1).freeze();
        self.buf.clear();
        self.newline_at = None;
        packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feeds_until_newline_then_reports_ready() {
        let mut asm = Assembler::new(4096);
        assert!(!asm.feed(b"hel").unwrap());
        assert!(asm.feed(b"lo\n").unwrap());
        assert_eq!(&asm.take_packet()[..], b"hello\n");
    }

    #[test]
    fn discards_nothing_before_newline_but_resets_after_take() {
        let mut asm = Assembler::new(4096);
        asm.feed(b"a\n").unwrap();
        assert_eq!(&asm.take_packet()[..], b"a\n");
        assert!(!asm.feed(b"b").unwrap());
        assert!(asm.feed(b"c\n").unwrap());
        assert_eq!(&asm.take_packet()[..], b"bc\n");
    }

    #[test]
    fn exceeding_max_bytes_without_newline_is_an_error() {
        let mut asm = Assembler::new(8);
        assert!(asm.feed(b"1234567").is_ok());
        assert!(asm.feed(b"89").is_err());
    }

    #[test]
    fn newline_in_first_byte_works() {
        let mut asm = Assembler::new(16);
        assert!(asm.feed(b"\n").unwrap());
        assert_eq!(&asm.take_packet()[..], b"\n");
    }
}
