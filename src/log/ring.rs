// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity ring of owned packets (C1).
//!
//! No locking here: callers serialize access. Each occupied slot owns its
//! packet bytes exclusively; eviction moves the old packet out of the slot
//! before the new one moves in, so there is never a moment where two slots
//! alias the same bytes.

use bytes::Bytes;

/// Number of slots in the ring. Fixed by the appliance's contract.
pub const CAPACITY: usize = 10;

/// A fixed-capacity, write-ordered ring of packets.
///
/// `in_idx` is the slot the next append will land in; `out_idx` is the
/// oldest occupied slot. `full` disambiguates `in_idx == out_idx` meaning
/// empty from it meaning completely full.
pub struct CircularLog {
    slots: [Option<Bytes>; CAPACITY],
    in_idx: usize,
    out_idx: usize,
    full: bool,
}

impl CircularLog {
    pub const CAPACITY: usize = CAPACITY;

    /// Builds an empty log. All slots start unoccupied.
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
            in_idx: 0,
            out_idx: 0,
            full: false,
        }
    }

    /// Appends `packet`, evicting and returning the oldest packet if the log
    /// was already full. Never fails: an append into a full log always
    /// succeeds by evicting slot `out_idx`.
    pub fn append(&mut self, packet: Bytes) -> Option<Bytes> {
        let evicted = if self.full {
            let evicted = self.slots[self.out_idx].take();
            self.out_idx = (self.out_idx + 1) % CAPACITY;
            evicted
        } else {
            None
        };

        self.slots[self.in_idx] = Some(packet);
        self.in_idx = (self.in_idx + 1) % CAPACITY;
        self.full = self.in_idx == self.out_idx;

        evicted
    }

    /// Locates the slot and in-slot byte offset corresponding to
    /// `char_offset` in the virtual byte stream (the oldest-to-newest
    /// concatenation of occupied slots). Returns `None` if `char_offset` is
    /// at or past the end of the stream.
    pub fn find_at(&self, char_offset: usize) -> Option<(usize, usize)> {
        let mut total = 0usize;
        let mut idx = self.out_idx;

        for _ in 0..CAPACITY {
            let Some(packet) = self.slots[idx].as_ref() else {
                break;
            };

            if char_offset < total + packet.len() {
                return Some((idx, char_offset - total));
            }

            total += packet.len();
            idx = (idx + 1) % CAPACITY;

            if idx == self.in_idx && !self.full {
                break;
            }
        }

        None
    }

    /// Returns the packet occupying `slot`, if any.
    pub fn slot(&self, slot: usize) -> Option<&Bytes> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Sum of the sizes of all occupied slots.
    pub fn total_bytes(&self) -> usize {
        self.slots.iter().flatten().map(|p| p.len()).sum()
    }

    /// Sum of the sizes of slots strictly before raw slot index `w`, walking
    /// the slot array in raw (not oldest-first) order `0..w`. Used by
    /// `seek_to_entry`, which addresses slots by their raw array position.
    pub fn bytes_before_slot(&self, w: usize) -> usize {
        self.slots[..w].iter().flatten().map(|p| p.len()).sum()
    }

    /// Iterates occupied slots oldest-to-newest, e.g. for shutdown
    /// accounting or diagnostics.
    pub fn foreach_occupied<F: FnMut(&Bytes)>(&self, mut visit: F) {
        let mut idx = self.out_idx;
        for _ in 0..CAPACITY {
            let Some(packet) = self.slots[idx].as_ref() else {
                break;
            };
            visit(packet);
            idx = (idx + 1) % CAPACITY;
            if idx == self.in_idx && !self.full {
                break;
            }
        }
    }
}

impl Default for CircularLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    #[test]
    fn empty_log_has_no_bytes_and_no_offsets() {
        let log = CircularLog::new();
        assert_eq!(log.total_bytes(), 0);
        assert_eq!(log.find_at(0), None);
    }

    #[test]
    fn append_then_find_roundtrips() {
        let mut log = CircularLog::new();
        log.append(packet("hello\n"));
        assert_eq!(log.total_bytes(), 6);
        let (slot, inner) = log.find_at(0).unwrap();
        assert_eq!(inner, 0);
        assert_eq!(log.slot(slot).unwrap().as_ref(), b"hello\n");
    }

    #[test]
    fn offset_at_total_bytes_is_eof() {
        let mut log = CircularLog::new();
        log.append(packet("hi\n"));
        assert_eq!(log.find_at(3), None);
    }

    #[test]
    fn find_at_maps_offset_into_second_packet() {
        let mut log = CircularLog::new();
        log.append(packet("one\n"));
        log.append(packet("two\n"));
        // "one\ntwo\n" -> offset 5 is 'w' in "two\n" (offset 1 within slot)
        let (slot, inner) = log.find_at(5).unwrap();
        assert_eq!(inner, 1);
        assert_eq!(log.slot(slot).unwrap().as_ref(), b"two\n");
    }

    #[test]
    fn eviction_at_capacity_drops_oldest() {
        let mut log = CircularLog::new();
        for i in 0..CAPACITY {
            log.append(packet(&format!("p{i}\n")));
        }
        // one more triggers eviction of p0
        let evicted = log.append(packet("p10\n"));
        assert_eq!(evicted.unwrap().as_ref(), b"p0\n");

        let mut concatenated = Vec::new();
        log.foreach_occupied(|p| concatenated.extend_from_slice(p));
        let expected: Vec<u8> = (1..=10)
            .map(|i| format!("p{i}\n"))
            .collect::<String>()
            .into_bytes();
        assert_eq!(concatenated, expected);
    }

    #[test]
    fn single_newline_packet_contributes_one_byte() {
        let mut log = CircularLog::new();
        log.append(packet("\n"));
        assert_eq!(log.total_bytes(), 1);
    }

    #[test]
    fn bytes_before_slot_sums_raw_prefix() {
        let mut log = CircularLog::new();
        log.append(packet("aa\n")); // slot 0
        log.append(packet("b\n")); // slot 1
        assert_eq!(log.bytes_before_slot(1), 3);
        assert_eq!(log.bytes_before_slot(0), 0);
    }

    #[test]
    fn empty_packet_is_accepted_but_contributes_nothing() {
        let mut log = CircularLog::new();
        log.append(Bytes::new());
        assert_eq!(log.total_bytes(), 0);
        assert_eq!(log.find_at(0), None);
    }
}
