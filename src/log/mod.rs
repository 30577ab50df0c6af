// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The bounded write-ordered log: C1 (the ring itself) and C2 (the
//! serializing store wrapped around it, with an in-memory or file-backed
//! implementation behind one shared contract).

pub mod ring;
pub mod store;

pub use ring::CircularLog;
pub use store::{LogStore, SeekCommand};
