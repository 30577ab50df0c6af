// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! TCP ingest/echo server: the Acceptor (C5), one Connection Worker (C4)
//! per accepted socket, and the per-connection Packet Assembler (C3).

pub mod acceptor;
pub mod assembler;
pub mod worker;
