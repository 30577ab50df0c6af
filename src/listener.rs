// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Socket setup that must happen before an optional `fork()`: resolve the
//! local address, create the socket, set `SO_REUSEADDR`, and bind. `listen`
//! is deferred to the caller so it can run after daemonization, matching
//! the appliance's own bind-then-optionally-daemonize-then-listen order.

use std::net::{SocketAddr, TcpListener};

use socket2::{Domain, Protocol, Socket, Type};

use crate::error::AppResult;

pub const BACKLOG: i32 = 10;

/// Creates, configures, and binds (but does not yet listen on) a TCPv4
/// socket for `port`.
pub fn bind(port: u16) -> AppResult<Socket> {
    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    socket.bind(&addr.into())?;
    Ok(socket)
}

/// Starts listening with the appliance's fixed backlog and hands back a
/// standard-library, blocking-mode `TcpListener` ready to be registered
/// with an async runtime.
pub fn listen(socket: Socket) -> AppResult<TcpListener> {
    socket.listen(BACKLOG)?;
    Ok(socket.into())
}
