// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Daemonization: an external collaborator, referenced only through this
//! narrow `daemonize()` entry point. Nothing else in the crate depends on
//! how it forks or redirects standard streams.

use std::ffi::CString;

use crate::error::{AppError, AppResult};

/// Forks into the background, detaches from the controlling terminal, and
/// redirects stdin/stdout/stderr to `/dev/null`. The parent process exits
/// immediately on success; only the child returns from this function.
pub fn daemonize() -> AppResult<()> {
    // SAFETY: these are the standard double-fork/redirect steps for
    // daemonizing a POSIX process; each call is checked before the next is
    // attempted, matching the appliance's own sequencing.
    unsafe {
        match libc::fork() {
            -1 => return Err(AppError::Io(std::io::Error::last_os_error())),
            0 => {}                 // child: continue below
            _ => std::process::exit(0), // parent: hand off to the daemon
        }

        if libc::setsid() == -1 {
            return Err(AppError::Io(std::io::Error::last_os_error()));
        }

        if libc::chdir(CString::new("/").unwrap().as_ptr()) != 0 {
            return Err(AppError::Io(std::io::Error::last_os_error()));
        }

        let dev_null = CString::new("/dev/null").unwrap();
        let fd = libc::open(dev_null.as_ptr(), libc::O_RDWR);
        if fd == -1 {
            return Err(AppError::Io(std::io::Error::last_os_error()));
        }
        libc::dup2(fd, libc::STDIN_FILENO);
        libc::dup2(fd, libc::STDOUT_FILENO);
        libc::dup2(fd, libc::STDERR_FILENO);
        if fd > libc::STDERR_FILENO {
            libc::close(fd);
        }
    }

    Ok(())
}
