// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Control Command Parser (C6).
//!
//! Recognizes the seek-to-entry directive and extracts its two decimal
//! arguments. Deliberately not shared with any general-purpose
//! configuration parser — the grammar is one fixed prefix plus
//! `<u32>,<u32>` and nothing else ever needs to grow here.

use crate::error::AppError;
use crate::log::SeekCommand;

pub const SEEK_PREFIX: &str = "AESDCHAR_IOCSEEKTO:";

/// Parses `packet` (without its trailing newline) as a seek-to-entry
/// control command.
///
/// Returns `Ok(None)` if `packet` does not start with [`SEEK_PREFIX`] — it
/// is an ordinary packet, not a control command. Returns `Err` if the
/// prefix matches but the `W,U` grammar does not.
pub fn parse_seek_command(packet: &str) -> Result<Option<SeekCommand>, AppError> {
    let Some(rest) = packet.strip_prefix(SEEK_PREFIX) else {
        return Ok(None);
    };

    let Some((write_cmd, write_cmd_offset)) = rest.split_once(',') else {
        return Err(AppError::InvalidArgument(format!(
            "malformed seek command: {rest:?}"
        )));
    };

    let write_cmd = write_cmd.parse::<u32>().map_err(|_| {
        AppError::InvalidArgument(format!("non-decimal write_cmd: {write_cmd:?}"))
    })?;
    let write_cmd_offset = write_cmd_offset.parse::<u32>().map_err(|_| {
        AppError::InvalidArgument(format!(
            "non-decimal write_cmd_offset: {write_cmd_offset:?}"
        ))
    })?;

    Ok(Some(SeekCommand {
        write_cmd,
        write_cmd_offset,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_control_packet_is_not_a_command() {
        assert!(parse_seek_command("hello").unwrap().is_none());
    }

    #[test]
    fn valid_command_parses_both_arguments() {
        let cmd = parse_seek_command("AESDCHAR_IOCSEEKTO:1,2")
            .unwrap()
            .unwrap();
        assert_eq!(cmd.write_cmd, 1);
        assert_eq!(cmd.write_cmd_offset, 2);
    }

    #[test]
    fn prefix_only_is_a_parse_error() {
        assert!(parse_seek_command("AESDCHAR_IOCSEEKTO:").is_err());
    }

    #[test]
    fn missing_comma_is_a_parse_error() {
        assert!(parse_seek_command("AESDCHAR_IOCSEEKTO:12").is_err());
    }

    #[test]
    fn whitespace_is_rejected() {
        assert!(parse_seek_command("AESDCHAR_IOCSEEKTO:1, 2").is_err());
        assert!(parse_seek_command("AESDCHAR_IOCSEEKTO: 1,2").is_err());
    }

    #[test]
    fn negative_numbers_are_rejected() {
        assert!(parse_seek_command("AESDCHAR_IOCSEEKTO:-1,2").is_err());
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(parse_seek_command("AESDCHAR_IOCSEEKTO:1,2,3").is_err());
        assert!(parse_seek_command("AESDCHAR_IOCSEEKTO:1,2x").is_err());
    }
}
