//! Timing Reader
//!
//! The engine reports its timings on the last two non-empty lines of its
//! output. Anything printed before them (the canonical form, diagnostics) is
//! ignored.

use crate::TIMING_PREFIX_LEN;
use crate::error::ProtocolError;
use std::io::BufRead;

/// Timings reported by a process-based engine, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessTiming {
    /// Time the engine spent reading the graph into its own structures
    pub setup_ns: u64,
    /// Time the engine spent computing the canonical form
    pub canonization_ns: u64,
}

/// Parse one timing line: strip the fixed prefix, trim, parse
pub fn parse_timing_line(line: &str) -> Result<u64, ProtocolError> {
    let value = line
        .get(TIMING_PREFIX_LEN..)
        .ok_or_else(|| ProtocolError::TruncatedLine {
            line: line.to_string(),
        })?;

    value
        .trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidTiming {
            line: line.to_string(),
        })
}

/// Read the engine's output to the end and parse its two timing lines
pub fn read_timings<R: BufRead>(reader: R) -> Result<ProcessTiming, ProtocolError> {
    let mut last = [None, None];
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        last[0] = last[1].take();
        last[1] = Some(line);
    }

    match last {
        [Some(setup), Some(canon)] => Ok(ProcessTiming {
            setup_ns: parse_timing_line(&setup)?,
            canonization_ns: parse_timing_line(&canon)?,
        }),
        [_, Some(_)] => Err(ProtocolError::MissingTiming { received: 1 }),
        _ => Err(ProtocolError::MissingTiming { received: 0 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_timing_line() {
        assert_eq!(parse_timing_line("setup time: 1234").unwrap(), 1234);
        assert_eq!(parse_timing_line("canon time:   99  ").unwrap(), 99);
    }

    #[test]
    fn test_parse_truncated() {
        assert!(matches!(
            parse_timing_line("short"),
            Err(ProtocolError::TruncatedLine { .. })
        ));
        assert!(matches!(
            parse_timing_line("setup time:"),
            Err(ProtocolError::InvalidTiming { .. })
        ));
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert!(matches!(
            parse_timing_line("setup time: -5"),
            Err(ProtocolError::InvalidTiming { .. })
        ));
    }

    #[test]
    fn test_read_two_lines() {
        let output = Cursor::new("setup time: 100\ncanon time: 250\n");
        let timing = read_timings(output).unwrap();
        assert_eq!(
            timing,
            ProcessTiming {
                setup_ns: 100,
                canonization_ns: 250
            }
        );
    }

    #[test]
    fn test_read_skips_leading_output() {
        let output = Cursor::new("canonical form: (a(b))\nsetup time: 7\ncanon time: 8\n\n");
        let timing = read_timings(output).unwrap();
        assert_eq!(timing.setup_ns, 7);
        assert_eq!(timing.canonization_ns, 8);
    }

    #[test]
    fn test_read_missing_lines() {
        assert!(matches!(
            read_timings(Cursor::new("")),
            Err(ProtocolError::MissingTiming { received: 0 })
        ));
        assert!(matches!(
            read_timings(Cursor::new("setup time: 1\n")),
            Err(ProtocolError::MissingTiming { received: 1 })
        ));
    }
}
