// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoder for the compact base64 path encoding.
//!
//! The encoding packs a path into sextets. Each instruction starts
//! with a header character: bits 3-5 select the operation (move, line,
//! quadratic, cubic, close), bit 2 selects 2- or 3-character numbers,
//! and bits 0-1 are reserved and must be zero. Each following number
//! is a sign bit plus an 11- or 17-bit magnitude in tenths of a unit,
//! applied as a delta to a running position. Move instructions reset
//! the running position to the origin first.

use alloc::vec::Vec;

use kurbo::Point;

use crate::command::Command;

/// Failure while decoding an encoded path string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathDecodeError {
    /// A character outside the base64 alphabet.
    #[error("bad path data (@{index}): invalid character {ch:?}")]
    InvalidCharacter { index: usize, ch: char },
    /// A header character selecting an operation that does not exist.
    #[error("bad path data (@{index}): invalid opcode {opcode}")]
    InvalidOpcode { index: usize, opcode: u8 },
    /// A header character with its reserved low bits set.
    #[error("bad path data (@{index}): reserved bits set")]
    ReservedBits { index: usize },
    /// The string ended in the middle of an instruction's parameters.
    #[error("bad path data: truncated at index {index}")]
    Truncated { index: usize },
}

/// Parameter counts per opcode: move, line, quad, cubic, close.
const PARAM_COUNTS: [usize; 5] = [2, 2, 4, 6, 0];

fn sextet(data: &[u8], index: usize) -> Result<u8, PathDecodeError> {
    let Some(&b) = data.get(index) else {
        return Err(PathDecodeError::Truncated { index });
    };
    match b {
        b'A'..=b'Z' => Ok(b - b'A'),
        b'a'..=b'z' => Ok(b - b'a' + 26),
        b'0'..=b'9' => Ok(b - b'0' + 52),
        b'+' => Ok(62),
        b'/' => Ok(63),
        _ => Err(PathDecodeError::InvalidCharacter {
            index,
            ch: char::from(b),
        }),
    }
}

/// Decodes `data` into path instructions.
///
/// The result is all-or-nothing: any malformed input yields an error
/// and no instructions. Emitted coordinates are absolute, with the
/// deltas already accumulated.
pub fn decode_path(data: &str) -> Result<Vec<Command>, PathDecodeError> {
    let bytes = data.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut params = [0.0_f64; 6];
    while i < bytes.len() {
        let header = sextet(bytes, i)?;
        let opcode = header >> 3;
        if usize::from(opcode) >= PARAM_COUNTS.len() {
            return Err(PathDecodeError::InvalidOpcode { index: i, opcode });
        }
        if header & 3 != 0 {
            return Err(PathDecodeError::ReservedBits { index: i });
        }
        let char_count = usize::from(header >> 2 & 1) + 2;
        let param_count = PARAM_COUNTS[usize::from(opcode)];
        if opcode == 0 {
            // Move instructions restart the running position.
            x = 0.0;
            y = 0.0;
        }
        i += 1;
        for (p, slot) in params.iter_mut().enumerate().take(param_count) {
            let first = sextet(bytes, i)?;
            let sign = if first >> 5 != 0 { -1.0 } else { 1.0 };
            let mut num = u32::from(first & 31) << 6 | u32::from(sextet(bytes, i + 1)?);
            if char_count == 3 {
                num = num << 6 | u32::from(sextet(bytes, i + 2)?);
            }
            i += char_count;
            let delta = sign * f64::from(num) / 10.0;
            if p % 2 == 0 {
                x += delta;
                *slot = x;
            } else {
                y += delta;
                *slot = y;
            }
        }
        out.push(match opcode {
            0 => Command::MoveTo(Point::new(params[0], params[1])),
            1 => Command::LineTo(Point::new(params[0], params[1])),
            2 => Command::QuadTo {
                ctrl: Point::new(params[0], params[1]),
                to: Point::new(params[2], params[3]),
            },
            3 => Command::CubicTo {
                c1: Point::new(params[0], params[1]),
                c2: Point::new(params[2], params[3]),
                to: Point::new(params[4], params[5]),
            },
            _ => Command::ClosePath,
        });
    }
    Ok(out)
}
