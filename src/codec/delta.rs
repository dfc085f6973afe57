//! Delta transform between the wire encoding and absolute offsets.
//!
//! On the wire each offset is stored relative to the end of the previous
//! sibling. Decoding is not idempotent: feeding already decoded levels back
//! in shifts every node right and breaks the containment invariant.

use super::layout::{BarLayout, DoubleLayout, Format, SingleLayout};
use crate::utils::error::CodecError;

fn check_alignment<L: BarLayout>(levels: &[Vec<u64>]) -> Result<(), CodecError> {
    for (i, level) in levels.iter().enumerate() {
        if level.len() % L::STRIDE != 0 {
            return Err(CodecError::Misaligned {
                level: i,
                len: level.len(),
                stride: L::STRIDE,
            });
        }
    }
    Ok(())
}

fn decode_layout<L: BarLayout>(levels: &mut [Vec<u64>]) -> Result<(), CodecError> {
    check_alignment::<L>(levels)?;

    for (i, level) in levels.iter_mut().enumerate() {
        for &field in L::offset_fields() {
            let mut prev = 0u64;
            for j in (0..level.len()).step_by(L::STRIDE) {
                let offset = level[j + field]
                    .checked_add(prev)
                    .ok_or(CodecError::Overflow(i))?;
                level[j + field] = offset;
                prev = offset
                    .checked_add(level[j + field + 1])
                    .ok_or(CodecError::Overflow(i))?;
            }
        }
    }
    Ok(())
}

fn encode_layout<L: BarLayout>(levels: &mut [Vec<u64>]) -> Result<(), CodecError> {
    check_alignment::<L>(levels)?;

    for (i, level) in levels.iter_mut().enumerate() {
        for &field in L::offset_fields() {
            let mut prev = 0u64;
            for j in (0..level.len()).step_by(L::STRIDE) {
                let offset = level[j + field];
                level[j + field] = offset
                    .checked_sub(prev)
                    .ok_or(CodecError::NonMonotonic { level: i, slot: j })?;
                prev = offset
                    .checked_add(level[j + field + 1])
                    .ok_or(CodecError::Overflow(i))?;
            }
        }
    }
    Ok(())
}

/// Convert wire deltas into absolute offsets.
///
/// Takes the levels by value so a decoded buffer is never mistaken for a raw
/// one by the same owner.
pub fn decode_deltas(mut levels: Vec<Vec<u64>>, format: Format) -> Result<Vec<Vec<u64>>, CodecError> {
    match format {
        Format::Single => decode_layout::<SingleLayout>(&mut levels)?,
        Format::Double => decode_layout::<DoubleLayout>(&mut levels)?,
    }
    Ok(levels)
}

/// Inverse of [`decode_deltas`]
pub fn encode_deltas(mut levels: Vec<Vec<u64>>, format: Format) -> Result<Vec<Vec<u64>>, CodecError> {
    match format {
        Format::Single => encode_layout::<SingleLayout>(&mut levels)?,
        Format::Double => encode_layout::<DoubleLayout>(&mut levels)?,
    }
    Ok(levels)
}
