//! Enumerations used across the field schema, sample converter and geometry analyzer.
//!
//! SEG-Y rev-1 defines the sample format code in the binary header (bytes 3225-3226) and leaves
//! everything else about a trace's numeric content implicit. This module only enumerates the
//! values the core actually branches on; it does not attempt to model the full catalogue of
//! semantic trace-header enumerations (gain type, sweep type, and so on) since the core reads and
//! writes headers through the field schema rather than through a typed struct.
use num::FromPrimitive;
#[cfg(any(feature = "to_json", feature = "serde"))]
use serde::{Deserialize, Serialize};

use crate::errors::SegyError;

/// The on-disk sample encoding, from binary-header bytes 3225-3226.
///
/// Only formats 1, 2, 3, 4, 5 and 8 are meaningful to this core (see spec Non-goals); 6 and 7 are
/// reserved by the format and are represented so that `SampleFormatCode::new` does not fail on a
/// file that merely declares them without this crate attempting to read samples from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(i16)]
#[cfg_attr(any(feature = "to_json", feature = "serde"), derive(Serialize, Deserialize))]
pub enum SampleFormatCode {
    IbmFloat32 = 1,
    Int32 = 2,
    Int16 = 3,
    /// 4-byte fixed point with gain. Obsolete; acknowledged at the format-code level only.
    FixedPointGain32 = 4,
    Float32 = 5,
    Reserved6 = 6,
    Reserved7 = 7,
    Int8 = 8,
}

impl std::fmt::Display for SampleFormatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl SampleFormatCode {
    /// Parses a raw binary-header format code, failing on values SEG-Y rev-1 never assigns.
    pub fn new(code: u16) -> Result<Self, SegyError> {
        Self::from_u16(code).ok_or(SegyError::ParseFormatCode { code })
    }

    /// Size in bytes of one sample in this format.
    ///
    /// The core hard-codes the 4-byte-sample assumption (`trace_bsize = samples * 4`) for the two
    /// formats it round-trips (IBM float, IEEE float); this is reported for completeness and so
    /// that reading a file declaring another format fails with a clear error instead of silently
    /// mis-sizing traces.
    pub fn byte_length(self) -> usize {
        match self {
            Self::IbmFloat32 => 4,
            Self::Int32 => 4,
            Self::Int16 => 2,
            Self::FixedPointGain32 => 4,
            Self::Float32 => 4,
            Self::Reserved6 => 4,
            Self::Reserved7 => 4,
            Self::Int8 => 1,
        }
    }

    /// Whether this core can actually convert samples in this format (IBM float and IEEE float
    /// are the only formats required to round-trip; see spec Non-goals).
    pub fn is_convertible(self) -> bool {
        matches!(self, Self::IbmFloat32 | Self::Float32)
    }
}

/// The direction in which traces are laid out along the two line axes of a 3-D cube.
///
/// Crossline-sorted means the crossline axis is slow (inline varies fastest); inline-sorted means
/// the inline axis is slow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(feature = "to_json", feature = "serde"), derive(Serialize, Deserialize))]
pub enum Sorting {
    InlineSorted,
    CrosslineSorted,
}
