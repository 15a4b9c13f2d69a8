//! Foundation crate for reading and writing SEG-Y files: the byte codec (EBCDIC transcoding and
//! big-endian field helpers), the IBM<->IEEE float codec, the field schema, the sample-format
//! enum, and the shared error type. Holds no I/O of its own; `segy-io` builds the file handle,
//! header façade, sample converter, geometry analyzer and accessors on top of it.
extern crate num;
#[macro_use]
extern crate num_derive;
#[cfg(any(feature = "to_json", feature = "serde"))]
extern crate serde;
#[cfg(feature = "to_json")]
extern crate serde_json;

pub mod ebcdic;
pub mod enums;
pub mod errors;
pub mod ibmfloat;
pub mod schema;

pub use enums::{SampleFormatCode, Sorting};
pub use errors::{ErrorCode, SegyError};
pub use schema::{get_field, set_field, BIN_HEADER_LEN, TRACE_HEADER_LEN};

/// Length of the mandatory and every extended textual header.
pub const TEXT_HEADER_LEN: usize = 3200;
/// File offset of the 400-byte binary header.
pub const BIN_HEADER_OFFSET: usize = TEXT_HEADER_LEN;
/// Default trace-header offset of the offset field (byte 37, fixed by the format).
pub const DEFAULT_OFFSET_FIELD: u16 = 37;
/// Default trace-header offset of the inline field (rev-1 convention).
pub const DEFAULT_INLINE_FIELD: u16 = 189;
/// Default trace-header offset of the crossline field (rev-1 convention).
pub const DEFAULT_CROSSLINE_FIELD: u16 = 193;
