//! The error type shared by every crate in the workspace.
//!
//! Each variant corresponds to one of the stable error codes listed in the format's external
//! interface (OK, FSEEK_ERROR, FREAD_ERROR, ...); `error_code` recovers that integer for callers
//! that need the legacy numeric surface (for example a CLI exit code).
use crate::enums::SampleFormatCode;

/// The stable numeric error codes from the external interface. `Ok` is never constructed as a
/// [`SegyError`] variant (a successful operation returns `Ok(..)`, not this type), but its
/// discriminant is kept here so the whole table lives in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    FseekError = 1,
    FreadError = 2,
    FwriteError = 3,
    FopenError = 4,
    InvalidField = 5,
    InvalidSorting = 6,
    InvalidOffsets = 7,
    InvalidArgs = 8,
    MissingLineIndex = 9,
    TraceSizeMismatch = 10,
    MmapInvalid = 11,
    MmapError = 12,
}

/// Errors returned by the codec, schema, header I/O, geometry analyzer and accessors.
#[derive(Debug)]
pub enum SegyError {
    /// Propagated `seek` failure.
    Seek(std::io::Error),
    /// Propagated `read` failure.
    Read(std::io::Error),
    /// Propagated `write` failure.
    Write(std::io::Error),
    /// Propagated `open` failure.
    Open(std::io::Error),
    /// Memory map could not be created or is inconsistent with the file size.
    Mmap(std::io::Error),
    /// An operation was attempted through a file handle that has no active mapping.
    MmapInvalid,
    /// A byte slice of the wrong length was handed to a fixed-width conversion.
    TryFromSlice(std::array::TryFromSliceError),
    /// A field identifier (byte offset) is unrecognized, or out of range for its header.
    InvalidField { offset: u16 },
    /// A mode string, index, or other caller-supplied argument makes no sense.
    InvalidArgs { msg: String },
    /// The geometry analyzer could not deduce a sorting direction.
    InvalidSorting,
    /// The geometry analyzer could not deduce a consistent offset count.
    InvalidOffsets,
    /// A requested line number does not appear in the enumerated line-index sequence.
    MissingLineIndex { line: i32 },
    /// File size is not `trace0 + n * (240 + trace_bsize)` for any whole `n`.
    TraceSizeMismatch { file_size: u64, trace0: u64, trace_bsize: u64 },
    /// `inline_count * crossline_count * offsets != trace_count`.
    GeometryMismatch { inline_count: usize, crossline_count: usize, offsets: usize, trace_count: usize },
    /// A sample buffer's length does not match the declared samples-per-trace.
    SampleLengthMismatch { expected: usize, got: usize },
    /// Binary and trace header sample intervals are both nonzero and disagree.
    SampleIntervalMismatch { binary: u16, trace: u16 },
    /// A binary-header format code outside SEG-Y rev-1's assigned range.
    ParseFormatCode { code: u16 },
    /// A sample format this core cannot convert (see [`SampleFormatCode::is_convertible`]).
    UnsupportedFormat { format: SampleFormatCode },
    /// Trace header is not exactly 240 bytes.
    TraceHeaderLength { len: usize },
    /// Binary header is not exactly 400 bytes.
    BinHeaderLength { len: usize },
}

impl SegyError {
    /// The stable numeric error code for this error, per the format's external interface.
    pub fn error_code(&self) -> ErrorCode {
        use SegyError::*;
        match self {
            Seek(_) => ErrorCode::FseekError,
            Read(_) => ErrorCode::FreadError,
            Write(_) => ErrorCode::FwriteError,
            Open(_) => ErrorCode::FopenError,
            Mmap(_) => ErrorCode::MmapError,
            MmapInvalid => ErrorCode::MmapInvalid,
            TryFromSlice(_) => ErrorCode::FreadError,
            InvalidField { .. } => ErrorCode::InvalidField,
            InvalidArgs { .. } => ErrorCode::InvalidArgs,
            InvalidSorting => ErrorCode::InvalidSorting,
            InvalidOffsets => ErrorCode::InvalidOffsets,
            MissingLineIndex { .. } => ErrorCode::MissingLineIndex,
            TraceSizeMismatch { .. } => ErrorCode::TraceSizeMismatch,
            GeometryMismatch { .. } => ErrorCode::TraceSizeMismatch,
            SampleLengthMismatch { .. } => ErrorCode::InvalidArgs,
            SampleIntervalMismatch { .. } => ErrorCode::TraceSizeMismatch,
            ParseFormatCode { .. } => ErrorCode::InvalidArgs,
            UnsupportedFormat { .. } => ErrorCode::InvalidArgs,
            TraceHeaderLength { .. } => ErrorCode::InvalidArgs,
            BinHeaderLength { .. } => ErrorCode::InvalidArgs,
        }
    }
}

impl From<std::array::TryFromSliceError> for SegyError {
    fn from(e: std::array::TryFromSliceError) -> Self {
        Self::TryFromSlice(e)
    }
}

impl std::fmt::Display for SegyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SegyError::*;
        match self {
            Seek(e) => write!(f, "seek failed: {}", e),
            Read(e) => write!(f, "read failed: {}", e),
            Write(e) => write!(f, "write failed: {}", e),
            Open(e) => write!(f, "open failed: {}", e),
            Mmap(e) => write!(f, "memory map failed: {}", e),
            MmapInvalid => write!(f, "no active memory map for this handle"),
            TryFromSlice(e) => write!(f, "{}", e),
            InvalidField { offset } => write!(f, "field at offset {} is unrecognized", offset),
            InvalidArgs { msg } => write!(f, "invalid argument: {}", msg),
            InvalidSorting => write!(f, "could not deduce a sorting direction for this file"),
            InvalidOffsets => write!(f, "could not deduce a consistent offset count for this file"),
            MissingLineIndex { line } => write!(f, "line {} is not present in this file", line),
            TraceSizeMismatch { file_size, trace0, trace_bsize } => write!(
                f,
                "file size {} is not trace0 ({}) plus a whole number of {}-byte traces",
                file_size, trace0, trace_bsize + 240
            ),
            GeometryMismatch { inline_count, crossline_count, offsets, trace_count } => write!(
                f,
                "{} inlines * {} crosslines * {} offsets = {}, but the file has {} traces",
                inline_count, crossline_count, offsets, inline_count * crossline_count * offsets, trace_count
            ),
            SampleLengthMismatch { expected, got } => {
                write!(f, "expected {} samples, got {}", expected, got)
            }
            SampleIntervalMismatch { binary, trace } => write!(
                f,
                "binary header sample interval ({}) disagrees with trace header ({})",
                binary, trace
            ),
            ParseFormatCode { code } => write!(f, "{} is not a valid sample format code", code),
            UnsupportedFormat { format } => {
                write!(f, "sample format {} cannot be converted by this core", format)
            }
            TraceHeaderLength { len } => write!(f, "trace header must be 240 bytes, got {}", len),
            BinHeaderLength { len } => write!(f, "binary header must be 400 bytes, got {}", len),
        }
    }
}

impl std::error::Error for SegyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use SegyError::*;
        match self {
            Seek(e) | Read(e) | Write(e) | Open(e) | Mmap(e) => Some(e),
            TryFromSlice(e) => Some(e),
            _ => None,
        }
    }
}
