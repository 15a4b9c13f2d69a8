//! Header I/O: reads and writes the mandatory textual header, any extended textual headers, the
//! binary header, and individual trace headers through a [`SegyHandle`], transcoding the textual
//! headers between EBCDIC and ASCII as they cross the boundary.
use segy_core::errors::SegyError;
use segy_core::{ebcdic, get_field, set_field, BIN_HEADER_LEN, TEXT_HEADER_LEN, TRACE_HEADER_LEN};

use crate::handle::SegyHandle;

/// Byte offset of extended textual header `n` (0-based, `n >= 1`), counting past the mandatory
/// textual header and the 400-byte binary header.
fn extended_text_offset(n: usize) -> u64 {
    (TEXT_HEADER_LEN + BIN_HEADER_LEN + (n - 1) * TEXT_HEADER_LEN) as u64
}

/// Reads the mandatory textual header and transcodes it to ASCII.
pub fn read_text_header(handle: &mut SegyHandle) -> Result<Vec<u8>, SegyError> {
    let mut buf = vec![0u8; TEXT_HEADER_LEN];
    handle.read_at(0, &mut buf)?;
    Ok(ebcdic::e2a(&buf))
}

/// Writes the mandatory textual header, transcoding from ASCII to EBCDIC. `text` is padded with
/// ASCII spaces or truncated to exactly [`TEXT_HEADER_LEN`] bytes.
pub fn write_text_header(handle: &mut SegyHandle, text: &[u8]) -> Result<(), SegyError> {
    write_fixed_text(handle, 0, text)
}

/// Reads extended textual header `n` (1-based, following the convention of the binary header's
/// extended-header-count field) and transcodes it to ASCII.
pub fn read_extended_text_header(handle: &mut SegyHandle, n: usize) -> Result<Vec<u8>, SegyError> {
    let mut buf = vec![0u8; TEXT_HEADER_LEN];
    handle.read_at(extended_text_offset(n), &mut buf)?;
    Ok(ebcdic::e2a(&buf))
}

/// Writes extended textual header `n`. See [`write_text_header`] for padding/truncation rules.
pub fn write_extended_text_header(handle: &mut SegyHandle, n: usize, text: &[u8]) -> Result<(), SegyError> {
    write_fixed_text(handle, extended_text_offset(n), text)
}

fn write_fixed_text(handle: &mut SegyHandle, pos: u64, text: &[u8]) -> Result<(), SegyError> {
    let mut buf = vec![0x20u8; TEXT_HEADER_LEN]; // ASCII space
    let n = text.len().min(TEXT_HEADER_LEN);
    buf[..n].copy_from_slice(&text[..n]);
    handle.write_at(pos, &ebcdic::a2e(&buf))
}

/// Reads the 400-byte binary header into a fresh buffer.
pub fn read_bin_header(handle: &mut SegyHandle) -> Result<[u8; BIN_HEADER_LEN], SegyError> {
    let mut buf = [0u8; BIN_HEADER_LEN];
    handle.read_at(TEXT_HEADER_LEN as u64, &mut buf)?;
    Ok(buf)
}

/// Writes the 400-byte binary header.
pub fn write_bin_header(handle: &mut SegyHandle, header: &[u8; BIN_HEADER_LEN]) -> Result<(), SegyError> {
    handle.write_at(TEXT_HEADER_LEN as u64, header)
}

/// Reads one field out of the binary header without materializing the whole 400-byte buffer.
/// `offset` is the SEG-Y-spec file offset (3201..3600), matching [`segy_core::get_field`].
pub fn read_bin_field(handle: &mut SegyHandle, offset: u16) -> Result<i32, SegyError> {
    let header = read_bin_header(handle)?;
    get_field(&header, true, offset)
}

/// Writes one field into the binary header, leaving the rest of it untouched.
pub fn write_bin_field(handle: &mut SegyHandle, offset: u16, value: i32) -> Result<(), SegyError> {
    let mut header = read_bin_header(handle)?;
    set_field(&mut header, true, offset, value)?;
    write_bin_header(handle, &header)
}

/// Computes `trace0`, the file offset of the first trace: past the mandatory textual header, the
/// binary header, and `ext_header_count` extended textual headers.
pub fn trace0(ext_header_count: u16) -> u64 {
    (TEXT_HEADER_LEN + BIN_HEADER_LEN) as u64 + (ext_header_count as u64) * TEXT_HEADER_LEN as u64
}

/// Total on-disk size of one trace: its 240-byte header plus its sample body.
pub fn trace0_step(trace_bsize: u64) -> u64 {
    TRACE_HEADER_LEN as u64 + trace_bsize
}

/// Byte offset of trace `index`'s header (0-based), given `trace0` and the per-trace byte size
/// (240-byte header plus sample body).
pub fn trace_offset(trace0: u64, trace_bsize: u64, index: u64) -> u64 {
    trace0 + index * trace0_step(trace_bsize)
}

/// Reads trace `index`'s 240-byte header.
pub fn read_trace_header(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    index: u64,
) -> Result<[u8; TRACE_HEADER_LEN], SegyError> {
    let mut buf = [0u8; TRACE_HEADER_LEN];
    handle.read_at(trace_offset(trace0, trace_bsize, index), &mut buf)?;
    Ok(buf)
}

/// Writes trace `index`'s 240-byte header.
pub fn write_trace_header(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    index: u64,
    header: &[u8; TRACE_HEADER_LEN],
) -> Result<(), SegyError> {
    handle.write_at(trace_offset(trace0, trace_bsize, index), header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace0_accounts_for_extended_headers() {
        assert_eq!(trace0(0), 3600);
        assert_eq!(trace0(2), 3600 + 2 * 3200);
    }

    #[test]
    fn trace_offset_steps_by_full_trace_size() {
        let t0 = trace0(0);
        assert_eq!(trace_offset(t0, 200, 0), t0);
        assert_eq!(trace_offset(t0, 200, 1), t0 + 440);
        assert_eq!(trace_offset(t0, 200, 2), t0 + 880);
    }
}
