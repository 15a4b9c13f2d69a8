//! Trace and line accessors: combine the header façade, the sample converter and the geometry
//! analyzer's stride computations into whole-trace and whole-line read/write operations.
use segy_core::errors::SegyError;
use segy_core::{SampleFormatCode, TRACE_HEADER_LEN};

use crate::geometry::{CubeGeometry, LineAxis};
use crate::handle::SegyHandle;
use crate::headers::{read_trace_header, trace_offset, write_trace_header};
use crate::samples::{decode_samples, encode_samples, SAMPLE_BYTES};

/// One trace: its 240-byte header plus its decoded samples.
#[derive(Debug, Clone)]
pub struct Trace {
    pub header: [u8; TRACE_HEADER_LEN],
    pub samples: Vec<f32>,
}

/// Reads trace `index`'s header only.
pub fn read_header(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    index: u64,
) -> Result<[u8; TRACE_HEADER_LEN], SegyError> {
    read_trace_header(handle, trace0, trace_bsize, index)
}

/// Reads trace `index`'s sample body, decoding it from `format` into `f32`.
pub fn read_body(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    index: u64,
    format: SampleFormatCode,
    samples_per_trace: usize,
) -> Result<Vec<f32>, SegyError> {
    let mut body = vec![0u8; trace_bsize as usize];
    let pos = trace_offset(trace0, trace_bsize, index) + TRACE_HEADER_LEN as u64;
    handle.read_at(pos, &mut body)?;
    decode_samples(&body, format, samples_per_trace)
}

/// Reads trace `index`'s header and body together.
pub fn read_trace(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    index: u64,
    format: SampleFormatCode,
    samples_per_trace: usize,
) -> Result<Trace, SegyError> {
    let header = read_header(handle, trace0, trace_bsize, index)?;
    let samples = read_body(handle, trace0, trace_bsize, index, format, samples_per_trace)?;
    Ok(Trace { header, samples })
}

/// Writes trace `index`'s sample body, encoding from `f32` into `format`.
pub fn write_body(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    index: u64,
    format: SampleFormatCode,
    samples: &[f32],
) -> Result<(), SegyError> {
    if samples.len() * SAMPLE_BYTES != trace_bsize as usize {
        return Err(SegyError::SampleLengthMismatch {
            expected: trace_bsize as usize / SAMPLE_BYTES,
            got: samples.len(),
        });
    }
    let mut body = vec![0u8; trace_bsize as usize];
    encode_samples(&mut body, format, samples)?;
    let pos = trace_offset(trace0, trace_bsize, index) + TRACE_HEADER_LEN as u64;
    handle.write_at(pos, &body)
}

/// Writes trace `index`'s header and body together.
pub fn write_trace(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    index: u64,
    format: SampleFormatCode,
    trace: &Trace,
) -> Result<(), SegyError> {
    write_trace_header(handle, trace0, trace_bsize, index, &trace.header)?;
    write_body(handle, trace0, trace_bsize, index, format, &trace.samples)
}

/// Reads a whole line (inline or crossline) at offset index 0, concatenating each trace's samples
/// in line order.
pub fn read_line(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    geometry: &CubeGeometry,
    axis: LineAxis,
    line_number: i32,
    format: SampleFormatCode,
    samples_per_trace: usize,
) -> Result<Vec<f32>, SegyError> {
    let start = geometry.line_start_trace(axis, line_number)?;
    let stride = geometry.line_stride(axis);
    let length = geometry.line_length(axis);
    let mut out = Vec::with_capacity(length as usize * samples_per_trace);
    for step in 0..length {
        let index = start + step * stride;
        out.extend(read_body(handle, trace0, trace_bsize, index, format, samples_per_trace)?);
    }
    Ok(out)
}

/// Writes a whole line; `samples` must be exactly `line_length * samples_per_trace` long.
pub fn write_line(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    geometry: &CubeGeometry,
    axis: LineAxis,
    line_number: i32,
    format: SampleFormatCode,
    samples_per_trace: usize,
    samples: &[f32],
) -> Result<(), SegyError> {
    let start = geometry.line_start_trace(axis, line_number)?;
    let stride = geometry.line_stride(axis);
    let length = geometry.line_length(axis);
    if samples.len() != length as usize * samples_per_trace {
        return Err(SegyError::SampleLengthMismatch {
            expected: length as usize * samples_per_trace,
            got: samples.len(),
        });
    }
    for (step, chunk) in samples.chunks_exact(samples_per_trace).enumerate() {
        let index = start + step as u64 * stride;
        write_body(handle, trace0, trace_bsize, index, format, chunk)?;
    }
    Ok(())
}
