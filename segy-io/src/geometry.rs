//! The geometry analyzer: deduces how a file's traces are laid out as a 3-D
//! (inline x crossline x offset) cube purely from trace headers — sorting direction, offset
//! count, line counts, and the enumerated line-index sequences. Nothing here is cached on a file
//! handle; every call re-derives its result from the headers on disk.
use segy_core::errors::SegyError;
use segy_core::schema::get_field;
use segy_core::{Sorting, DEFAULT_CROSSLINE_FIELD, DEFAULT_INLINE_FIELD, DEFAULT_OFFSET_FIELD};

use crate::headers::{read_trace_header, trace_offset};
use crate::handle::SegyHandle;

/// Which trace-header fields carry the inline, crossline and offset values. Defaults to the
/// SEG-Y rev-1 convention (189/193/37); non-default conventions are supported by construction.
#[derive(Debug, Clone, Copy)]
pub struct GeometryFields {
    pub inline: u16,
    pub crossline: u16,
    pub offset: u16,
}

impl Default for GeometryFields {
    fn default() -> Self {
        Self { inline: DEFAULT_INLINE_FIELD, crossline: DEFAULT_CROSSLINE_FIELD, offset: DEFAULT_OFFSET_FIELD }
    }
}

/// Which of the two line axes a line-oriented operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAxis {
    Inline,
    Crossline,
}

/// The deduced shape and layout of a file's trace cube.
#[derive(Debug, Clone)]
pub struct CubeGeometry {
    pub trace_count: u64,
    pub sorting: Sorting,
    pub offsets: u64,
    pub inline_count: u64,
    pub crossline_count: u64,
    pub inline_indices: Vec<i32>,
    pub crossline_indices: Vec<i32>,
    pub offset_indices: Vec<i32>,
    /// Trace-index step between consecutive traces of a single inline line (fixed inline, walking
    /// crossline). Equal to the step used to enumerate `crossline_indices`.
    inline_line_stride: u64,
    /// Trace-index step between consecutive traces of a single crossline line (fixed crossline,
    /// walking inline). Equal to the step used to enumerate `inline_indices`.
    crossline_line_stride: u64,
}

/// Computes `trace_count` from the file size, `trace0`, and the per-trace byte size. Fails if the
/// remaining bytes are not a whole number of traces — a file-integrity violation, not a
/// recoverable condition.
pub fn trace_count(file_size: u64, trace0: u64, trace_bsize: u64) -> Result<u64, SegyError> {
    let stride = crate::headers::trace0_step(trace_bsize);
    let remaining = file_size.checked_sub(trace0).ok_or(SegyError::TraceSizeMismatch {
        file_size,
        trace0,
        trace_bsize,
    })?;
    if remaining % stride != 0 {
        return Err(SegyError::TraceSizeMismatch { file_size, trace0, trace_bsize });
    }
    Ok(remaining / stride)
}

fn il_xl_off(header: &[u8], fields: &GeometryFields) -> Result<(i32, i32, i32), SegyError> {
    Ok((
        get_field(header, false, fields.inline)?,
        get_field(header, false, fields.crossline)?,
        get_field(header, false, fields.offset)?,
    ))
}

fn read_header_at(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    index: u64,
) -> Result<[u8; segy_core::TRACE_HEADER_LEN], SegyError> {
    read_trace_header(handle, trace0, trace_bsize, index)
}

/// Deduces the sorting direction, offset count, line counts and index vectors for a file, given
/// its `trace0` and `trace_bsize` (both already derived from the binary header) and the
/// trace-header fields that carry inline/crossline/offset.
pub fn analyze(
    handle: &mut SegyHandle,
    trace0: u64,
    trace_bsize: u64,
    fields: &GeometryFields,
) -> Result<CubeGeometry, SegyError> {
    let file_size = handle.file_size()?;
    let n = trace_count(file_size, trace0, trace_bsize)?;
    if n == 0 {
        return Err(SegyError::InvalidArgs { msg: "file has no traces".to_string() });
    }

    let header0 = read_header_at(handle, trace0, trace_bsize, 0)?;
    let (il0, xl0, off0) = il_xl_off(&header0, fields)?;

    let last_index = n - 1;
    let (il_last, xl_last) = if last_index == 0 {
        (il0, xl0)
    } else {
        let header_last = read_header_at(handle, trace0, trace_bsize, last_index)?;
        let (il, xl, _) = il_xl_off(&header_last, fields)?;
        (il, xl)
    };

    // Trace 1's fields, for the tie-break checks below; distinct from the offset-count scan
    // further down, which walks from trace 0 looking for the first (il, xl) change.
    let (il1, xl1) = if n == 1 {
        (il0, xl0)
    } else {
        let header1 = read_header_at(handle, trace0, trace_bsize, 1)?;
        let (il, xl, _) = il_xl_off(&header1, fields)?;
        (il, xl)
    };

    let sorting = if il0 == il_last {
        Sorting::CrosslineSorted
    } else if xl0 == xl_last {
        Sorting::InlineSorted
    } else if il0 == il1 {
        Sorting::InlineSorted
    } else if xl0 == xl1 {
        Sorting::CrosslineSorted
    } else {
        return Err(SegyError::InvalidSorting);
    };

    let offsets = if n == 1 {
        1
    } else {
        let mut count = 1u64;
        for idx in 1..n {
            let header = read_header_at(handle, trace0, trace_bsize, idx)?;
            let (il, xl, _) = il_xl_off(&header, fields)?;
            if (il, xl) != (il0, xl0) {
                break;
            }
            count += 1;
        }
        count
    };

    let fast_field = match sorting {
        Sorting::InlineSorted => fields.crossline,
        Sorting::CrosslineSorted => fields.inline,
    };
    let fast0 = match sorting {
        Sorting::InlineSorted => xl0,
        Sorting::CrosslineSorted => il0,
    };

    let mut ortho_count = 0u64;
    let mut cursor = 0u64;
    loop {
        cursor += offsets;
        ortho_count += 1;
        if cursor >= n {
            break; // degenerate single-cell-along-this-axis file; accept what we have
        }
        let header = read_header_at(handle, trace0, trace_bsize, cursor)?;
        let fast = get_field(&header, false, fast_field)?;
        let (_, _, off) = il_xl_off(&header, fields)?;
        if fast == fast0 && off == off0 {
            break;
        }
    }

    let slow_count = n / (ortho_count * offsets).max(1);
    let (inline_count, crossline_count) = match sorting {
        Sorting::InlineSorted => (slow_count, ortho_count),
        Sorting::CrosslineSorted => (ortho_count, slow_count),
    };

    if inline_count * crossline_count * offsets != n {
        return Err(SegyError::GeometryMismatch {
            inline_count: inline_count as usize,
            crossline_count: crossline_count as usize,
            offsets: offsets as usize,
            trace_count: n as usize,
        });
    }

    let inline_step =
        if sorting == Sorting::InlineSorted { crossline_count * offsets } else { offsets };
    let crossline_step =
        if sorting == Sorting::InlineSorted { offsets } else { inline_count * offsets };

    let mut inline_indices = Vec::with_capacity(inline_count as usize);
    for step in 0..inline_count {
        let header = read_header_at(handle, trace0, trace_bsize, step * inline_step)?;
        inline_indices.push(get_field(&header, false, fields.inline)?);
    }

    let mut crossline_indices = Vec::with_capacity(crossline_count as usize);
    for step in 0..crossline_count {
        let header = read_header_at(handle, trace0, trace_bsize, step * crossline_step)?;
        crossline_indices.push(get_field(&header, false, fields.crossline)?);
    }

    let mut offset_indices = Vec::with_capacity(offsets as usize);
    for idx in 0..offsets {
        let header = read_header_at(handle, trace0, trace_bsize, idx)?;
        offset_indices.push(get_field(&header, false, fields.offset)?);
    }

    Ok(CubeGeometry {
        trace_count: n,
        sorting,
        offsets,
        inline_count,
        crossline_count,
        inline_indices,
        crossline_indices,
        offset_indices,
        inline_line_stride: crossline_step,
        crossline_line_stride: inline_step,
    })
}

impl CubeGeometry {
    /// The trace-index step between consecutive traces of one line along `axis`.
    pub fn line_stride(&self, axis: LineAxis) -> u64 {
        match axis {
            LineAxis::Inline => self.inline_line_stride,
            LineAxis::Crossline => self.crossline_line_stride,
        }
    }

    /// The number of traces in one line along `axis` (excluding the offset dimension).
    pub fn line_length(&self, axis: LineAxis) -> u64 {
        match axis {
            LineAxis::Inline => self.crossline_count,
            LineAxis::Crossline => self.inline_count,
        }
    }

    /// The trace number of the first sample (offset 0) of the requested line.
    pub fn line_start_trace(&self, axis: LineAxis, line_number: i32) -> Result<u64, SegyError> {
        let indices = match axis {
            LineAxis::Inline => &self.inline_indices,
            LineAxis::Crossline => &self.crossline_indices,
        };
        let position = indices
            .iter()
            .position(|&v| v == line_number)
            .ok_or(SegyError::MissingLineIndex { line: line_number })? as u64;

        let is_fast_axis = matches!(
            (axis, self.sorting),
            (LineAxis::Inline, Sorting::InlineSorted) | (LineAxis::Crossline, Sorting::CrosslineSorted)
        );
        let start_cells = if is_fast_axis { position * self.line_length(axis) } else { position };
        Ok(start_cells * self.offsets)
    }
}

/// The absolute trace offset for the first trace of a line starting at trace number
/// `line_start_trace`, given the geometry's byte layout parameters. A thin convenience over
/// [`trace_offset`] for callers that already have a trace number from [`CubeGeometry::line_start_trace`].
pub fn line_start_offset(trace0: u64, trace_bsize: u64, line_start_trace: u64) -> u64 {
    trace_offset(trace0, trace_bsize, line_start_trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MapMode;
    use segy_core::TRACE_HEADER_LEN;

    /// Writes a synthetic 5x5x1 inline-sorted cube (sample interval irrelevant here) and checks
    /// the deduced geometry against the worked example.
    fn build_small_cube(path: &std::path::Path) {
        use std::io::Write;
        let mut header_buf = [0u8; TRACE_HEADER_LEN];
        let mut file = std::fs::File::create(path).unwrap();
        for il in 1..=5i32 {
            for xl in 20..=24i32 {
                header_buf = [0u8; TRACE_HEADER_LEN];
                segy_core::schema::set_field(&mut header_buf, false, 189, il).unwrap();
                segy_core::schema::set_field(&mut header_buf, false, 193, xl).unwrap();
                segy_core::schema::set_field(&mut header_buf, false, 37, 0).unwrap();
                file.write_all(&header_buf).unwrap();
                file.write_all(&vec![0u8; 10 * 4]).unwrap(); // 10 samples, 4 bytes each
            }
        }
    }

    #[test]
    fn deduces_small_cube_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.bin");
        build_small_cube(&path);

        let mut handle = SegyHandle::open(path.to_str().unwrap(), "r+b", MapMode::Sequential).unwrap();
        let fields = GeometryFields::default();
        let geometry = analyze(&mut handle, 0, 40, &fields).unwrap();

        assert_eq!(geometry.trace_count, 25);
        assert_eq!(geometry.sorting, Sorting::InlineSorted);
        assert_eq!(geometry.offsets, 1);
        assert_eq!(geometry.inline_count, 5);
        assert_eq!(geometry.crossline_count, 5);
        assert_eq!(geometry.inline_indices, vec![1, 2, 3, 4, 5]);
        assert_eq!(geometry.crossline_indices, vec![20, 21, 22, 23, 24]);

        assert_eq!(geometry.line_start_trace(LineAxis::Inline, 1).unwrap(), 0);
        assert_eq!(geometry.line_start_trace(LineAxis::Crossline, 20).unwrap(), 0);
        assert_eq!(geometry.line_stride(LineAxis::Inline), 1);
        assert_eq!(geometry.line_stride(LineAxis::Crossline), 5);
    }

    #[test]
    fn missing_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.bin");
        build_small_cube(&path);

        let mut handle = SegyHandle::open(path.to_str().unwrap(), "r+b", MapMode::Sequential).unwrap();
        let geometry = analyze(&mut handle, 0, 40, &GeometryFields::default()).unwrap();
        assert!(matches!(
            geometry.line_start_trace(LineAxis::Inline, 99),
            Err(SegyError::MissingLineIndex { line: 99 })
        ));
    }
}
