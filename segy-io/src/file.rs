//! `SegyFile`: the façade most callers use. Opens a handle, reads the binary header once to
//! derive `trace0`/`trace_bsize`/sample format, and offers header, sample and geometry operations
//! in terms of trace indices rather than raw byte offsets.
//!
//! Geometry is never cached here automatically (an invariant carried over unchanged from the
//! handle layer) — [`SegyFile::geometry`] re-derives it from the headers on every call. The
//! optional trace-lookup cache in [`SegyFile::build_trace_index`] is a distinct, explicitly
//! opt-in structure that a caller builds once it has already paid for a geometry pass and wants
//! repeated `(inline, crossline, offset)` lookups to skip re-scanning headers.
use fnv::FnvHashMap;

use segy_core::errors::SegyError;
use segy_core::{SampleFormatCode, BIN_HEADER_LEN};

use crate::accessors::{self, Trace};
use crate::geometry::{self, CubeGeometry, GeometryFields, LineAxis};
use crate::handle::SegyHandle;
use crate::headers::{self, trace0 as compute_trace0};
use crate::io::MapMode;
use crate::samples::{reconcile_sample_interval, trace_sample_interval, SAMPLE_BYTES};

/// Binary-header-derived facts needed to address traces; re-read from disk on [`SegyFile::open`]
/// and whenever [`SegyFile::refresh`] is called after a binary-header edit.
#[derive(Debug, Clone, Copy)]
struct Layout {
    trace0: u64,
    trace_bsize: u64,
    samples_per_trace: usize,
    format: SampleFormatCode,
    sample_interval_us: u16,
}

pub struct SegyFile {
    handle: SegyHandle,
    layout: Layout,
    geometry_fields: GeometryFields,
    trace_index: Option<FnvHashMap<(i32, i32, i32), u64>>,
}

impl SegyFile {
    /// Opens `path` and derives the trace layout from its binary header.
    pub fn open(path: &str, mode: &str, map_mode: MapMode) -> Result<Self, SegyError> {
        let mut handle = SegyHandle::open(path, mode, map_mode)?;
        let layout = Self::read_layout(&mut handle)?;
        Ok(Self { handle, layout, geometry_fields: GeometryFields::default(), trace_index: None })
    }

    fn read_layout(handle: &mut SegyHandle) -> Result<Layout, SegyError> {
        let bin = headers::read_bin_header(handle)?;
        let ext_header_count = segy_core::get_field(&bin, true, 3505)? as u16;
        let samples_per_trace = segy_core::get_field(&bin, true, 3221)? as usize;
        let format = SampleFormatCode::new(segy_core::get_field(&bin, true, 3225)? as u16)?;
        let sample_interval_us = segy_core::get_field(&bin, true, 3217)? as u16;
        let trace0 = compute_trace0(ext_header_count);
        let trace_bsize = (samples_per_trace * SAMPLE_BYTES) as u64;
        Ok(Layout { trace0, trace_bsize, samples_per_trace, format, sample_interval_us })
    }

    /// Re-derives the trace layout from the binary header. Call after writing a new binary
    /// header (e.g. a changed sample format or trace count) through [`SegyFile::write_bin_header`].
    pub fn refresh(&mut self) -> Result<(), SegyError> {
        self.layout = Self::read_layout(&mut self.handle)?;
        self.trace_index = None;
        Ok(())
    }

    /// Overrides the trace-header fields the geometry analyzer reads for inline/crossline/offset.
    pub fn set_geometry_fields(&mut self, fields: GeometryFields) {
        self.geometry_fields = fields;
        self.trace_index = None;
    }

    pub fn trace0(&self) -> u64 {
        self.layout.trace0
    }

    pub fn trace_bsize(&self) -> u64 {
        self.layout.trace_bsize
    }

    pub fn samples_per_trace(&self) -> usize {
        self.layout.samples_per_trace
    }

    pub fn sample_format(&self) -> SampleFormatCode {
        self.layout.format
    }

    pub fn trace_count(&self) -> Result<u64, SegyError> {
        let file_size = self.handle.file_size()?;
        geometry::trace_count(file_size, self.layout.trace0, self.layout.trace_bsize)
    }

    pub fn read_text_header(&mut self) -> Result<Vec<u8>, SegyError> {
        headers::read_text_header(&mut self.handle)
    }

    pub fn write_text_header(&mut self, text: &[u8]) -> Result<(), SegyError> {
        headers::write_text_header(&mut self.handle, text)
    }

    pub fn read_extended_text_header(&mut self, n: usize) -> Result<Vec<u8>, SegyError> {
        headers::read_extended_text_header(&mut self.handle, n)
    }

    pub fn write_extended_text_header(&mut self, n: usize, text: &[u8]) -> Result<(), SegyError> {
        headers::write_extended_text_header(&mut self.handle, n, text)
    }

    pub fn read_bin_header(&mut self) -> Result<[u8; BIN_HEADER_LEN], SegyError> {
        headers::read_bin_header(&mut self.handle)
    }

    pub fn write_bin_header(&mut self, header: &[u8; BIN_HEADER_LEN]) -> Result<(), SegyError> {
        headers::write_bin_header(&mut self.handle, header)
    }

    /// Reconciles the binary header's sample interval against trace `index`'s own override field.
    pub fn sample_interval(&mut self, index: u64) -> Result<u16, SegyError> {
        let header = self.read_trace_header(index)?;
        reconcile_sample_interval(self.layout.sample_interval_us, trace_sample_interval(&header))
    }

    pub fn read_trace_header(&mut self, index: u64) -> Result<[u8; segy_core::TRACE_HEADER_LEN], SegyError> {
        accessors::read_header(&mut self.handle, self.layout.trace0, self.layout.trace_bsize, index)
    }

    pub fn read_trace(&mut self, index: u64) -> Result<Trace, SegyError> {
        accessors::read_trace(
            &mut self.handle,
            self.layout.trace0,
            self.layout.trace_bsize,
            index,
            self.layout.format,
            self.layout.samples_per_trace,
        )
    }

    pub fn write_trace(&mut self, index: u64, trace: &Trace) -> Result<(), SegyError> {
        accessors::write_trace(
            &mut self.handle,
            self.layout.trace0,
            self.layout.trace_bsize,
            index,
            self.layout.format,
            trace,
        )
    }

    /// Re-derives this file's cube geometry from its trace headers. Not cached: each call walks
    /// the headers afresh.
    pub fn geometry(&mut self) -> Result<CubeGeometry, SegyError> {
        geometry::analyze(&mut self.handle, self.layout.trace0, self.layout.trace_bsize, &self.geometry_fields)
    }

    pub fn read_line(
        &mut self,
        geometry: &CubeGeometry,
        axis: LineAxis,
        line_number: i32,
    ) -> Result<Vec<f32>, SegyError> {
        accessors::read_line(
            &mut self.handle,
            self.layout.trace0,
            self.layout.trace_bsize,
            geometry,
            axis,
            line_number,
            self.layout.format,
            self.layout.samples_per_trace,
        )
    }

    pub fn write_line(
        &mut self,
        geometry: &CubeGeometry,
        axis: LineAxis,
        line_number: i32,
        samples: &[f32],
    ) -> Result<(), SegyError> {
        accessors::write_line(
            &mut self.handle,
            self.layout.trace0,
            self.layout.trace_bsize,
            geometry,
            axis,
            line_number,
            self.layout.format,
            self.layout.samples_per_trace,
            samples,
        )
    }

    /// Builds a one-shot `(inline, crossline, offset) -> trace index` lookup table by scanning
    /// every trace header once. Distinct from the geometry analyzer's own bookkeeping: this is an
    /// opt-in convenience the caller pays for explicitly, not something `geometry()` maintains.
    pub fn build_trace_index(&mut self) -> Result<(), SegyError> {
        let n = self.trace_count()?;
        let mut map = FnvHashMap::with_capacity_and_hasher(n as usize, Default::default());
        for idx in 0..n {
            let header = self.read_trace_header(idx)?;
            let il = segy_core::get_field(&header, false, self.geometry_fields.inline)?;
            let xl = segy_core::get_field(&header, false, self.geometry_fields.crossline)?;
            let off = segy_core::get_field(&header, false, self.geometry_fields.offset)?;
            map.insert((il, xl, off), idx);
        }
        self.trace_index = Some(map);
        Ok(())
    }

    /// Looks up a trace index by `(inline, crossline, offset)`. Requires [`Self::build_trace_index`]
    /// to have been called first; returns `None` otherwise or if the key is absent.
    pub fn lookup_trace(&self, inline: i32, crossline: i32, offset: i32) -> Option<u64> {
        self.trace_index.as_ref()?.get(&(inline, crossline, offset)).copied()
    }

    pub fn flush(&mut self) -> Result<(), SegyError> {
        self.handle.flush(crate::io::FlushMode::Sync)
    }

    pub fn close(self) -> Result<(), SegyError> {
        self.handle.close()
    }
}
