//! The I/O substrate: parses POSIX `fopen`-style mode strings and opens either a buffered file
//! descriptor or a memory map behind it. Selection between the two addressing strategies happens
//! at `open()` time (a runtime argument), not behind a Cargo feature flag — see [`MapMode`].
use std::fs::{File, OpenOptions};

use memmap2::{Mmap, MmapMut, MmapOptions};
use segy_core::errors::SegyError;

/// How a file handle should address its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    /// Always use buffered seek + read/write.
    Sequential,
    /// Always memory-map; `open` fails if mapping is not possible.
    Mapped,
    /// Try to memory-map; fall back to sequential I/O if mapping fails (e.g. a zero-length file,
    /// or a filesystem that does not support `mmap`).
    Auto,
}

/// How a flush should behave. Only [`FlushMode::Async`] is meaningfully different from
/// [`FlushMode::Sync`] — it only applies when the handle is memory-mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushMode {
    /// Complete before returning.
    Sync,
    /// Schedule the flush and return; only meaningful for a mapped handle.
    Async,
}

/// A parsed POSIX `fopen`-style mode string (`"rb"`, `"r+b"`, `"w+b"`, ...).
///
/// The core only inspects the string to decide whether write permission (and, for a mapping,
/// write-capable mapping) should be requested: any mode containing `+` or `w`.
#[derive(Debug, Clone)]
pub struct OpenMode {
    raw: String,
    write: bool,
    create: bool,
}

impl OpenMode {
    pub fn parse(mode: &str) -> Result<Self, SegyError> {
        if mode.is_empty() {
            return Err(SegyError::InvalidArgs { msg: "empty mode string".to_string() });
        }
        let write = mode.contains('+') || mode.contains('w');
        let create = mode.starts_with('w');
        Ok(Self { raw: mode.to_string(), write, create })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_write(&self) -> bool {
        self.write
    }
}

pub(crate) fn open_file(path: &str, mode: &OpenMode) -> Result<File, SegyError> {
    let mut opts = OpenOptions::new();
    if mode.write {
        opts.read(true).write(true);
        if mode.create {
            opts.create(true).truncate(true);
        }
    } else {
        opts.read(true);
    }
    opts.open(path).map_err(SegyError::Open)
}

/// A memory map, either mutable (write-capable handles) or read-only.
pub(crate) enum Mapping {
    ReadOnly(Mmap),
    ReadWrite(MmapMut),
}

impl Mapping {
    pub(crate) fn len(&self) -> usize {
        match self {
            Mapping::ReadOnly(m) => m.len(),
            Mapping::ReadWrite(m) => m.len(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Mapping::ReadOnly(m) => m,
            Mapping::ReadWrite(m) => m,
        }
    }

    pub(crate) fn flush(&self) -> Result<(), SegyError> {
        match self {
            Mapping::ReadOnly(_) => Ok(()),
            Mapping::ReadWrite(m) => m.flush().map_err(SegyError::Mmap),
        }
    }

    pub(crate) fn flush_async(&self) -> Result<(), SegyError> {
        match self {
            Mapping::ReadOnly(_) => Ok(()),
            Mapping::ReadWrite(m) => m.flush_async().map_err(SegyError::Mmap),
        }
    }
}

pub(crate) fn map_file(file: &File, mode: &OpenMode) -> Result<Mapping, SegyError> {
    if mode.write {
        let mmap = unsafe { MmapOptions::new().map_mut(file) }.map_err(SegyError::Mmap)?;
        Ok(Mapping::ReadWrite(mmap))
    } else {
        let mmap = unsafe { MmapOptions::new().map(file) }.map_err(SegyError::Mmap)?;
        Ok(Mapping::ReadOnly(mmap))
    }
}
