//! The file handle: exactly one sequential-I/O handle (always valid, for sync/close) plus, when
//! memory mapping is active, a mapped region addressed directly instead of through seek+read.
use std::io::{Read, Seek, SeekFrom, Write};

use segy_core::errors::SegyError;

use crate::io::{map_file, open_file, FlushMode, MapMode, Mapping, OpenMode};

enum Address {
    Sequential,
    Mapped(Mapping),
}

/// An opened SEG-Y file. Exactly one of (mapped region present, sequential-only addressing)
/// holds for reads and writes; the underlying file descriptor is always kept for flush/close
/// regardless of which addressing strategy is active.
pub struct SegyHandle {
    file: std::fs::File,
    mode: OpenMode,
    address: Address,
}

impl SegyHandle {
    pub fn open(path: &str, mode: &str, map_mode: MapMode) -> Result<Self, SegyError> {
        let mode = OpenMode::parse(mode)?;
        let file = open_file(path, &mode)?;
        let address = match map_mode {
            MapMode::Sequential => Address::Sequential,
            MapMode::Mapped => Address::Mapped(map_file(&file, &mode)?),
            MapMode::Auto => match map_file(&file, &mode) {
                Ok(mapping) => Address::Mapped(mapping),
                Err(_) => Address::Sequential,
            },
        };
        Ok(Self { file, mode, address })
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self.address, Address::Mapped(_))
    }

    pub fn is_writable(&self) -> bool {
        self.mode.is_write()
    }

    /// Current file size, independent of the addressing strategy in use.
    pub fn file_size(&self) -> Result<u64, SegyError> {
        self.file.metadata().map(|m| m.len()).map_err(SegyError::Read)
    }

    /// Seeks the sequential handle to an absolute position. A 64-bit offset is used unconditionally
    /// (see the Open Questions note on the 32-bit seek fallback); `std::fs::File`'s `Seek`
    /// implementation is 64-bit on every target this crate supports.
    fn seek_absolute(&mut self, pos: u64) -> Result<(), SegyError> {
        self.file.seek(SeekFrom::Start(pos)).map(|_| ()).map_err(SegyError::Seek)
    }

    /// Reads `buf.len()` bytes starting at `pos`.
    pub fn read_at(&mut self, pos: u64, buf: &mut [u8]) -> Result<(), SegyError> {
        match &self.address {
            Address::Mapped(mapping) => {
                let start = pos as usize;
                let end = start.checked_add(buf.len()).ok_or(SegyError::MmapInvalid)?;
                if end > mapping.len() {
                    return Err(SegyError::MmapInvalid);
                }
                buf.copy_from_slice(&mapping.as_slice()[start..end]);
                Ok(())
            }
            Address::Sequential => {
                self.seek_absolute(pos)?;
                self.file.read_exact(buf).map_err(SegyError::Read)
            }
        }
    }

    /// Writes `buf` starting at `pos`.
    pub fn write_at(&mut self, pos: u64, buf: &[u8]) -> Result<(), SegyError> {
        match &mut self.address {
            Address::Mapped(Mapping::ReadWrite(mmap)) => {
                let start = pos as usize;
                let end = start.checked_add(buf.len()).ok_or(SegyError::MmapInvalid)?;
                if end > mmap.len() {
                    return Err(SegyError::MmapInvalid);
                }
                mmap[start..end].copy_from_slice(buf);
                Ok(())
            }
            Address::Mapped(Mapping::ReadOnly(_)) => Err(SegyError::InvalidArgs {
                msg: "handle was not opened for writing".to_string(),
            }),
            Address::Sequential => {
                self.seek_absolute(pos)?;
                self.file.write_all(buf).map_err(SegyError::Write)
            }
        }
    }

    /// Flushes pending writes. For a mapped handle, [`FlushMode::Sync`] blocks until the mapping
    /// is written back; [`FlushMode::Async`] only schedules it. For a sequential handle both modes
    /// are synchronous (there is nothing to schedule).
    pub fn flush(&mut self, mode: FlushMode) -> Result<(), SegyError> {
        match (&self.address, mode) {
            (Address::Mapped(mapping), FlushMode::Sync) => mapping.flush(),
            (Address::Mapped(mapping), FlushMode::Async) => mapping.flush_async(),
            (Address::Sequential, _) => self.file.flush().map_err(SegyError::Write),
        }
    }

    /// Flushes, then releases the mapping (if any) and the file descriptor. Idempotent: calling
    /// `close` twice in a row is safe because flush on an already-flushed handle is a no-op.
    ///
    /// Returns the first non-OK status from flush; unmapping and closing the descriptor happen
    /// through `Drop` once this method returns and, per `std::fs::File`'s own contract, their
    /// errors (if any) are not observable here.
    pub fn close(mut self) -> Result<(), SegyError> {
        self.flush(FlushMode::Sync)
    }
}
