//! Random-access read/write of SEG-Y files built on `segy-core`'s codecs and schema: a file
//! handle over buffered or memory-mapped I/O, a header façade, a sample converter, a geometry
//! analyzer, and trace/line accessors, unified behind [`file::SegyFile`].
pub mod accessors;
pub mod file;
pub mod geometry;
pub mod handle;
pub mod headers;
pub mod io;
pub mod samples;

pub use accessors::Trace;
pub use file::SegyFile;
pub use geometry::{CubeGeometry, GeometryFields, LineAxis};
pub use handle::SegyHandle;
pub use io::{FlushMode, MapMode};
