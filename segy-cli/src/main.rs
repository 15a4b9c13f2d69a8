//! A thin example inspector: opens a SEG-Y file, deduces its cube geometry, and prints the
//! derived metrics. Not part of the core library surface — a demonstration of `segy-io`'s
//! public API, in the spirit of the format's "out of scope for the core" CLI mention.
use clap::Parser;
use log::info;

use segy_core::errors::SegyError;
use segy_io::geometry::GeometryFields;
use segy_io::{MapMode, SegyFile};

/// Prints the derived inline/crossline/offset geometry of a SEG-Y file.
#[derive(Debug, Parser)]
struct Args {
    /// Path to the SEG-Y file to inspect.
    file: String,
    /// Trace-header byte offset of the inline field (SEG-Y rev-1 default: 189).
    inline_byte: Option<u16>,
    /// Trace-header byte offset of the crossline field (SEG-Y rev-1 default: 193).
    crossline_byte: Option<u16>,
}

fn run(args: &Args) -> Result<(), SegyError> {
    let mut file = SegyFile::open(&args.file, "rb", MapMode::Auto)?;
    info!("opened '{}', trace0 = {}, trace_bsize = {}", args.file, file.trace0(), file.trace_bsize());

    if let (Some(il), Some(xl)) = (args.inline_byte, args.crossline_byte) {
        file.set_geometry_fields(GeometryFields { inline: il, crossline: xl, ..GeometryFields::default() });
    }

    let geometry = file.geometry()?;
    println!("trace_count:      {}", geometry.trace_count);
    println!("sorting:          {:?}", geometry.sorting);
    println!("offsets:          {}", geometry.offsets);
    println!("inline_count:     {}", geometry.inline_count);
    println!("crossline_count:  {}", geometry.crossline_count);
    println!("inline_indices:   {:?}", geometry.inline_indices);
    println!("crossline_indices:{:?}", geometry.crossline_indices);
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(e.error_code() as i32);
    }
}
