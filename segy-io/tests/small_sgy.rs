// Copyright (C) 2022 by GiGa infosystems.
//! End-to-end exercise against a seeded 25-trace, 50-sample, 5x5x1 cube (`small.sgy`'s shape,
//! built fresh per test through this crate's own writer API rather than checked-in binary data).
use segy_core::{SampleFormatCode, Sorting};
use segy_io::geometry::{GeometryFields, LineAxis};
use segy_io::{MapMode, SegyFile, Trace};

const SAMPLES_PER_TRACE: usize = 50;
const SAMPLE_INTERVAL_US: i32 = 4000;

fn trace_base_value(index: u64) -> f32 {
    match index {
        0 => 1.2,
        6 => 2.21,
        _ => 10.0 + index as f32,
    }
}

fn trace_samples(index: u64) -> Vec<f32> {
    (0..SAMPLES_PER_TRACE).map(|k| trace_base_value(index) + k as f32 * 1e-5).collect()
}

fn build_small_cube(path: &str) {
    {
        std::fs::File::create(path).unwrap();
    }
    let mut file = SegyFile::open(path, "w+b", MapMode::Sequential).unwrap();

    file.write_text_header(b"synthetic small cube").unwrap();

    let mut bin = [0u8; segy_core::BIN_HEADER_LEN];
    segy_core::set_field(&mut bin, true, 3217, SAMPLE_INTERVAL_US).unwrap();
    segy_core::set_field(&mut bin, true, 3221, SAMPLES_PER_TRACE as i32).unwrap();
    segy_core::set_field(&mut bin, true, 3225, SampleFormatCode::Float32 as i32).unwrap();
    segy_core::set_field(&mut bin, true, 3505, 0).unwrap();
    file.write_bin_header(&bin).unwrap();
    file.refresh().unwrap();

    let mut index = 0u64;
    for il in 1..=5i32 {
        for xl in 20..=24i32 {
            let mut header = [0u8; segy_core::TRACE_HEADER_LEN];
            segy_core::set_field(&mut header, false, 189, il).unwrap();
            segy_core::set_field(&mut header, false, 193, xl).unwrap();
            segy_core::set_field(&mut header, false, 37, 0).unwrap();
            let trace = Trace { header, samples: trace_samples(index) };
            file.write_trace(index, &trace).unwrap();
            index += 1;
        }
    }
    file.flush().unwrap();
}

#[test]
fn read_trace_0() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.sgy");
    build_small_cube(path.to_str().unwrap());

    let mut file = SegyFile::open(path.to_str().unwrap(), "rb", MapMode::Sequential).unwrap();
    let trace = file.read_trace(0).unwrap();
    let expected = trace_samples(0);
    for (a, b) in trace.samples.iter().zip(expected.iter()) {
        assert!((a - b).abs() <= f32::EPSILON * b.abs().max(1.0));
    }
}

#[test]
fn read_trace_6_as_float() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.sgy");
    build_small_cube(path.to_str().unwrap());

    let mut file = SegyFile::open(path.to_str().unwrap(), "rb", MapMode::Sequential).unwrap();
    let trace = file.read_trace(6).unwrap();
    let expected = trace_samples(6);
    for (a, b) in trace.samples.iter().zip(expected.iter()) {
        assert!((a - b).abs() <= f32::EPSILON * b.abs().max(1.0));
    }
}

#[test]
fn geometry_on_small_cube() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.sgy");
    build_small_cube(path.to_str().unwrap());

    let mut file = SegyFile::open(path.to_str().unwrap(), "rb", MapMode::Sequential).unwrap();
    let geometry = file.geometry().unwrap();
    assert_eq!(geometry.sorting, Sorting::InlineSorted);
    assert_eq!(geometry.offsets, 1);
    assert_eq!(geometry.inline_count, 5);
    assert_eq!(geometry.crossline_count, 5);
    assert_eq!(geometry.inline_indices, vec![1, 2, 3, 4, 5]);
    assert_eq!(geometry.crossline_indices, vec![20, 21, 22, 23, 24]);
}

#[test]
fn read_inline_1_matches_individual_traces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.sgy");
    build_small_cube(path.to_str().unwrap());

    let mut file = SegyFile::open(path.to_str().unwrap(), "rb", MapMode::Sequential).unwrap();
    let geometry = file.geometry().unwrap();
    let line = file.read_line(&geometry, LineAxis::Inline, 1).unwrap();
    assert_eq!(line.len(), 5 * SAMPLES_PER_TRACE);

    let mut expected = Vec::new();
    for idx in 0..5u64 {
        expected.extend(file.read_trace(idx).unwrap().samples);
    }
    assert_eq!(line, expected);
}

#[test]
fn read_crossline_20_matches_individual_traces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.sgy");
    build_small_cube(path.to_str().unwrap());

    let mut file = SegyFile::open(path.to_str().unwrap(), "rb", MapMode::Sequential).unwrap();
    let geometry = file.geometry().unwrap();
    let line = file.read_line(&geometry, LineAxis::Crossline, 20).unwrap();

    let mut expected = Vec::new();
    for idx in [0u64, 5, 10, 15, 20] {
        expected.extend(file.read_trace(idx).unwrap().samples);
    }
    assert_eq!(line, expected);
}

#[test]
fn write_trace_0_with_zeros_then_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.sgy");
    build_small_cube(path.to_str().unwrap());

    let mut file = SegyFile::open(path.to_str().unwrap(), "r+b", MapMode::Sequential).unwrap();
    let mut trace = file.read_trace(0).unwrap();
    trace.samples = vec![0.0; SAMPLES_PER_TRACE];
    file.write_trace(0, &trace).unwrap();
    file.flush().unwrap();

    let back = file.read_trace(0).unwrap();
    assert_eq!(back.samples, vec![0.0; SAMPLES_PER_TRACE]);

    let other = file.read_trace(1).unwrap();
    assert_eq!(other.samples, trace_samples(1));
}

#[test]
fn write_trace_with_wrong_sample_count_fails_and_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.sgy");
    build_small_cube(path.to_str().unwrap());

    let mut file = SegyFile::open(path.to_str().unwrap(), "r+b", MapMode::Sequential).unwrap();
    let mut trace = file.read_trace(0).unwrap();
    trace.samples = vec![0.0; SAMPLES_PER_TRACE - 1];
    assert!(file.write_trace(0, &trace).is_err());

    let unchanged = file.read_trace(0).unwrap();
    assert_eq!(unchanged.samples, trace_samples(0));
}
