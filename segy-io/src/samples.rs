//! The sample converter: translates a trace's on-disk sample body to and from `f32`, and
//! reconciles the sample interval and samples-per-trace declared in the binary header against the
//! (optional) per-trace override in the trace header.
use segy_core::ebcdic::{read_i16be, read_u32be, write_u32be};
use segy_core::errors::SegyError;
use segy_core::{ibmfloat, SampleFormatCode};

/// Number of bytes one sample occupies for the two convertible formats (the only ones this
/// converter round-trips; see [`SampleFormatCode::is_convertible`]).
pub const SAMPLE_BYTES: usize = 4;

/// Decodes `n` samples from a raw trace body into `f32`, in the given on-disk format.
pub fn decode_samples(body: &[u8], format: SampleFormatCode, n: usize) -> Result<Vec<f32>, SegyError> {
    if !format.is_convertible() {
        return Err(SegyError::UnsupportedFormat { format });
    }
    if body.len() != n * SAMPLE_BYTES {
        return Err(SegyError::SampleLengthMismatch { expected: n * SAMPLE_BYTES, got: body.len() });
    }
    let mut out = Vec::with_capacity(n);
    for chunk in body.chunks_exact(SAMPLE_BYTES) {
        let bits = read_u32be(chunk, 0);
        out.push(match format {
            SampleFormatCode::IbmFloat32 => ibmfloat::ibm_to_ieee(bits),
            SampleFormatCode::Float32 => f32::from_bits(bits),
            _ => unreachable!("checked by is_convertible above"),
        });
    }
    Ok(out)
}

/// Encodes `samples` into a raw trace body in the given on-disk format, in place into `body`.
pub fn encode_samples(body: &mut [u8], format: SampleFormatCode, samples: &[f32]) -> Result<(), SegyError> {
    if !format.is_convertible() {
        return Err(SegyError::UnsupportedFormat { format });
    }
    if body.len() != samples.len() * SAMPLE_BYTES {
        return Err(SegyError::SampleLengthMismatch {
            expected: samples.len() * SAMPLE_BYTES,
            got: body.len(),
        });
    }
    for (chunk, &value) in body.chunks_exact_mut(SAMPLE_BYTES).zip(samples) {
        let bits = match format {
            SampleFormatCode::IbmFloat32 => ibmfloat::ieee_to_ibm(value),
            SampleFormatCode::Float32 => value.to_bits(),
            _ => unreachable!("checked by is_convertible above"),
        };
        write_u32be(chunk, 0, bits);
    }
    Ok(())
}

/// Reconciles the binary header's sample interval (microseconds) against a trace header's own
/// field (bytes 117-118), which some writers leave at zero meaning "use the binary header's
/// value" and others set explicitly. Zero on either side defers to the other; nonzero-nonzero
/// disagreement is an error rather than a silent pick.
pub fn reconcile_sample_interval(binary: u16, trace: u16) -> Result<u16, SegyError> {
    match (binary, trace) {
        (0, 0) => Err(SegyError::SampleIntervalMismatch { binary, trace }),
        (b, 0) => Ok(b),
        (0, t) => Ok(t),
        (b, t) if b == t => Ok(b),
        (b, t) => Err(SegyError::SampleIntervalMismatch { binary: b, trace: t }),
    }
}

/// Reads the trace header's own sample-interval override (bytes 117-118, signed per the field
/// schema but meaningful only as an unsigned microsecond count).
pub fn trace_sample_interval(trace_header: &[u8]) -> u16 {
    read_i16be(trace_header, 116) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ibm_round_trips_through_encode_decode() {
        let samples = vec![1.5f32, -2.25, 0.0, 100.0];
        let mut body = vec![0u8; samples.len() * SAMPLE_BYTES];
        encode_samples(&mut body, SampleFormatCode::IbmFloat32, &samples).unwrap();
        let back = decode_samples(&body, SampleFormatCode::IbmFloat32, samples.len()).unwrap();
        for (a, b) in samples.iter().zip(back.iter()) {
            assert!((a - b).abs() <= a.abs().max(1.0) * 2f32.powi(-20));
        }
    }

    #[test]
    fn ieee_round_trips_exactly() {
        let samples = vec![1.5f32, -2.25, 0.0, 100.0];
        let mut body = vec![0u8; samples.len() * SAMPLE_BYTES];
        encode_samples(&mut body, SampleFormatCode::Float32, &samples).unwrap();
        let back = decode_samples(&body, SampleFormatCode::Float32, samples.len()).unwrap();
        assert_eq!(samples, back);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let body = vec![0u8; 3];
        assert!(matches!(
            decode_samples(&body, SampleFormatCode::Float32, 1),
            Err(SegyError::SampleLengthMismatch { .. })
        ));
    }

    #[test]
    fn unsupported_format_is_an_error() {
        let body = vec![0u8; 4];
        assert!(matches!(
            decode_samples(&body, SampleFormatCode::Int32, 1),
            Err(SegyError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn sample_interval_reconciliation() {
        assert_eq!(reconcile_sample_interval(4000, 0).unwrap(), 4000);
        assert_eq!(reconcile_sample_interval(0, 4000).unwrap(), 4000);
        assert_eq!(reconcile_sample_interval(4000, 4000).unwrap(), 4000);
        assert!(reconcile_sample_interval(0, 0).is_err());
        assert!(reconcile_sample_interval(4000, 2000).is_err());
    }
}
