//! EBCDIC (IBM code page 037) <-> ASCII transcoding, and big-endian integer field helpers.
//!
//! The textual header is stored on disk in EBCDIC because that is what the format's originating
//! mainframe producers wrote; everything else in this core works in ASCII. The two 256-entry
//! tables below encode that historical mapping bit-for-bit; `ASCII_TO_EBCDIC` is derived from
//! `EBCDIC_TO_ASCII` at compile time rather than transcribed by hand a second time, since the two
//! must be exact inverses of one another for the round-trip property in the testable-properties
//! list to hold.

/// EBCDIC (code page 037) -> ASCII, indexed by the EBCDIC byte.
#[rustfmt::skip]
pub const EBCDIC_TO_ASCII: [u8; 256] = [
    0x00, 0x01, 0x02, 0x03, 0x9C, 0x09, 0x86, 0x7F, 0x97, 0x8D, 0x8E, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
    0x10, 0x11, 0x12, 0x13, 0x9D, 0x85, 0x08, 0x87, 0x18, 0x19, 0x92, 0x8F, 0x1C, 0x1D, 0x1E, 0x1F,
    0x80, 0x81, 0x82, 0x83, 0x84, 0x0A, 0x17, 0x1B, 0x88, 0x89, 0x8A, 0x8B, 0x8C, 0x05, 0x06, 0x07,
    0x90, 0x91, 0x16, 0x93, 0x94, 0x95, 0x96, 0x04, 0x98, 0x99, 0x9A, 0x9B, 0x14, 0x15, 0x9E, 0x1A,
    0x20, 0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0x5B, 0x2E, 0x3C, 0x28, 0x2B, 0x21,
    0x26, 0xA9, 0xAA, 0xAB, 0xAC, 0xAD, 0xAE, 0xAF, 0xB0, 0xB1, 0x5D, 0x24, 0x2A, 0x29, 0x3B, 0x5E,
    0x2D, 0x2F, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0x7C, 0x2C, 0x25, 0x5F, 0x3E, 0x3F,
    0xBA, 0xBB, 0xBC, 0xBD, 0xBE, 0xBF, 0xC0, 0xC1, 0xC2, 0x60, 0x3A, 0x23, 0x40, 0x27, 0x3D, 0x22,
    0xC3, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9,
    0xCA, 0x6A, 0x6B, 0x6C, 0x6D, 0x6E, 0x6F, 0x70, 0x71, 0x72, 0xCB, 0xCC, 0xCD, 0xCE, 0xCF, 0xD0,
    0xD1, 0x7E, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7,
    0xD8, 0xD9, 0xDA, 0xDB, 0xDC, 0xDD, 0xDE, 0xDF, 0xE0, 0xE1, 0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7,
    0x7B, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0xE8, 0xE9, 0xEA, 0xEB, 0xEC, 0xED,
    0x7D, 0x4A, 0x4B, 0x4C, 0x4D, 0x4E, 0x4F, 0x50, 0x51, 0x52, 0xEE, 0xEF, 0xF0, 0xF1, 0xF2, 0xF3,
    0x5C, 0x9F, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9,
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0xFA, 0xFB, 0xFC, 0xFD, 0xFE, 0xFF,
];

const fn invert(table: &[u8; 256]) -> [u8; 256] {
    let mut out = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        out[table[i] as usize] = i as u8;
        i += 1;
    }
    out
}

/// ASCII -> EBCDIC (code page 037), the exact inverse of [`EBCDIC_TO_ASCII`].
pub const ASCII_TO_EBCDIC: [u8; 256] = invert(&EBCDIC_TO_ASCII);

/// Transcodes an EBCDIC byte buffer to ASCII, in place semantics via a fresh `Vec`.
///
/// The source is a fixed-size header buffer, not a null-terminated C string; every byte is
/// transcoded, including any trailing zero bytes, so the destination is the same length as the
/// source and a zero byte in the input lands at the same position in the output.
pub fn e2a(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&b| EBCDIC_TO_ASCII[b as usize]).collect()
}

/// Transcodes an ASCII byte buffer to EBCDIC. See [`e2a`].
pub fn a2e(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&b| ASCII_TO_EBCDIC[b as usize]).collect()
}

/// Reads a big-endian unsigned 16-bit integer at `offset`.
pub fn read_u16be(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buf[offset], buf[offset + 1]])
}

/// Reads a big-endian unsigned 32-bit integer at `offset`.
pub fn read_u32be(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

/// Reads a big-endian signed 16-bit integer at `offset`.
pub fn read_i16be(buf: &[u8], offset: usize) -> i16 {
    read_u16be(buf, offset) as i16
}

/// Reads a big-endian signed 32-bit integer at `offset`.
pub fn read_i32be(buf: &[u8], offset: usize) -> i32 {
    read_u32be(buf, offset) as i32
}

/// Writes a big-endian unsigned 16-bit integer at `offset`.
pub fn write_u16be(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

/// Writes a big-endian unsigned 32-bit integer at `offset`.
pub fn write_u32be(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

/// Writes a big-endian signed 16-bit integer at `offset`. Sign-extension is not needed on write:
/// the bit pattern of an `i16` is identical to its `u16` reinterpretation.
pub fn write_i16be(buf: &mut [u8], offset: usize, value: i16) {
    write_u16be(buf, offset, value as u16);
}

/// Writes a big-endian signed 32-bit integer at `offset`.
pub fn write_i32be(buf: &mut [u8], offset: usize, value: i32) {
    write_u32be(buf, offset, value as u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ebcdic_ascii_is_a_bijection() {
        for b in 0u32..=255 {
            let b = b as u8;
            assert_eq!(a2e(&[e2a(&[b])[0]])[0], b, "a2e(e2a({})) != {}", b, b);
            assert_eq!(e2a(&[a2e(&[b])[0]])[0], b, "e2a(a2e({})) != {}", b, b);
        }
    }

    #[test]
    fn e2a_preserves_zero_terminator_position() {
        let input = [0x81, 0x82, 0x00, 0x83];
        let out = e2a(&input);
        assert_eq!(out[2], 0);
        assert_eq!(out.len(), input.len());
    }

    #[test]
    fn big_endian_round_trip() {
        let mut buf = [0u8; 8];
        write_u32be(&mut buf, 0, 0xDEAD_BEEF);
        assert_eq!(read_u32be(&buf, 0), 0xDEAD_BEEF);
        write_i16be(&mut buf, 4, -1234);
        assert_eq!(read_i16be(&buf, 4), -1234);
    }
}
