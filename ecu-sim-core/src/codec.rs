//! Wire encoding for signal values
//!
//! The emulated ECU broadcasts every signal as a signed 16-bit little-endian
//! field. Out-of-range values saturate (never wrap) before encoding. The
//! signal generators clamp their outputs well inside the i16 range already,
//! so saturation here is a backstop against large intermediates.

use byteorder::{ByteOrder, LittleEndian};

/// Encode a value as a signed 16-bit little-endian field
///
/// Out-of-range input saturates to `i16::MIN`/`i16::MAX`.
pub fn encode_i16_le(value: i32) -> [u8; 2] {
    let mut buf = [0u8; 2];
    LittleEndian::write_i16(&mut buf, saturate(value));
    buf
}

/// Pack four signal values into an 8-byte payload
///
/// Fields are encoded in order, two bytes each, LSB first.
pub fn pack_fields(fields: [i32; 4]) -> [u8; 8] {
    let mut buf = [0u8; 8];
    for (i, field) in fields.iter().enumerate() {
        LittleEndian::write_i16(&mut buf[i * 2..i * 2 + 2], saturate(*field));
    }
    buf
}

/// Pack a single signal value into an 8-byte payload, zero-filling the
/// trailing six bytes
pub fn pack_single(field: i32) -> [u8; 8] {
    let mut buf = [0u8; 8];
    LittleEndian::write_i16(&mut buf[0..2], saturate(field));
    buf
}

fn saturate(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_little_endian_byte_order() {
        assert_eq!(encode_i16_le(0x1234), [0x34, 0x12]);
        assert_eq!(encode_i16_le(0), [0x00, 0x00]);
    }

    #[test]
    fn test_encode_negative_values() {
        assert_eq!(encode_i16_le(-1), [0xFF, 0xFF]);
        assert_eq!(encode_i16_le(-2), [0xFE, 0xFF]);
        assert_eq!(i16::from_le_bytes(encode_i16_le(-500)), -500);
    }

    #[test]
    fn test_encode_saturates_out_of_range_input() {
        assert_eq!(i16::from_le_bytes(encode_i16_le(40_000)), i16::MAX);
        assert_eq!(i16::from_le_bytes(encode_i16_le(-40_000)), i16::MIN);
        assert_eq!(i16::from_le_bytes(encode_i16_le(i32::MAX)), i16::MAX);
    }

    #[test]
    fn test_pack_fields_layout() {
        let payload = pack_fields([0x0102, 0x0304, -1, 0x0708]);
        assert_eq!(
            payload,
            [0x02, 0x01, 0x04, 0x03, 0xFF, 0xFF, 0x08, 0x07]
        );
    }

    #[test]
    fn test_pack_fields_round_trip() {
        let fields = [800, -42, 200, 13_800];
        let payload = pack_fields(fields);
        for (i, expected) in fields.iter().enumerate() {
            let decoded = i16::from_le_bytes([payload[i * 2], payload[i * 2 + 1]]);
            assert_eq!(decoded as i32, *expected);
        }
    }

    #[test]
    fn test_pack_single_zero_fills_trailing_bytes() {
        let payload = pack_single(980);
        assert_eq!(i16::from_le_bytes([payload[0], payload[1]]), 980);
        assert_eq!(&payload[2..], &[0, 0, 0, 0, 0, 0]);
    }
}
