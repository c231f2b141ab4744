// ============================================================================
// SWAR Digit Parsing
// Eight ASCII digits at a time inside a single u64 register
// ============================================================================
//
// The scanner spends most of its time in digit runs. Loading eight bytes as
// one little-endian word lets us validate and convert them with a handful of
// multiplies instead of eight dependent multiply-adds.

/// Load the first eight bytes of `chunk` as a little-endian word.
///
/// `chunk` must hold at least eight bytes.
#[inline]
pub fn read_u64(chunk: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&chunk[..8]);
    u64::from_le_bytes(word)
}

/// Check whether all eight bytes of `word` are ASCII digits.
#[inline]
pub fn is_eight_digits(word: u64) -> bool {
    let a = word.wrapping_add(0x4646_4646_4646_4646);
    let b = word.wrapping_sub(0x3030_3030_3030_3030);
    (a | b) & 0x8080_8080_8080_8080 == 0
}

/// Convert eight ASCII digits (first digit in the lowest byte) to their
/// numeric value.
#[inline]
pub fn parse_eight_digits(word: u64) -> u64 {
    const MASK: u64 = 0x0000_00FF_0000_00FF;
    const MUL1: u64 = 0x000F_4240_0000_0064; // 100 + (1000000 << 32)
    const MUL2: u64 = 0x0000_2710_0000_0001; // 1 + (10000 << 32)

    let mut v = word.wrapping_sub(0x3030_3030_3030_3030);
    v = (v * 10) + (v >> 8);
    let v1 = (v & MASK).wrapping_mul(MUL1);
    let v2 = ((v >> 16) & MASK).wrapping_mul(MUL2);
    ((v1.wrapping_add(v2) >> 32) as u32) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eight_digits() {
        assert_eq!(parse_eight_digits(read_u64(b"12345678")), 12_345_678);
        assert_eq!(parse_eight_digits(read_u64(b"00000000")), 0);
        assert_eq!(parse_eight_digits(read_u64(b"99999999")), 99_999_999);
        assert_eq!(parse_eight_digits(read_u64(b"31234567 ")), 31_234_567);
    }

    #[test]
    fn test_is_eight_digits() {
        assert!(is_eight_digits(read_u64(b"01234567")));
        assert!(!is_eight_digits(read_u64(b"1234567.")));
        assert!(!is_eight_digits(read_u64(b"123e4567")));
        assert!(!is_eight_digits(read_u64(b"/1234567")));
        assert!(!is_eight_digits(read_u64(b":1234567")));
        assert!(!is_eight_digits(read_u64(b"1234 567")));
    }

    #[test]
    fn test_high_bytes_rejected() {
        let word = read_u64(&[b'1', b'2', b'3', b'4', b'5', b'6', b'7', 0xB0]);
        assert!(!is_eight_digits(word));
    }
}
