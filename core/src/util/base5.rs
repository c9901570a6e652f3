//! Base-5 ordinal encoding used in artifact file names.

/// Encode `n` as base-5 digits (`0`-`4`), most significant first.
/// Zero encodes as `"0"`; other values carry no leading zeros.
pub fn encode_index(n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    let mut rest = n;
    while rest > 0 {
        digits.push(char::from(b'0' + (rest % 5) as u8));
        rest /= 5;
    }
    digits.iter().rev().collect()
}

/// Inverse of [`encode_index`]. Returns `None` for empty input, digits
/// outside `0`-`4`, or values that overflow `u64`.
pub fn decode_index(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    s.bytes().try_fold(0u64, |acc, b| {
        if !(b'0'..=b'4').contains(&b) {
            return None;
        }
        acc.checked_mul(5)?.checked_add(u64::from(b - b'0'))
    })
}
