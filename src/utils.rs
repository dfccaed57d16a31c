/// Shared utility functions

/// Safely truncate a string at a UTF-8 boundary
///
/// Tender documents are full of accented characters, so log previews must
/// not cut inside a multi-byte sequence.
pub fn safe_truncate(s: &str, max_bytes: usize) -> &str {
    if max_bytes >= s.len() {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
