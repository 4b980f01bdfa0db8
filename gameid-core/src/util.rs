/// Read a little-endian u32 at `offset`, or `None` if the slice is too short.
pub fn le_u32(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Decode bytes as UTF-8, dropping anything that doesn't decode.
///
/// Unlike `String::from_utf8_lossy`, invalid sequences vanish instead of
/// becoming U+FFFD, so identifiers embedded in binary noise stay intact.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// Filename without its extension, as a string.
pub fn file_stem(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/util_tests.rs"]
mod tests;
