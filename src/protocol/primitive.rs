use memchr::memchr_iter;

use crate::error::{ProcessingError, Result};

/// Decode the hexadecimal `value` of a DELIMITER element into the separator byte
///
/// `"09"` is TAB, `"7C"` is `|`. Exactly two hex digits are accepted.
pub fn decode_delimiter(hex: &str) -> Result<u8> {
    let digits = hex.trim();
    match u8::from_str_radix(digits, 16) {
        Ok(byte) if digits.len() == 2 && digits.bytes().all(|b| b.is_ascii_hexdigit()) => Ok(byte),
        _ => Err(ProcessingError::InvalidDelimiter(hex.to_string()).into()),
    }
}

/// Split a COLUMNS or DATA text node on `delimiter`
///
/// Empty fields are kept, so a well-formed node yields an empty first and last
/// element (the record is wrapped in delimiters). Bytes above 0x7F stand for the
/// Latin-1 code point of the same value.
pub fn split_fields(text: &str, delimiter: u8) -> Vec<String> {
    if delimiter.is_ascii() {
        // An ASCII byte never occurs inside a multi-byte UTF-8 sequence,
        // so byte offsets found by memchr are char boundaries.
        let bytes = text.as_bytes();
        let mut fields = Vec::new();
        let mut start = 0;
        for end in memchr_iter(delimiter, bytes) {
            fields.push(text[start..end].to_string());
            start = end + 1;
        }
        fields.push(text[start..].to_string());
        fields
    } else {
        text.split(char::from(delimiter)).map(str::to_string).collect()
    }
}

/// Join fields with `delimiter`, the inverse of [`split_fields`]
pub fn join_fields<S: AsRef<str>>(fields: &[S], delimiter: u8) -> String {
    let separator = char::from(delimiter).to_string();
    fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&separator)
}
