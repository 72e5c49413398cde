// src/sanitize/percent.rs

use std::borrow::Cow;
use tracing::debug;

/// Form-style URL decoding as the legacy collection pipeline applied it:
/// `+` means space, then `%XX` pairs become raw bytes. Malformed `%`
/// sequences pass through as literal text. Output is bytes because a
/// `%`-escape can encode arbitrary, possibly non-UTF-8 data.
pub fn form_urldecode(raw: &str) -> Vec<u8> {
    let plus_as_space = raw.replace('+', " ");
    urlencoding::decode_binary(plus_as_space.as_bytes()).into_owned()
}

/// Recover text from possibly invalid UTF-8, discarding invalid byte
/// sequences. Borrows when the input is already clean.
pub fn discard_invalid_utf8(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let mut out = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                out.push_str(chunk.valid());
            }
            debug!(
                dropped = bytes.len() - out.len(),
                "discarded invalid utf-8 in label"
            );
            Cow::Owned(out)
        }
    }
}
