//! Final character sweep before text reaches the tokenizer.
//!
//! Keeps ASCII letters, CJK unified ideographs U+4E00..=U+9FA5, a small set
//! of ASCII punctuation and the ASCII space.  Everything else is dropped.

/// ASCII punctuation that survives filtering.
pub const KEPT_PUNCTUATION: &[u8] = b",.!?;-'";

const CJK_FIRST: char = '\u{4E00}';
const CJK_LAST: char = '\u{9FA5}';

pub fn is_kept(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (CJK_FIRST..=CJK_LAST).contains(&c)
        || c == ' '
        || (c.is_ascii() && KEPT_PUNCTUATION.contains(&(c as u8)))
}

/// Byte length of the UTF-8 sequence introduced by `lead`, or `None` for a
/// continuation or invalid lead byte.
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Filter raw UTF-8 bytes.  Malformed sequences are skipped and a truncated
/// trailing sequence is dropped.
pub fn filter_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let Some(len) = sequence_len(bytes[i]) else {
            i += 1;
            continue;
        };
        let Some(seq) = bytes.get(i..i + len) else {
            break;
        };
        if let Some(c) = std::str::from_utf8(seq).ok().and_then(|s| s.chars().next()) {
            if is_kept(c) {
                out.push(c);
            }
        }
        i += len;
    }
    out
}

pub fn filter_text(text: &str) -> String {
    text.chars().filter(|&c| is_kept(c)).collect()
}
