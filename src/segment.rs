//! Sentence segmentation.
//!
//! Two passes over the raw input:
//!
//! 1. [`split_fragments`] walks the bytes with a [`PunctuationLookup`] and
//!    cuts a fragment after every terminator.
//! 2. [`group_fragments`] packs fragments into pieces of bounded semantic
//!    length so the synthesiser never sees very short utterances.

use crate::punctuation::{PunctClass, PunctuationLookup};

/// A piece is emitted once its semantic length exceeds this.
pub const DEFAULT_MIN_PIECE_LEN: usize = 5;
/// A final piece this short or shorter is merged into its predecessor.
pub const DEFAULT_MERGE_TAIL_LEN: usize = 2;

/// Length in characters: every letter, ideograph, digit, mark and space
/// counts as one unit regardless of its UTF-8 width.
pub fn semantic_len(s: &str) -> usize {
    s.chars().count()
}

fn into_string(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// Fragments
// ─────────────────────────────────────────────────────────────────────────────

/// Cut `text` into fragments, each ending with its (ASCII-folded) terminator.
///
/// * `,` or `.` between two ASCII digits does not cut: the thousands comma is
///   dropped and the decimal point kept (`1,000.5` → `1000.5`).
/// * `.` followed by `com` is kept as a literal.
/// * Space-class entries become a single ASCII space; filtered marks become
///   their ASCII replacement; unmatched bytes are copied through.
pub fn split_fragments<L: PunctuationLookup + ?Sized>(text: &str, dict: &L) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut fragments = Vec::new();
    let mut buf: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let Some((len, class)) = dict.lookup(&bytes[i..]) else {
            buf.push(bytes[i]);
            i += 1;
            continue;
        };

        let c = bytes[i];
        let between_digits = i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit);

        if (c == b',' || c == b'.') && between_digits {
            if c == b'.' {
                buf.push(b'.');
            }
        } else if c == b'.' && bytes[i + 1..].starts_with(b"com") {
            buf.push(b'.');
        } else {
            match class {
                PunctClass::Terminator(b) => {
                    buf.push(b);
                    fragments.push(into_string(std::mem::take(&mut buf)));
                }
                PunctClass::Space => buf.push(b' '),
                PunctClass::Filtered(b) => buf.push(b),
            }
        }
        i += len.max(1);
    }

    if !buf.is_empty() {
        fragments.push(into_string(buf));
    }
    fragments
}

// ─────────────────────────────────────────────────────────────────────────────
// Pieces
// ─────────────────────────────────────────────────────────────────────────────

/// Join fragments (space-separated) into pieces whose semantic length exceeds
/// `min_len`, then fold a final piece of at most `merge_tail_len` units into
/// the one before it.
pub fn group_fragments<S: AsRef<str>>(fragments: &[S], min_len: usize, merge_tail_len: usize) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for (idx, frag) in fragments.iter().enumerate() {
        let frag = frag.as_ref();
        current.push_str(frag);
        current.push(' ');
        count += semantic_len(frag);

        if count > min_len || idx + 1 == fragments.len() {
            current.pop();
            if current.bytes().all(|b| b == b' ') {
                current.clear();
            } else {
                pieces.push(std::mem::take(&mut current));
            }
            count = 0;
        }
    }

    if pieces.len() >= 2 && pieces.last().is_some_and(|p| semantic_len(p) <= merge_tail_len) {
        if let Some(tail) = pieces.pop() {
            if let Some(prev) = pieces.last_mut() {
                prev.push_str(&tail);
            }
        }
    }
    pieces
}

/// [`split_fragments`] followed by [`group_fragments`].
pub fn split_sentences<L: PunctuationLookup + ?Sized>(
    text: &str,
    dict: &L,
    min_len: usize,
    merge_tail_len: usize,
) -> Vec<String> {
    group_fragments(&split_fragments(text, dict), min_len, merge_tail_len)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
