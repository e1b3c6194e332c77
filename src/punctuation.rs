//! Punctuation classification for the sentence segmenter.
//!
//! The segmenter only needs a longest-prefix lookup over UTF-8 bytes, so the
//! dictionary sits behind [`PunctuationLookup`] and can be swapped (built-in
//! table, a TSV file, or a caller-provided trie) without touching
//! segmentation logic.
//!
//! # TSV format
//!
//! One entry per line, `#` starts a comment line:
//!
//! ```text
//! <entry>\t<class>[\t<char>]
//! ```
//!
//! `<class>` is `terminator`, `space` or `filtered`.  Terminators and filtered
//! marks carry the single ASCII character they are rewritten to.  The escapes
//! `\n`, `\t`, `\r` and `\\` are recognised inside `<entry>`.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{NormalizeError, Result};

/// Category of a matched punctuation span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunctClass {
    /// Ends the current fragment; the byte is appended first.
    Terminator(u8),
    /// Replaced by a single ASCII space.
    Space,
    /// Replaced by the given ASCII byte; does not end the fragment.
    Filtered(u8),
}

/// Longest-prefix match over the bytes at the current offset.
pub trait PunctuationLookup {
    /// Returns the matched byte length and its class, or `None` when no entry
    /// is a prefix of `bytes`.
    fn lookup(&self, bytes: &[u8]) -> Option<(usize, PunctClass)>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in table
// ─────────────────────────────────────────────────────────────────────────────

const BUILTIN: &[(&str, PunctClass)] = &[
    // terminators
    ("，", PunctClass::Terminator(b',')),
    ("。", PunctClass::Terminator(b'.')),
    ("！", PunctClass::Terminator(b'!')),
    ("？", PunctClass::Terminator(b'?')),
    ("；", PunctClass::Terminator(b';')),
    (",", PunctClass::Terminator(b',')),
    (".", PunctClass::Terminator(b'.')),
    ("!", PunctClass::Terminator(b'!')),
    ("?", PunctClass::Terminator(b'?')),
    (";", PunctClass::Terminator(b';')),
    // whitespace
    ("\n", PunctClass::Space),
    ("\t", PunctClass::Space),
    ("\r", PunctClass::Space),
    // marks folded to ASCII
    ("、", PunctClass::Filtered(b',')),
    ("·", PunctClass::Filtered(b',')),
    ("：", PunctClass::Filtered(b':')),
    ("“", PunctClass::Filtered(b'\'')),
    ("”", PunctClass::Filtered(b'\'')),
    ("‘", PunctClass::Filtered(b'\'')),
    ("’", PunctClass::Filtered(b'\'')),
    ("\"", PunctClass::Filtered(b'\'')),
    ("（", PunctClass::Filtered(b'\'')),
    ("）", PunctClass::Filtered(b'\'')),
    ("(", PunctClass::Filtered(b'\'')),
    (")", PunctClass::Filtered(b'\'')),
    ("【", PunctClass::Filtered(b'\'')),
    ("】", PunctClass::Filtered(b'\'')),
    ("[", PunctClass::Filtered(b'\'')),
    ("]", PunctClass::Filtered(b'\'')),
    ("《", PunctClass::Filtered(b'\'')),
    ("》", PunctClass::Filtered(b'\'')),
    ("——", PunctClass::Filtered(b'-')),
    ("……", PunctClass::Filtered(b'.')),
    ("...", PunctClass::Filtered(b'.')),
];

// ─────────────────────────────────────────────────────────────────────────────
// Dictionary
// ─────────────────────────────────────────────────────────────────────────────

/// Hash-map backed punctuation dictionary with longest-prefix lookup.
#[derive(Debug, Clone)]
pub struct PunctuationDictionary {
    entries: HashMap<Vec<u8>, PunctClass>,
    max_len: usize,
}

impl Default for PunctuationDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PunctuationDictionary {
    /// Chinese and ASCII sentence punctuation, whitespace, quotes and brackets.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|(entry, class)| (entry.as_bytes().to_vec(), *class))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add or replace one entry.  Empty entries are ignored.
    pub fn insert(&mut self, entry: &[u8], class: PunctClass) {
        if entry.is_empty() {
            return;
        }
        self.max_len = self.max_len.max(entry.len());
        self.entries.insert(entry.to_vec(), class);
    }

    /// Read a TSV dictionary file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| NormalizeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dict = Self::from_tsv_str(&text)?;
        debug!(path = %path.display(), entries = dict.len(), "loaded punctuation dictionary");
        Ok(dict)
    }

    /// Parse the TSV format described in the module docs.
    pub fn from_tsv_str(text: &str) -> Result<Self> {
        let mut dict = Self { entries: HashMap::new(), max_len: 0 };
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            if raw.trim().is_empty() || raw.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = raw.split('\t').collect();
            let entry = unescape(fields[0]);
            if entry.is_empty() {
                return Err(dict_error(line, "empty entry"));
            }
            let class = match (fields.get(1).map(|s| s.trim()), fields.get(2)) {
                (Some("space"), _) => PunctClass::Space,
                (Some("terminator"), Some(c)) => PunctClass::Terminator(ascii_byte(c, line)?),
                (Some("filtered"), Some(c)) => PunctClass::Filtered(ascii_byte(c, line)?),
                (Some(kind @ ("terminator" | "filtered")), None) => {
                    return Err(dict_error(line, &format!("class `{kind}` needs a replacement character")));
                }
                (Some(other), _) => {
                    return Err(dict_error(line, &format!("unknown class `{other}`")));
                }
                (None, _) => return Err(dict_error(line, "missing class column")),
            };
            dict.insert(entry.as_bytes(), class);
        }
        Ok(dict)
    }
}

impl FromIterator<(Vec<u8>, PunctClass)> for PunctuationDictionary {
    fn from_iter<I: IntoIterator<Item = (Vec<u8>, PunctClass)>>(iter: I) -> Self {
        let mut dict = Self { entries: HashMap::new(), max_len: 0 };
        for (entry, class) in iter {
            dict.insert(&entry, class);
        }
        dict
    }
}

impl PunctuationLookup for PunctuationDictionary {
    fn lookup(&self, bytes: &[u8]) -> Option<(usize, PunctClass)> {
        let longest = self.max_len.min(bytes.len());
        (1..=longest)
            .rev()
            .find_map(|len| self.entries.get(&bytes[..len]).map(|class| (len, *class)))
    }
}

fn dict_error(line: usize, reason: &str) -> NormalizeError {
    NormalizeError::Dictionary { line, reason: reason.to_string() }
}

fn ascii_byte(field: &str, line: usize) -> Result<u8> {
    let unescaped = unescape(field.trim_end_matches('\r'));
    match unescaped.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(dict_error(line, &format!("replacement `{field}` is not a single ASCII character"))),
    }
}

fn unescape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
