//! Code-point substitution tables.
//!
//! Two families of one-to-one maps over Unicode scalar values:
//!
//! * **Width**: full-width ↔ half-width ASCII letters, digits, punctuation
//!   and the ideographic space (U+3000).  Generated once from fixed ranges.
//! * **Variant**: traditional ↔ simplified Chinese.  Loaded from two binary
//!   tables (`t2s_map.bin`, `s2t_map.bin`) at start-up.
//!
//! Binary table layout (all little-endian):
//!
//! | Offset        | Size | Content                     |
//! |---------------|------|-----------------------------|
//! | 0             | 8    | entry count `n` (u64)       |
//! | 8 + 8·i       | 4    | key code point (u32)        |
//! | 12 + 8·i      | 4    | value code point (u32)      |
//!
//! Every conversion is a single pass and total: a character without an entry
//! passes through unchanged.

use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::error::{NormalizeError, Result};

/// Traditional → simplified table file name inside the char-map directory.
pub const T2S_FILE: &str = "t2s_map.bin";
/// Simplified → traditional table file name inside the char-map directory.
pub const S2T_FILE: &str = "s2t_map.bin";

/// Distance between an ASCII character and its full-width form (U+FF01…U+FF5E).
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// ASCII punctuation that has a full-width counterpart.
const ASCII_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

const HEADER_LEN: usize = 8;
const ENTRY_LEN: usize = 8;

// ─────────────────────────────────────────────────────────────────────────────
// CodePointMap
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable `char → char` substitution table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePointMap {
    map: HashMap<char, char>,
}

impl CodePointMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, c: char) -> Option<char> {
        self.map.get(&c).copied()
    }

    /// Replace every mapped character of `text`; unmapped characters are kept.
    pub fn convert(&self, text: &str) -> String {
        if self.map.is_empty() {
            return text.to_string();
        }
        text.chars().map(|c| self.get(c).unwrap_or(c)).collect()
    }

    /// The table with keys and values swapped.
    pub fn inverted(&self) -> Self {
        self.map.iter().map(|(&k, &v)| (v, k)).collect()
    }

    /// Entries in ascending key order.
    pub fn sorted_entries(&self) -> Vec<(char, char)> {
        let mut entries: Vec<(char, char)> = self.map.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_unstable();
        entries
    }
}

impl FromIterator<(char, char)> for CodePointMap {
    fn from_iter<I: IntoIterator<Item = (char, char)>>(iter: I) -> Self {
        Self { map: iter.into_iter().collect() }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Full-width ↔ half-width
// ─────────────────────────────────────────────────────────────────────────────

static F2H: Lazy<CodePointMap> = Lazy::new(|| {
    let shifted = ('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .chain(ASCII_PUNCTUATION.chars())
        .filter_map(|c| char::from_u32(c as u32 + FULLWIDTH_OFFSET).map(|full| (full, c)));
    shifted.chain(std::iter::once(('\u{3000}', ' '))).collect()
});

static H2F: Lazy<CodePointMap> = Lazy::new(|| F2H.inverted());

/// Full-width letters, digits, punctuation and U+3000 → ASCII.
pub fn fullwidth_to_halfwidth(text: &str) -> String {
    F2H.convert(text)
}

/// ASCII letters, digits, punctuation and space → full-width.
pub fn halfwidth_to_fullwidth(text: &str) -> String {
    H2F.convert(text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Binary table I/O
// ─────────────────────────────────────────────────────────────────────────────

/// Decode a binary table already read into memory.
///
/// `path` is only used for error reporting.
pub fn parse_map(data: &[u8], path: &Path) -> Result<CodePointMap> {
    let truncated = |expected: u64, found: u64| NormalizeError::TruncatedTable {
        path: path.to_path_buf(),
        expected,
        found,
    };

    let header: [u8; HEADER_LEN] = data
        .get(..HEADER_LEN)
        .and_then(|h| h.try_into().ok())
        .ok_or_else(|| truncated(0, 0))?;
    let expected = u64::from_le_bytes(header);

    let body = &data[HEADER_LEN..];
    let available = (body.len() / ENTRY_LEN) as u64;
    if expected > available {
        return Err(truncated(expected, available));
    }

    let to_char = |value: u32| {
        char::from_u32(value).ok_or_else(|| NormalizeError::InvalidCodePoint {
            path: path.to_path_buf(),
            value,
        })
    };

    body.chunks_exact(ENTRY_LEN)
        .take(expected as usize)
        .map(|b| {
            let key = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
            let value = u32::from_le_bytes([b[4], b[5], b[6], b[7]]);
            Ok((to_char(key)?, to_char(value)?))
        })
        .collect()
}

/// Load a binary `char → char` table from disk.
pub fn load_map(path: &Path) -> Result<CodePointMap> {
    let data = fs::read(path).map_err(|source| NormalizeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_map(&data, path)?;
    debug!(path = %path.display(), entries = map.len(), "Loaded character map");
    Ok(map)
}

/// Load a table, or warn and fall back to an empty one.
pub fn load_map_or_empty(path: &Path) -> CodePointMap {
    load_map(path).unwrap_or_else(|err| {
        warn!(path = %path.display(), "Character map unavailable, conversion disabled: {err}");
        CodePointMap::new()
    })
}

/// Serialise `map` in the binary layout, entries in ascending key order.
pub fn encode_map(map: &CodePointMap) -> Vec<u8> {
    let entries = map.sorted_entries();
    let mut buf = Vec::with_capacity(HEADER_LEN + entries.len() * ENTRY_LEN);
    buf.extend_from_slice(&(entries.len() as u64).to_le_bytes());
    for (key, value) in entries {
        buf.extend_from_slice(&(key as u32).to_le_bytes());
        buf.extend_from_slice(&(value as u32).to_le_bytes());
    }
    buf
}

/// Write `map` to `path` in the binary layout.
pub fn save_map(map: &CodePointMap, path: &Path) -> Result<()> {
    fs::write(path, encode_map(map)).map_err(|source| NormalizeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Traditional ↔ simplified
// ─────────────────────────────────────────────────────────────────────────────

/// Both variant-conversion tables, loaded together from one directory.
#[derive(Debug, Clone, Default)]
pub struct VariantTables {
    t2s: CodePointMap,
    s2t: CodePointMap,
}

impl VariantTables {
    pub fn new(t2s: CodePointMap, s2t: CodePointMap) -> Self {
        Self { t2s, s2t }
    }

    /// Load `t2s_map.bin` and `s2t_map.bin` from `dir`, failing on the first error.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            t2s: load_map(&dir.join(T2S_FILE))?,
            s2t: load_map(&dir.join(S2T_FILE))?,
        })
    }

    /// Load both tables; each one that is missing or malformed degrades to
    /// an empty map with a warning.
    pub fn load_or_empty(dir: &Path) -> Self {
        Self {
            t2s: load_map_or_empty(&dir.join(T2S_FILE)),
            s2t: load_map_or_empty(&dir.join(S2T_FILE)),
        }
    }

    pub fn traditional_to_simplified(&self, text: &str) -> String {
        self.t2s.convert(text)
    }

    pub fn simplified_to_traditional(&self, text: &str) -> String {
        self.s2t.convert(text)
    }

    pub fn t2s(&self) -> &CodePointMap {
        &self.t2s
    }

    pub fn s2t(&self) -> &CodePointMap {
        &self.s2t
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_t2s() -> CodePointMap {
        [('國', '国'), ('語', '语'), ('時', '时'), ('間', '间')].into_iter().collect()
    }

    #[test]
    fn test_fullwidth_to_halfwidth() {
        assert_eq!(fullwidth_to_halfwidth("ＡＢＣ１２３"), "ABC123");
        assert_eq!(fullwidth_to_halfwidth("５０％，ｏｋ！"), "50%,ok!");
        // 。 and 、 are CJK punctuation, not full-width ASCII
        assert_eq!(fullwidth_to_halfwidth("好。、"), "好。、");
        assert_eq!(fullwidth_to_halfwidth("你好\u{3000}世界"), "你好 世界");
    }

    #[test]
    fn test_halfwidth_to_fullwidth() {
        assert_eq!(halfwidth_to_fullwidth("a1 ~"), "ａ１\u{3000}～");
        assert_eq!(halfwidth_to_fullwidth("中文"), "中文");
    }

    #[test]
    fn test_width_round_trip() {
        let full: String = F2H.sorted_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(halfwidth_to_fullwidth(&fullwidth_to_halfwidth(&full)), full);
    }

    #[test]
    fn test_width_table_size() {
        // 52 letters + 10 digits + 32 punctuation + ideographic space
        assert_eq!(F2H.len(), 95);
        assert_eq!(H2F.len(), 95);
    }

    #[test]
    fn test_unmapped_passthrough() {
        let tables = VariantTables::new(sample_t2s(), sample_t2s().inverted());
        assert_eq!(tables.traditional_to_simplified("中國語abc"), "中国语abc");
        assert_eq!(tables.simplified_to_traditional("时间"), "時間");
        assert_eq!(VariantTables::default().traditional_to_simplified("國"), "國");
    }

    #[test]
    fn test_encode_parse_round_trip() {
        let map = sample_t2s();
        let bytes = encode_map(&map);
        assert_eq!(bytes.len(), 8 + 4 * 8);
        assert_eq!(&bytes[..8], &4u64.to_le_bytes());
        let parsed = parse_map(&bytes, Path::new("mem")).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn test_truncated_table() {
        let mut bytes = encode_map(&sample_t2s());
        bytes.truncate(8 + 2 * 8 + 3);
        match parse_map(&bytes, Path::new("mem")) {
            Err(NormalizeError::TruncatedTable { expected, found, .. }) => {
                assert_eq!(expected, 4);
                assert_eq!(found, 2);
            }
            other => panic!("expected TruncatedTable, got {:?}", other),
        }
        assert!(parse_map(&[1, 2, 3], Path::new("mem")).is_err());
    }

    #[test]
    fn test_invalid_code_point() {
        let mut bytes = 1u64.to_le_bytes().to_vec();
        bytes.extend_from_slice(&0xD800u32.to_le_bytes());
        bytes.extend_from_slice(&('a' as u32).to_le_bytes());
        assert!(matches!(
            parse_map(&bytes, Path::new("mem")),
            Err(NormalizeError::InvalidCodePoint { value: 0xD800, .. })
        ));
    }

    #[test]
    fn test_save_and_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        let t2s = sample_t2s();
        save_map(&t2s, &dir.path().join(T2S_FILE)).unwrap();
        save_map(&t2s.inverted(), &dir.path().join(S2T_FILE)).unwrap();

        let tables = VariantTables::load(dir.path()).unwrap();
        assert_eq!(tables.t2s(), &t2s);
        assert_eq!(tables.traditional_to_simplified("時間"), "时间");
    }

    #[test]
    fn test_missing_dir_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(VariantTables::load(dir.path()).is_err());
        let tables = VariantTables::load_or_empty(dir.path());
        assert!(tables.t2s().is_empty());
        assert!(tables.s2t().is_empty());
        assert_eq!(tables.traditional_to_simplified("國語"), "國語");
    }
}
