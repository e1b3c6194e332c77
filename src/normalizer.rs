//! Pipeline glue: configuration, segmentation, cascade and filter.
//!
//! ```text
//! raw text ─► split_into_pieces ─► normalize_piece (cascade → lowercase → filter) ─► pieces
//! ```
//!
//! All tables are loaded once and shared behind [`Arc`], so a
//! [`TextNormalizer`] is cheap to clone and can be used from many threads.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cascade::Cascade;
use crate::charmap::VariantTables;
use crate::error::{NormalizeError, Result};
use crate::expand::DEFAULT_MAX_REWRITES;
use crate::filter::filter_text;
use crate::punctuation::{PunctuationDictionary, PunctuationLookup};
use crate::segment::{split_sentences, DEFAULT_MERGE_TAIL_LEN, DEFAULT_MIN_PIECE_LEN};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Normaliser settings, deserialisable from JSON.  Missing keys take their
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Directory holding `t2s_map.bin` and `s2t_map.bin`.
    pub char_map_dir: Option<PathBuf>,
    /// TSV punctuation dictionary; the built-in table is used when unset.
    pub punctuation_dict: Option<PathBuf>,
    pub min_piece_len: usize,
    pub merge_tail_len: usize,
    /// Lowercase ASCII letters before filtering.
    pub lowercase: bool,
    /// Per-stage fixed-point iteration cap.
    pub max_rewrites: usize,
    /// Suppress the debug dump of segmentation output.
    pub quiet: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            char_map_dir: None,
            punctuation_dict: None,
            min_piece_len: DEFAULT_MIN_PIECE_LEN,
            merge_tail_len: DEFAULT_MERGE_TAIL_LEN,
            lowercase: true,
            max_rewrites: DEFAULT_MAX_REWRITES,
            quiet: false,
        }
    }
}

impl NormalizerConfig {
    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| NormalizeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| NormalizeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clause splitter
// ─────────────────────────────────────────────────────────────────────────────

static RE_CLAUSE_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[—《》【】<>{}()（）#&@“”^_|\\]").unwrap());
static RE_CLAUSE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"([：、；。？！;?!][”’]?)").unwrap());

// ─────────────────────────────────────────────────────────────────────────────
// TextNormalizer
// ─────────────────────────────────────────────────────────────────────────────

/// End-to-end text front end for Chinese speech synthesis.
///
/// ```no_run
/// use zhnorm::TextNormalizer;
///
/// let tn = TextNormalizer::new();
/// for piece in tn.process("今天是2021年5月19日，气温-3℃。") {
///     println!("{piece}");
/// }
/// ```
#[derive(Clone)]
pub struct TextNormalizer {
    pub config: NormalizerConfig,
    cascade: Cascade,
    punctuation: Arc<dyn PunctuationLookup + Send + Sync>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::assemble(
            NormalizerConfig::default(),
            VariantTables::default(),
            PunctuationDictionary::builtin(),
        )
    }
}

impl TextNormalizer {
    /// Built-in punctuation table, no traditional→simplified tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `config`, degrading missing or malformed tables to empty
    /// maps / the built-in punctuation table with a warning.
    pub fn from_config(config: NormalizerConfig) -> Self {
        let tables = config
            .char_map_dir
            .as_deref()
            .map(VariantTables::load_or_empty)
            .unwrap_or_default();

        let punctuation = match config.punctuation_dict.as_deref() {
            Some(path) => PunctuationDictionary::load(path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "falling back to built-in punctuation table");
                PunctuationDictionary::builtin()
            }),
            None => PunctuationDictionary::builtin(),
        };

        Self::assemble(config, tables, punctuation)
    }

    /// Build from `config`, failing on the first table that cannot be loaded.
    pub fn try_from_config(config: NormalizerConfig) -> Result<Self> {
        let tables = match config.char_map_dir.as_deref() {
            Some(dir) => VariantTables::load(dir)?,
            None => VariantTables::default(),
        };
        let punctuation = match config.punctuation_dict.as_deref() {
            Some(path) => PunctuationDictionary::load(path)?,
            None => PunctuationDictionary::builtin(),
        };
        Ok(Self::assemble(config, tables, punctuation))
    }

    fn assemble(config: NormalizerConfig, tables: VariantTables, punctuation: PunctuationDictionary) -> Self {
        let cascade = Cascade::new(Arc::new(tables)).with_max_rewrites(config.max_rewrites);
        Self { config, cascade, punctuation: Arc::new(punctuation) }
    }

    /// Replace the punctuation lookup used by the segmenter.
    pub fn with_punctuation<L>(mut self, lookup: L) -> Self
    where
        L: PunctuationLookup + Send + Sync + 'static,
    {
        self.punctuation = Arc::new(lookup);
        self
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    // ── Segmentation ──────────────────────────────────────────────────────────

    /// Cut raw text into length-bounded pieces, in input order.
    pub fn split_into_pieces(&self, text: &str) -> Vec<String> {
        let pieces = split_sentences(
            text,
            self.punctuation.as_ref(),
            self.config.min_piece_len,
            self.config.merge_tail_len,
        );
        if !self.config.quiet {
            debug!(count = pieces.len(), ?pieces, "text split into pieces");
        }
        pieces
    }

    /// Split on clause punctuation after removing brackets, quotes and other
    /// symbols.  Clauses keep their trailing punctuation.
    pub fn split_clauses(&self, text: &str) -> Vec<String> {
        let stripped = RE_CLAUSE_STRIP.replace_all(text, "");
        let marked = RE_CLAUSE_END.replace_all(&stripped, "$1\n");
        marked
            .split('\n')
            .filter(|clause| !clause.is_empty())
            .map(str::to_string)
            .collect()
    }

    // ── Normalisation ─────────────────────────────────────────────────────────

    /// Run the rule cascade only.
    pub fn normalize_sentence(&self, sentence: &str) -> String {
        self.cascade.normalize_sentence(sentence)
    }

    /// Cascade, optional ASCII lowercasing, then the character filter.
    pub fn normalize_piece(&self, piece: &str) -> String {
        let mut text = self.cascade.normalize_sentence(piece);
        if self.config.lowercase {
            text.make_ascii_lowercase();
        }
        let text = filter_text(&text);
        debug!(input = piece, output = %text, "normalised piece");
        text
    }

    /// Split, then normalise every piece.  Pieces that filter down to nothing
    /// are dropped.
    pub fn process(&self, text: &str) -> Vec<String> {
        self.split_into_pieces(text)
            .iter()
            .map(|piece| self.normalize_piece(piece))
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    /// [`split_clauses`](Self::split_clauses) followed by the cascade on each clause.
    pub fn normalize_clauses(&self, text: &str) -> Vec<String> {
        self.split_clauses(text)
            .iter()
            .map(|clause| self.normalize_sentence(clause))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
