//! # zhnorm
//!
//! Chinese/English text front end for speech synthesis: sentence
//! segmentation and non-standard-word normalisation (dates, times, numbers,
//! units, phone numbers, math symbols) into speakable Chinese text.
//!
//! ## Quick start
//!
//! ```no_run
//! use zhnorm::{NormalizerConfig, TextNormalizer};
//!
//! // Built-in punctuation table, no traditional→simplified tables
//! let tn = TextNormalizer::new();
//! let pieces = tn.process("会议在8:30开始，电话13912345678。");
//!
//! // Or with binary char maps and a JSON config
//! let cfg = NormalizerConfig::from_json_file(std::path::Path::new("normalizer.json")).unwrap();
//! let tn = TextNormalizer::from_config(cfg);
//! ```
//!
//! Individual stages are also usable on their own:
//!
//! ```
//! assert_eq!(zhnorm::numeral::verbalize_cardinal("10050"), "一万零五十");
//! assert_eq!(zhnorm::expand::expand_fractions("3/4"), "四分之三");
//! ```
//!
//! ## Pipeline
//! 1. **Segmentation**: longest-prefix punctuation lookup cuts fragments,
//!    which are regrouped into length-bounded pieces.
//! 2. **Character maps**: traditional → simplified, full-width → half-width.
//! 3. **Rule cascade**: ordered regex expanders, each run to a fixed point.
//! 4. **Lowercase + filter**: only ideographs, ASCII letters, a few
//!    punctuation marks and spaces reach the tokenizer.

pub mod cascade;
pub mod charmap;
pub mod error;
pub mod expand;
pub mod filter;
pub mod normalizer;
pub mod numeral;
pub mod punctuation;
pub mod segment;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use cascade::{Cascade, Stage};
pub use charmap::{CodePointMap, VariantTables};
pub use error::{NormalizeError, Result};
pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use punctuation::{PunctClass, PunctuationDictionary, PunctuationLookup};
