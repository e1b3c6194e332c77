//! Ordered rule cascade for one sentence.
//!
//! Stages run strictly in [`Stage::ALL`] order and are never revisited.
//! Regex stages run to a local fixed point before the next stage starts.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::charmap::{fullwidth_to_halfwidth, VariantTables};
use crate::expand::{self, MatchRule, DEFAULT_MAX_REWRITES};

/// One step of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    TraditionalToSimplified,
    FullwidthToHalfwidth,
    Date,
    MonthDay,
    DateNumeric,
    TimeRange,
    Time,
    TildeRange,
    Temperature,
    Measure,
    Fraction,
    Percentage,
    Mobile,
    Landline,
    UniformNumber,
    Subtraction,
    MathSymbol,
    Range,
    Number,
    PostReplace,
}

impl Stage {
    /// Every stage, in evaluation order.
    pub const ALL: [Stage; 20] = [
        Stage::TraditionalToSimplified,
        Stage::FullwidthToHalfwidth,
        Stage::Date,
        Stage::MonthDay,
        Stage::DateNumeric,
        Stage::TimeRange,
        Stage::Time,
        Stage::TildeRange,
        Stage::Temperature,
        Stage::Measure,
        Stage::Fraction,
        Stage::Percentage,
        Stage::Mobile,
        Stage::Landline,
        Stage::UniformNumber,
        Stage::Subtraction,
        Stage::MathSymbol,
        Stage::Range,
        Stage::Number,
        Stage::PostReplace,
    ];

    /// The fixed-point rule behind this stage, if it is regex-driven.
    pub fn rule(self) -> Option<&'static MatchRule> {
        let rule = match self {
            Stage::Date => &expand::DATE,
            Stage::MonthDay => &expand::MONTH_DAY,
            Stage::DateNumeric => &expand::DATE_NUMERIC,
            Stage::TimeRange => &expand::TIME_RANGE,
            Stage::Time => &expand::TIME,
            Stage::TildeRange => &expand::TILDE_RANGE,
            Stage::Temperature => &expand::TEMPERATURE,
            Stage::Fraction => &expand::FRACTION,
            Stage::Percentage => &expand::PERCENTAGE,
            Stage::Mobile => &expand::MOBILE,
            Stage::Landline => &expand::LANDLINE,
            Stage::UniformNumber => &expand::UNIFORM_NUMBER,
            Stage::Subtraction => &expand::SUBTRACTION,
            Stage::MathSymbol => &expand::MATH_SYMBOL,
            Stage::Range => &expand::RANGE,
            Stage::Number => &expand::NUMBER,
            Stage::TraditionalToSimplified
            | Stage::FullwidthToHalfwidth
            | Stage::Measure
            | Stage::PostReplace => return None,
        };
        Some(rule)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::TraditionalToSimplified => "traditional_to_simplified",
            Stage::FullwidthToHalfwidth => "fullwidth_to_halfwidth",
            Stage::Measure => "measure",
            Stage::PostReplace => "post_replace",
            other => other.rule().map_or("unknown", |r| r.name),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cascade
// ─────────────────────────────────────────────────────────────────────────────

/// Sentence-level normaliser.  Cheap to clone; the variant tables are shared.
#[derive(Debug, Clone)]
pub struct Cascade {
    tables: Arc<VariantTables>,
    max_rewrites: usize,
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new(Arc::new(VariantTables::default()))
    }
}

impl Cascade {
    pub fn new(tables: Arc<VariantTables>) -> Self {
        Self { tables, max_rewrites: DEFAULT_MAX_REWRITES }
    }

    /// Override the per-stage fixed-point iteration cap (minimum 1).
    pub fn with_max_rewrites(mut self, max_rewrites: usize) -> Self {
        self.max_rewrites = max_rewrites.max(1);
        self
    }

    pub fn tables(&self) -> &VariantTables {
        &self.tables
    }

    /// Run a single stage.
    pub fn apply_stage(&self, stage: Stage, text: &str) -> String {
        match stage {
            Stage::TraditionalToSimplified => self.tables.traditional_to_simplified(text),
            Stage::FullwidthToHalfwidth => fullwidth_to_halfwidth(text),
            Stage::Measure => expand::expand_measures(text),
            Stage::PostReplace => expand::post_replace(text),
            regex_stage => match regex_stage.rule() {
                Some(rule) => rule.apply(text, self.max_rewrites),
                None => text.to_string(),
            },
        }
    }

    /// Expand every non-standard word in `sentence` into speakable text.
    pub fn normalize_sentence(&self, sentence: &str) -> String {
        Stage::ALL.iter().fold(sentence.to_string(), |text, &stage| {
            let out = self.apply_stage(stage, &text);
            if out != text {
                trace!(%stage, output = %out, "stage rewrote sentence");
            }
            out
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charmap::CodePointMap;

    fn cascade() -> Cascade {
        let t2s: CodePointMap = [('國', '国'), ('際', '际')].into_iter().collect();
        let s2t = t2s.inverted();
        Cascade::new(Arc::new(VariantTables::new(t2s, s2t)))
    }

    #[test]
    fn test_stage_order_is_fixed() {
        assert_eq!(Stage::ALL[0], Stage::TraditionalToSimplified);
        assert_eq!(Stage::ALL[1], Stage::FullwidthToHalfwidth);
        assert_eq!(Stage::ALL[Stage::ALL.len() - 1], Stage::PostReplace);
        let time = Stage::ALL.iter().position(|s| *s == Stage::Time).unwrap();
        let range = Stage::ALL.iter().position(|s| *s == Stage::TimeRange).unwrap();
        assert!(range < time);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Date.to_string(), "date");
        assert_eq!(Stage::Measure.name(), "measure");
        assert!(Stage::Measure.rule().is_none());
        assert!(Stage::Number.rule().is_some());
    }

    #[test]
    fn test_variant_and_width_before_numbers() {
        let out = cascade().normalize_sentence("國際１２３");
        assert_eq!(out, "国际一百二十三");
    }

    #[test]
    fn test_time_before_generic_number() {
        let out = cascade().normalize_sentence("会议在8:30开始");
        assert_eq!(out, "会议在八点半开始");
    }

    #[test]
    fn test_financial_sentence() {
        let out = cascade().normalize_sentence("营收为111.9亿美元，每股收益1.20美元。");
        assert_eq!(out, "营收为一百一十一点九亿美元,每股收益一点二美元。");
    }

    #[test]
    fn test_mixed_sentence() {
        let out = cascade().normalize_sentence("气温-3℃，湿度51%，3/4的人");
        assert_eq!(out, "气温零下三度,湿度百分之五十一,四分之三的人");
    }

    #[test]
    fn test_subtraction_wins_over_range() {
        let out = cascade().normalize_sentence("1-10");
        assert_eq!(out, "一减十");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let c = cascade();
        for input in ["2021年5月19日下午3:05", "51%和3/4", "价格是1~5元", "1+1=2"] {
            let once = c.normalize_sentence(input);
            let twice = c.normalize_sentence(&once);
            assert_eq!(once, twice, "input: {}", input);
        }
    }

    #[test]
    fn test_many_numbers_exceed_configured_cap() {
        let sentence = vec!["3"; 200].join(" ");
        let out = cascade().with_max_rewrites(8).normalize_sentence(&sentence);
        assert_eq!(out.matches('三').count(), 200);
        assert!(!out.contains('3'), "got: {}", out);
    }

    #[test]
    fn test_decimal_fraction_not_read_as_phone() {
        let out = cascade().normalize_sentence("圆周率约为3.1415926");
        assert_eq!(out, "圆周率约为三点一四一五九二六");
    }

    #[test]
    fn test_empty_sentence() {
        assert_eq!(cascade().normalize_sentence(""), "");
    }
}
