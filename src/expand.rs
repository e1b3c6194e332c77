//! Pattern expanders: regex-driven rewrites of dates, times, units, phone
//! numbers, math notation and bare numbers into spoken Chinese.
//!
//! Each expander is a [`MatchRule`]: a compiled pattern plus a rewrite over
//! its capture groups.  Rules are applied to a local fixed point by
//! [`rewrite_until_stable`]: find the first match, splice in its rewrite,
//! search the rewritten string again.  Every rewrite removes the text that
//! triggered it, so each loop terminates; the iteration cap guards against a
//! rule that breaks that property.

use fancy_regex::{Captures, Regex};
use once_cell::sync::Lazy;
use tracing::warn;

use crate::numeral::{num2str, time_num2str, verbalize_cardinal, verbalize_digit};

/// Per-stage iteration cap used by the free `expand_*` functions.
pub const DEFAULT_MAX_REWRITES: usize = 4096;

/// Spoken comma joining phone-number components.
const SPOKEN_COMMA: &str = "，";

// ─────────────────────────────────────────────────────────────────────────────
// Patterns
// ─────────────────────────────────────────────────────────────────────────────
//
// Digit classes are spelled `[0-9]`: `\d` would also match non-ASCII digits.
// Phone patterns refuse to start after a digit or a decimal point.

static RE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4}|[0-9]{2})年((0?[1-9]|1[0-2])月)?(((0?[1-9])|((1|2)[0-9])|30|31)([日号]))?")
        .unwrap()
});
static RE_MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?<![0-9])(0?[1-9]|1[0-2])月(0?[1-9]|[12][0-9]|3[01])[日号]").unwrap()
});
static RE_DATE_NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})([- /.])(0[1-9]|1[012])\2(0[1-9]|[12][0-9]|3[01])").unwrap()
});
static RE_TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([0-1]?[0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]))?(~|-)([0-1]?[0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]))?",
    )
    .unwrap()
});
static RE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-1]?[0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]))?").unwrap());
static RE_TILDE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let units = r"%|°C|℃|摄氏度|度|cm2|cm²|cm3|cm³|cm|db|ds|kg|km|m2|m²|m³|m3|ml|mm|m|s";
    Regex::new(&format!(
        r"(-?[0-9]+(?:\.[0-9]+)?)({units})?~(-?[0-9]+(?:\.[0-9]+)?)({units})?"
    ))
    .unwrap()
});
static RE_TEMPERATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?)([0-9]+(\.[0-9]+)?)(°C|℃|度|摄氏度)").unwrap());
static RE_FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(-?)([0-9]+)/([0-9]+)").unwrap());
static RE_PERCENTAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?)([0-9]+(\.[0-9]+)?)%").unwrap());
static RE_MOBILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?<![0-9.])(\+?86 ?)?(1(?:[38][0-9]|5[0-35-9]|7[678]|9[89])[0-9]{8})(?![0-9])").unwrap()
});
static RE_LANDLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?<![0-9.])(?:(0(?:10|2[1-3]|[3-9][0-9]{2}))-?)?([1-9][0-9]{6,7})(?![0-9])").unwrap()
});
static RE_UNIFORM_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?<![0-9.])400-?([0-9]{3})-?([0-9]{4})(?![0-9])").unwrap());
static RE_SUBTRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"((-?)(([0-9]+)(\.[0-9]+)?)|(\.([0-9]+)))(-)((-?)(([0-9]+)(\.[0-9]+)?)|(\.([0-9]+)))",
    )
    .unwrap()
});
static RE_MATH_SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+×÷><=≈≤≥]").unwrap());
static RE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?<![0-9A-Za-z_])(-?[0-9]+(?:\.[0-9]+)?)[-~](-?[0-9]+(?:\.[0-9]+)?)(?![0-9A-Za-z_])",
    )
    .unwrap()
});
static RE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?)(([0-9]+)(\.[0-9]+)?)|(\.([0-9]+))").unwrap());

// ─────────────────────────────────────────────────────────────────────────────
// Literal tables
// ─────────────────────────────────────────────────────────────────────────────

/// Measurement symbols, substituted in this order (`cm2` before `m2`).
const MEASURES: &[(&str, &str)] = &[
    ("cm2", "平方厘米"),
    ("cm²", "平方厘米"),
    ("cm3", "立方厘米"),
    ("cm³", "立方厘米"),
    ("m2", "平方米"),
    ("m²", "平方米"),
    ("m³", "立方米"),
    ("m3", "立方米"),
];

fn math_symbol_word(symbol: &str) -> &'static str {
    match symbol {
        "+" => "加",
        "-" => "减",
        "×" => "乘",
        "÷" => "除",
        "=" => "等于",
        ">" => "大于",
        "<" => "小于",
        "≈" => "约等于",
        "≥" => "大于等于",
        "≤" => "小于等于",
        _ => "",
    }
}

/// Literal substitutions run after every numeric stage.
const POST_REPLACEMENTS: &[(&str, &str)] = &[
    ("/", "每"),
    ("①", "一"),
    ("②", "二"),
    ("③", "三"),
    ("④", "四"),
    ("⑤", "五"),
    ("⑥", "六"),
    ("⑦", "七"),
    ("⑧", "八"),
    ("⑨", "九"),
    ("⑩", "十"),
    ("α", "阿尔法"),
    ("β", "贝塔"),
    ("γ", "伽玛"),
    ("Γ", "伽玛"),
    ("δ", "德尔塔"),
    ("Δ", "德尔塔"),
    ("ε", "艾普西龙"),
    ("ζ", "捷塔"),
    ("η", "依塔"),
    ("θ", "西塔"),
    ("Θ", "西塔"),
    ("ι", "艾欧塔"),
    ("κ", "喀帕"),
    ("λ", "拉姆达"),
    ("Λ", "拉姆达"),
    ("μ", "缪"),
    ("ν", "拗"),
    ("ξ", "克西"),
    ("Ξ", "克西"),
    ("ο", "欧米克伦"),
    ("π", "派"),
    ("Π", "派"),
    ("ρ", "肉"),
    ("ς", "西格玛"),
    ("σ", "西格玛"),
    ("Σ", "西格玛"),
    ("τ", "套"),
    ("υ", "宇普西龙"),
    ("φ", "服艾"),
    ("Φ", "服艾"),
    ("χ", "器"),
    ("ψ", "普赛"),
    ("Ψ", "普赛"),
    ("ω", "欧米伽"),
    ("Ω", "欧米伽"),
    ("@", " at "),
    ("www.", " www dot "),
    (".com", " dot come "),
    ("嗯", "恩"),
    ("呣", "母"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-point driver
// ─────────────────────────────────────────────────────────────────────────────

/// A compiled pattern paired with the rewrite of one match.
pub struct MatchRule {
    pub name: &'static str,
    pattern: &'static Lazy<Regex>,
    rewrite: fn(&Captures) -> String,
}

impl MatchRule {
    /// Apply this rule until the text no longer matches, at most `cap` times.
    pub fn apply(&self, text: &str, cap: usize) -> String {
        rewrite_until_stable(text, self.pattern, self.name, cap, self.rewrite)
    }
}

/// Repeatedly replace the first match of `re` with `rewrite(captures)`.
///
/// Stops when the pattern no longer matches, when the regex engine reports a
/// runtime error (backtrack limit), or after `cap` rewrites.  The last two
/// cases log a warning and return the text as rewritten so far.
///
/// The effective cap is never below the input's char count: a converging
/// rule consumes at least one input char per rewrite, so long inputs still
/// reach their fixed point.
pub fn rewrite_until_stable<F>(text: &str, re: &Regex, stage: &str, cap: usize, mut rewrite: F) -> String
where
    F: FnMut(&Captures) -> String,
{
    let mut current = text.to_string();
    let cap = cap.max(text.chars().count());
    for _ in 0..cap {
        let step = match re.captures(&current) {
            Ok(Some(caps)) => caps.get(0).map(|m| (m.start(), m.end(), rewrite(&caps))),
            Ok(None) => None,
            Err(e) => {
                warn!(stage, error = %e, "regex engine error, stage skipped");
                None
            }
        };
        let Some((start, end, replacement)) = step else {
            return current;
        };
        current.replace_range(start..end, &replacement);
    }

    if matches!(re.is_match(&current), Ok(true)) {
        warn!(stage, cap, "rewrite cap reached before a fixed point");
    }
    current
}

fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

fn sign_word(sign: &str, word: &'static str) -> &'static str {
    if sign.is_empty() {
        ""
    } else {
        word
    }
}

/// Drop zero padding from a calendar or clock field, keeping at least one digit.
fn unpadded(field: &str) -> &str {
    let trimmed = field.trim_start_matches('0');
    if trimmed.is_empty() && !field.is_empty() {
        "0"
    } else {
        trimmed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rewrites
// ─────────────────────────────────────────────────────────────────────────────

// ── Dates ──

fn calendar(year: &str, month: &str, day: &str) -> String {
    let mut out = String::new();
    if !year.is_empty() {
        out.push_str(&verbalize_digit(year, false));
        out.push('年');
    }
    if !month.is_empty() {
        out.push_str(&verbalize_cardinal(unpadded(month)));
        out.push('月');
    }
    if !day.is_empty() {
        out.push_str(&verbalize_cardinal(unpadded(day)));
        out.push('日');
    }
    out
}

fn rewrite_date(caps: &Captures) -> String {
    calendar(group(caps, 1), group(caps, 3), group(caps, 5))
}

fn rewrite_month_day(caps: &Captures) -> String {
    calendar("", group(caps, 1), group(caps, 2))
}

fn rewrite_date_numeric(caps: &Captures) -> String {
    calendar(group(caps, 1), group(caps, 3), group(caps, 4))
}

// ── Clock times ──

fn clock(hour: &str, minute: &str, second: &str) -> String {
    let mut out = num2str(unpadded(hour));
    out.push('点');
    if !minute.is_empty() && minute != "00" {
        if minute == "30" {
            out.push('半');
        } else {
            out.push_str(&time_num2str(minute));
            out.push('分');
        }
    }
    if !second.is_empty() && second != "00" {
        out.push_str(&time_num2str(second));
        out.push('秒');
    }
    out
}

fn rewrite_time_range(caps: &Captures) -> String {
    format!(
        "{}至{}",
        clock(group(caps, 1), group(caps, 2), group(caps, 3)),
        clock(group(caps, 5), group(caps, 6), group(caps, 7))
    )
}

fn rewrite_time(caps: &Captures) -> String {
    clock(group(caps, 1), group(caps, 2), group(caps, 3))
}

// ── Quantities ──

fn rewrite_tilde_range(caps: &Captures) -> String {
    format!(
        "{}{}至{}{}",
        group(caps, 1),
        group(caps, 2),
        group(caps, 3),
        group(caps, 4)
    )
}

fn rewrite_temperature(caps: &Captures) -> String {
    let unit = if group(caps, 4) == "摄氏度" { "摄氏度" } else { "度" };
    format!(
        "{}{}{}",
        sign_word(group(caps, 1), "零下"),
        num2str(group(caps, 2)),
        unit
    )
}

fn rewrite_fraction(caps: &Captures) -> String {
    // denominator first: 3/4 → 四分之三
    format!(
        "{}{}分之{}",
        sign_word(group(caps, 1), "负"),
        num2str(group(caps, 3)),
        num2str(group(caps, 2))
    )
}

fn rewrite_percentage(caps: &Captures) -> String {
    format!("{}百分之{}", sign_word(group(caps, 1), "负"), num2str(group(caps, 2)))
}

// ── Phone numbers ──

fn rewrite_mobile(caps: &Captures) -> String {
    let country = if group(caps, 1).is_empty() { "" } else { "中国，" };
    format!("{}{}", country, verbalize_digit(group(caps, 2), true))
}

fn rewrite_landline(caps: &Captures) -> String {
    let area = group(caps, 1);
    let body = verbalize_digit(group(caps, 2), true);
    if area.is_empty() {
        body
    } else {
        format!("{}{}{}", verbalize_digit(area, false), SPOKEN_COMMA, body)
    }
}

fn rewrite_uniform_number(caps: &Captures) -> String {
    format!(
        "四{c}零{c}零{c}{}{c}{}",
        verbalize_digit(group(caps, 1), true),
        verbalize_digit(group(caps, 2), true),
        c = SPOKEN_COMMA
    )
}

// ── Arithmetic and bare numbers ──

fn rewrite_subtraction(caps: &Captures) -> String {
    format!(
        "{}{}{}",
        group(caps, 1),
        math_symbol_word(group(caps, 8)),
        group(caps, 9)
    )
}

fn rewrite_math_symbol(caps: &Captures) -> String {
    math_symbol_word(group(caps, 0)).to_string()
}

fn rewrite_range(caps: &Captures) -> String {
    format!(
        "{}到{}",
        NUMBER.apply(group(caps, 1), DEFAULT_MAX_REWRITES),
        NUMBER.apply(group(caps, 2), DEFAULT_MAX_REWRITES)
    )
}

fn rewrite_number(caps: &Captures) -> String {
    let pure_decimal = group(caps, 5);
    if !pure_decimal.is_empty() {
        return num2str(pure_decimal);
    }
    format!("{}{}", sign_word(group(caps, 1), "负"), num2str(group(caps, 2)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Rules
// ─────────────────────────────────────────────────────────────────────────────

pub static DATE: MatchRule = MatchRule { name: "date", pattern: &RE_DATE, rewrite: rewrite_date };
pub static MONTH_DAY: MatchRule =
    MatchRule { name: "month_day", pattern: &RE_MONTH_DAY, rewrite: rewrite_month_day };
pub static DATE_NUMERIC: MatchRule =
    MatchRule { name: "date_numeric", pattern: &RE_DATE_NUMERIC, rewrite: rewrite_date_numeric };
pub static TIME_RANGE: MatchRule =
    MatchRule { name: "time_range", pattern: &RE_TIME_RANGE, rewrite: rewrite_time_range };
pub static TIME: MatchRule = MatchRule { name: "time", pattern: &RE_TIME, rewrite: rewrite_time };
pub static TILDE_RANGE: MatchRule =
    MatchRule { name: "tilde_range", pattern: &RE_TILDE_RANGE, rewrite: rewrite_tilde_range };
pub static TEMPERATURE: MatchRule =
    MatchRule { name: "temperature", pattern: &RE_TEMPERATURE, rewrite: rewrite_temperature };
pub static FRACTION: MatchRule =
    MatchRule { name: "fraction", pattern: &RE_FRACTION, rewrite: rewrite_fraction };
pub static PERCENTAGE: MatchRule =
    MatchRule { name: "percentage", pattern: &RE_PERCENTAGE, rewrite: rewrite_percentage };
pub static MOBILE: MatchRule = MatchRule { name: "mobile", pattern: &RE_MOBILE, rewrite: rewrite_mobile };
pub static LANDLINE: MatchRule =
    MatchRule { name: "landline", pattern: &RE_LANDLINE, rewrite: rewrite_landline };
pub static UNIFORM_NUMBER: MatchRule = MatchRule {
    name: "uniform_number",
    pattern: &RE_UNIFORM_NUMBER,
    rewrite: rewrite_uniform_number,
};
pub static SUBTRACTION: MatchRule =
    MatchRule { name: "subtraction", pattern: &RE_SUBTRACTION, rewrite: rewrite_subtraction };
pub static MATH_SYMBOL: MatchRule =
    MatchRule { name: "math_symbol", pattern: &RE_MATH_SYMBOL, rewrite: rewrite_math_symbol };
pub static RANGE: MatchRule = MatchRule { name: "range", pattern: &RE_RANGE, rewrite: rewrite_range };
pub static NUMBER: MatchRule = MatchRule { name: "number", pattern: &RE_NUMBER, rewrite: rewrite_number };

// ─────────────────────────────────────────────────────────────────────────────
// Public expanders
// ─────────────────────────────────────────────────────────────────────────────

/// `2021年5月19日` → `二零二一年五月十九日`, `5月19号` → `五月十九日`,
/// `2021-02-01` → `二零二一年二月一日`.
pub fn expand_dates(text: &str) -> String {
    let text = DATE.apply(text, DEFAULT_MAX_REWRITES);
    let text = MONTH_DAY.apply(&text, DEFAULT_MAX_REWRITES);
    DATE_NUMERIC.apply(&text, DEFAULT_MAX_REWRITES)
}

/// `8:30-12:30` → `八点半至十二点半`, `9:05:07` → `九点零五分零七秒`.
pub fn expand_times(text: &str) -> String {
    let text = TIME_RANGE.apply(text, DEFAULT_MAX_REWRITES);
    TIME.apply(&text, DEFAULT_MAX_REWRITES)
}

/// `10~20kg` → `10至20kg`; the numbers themselves are read by later stages.
pub fn expand_tilde_ranges(text: &str) -> String {
    TILDE_RANGE.apply(text, DEFAULT_MAX_REWRITES)
}

/// `-3.5℃` → `零下三点五度`.
pub fn expand_temperatures(text: &str) -> String {
    TEMPERATURE.apply(text, DEFAULT_MAX_REWRITES)
}

/// Literal measurement symbols (`m²` → `平方米`), one left-to-right pass per entry.
pub fn expand_measures(text: &str) -> String {
    MEASURES
        .iter()
        .fold(text.to_string(), |acc, (symbol, word)| acc.replace(symbol, word))
}

/// `3/4` → `四分之三`.
pub fn expand_fractions(text: &str) -> String {
    FRACTION.apply(text, DEFAULT_MAX_REWRITES)
}

/// `51%` → `百分之五十一`.
pub fn expand_percentages(text: &str) -> String {
    PERCENTAGE.apply(text, DEFAULT_MAX_REWRITES)
}

/// Mobile, landline and `400` numbers, read digit by digit.
pub fn expand_phone_numbers(text: &str) -> String {
    let text = MOBILE.apply(text, DEFAULT_MAX_REWRITES);
    let text = LANDLINE.apply(&text, DEFAULT_MAX_REWRITES);
    UNIFORM_NUMBER.apply(&text, DEFAULT_MAX_REWRITES)
}

/// `3-2` → `3减2`: a hyphen between two numbers is read as minus.
pub fn expand_subtractions(text: &str) -> String {
    SUBTRACTION.apply(text, DEFAULT_MAX_REWRITES)
}

/// `+ × ÷ > < = ≈ ≥ ≤` → spoken operator.
pub fn expand_math_symbols(text: &str) -> String {
    MATH_SYMBOL.apply(text, DEFAULT_MAX_REWRITES)
}

/// `1~5` → `一到五` for ranges no earlier stage consumed.
pub fn expand_ranges(text: &str) -> String {
    RANGE.apply(text, DEFAULT_MAX_REWRITES)
}

/// Any remaining signed integer or decimal.
pub fn expand_numbers(text: &str) -> String {
    NUMBER.apply(text, DEFAULT_MAX_REWRITES)
}

/// Circled digits, Greek letters, URL pieces and interjection homophones.
pub fn post_replace(text: &str) -> String {
    POST_REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates() {
        assert_eq!(expand_dates("2021年5月19日"), "二零二一年五月十九日");
        assert_eq!(expand_dates("21年"), "二一年");
        assert_eq!(expand_dates("5月19号"), "五月十九日");
        assert_eq!(expand_dates("2021-02-01"), "二零二一年二月一日");
        assert_eq!(expand_dates("2021/12/31"), "二零二一年十二月三十一日");
    }

    #[test]
    fn test_numeric_date_requires_same_separator() {
        let out = expand_dates("2021-02/01");
        assert_eq!(out, "2021-02/01");
    }

    #[test]
    fn test_times() {
        assert_eq!(expand_times("12:30"), "十二点半");
        assert_eq!(expand_times("9:05"), "九点零五分");
        assert_eq!(expand_times("9:05:07"), "九点零五分零七秒");
        assert_eq!(expand_times("08:00"), "八点");
        assert_eq!(expand_times("8:30-12:30"), "八点半至十二点半");
    }

    #[test]
    fn test_tilde_range() {
        assert_eq!(expand_tilde_ranges("10~20kg"), "10至20kg");
        assert_eq!(expand_tilde_ranges("10%~20%"), "10%至20%");
    }

    #[test]
    fn test_temperature() {
        assert_eq!(expand_temperatures("-3.5℃"), "零下三点五度");
        assert_eq!(expand_temperatures("25摄氏度"), "二十五摄氏度");
        assert_eq!(expand_temperatures("37°C"), "三十七度");
    }

    #[test]
    fn test_measures() {
        assert_eq!(expand_measures("5cm2"), "5平方厘米");
        assert_eq!(expand_measures("5m²和3m3"), "5平方米和3立方米");
    }

    #[test]
    fn test_fraction_and_percentage() {
        assert_eq!(expand_fractions("3/4"), "四分之三");
        assert_eq!(expand_fractions("-1/2"), "负二分之一");
        assert_eq!(expand_percentages("51%"), "百分之五十一");
        assert_eq!(expand_percentages("-0.5%"), "负百分之零点五");
    }

    #[test]
    fn test_mobile() {
        let out = expand_phone_numbers("+8613912345678");
        assert_eq!(out, "中国，幺三九幺二三四五六七八");
        let out = expand_phone_numbers("电话13912345678。");
        assert_eq!(out, "电话幺三九幺二三四五六七八。");
    }

    #[test]
    fn test_mobile_inside_longer_digit_run_is_ignored() {
        let out = expand_phone_numbers("913912345678123");
        assert_eq!(out, "913912345678123");
    }

    #[test]
    fn test_landline_and_uniform_inside_longer_digit_run_are_ignored() {
        assert_eq!(expand_phone_numbers("901012345678"), "901012345678");
        assert_eq!(expand_phone_numbers("4001234567890"), "4001234567890");
        // the area code is not carved out of 9010; only the subscriber part is read
        assert_eq!(expand_phone_numbers("9010-12345678"), "9010-幺二三四五六七八");
    }

    #[test]
    fn test_phone_patterns_skip_decimal_fractions() {
        assert_eq!(expand_phone_numbers("3.1415926"), "3.1415926");
        assert_eq!(expand_phone_numbers("0.13912345678"), "0.13912345678");
        assert_eq!(expand_phone_numbers("1.4001234567"), "1.4001234567");
    }

    #[test]
    fn test_landline() {
        assert_eq!(expand_phone_numbers("010-12345678"), "零一零，幺二三四五六七八");
        assert_eq!(expand_phone_numbers("0755 is"), "0755 is");
    }

    #[test]
    fn test_uniform_number() {
        let out = expand_phone_numbers("400-123-4567");
        assert_eq!(out, "四，零，零，幺二三，四五六七");
    }

    #[test]
    fn test_subtraction_and_math() {
        assert_eq!(expand_subtractions("3-2"), "3减2");
        assert_eq!(expand_math_symbols("1+1=2"), "1加1等于2");
        assert_eq!(expand_math_symbols("x≥y"), "x大于等于y");
    }

    #[test]
    fn test_range() {
        assert_eq!(expand_ranges("1~5"), "一到五");
        assert_eq!(expand_ranges("a1-5"), "a1-5");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(expand_numbers("-10.2"), "负十点二");
        assert_eq!(expand_numbers("100078"), "十万零七十八");
        assert_eq!(expand_numbers("共.5升"), "共零点五升");
        assert_eq!(expand_numbers("第3个"), "第三个");
    }

    #[test]
    fn test_post_replace() {
        assert_eq!(post_replace("①α"), "一阿尔法");
        assert_eq!(post_replace("km/h"), "km每h");
        assert_eq!(post_replace("a@b"), "a at b");
        assert_eq!(post_replace("www.x.com"), " www dot x dot come ");
        assert_eq!(post_replace("嗯"), "恩");
    }

    #[test]
    fn test_rewrite_cap_stops_runaway_rule() {
        let re = Regex::new("a").unwrap();
        let out = rewrite_until_stable("a", &re, "runaway", 3, |_| "aa".to_string());
        assert_eq!(out, "aaaa");
    }

    #[test]
    fn test_rewrite_cap_scales_with_input() {
        let text = vec!["7"; 300].join(" ");
        let out = rewrite_until_stable(&text, &RE_NUMBER, "number", 16, |caps| rewrite_number(caps));
        assert_eq!(out.matches('七').count(), 300);
        assert!(!out.contains('7'), "got: {}", out);
    }
}
