//! Digit string → spoken Chinese numerals.
//!
//! Everything here works on the decimal *string*, never on a parsed integer,
//! so digit runs of any length verbalise without overflow.

// ─────────────────────────────────────────────────────────────────────────────
// Lexicons
// ─────────────────────────────────────────────────────────────────────────────

/// Spoken word for each decimal digit, indexed by its value.
pub const DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Place-value magnitudes (number of trailing digits) and their unit words,
/// in ascending order.
pub const UNITS: [(usize, &str); 5] = [(1, "十"), (2, "百"), (3, "千"), (4, "万"), (8, "亿")];

/// Reading of the digit one in phone numbers and IDs (avoids 一/七 confusion).
pub const ALT_ONE: &str = "幺";

/// Decimal point.
pub const POINT: &str = "点";

const ZERO: &str = DIGITS[0];
const ONE: &str = DIGITS[1];
const TEN: &str = UNITS[0].1;

fn digit_word(c: char) -> Option<&'static str> {
    c.to_digit(10).map(|d| DIGITS[d as usize])
}

/// Strip leading zeros but always keep the last character.
fn strip_leading_zeros(s: &str) -> &str {
    let trimmed = s.trim_start_matches('0');
    if trimmed.is_empty() && !s.is_empty() {
        &s[s.len() - 1..]
    } else {
        trimmed
    }
}

fn is_all_zeros(s: &str) -> bool {
    s.bytes().all(|b| b == b'0')
}

// ─────────────────────────────────────────────────────────────────────────────
// Cardinal grouping
// ─────────────────────────────────────────────────────────────────────────────

/// Recursive place-value split over an ASCII digit string.
///
/// The split point is measured on `value` itself (leading zeros included), so
/// a suffix like `"0050"` keeps its zero run and reads `零五十`.
fn group_symbols(value: &str, use_zero: bool) -> Vec<&'static str> {
    let stripped = strip_leading_zeros(value);
    let n = stripped.len();
    if n == 0 {
        return Vec::new();
    }

    if n == 1 {
        let word = stripped.chars().next().and_then(digit_word).unwrap_or(ZERO);
        return if use_zero && n < value.len() {
            vec![ZERO, word]
        } else {
            vec![word]
        };
    }

    let (magnitude, unit) = UNITS
        .iter()
        .rev()
        .find(|(m, _)| *m < n)
        .copied()
        .unwrap_or(UNITS[0]);

    let (head, tail) = value.split_at(value.len() - magnitude);
    let mut symbols = group_symbols(head, use_zero);
    symbols.push(unit);
    if !is_all_zeros(tail) {
        symbols.extend(group_symbols(tail, use_zero));
    }
    symbols
}

/// Read a digit string as a Chinese cardinal number.
///
/// `"12"` → `十二`, `"110"` → `一百一十`, `"10050"` → `一万零五十`.
/// An all-zero string reads `零`; an empty string reads as nothing.
/// Non-digit characters are ignored.
pub fn verbalize_cardinal(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }
    if is_all_zeros(&digits) {
        return ZERO.to_string();
    }

    let mut symbols = group_symbols(&digits, true);
    // 十二, not 一十二; only when 一 is directly followed by 十
    if symbols.len() >= 2 && symbols[0] == ONE && symbols[1] == TEN {
        symbols.remove(0);
    }
    symbols.concat()
}

/// Read each digit independently.  With `alt_one`, every 一 becomes 幺.
pub fn verbalize_digit(value: &str, alt_one: bool) -> String {
    value
        .chars()
        .filter_map(|c| match (c, alt_one) {
            ('1', true) => Some(ALT_ONE),
            _ => digit_word(c),
        })
        .collect()
}

/// Read a decimal literal: cardinal integer part, then `点` and the
/// fractional digits one by one.  Trailing fractional zeros are dropped.
///
/// `"3.14"` → `三点一四`, `".5"` → `零点五`, `"2.0"` → `二`.
pub fn num2str(value: &str) -> String {
    let (integer, fraction) = value.split_once('.').unwrap_or((value, ""));
    let mut result = verbalize_cardinal(integer);

    let fraction = fraction.trim_end_matches('0');
    if !fraction.is_empty() {
        if result.is_empty() {
            result.push_str(ZERO);
        }
        result.push_str(POINT);
        result.push_str(&verbalize_digit(fraction, false));
    }
    result
}

/// Minute/second field of a clock time: a leading zero is spoken (`05` → `零五`).
pub fn time_num2str(value: &str) -> String {
    let mut result = num2str(value.trim_start_matches('0'));
    if value.starts_with('0') {
        result.insert_str(0, ZERO);
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbalize_cardinal_small() {
        assert_eq!(verbalize_cardinal("0"), "零");
        assert_eq!(verbalize_cardinal("7"), "七");
        assert_eq!(verbalize_cardinal("10"), "十");
        assert_eq!(verbalize_cardinal("12"), "十二");
        assert_eq!(verbalize_cardinal("20"), "二十");
        assert_eq!(verbalize_cardinal("110"), "一百一十");
        assert_eq!(verbalize_cardinal("100"), "一百");
    }

    #[test]
    fn test_verbalize_cardinal_zero_runs() {
        assert_eq!(verbalize_cardinal("1005"), "一千零五");
        assert_eq!(verbalize_cardinal("1010"), "一千零一十");
        assert_eq!(verbalize_cardinal("10000"), "一万");
        assert_eq!(verbalize_cardinal("10050"), "一万零五十");
        assert_eq!(verbalize_cardinal("100000000"), "一亿");
    }

    #[test]
    fn test_verbalize_cardinal_large() {
        assert_eq!(
            verbalize_cardinal("123456789012"),
            "一千二百三十四亿五千六百七十八万九千零一十二"
        );
        let huge = format!("1{}", "0".repeat(40));
        let out = verbalize_cardinal(&huge);
        assert!(out.starts_with("一") && out.ends_with("亿"), "got: {}", out);
    }

    #[test]
    fn test_verbalize_cardinal_edge_cases() {
        assert_eq!(verbalize_cardinal(""), "");
        assert_eq!(verbalize_cardinal("000"), "零");
        // a stripped leading zero is spoken
        assert_eq!(verbalize_cardinal("07"), "零七");
    }

    #[test]
    fn test_verbalize_digit() {
        assert_eq!(verbalize_digit("2021", false), "二零二一");
        assert_eq!(verbalize_digit("13912345678", true), "幺三九幺二三四五六七八");
        assert_eq!(verbalize_digit("", true), "");
    }

    #[test]
    fn test_num2str() {
        assert_eq!(num2str("3.14"), "三点一四");
        assert_eq!(num2str("0.50"), "零点五");
        assert_eq!(num2str(".5"), "零点五");
        assert_eq!(num2str("2.0"), "二");
        assert_eq!(num2str("41"), "四十一");
        assert_eq!(num2str(""), "");
    }

    #[test]
    fn test_time_num2str() {
        assert_eq!(time_num2str("05"), "零五");
        assert_eq!(time_num2str("45"), "四十五");
        assert_eq!(time_num2str("00"), "零");
    }
}
