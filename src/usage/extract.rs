//! Numeric extraction from free-text answers
//!
//! Two primitives are shared by all per-type extractors:
//!
//! - [`extract_number`]: the first quantity in the text, honouring
//!   `million`, `m` and `k` suffixes
//! - [`extract_number_near`]: a quantity written next to a keyword, either
//!   before it ("500 reads") or after it ("reads: 500"). [`KeywordMatcher`]
//!   is the precompiled form for keyword lists used repeatedly
//!
//! Both return `None` when nothing usable is found; callers pick their own
//! default.
//!
//! ## Suffix scaling
//!
//! `extract_number` detects unit suffixes across the whole answer rather than
//! on the matched numeral: "5k users now, a million later" yields 5,000,000.
//! Existing usage answers were scored this way, so the behavior is kept.
//! `extract_number_near` scales by the suffix written on the matched numeral
//! itself, so "500k reads and 50GB storage" resolves storage to 50.

use regex::Regex;
use std::sync::OnceLock;

const MILLION: u64 = 1_000_000;
const THOUSAND: u64 = 1_000;

static MILLION_WORD: OnceLock<Option<Regex>> = OnceLock::new();
static M_SUFFIX: OnceLock<Option<Regex>> = OnceLock::new();
static K_SUFFIX: OnceLock<Option<Regex>> = OnceLock::new();
static GROUPED: OnceLock<Option<Regex>> = OnceLock::new();
static BARE_DIGITS: OnceLock<Option<Regex>> = OnceLock::new();

fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

/// "5 million"
fn million_word() -> Option<&'static Regex> {
    cached(&MILLION_WORD, r"(\d+)\s*million")
}

/// "5m", "5 m"
fn m_suffix() -> Option<&'static Regex> {
    cached(&M_SUFFIX, r"(\d+)\s*m\b")
}

/// "50k", "50 k"
fn k_suffix() -> Option<&'static Regex> {
    cached(&K_SUFFIX, r"(\d+)\s*k\b")
}

/// "5,000" or "5000"
fn grouped() -> Option<&'static Regex> {
    cached(&GROUPED, r"(\d{1,3}(?:,\d{3})+|\d{2,})")
}

fn bare_digits() -> Option<&'static Regex> {
    cached(&BARE_DIGITS, r"\d+")
}

/// Parse a run of digits, ignoring thousands separators.
///
/// Numerals that do not fit in a `u64` are treated as absent.
fn parse_digits(digits: &str) -> Option<u64> {
    digits.replace(',', "").parse::<u64>().ok()
}

fn first_capture(re: &Regex, text: &str) -> Option<u64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_digits(m.as_str()))
}

/// Multiplier implied by unit markers anywhere in the (lower-cased) text.
fn text_scale(lower: &str) -> u64 {
    let has_m = m_suffix().is_some_and(|re| re.is_match(lower));
    let has_k = k_suffix().is_some_and(|re| re.is_match(lower));

    if lower.contains("million") || has_m {
        MILLION
    } else if has_k {
        THOUSAND
    } else {
        1
    }
}

fn suffix_scale(suffix: Option<&str>) -> u64 {
    match suffix {
        Some("million") | Some("m") => MILLION,
        Some("k") => THOUSAND,
        _ => 1,
    }
}

/// Extract the first quantity mentioned in `text`.
///
/// Patterns are tried in order, first match wins:
/// 1. `<digits> million`
/// 2. `<digits>m`
/// 3. `<digits>k`
/// 4. a plain or comma-grouped number (`5,000`, `5000`)
/// 5. any run of digits, taken verbatim
///
/// The numeral matched by 1–4 is scaled by the suffix markers found anywhere
/// in the text (see module docs).
pub fn extract_number(text: &str) -> Option<u64> {
    let lower = text.to_lowercase();

    let structured = [million_word(), m_suffix(), k_suffix(), grouped()];
    for re in structured.into_iter().flatten() {
        if let Some(value) = first_capture(re, &lower) {
            return Some(value.saturating_mul(text_scale(&lower)));
        }
    }

    bare_digits()
        .and_then(|re| re.find(&lower))
        .and_then(|m| parse_digits(m.as_str()))
}

/// Quantity-near-keyword patterns, compiled once for a fixed keyword list.
///
/// Keywords are tried in order and the first one with a match wins. For each
/// keyword the number may precede it (`500 reads`, `500k reads`) or follow it
/// after separators (`reads: 500`, `reads: 5m`). A keyword never matches inside
/// a longer word, so `read` finds "reads" but not "already". A `k`, `m` or
/// `million` suffix on the matched numeral scales it.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    patterns: Vec<[Option<Regex>; 2]>,
}

impl KeywordMatcher {
    pub fn new(keywords: &[&str]) -> Self {
        let patterns = keywords
            .iter()
            .map(|keyword| {
                let kw = regex::escape(&keyword.to_lowercase());
                [
                    // "500 reads", "500k reads", "50gb"
                    Regex::new(&format!(r"(\d+)\s*(million|m|k)?[\s,]*{}", kw)).ok(),
                    // "reads: 500", "reads: 500k", "writes, 2m"
                    Regex::new(&format!(
                        r"\b{}[a-z]*[\s:,]*(\d+)(?:\s*(million|m|k)\b)?",
                        kw
                    ))
                    .ok(),
                ]
            })
            .collect();
        Self { patterns }
    }

    /// Extract the quantity next to the first matching keyword.
    pub fn find(&self, text: &str) -> Option<u64> {
        let lower = text.to_lowercase();
        self.patterns
            .iter()
            .find_map(|pair| pair.iter().flatten().find_map(|re| scaled_capture(re, &lower)))
    }
}

fn scaled_capture(re: &Regex, lower: &str) -> Option<u64> {
    let caps = re.captures(lower)?;
    let value = caps.get(1).and_then(|m| parse_digits(m.as_str()))?;
    let scale = suffix_scale(caps.get(2).map(|m| m.as_str()));
    Some(value.saturating_mul(scale))
}

/// Extract a quantity written next to one of `keywords`.
///
/// Compiles the keyword patterns on every call; hot paths should hold a
/// [`KeywordMatcher`] instead.
pub fn extract_number_near(text: &str, keywords: &[&str]) -> Option<u64> {
    KeywordMatcher::new(keywords).find(text)
}
