//! Per-resource-type usage extractors
//!
//! Each extractor turns one free-text answer into the usage schema of its
//! resource type. Extractors never fail: anything they cannot read falls
//! back to the configured [`UsageDefaults`].

use crate::usage::extract::{extract_number, KeywordMatcher};
use crate::usage::types::{
    ComputeUsage, FunctionUsage, TableUsage, UsageDefaults, BUSINESS_MONTHLY_HOURS,
    MAX_MONTHLY_HOURS,
};
use std::sync::OnceLock;
use tracing::debug;

/// Phrases meaning the instance never stops.
const CONTINUOUS_PHRASES: &[&str] = &["24/7", "24 7", "all day", "always", "constantly", "constant"];

/// Phrases meaning the instance follows a working day.
const BUSINESS_PHRASES: &[&str] = &["work", "business", "office", "weekday"];

const STORAGE_KEYWORDS: &[&str] = &["storage", "gb"];

static READ_MATCHER: OnceLock<KeywordMatcher> = OnceLock::new();
static WRITE_MATCHER: OnceLock<KeywordMatcher> = OnceLock::new();
static STORAGE_MATCHER: OnceLock<KeywordMatcher> = OnceLock::new();

fn read_matcher() -> &'static KeywordMatcher {
    READ_MATCHER.get_or_init(|| KeywordMatcher::new(&["read"]))
}

fn write_matcher() -> &'static KeywordMatcher {
    WRITE_MATCHER.get_or_init(|| KeywordMatcher::new(&["write"]))
}

fn storage_matcher() -> &'static KeywordMatcher {
    STORAGE_MATCHER.get_or_init(|| KeywordMatcher::new(STORAGE_KEYWORDS))
}

fn contains_any(lower: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| lower.contains(phrase))
}

/// Monthly running hours for an EC2-style instance.
///
/// Continuous-operation phrasing wins over business-hours phrasing, which
/// wins over any number in the answer. Numbers above 720 are clamped.
pub fn compute_usage(answer: &str, defaults: &UsageDefaults) -> ComputeUsage {
    let lower = answer.to_lowercase();

    let monthly_hours = if contains_any(&lower, CONTINUOUS_PHRASES) {
        MAX_MONTHLY_HOURS
    } else if contains_any(&lower, BUSINESS_PHRASES) {
        BUSINESS_MONTHLY_HOURS
    } else {
        match extract_number(answer) {
            Some(hours) => {
                if hours > MAX_MONTHLY_HOURS {
                    debug!(
                        "Clamping {} monthly hours to {}",
                        hours, MAX_MONTHLY_HOURS
                    );
                }
                hours.min(MAX_MONTHLY_HOURS)
            }
            None => defaults.monthly_hours.min(MAX_MONTHLY_HOURS),
        }
    };

    ComputeUsage { monthly_hours }
}

/// Monthly invocations for a Lambda-style function. Not clamped.
pub fn function_usage(answer: &str, defaults: &UsageDefaults) -> FunctionUsage {
    FunctionUsage {
        monthly_requests: extract_number(answer).unwrap_or(defaults.monthly_requests),
    }
}

/// Read/write request units and storage for a DynamoDB-style table.
///
/// The three fields are read independently; each keeps its default unless
/// its keyword is present with a number next to it.
pub fn table_usage(answer: &str, defaults: &UsageDefaults) -> TableUsage {
    let lower = answer.to_lowercase();

    let mut usage = TableUsage {
        monthly_read_request_units: defaults.read_request_units,
        monthly_write_request_units: defaults.write_request_units,
        storage_gb: defaults.storage_gb,
    };

    if lower.contains("read") {
        if let Some(reads) = read_matcher().find(answer) {
            usage.monthly_read_request_units = reads;
        }
    }

    if lower.contains("write") {
        if let Some(writes) = write_matcher().find(answer) {
            usage.monthly_write_request_units = writes;
        }
    }

    if contains_any(&lower, STORAGE_KEYWORDS) {
        if let Some(storage) = storage_matcher().find(answer) {
            usage.storage_gb = storage;
        }
    }

    usage
}
