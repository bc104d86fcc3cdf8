//! Property-based tests for tfusage
//!
//! These tests use proptest to generate random resources and answers and
//! verify that the engine's invariants hold across a wide range of inputs.

use proptest::prelude::*;
use tfusage::usage::extract::{extract_number, extract_number_near};
use tfusage::usage::{ResourceUsage, MAX_MONTHLY_HOURS};
use tfusage::{generate_usage, Resource};

fn resource_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("aws_instance".to_string()),
        Just("aws_lambda_function".to_string()),
        Just("aws_dynamodb_table".to_string()),
        "[a-z_]{0,20}",
    ]
}

fn resource() -> impl Strategy<Value = Resource> {
    ("[a-z0-9_.]{0,12}", resource_type()).prop_map(|(name, ty)| Resource::new(name, ty))
}

proptest! {
    #[test]
    fn test_compute_hours_never_exceed_month(answer in ".*") {
        let resources = vec![Resource::new("web", "aws_instance")];
        let usage = generate_usage(&resources, &[answer]);
        match usage.get("web") {
            Some(ResourceUsage::Compute(c)) => prop_assert!(c.monthly_hours <= MAX_MONTHLY_HOURS),
            other => prop_assert!(false, "expected compute usage, got {:?}", other),
        }
    }

    #[test]
    fn test_compute_hours_with_numbers(hours in 0u64..100_000u64) {
        let resources = vec![Resource::new("web", "aws_instance")];
        let usage = generate_usage(&resources, &[format!("{} hours", hours)]);
        let expected = hours.min(MAX_MONTHLY_HOURS);
        prop_assert_eq!(
            usage.get("web"),
            Some(&ResourceUsage::Compute(tfusage::usage::ComputeUsage { monthly_hours: expected }))
        );
    }

    #[test]
    fn test_generation_is_idempotent(
        resources in prop::collection::vec(resource(), 0..8),
        answers in prop::collection::vec(".{0,40}", 0..8)
    ) {
        let first = generate_usage(&resources, &answers);
        let second = generate_usage(&resources, &answers);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_output_keys_are_named_resources_with_answers(
        resources in prop::collection::vec(resource(), 0..8),
        answers in prop::collection::vec(".{0,40}", 0..8)
    ) {
        let usage = generate_usage(&resources, &answers);

        let mut expected: Vec<&str> = resources
            .iter()
            .take(answers.len())
            .filter(|r| !r.name.is_empty())
            .map(|r| r.name.as_str())
            .collect();
        expected.sort();
        expected.dedup();

        let keys: Vec<&str> = usage.iter().map(|(k, _)| k.as_str()).collect();
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn test_usage_always_serializes(
        resources in prop::collection::vec(resource(), 0..8),
        answers in prop::collection::vec(".{0,40}", 0..8)
    ) {
        let usage = generate_usage(&resources, &answers);
        let value = serde_json::to_value(&usage).unwrap();
        prop_assert!(value.is_object());
    }

    #[test]
    fn test_plain_numbers_roundtrip(n in 10u64..1_000_000_000u64) {
        prop_assert_eq!(extract_number(&format!("{} requests", n)), Some(n));
    }

    #[test]
    fn test_k_suffix_scales(n in 1u64..1_000_000u64) {
        prop_assert_eq!(extract_number(&format!("{}k requests", n)), Some(n * 1_000));
    }

    #[test]
    fn test_million_scales(n in 1u64..1_000_000u64) {
        prop_assert_eq!(extract_number(&format!("{} million requests", n)), Some(n * 1_000_000));
    }

    #[test]
    fn test_near_keyword_finds_value_before_or_after(n in 1u64..1_000_000u64) {
        prop_assert_eq!(extract_number_near(&format!("{} reads", n), &["read"]), Some(n));
        prop_assert_eq!(extract_number_near(&format!("reads: {}", n), &["read"]), Some(n));
    }

    #[test]
    fn test_extractors_never_panic(text in "\\PC*") {
        let _ = extract_number(&text);
        let _ = extract_number_near(&text, &["read", "write", "storage", "gb"]);
    }
}
