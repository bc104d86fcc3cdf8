//! End-to-end tests for usage generation
//!
//! Exercises the public engine API the way an HTTP handler or the CLI would:
//! resources in, positionally aligned answers in, JSON-ready usage out.

use serde_json::json;
use tfusage::resource::parse_resources;
use tfusage::usage::{UsageDefaults, UsageEngine};
use tfusage::{generate_usage, Resource};

fn sample_resources() -> Vec<Resource> {
    vec![
        Resource::new("web", "aws_instance"),
        Resource::new("fn", "aws_lambda_function"),
        Resource::new("tbl", "aws_dynamodb_table"),
    ]
}

#[test]
fn test_end_to_end_scenario() {
    let answers = [
        "24/7 operation",
        "About 2 million requests per month",
        "500k reads, 100k writes, and 50GB storage",
    ];

    let usage = generate_usage(&sample_resources(), &answers);

    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({
            "web": {"monthly_hours": 720},
            "fn": {"monthly_requests": 2000000},
            "tbl": {
                "monthly_read_request_units": 500000,
                "monthly_write_request_units": 100000,
                "storage_gb": 50
            }
        })
    );
}

#[test]
fn test_unknown_type_scenario() {
    let resources = vec![Resource::new("x", "unknown_type")];
    let usage = generate_usage(&resources, &["whatever"]);
    assert_eq!(serde_json::to_value(&usage).unwrap(), json!({"x": {}}));
}

#[test]
fn test_continuous_beats_business_hours() {
    let resources = vec![Resource::new("web", "aws_instance")];
    let usage = generate_usage(
        &resources,
        &["works during business hours, but actually runs 24/7"],
    );
    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({"web": {"monthly_hours": 720}})
    );
}

#[test]
fn test_table_defaults_when_unsure() {
    let resources = vec![Resource::new("tbl", "aws_dynamodb_table")];
    let usage = generate_usage(&resources, &["not sure yet"]);
    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({"tbl": {
            "monthly_read_request_units": 1000000,
            "monthly_write_request_units": 100000,
            "storage_gb": 10
        }})
    );
}

#[test]
fn test_fewer_answers_than_resources() {
    let usage = generate_usage(&sample_resources(), &["office hours", "5k"]);
    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({
            "web": {"monthly_hours": 160},
            "fn": {"monthly_requests": 5000}
        })
    );
}

#[test]
fn test_owned_string_answers() {
    let answers: Vec<String> = vec!["300 hours per month".to_string()];
    let usage = generate_usage(&[Resource::new("web", "aws_instance")], &answers);
    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({"web": {"monthly_hours": 300}})
    );
}

#[test]
fn test_infracost_breakdown_to_usage() {
    let breakdown = r#"{
        "projects": [{
            "breakdown": {
                "resources": [
                    {"name": "aws_instance.web_server", "resourceType": "aws_instance", "monthlyCost": "60.74"},
                    {"name": "aws_lambda_function.processor", "resourceType": "aws_lambda_function"},
                    {"name": "aws_s3_bucket.assets", "resourceType": "aws_s3_bucket"}
                ]
            }
        }]
    }"#;
    let resources = parse_resources(breakdown).unwrap();
    let usage = generate_usage(&resources, &["weekdays only", "3m requests", "lots"]);

    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({
            "aws_instance.web_server": {"monthly_hours": 160},
            "aws_lambda_function.processor": {"monthly_requests": 3000000},
            "aws_s3_bucket.assets": {}
        })
    );
}

#[test]
fn test_unnamed_entries_keep_answer_positions() {
    let resources = parse_resources(
        r#"[
            {"resource_type": "aws_instance"},
            "garbage",
            {"name": "fn", "resource_type": "aws_lambda_function"}
        ]"#,
    )
    .unwrap();
    assert_eq!(resources.len(), 3);

    let usage = generate_usage(&resources, &["24/7", "ignored", "3m requests"]);
    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({"fn": {"monthly_requests": 3000000}})
    );
}

#[test]
fn test_configured_defaults_apply_only_without_numbers() {
    let engine = UsageEngine::new(UsageDefaults {
        monthly_hours: 40,
        monthly_requests: 250,
        read_request_units: 7,
        write_request_units: 8,
        storage_gb: 9,
    });

    let usage = engine.generate_usage(&sample_resources(), &["?", "?", "?"]);
    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({
            "web": {"monthly_hours": 40},
            "fn": {"monthly_requests": 250},
            "tbl": {
                "monthly_read_request_units": 7,
                "monthly_write_request_units": 8,
                "storage_gb": 9
            }
        })
    );

    let usage = engine.generate_usage(&sample_resources(), &["always", "12 requests", "reads: 3"]);
    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({
            "web": {"monthly_hours": 720},
            "fn": {"monthly_requests": 12},
            "tbl": {
                "monthly_read_request_units": 3,
                "monthly_write_request_units": 8,
                "storage_gb": 9
            }
        })
    );
}

#[test]
fn test_engine_shared_between_threads() {
    let engine = UsageEngine::default();
    let resources = sample_resources();
    let answers = ["always", "1 million", "storage: 5"];

    let expected = engine.generate_usage(&resources, &answers);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.generate_usage(&resources, &answers)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_questions_line_up_with_answers() {
    let resources = parse_resources(
        r#"[
            {"name": "web", "resource_type": "aws_instance"},
            {"name": "bucket", "resource_type": "aws_s3_bucket"},
            {"name": "tbl", "resource_type": "aws_dynamodb_table"}
        ]"#,
    )
    .unwrap();

    let questions = tfusage::usage::questions(&resources);
    assert_eq!(questions.len(), resources.len());
    assert!(questions[1].is_empty());

    // Answer only where a question was asked; blank slots keep positions
    let answers: Vec<&str> = questions
        .iter()
        .zip(["office hours", "", "2k reads, 20GB storage"])
        .map(|(q, a)| if q.is_empty() { "" } else { a })
        .collect();
    let usage = generate_usage(&resources, &answers);

    assert_eq!(
        serde_json::to_value(&usage).unwrap(),
        json!({
            "web": {"monthly_hours": 160},
            "bucket": {},
            "tbl": {
                "monthly_read_request_units": 2000,
                "monthly_write_request_units": 100000,
                "storage_gb": 20
            }
        })
    );
}
