//! Questions whose answers feed the usage engine
//!
//! Answers are paired with resources by position, so [`questions`] returns one
//! entry per resource in the same order. Resources that need no answer (no
//! name, or a type with no usage schedule) get an empty string; whatever is
//! answered at that position is ignored.

use crate::resource::Resource;
use crate::usage::types::ResourceKind;

/// The question asked for a resource kind, if it needs one.
pub fn question_for(kind: ResourceKind) -> Option<&'static str> {
    match kind {
        ResourceKind::Compute => Some("Are your EC2 instances running 24/7 or only during work hours?"),
        ResourceKind::Function => {
            Some("Roughly how many invocations per month for your Lambda function?")
        }
        ResourceKind::Table => Some(
            "Roughly how many reads and writes per month does your DynamoDB table serve, and how many GB does it store?",
        ),
        ResourceKind::Other => None,
    }
}

/// One question per resource, aligned with `resources`.
pub fn questions(resources: &[Resource]) -> Vec<String> {
    resources
        .iter()
        .map(|resource| {
            if resource.name.is_empty() {
                return String::new();
            }
            question_for(ResourceKind::from_resource_type(&resource.resource_type))
                .map(str::to_string)
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_per_supported_type() {
        let resources = vec![
            Resource::new("web", "aws_instance"),
            Resource::new("fn", "aws_lambda_function"),
            Resource::new("tbl", "aws_dynamodb_table"),
        ];
        let asked = questions(&resources);
        assert_eq!(asked.len(), 3);
        assert!(asked[0].contains("24/7"));
        assert!(asked[1].contains("invocations"));
        assert!(asked[2].contains("reads") && asked[2].contains("GB"));
    }

    #[test]
    fn test_unsupported_and_unnamed_get_blank_slots() {
        let resources = vec![
            Resource::new("bucket", "aws_s3_bucket"),
            Resource::new("", "aws_instance"),
            Resource::new("web", "aws_instance"),
        ];
        let asked = questions(&resources);
        assert_eq!(asked.len(), 3);
        assert!(asked[0].is_empty());
        assert!(asked[1].is_empty());
        assert!(!asked[2].is_empty());
    }

    #[test]
    fn test_no_resources_no_questions() {
        assert!(questions(&[]).is_empty());
    }

    #[test]
    fn test_other_kind_has_no_question() {
        assert_eq!(question_for(ResourceKind::Other), None);
    }
}
