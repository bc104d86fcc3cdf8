//! Usage inference engine
//!
//! Turns free-text answers about how a resource is used into the numeric
//! usage assumptions a cost calculator needs.
//!
//! ## Module Organization
//!
//! - `types`: usage schemas, the output record and configurable defaults
//! - `extract`: numeric extraction primitives (suffix scaling, keyword proximity)
//! - `extractors`: one extractor per supported resource type
//! - `questions`: the question to ask for each resource, aligned with answers
//!
//! ## Dispatch
//!
//! Resources and answers are paired by position. A resource without an
//! answer at its index is left out of the result; answers past the last
//! resource are ignored. Resources without a name are skipped. The resource
//! type tag selects the extractor:
//!
//! | Type                  | Parameters                                              |
//! |-----------------------|---------------------------------------------------------|
//! | `aws_instance`        | `monthly_hours` (0..=720)                               |
//! | `aws_lambda_function` | `monthly_requests`                                      |
//! | `aws_dynamodb_table`  | `monthly_read_request_units`, `monthly_write_request_units`, `storage_gb` |
//! | anything else         | `{}`                                                    |
//!
//! The engine holds no mutable state and performs no I/O, so one instance can
//! be shared freely between threads.

pub mod extract;
pub mod extractors;
pub mod questions;
pub mod types;

pub use questions::{question_for, questions};

pub use types::{
    ComputeUsage, FunctionUsage, NoSchedule, ResourceKind, ResourceUsage, TableUsage,
    UsageDefaults, UsageParams, UsageRecord, MAX_MONTHLY_HOURS,
};

use crate::resource::Resource;
use tracing::debug;

/// Rule-based usage generator
#[derive(Debug, Clone, Default)]
pub struct UsageEngine {
    defaults: UsageDefaults,
}

impl UsageEngine {
    pub fn new(defaults: UsageDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &UsageDefaults {
        &self.defaults
    }

    /// Build usage assumptions for `resources` from positionally aligned `answers`.
    pub fn generate_usage<S: AsRef<str>>(&self, resources: &[Resource], answers: &[S]) -> UsageRecord {
        let mut record = UsageRecord::new();

        if answers.len() < resources.len() {
            debug!(
                "{} of {} resources have no answer and will be skipped",
                resources.len() - answers.len(),
                resources.len()
            );
        }

        for (resource, answer) in resources.iter().zip(answers) {
            if resource.name.is_empty() {
                debug!("Skipping unnamed {} resource", resource.resource_type);
                continue;
            }

            let usage = self.infer(&resource.resource_type, answer.as_ref());
            debug!(
                "Inferred usage for {} ({}): {:?}",
                resource.name, resource.resource_type, usage
            );

            if record.insert(resource.name.clone(), usage).is_some() {
                debug!("Duplicate resource name {}, keeping the later answer", resource.name);
            }
        }

        record
    }

    /// Usage assumptions for a single resource type and answer.
    pub fn infer(&self, resource_type: &str, answer: &str) -> ResourceUsage {
        match ResourceKind::from_resource_type(resource_type) {
            ResourceKind::Compute => {
                ResourceUsage::Compute(extractors::compute_usage(answer, &self.defaults))
            }
            ResourceKind::Function => {
                ResourceUsage::Function(extractors::function_usage(answer, &self.defaults))
            }
            ResourceKind::Table => {
                ResourceUsage::Table(extractors::table_usage(answer, &self.defaults))
            }
            ResourceKind::Other => ResourceUsage::Unscheduled(NoSchedule {}),
        }
    }
}

/// Build usage assumptions with the built-in defaults.
pub fn generate_usage<S: AsRef<str>>(resources: &[Resource], answers: &[S]) -> UsageRecord {
    UsageEngine::default().generate_usage(resources, answers)
}
