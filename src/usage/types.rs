//! Type definitions for usage assumptions
//!
//! Shared types produced by the usage engine and by template application.
//! Everything here serializes to the `name → {parameter: integer}` JSON shape
//! that cost calculators consume.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Usage parameter name → value, e.g. `{"monthly_hours": 720}`
pub type UsageParams = BTreeMap<String, u64>;

/// Hours in a 30-day month of continuous operation.
pub const MAX_MONTHLY_HOURS: u64 = 720;

/// Hours in a month of business-hours operation (8h × 20 workdays).
pub const BUSINESS_MONTHLY_HOURS: u64 = 160;

/// Resource kinds the engine knows how to schedule, keyed by Terraform type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Compute,
    Function,
    Table,
    Other,
}

impl ResourceKind {
    pub fn from_resource_type(resource_type: &str) -> Self {
        match resource_type {
            "aws_instance" => ResourceKind::Compute,
            "aws_lambda_function" => ResourceKind::Function,
            "aws_dynamodb_table" => ResourceKind::Table,
            _ => ResourceKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComputeUsage {
    pub monthly_hours: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionUsage {
    pub monthly_requests: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableUsage {
    pub monthly_read_request_units: u64,
    pub monthly_write_request_units: u64,
    pub storage_gb: u64,
}

/// Marker for resources that need no usage schedule. Serializes as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NoSchedule {}

/// Usage assumptions for a single resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResourceUsage {
    Compute(ComputeUsage),
    Function(FunctionUsage),
    Table(TableUsage),
    Unscheduled(NoSchedule),
}

impl ResourceUsage {
    /// Flatten into the generic parameter map used by templates and output.
    pub fn to_params(&self) -> UsageParams {
        let mut params = UsageParams::new();
        match self {
            ResourceUsage::Compute(c) => {
                params.insert("monthly_hours".to_string(), c.monthly_hours);
            }
            ResourceUsage::Function(f) => {
                params.insert("monthly_requests".to_string(), f.monthly_requests);
            }
            ResourceUsage::Table(t) => {
                params.insert(
                    "monthly_read_request_units".to_string(),
                    t.monthly_read_request_units,
                );
                params.insert(
                    "monthly_write_request_units".to_string(),
                    t.monthly_write_request_units,
                );
                params.insert("storage_gb".to_string(), t.storage_gb);
            }
            ResourceUsage::Unscheduled(_) => {}
        }
        params
    }
}

/// Resource name → usage assumptions, as returned by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UsageRecord(BTreeMap<String, ResourceUsage>);

impl UsageRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert usage for a resource, replacing any earlier entry of the same name.
    pub fn insert(&mut self, name: String, usage: ResourceUsage) -> Option<ResourceUsage> {
        self.0.insert(name, usage)
    }

    pub fn get(&self, name: &str) -> Option<&ResourceUsage> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResourceUsage)> {
        self.0.iter()
    }

    /// Convert into the generic `name → params` form shared with templates.
    pub fn to_params(&self) -> BTreeMap<String, UsageParams> {
        self.0
            .iter()
            .map(|(name, usage)| (name.clone(), usage.to_params()))
            .collect()
    }
}

/// Fallback values used when an answer gives no usable number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageDefaults {
    pub monthly_hours: u64,
    pub monthly_requests: u64,
    pub read_request_units: u64,
    pub write_request_units: u64,
    pub storage_gb: u64,
}

impl Default for UsageDefaults {
    fn default() -> Self {
        Self {
            monthly_hours: BUSINESS_MONTHLY_HOURS,
            monthly_requests: 1_000_000,
            read_request_units: 1_000_000,
            write_request_units: 100_000,
            storage_gb: 10,
        }
    }
}
