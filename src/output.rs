//! Rendering of usage assumptions and templates for the terminal
//!
//! `json` output is the same document a cost calculator consumes;
//! `text` output is a table for humans.

use crate::error::Result;
use crate::resource::Resource;
use crate::templates::UsageTemplate;
use crate::usage::UsageParams;
use clap::ValueEnum;
use comfy_table::{Cell, Table};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render `name → params` usage.
pub fn render_usage(usage: &BTreeMap<String, UsageParams>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(usage)?),
        OutputFormat::Text => Ok(usage_table(usage)),
    }
}

fn usage_table(usage: &BTreeMap<String, UsageParams>) -> String {
    if usage.is_empty() {
        return "No usage assumptions".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Resource", "Parameter", "Value"]);

    for (name, params) in usage {
        if params.is_empty() {
            table.add_row(vec![
                Cell::new(name),
                Cell::new("-").fg(comfy_table::Color::DarkGrey),
                Cell::new(""),
            ]);
            continue;
        }
        for (param, value) in params {
            table.add_row(vec![
                Cell::new(name),
                Cell::new(param),
                Cell::new(format_count(*value)),
            ]);
        }
    }

    table.to_string()
}

/// Render a list of templates (summary only).
pub fn render_templates(templates: &[UsageTemplate], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(templates)?),
        OutputFormat::Text => {
            let mut table = Table::new();
            table.set_header(vec!["ID", "Name", "Description", "Resource Types"]);
            for template in templates {
                let types = template
                    .template
                    .keys()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                table.add_row(vec![
                    Cell::new(&template.id),
                    Cell::new(&template.name),
                    Cell::new(&template.description),
                    Cell::new(types),
                ]);
            }
            Ok(table.to_string())
        }
    }
}

/// Render a single template with all parameters.
pub fn render_template(template: &UsageTemplate, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(template)?),
        OutputFormat::Text => Ok(format!(
            "{} ({})\n{}\n\n{}",
            template.name,
            template.id,
            template.description,
            usage_table(&template.template)
        )),
    }
}

/// Render the questions for `resources`, one per resource.
///
/// JSON output is the bare array of questions so it can be copied into an
/// answers file of the same length.
pub fn render_questions(
    resources: &[Resource],
    questions: &[String],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(questions)?),
        OutputFormat::Text => {
            if resources.is_empty() {
                return Ok("No resources".to_string());
            }
            let mut table = Table::new();
            table.set_header(vec!["#", "Resource", "Type", "Question"]);
            for (idx, (resource, question)) in resources.iter().zip(questions).enumerate() {
                let question_cell = if question.is_empty() {
                    Cell::new("(no answer needed)").fg(comfy_table::Color::DarkGrey)
                } else {
                    Cell::new(question)
                };
                table.add_row(vec![
                    Cell::new(idx + 1),
                    Cell::new(&resource.name),
                    Cell::new(&resource.resource_type),
                    question_cell,
                ]);
            }
            Ok(table.to_string())
        }
    }
}

/// Group digits with commas: 1000000 -> "1,000,000"
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
