//! Collapse the per-segment tool lists into one summary line.
//!
//! Quantities describe peak concurrent need, so repeated mentions reduce to
//! the maximum per tool name rather than a sum.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::state::Segment;

static QUANTIFIED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.+)$").expect("tool quantity pattern is valid"));

/// Merged tool requirements of a whole plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSummary {
    /// No segment lists any tool.
    NoTools,
    Tools(String),
}

impl ToolSummary {
    /// Render with a caller-provided label for the empty case.
    pub fn display_or<'a>(&'a self, no_tools: &'a str) -> &'a str {
        match self {
            ToolSummary::NoTools => no_tools,
            ToolSummary::Tools(line) => line,
        }
    }
}

impl fmt::Display for ToolSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolSummary::NoTools => f.write_str("-"),
            ToolSummary::Tools(line) => f.write_str(line),
        }
    }
}

/// Split one free-text tools field into `(name, quantity)` entries.
///
/// Entries without a leading integer, or whose integer does not fit, are
/// unquantified names.
pub fn parse_tools(field: &str) -> Vec<(String, Option<u64>)> {
    field
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            QUANTIFIED_ENTRY
                .captures(entry)
                .and_then(|caps| {
                    let quantity = caps[1].parse::<u64>().ok()?;
                    Some((caps[2].trim().to_string(), Some(quantity)))
                })
                .unwrap_or_else(|| (entry.to_string(), None))
        })
        .collect()
}

/// Max-reduce tool fields into `"<qty> <name>"` entries sorted by name.
pub fn merge_tool_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> ToolSummary {
    let mut merged: BTreeMap<String, Option<u64>> = BTreeMap::new();
    for field in fields {
        for (name, quantity) in parse_tools(field) {
            let slot = merged.entry(name).or_insert(None);
            if let Some(quantity) = quantity {
                *slot = Some(slot.map_or(quantity, |seen| seen.max(quantity)));
            }
        }
    }

    if merged.is_empty() {
        return ToolSummary::NoTools;
    }
    let line = merged
        .into_iter()
        .map(|(name, quantity)| match quantity {
            Some(quantity) => format!("{} {}", quantity, name),
            None => name,
        })
        .collect::<Vec<_>>()
        .join(", ");
    ToolSummary::Tools(line)
}

pub fn merge_segment_tools(segments: &[Segment]) -> ToolSummary {
    merge_tool_fields(segments.iter().map(|segment| segment.tools.as_str()))
}
