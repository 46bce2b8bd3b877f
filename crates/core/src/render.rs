//! Rendering of the three report sections.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::warn;

use crate::error::{ReportError, ReportResult};
use crate::model::{
    InitiationInterval, LoopAttributeReport, LoopNode, ProductInfo, ResourceReport,
    RESOURCE_LABELS,
};

/// Loop nesting rendered by default: loops and their inner loops.
pub const DEFAULT_MAX_LOOP_DEPTH: usize = 2;

/// Renderer interface used by [`crate::Report`].
pub trait RenderBackend {
    fn board_info(&self, info: &ProductInfo) -> ReportResult<String>;
    fn resource_usage(&self, report: &ResourceReport) -> ReportResult<String>;
    fn loop_attributes(&self, report: &LoopAttributeReport) -> ReportResult<String>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Plain,
    Table,
}

impl OutputStyle {
    pub fn backend(self, max_loop_depth: usize) -> Box<dyn RenderBackend> {
        match self {
            Self::Plain => Box::new(TextRenderer { max_loop_depth }),
            Self::Table => Box::new(TableRenderer { max_loop_depth }),
        }
    }
}

/// One resource line. `percent` is `None` when the capacity is zero.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceUsage {
    pub label: &'static str,
    pub total: f64,
    pub max: f64,
    pub percent: Option<f64>,
}

/// `total / max * 100`, or [`ReportError::DivisionByZero`] for an empty capacity.
pub fn utilization(label: &str, total: f64, max: f64) -> ReportResult<f64> {
    if max == 0.0 {
        return Err(ReportError::DivisionByZero {
            resource: label.to_string(),
        });
    }
    Ok(total / max * 100.0)
}

/// Computes every resource line. Zero capacities degrade to `percent: None`.
pub fn resource_rows(report: &ResourceReport) -> ReportResult<Vec<ResourceUsage>> {
    RESOURCE_LABELS
        .iter()
        .enumerate()
        .map(|(idx, &label)| -> ReportResult<ResourceUsage> {
            let total = *report
                .total
                .get(idx)
                .ok_or_else(|| ReportError::missing("resource usage", format!("total[{idx}]")))?;
            let max = *report.max_resources.get(idx).ok_or_else(|| {
                ReportError::missing("resource usage", format!("max_resources[{idx}]"))
            })?;
            let percent = match utilization(label, total, max) {
                Ok(percent) => Some(percent),
                Err(err) => {
                    warn!(resource = label, "{err}; reporting N/A");
                    None
                }
            };
            Ok(ResourceUsage {
                label,
                total,
                max,
                percent,
            })
        })
        .collect()
}

/// A flattened entry of the loop tree.
#[derive(Clone, Debug, PartialEq)]
pub enum LoopRow<'a> {
    /// Top-level node (kernel or function).
    Kernel { name: &'a str },
    /// A loop at `depth` (1 for loops, 2 for inner loops, ...).
    Loop {
        depth: usize,
        name: &'a str,
        ii: &'a InitiationInterval,
    },
    /// `count` nodes below the depth limit, first of them at `depth`.
    Hidden { depth: usize, count: usize },
}

/// Flattens the loop tree down to `max_depth`, marking what lies below.
pub fn loop_rows(report: &LoopAttributeReport, max_depth: usize) -> ReportResult<Vec<LoopRow<'_>>> {
    let mut rows = Vec::new();
    for node in &report.nodes {
        rows.push(LoopRow::Kernel { name: &node.name });
        push_children(node, 1, max_depth, &mut rows)?;
    }
    Ok(rows)
}

fn push_children<'a>(
    parent: &'a LoopNode,
    depth: usize,
    max_depth: usize,
    rows: &mut Vec<LoopRow<'a>>,
) -> ReportResult<()> {
    if parent.children.is_empty() {
        return Ok(());
    }
    if depth > max_depth {
        let count = parent.descendant_count();
        warn!(
            parent = %parent.name,
            count,
            max_depth,
            "loops nested below the depth limit are not rendered"
        );
        rows.push(LoopRow::Hidden { depth, count });
        return Ok(());
    }
    for child in &parent.children {
        let ii = child
            .ii
            .as_ref()
            .ok_or_else(|| ReportError::missing("loop attributes", format!("{}.ii", child.name)))?;
        rows.push(LoopRow::Loop {
            depth,
            name: &child.name,
            ii,
        });
        push_children(child, depth + 1, max_depth, rows)?;
    }
    Ok(())
}

fn depth_marker(depth: usize) -> String {
    if depth < 2 {
        String::new()
    } else {
        format!("{}L ", "  ".repeat(depth - 2))
    }
}

fn hidden_indent(depth: usize) -> String {
    "  ".repeat(depth.saturating_sub(2))
}

/// Plain console report, the default output.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    pub max_loop_depth: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            max_loop_depth: DEFAULT_MAX_LOOP_DEPTH,
        }
    }
}

impl RenderBackend for TextRenderer {
    fn board_info(&self, info: &ProductInfo) -> ReportResult<String> {
        let target = info.target()?;
        let mut out = String::from("Board and product info:\n---\n");
        for field in [&target.family, &target.product, &target.version] {
            out.push_str(field);
            out.push('\n');
        }
        out.push_str("---\n");
        Ok(out)
    }

    fn resource_usage(&self, report: &ResourceReport) -> ReportResult<String> {
        let mut out = String::from("Resource usage:\n----\n");
        for row in resource_rows(report)? {
            let ResourceUsage {
                label, total, max, ..
            } = row;
            let line = match row.percent {
                Some(percent) => format!("{label:<4} {percent:>5.2}% ({total}/{max})"),
                None => format!("{label:<4} {:>6} ({total}/{max})", "N/A"),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("----\n");
        Ok(out)
    }

    fn loop_attributes(&self, report: &LoopAttributeReport) -> ReportResult<String> {
        let mut out = String::from("Loop attributes:\n---\n");
        for row in loop_rows(report, self.max_loop_depth)? {
            match row {
                LoopRow::Kernel { name } => out.push_str(name),
                LoopRow::Loop { depth, name, ii } => {
                    out.push_str(&format!("{}{name}: II {ii}", depth_marker(depth)))
                }
                LoopRow::Hidden { depth, count } => out.push_str(&format!(
                    "{}({count} deeper loop(s) not shown)",
                    hidden_indent(depth)
                )),
            }
            out.push('\n');
        }
        out.push_str("---\n");
        Ok(out)
    }
}

#[derive(Tabled)]
struct BoardRow<'a> {
    family: &'a str,
    product: &'a str,
    version: &'a str,
}

#[derive(Tabled)]
struct ResourceRow {
    resource: &'static str,
    utilization: String,
    used: f64,
    available: f64,
}

#[derive(Tabled)]
struct LoopTableRow {
    kernel: String,
    #[tabled(rename = "loop")]
    name: String,
    ii: String,
}

/// Markdown tables carrying the same information as [`TextRenderer`].
#[derive(Clone, Debug)]
pub struct TableRenderer {
    pub max_loop_depth: usize,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self {
            max_loop_depth: DEFAULT_MAX_LOOP_DEPTH,
        }
    }
}

fn section(title: &str, table: Table) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{table}");
    out
}

impl RenderBackend for TableRenderer {
    fn board_info(&self, info: &ProductInfo) -> ReportResult<String> {
        let target = info.target()?;
        let row = BoardRow {
            family: &target.family,
            product: &target.product,
            version: &target.version,
        };
        let mut table = Table::new([row]);
        table.with(Style::markdown());
        Ok(section("Board and product info:", table))
    }

    fn resource_usage(&self, report: &ResourceReport) -> ReportResult<String> {
        let rows = resource_rows(report)?.into_iter().map(|row| ResourceRow {
            resource: row.label,
            utilization: row
                .percent
                .map_or_else(|| "N/A".to_string(), |percent| format!("{percent:.2}%")),
            used: row.total,
            available: row.max,
        });
        let mut table = Table::new(rows);
        table.with(Style::markdown());
        Ok(section("Resource usage:", table))
    }

    fn loop_attributes(&self, report: &LoopAttributeReport) -> ReportResult<String> {
        let mut kernel = "";
        let mut rows = Vec::new();
        for row in loop_rows(report, self.max_loop_depth)? {
            match row {
                LoopRow::Kernel { name } => kernel = name,
                LoopRow::Loop { depth, name, ii } => rows.push(LoopTableRow {
                    kernel: kernel.to_string(),
                    name: format!("{}{name}", depth_marker(depth)),
                    ii: ii.to_string(),
                }),
                LoopRow::Hidden { depth, count } => rows.push(LoopTableRow {
                    kernel: kernel.to_string(),
                    name: format!("{}({count} deeper loop(s) not shown)", hidden_indent(depth)),
                    ii: String::new(),
                }),
            }
        }
        let mut table = Table::new(rows);
        table.with(Style::markdown());
        Ok(section("Loop attributes:", table))
    }
}

/// Board block in the plain format.
pub fn render_board_info(info: &ProductInfo) -> ReportResult<String> {
    TextRenderer::default().board_info(info)
}

/// Resource utilization block in the plain format.
pub fn render_resource_usage(report: &ResourceReport) -> ReportResult<String> {
    TextRenderer::default().resource_usage(report)
}

/// Loop and inner-loop II listing in the plain format, two levels deep.
pub fn render_loop_attributes(report: &LoopAttributeReport) -> ReportResult<String> {
    TextRenderer::default().loop_attributes(report)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
