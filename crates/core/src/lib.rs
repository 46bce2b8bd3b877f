//! Console summaries of FPGA compiler report trees.
//!
//! The toolchain's HTML viewer reads its data from `.js` files under
//! `resources/`, each holding `var <name>=<json>;` statements. This crate
//! pulls those payloads out, maps them onto typed models and prints board,
//! resource and loop sections.

mod config;
mod error;
mod extract;
mod layout;
mod model;
mod render;
mod report;

pub use config::{ConfigError, RenderOptions, SummarizerConfig};
pub use error::{ReportError, ReportResult};
pub use extract::{
    decode_literal, extract_line, extract_variable, list_variables, parse_assignment,
    to_assignment_line, Assignment, VariableInfo,
};
pub use layout::ReportLayout;
pub use model::{
    from_value, CompileInfo, CompileTarget, InitiationInterval, LoopAttributeReport, LoopNode,
    ProductInfo, ResourceReport, RESOURCE_LABELS,
};
pub use render::{
    loop_rows, render_board_info, render_loop_attributes, render_resource_usage, resource_rows,
    utilization, LoopRow, OutputStyle, RenderBackend, ResourceUsage, TableRenderer, TextRenderer,
    DEFAULT_MAX_LOOP_DEPTH,
};
pub use report::Report;
