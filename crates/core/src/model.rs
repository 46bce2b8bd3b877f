//! Typed views over the decoded report payloads.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReportError, ReportResult};

/// Resource labels in the order the toolchain stores them in `total`.
pub const RESOURCE_LABELS: [&str; 5] = ["ALUT", "REG", "RAM", "DSP", "MLAB"];

/// `areaJSON`: design-wide resource usage.
///
/// `total_percent` is present in the payload but not read; utilization is
/// always computed from `total` and `max_resources`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceReport {
    pub total: Vec<f64>,
    pub max_resources: Vec<f64>,
}

/// `loop_attrJSON`: the loop tree per kernel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopAttributeReport {
    pub nodes: Vec<LoopNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ii: Option<InitiationInterval>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LoopNode>,
}

impl LoopNode {
    /// Number of nodes strictly below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// The toolchain writes II as a number or as a string such as `"n/a"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitiationInterval {
    Cycles(serde_json::Number),
    Text(String),
}

impl fmt::Display for InitiationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycles(cycles) => write!(f, "{cycles}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// `infoJSON`: compile target description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(rename = "compileInfo")]
    pub compile_info: CompileInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompileInfo {
    pub nodes: Vec<CompileTarget>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompileTarget {
    pub family: String,
    pub product: String,
    pub version: String,
}

impl ProductInfo {
    /// The first compile-target node.
    pub fn target(&self) -> ReportResult<&CompileTarget> {
        self.compile_info
            .nodes
            .first()
            .ok_or_else(|| ReportError::missing("product info", "compileInfo.nodes[0]"))
    }
}

/// Deserializes a decoded payload, reporting shape mismatches as missing fields.
pub fn from_value<T: DeserializeOwned>(section: &str, value: Value) -> ReportResult<T> {
    serde_json::from_value(value).map_err(|err| ReportError::missing(section, err.to_string()))
}
