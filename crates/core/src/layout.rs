use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the toolchain puts each payload inside a report directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    pub resources_dir: String,
    pub report_data_file: String,
    pub product_data_file: String,
    pub area_variable: String,
    pub loop_attr_variable: String,
    pub info_variable: String,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            resources_dir: "resources".to_string(),
            report_data_file: "report_data.js".to_string(),
            product_data_file: "product_data.js".to_string(),
            area_variable: "areaJSON".to_string(),
            loop_attr_variable: "loop_attrJSON".to_string(),
            info_variable: "infoJSON".to_string(),
        }
    }
}

impl ReportLayout {
    pub fn report_data_path(&self, report_dir: &Path) -> PathBuf {
        report_dir
            .join(&self.resources_dir)
            .join(&self.report_data_file)
    }

    pub fn product_data_path(&self, report_dir: &Path) -> PathBuf {
        report_dir
            .join(&self.resources_dir)
            .join(&self.product_data_file)
    }
}
