//! A loaded report directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};
use crate::extract::extract_variable;
use crate::layout::ReportLayout;
use crate::model::{from_value, LoopAttributeReport, ProductInfo, ResourceReport};
use crate::render::RenderBackend;

/// The three payloads of one report tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub dir: PathBuf,
    pub product: ProductInfo,
    pub resources: ResourceReport,
    pub loops: LoopAttributeReport,
}

impl Report {
    /// Loads a report directory with the toolchain's default layout.
    pub fn load(dir: &Path) -> ReportResult<Self> {
        Self::load_with_layout(dir, &ReportLayout::default())
    }

    pub fn load_with_layout(dir: &Path, layout: &ReportLayout) -> ReportResult<Self> {
        if !dir.is_dir() {
            return Err(ReportError::not_found(dir, "not a directory"));
        }
        let report_data = layout.report_data_path(dir);
        let product_data = layout.product_data_path(dir);
        info!(dir = %dir.display(), "loading report");

        let resources = from_value(
            "resource usage",
            extract_variable(&report_data, &layout.area_variable)?,
        )?;
        let loops = from_value(
            "loop attributes",
            extract_variable(&report_data, &layout.loop_attr_variable)?,
        )?;
        let product = from_value(
            "product info",
            extract_variable(&product_data, &layout.info_variable)?,
        )?;
        debug!("report payloads decoded");

        Ok(Self {
            dir: dir.to_path_buf(),
            product,
            resources,
            loops,
        })
    }

    /// Writes the header and the board, resource and loop sections, in that
    /// order. A section is written only once it rendered completely.
    pub fn write_to<W: Write>(&self, out: &mut W, backend: &dyn RenderBackend) -> ReportResult<()> {
        let sections = [
            format!("Report from {}:\n", self.dir.display()),
            backend.board_info(&self.product)?,
        ];
        write_sections(out, &sections)?;
        let resources = backend.resource_usage(&self.resources)?;
        write_sections(out, &[resources])?;
        let loops = backend.loop_attributes(&self.loops)?;
        write_sections(out, &[loops])
    }

    /// Renders the whole report into a string.
    pub fn render(&self, backend: &dyn RenderBackend) -> ReportResult<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, backend)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn write_sections<W: Write>(out: &mut W, sections: &[String]) -> ReportResult<()> {
    for section in sections {
        out.write_all(section.as_bytes())?;
    }
    Ok(())
}
