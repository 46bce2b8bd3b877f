use std::fs;

use fpga_report::{
    extract_variable, OutputStyle, Report, ReportError, ReportLayout, SummarizerConfig,
    TextRenderer,
};

mod common;
use common::{sample_report_tree, write_report_tree, PRODUCT_DATA, REPORT_DATA};

#[test]
fn loads_all_three_payloads() {
    let tree = sample_report_tree();
    let report = Report::load(tree.path()).expect("load report");

    assert_eq!(report.resources.total.len(), 5);
    assert_eq!(report.resources.max_resources[0], 1_866_240.0);
    assert_eq!(report.loops.nodes.len(), 2);
    let target = report.product.target().expect("target");
    assert_eq!(target.family, "Agilex 7");
    assert_eq!(target.product, "Intel® oneAPI DPC++/C++ Compiler");
    assert_eq!(target.version, "2024.1.0");
}

#[test]
fn sections_are_written_in_fixed_order() {
    let tree = sample_report_tree();
    let report = Report::load(tree.path()).expect("load report");
    let text = report.render(&TextRenderer::default()).expect("render");

    let header = text.find("Report from ").expect("header");
    let board = text.find("Board and product info:").expect("board section");
    let resources = text.find("Resource usage:").expect("resource section");
    let loops = text.find("Loop attributes:").expect("loop section");
    assert!(header < board && board < resources && resources < loops);
    assert!(text.starts_with(&format!("Report from {}:\n", tree.path().display())));
}

#[test]
fn loop_attributes_are_located_by_name_not_line() {
    let shuffled: String = {
        let lines: Vec<&str> = REPORT_DATA.lines().collect();
        format!("{}\n{}\n{}\n", lines[4], lines[1], lines[0])
    };
    let tree = write_report_tree(&shuffled, PRODUCT_DATA);
    let report = Report::load(tree.path()).expect("load report");
    assert_eq!(report.loops.nodes[0].name, "VectorAdd");
    assert_eq!(report.resources.total[4], 2140.0);
}

#[test]
fn missing_directory_is_not_found() {
    let tree = sample_report_tree();
    let missing = tree.path().join("no_such_report");
    assert!(matches!(
        Report::load(&missing),
        Err(ReportError::ReportNotFound { .. })
    ));
}

#[test]
fn missing_product_file_is_not_found() {
    let tree = sample_report_tree();
    fs::remove_file(tree.path().join("resources").join("product_data.js")).expect("remove");
    assert!(matches!(
        Report::load(tree.path()),
        Err(ReportError::ReportNotFound { .. })
    ));
}

#[test]
fn misframed_area_line_fails_without_output() {
    let broken = REPORT_DATA.replacen("var areaJSON=", "areaJSON=", 1);
    let tree = write_report_tree(&broken, PRODUCT_DATA);
    let err = Report::load(tree.path()).unwrap_err();
    assert!(matches!(err, ReportError::MalformedReport { .. }), "{err:?}");
}

#[test]
fn render_failure_stops_before_the_failing_section() {
    let tree = write_report_tree(
        REPORT_DATA,
        "var infoJSON={\"compileInfo\":{\"nodes\":[]}};\n",
    );
    let report = Report::load(tree.path()).expect("load report");
    let mut out = Vec::new();
    let err = report
        .write_to(&mut out, &TextRenderer::default())
        .unwrap_err();
    assert!(matches!(err, ReportError::MissingField { .. }));
    assert!(out.is_empty(), "{}", String::from_utf8_lossy(&out));
}

#[test]
fn zero_capacity_in_report_degrades_one_line() {
    let zeroed = REPORT_DATA.replacen("11721", "0", 1);
    let tree = write_report_tree(&zeroed, PRODUCT_DATA);
    let report = Report::load(tree.path()).expect("load report");
    let text = report.render(&TextRenderer::default()).expect("render");
    assert!(text.contains("RAM     N/A (1210.5/0)\n"), "{text}");
    assert!(text.contains("ALUT  6.89% (128520/1866240)\n"), "{text}");
    assert!(text.contains("Loop attributes:"));
}

#[test]
fn layout_overrides_select_other_identifiers() {
    let renamed = PRODUCT_DATA.replacen("var infoJSON=", "var productJSON=", 1);
    let tree = write_report_tree(REPORT_DATA, &renamed);
    let config = SummarizerConfig::from_toml("[layout]\ninfo_variable = \"productJSON\"\n")
        .expect("config");
    let report = Report::load_with_layout(tree.path(), &config.layout).expect("load report");
    assert_eq!(report.product.target().expect("target").version, "2024.1.0");

    assert!(matches!(
        Report::load_with_layout(tree.path(), &ReportLayout::default()),
        Err(ReportError::ReportNotFound { .. })
    ));
}

#[test]
fn table_style_renders_every_section() {
    let tree = sample_report_tree();
    let report = Report::load(tree.path()).expect("load report");
    let text = report
        .render(OutputStyle::Table.backend(2).as_ref())
        .expect("render");
    assert!(text.contains("| family "), "{text}");
    assert!(text.contains("| ALUT "), "{text}");
    assert!(text.contains("VectorAdd.B4"), "{text}");
}

#[test]
fn extraction_of_report_file_is_repeatable() {
    let tree = sample_report_tree();
    let path = tree.path().join("resources").join("report_data.js");
    let first = extract_variable(&path, "loop_attrJSON").expect("first");
    let second = extract_variable(&path, "loop_attrJSON").expect("second");
    assert_eq!(first, second);
}
