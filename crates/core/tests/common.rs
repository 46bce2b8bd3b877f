#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// `resources/report_data.js` as the toolchain lays it out: area data on the
/// first line, loop attributes on the fifth.
pub const REPORT_DATA: &str = concat!(
    r#"var areaJSON={"columns":["","ALUTs","FFs","RAMs","DSPs","MLABs","Details"],"debug_enabled":"true","type":"module","total_percent":[72.5,20.1,15.3,18.0,5.2,3.4],"total":[128520,250716,1210.5,96,2140],"max_resources":[1866240,3732480,11721,5760,93312],"name":"Kernel System","children":[]};"#,
    "\n",
    r#"var mavJSON={"nodes":[],"links":[]};"#,
    "\n",
    r#"var lmvJSON={"nodes":[],"links":[]};"#,
    "\n",
    r#"var treeJSON={"nodes":[]};"#,
    "\n",
    r#"var loop_attrJSON={"name":"loop data","nodes":[{"name":"VectorAdd","type":"kernel","children":[{"name":"VectorAdd.B1","ii":"1","af":"240.00","children":[{"name":"VectorAdd.B2","ii":"1","children":[{"name":"VectorAdd.B3","ii":"2"}]}]},{"name":"VectorAdd.B4","ii":"n/a"}]},{"name":"Reduce","type":"kernel","children":[{"name":"Reduce.B1","ii":3}]}]};"#,
    "\n",
);

/// `resources/product_data.js`, including a `\x` escape the toolchain emits
/// for the registered-trademark sign.
pub const PRODUCT_DATA: &str = concat!(
    r#"var infoJSON={"compileInfo":{"name":"Compile Info","nodes":[{"name":"vector_add","type":"compile","family":"Agilex 7","product":"Intel\xae oneAPI DPC++/C++ Compiler","version":"2024.1.0","board":"de10_agilex:B2E2_8GBx4"}]}};"#,
    "\n",
);

/// Writes a report tree and returns the directory owning it.
pub fn write_report_tree(report_data: &str, product_data: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let resources = dir.path().join("resources");
    fs::create_dir_all(&resources).expect("resources dir");
    write(&resources.join("report_data.js"), report_data);
    write(&resources.join("product_data.js"), product_data);
    dir
}

pub fn sample_report_tree() -> TempDir {
    write_report_tree(REPORT_DATA, PRODUCT_DATA)
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write fixture");
}
