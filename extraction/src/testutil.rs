use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::tabula_wrapper::{JsonCell, JsonRow, JsonTable, JsonTableSet};

/// Builds a [JsonTable] as Tabula would output it, with the given cell texts.
pub fn json_table(page_number: i32, rows: &[&[&str]]) -> JsonTable {
    JsonTable {
        extraction_method: "stream".into(),
        page_number,
        top: 0.0,
        left: 0.0,
        width: 100.0,
        height: 10.0 * rows.len() as f32,
        right: 100.0,
        bottom: 10.0 * rows.len() as f32,
        data: rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                JsonRow(
                    row.iter()
                        .enumerate()
                        .map(|(cell_index, text)| JsonCell {
                            top: 10.0 * row_index as f32,
                            left: 20.0 * cell_index as f32,
                            width: 20.0,
                            height: 10.0,
                            text: (*text).to_owned(),
                        })
                        .collect(),
                )
            })
            .collect(),
    }
}

pub fn json_table_set(tables: Vec<JsonTable>) -> JsonTableSet {
    JsonTableSet(tables)
}

/// Scratch directory containing a placeholder input PDF.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("should create temporary directory");
        std::fs::write(dir.path().join("input.pdf"), b"%PDF-1.4\n%%EOF\n")
            .expect("should write placeholder PDF");
        Self { dir }
    }

    pub fn input_pdf(&self) -> PathBuf {
        self.dir.path().join("input.pdf")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Path to a one page PDF with a single ruled 3x3 table, as returned by [fixture_table_rows].
pub fn fixture_pdf() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/simple_table.pdf")
}

pub fn fixture_table_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["Heading 1", "Heading 2", "Heading 3"],
        vec!["r1c1", "r1c2", "r1c3"],
        vec!["r2c1", "r2c2", "r2c3"],
    ]
}

/// Locates the Tabula JAR for tests that run the real library, from `TABULACSV_TABULA_JAR` or
/// the workspace build directory. Returns `None` when it is not available.
pub fn tabula_jar() -> Option<PathBuf> {
    let path = match std::env::var_os("TABULACSV_TABULA_JAR") {
        Some(path) => PathBuf::from(path),
        None => Path::new(env!("CARGO_MANIFEST_DIR")).join("../target/debug/tabula.jar"),
    };
    path.is_file().then_some(path)
}
