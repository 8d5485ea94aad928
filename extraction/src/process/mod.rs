
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    csvout,
    method::{ExtractionMethod, PageSelection},
    table::Table,
    tabula_wrapper::{TabulaExtractionRequest, TabulaExtractor},
};

/// Output path used when none is given.
pub const DEFAULT_OUTPUT_CSV: &str = "test.csv";

/// Describes a single PDF to CSV conversion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProcessRequest {
    pub input_pdf: PathBuf,
    pub output_csv: PathBuf,
    pub pages: PageSelection,
    /// Method used to detect the tables written to the CSV output.
    pub method: ExtractionMethod,
    pub password: Option<String>,
}

impl ProcessRequest {
    /// Creates a [ProcessRequest] that converts tables on all pages using stream extraction.
    pub fn new<I, O>(input_pdf: I, output_csv: O) -> Self
    where
        I: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        Self {
            input_pdf: input_pdf.into(),
            output_csv: output_csv.into(),
            pages: PageSelection::All,
            method: ExtractionMethod::Stream,
            password: None,
        }
    }

    fn extraction_request(&self, method: ExtractionMethod) -> TabulaExtractionRequest {
        TabulaExtractionRequest {
            pdf_path: self.input_pdf.clone(),
            password: self.password.clone(),
            pages: self.pages.clone(),
            guess: true,
            use_returns: false,
            method,
        }
    }
}

/// Outcome of a successful [process_pdf].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProcessSummary {
    /// Number of tables found by the read step.
    pub tables_read: usize,
    /// Page numbers that the read step found tables on.
    pub pages_read: BTreeSet<i32>,
    pub tables_written: usize,
    pub rows_written: usize,
}

/// Problems with the input PDF path, detected before any extraction is attempted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("input PDF does not exist")]
    NotFound,
    #[error("input PDF path is not a file")]
    NotAFile,
}

/// Checks that `path` names an existing file.
pub fn check_input_pdf(path: &Path) -> Result<()> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(InputError::NotFound).with_context(|| format!("checking {:?}", path));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading metadata for {:?}", path));
        }
    };

    if !metadata.is_file() {
        return Err(InputError::NotAFile).with_context(|| format!("checking {:?}", path));
    }

    Ok(())
}

/// Reads the tables from the requested PDF, then converts them into the CSV output file.
///
/// The output file is only created or replaced once every step has succeeded.
pub fn process_pdf(
    extractor: &dyn TabulaExtractor,
    request: &ProcessRequest,
) -> Result<ProcessSummary> {
    check_input_pdf(&request.input_pdf)?;

    let read_tables = extractor
        .extract_tables(request.extraction_request(ExtractionMethod::Stream))
        .with_context(|| format!("reading tables from {:?}", request.input_pdf))?;
    let pages_read: BTreeSet<i32> = read_tables.0.iter().map(|t| t.page_number).collect();
    let tables: Vec<Table> = read_tables.0.into_iter().map(Table::from).collect();
    log::info!(
        "Read {} tables from {} pages of {:?} (widest has {} columns).",
        tables.len(),
        pages_read.len(),
        request.input_pdf,
        tables.iter().map(Table::width).max().unwrap_or(0),
    );

    let converted_tables: Vec<Table> = extractor
        .extract_tables(request.extraction_request(request.method))
        .with_context(|| {
            format!(
                "converting tables from {:?} using {} extraction",
                request.input_pdf, request.method
            )
        })?
        .0
        .into_iter()
        .map(Table::from)
        .collect();
    if converted_tables.is_empty() {
        log::warn!(
            "No tables found in {:?}, writing empty output.",
            request.input_pdf
        );
    }

    let stats = csvout::write_tables_to_path(&request.output_csv, &converted_tables)?;
    log::info!(
        "Wrote {} rows from {} tables to {:?}.",
        stats.rows,
        stats.tables,
        request.output_csv
    );

    Ok(ProcessSummary {
        tables_read: tables.len(),
        pages_read,
        tables_written: stats.tables,
        rows_written: stats.rows,
    })
}
