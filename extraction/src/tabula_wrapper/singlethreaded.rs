use anyhow::Context;

use crate::tabula_wrapper;

/// Single threaded implementation of [tabula_wrapper::TabulaExtractor].
///
/// Must be created and run on the thread that attached to the Tabula VM.
pub struct SingleThreadedTabulaExtractor<'env> {
    tabula_env: tabula::TabulaEnv<'env>,
}

impl<'env> SingleThreadedTabulaExtractor<'env> {
    /// Creates a [SingleThreadedTabulaExtractor] with the given [tabula::TabulaEnv].
    pub fn new(tabula_env: tabula::TabulaEnv<'env>) -> Self {
        Self { tabula_env }
    }
}

impl<'env> tabula_wrapper::TabulaExtractor for SingleThreadedTabulaExtractor<'env> {
    fn extract_tables(
        &self,
        request: tabula_wrapper::TabulaExtractionRequest,
    ) -> anyhow::Result<tabula_wrapper::JsonTableSet> {
        log::debug!(
            "Extracting tables from {:?} (pages={}, method={}, guess={}).",
            request.pdf_path,
            request.pages,
            request.method,
            request.guess,
        );

        let tabula = self
            .tabula_env
            .configure_tabula(
                None,
                request.pages.to_tabula_pages(),
                tabula::OutputFormat::Json,
                request.guess,
                request.method.to_tabula_extraction_method(),
                request.use_returns,
                request.password.as_deref(),
            )
            .context("configuring Tabula to extract tables")?;

        let extracted_file = tempfile::NamedTempFile::new()
            .context("creating temporary file for extracting PDF table data")?;
        tabula
            .parse_document_into(&request.pdf_path, extracted_file.path())
            .with_context(|| format!("extracting PDF table data from {:?}", request.pdf_path))?;

        serde_json::from_reader(extracted_file).context("parsing extracted PDF table data")
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Context, Result, anyhow};
    use googletest::prelude::*;
    use lazy_static::lazy_static;

    use super::*;
    use crate::{
        method::{ExtractionMethod, PageSelection},
        table::Table,
        tabula_wrapper::{TabulaExtractionRequest, TabulaExtractor},
        testutil::{self, ScratchDir},
    };

    lazy_static! {
        static ref VM: Option<Result<tabula::TabulaVM>> = testutil::tabula_jar().map(|jar| {
            tabula::TabulaVM::new(&jar.to_string_lossy(), true).map_err(anyhow::Error::from)
        });
    }

    /// Runs `f` against a real Tabula, or skips it when no Tabula JAR is available.
    fn with_extractor<F>(f: F) -> Result<()>
    where
        F: FnOnce(&SingleThreadedTabulaExtractor) -> Result<()>,
    {
        let Some(vm) = VM.as_ref() else {
            eprintln!("Skipping: tabula.jar not found, set TABULACSV_TABULA_JAR to run.");
            return Ok(());
        };
        let vm = vm
            .as_ref()
            .map_err(|err| anyhow!("starting Tabula VM: {err:#}"))?;
        let env = vm.attach().context("attaching to Tabula VM")?;
        f(&SingleThreadedTabulaExtractor::new(env))
    }

    fn fixture_request(method: ExtractionMethod) -> TabulaExtractionRequest {
        TabulaExtractionRequest {
            pdf_path: testutil::fixture_pdf(),
            password: None,
            pages: PageSelection::All,
            guess: true,
            use_returns: false,
            method,
        }
    }

    fn to_tables(table_set: tabula_wrapper::JsonTableSet) -> Vec<Table> {
        table_set.0.into_iter().map(Table::from).collect()
    }

    #[gtest]
    fn extracts_ruled_table_with_lattice() -> Result<()> {
        with_extractor(|extractor| {
            let table_set = extractor.extract_tables(fixture_request(ExtractionMethod::Lattice))?;

            assert_that!(table_set.0, len(eq(1)));
            expect_that!(table_set.0[0].page_number, eq(1));
            expect_eq!(
                to_tables(table_set),
                vec![Table::from(testutil::fixture_table_rows())]
            );
            Ok(())
        })
    }

    #[gtest]
    fn extracts_table_rows_with_stream() -> Result<()> {
        with_extractor(|extractor| {
            let tables = to_tables(
                extractor.extract_tables(fixture_request(ExtractionMethod::Stream))?,
            );

            assert_that!(tables, not(is_empty()));
            let rows: Vec<String> = tables
                .iter()
                .flat_map(|table| table.iter())
                .map(|row| row.join("|"))
                .collect();
            for expected in testutil::fixture_table_rows() {
                expect_that!(rows, contains(eq(&expected.join("|"))));
            }
            Ok(())
        })
    }

    #[gtest]
    fn extracts_only_selected_pages() -> Result<()> {
        with_extractor(|extractor| {
            let request = TabulaExtractionRequest {
                pages: PageSelection::Pages(vec![1]),
                ..fixture_request(ExtractionMethod::Stream)
            };

            let table_set = extractor.extract_tables(request)?;

            expect_that!(
                table_set.0.iter().map(|t| t.page_number).collect::<Vec<_>>(),
                each(eq(&1))
            );
            Ok(())
        })
    }

    #[gtest]
    fn fails_for_file_that_is_not_a_pdf() -> Result<()> {
        with_extractor(|extractor| {
            let scratch = ScratchDir::new();
            let not_pdf = scratch.path("not.pdf");
            std::fs::write(&not_pdf, "plain text, not a PDF")?;

            let request = TabulaExtractionRequest {
                pdf_path: not_pdf,
                ..fixture_request(ExtractionMethod::Stream)
            };

            expect_that!(extractor.extract_tables(request), err(anything()));
            Ok(())
        })
    }
}
