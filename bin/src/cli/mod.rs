
use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use extraction::{
    method::{ExtractionMethod, PageSelection},
    process::{self, DEFAULT_OUTPUT_CSV, ProcessRequest},
    tabula_wrapper::singlethreaded::SingleThreadedTabulaExtractor,
};
use simplelog::LevelFilter;

use crate::distpaths;

const SUCCESS_MESSAGE: &str = "PDF data successfully processed";

/// Process a PDF file and save its tables as CSV.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to the input PDF file.
    input_file: PathBuf,

    /// Path to the output CSV file.
    #[arg(long = "output_file", visible_alias = "output-file", default_value = DEFAULT_OUTPUT_CSV)]
    output_file: PathBuf,

    /// Pages to extract tables from, either "all" or a comma separated list of page numbers and
    /// inclusive ranges, such as "1,3-5".
    #[arg(long, default_value = "all")]
    pages: PageSelection,

    /// Table detection method used for the CSV output: stream, lattice or guess.
    #[arg(long, default_value = "stream")]
    method: ExtractionMethod,

    /// Password to decrypt the input PDF with.
    #[arg(long)]
    password: Option<String>,

    /// Path to the Tabula JAR file. Looked for next to the executable and in the XDG data
    /// directories when not given.
    #[arg(long, env = "TABULACSV_TABULA_JAR")]
    tabula_libpath: Option<PathBuf>,

    /// Logging level.
    #[arg(long, default_value = "Warn")]
    log_level: LevelFilter,
}

impl Args {
    fn process_request(&self) -> ProcessRequest {
        ProcessRequest {
            pages: self.pages.clone(),
            method: self.method,
            password: self.password.clone(),
            ..ProcessRequest::new(&self.input_file, &self.output_file)
        }
    }
}

/// Runs the program, reporting the outcome on the console.
pub fn run() -> ExitCode {
    let args = Args::parse();

    match run_args(&args) {
        Ok(()) => {
            println!("{SUCCESS_MESSAGE}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_args(args: &Args) -> Result<()> {
    simplelog::WriteLogger::init(
        args.log_level,
        simplelog::Config::default(),
        std::io::stderr(),
    )
    .context("configuring logging")?;

    let request = args.process_request();

    // Fail fast on bad input, before paying for JVM startup.
    process::check_input_pdf(&request.input_pdf)?;

    let tabula_jar = distpaths::resolve_tabula_jar(args.tabula_libpath.as_deref())?;
    let tabula_libpath = tabula_jar
        .to_str()
        .ok_or_else(|| anyhow!("Tabula JAR path {:?} is not valid UTF-8", tabula_jar))?;
    log::debug!("Using Tabula from {:?}.", tabula_jar);

    let vm = tabula::TabulaVM::new(tabula_libpath, false)
        .with_context(|| format!("initialising Tabula from {:?}", tabula_jar))?;
    let env = vm.attach().context("attaching to Tabula VM")?;
    let extractor = SingleThreadedTabulaExtractor::new(env);

    let summary = process::process_pdf(&extractor, &request)?;
    log::info!(
        "Processed {:?} into {:?}: {} tables read, {} tables with {} rows written.",
        request.input_pdf,
        request.output_csv,
        summary.tables_read,
        summary.tables_written,
        summary.rows_written,
    );

    Ok(())
}
