mod cli;
mod logging;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pressmark_core::ImportReport;
use pressmark_engine::{AtomicFileWriter, Importer};
use pressmark_logging::{press_error, press_info, press_warn};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(&cli.log_destination(), cli.log_level());

    match run(&cli) {
        Ok(report) => {
            if !report.failures.is_empty() {
                press_warn!("{} item(s) could not be imported", report.failures.len());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            press_error!("{err:#}");
            eprintln!("pressmark: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ImportReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let importer = Importer::new(cli.import_options(), cli.fetch_settings());
    let report = runtime
        .block_on(importer.run())
        .with_context(|| format!("import of {} failed", cli.source.display()))?;

    if let Some(path) = &cli.report {
        write_report(&report, path)?;
        press_info!("Report written to {}", path.display());
    }
    Ok(report)
}

fn write_report(report: &ImportReport, path: &Path) -> anyhow::Result<()> {
    let json = report.to_json().context("failed to serialize report")?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("report path {} has no file name", path.display()))?;
    AtomicFileWriter::new(dir)
        .write(file_name, &json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
