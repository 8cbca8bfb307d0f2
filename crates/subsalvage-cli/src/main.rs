use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use subsalvage::{ExtractOptions, ExtractionResult, Extractor};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::app::{App, CommonArg, Commands};

mod app;

fn main() -> ExitCode {
    let app = App::parse();
    init_tracing(app.verbose);

    match run(app) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Returns whether the engine produced a subtitle.
fn run(app: App) -> Result<bool> {
    let (result, common) = match app.cmd {
        Commands::Extract(arg) => {
            let extractor = extractor(&arg.common)?;
            let payload = read(&arg.archive)?;
            let result = extractor.extract_from_archive(&payload, arg.common.encoding.as_deref());
            (result, arg.common)
        }
        Commands::Decode(arg) => {
            let extractor = extractor(&arg.common)?;
            let bytes = read(&arg.file)?;
            let name = match &arg.name {
                Some(name) => name.clone(),
                None => file_name(&arg.file)?,
            };
            let result = extractor.decode_text(&bytes, &name, arg.common.encoding.as_deref());
            (result, arg.common)
        }
    };

    emit(&result, &common)?;
    Ok(result.is_success())
}

fn extractor(common: &CommonArg) -> Result<Extractor> {
    let mut options = match &common.config {
        Some(path) => load_options(path)?,
        None => ExtractOptions::default(),
    };
    if let Some(fps) = common.frame_rate {
        options = options.frame_rate(fps);
    }
    debug!(?options, "engine options");
    Ok(Extractor::new(options))
}

fn load_options(path: &Path) -> Result<ExtractOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))
}

fn emit(result: &ExtractionResult, common: &CommonArg) -> Result<()> {
    if common.json {
        let json = serde_json::to_string_pretty(result)?;
        writeln!(io::stdout(), "{json}")?;
    }

    match result {
        ExtractionResult::Success {
            content, filename, ..
        } => match &common.output {
            Some(output) => write_output(output, filename, content.as_bytes()),
            None if common.json => Ok(()),
            None => {
                io::stdout().write_all(content.as_bytes())?;
                Ok(())
            }
        },
        ExtractionResult::SuccessBinary { filename, buffer } => match &common.output {
            Some(output) => write_output(output, filename, buffer),
            None if common.json => Ok(()),
            None => bail!("{filename} is a binary subtitle; pass --output to save it"),
        },
        ExtractionResult::Failure { error, details, .. } => {
            if !common.json {
                eprintln!("extraction failed: {error}");
                if let Some(details) = details.as_deref().filter(|d| !d.is_empty()) {
                    eprint!("{details}");
                }
            }
            Ok(())
        }
    }
}

fn write_output(output: &Path, filename: &str, bytes: &[u8]) -> Result<()> {
    let path = if output.is_dir() {
        output.join(Path::new(filename).file_name().unwrap_or(filename.as_ref()))
    } else {
        PathBuf::from(output)
    };
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), len = bytes.len(), "wrote subtitle");
    Ok(())
}
