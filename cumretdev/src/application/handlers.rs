use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cumret_core::error::Result;
use cumret_core::text::number::format_invariant;
use cumret_core::{
    AppSettings, Diagnostics, ProcessingConfig, Upload, UploadOutcome, process_text,
    process_upload, validate_upload,
};

use crate::presentation::cli::SettingsOverrides;

fn load_settings(config: Option<&Path>, overrides: &SettingsOverrides) -> Result<AppSettings> {
    let mut settings = match config {
        Some(path) => AppSettings::from_json_file(path)?,
        None => AppSettings::default(),
    };
    if let Some(d) = &overrides.delimiter {
        settings.delimiter = Some(d.clone());
    }
    if let Some(f) = &overrides.date_format {
        settings.date_format = Some(f.clone());
    }
    if let Some(h) = &overrides.header0 {
        settings.header0 = Some(h.clone());
    }
    if let Some(h) = &overrides.header1 {
        settings.header1 = Some(h.clone());
    }
    Ok(settings)
}

fn config_from_args(
    config: Option<PathBuf>,
    overrides: &SettingsOverrides,
) -> Result<ProcessingConfig> {
    load_settings(config.as_deref(), overrides)?.resolve()
}

/// `None` when nothing exists at `path`, the CLI's "no file provided".
fn read_upload(path: &Path) -> Result<Option<Upload>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(Some(Upload::new(name, content)))
}

fn print_diagnostics(diags: &Diagnostics) {
    for m in diags {
        eprintln!("{m}");
    }
}

pub fn handle_chart(
    file: PathBuf,
    config: Option<PathBuf>,
    overrides: &SettingsOverrides,
    json: bool,
    uploads_dir: Option<PathBuf>,
) -> Result<ExitCode> {
    let mut cfg = config_from_args(config, overrides)?;
    if uploads_dir.is_some() {
        cfg.uploads_folder = uploads_dir;
    }
    let upload = read_upload(&file)?;
    tracing::info!(file = %file.display(), "processing upload");

    match process_upload(upload.as_ref(), &cfg) {
        UploadOutcome::Chart { chart, .. } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                println!("categories: {}", chart.categories);
                println!("data: {}", chart.data);
            }
            Ok(ExitCode::SUCCESS)
        }
        UploadOutcome::Rejected(diags) => {
            eprintln!("{}", diags.joined());
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn handle_check(
    file: PathBuf,
    config: Option<PathBuf>,
    overrides: &SettingsOverrides,
) -> Result<ExitCode> {
    let cfg = config_from_args(config, overrides)?;
    let upload = read_upload(&file)?;

    let mut diags = Diagnostics::new();
    validate_upload(upload.as_ref().map(Upload::meta).as_ref(), &cfg, &mut diags);
    if let Some(upload) = upload.filter(|_| diags.is_valid()) {
        let content = cumret_core::pipeline::decode_content(&upload.content)?;
        process_text(content, &cfg, &mut diags)?;
    }

    if diags.is_valid() {
        println!("OK");
        return Ok(ExitCode::SUCCESS);
    }
    for m in &diags {
        println!("{m}");
    }
    Ok(ExitCode::FAILURE)
}

pub fn handle_series(
    file: PathBuf,
    config: Option<PathBuf>,
    overrides: &SettingsOverrides,
) -> Result<ExitCode> {
    let cfg = config_from_args(config, overrides)?;
    let content = std::fs::read(&file)?;
    let content = cumret_core::pipeline::decode_content(&content)?;

    let mut diags = Diagnostics::new();
    let series = process_text(content, &cfg, &mut diags)?;

    println!("{:>6}  {:<12} {:>14} {:>20}", "id", "date", "return", "cumulative");
    for row in &series {
        let id = row.id.map(|i| i.to_string()).unwrap_or_default();
        let cumulative = row
            .cumulative_percent
            .map(format_invariant)
            .unwrap_or_default();
        println!(
            "{:>6}  {:<12} {:>14} {:>20}",
            id,
            cfg.short_date_pattern.format(row.date)?,
            format_invariant(row.return_value),
            cumulative
        );
    }

    print_diagnostics(&diags);
    Ok(if diags.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
