use crate::chart::{ChartData, project};
use crate::diagnostics::Diagnostics;
use crate::domain::{PercentRow, Upload};
use crate::error::Result;
use crate::read::convert::convert_rows;
use crate::read::rows::read_rows;
use crate::series::assemble;
use crate::settings::ProcessingConfig;
use crate::uploads::store_upload;
use crate::validate::validate_upload;

pub const MSG_UPLOAD_FAILED: &str = "File upload failed!!";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Outcome of one upload: either a chart or the full list of messages.
#[derive(Clone, Debug)]
pub enum UploadOutcome {
    Chart {
        series: Vec<PercentRow>,
        chart: ChartData,
    },
    Rejected(Diagnostics),
}

impl UploadOutcome {
    pub fn is_chart(&self) -> bool {
        matches!(self, UploadOutcome::Chart { .. })
    }
}

/// Reader, converter and assembler over already-decoded text.
pub fn process_text(
    content: &str,
    config: &ProcessingConfig,
    diags: &mut Diagnostics,
) -> Result<Vec<PercentRow>> {
    let raw = read_rows(content, config, diags)?;
    let typed = convert_rows(&raw, config, diags);
    assemble(typed, config, diags)
}

pub fn decode_content(bytes: &[u8]) -> Result<&str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    Ok(std::str::from_utf8(bytes)?)
}

/// Validates, optionally stores, and processes an upload.
///
/// Any recorded message rejects the whole upload, duplicate-date notes
/// included; a partial chart is never produced. Fatal errors are turned into
/// two trailing messages instead of escaping.
pub fn process_upload(upload: Option<&Upload>, config: &ProcessingConfig) -> UploadOutcome {
    let mut diags = Diagnostics::new();
    let meta = upload.map(Upload::meta);
    validate_upload(meta.as_ref(), config, &mut diags);

    if let Some(upload) = upload.filter(|_| diags.is_valid()) {
        match run(upload, config, &mut diags) {
            Ok(Some(accepted)) => return accepted,
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, file = %upload.file_name, "upload processing failed");
                diags.push(MSG_UPLOAD_FAILED);
                diags.push(e.to_string());
            }
        }
    }

    tracing::warn!(errors = diags.len(), "upload rejected");
    UploadOutcome::Rejected(diags)
}

fn run(
    upload: &Upload,
    config: &ProcessingConfig,
    diags: &mut Diagnostics,
) -> Result<Option<UploadOutcome>> {
    if let Some(folder) = &config.uploads_folder {
        let stored = store_upload(folder, &upload.file_name, &upload.content)?;
        tracing::debug!(path = %stored.display(), "upload stored");
    }

    let content = decode_content(&upload.content)?;
    let series = process_text(content, config, diags)?;
    if !diags.is_valid() {
        return Ok(None);
    }
    let chart = project(&series, config)?;
    tracing::debug!(points = series.len(), "chart projected");
    Ok(Some(UploadOutcome::Chart { series, chart }))
}
