//! Pre-flight checks on the uploaded file as a whole.

use crate::diagnostics::Diagnostics;
use crate::domain::UploadMeta;
use crate::settings::ProcessingConfig;

pub const MSG_NOT_PROVIDED: &str = "The file is not provided.";
pub const MSG_ZERO_SIZE: &str = "The file is of 0 kb size.";

/// Runs every structural check and records one message per failed check.
/// A missing file is reported alone; the other checks all run independently.
pub fn validate_upload(
    upload: Option<&UploadMeta>,
    config: &ProcessingConfig,
    diags: &mut Diagnostics,
) {
    let Some(upload) = upload else {
        diags.push(MSG_NOT_PROVIDED);
        return;
    };
    check_content_length(upload.content_length, diags);
    check_supported_size(upload.content_length, config.max_upload_bytes, diags);
    check_file_name_length(&upload.file_name, config.max_file_name_length, diags);
    check_file_extension(&upload.file_name, &config.allowed_extensions, diags);
}

fn check_content_length(length: u64, diags: &mut Diagnostics) {
    if length == 0 {
        diags.push(MSG_ZERO_SIZE);
    }
}

fn check_supported_size(size: u64, max_bytes: u64, diags: &mut Diagnostics) {
    if size >= max_bytes {
        // one division only; the unit label says MB
        diags.push(format!(
            "Invalid file size. Please upload a file less than {} MB.",
            max_bytes / 1024
        ));
    }
}

fn check_file_name_length(file_name: &str, max_len: usize, diags: &mut Diagnostics) {
    if file_name.chars().count() >= max_len {
        diags.push(format!(
            "File name length should be less than {max_len} symbols."
        ));
    }
}

fn check_file_extension(file_name: &str, allowed: &[String], diags: &mut Diagnostics) {
    if let Some(ext) = extension_of(file_name) {
        let ext = ext.to_lowercase();
        if allowed.iter().any(|a| *a == ext) {
            return;
        }
    }
    diags.push(format!(
        "You have not selected an accepted file format to upload. Please upload: {}.",
        allowed.join(",")
    ));
}

/// Extension including the leading dot, taken from the last path segment.
/// `None` when there is no dot or nothing follows it.
pub fn extension_of(file_name: &str) -> Option<&str> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let dot = name.rfind('.')?;
    let ext = &name[dot..];
    (ext.len() > 1).then_some(ext)
}
