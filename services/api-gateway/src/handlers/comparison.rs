use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use specmatch_comparison::{generate_report, run_comparison, REPORT_MIME_TYPE};
use specmatch_utils::{
    log_error, read_file_content, read_vendor_table, report_file_name, validate_model,
    ScratchSpace, SpecMatchError, SpecMatchResult, UploadForm,
};
use std::path::PathBuf;
use tracing::info;

use crate::{middleware::ApiError, AppState};

pub const TECH_SPEC_FIELD: &str = "tech_spec_file";
pub const VENDOR_OFFERS_FIELD: &str = "vendor_offers_file";
pub const PROJECT_NAME_FIELD: &str = "project_name";

const MISSING_FILE_MESSAGE: &str = "Technical Specification file or Vendor Offers file is missing.";
const EMPTY_FILE_NAME_MESSAGE: &str = "No selected file for Technical Specification or Vendor Offers.";

/// A file part as received from the form
#[derive(Debug)]
struct UploadedFile {
    file_name: String,
    data: Bytes,
}

#[derive(Debug, Default)]
struct ComparisonUpload {
    tech_spec: Option<UploadedFile>,
    vendor_offers: Option<UploadedFile>,
    project_name: Option<String>,
}

/// Generated report ready to be sent back
struct ComparisonOutcome {
    workbook: Vec<u8>,
    vendor_count: usize,
}

pub async fn upload_and_compare(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    
    let (tech_spec, vendor_offers) = match (upload.tech_spec, upload.vendor_offers) {
        (Some(tech_spec), Some(vendor_offers)) => (tech_spec, vendor_offers),
        _ => return Err(ApiError::bad_request(MISSING_FILE_MESSAGE)),
    };
    if tech_spec.file_name.is_empty() || vendor_offers.file_name.is_empty() {
        return Err(ApiError::bad_request(EMPTY_FILE_NAME_MESSAGE));
    }
    
    let project_name = match upload.project_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => state.config.uploads.default_project_name.clone(),
    };
    validate_model(&UploadForm {
        project_name: project_name.clone(),
    })?;
    
    info!(
        project = %project_name,
        tech_spec = %tech_spec.file_name,
        vendor_offers = %vendor_offers.file_name,
        "Starting comparison"
    );
    
    let scratch_root = state.config.uploads.scratch_root.clone();
    let report_project = project_name.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        compare_uploads(scratch_root, &report_project, &tech_spec, &vendor_offers)
    })
    .await
    .map_err(|e| SpecMatchError::internal(format!("Comparison task failed: {}", e)))
    .and_then(|result| result);
    
    match outcome {
        Ok(outcome) => {
            state.metrics.record_success(outcome.vendor_count);
            info!(
                project = %project_name,
                vendors = outcome.vendor_count,
                bytes = outcome.workbook.len(),
                "Comparison report generated"
            );
            
            let disposition = format!("attachment; filename=\"{}\"", report_file_name(&project_name));
            Ok((
                [
                    (header::CONTENT_TYPE, REPORT_MIME_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                outcome.workbook,
            )
                .into_response())
        }
        Err(e) => {
            state.metrics.record_failure();
            log_error!(e, "Comparison failed", project = %project_name);
            Err(ApiError::processing_failed(&e))
        }
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<ComparisonUpload, ApiError> {
    let mut upload = ComparisonUpload::default();
    
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        
        match (name.as_str(), file_name) {
            // A part without a filename is a plain form value, not a file
            (TECH_SPEC_FIELD, Some(file_name)) => {
                let data = read_field(field).await?;
                upload.tech_spec = Some(UploadedFile { file_name, data });
            }
            (VENDOR_OFFERS_FIELD, Some(file_name)) => {
                let data = read_field(field).await?;
                upload.vendor_offers = Some(UploadedFile { file_name, data });
            }
            (PROJECT_NAME_FIELD, _) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid project name: {}", e)))?;
                upload.project_name = Some(value);
            }
            _ => {}
        }
    }
    
    Ok(upload)
}

async fn read_field(field: axum::extract::multipart::Field<'_>) -> Result<Bytes, ApiError> {
    field
        .bytes()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read uploaded file: {}", e)))
}

/// Runs extraction, comparison and report generation inside a scratch
/// directory that is removed when this returns.
fn compare_uploads(
    scratch_root: Option<PathBuf>,
    project_name: &str,
    tech_spec: &UploadedFile,
    vendor_offers: &UploadedFile,
) -> SpecMatchResult<ComparisonOutcome> {
    let scratch = ScratchSpace::new(scratch_root.as_deref())?;
    
    let spec_path = scratch.persist("tech_spec", &tech_spec.file_name, &tech_spec.data)?;
    let offers_path = scratch.persist("vendor_offers", &vendor_offers.file_name, &vendor_offers.data)?;
    
    let spec_text = read_file_content(&spec_path)?;
    let vendors = read_vendor_table(&offers_path)?;
    let results = run_comparison(&spec_text, &vendors)?;
    let workbook = generate_report(project_name, &results)?;
    
    Ok(ComparisonOutcome {
        workbook,
        vendor_count: vendors.len(),
    })
}
