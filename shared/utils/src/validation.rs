use crate::error::{SpecMatchError, SpecMatchResult};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Form fields accompanying the two uploaded documents
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadForm {
    #[validate(length(min = 1, max = 200, message = "Project name must be between 1 and 200 characters"))]
    pub project_name: String,
}

pub fn validate_model<T: Validate>(model: &T) -> SpecMatchResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(SpecMatchError::validation("form", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match &error.message {
                Some(message) => message.to_string(),
                None => match &error.code {
                    std::borrow::Cow::Borrowed("length") => {
                        format!("Length validation failed for field '{}'", field)
                    }
                    std::borrow::Cow::Borrowed("required") => {
                        format!("Field '{}' is required", field)
                    }
                    _ => format!("Validation failed for field '{}': {}", field, error.code),
                },
            };
            messages.push(message);
        }
    }
    
    messages.join(", ")
}

/// Download name of the comparison workbook for a project.
///
/// Characters that cannot appear inside a quoted Content-Disposition
/// filename are replaced with `_`.
pub fn report_file_name(project_name: &str) -> String {
    let safe: String = project_name
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    
    format!("{}_Technical_Comparison.xlsx", safe)
}
