pub mod config;
pub mod logging;
pub mod error;
pub mod validation;
pub mod documents;

pub use config::*;
pub use logging::*;
pub use error::*;
pub use validation::*;
pub use documents::{
    extract_text, read_file_content, read_vendor_table, write_workbook,
    DocumentKind, ScratchSpace, SheetModel, TableFormat,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.uploads.default_project_name, "Untitled Project");
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_error_handling() {
        let error = SpecMatchError::validation("tech_spec_file", "missing");
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert_eq!(error.http_status_code(), 400);

        assert_eq!(SpecMatchError::EmptyRequirements.http_status_code(), 500);
        assert_eq!(SpecMatchError::EmptyVendorTable.error_code(), "EMPTY_VENDOR_TABLE");
    }

    #[test]
    fn test_error_response_from_error() {
        let response = ErrorResponse::from(SpecMatchError::EmptyRequirements);
        assert_eq!(response.code, "EMPTY_REQUIREMENTS");
        assert_eq!(
            response.error,
            "Could not extract any requirements from the technical specification. Please ensure it contains clear text."
        );
    }
}
