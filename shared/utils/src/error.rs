use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpecMatchError {
    #[error("Unsupported file type for {document}. Please use {supported}.")]
    UnsupportedFormat { document: String, supported: String },
    
    #[error("Could not extract any requirements from the technical specification. Please ensure it contains clear text.")]
    EmptyRequirements,
    
    #[error("Vendor offers Excel file is empty or does not contain expected columns like 'Vendor Name' or 'Offer Details'.")]
    EmptyVendorTable,
    
    #[error("Report serialization error: {message}")]
    Serialization { message: String },
    
    #[error("Document processing error: {message}")]
    DocumentProcessing { message: String },
    
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },
    
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl SpecMatchError {
    pub fn unsupported_format(document: impl Into<String>, supported: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            document: document.into(),
            supported: supported.into(),
        }
    }
    
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
    
    pub fn document_processing(message: impl Into<String>) -> Self {
        Self::DocumentProcessing {
            message: message.into(),
        }
    }
    
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
    
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
    
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
    
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::EmptyRequirements => "EMPTY_REQUIREMENTS",
            Self::EmptyVendorTable => "EMPTY_VENDOR_TABLE",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::DocumentProcessing { .. } => "DOCUMENT_PROCESSING_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }
    
    /// Bad request input is a 400; every pipeline failure is a generic 500.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            _ => 500,
        }
    }
}

pub type SpecMatchResult<T> = Result<T, SpecMatchError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

impl From<SpecMatchError> for ErrorResponse {
    fn from(error: SpecMatchError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for SpecMatchError {
    fn from(error: std::io::Error) -> Self {
        Self::internal(error.to_string())
    }
}

impl From<zip::result::ZipError> for SpecMatchError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::serialization(error.to_string())
    }
}

impl From<quick_xml::Error> for SpecMatchError {
    fn from(error: quick_xml::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

impl From<config::ConfigError> for SpecMatchError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
