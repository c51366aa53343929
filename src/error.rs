use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use config::ConfigError;
use derivative::Derivative;
use mongodb::error::Error as DatabaseError;
use serde::{Serialize, Serializer};

use crate::campaign::validation::FieldError;
use crate::campaign::CampaignId;

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    CampaignValidationFailed {
        errors: Vec<FieldError>,
    },
    DonationValidationFailed {
        errors: Vec<FieldError>,
    },

    // 404
    PathNotFound,
    CampaignNotFound {
        campaign_id: CampaignId,
    },

    // 500
    #[serde(serialize_with = "display")]
    FailedDatabaseCall(#[derivative(PartialEq = "ignore")] DatabaseError),
    #[serde(serialize_with = "display")]
    InvalidConfiguration(#[derivative(PartialEq = "ignore")] ConfigError),
    #[serde(serialize_with = "display")]
    IoError(#[derivative(PartialEq = "ignore")] IoError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidPath(_) => "E4001001",
            Error::CampaignValidationFailed { .. } => "E4001002",
            Error::DonationValidationFailed { .. } => "E4001003",
            Error::PathNotFound => "E4041000",
            Error::CampaignNotFound { .. } => "E4041001",
            Error::FailedDatabaseCall(_) => "E5001000",
            Error::InvalidConfiguration(_) => "E5001001",
            Error::IoError(_) => "E5001002",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Error::InvalidJson(err) => format!("The given json could not be parsed: {}", err),
            Error::InvalidPath(err) => format!("The given path could not be parsed: {}", err),
            Error::CampaignValidationFailed { errors } => {
                format!("Campaign validation failed: {}", describe(errors))
            }
            Error::DonationValidationFailed { errors } => {
                format!("Donation validation failed: {}", describe(errors))
            }
            Error::PathNotFound => "The requested path was not found".to_string(),
            Error::CampaignNotFound { .. } => "Campaign not found".to_string(),
            Error::FailedDatabaseCall(err) => format!(
                "An error occurred when communicating with the database: {}",
                err
            ),
            Error::InvalidConfiguration(err) => format!("The configuration is invalid: {}", err),
            Error::IoError(err) => format!("An error occurred during an I/O operation: {}", err),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::CampaignValidationFailed { .. } => StatusCode::BAD_REQUEST,
            Error::DonationValidationFailed { .. } => StatusCode::BAD_REQUEST,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::CampaignNotFound { .. } => StatusCode::NOT_FOUND,
            Error::FailedDatabaseCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        #[derive(Serialize)]
        struct Dummy<'a> {
            message: String,
            error_code: &'static str,
            error_meta: &'a Error,
        }

        HttpResponse::build(self.status_code()).json(&Dummy {
            message: self.message(),
            error_code: self.error_code(),
            error_meta: self,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<DatabaseError> for Error {
    fn from(error: DatabaseError) -> Error {
        Error::FailedDatabaseCall(error)
    }
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Error {
        Error::InvalidConfiguration(error)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::FailedDatabaseCall(err) => Some(err),
            Error::InvalidConfiguration(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join(", ")
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields() {
        let error = Error::CampaignValidationFailed {
            errors: vec![
                FieldError::new("title", "is required"),
                FieldError::new("targetAmount", "must be at least 1"),
            ],
        };

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.message(),
            "Campaign validation failed: title: is required, targetAmount: must be at least 1"
        );
    }

    #[test]
    fn missing_campaign_is_not_found() {
        let error = Error::CampaignNotFound {
            campaign_id: CampaignId::new(),
        };

        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.message(), "Campaign not found");
    }
}
