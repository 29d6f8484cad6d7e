use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request file error: {0}")]
    RequestFileError(#[from] toml::de::Error),

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Form is not submittable: {reason}")]
    NotSubmittable { reason: String },
}

pub type Result<T> = std::result::Result<T, FormError>;

/// Classification of a failed submission attempt. One variant per response
/// class the endpoint is known to produce, plus the two transport cases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("bad request (400)")]
    BadRequest,

    #[error("unauthorized (401)")]
    Unauthorized,

    #[error("forbidden (403)")]
    Forbidden,

    #[error("conflict (409)")]
    Conflict,

    #[error("unprocessable entity (422)")]
    UnprocessableEntity,

    #[error("server error (500)")]
    ServerError,

    #[error("unexpected status {0}")]
    UnknownStatus(u16),

    #[error("no response received")]
    NetworkUnreachable,

    #[error("request could not be sent")]
    ClientFault,
}

impl SubmissionError {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => SubmissionError::BadRequest,
            401 => SubmissionError::Unauthorized,
            403 => SubmissionError::Forbidden,
            409 => SubmissionError::Conflict,
            422 => SubmissionError::UnprocessableEntity,
            500 => SubmissionError::ServerError,
            other => SubmissionError::UnknownStatus(other),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::BadRequest => {
                "The server rejected the request as malformed. Please review the form and try again.".to_string()
            }
            SubmissionError::Unauthorized => {
                "You are not signed in. Please authenticate and resubmit.".to_string()
            }
            SubmissionError::Forbidden => {
                "You do not have permission to submit financing requests.".to_string()
            }
            SubmissionError::Conflict => {
                "A financing request with this project code already exists.".to_string()
            }
            SubmissionError::UnprocessableEntity => {
                "The server could not process the submitted values.".to_string()
            }
            SubmissionError::ServerError => {
                "The submission service encountered an internal error. Please resubmit later.".to_string()
            }
            SubmissionError::UnknownStatus(code) => {
                format!("The submission service returned an unexpected status ({}).", code)
            }
            SubmissionError::NetworkUnreachable => {
                "Could not reach the submission service. Check your connection and resubmit.".to_string()
            }
            SubmissionError::ClientFault => {
                "The request could not be sent. Please resubmit.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_known_codes() {
        assert_eq!(SubmissionError::from_status(400), SubmissionError::BadRequest);
        assert_eq!(SubmissionError::from_status(401), SubmissionError::Unauthorized);
        assert_eq!(SubmissionError::from_status(403), SubmissionError::Forbidden);
        assert_eq!(SubmissionError::from_status(409), SubmissionError::Conflict);
        assert_eq!(
            SubmissionError::from_status(422),
            SubmissionError::UnprocessableEntity
        );
        assert_eq!(SubmissionError::from_status(500), SubmissionError::ServerError);
    }

    #[test]
    fn test_from_status_unknown_codes() {
        assert_eq!(
            SubmissionError::from_status(418),
            SubmissionError::UnknownStatus(418)
        );
        assert_eq!(
            SubmissionError::from_status(503),
            SubmissionError::UnknownStatus(503)
        );
    }

    #[test]
    fn test_messages_are_distinct() {
        let kinds = [
            SubmissionError::BadRequest,
            SubmissionError::Unauthorized,
            SubmissionError::Forbidden,
            SubmissionError::Conflict,
            SubmissionError::UnprocessableEntity,
            SubmissionError::ServerError,
            SubmissionError::UnknownStatus(418),
            SubmissionError::NetworkUnreachable,
            SubmissionError::ClientFault,
        ];
        let messages: std::collections::HashSet<String> =
            kinds.iter().map(|k| k.user_message()).collect();
        assert_eq!(messages.len(), kinds.len());
    }
}
