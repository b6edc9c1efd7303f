use thiserror::Error;

pub type Result<T> = std::result::Result<T, InvestorError>;

/// Stage-typed failures of an investor research run.
#[derive(Error, Debug)]
pub enum InvestorError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("No match: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A collaborator answered with a non-2xx status, or could not be
    /// reached at all (`status: None`).
    #[error("{service} request failed{}: {message}", status_suffix(.status))]
    ExternalService {
        service: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl InvestorError {
    pub fn external(service: &'static str, status: Option<u16>, message: impl Into<String>) -> Self {
        InvestorError::ExternalService {
            service,
            status,
            message: message.into(),
        }
    }

    /// Outward HTTP status for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            InvestorError::Input(_) | InvestorError::NotFound(_) => 400,
            InvestorError::Config(_) => 500,
            InvestorError::ExternalService { status, .. } => match status {
                Some(s) if *s < 500 => 400,
                _ => 502,
            },
            InvestorError::EmptyResponse(_) => 502,
            InvestorError::Extraction(_) | InvestorError::Persistence(_) => 500,
        }
    }

    /// Short caller-facing message; upstream bodies go in [`details`](Self::details).
    pub fn public_message(&self) -> String {
        match self {
            InvestorError::Input(message) | InvestorError::NotFound(message) => message.clone(),
            InvestorError::Config(_) => "Server configuration error".to_string(),
            InvestorError::ExternalService { service, .. } => format!("{service} request failed"),
            InvestorError::EmptyResponse(service) => format!("{service} returned an empty response"),
            InvestorError::Extraction(_) => "Structured extraction failed".to_string(),
            InvestorError::Persistence(_) => "Failed to save investor record".to_string(),
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            InvestorError::ExternalService { message, .. }
            | InvestorError::Extraction(message)
            | InvestorError::Persistence(message)
            | InvestorError::Config(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_mapping() {
        assert_eq!(InvestorError::external("Exa", Some(503), "down").status_code(), 502);
        assert_eq!(InvestorError::external("Exa", Some(500), "err").status_code(), 502);
        assert_eq!(InvestorError::external("Exa", Some(401), "key").status_code(), 400);
        assert_eq!(InvestorError::external("Exa", Some(429), "slow").status_code(), 400);
        assert_eq!(InvestorError::external("Exa", None, "dns").status_code(), 502);
    }

    #[test]
    fn taxonomy_status_mapping() {
        assert_eq!(InvestorError::Input("x".into()).status_code(), 400);
        assert_eq!(InvestorError::NotFound("x".into()).status_code(), 400);
        assert_eq!(InvestorError::Config("x".into()).status_code(), 500);
        assert_eq!(InvestorError::EmptyResponse("Deep research").status_code(), 502);
        assert_eq!(InvestorError::Extraction("x".into()).status_code(), 500);
        assert_eq!(InvestorError::Persistence("x".into()).status_code(), 500);
    }

    #[test]
    fn upstream_body_is_exposed_as_details() {
        let err = InvestorError::external("Exa", Some(502), "bad gateway body");
        assert_eq!(err.public_message(), "Exa request failed");
        assert_eq!(err.details(), Some("bad gateway body"));
        assert_eq!(err.to_string(), "Exa request failed (status 502): bad gateway body");
    }

    #[test]
    fn input_errors_carry_no_details() {
        let err = InvestorError::Input("Input (domain or LinkedIn URL) is required".into());
        assert_eq!(err.public_message(), "Input (domain or LinkedIn URL) is required");
        assert_eq!(err.details(), None);
    }
}
