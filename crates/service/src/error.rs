use dsa::DsaError;
use records::RecordError;
use thiserror::Error;

/// Failure of a request flow.
///
/// Absence inside a structure is not an error; a flow turns it into
/// `NotFound` only when the caller asked for one specific record.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields(#[from] RecordError),

    #[error("{0} with that username or email already exists")]
    Conflict(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),

    #[error("User does not exist")]
    UserMissing,

    #[error(transparent)]
    Structure(#[from] DsaError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP-style status the failure maps to
    pub fn status(&self) -> u16 {
        match self {
            ApiError::MissingFields(_) | ApiError::InvalidId(_) | ApiError::UserMissing => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::Structure(_) | ApiError::Store(_) => 500,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// Identifiers arrive as text and must name a positive integer id
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    dsa::parse_key::<i64>(raw)
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("User").status(), 404);
        assert_eq!(ApiError::Conflict("User").status(), 409);
        assert_eq!(ApiError::UserMissing.status(), 400);
        assert_eq!(
            ApiError::from(RecordError::MissingFields(vec!["title".into()])).status(),
            400
        );
        assert_eq!(ApiError::from(anyhow::anyhow!("boom")).status(), 500);
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::NotFound("User").to_string(), "User not found");
        assert_eq!(
            ApiError::Conflict("User").to_string(),
            "User with that username or email already exists"
        );
        assert_eq!(ApiError::UserMissing.to_string(), "User does not exist");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(matches!(parse_id("0"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId(_))));
    }
}
