use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Closed set of error kinds reported to API clients.
///
/// The numeric ids are part of the public contract: clients branch on
/// `errorNumber`, so the discriminants must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    EntityAlreadyExist = 1,
    ParameterTooLarge = 2,
    ParameterRequired = 3,
    EntityNoFound = 4,
    ParameterTooSmall = 5,
    ParameterCannotBeNull = 6,
    EntityNoUploaded = 7,
    EntityNoDeleted = 8,
    ServerError = 9,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unmappable error code: {0}")]
pub struct UnmappableErrorCode(pub i32);

impl ErrorCode {
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::EntityAlreadyExist,
        ErrorCode::ParameterTooLarge,
        ErrorCode::ParameterRequired,
        ErrorCode::EntityNoFound,
        ErrorCode::ParameterTooSmall,
        ErrorCode::ParameterCannotBeNull,
        ErrorCode::EntityNoUploaded,
        ErrorCode::EntityNoDeleted,
        ErrorCode::ServerError,
    ];

    /// Stable numeric identifier
    pub fn number(self) -> i32 {
        self as i32
    }

    /// Description template and numeric id
    pub fn message(self) -> (&'static str, i32) {
        let description = match self {
            ErrorCode::EntityAlreadyExist => "The entity already exists",
            ErrorCode::ParameterTooLarge => "The parameter value is too large",
            ErrorCode::ParameterRequired => "The parameter is required",
            ErrorCode::EntityNoFound => "The entity could not be found",
            ErrorCode::ParameterTooSmall => "The parameter value is too small",
            ErrorCode::ParameterCannotBeNull => "The parameter cannot be null or empty",
            ErrorCode::EntityNoUploaded => "The entity could not be uploaded",
            ErrorCode::EntityNoDeleted => "The entity could not be deleted",
            ErrorCode::ServerError => "An internal server error occurred",
        };
        (description, self.number())
    }
}

impl TryFrom<i32> for ErrorCode {
    type Error = UnmappableErrorCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.number() == value)
            .ok_or(UnmappableErrorCode(value))
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Structured description of one validation or operational failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_number: i32,
    pub error_description: String,
    pub parameter_name: String,
    pub parameter_value: Option<String>,
}

impl ErrorResponse {
    pub fn new(
        code: ErrorCode,
        parameter_name: impl Into<String>,
        parameter_value: Option<String>,
    ) -> Self {
        let (description, number) = code.message();
        Self {
            error_number: number,
            error_description: description.to_string(),
            parameter_name: parameter_name.into(),
            parameter_value,
        }
    }

    /// Append backend detail to the description
    pub fn with_detail(mut self, detail: &str) -> Self {
        self.error_description.push(' ');
        self.error_description.push_str(detail);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ids_are_stable() {
        let ids: Vec<i32> = ErrorCode::ALL.iter().map(|c| c.number()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(ErrorCode::EntityNoFound.message().1, 4);
        assert_eq!(ErrorCode::ParameterTooSmall.message().1, 5);
        assert_eq!(ErrorCode::ParameterCannotBeNull.message().1, 6);
    }

    #[test]
    fn test_try_from_round_trips_and_rejects_unknown() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.number()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(0), Err(UnmappableErrorCode(0)));
        assert_eq!(ErrorCode::try_from(10), Err(UnmappableErrorCode(10)));
    }

    #[test]
    fn test_error_response_serializes_camel_case() {
        let response = ErrorResponse::new(ErrorCode::EntityNoUploaded, "fileData", None)
            .with_detail("Service Unavailable");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["errorNumber"], 7);
        assert_eq!(
            json["errorDescription"],
            "The entity could not be uploaded Service Unavailable"
        );
        assert_eq!(json["parameterName"], "fileData");
        assert!(json["parameterValue"].is_null());
    }
}
