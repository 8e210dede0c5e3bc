//! Syntactic checks for route parameters
//!
//! Every check runs independently and reports its own entry, so a single
//! input can produce several errors (an empty name is both blank and too
//! short). Callers rely on that multiplicity; do not collapse entries.

use crate::domain::errors::{ErrorCode, ErrorResponse};

pub const CONTAINER_NAME_PARAM: &str = "containername";
pub const FILE_NAME_PARAM: &str = "fileName";
pub const FILE_DATA_PARAM: &str = "fileData";

pub const CONTAINER_NAME_MIN_LENGTH: usize = 3;
pub const CONTAINER_NAME_MAX_LENGTH: usize = 63;
pub const FILE_NAME_MAX_LENGTH: usize = 75;

/// Length in characters, not bytes
fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_container_name(container_name: &str) -> Vec<ErrorResponse> {
    let mut errors = Vec::new();
    let value = Some(container_name.to_string());
    let length = char_len(container_name);

    if is_blank(container_name) {
        errors.push(ErrorResponse::new(
            ErrorCode::ParameterCannotBeNull,
            CONTAINER_NAME_PARAM,
            value.clone(),
        ));
    }

    if length < CONTAINER_NAME_MIN_LENGTH {
        errors.push(ErrorResponse::new(
            ErrorCode::ParameterTooSmall,
            CONTAINER_NAME_PARAM,
            value.clone(),
        ));
    }

    if length > CONTAINER_NAME_MAX_LENGTH {
        errors.push(ErrorResponse::new(
            ErrorCode::ParameterTooLarge,
            CONTAINER_NAME_PARAM,
            value,
        ));
    }

    errors
}

pub fn validate_file_name(file_name: &str) -> Vec<ErrorResponse> {
    let mut errors = Vec::new();
    let value = Some(file_name.to_string());
    let length = char_len(file_name);

    if is_blank(file_name) {
        errors.push(ErrorResponse::new(
            ErrorCode::ParameterCannotBeNull,
            FILE_NAME_PARAM,
            value.clone(),
        ));
    }

    if length > FILE_NAME_MAX_LENGTH {
        errors.push(ErrorResponse::new(
            ErrorCode::ParameterTooLarge,
            FILE_NAME_PARAM,
            value.clone(),
        ));
    }

    if length == 0 {
        errors.push(ErrorResponse::new(
            ErrorCode::ParameterTooSmall,
            FILE_NAME_PARAM,
            value,
        ));
    }

    errors
}

/// Container errors first, then file errors
pub fn validate_file_params(container_name: &str, file_name: &str) -> Vec<ErrorResponse> {
    let mut errors = validate_container_name(container_name);
    errors.extend(validate_file_name(file_name));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(errors: &[ErrorResponse]) -> Vec<i32> {
        errors.iter().map(|e| e.error_number).collect()
    }

    #[test]
    fn test_valid_container_name() {
        assert!(validate_container_name("abc").is_empty());
        assert!(validate_container_name(&"a".repeat(63)).is_empty());
    }

    #[test]
    fn test_container_name_too_short() {
        let errors = validate_container_name("12");
        assert_eq!(numbers(&errors), vec![5]);
        assert_eq!(errors[0].parameter_name, "containername");
        assert_eq!(errors[0].parameter_value.as_deref(), Some("12"));
    }

    #[test]
    fn test_container_name_too_long() {
        let errors = validate_container_name(&"a".repeat(64));
        assert_eq!(numbers(&errors), vec![2]);
    }

    #[test]
    fn test_empty_container_name_reports_blank_and_short() {
        let errors = validate_container_name("");
        assert_eq!(numbers(&errors), vec![6, 5]);
    }

    #[test]
    fn test_whitespace_container_name_is_blank_only() {
        let errors = validate_container_name("    ");
        assert_eq!(numbers(&errors), vec![6]);
    }

    #[test]
    fn test_container_name_counts_characters() {
        // three characters, nine bytes
        assert!(validate_container_name("日本語").is_empty());
    }

    #[test]
    fn test_valid_file_name() {
        assert!(validate_file_name("Kitten7.JPG").is_empty());
        assert!(validate_file_name(&"f".repeat(75)).is_empty());
    }

    #[test]
    fn test_file_name_too_long() {
        let errors = validate_file_name(&"f".repeat(76));
        assert_eq!(numbers(&errors), vec![2]);
        assert_eq!(errors[0].parameter_name, "fileName");
    }

    #[test]
    fn test_empty_file_name_reports_blank_and_small() {
        let errors = validate_file_name("");
        assert_eq!(numbers(&errors), vec![6, 5]);
    }

    #[test]
    fn test_file_params_order_container_first() {
        let errors = validate_file_params("ab", &"f".repeat(80));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].parameter_name, "containername");
        assert_eq!(errors[1].parameter_name, "fileName");
    }
}
