use crate::domain::errors::ErrorResponse;
use crate::domain::validation::validate_file_name;

/// Validated blob name; case is preserved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    pub fn new(value: &str) -> Result<Self, Vec<ErrorResponse>> {
        let errors = validate_file_name(value);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
