use thiserror::Error;

/// Rejections raised while turning form input into a `UserInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    EmptyName,
    #[error("birth date is required")]
    EmptyBirthDate,
    #[error("invalid birth date '{0}': expected YYYY-MM-DD")]
    InvalidBirthDate(String),
    #[error("invalid birth time '{0}': expected HH:MM")]
    InvalidBirthTime(String),
}

impl ValidationError {
    /// Short hint for the form field that needs attention.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "name",
            ValidationError::EmptyBirthDate | ValidationError::InvalidBirthDate(_) => "birth_date",
            ValidationError::InvalidBirthTime(_) => "birth_time",
        }
    }
}
