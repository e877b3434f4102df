use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooLong { field: &'static str, max: usize, actual: usize },
    TooManyDestinations { max: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    InvalidSenderId { input: String },
    TtlOutOfRange { min: u32, max: u32, actual: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} too long: {actual} chars (max {max})")
            }
            Self::TooManyDestinations { max, actual } => {
                write!(f, "too many destinations: {actual} (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidSenderId { input } => {
                write!(
                    f,
                    "invalid sender id: {input} (max 11 alphanumeric or 15 numeric characters, \
                     no spaces or special characters)"
                )
            }
            Self::TtlOutOfRange { min, max, actual } => {
                write!(
                    f,
                    "ttl minutes out of range: {actual} (expected {min}..={max})"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "content" };
        assert_eq!(err.to_string(), "content must not be empty");

        let err = ValidationError::TooManyDestinations { max: 2, actual: 3 };
        assert_eq!(err.to_string(), "too many destinations: 3 (max 2)");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::TooLong {
            field: "content",
            max: 10,
            actual: 11,
        };
        assert_eq!(err.to_string(), "content too long: 11 chars (max 10)");

        let err = ValidationError::TtlOutOfRange {
            min: 1,
            max: 10,
            actual: 11,
        };
        assert_eq!(
            err.to_string(),
            "ttl minutes out of range: 11 (expected 1..=10)"
        );
    }
}
