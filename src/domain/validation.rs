use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooManyRecipients { max: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    InvalidNonceLength { min: usize, max: usize, actual: usize },
    NotDigits { field: &'static str, input: String },
    OutOfRange { field: &'static str, min: u32, max: u32, actual: u32 },
    InvertedRange { field: &'static str, begin: u64, end: u64 },
    InvalidUrl { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooManyRecipients { max, actual } => {
                write!(f, "too many recipients: {actual} (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidNonceLength { min, max, actual } => {
                write!(
                    f,
                    "nonce length out of range: {actual} (expected {min}..={max})"
                )
            }
            Self::NotDigits { field, input } => {
                write!(f, "{field} must contain only decimal digits: {input}")
            }
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => {
                write!(
                    f,
                    "{field} out of range: {actual} (expected {min}..={max})"
                )
            }
            Self::InvertedRange { field, begin, end } => {
                write!(f, "{field} begins after it ends: {begin} > {end}")
            }
            Self::InvalidUrl { input } => write!(f, "invalid base url: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "tel" };
        assert_eq!(err.to_string(), "tel must not be empty");

        let err = ValidationError::TooManyRecipients {
            max: 200,
            actual: 201,
        };
        assert_eq!(err.to_string(), "too many recipients: 201 (max 200)");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::NotDigits {
            field: "random",
            input: "12a".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "random must contain only decimal digits: 12a"
        );

        let err = ValidationError::OutOfRange {
            field: "max",
            min: 1,
            max: 100,
            actual: 101,
        };
        assert_eq!(err.to_string(), "max out of range: 101 (expected 1..=100)");

        let err = ValidationError::InvertedRange {
            field: "begin_date",
            begin: 2,
            end: 1,
        };
        assert_eq!(err.to_string(), "begin_date begins after it ends: 2 > 1");
    }
}
