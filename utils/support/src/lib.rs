pub mod cycle;

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyStringError;

impl std::fmt::Display for EmptyStringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "value must be non-empty")
    }
}

impl std::error::Error for EmptyStringError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Display)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    pub fn try_new(value: String) -> Result<Self, EmptyStringError> {
        if value.is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value.to_string())
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_string_rejects_empty() {
        assert!(NonEmptyString::try_new(String::new()).is_err());
        assert!(NonEmptyString::try_from("").is_err());
    }

    #[test]
    fn non_empty_string_accepts_value() -> Result<(), &'static str> {
        let value = NonEmptyString::try_from("Mariana").map_err(|_| "expected non-empty")?;
        assert_eq!(value.as_str(), "Mariana");
        assert_eq!(value.to_string(), "Mariana");
        Ok(())
    }
}
