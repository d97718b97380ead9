use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Student
///
/// Ids come from the roster file as strings; integer ids are accepted and
/// normalized to their decimal form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Creates a new `StudentId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StudentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

impl fmt::Debug for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentId({:?})", self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StudentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Error type for parsing an id from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError;

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("student id cannot be blank")
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for StudentId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError);
        }
        Ok(Self::new(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_display() {
        let id = StudentId::new("42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_student_id_from_str() {
        let id: StudentId = " s-7 ".parse().unwrap();
        assert_eq!(id, StudentId::new("s-7"));
    }

    #[test]
    fn test_student_id_from_str_blank() {
        assert!("   ".parse::<StudentId>().is_err());
    }

    #[test]
    fn test_student_id_accepts_numbers() {
        let ids: Vec<StudentId> = serde_json::from_str(r#"["a", 12]"#).unwrap();
        assert_eq!(ids, vec![StudentId::new("a"), StudentId::new("12")]);
    }

    #[test]
    fn test_student_id_serializes_as_string() {
        let json = serde_json::to_string(&StudentId::new("9")).unwrap();
        assert_eq!(json, r#""9""#);
    }
}
