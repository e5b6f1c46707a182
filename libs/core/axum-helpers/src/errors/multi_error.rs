use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::ValidationErrors;

/// Per-request collection of field errors.
///
/// Each key (a field name or a processing step such as `bindParam`) holds one
/// message; appending to a key that already has one joins them with `"; "`.
/// Keys are kept sorted so rendered output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MultiError {
    errs: BTreeMap<String, String>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `err` under `key`. `None` is ignored.
    pub fn append<E: fmt::Display>(&mut self, key: impl Into<String>, err: Option<E>) {
        let Some(err) = err else {
            return;
        };

        self.errs
            .entry(key.into())
            .and_modify(|existing| {
                existing.push_str("; ");
                existing.push_str(&err.to_string());
            })
            .or_insert_with(|| err.to_string());
    }

    pub fn append_message(&mut self, key: impl Into<String>, message: impl fmt::Display) {
        self.append(key, Some(message));
    }

    pub fn has_error(&self) -> bool {
        !self.errs.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errs.is_empty()
    }

    pub fn clear(&mut self) {
        self.errs.clear();
    }

    pub fn to_map(&self) -> &BTreeMap<String, String> {
        &self.errs
    }

    /// Union of both collections; on a shared key the message from `b` wins.
    pub fn merge(a: &MultiError, b: &MultiError) -> MultiError {
        let mut errs = a.errs.clone();
        errs.extend(b.errs.iter().map(|(k, v)| (k.clone(), v.clone())));
        MultiError { errs }
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, message)) in self.errs.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{key}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {}

impl From<ValidationErrors> for MultiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut collected = MultiError::new();
        for (field, failures) in errors.field_errors() {
            for failure in failures {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| failure.code.to_string());
                collected.append_message(field.to_string(), message);
            }
        }
        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_append_none_is_ignored() {
        let mut errs = MultiError::new();
        errs.append("title", None::<String>);
        assert!(!errs.has_error());
    }

    #[test]
    fn test_repeated_append_joins_messages() {
        let mut errs = MultiError::new();
        errs.append_message("title", "is required");
        errs.append_message("title", "too long");
        assert_eq!(errs.to_map()["title"], "is required; too long");
    }

    #[test]
    fn test_clear_resets_has_error() {
        let mut errs = MultiError::new();
        errs.append_message("limit", "must be numeric");
        assert!(errs.has_error());
        errs.clear();
        assert!(!errs.has_error());
    }

    #[test]
    fn test_merge_second_wins() {
        let mut a = MultiError::new();
        a.append_message("title", "from a");
        a.append_message("summary", "only in a");
        let mut b = MultiError::new();
        b.append_message("title", "from b");

        let merged = MultiError::merge(&a, &b);
        assert_eq!(merged.to_map()["title"], "from b");
        assert_eq!(merged.to_map()["summary"], "only in a");
        assert_eq!(a.to_map()["title"], "from a");
    }

    #[test]
    fn test_display_lists_sorted_pairs() {
        let mut errs = MultiError::new();
        errs.append_message("title", "is required");
        errs.append_message("image", "too long");
        assert_eq!(errs.to_string(), "image: too long\ntitle: is required");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errs = MultiError::new();
        errs.append_message("error", "id must be numeric");
        assert_eq!(
            serde_json::to_value(&errs).unwrap(),
            serde_json::json!({"error": "id must be numeric"})
        );
    }

    #[derive(Validate)]
    struct Input {
        #[validate(length(min = 1, message = "title is required"))]
        title: String,
        #[validate(length(max = 3))]
        code: String,
    }

    #[test]
    fn test_from_validation_errors_uses_message_or_code() {
        let input = Input {
            title: String::new(),
            code: "toolong".into(),
        };
        let errs = MultiError::from(input.validate().unwrap_err());
        assert_eq!(errs.to_map()["title"], "title is required");
        assert_eq!(errs.to_map()["code"], "length");
    }
}
