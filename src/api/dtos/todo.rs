use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::errors::TodoApiError;

pub const TITLE_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Body accepted by create and update.
///
/// Unknown fields such as `id` or the timestamps are ignored; the server owns
/// those.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TodoPayload {
    #[schema(min_length = 1, max_length = 100)]
    pub title: String,

    #[schema(min_length = 1, max_length = 1000)]
    pub description: String,

    #[serde(default)]
    pub completed: bool,
}

impl TodoPayload {
    /// Checks required fields and length limits before anything is persisted
    pub fn validate(&self) -> Result<(), TodoApiError> {
        check_text("title", &self.title, TITLE_MAX_LENGTH)?;
        check_text("description", &self.description, DESCRIPTION_MAX_LENGTH)?;

        Ok(())
    }
}

fn check_text(field: &str, value: &str, max_length: usize) -> Result<(), TodoApiError> {
    if value.is_empty() {
        return Err(TodoApiError::Validation(format!("{} is required", field)));
    }

    // limits count characters, like varchar(n)
    if value.chars().count() > max_length {
        return Err(TodoApiError::Validation(format!(
            "{} must be at most {} characters",
            field, max_length
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn payload(title: &str, description: &str) -> TodoPayload {
        TodoPayload {
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
        }
    }

    #[rstest]
    #[case("t", "d")]
    #[case(&"a".repeat(100), &"b".repeat(1000))]
    #[case(&"é".repeat(100), "multi-byte characters count once")]
    fn accepts_valid_payloads(#[case] title: &str, #[case] description: &str) {
        assert_eq!(payload(title, description).validate(), Ok(()));
    }

    #[rstest]
    #[case("", "d", "title is required")]
    #[case("t", "", "description is required")]
    #[case(&"a".repeat(101), "d", "title must be at most 100 characters")]
    #[case("t", &"b".repeat(1001), "description must be at most 1000 characters")]
    fn rejects_invalid_payloads(
        #[case] title: &str,
        #[case] description: &str,
        #[case] message: &str,
    ) {
        assert_eq!(
            payload(title, description).validate(),
            Err(TodoApiError::Validation(message.to_string()))
        );
    }

    #[test]
    fn completed_defaults_to_false() {
        let body: TodoPayload =
            serde_json::from_str(r#"{"title":"t","description":"d"}"#).unwrap();

        assert!(!body.completed);
    }

    #[test]
    fn server_owned_fields_are_ignored() {
        let body: TodoPayload = serde_json::from_str(
            r#"{"id":42,"title":"t","description":"d","completed":true,"created_at":"2020-01-01T00:00:00"}"#,
        )
        .unwrap();

        assert_eq!(body.title, "t");
        assert!(body.completed);
    }

    #[test]
    fn missing_description_fails_to_decode() {
        let result: Result<TodoPayload, _> = serde_json::from_str(r#"{"title":"t"}"#);

        assert!(result.is_err());
    }
}
