//! HTTP route handlers.

pub mod auth;
pub mod events;
pub mod health;
pub mod host;

use serde::Serialize;

/// Success envelope: `{status: "success", message?, results?, data?}`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Success<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            results: None,
            data: Some(data),
        }
    }

    pub fn list(results: usize, data: T) -> Self {
        Self {
            results: Some(results),
            ..Self::data(data)
        }
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Success<()> {
    pub fn empty() -> Self {
        Self {
            status: "success",
            message: None,
            results: None,
            data: None,
        }
    }

    pub fn message(message: &'static str) -> Self {
        Self::empty().with_message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only_envelope() {
        let json = serde_json::to_value(Success::message("Token sent to email!")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "message": "Token sent to email!"})
        );
    }

    #[test]
    fn test_list_envelope() {
        let json = serde_json::to_value(Success::list(2, vec![1, 2])).unwrap();
        assert_eq!(json["results"], 2);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
