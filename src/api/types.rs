// API types module
// Acknowledgment body and query parameter helpers

use serde::Serialize;

/// JSON acknowledgment returned by every mutating endpoint
///
/// Serializes as `{"ok":true}`, `{"ok":true,"message":"..."}` or
/// `{"ok":false,"error":"..."}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Ack {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    pub const fn ok() -> Self {
        Self {
            ok: true,
            message: None,
            error: None,
        }
    }

    pub const fn ok_with_message(message: &'static str) -> Self {
        Self {
            ok: true,
            message: Some(message),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            ok: false,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

/// First non-empty value of `key` in a form-encoded query string
pub fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_shapes() {
        assert_eq!(serde_json::to_string(&Ack::ok()).unwrap(), r#"{"ok":true}"#);
        assert_eq!(
            serde_json::to_string(&Ack::ok_with_message("db saved")).unwrap(),
            r#"{"ok":true,"message":"db saved"}"#
        );
        assert_eq!(
            serde_json::to_string(&Ack::failed("disk \"full\"")).unwrap(),
            r#"{"ok":false,"error":"disk \"full\""}"#
        );
    }

    #[test]
    fn test_query_param_decoding() {
        assert_eq!(
            query_param(Some("filename=chart%231.png"), "filename").as_deref(),
            Some("chart#1.png")
        );
        assert_eq!(
            query_param(Some("x=1&filename=my+file.png"), "filename").as_deref(),
            Some("my file.png")
        );
    }

    #[test]
    fn test_query_param_missing_or_blank() {
        assert_eq!(query_param(None, "filename"), None);
        assert_eq!(query_param(Some(""), "filename"), None);
        assert_eq!(query_param(Some("filename="), "filename"), None);
        assert_eq!(
            query_param(Some("filename=&filename=b.png"), "filename").as_deref(),
            Some("b.png")
        );
    }
}
