use serde::{Deserialize, Serialize};

/// Status reported to whatever invoked the export.
///
/// Serializes as `{"statusCode": 200, "body": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatus {
    pub status_code: u16,
    pub body: String,
}

impl ExportStatus {
    pub const OK: u16 = 200;
    pub const CLIENT_ERROR: u16 = 400;
    pub const SERVER_ERROR: u16 = 500;

    pub fn success(records: usize) -> Self {
        Self {
            status_code: Self::OK,
            body: format!("{records} flow log(s) successfully processed!"),
        }
    }

    pub fn client_error(body: impl Into<String>) -> Self {
        Self {
            status_code: Self::CLIENT_ERROR,
            body: body.into(),
        }
    }

    pub fn server_error(body: impl Into<String>) -> Self {
        Self {
            status_code: Self::SERVER_ERROR,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == Self::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&ExportStatus::success(3)).unwrap();
        assert_eq!(
            json,
            r#"{"statusCode":200,"body":"3 flow log(s) successfully processed!"}"#
        );
    }

    #[test]
    fn error_statuses_are_not_success() {
        assert!(!ExportStatus::client_error("bad").is_success());
        assert_eq!(ExportStatus::server_error("down").status_code, 500);
        assert!(ExportStatus::success(0).is_success());
    }
}
