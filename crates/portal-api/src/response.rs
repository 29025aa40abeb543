//! API Response wrapper

use serde::Serialize;
use chrono::Utc;
use portal_shared::MenuItemId;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    /// Offending entry ids when a batch was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<Vec<MenuItemId>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error_with_invalid(code: &str, message: &str, invalid: Option<Vec<MenuItemId>>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorBody {
                code: code.to_string(),
                message: message.to_string(),
                invalid,
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
