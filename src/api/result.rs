/*
 * Responsibility
 * - 全レスポンス共通の envelope {code, message, data, success}
 * - 成功: code "0" / "Success" / success true、失敗: error.rs が fail() で組む
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResult<T> {
    pub code: String,
    pub message: String,
    pub data: Option<T>,
    pub success: bool,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: "0".to_string(),
            message: "Success".to_string(),
            data: Some(data),
            success: true,
        }
    }

    pub fn fail(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
            success: false,
        }
    }
}

impl ApiResult<()> {
    /// Success with `data: null` (write-style endpoints).
    pub fn empty() -> Self {
        Self {
            code: "0".to_string(),
            message: "Success".to_string(),
            data: None,
            success: true,
        }
    }
}
