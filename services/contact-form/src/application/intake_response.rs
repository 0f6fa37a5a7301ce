// フォーム送信レスポンス
//
// 処理結果をAPI Gatewayに返すHTTPレスポンス（JSONボディ）に変換する。

use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::Serialize;

use super::intake_handler::IntakeError;

/// 成功時のメッセージ
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// シリアライズに失敗した場合のボディ（実際には発生しない）
const FALLBACK_BODY: &str = r#"{"error":"Internal server error"}"#;

/// レスポンスボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// `{"message": ...}`
    Success { message: String },
    /// `{"error": ...}`
    Error { error: String },
}

/// ステータスコードとJSONボディの組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeResponse {
    status: StatusCode,
    body: ResponseBody,
}

impl IntakeResponse {
    /// 200 OK
    pub fn success() -> Self {
        Self {
            status: StatusCode::OK,
            body: ResponseBody::Success {
                message: SUCCESS_MESSAGE.to_string(),
            },
        }
    }

    /// エラー種別に応じた4xx/5xx
    ///
    /// ストレージ障害の詳細は呼び出し元に返さない。
    pub fn from_error(err: &IntakeError) -> Self {
        let error = match err {
            IntakeError::MalformedRequest(_) => err.to_string(),
            IntakeError::StorageUnavailable(_) => "Failed to store submission".to_string(),
        };

        Self {
            status: err.status_code(),
            body: ResponseBody::Error { error },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// ボディをJSON文字列にシリアライズ
    pub fn body_json(&self) -> String {
        serde_json::to_string(&self.body).unwrap_or_else(|_| FALLBACK_BODY.to_string())
    }

    /// `Content-Type: application/json`付きのHTTPレスポンスに変換
    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::Text(self.body_json()));
        *response.status_mut() = self.status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}

impl From<Result<(), IntakeError>> for IntakeResponse {
    fn from(result: Result<(), IntakeError>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(err) => Self::from_error(&err),
        }
    }
}
