/// フォーム受付ハンドラー
///
/// リクエストボディ（JSON）からname/email/messageを取り出して正規化し、
/// emailをキーにSubmissionを1件保存する。
///
/// 状態遷移: Received → Parsed → Stored → Responded
/// （Received/ParsedからErrorへ遷移しうる。呼び出し間で状態は持たない）
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use super::intake_response::IntakeResponse;
use crate::domain::{FieldPolicy, FieldTypeError, Submission};
use crate::infrastructure::{RepositoryError, SubmissionRepository};

/// フォーム受付のエラー型
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntakeError {
    /// ボディがJSONオブジェクトでない（strictポリシーでは型違いも含む）
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// ストレージへの書き込み失敗（リトライしない）
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl IntakeError {
    /// 呼び出し元に返すHTTPステータス
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for IntakeError {
    fn from(err: RepositoryError) -> Self {
        IntakeError::StorageUnavailable(err.to_string())
    }
}

impl From<FieldTypeError> for IntakeError {
    fn from(err: FieldTypeError) -> Self {
        IntakeError::MalformedRequest(err.to_string())
    }
}

/// フォーム送信を受け付けるハンドラー
///
/// リポジトリは起動時に一度だけ構築し、共有参照で各呼び出しに渡す。
pub struct IntakeHandler<SR>
where
    SR: SubmissionRepository,
{
    /// 保存先リポジトリ
    repo: SR,
    /// 文字列以外のフィールド値の扱い
    policy: FieldPolicy,
}

impl<SR> IntakeHandler<SR>
where
    SR: SubmissionRepository,
{
    /// 新しいIntakeHandlerを作成
    pub fn new(repo: SR, policy: FieldPolicy) -> Self {
        Self { repo, policy }
    }

    /// 保存先リポジトリへの参照を取得
    pub fn repository(&self) -> &SR {
        &self.repo
    }

    /// 受信ボディを処理してHTTPレスポンスを返す
    ///
    /// エラーはすべてJSONレスポンスに変換され、呼び出し元には伝播しない。
    pub async fn handle(&self, body: &[u8]) -> Response<Body> {
        let result = self.process(body).await.map(|_| ());
        IntakeResponse::from(result).into_response()
    }

    /// 受信ボディを処理して保存したSubmissionを返す
    ///
    /// # 処理フロー
    /// 1. ボディをJSONオブジェクトとしてパース
    /// 2. name/email/messageを抽出（欠落・null・空文字は"N/A"）
    /// 3. 受信時刻のタイムスタンプを付与
    /// 4. emailをキーに無条件でput（同じemailは上書き）
    pub async fn process(&self, body: &[u8]) -> Result<Submission, IntakeError> {
        info!(body_len = body.len(), "フォーム受信");

        let submission = self.parse(body).inspect_err(|err| {
            warn!(error = %err, "不正なリクエスト");
        })?;

        if let Err(err) = self.repo.put(&submission).await {
            error!(
                email = %submission.email,
                error = %err,
                "Submission保存失敗"
            );
            return Err(err.into());
        }

        info!(
            email = %submission.email,
            timestamp = %submission.timestamp,
            "Submission保存完了"
        );

        Ok(submission)
    }

    /// ボディからSubmissionを構築（I/Oなし）
    fn parse(&self, body: &[u8]) -> Result<Submission, IntakeError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| IntakeError::MalformedRequest(format!("invalid JSON: {e}")))?;

        let object = value.as_object().ok_or_else(|| {
            IntakeError::MalformedRequest("request body must be a JSON object".to_string())
        })?;

        let fields = self.policy.extract(object)?;

        Ok(Submission::received_now(fields))
    }
}
