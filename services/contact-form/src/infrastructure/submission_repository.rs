/// DynamoDBにお問い合わせ内容を保存するためのリポジトリ
///
/// emailをパーティションキーとして無条件にput_itemする（同じemailは上書き）。
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_dynamodb::types::AttributeValue;
use thiserror::Error;

use crate::domain::Submission;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// スループット超過・スロットリング
    #[error("Throttled: {0}")]
    Throttled(String),

    /// IAM権限不足
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// テーブルが存在しない
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// その他の書き込み失敗（ネットワーク、バリデーション等）
    #[error("Write error: {0}")]
    WriteError(String),
}

impl RepositoryError {
    /// DynamoDBのエラーコードから分類
    pub fn from_error_code(code: Option<&str>, message: String) -> Self {
        match code {
            Some(
                "ProvisionedThroughputExceededException"
                | "RequestLimitExceeded"
                | "ThrottlingException",
            ) => Self::Throttled(message),
            Some("AccessDeniedException") => Self::AccessDenied(message),
            Some("ResourceNotFoundException") => Self::TableNotFound(message),
            _ => Self::WriteError(message),
        }
    }
}

/// Submission永続化用トレイト
///
/// 実際のDynamoDBとテスト用モックを差し替えられるようにする。
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Submissionをemailキーで保存（既存レコードは上書き）
    async fn put(&self, submission: &Submission) -> Result<(), RepositoryError>;
}

/// SubmissionRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoSubmissionRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// 保存先テーブル名
    table_name: String,
}

impl DynamoSubmissionRepository {
    /// 新しいDynamoSubmissionRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - 保存先テーブル名
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl SubmissionRepository for DynamoSubmissionRepository {
    async fn put(&self, submission: &Submission) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("email", AttributeValue::S(submission.email.clone()))
            .item("name", AttributeValue::S(submission.name.clone()))
            .item("message", AttributeValue::S(submission.message.clone()))
            .item("timestamp", AttributeValue::S(submission.timestamp.clone()))
            .send()
            .await
            .map_err(|e| {
                RepositoryError::from_error_code(e.code(), DisplayErrorContext(&e).to_string())
            })?;

        Ok(())
    }
}
