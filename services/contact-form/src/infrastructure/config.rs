/// DynamoDB接続設定
///
/// プロセス起動時に一度だけ読み込む。読み込みに失敗した場合はリクエストを受け付けない。
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

use crate::domain::{FieldPolicy, UnknownFieldPolicy};

/// 環境変数名: 保存先テーブル
pub const ENV_TABLE_NAME: &str = "TABLE_NAME";

/// 起動時設定のエラー型
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid FORM_FIELD_POLICY: {0}")]
    InvalidFieldPolicy(#[from] UnknownFieldPolicy),
}

/// お問い合わせテーブルの設定
///
/// 環境変数:
/// - TABLE_NAME: 保存先DynamoDBテーブル名（必須）
/// - FORM_FIELD_POLICY: `lenient`（デフォルト）または`strict`
#[derive(Debug, Clone)]
pub struct FormTableConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// 保存先テーブル名
    table_name: String,
    /// フィールド型ポリシー
    field_policy: FieldPolicy,
}

impl FormTableConfig {
    /// 環境からAWS設定とテーブル名を読み込み
    pub async fn from_env() -> Result<Self, ConfigurationError> {
        // AWS設定より先に検証し、設定不備なら即座に失敗させる
        let table_name = table_name_from_env()?;
        let field_policy = FieldPolicy::from_env()?;

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        Ok(Self {
            client,
            table_name,
            field_policy,
        })
    }

    /// 明示的な値で作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String, field_policy: FieldPolicy) -> Self {
        Self {
            client,
            table_name,
            field_policy,
        }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// フィールド型ポリシーを取得
    pub fn field_policy(&self) -> FieldPolicy {
        self.field_policy
    }
}

/// 環境変数`TABLE_NAME`を読み込む（空文字は未設定扱い）
pub fn table_name_from_env() -> Result<String, ConfigurationError> {
    std::env::var(ENV_TABLE_NAME)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ConfigurationError::MissingEnvVar(ENV_TABLE_NAME.to_string()))
}
