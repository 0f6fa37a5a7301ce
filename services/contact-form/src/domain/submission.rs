/// お問い合わせフォームの送信レコード
///
/// 1回のリクエストにつき1件作成され、emailをキーとして保存される。
use chrono::{DateTime, Utc};

/// 欠落・null・空文字のフィールドに代入する既定値
pub const SENTINEL: &str = "N/A";

/// タイムスタンプの書式（マイクロ秒精度、例: `2024-01-15 10:30:00.123456`）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// リクエストボディから抽出・正規化済みの3フィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Default for SubmissionFields {
    /// 全フィールドが既定値（"N/A"）
    fn default() -> Self {
        Self {
            name: SENTINEL.to_string(),
            email: SENTINEL.to_string(),
            message: SENTINEL.to_string(),
        }
    }
}

/// 保存対象のSubmission
///
/// `timestamp`はハンドラーが受信時に生成する。呼び出し元の値は使用しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// 送信者メールアドレス（ストレージのキー）
    pub email: String,
    /// 送信者名
    pub name: String,
    /// 本文
    pub message: String,
    /// 受信時刻（UTC）
    pub timestamp: String,
}

impl Submission {
    /// 正規化済みフィールドと受信時刻からSubmissionを作成
    pub fn new(fields: SubmissionFields, received_at: DateTime<Utc>) -> Self {
        Self {
            email: fields.email,
            name: fields.name,
            message: fields.message,
            timestamp: format_timestamp(received_at),
        }
    }

    /// 現在時刻でSubmissionを作成
    pub fn received_now(fields: SubmissionFields) -> Self {
        Self::new(fields, Utc::now())
    }

    /// ストレージのキー
    pub fn key(&self) -> &str {
        &self.email
    }
}

/// UTC時刻をタイムスタンプ文字列に変換
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
