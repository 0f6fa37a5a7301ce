/// ログ基盤モジュール
///
/// Lambda環境向けのJSON構造化ログ設定を提供する。
use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// `RUST_LOG`（デフォルトはinfo）でフィルタリングし、CloudWatch向けに
/// JSON形式で出力する。複数回呼び出しても最初の1回のみ初期化される。
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(false);

        // テストで別のサブスクライバーが先に登録されていても失敗しない
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_idempotent() {
        init_test_logging();
        init_logging();
        init_logging();
    }

    #[test]
    fn test_log_with_submission_context() {
        init_test_logging();

        let span = tracing::info_span!("submit", request_id = "req-456");
        let _guard = span.enter();

        tracing::info!(email = "ada@x.com", body_len = 48, "フォーム受信");
        tracing::warn!(error = "invalid JSON", "不正なリクエスト");
    }
}
