/// お問い合わせフォーム POST /submit ハンドラー
///
/// API Gateway経由で受信したフォーム送信（JSON）をDynamoDBに保存する。
/// base64エンコードされたボディはlambda_httpがデコードしてから渡す。
use contact_form::application::IntakeHandler;
use contact_form::infrastructure::{
    init_logging, DynamoSubmissionRepository, FormTableConfig, SubmissionRepository,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // 設定不備は起動失敗とし、リクエストは受け付けない
    let config = FormTableConfig::from_env().await.inspect_err(|err| {
        error!(error = %err, "設定読み込み失敗");
    })?;

    info!(
        table_name = config.table_name(),
        field_policy = %config.field_policy(),
        "お問い合わせフォームLambda関数を初期化"
    );

    // クライアントはwarm start間で再利用し、初期化後は変更しない
    let repo = DynamoSubmissionRepository::new(
        config.client().clone(),
        config.table_name().to_string(),
    );
    let intake = IntakeHandler::new(repo, config.field_policy());

    run(service_fn(|request| handler(&intake, request))).await
}

/// HTTPリクエストハンドラー
///
/// 処理結果は常にJSONレスポンスとして返す（エラーも含む）。
async fn handler<SR>(intake: &IntakeHandler<SR>, request: Request) -> Result<Response<Body>, Error>
where
    SR: SubmissionRepository,
{
    let body: &[u8] = request.body();
    Ok(intake.handle(body).await)
}
