// アプリケーション層モジュール
pub mod intake_handler;
pub mod intake_response;

// 再エクスポート
pub use intake_handler::{IntakeError, IntakeHandler};
pub use intake_response::{IntakeResponse, ResponseBody, SUCCESS_MESSAGE};
