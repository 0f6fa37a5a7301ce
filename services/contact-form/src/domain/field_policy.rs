// フィールド型ポリシー
//
// リクエストボディのname/email/messageに文字列以外の値が入っていた場合の
// 扱いを決めるドメイン層コンポーネント。欠落・null・空文字は常に既定値になる。

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use super::submission::{SubmissionFields, SENTINEL};

/// 環境変数名: フィールド型ポリシー
pub const ENV_FIELD_POLICY: &str = "FORM_FIELD_POLICY";

/// 未知のポリシー名
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown field policy: {0} (expected \"lenient\" or \"strict\")")]
pub struct UnknownFieldPolicy(pub String);

/// strictポリシーで文字列以外の値を検出した
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("field '{field}' must be a string, got {found}")]
pub struct FieldTypeError {
    pub field: &'static str,
    pub found: &'static str,
}

/// 文字列以外のフィールド値の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldPolicy {
    /// JSONテキストとして文字列化して受け入れる
    #[default]
    Lenient,
    /// MalformedRequestとして拒否する
    Strict,
}

impl FieldPolicy {
    /// 環境変数`FORM_FIELD_POLICY`から読み込み
    ///
    /// 未設定または空文字の場合は`Lenient`。未知の値はエラー。
    pub fn from_env() -> Result<Self, UnknownFieldPolicy> {
        match std::env::var(ENV_FIELD_POLICY) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }

    /// JSONオブジェクトから3フィールドを抽出
    pub fn extract(&self, object: &Map<String, Value>) -> Result<SubmissionFields, FieldTypeError> {
        Ok(SubmissionFields {
            name: self.coerce("name", object.get("name"))?,
            email: self.coerce("email", object.get("email"))?,
            message: self.coerce("message", object.get("message"))?,
        })
    }

    /// 単一フィールドの値を文字列に正規化
    ///
    /// 文字列はトリムせずそのまま返す。
    pub fn coerce(&self, field: &'static str, value: Option<&Value>) -> Result<String, FieldTypeError> {
        match value {
            None | Some(Value::Null) => Ok(SENTINEL.to_string()),
            Some(Value::String(s)) if s.is_empty() => Ok(SENTINEL.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => match self {
                Self::Lenient => Ok(other.to_string()),
                Self::Strict => Err(FieldTypeError {
                    field,
                    found: json_kind(other),
                }),
            },
        }
    }
}

impl FromStr for FieldPolicy {
    type Err = UnknownFieldPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(UnknownFieldPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for FieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    // ==================== 抽出 ====================

    #[test]
    fn test_extract_passes_strings_verbatim() {
        let fields = FieldPolicy::Lenient
            .extract(&object(json!({
                "name": "  Ada  ",
                "email": "ada@x.com",
                "message": "line1\nline2"
            })))
            .unwrap();

        assert_eq!(fields.name, "  Ada  ");
        assert_eq!(fields.email, "ada@x.com");
        assert_eq!(fields.message, "line1\nline2");
    }

    #[test]
    fn test_extract_missing_fields_use_sentinel() {
        let fields = FieldPolicy::Lenient.extract(&object(json!({}))).unwrap();
        assert_eq!(fields, SubmissionFields::default());
    }

    #[test]
    fn test_extract_null_and_empty_use_sentinel() {
        let fields = FieldPolicy::Strict
            .extract(&object(json!({
                "name": null,
                "email": "",
                "message": "hello"
            })))
            .unwrap();

        assert_eq!(fields.name, "N/A");
        assert_eq!(fields.email, "N/A");
        assert_eq!(fields.message, "hello");
    }

    #[test]
    fn test_extract_ignores_unknown_keys() {
        let fields = FieldPolicy::Lenient
            .extract(&object(json!({
                "email": "a@b.c",
                "timestamp": "1999-01-01 00:00:00.000000",
                "extra": [1, 2]
            })))
            .unwrap();

        assert_eq!(fields.email, "a@b.c");
        assert_eq!(fields.name, "N/A");
    }

    // ==================== 文字列以外の値 ====================

    #[test]
    fn test_lenient_stringifies_non_string_values() {
        let policy = FieldPolicy::Lenient;

        assert_eq!(policy.coerce("name", Some(&json!(42))).unwrap(), "42");
        assert_eq!(policy.coerce("name", Some(&json!(true))).unwrap(), "true");
        assert_eq!(policy.coerce("name", Some(&json!([1, "a"]))).unwrap(), "[1,\"a\"]");
        assert_eq!(policy.coerce("name", Some(&json!({"k": 1}))).unwrap(), "{\"k\":1}");
    }

    #[test]
    fn test_strict_rejects_non_string_values() {
        let err = FieldPolicy::Strict
            .extract(&object(json!({"email": 42})))
            .unwrap_err();

        assert_eq!(
            err,
            FieldTypeError {
                field: "email",
                found: "number"
            }
        );
        assert_eq!(err.to_string(), "field 'email' must be a string, got number");
    }

    // ==================== パース・環境変数 ====================

    #[test]
    fn test_from_str() {
        assert_eq!("lenient".parse::<FieldPolicy>().unwrap(), FieldPolicy::Lenient);
        assert_eq!(" Strict ".parse::<FieldPolicy>().unwrap(), FieldPolicy::Strict);
        assert_eq!(
            "loose".parse::<FieldPolicy>().unwrap_err(),
            UnknownFieldPolicy("loose".to_string())
        );
    }

    #[test]
    #[serial(form_env)]
    fn test_from_env() {
        unsafe { remove_env(ENV_FIELD_POLICY) };
        assert_eq!(FieldPolicy::from_env().unwrap(), FieldPolicy::Lenient);

        unsafe { set_env(ENV_FIELD_POLICY, "") };
        assert_eq!(FieldPolicy::from_env().unwrap(), FieldPolicy::Lenient);

        unsafe { set_env(ENV_FIELD_POLICY, "strict") };
        assert_eq!(FieldPolicy::from_env().unwrap(), FieldPolicy::Strict);

        unsafe { set_env(ENV_FIELD_POLICY, "bogus") };
        assert!(FieldPolicy::from_env().is_err());

        unsafe { remove_env(ENV_FIELD_POLICY) };
    }
}
