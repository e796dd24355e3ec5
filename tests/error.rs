use std::path::PathBuf;

use serde_json::Value;
use taskgraph::error::{exit_codes, Error};

#[test]
fn exit_code_user_error() {
    let err = Error::ConfigNotFound(PathBuf::from("layout.toml"));
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);

    let err = Error::InputNotFound(PathBuf::from("tasks.json"));
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn exit_code_check_failed() {
    let err = Error::CheckFailed { count: 2 };
    assert_eq!(err.exit_code(), exit_codes::CHECK_FAILED);
    assert_eq!(err.to_string(), "Task input has 2 problem(s)");
}

#[test]
fn exit_code_operation_failed() {
    let err = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn details_include_input_fields() {
    let err = Error::InvalidInput {
        path: PathBuf::from("tasks.json"),
        message: "expected value".to_string(),
    };
    let details = err.details().expect("details");
    assert_eq!(details["path"], Value::String("tasks.json".to_string()));
    assert_eq!(details["message"], Value::String("expected value".to_string()));
}

#[test]
fn details_include_missing_config_path() {
    let err = Error::ConfigNotFound(PathBuf::from("layout.toml"));
    assert_eq!(err.to_string(), "Config file not found: layout.toml");
    let details = err.details().expect("details");
    assert_eq!(details["path"], Value::String("layout.toml".to_string()));
}
