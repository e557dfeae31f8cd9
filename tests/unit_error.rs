use std::path::PathBuf;

use tabboard::error::{exit_codes, Error, JsonError};

#[test]
fn exit_codes_map_correctly() {
    let user = Error::InvalidArgument("bad".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    let missing = Error::ProfileNotFound("ghost".to_string());
    assert_eq!(missing.exit_code(), exit_codes::USER_ERROR);

    let lookup = Error::ProfileLookup("HTTP 500".to_string());
    assert_eq!(lookup.exit_code(), exit_codes::OPERATION_FAILED);

    let op = Error::OperationFailed("boom".to_string());
    assert_eq!(op.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn json_error_includes_code_and_details() {
    let err = Error::ConfigNotFound(PathBuf::from("/etc/tabboard.toml"));
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::USER_ERROR);
    assert!(json.error.contains("Config file not found"));
    assert_eq!(
        json.details.expect("details")["path"],
        "/etc/tabboard.toml"
    );
}

#[test]
fn profile_errors_use_widget_wording() {
    assert_eq!(
        Error::ProfileNotFound("ghost".to_string()).to_string(),
        "User not found"
    );
    assert!(Error::ProfileLookup("timeout".to_string())
        .to_string()
        .starts_with("Something went wrong"));
}
