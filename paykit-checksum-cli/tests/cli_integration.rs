//! Integration tests for the paykit-checksum binary
//!
//! These run the built binary against a temporary merchant config and need
//! no network access.

use std::path::Path;
use std::process::{Command, Output};

const CONFIG: &str = r#"{
    "merchant_id": "merchant1",
    "merchant_key": "kbzk1DSbJiV_O3p5",
    "callback_url": "https://shop.example/callback"
}"#;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("merchant.json");
    std::fs::write(&path, CONFIG).unwrap();
    path
}

fn run(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_paykit-checksum"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_generate_then_verify() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let params = r#"{"MID":"merchant1","ORDERID":"ORD100"}"#;

    let output = run(&config, &["generate", "--params", params, "--raw"]);
    assert!(output.status.success(), "generate failed: {:?}", output);
    let checksum = stdout(&output).trim().to_string();
    assert!(!checksum.is_empty());

    let output = run(&config, &["verify", "--params", params, "--checksum", &checksum]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Checksum verified"));

    let tampered = r#"{"MID":"merchant1","ORDERID":"ORD101"}"#;
    let output = run(&config, &["verify", "--params", tampered, "--checksum", &checksum]);
    assert!(!output.status.success());
}

#[test]
fn test_payment_then_callback() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = run(
        &config,
        &[
            "payment",
            "--order-id",
            "ORD100",
            "--customer-id",
            "CUST001",
            "--amount",
            "10.00",
        ],
    );
    assert!(output.status.success(), "payment failed: {:?}", output);

    let signed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(signed["MID"], "merchant1");
    assert!(signed["CHECKSUMHASH"].is_string());

    let form = dir.path().join("form.json");
    std::fs::write(&form, signed.to_string()).unwrap();
    let form_arg = format!("@{}", form.display());

    let output = run(&config, &["callback", "--form", &form_arg]);
    assert!(output.status.success());

    let mut forged = signed.clone();
    forged["TXN_AMOUNT"] = serde_json::Value::String("1.00".into());
    std::fs::write(&form, forged.to_string()).unwrap();
    let output = run(&config, &["callback", "--form", &form_arg]);
    assert!(!output.status.success());
}

#[test]
fn test_status_request_body() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = run(&config, &["status-request", "--order-id", "ORD100", "--raw"]);
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(body["MID"], "merchant1");
    assert_eq!(body["ORDERID"], "ORD100");
    assert!(body["CHECKSUMHASH"].is_string());
}

#[test]
fn test_status_outcome_redirect() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = run(
        &config,
        &[
            "status-outcome",
            "--response",
            r#"{"ORDERID":"ORD100","STATUS":"TXN_SUCCESS"}"#,
        ],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("/success?orderId=ORD100"));

    let output = run(
        &config,
        &[
            "status-outcome",
            "--response",
            r#"{"STATUS":"TXN_FAILURE"}"#,
            "--order-id",
            "ORD7",
        ],
    );
    assert!(stdout(&output).contains("/failure?orderId=ORD7"));
}

#[test]
fn test_bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"merchant_id":"m","merchant_key":"short"}"#).unwrap();

    let output = run(&path, &["generate", "--params", "{}"]);
    assert!(!output.status.success());
}
