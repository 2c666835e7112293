//! CLI parse tests.

use super::commands::run_checksum;
use super::{error_message, Cli, CliCommand};
use bootfetch_core::FetchError;
use clap::Parser;
use std::path::Path;

fn parse(args: &[&str]) -> Option<CliCommand> {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_no_subcommand_fetches_defaults() {
    assert!(parse(&["bootfetch"]).is_none());
}

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["bootfetch", "fetch"]) {
        Some(CliCommand::Fetch(args)) => {
            assert!(args.url.is_none());
            assert!(args.output.is_none());
            assert!(!args.allow_http);
            assert!(!args.sha256);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_url_and_output() {
    match parse(&[
        "bootfetch",
        "fetch",
        "https://bootstrap.pypa.io/get-pip.py",
        "-o",
        "/tmp/get-pip.py",
        "--sha256",
    ]) {
        Some(CliCommand::Fetch(args)) => {
            assert_eq!(args.url.as_deref(), Some("https://bootstrap.pypa.io/get-pip.py"));
            assert_eq!(args.output.as_deref(), Some(Path::new("/tmp/get-pip.py")));
            assert!(args.sha256);
        }
        _ => panic!("expected Fetch with url and output"),
    }
}

#[test]
fn cli_parse_fetch_allow_http() {
    match parse(&[
        "bootfetch",
        "fetch",
        "http://mirror.local/get-pip.py",
        "--allow-http",
        "--output",
        "out.py",
    ]) {
        Some(CliCommand::Fetch(args)) => {
            assert!(args.allow_http);
            assert_eq!(args.output.as_deref(), Some(Path::new("out.py")));
        }
        _ => panic!("expected Fetch with --allow-http"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["bootfetch", "checksum", "/path/to/get-pip.py"]) {
        Some(CliCommand::Checksum { path }) => {
            assert_eq!(path.as_path(), Path::new("/path/to/get-pip.py"))
        }
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["bootfetch", "add", "x"]).is_err());
}

#[test]
fn error_message_names_fetch_kind() {
    let err = anyhow::Error::new(FetchError::HttpStatus {
        url: "https://bootstrap.pypa.io/get-pip.py".into(),
        code: 404,
    });
    assert_eq!(
        error_message(&err),
        "bootfetch error: http-status: HTTP status error: GET https://bootstrap.pypa.io/get-pip.py returned HTTP 404"
    );
}

#[test]
fn error_message_without_kind_for_other_errors() {
    let err = anyhow::anyhow!("config unreadable");
    assert_eq!(error_message(&err), "bootfetch error: config unreadable");
}

#[tokio::test]
async fn checksum_command_hashes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("get-pip.py");
    std::fs::write(&path, b"hello\n").unwrap();
    let digest = run_checksum(&path).await.unwrap();
    assert_eq!(
        digest,
        "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
    );
}

#[tokio::test]
async fn checksum_command_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(run_checksum(&dir.path().join("nope")).await.is_err());
}
