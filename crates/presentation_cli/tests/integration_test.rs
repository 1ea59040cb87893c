//! Integration tests for CLI
//!
//! These tests verify command parsing without running any command.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::{ffi::OsString, path::PathBuf};

use clap::Parser;
use presentation_cli::{Cli, Commands, log_filter_from_verbosity};

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn no_subcommand_defaults_to_run() {
    let cli = parse_args(&["birthday-reminder"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.command(), Commands::Run);
}

#[test]
fn parses_run() {
    let cli = parse_args(&["birthday-reminder", "run"]).unwrap();
    assert_eq!(cli.command(), Commands::Run);
}

#[test]
fn parses_today() {
    let cli = parse_args(&["birthday-reminder", "today"]).unwrap();
    assert_eq!(cli.command(), Commands::Today);
}

#[test]
fn parses_check_config() {
    let cli = parse_args(&["birthday-reminder", "check-config"]).unwrap();
    assert_eq!(cli.command(), Commands::CheckConfig);
}

#[test]
fn parses_export_without_output() {
    let cli = parse_args(&["birthday-reminder", "export"]).unwrap();
    assert_eq!(cli.command(), Commands::Export { output: None });
}

#[test]
fn parses_export_with_output() {
    let cli = parse_args(&["birthday-reminder", "export", "-o", "/tmp/b.ics"]).unwrap();
    if let Commands::Export { output } = cli.command() {
        assert_eq!(output, Some(PathBuf::from("/tmp/b.ics")));
    } else {
        panic!("Expected Export command");
    }
}

#[test]
fn config_flag_before_and_after_subcommand() {
    let before = parse_args(&["birthday-reminder", "--config", "a.toml", "today"]).unwrap();
    assert_eq!(before.config, Some(PathBuf::from("a.toml")));

    let after = parse_args(&["birthday-reminder", "today", "-c", "b.toml"]).unwrap();
    assert_eq!(after.config, Some(PathBuf::from("b.toml")));
}

#[test]
fn verbosity_counts() {
    let quiet = parse_args(&["birthday-reminder"]).unwrap();
    assert_eq!(quiet.verbose, 0);
    assert_eq!(quiet.verbosity_filter(), None);

    let debug = parse_args(&["birthday-reminder", "-vv", "run"]).unwrap();
    assert_eq!(debug.verbose, 2);
    assert_eq!(debug.verbosity_filter(), Some("debug"));
}

#[test]
fn verbosity_levels() {
    assert_eq!(log_filter_from_verbosity(0), "warn");
    assert_eq!(log_filter_from_verbosity(1), "info");
    assert_eq!(log_filter_from_verbosity(2), "debug");
    assert_eq!(log_filter_from_verbosity(3), "trace");
    assert_eq!(log_filter_from_verbosity(200), "trace");
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(parse_args(&["birthday-reminder", "backup"]).is_err());
}

#[test]
fn help_is_available() {
    let err = parse_args(&["birthday-reminder", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
