//! Tests for configure and state.

use super::parse;
use crate::cli::{Cli, CliCommand, LogLevelArg, ProtocolArg, StateAction};
use clap::Parser;

#[test]
fn cli_parse_configure_all_fields() {
    match parse(&[
        "dstation",
        "configure",
        "--protocol",
        "http",
        "--host",
        "nas.lan",
        "--port",
        "5000",
        "--username",
        "admin",
        "--password",
        "pw",
    ]) {
        CliCommand::Configure {
            protocol,
            host,
            port,
            username,
            password,
        } => {
            assert_eq!(protocol, Some(ProtocolArg::Http));
            assert_eq!(host.as_deref(), Some("nas.lan"));
            assert_eq!(port, Some(5000));
            assert_eq!(username.as_deref(), Some("admin"));
            assert_eq!(password.as_deref(), Some("pw"));
        }
        _ => panic!("expected Configure"),
    }
}

#[test]
fn cli_parse_configure_partial() {
    match parse(&["dstation", "configure", "--host", "10.0.0.2"]) {
        CliCommand::Configure {
            protocol,
            host,
            port,
            ..
        } => {
            assert!(protocol.is_none());
            assert_eq!(host.as_deref(), Some("10.0.0.2"));
            assert!(port.is_none());
        }
        _ => panic!("expected Configure"),
    }
}

#[test]
fn cli_parse_configure_rejects_bad_port() {
    assert!(Cli::try_parse_from(["dstation", "configure", "--port", "70000"]).is_err());
}

#[test]
fn cli_parse_state_actions() {
    match parse(&["dstation", "state", "show"]) {
        CliCommand::State { action } => assert_eq!(action, StateAction::Show),
        _ => panic!("expected State"),
    }
    match parse(&["dstation", "state", "migrate"]) {
        CliCommand::State { action } => assert_eq!(action, StateAction::Migrate),
        _ => panic!("expected State"),
    }
}

#[test]
fn cli_parse_logging_levels() {
    match parse(&["dstation", "logging", "debug"]) {
        CliCommand::Logging { level } => assert_eq!(level, LogLevelArg::Debug),
        _ => panic!("expected Logging"),
    }
    match parse(&["dstation", "logging", "off"]) {
        CliCommand::Logging { level } => assert_eq!(level, LogLevelArg::Off),
        _ => panic!("expected Logging"),
    }
    assert!(Cli::try_parse_from(["dstation", "logging", "loud"]).is_err());
}
