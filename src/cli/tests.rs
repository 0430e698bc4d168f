use clap::Parser;

use super::*;
use crate::config::Patch;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_defaults() {
    let opt = Opt::parse_from(["termshell"]);
    assert_eq!(opt.prompt, "> ");
    assert!(!opt.replace);
    assert!(!opt.no_wrap);
    assert!(opt.one_shot().is_none());
}

#[test]
fn test_one_shot_command() {
    let opt = Opt::parse_from(["termshell", "echo", "a", "-h", "--prompt", "b"]);
    let (name, rest) = opt.one_shot().unwrap();
    assert_eq!(name, "echo");
    assert_eq!(rest, args(&["a", "-h", "--prompt", "b"]));
    assert_eq!(opt.prompt, "> ");
}

#[test]
fn test_patch() {
    let opt = Opt::parse_from(["termshell", "--prompt", "$ ", "--replace", "--no-wrap"]);
    let settings = opt.patch(Settings::default());
    assert_eq!(settings.session.prompt, "$ ");
    assert!(settings.editor.replace);
    assert_eq!(settings.session.wrap, MapMode::None);
    assert_eq!(settings.transcript, Settings::default().transcript);
}

#[test]
fn test_patch_keeps_configured_values() {
    let mut settings = Settings::default();
    settings.editor.replace = true;
    settings.session.wrap = MapMode::None;

    let opt = Opt::parse_from(["termshell"]);
    let settings = opt.patch(settings);
    assert!(settings.editor.replace);
    assert_eq!(settings.session.wrap, MapMode::None);
}

#[test]
fn test_bootstrap_filter() {
    let filtered = BootstrapOpt::filter(args(&[
        "termshell",
        "--prompt",
        "x",
        "--config",
        "a.toml",
        "--config=b.yaml",
        "echo",
    ]));
    assert_eq!(
        filtered,
        args(&["termshell", "--config", "a.toml", "--config=b.yaml"])
    );

    let filtered = BootstrapOpt::filter(args(&["termshell", "--", "--config", "a.toml"]));
    assert_eq!(filtered, args(&["termshell"]));

    assert!(BootstrapOpt::filter(Vec::new()).is_empty());
}

#[test]
fn test_bootstrap_parse() {
    let opt = BootstrapOpt::parse_from(["termshell", "--config", "a.toml", "--config", "b.toml"]);
    assert_eq!(opt.args.config, args(&["a.toml", "b.toml"]));
}
