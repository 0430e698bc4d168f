use super::*;
use crate::surface::Color;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.session.prompt, "> ");
    assert_eq!(settings.session.wrap, MapMode::WrapAround);
    assert!(!settings.editor.replace);
    assert_eq!(settings.transcript.input_prefix, "In: ");
    assert_eq!(settings.transcript.output_prefix, "Out: ");
    assert_eq!(settings.transcript.error_prefix, "Error: ");
    assert!(settings.transcript.separators);
    assert_eq!(settings.style, StyleSheet::default());
    assert_eq!(default(), &settings);
}

#[test]
fn test_string_source_overrides_defaults() {
    let source = Source::string(
        "[session]\nwrap = \"none\"\n[style]\nerror = \"magenta\"\n",
        FileFormat::Toml,
    );
    let settings = Settings::load([source]).unwrap();
    assert_eq!(settings.session.wrap, MapMode::None);
    assert_eq!(settings.session.prompt, "> ");
    assert_eq!(settings.style.error, Color::Magenta);
    assert_eq!(settings.style.prompt, Color::Blue);
}

#[test]
fn test_later_sources_win() {
    let sources = [
        Source::string("[session]\nprompt = \"a\"\n", FileFormat::Toml),
        Source::string(r#"{"session": {"prompt": "b"}}"#, FileFormat::Json),
    ];
    let settings = Settings::load(sources).unwrap();
    assert_eq!(settings.session.prompt, "b");
}

#[test]
fn test_invalid_value() {
    let source = Source::string("[session]\nwrap = \"sideways\"\n", FileFormat::Toml);
    assert!(matches!(
        Settings::load([source]),
        Err(crate::error::Error::Config(_))
    ));
}

#[test]
fn test_missing_required_file() {
    let result = at(["/nonexistent/termshell/config.toml"]).no_default(true).load();
    assert!(result.is_err());
}

#[test]
fn test_optional_file_is_skipped() {
    let source = SourceFile::new("/nonexistent/termshell/config.toml").required(false);
    let settings = Settings::load([source.into()]).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_session_options() {
    let mut settings = Settings::default();
    settings.session.prompt = "$ ".into();
    settings.editor.replace = true;
    let options = settings.session_options();
    assert_eq!(options.prompt, "$ ");
    assert_eq!(options.wrap, MapMode::WrapAround);
    assert!(options.replace);
}
