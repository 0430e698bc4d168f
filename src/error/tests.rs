use super::*;

struct TestAppInfo;
impl AppInfoProvider for TestAppInfo {}

struct HelpfulAppInfo;
impl AppInfoProvider for HelpfulAppInfo {
    fn app_name(&self) -> Cow<'static, str> {
        "termshell".into()
    }

    fn usage_suggestion(&self, request: UsageRequest) -> Option<UsageResponse> {
        match request {
            UsageRequest::ListCommands => Some(("help".into(), "".into())),
        }
    }
}

fn logged<A: AppInfoProvider>(err: &Error, app: &A) -> String {
    let mut buf = Vec::new();
    err.log_to(&mut buf, app).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_log() {
    let err = Error::Io(std::io::Error::other("test"));
    assert_eq!(
        logged(&err, &TestAppInfo),
        "\u{1b}[1m\u{1b}[91merror:\u{1b}[39m\u{1b}[0m test\n"
    );
}

#[test]
fn test_log_substitution_error() {
    let err = Error::from(subst::Error::IndexOutOfRange { token: "%4".into() });
    let output = logged(&err, &TestAppInfo);
    assert!(output.contains("index out of range for token \"%4\""));
    assert!(!output.contains("tip:"));
}

#[test]
fn test_log_unknown_command_with_tips() {
    let err = Error::from(command::Error::UnknownCommand {
        name: "ecko".into(),
        suggestions: Suggestions::new("ecko", ["echo", "help"]),
    });
    let output = logged(&err, &HelpfulAppInfo);
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("unknown command \"ecko\""));
    assert!(lines[1].contains("tip:"));
    assert!(lines[1].contains("did you mean \u{1b}[33m\"echo\"\u{1b}[39m?"));
    assert!(lines[2].contains("termshell help"));
    assert!(lines[2].ends_with("to list available commands"));
}

#[test]
fn test_no_usage_without_provider() {
    let err = Error::from(command::Error::UnknownCommand {
        name: "zzz".into(),
        suggestions: Suggestions::none(),
    });
    assert_eq!(logged(&err, &TestAppInfo).lines().count(), 1);
}

#[test]
fn test_input_closed_message() {
    assert_eq!(Error::InputClosed.to_string(), "input closed");
}
