use super::*;
use crate::{
    session::Options,
    surface::{Key, MemoryScreen, ScriptedKeys},
};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn interpreter(height: usize) -> Interpreter<MemoryScreen> {
    let session = Session::new(MemoryScreen::new(80, height), Options::default());
    Interpreter::new(session, Context::default(), TranscriptSettings::default())
}

struct Upper;

impl Command for Upper {
    fn name(&self) -> &str {
        "upper"
    }

    fn usage(&self) -> &str {
        "upper <text> - converts text to upper case."
    }

    fn run(&self, _: &Context, args: &[String]) -> Result<String> {
        Ok(args.join(" ").to_uppercase())
    }
}

#[test]
fn test_parse_input() {
    assert_eq!(
        parse_input("  echo   a  b "),
        Some(Invocation {
            name: "echo".into(),
            args: args(&["a", "b"]),
        })
    );
    assert_eq!(parse_input("help").unwrap().args, Vec::<String>::new());
    assert_eq!(parse_input(""), None);
    assert_eq!(parse_input(" \t "), None);
}

#[test]
fn test_echo() {
    let ctx = Context::default();
    assert_eq!(ctx.execute("echo", &args(&["a", "b"])).unwrap(), "a b");
    assert_eq!(ctx.execute("echo", &args(&["", "x"])).unwrap(), " x");
    assert_eq!(
        ctx.execute("echo", &[]).unwrap(),
        "echo <arg1> [<arg2> <arg3> ...] - repeats the arguments to output."
    );
}

#[test]
fn test_help_flag_shows_usage() {
    let ctx = Context::default();
    assert_eq!(ctx.execute("echo", &args(&["-h"])).unwrap(), Echo.usage());
    assert_eq!(ctx.execute("echo", &args(&["--help"])).unwrap(), Echo.usage());
    assert_eq!(ctx.execute("echo", &args(&["-h", "x"])).unwrap(), "-h x");
}

#[test]
fn test_help() {
    let ctx = Context::default();
    assert_eq!(
        ctx.execute("help", &[]).unwrap(),
        [
            "List of commands:",
            Echo.usage(),
            Help.usage(),
            "exit - exit application.",
        ]
        .join("\n")
    );
    assert_eq!(ctx.execute("help", &args(&["echo"])).unwrap(), Echo.usage());
    assert_eq!(ctx.execute("help", &args(&["exit"])).unwrap(), "exit - exit application.");
    assert_eq!(ctx.execute("help", &args(&["a", "b"])).unwrap(), Help.usage());
    assert!(matches!(
        ctx.execute("help", &args(&["nope"])),
        Err(Error::UnknownCommand { name, .. }) if name == "nope"
    ));
}

#[test]
fn test_unknown_command_suggestions() {
    let ctx = Context::default();
    let err = ctx.execute("ecko", &[]).unwrap_err();
    assert_eq!(err.to_string(), "unknown command \"ecko\"");
    assert_eq!(err.tip().as_deref(), Some("did you mean \"echo\"?"));

    let err = ctx.execute("qqq", &[]).unwrap_err();
    assert_eq!(err.tip(), None);
}

#[test]
fn test_exit_with_arguments_does_not_suggest_itself() {
    let mut it = interpreter(10);
    assert_eq!(it.process("exit now"), Flow::Continue);
    assert_eq!(
        it.session().screen().rows()[..4],
        ["", "In: exit now", "Error: unknown command \"exit\"", ""]
    );
}

#[test]
fn test_registry() {
    let mut registry = Registry::with_builtins();
    assert_eq!(registry.names().collect::<Vec<_>>(), ["echo", "help"]);
    registry.add(Upper);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.get("upper").unwrap().name(), "upper");
    registry.add(Upper);
    assert_eq!(registry.len(), 3);
    assert!(Registry::new().is_empty());
}

#[test]
fn test_run_once() {
    let mut commands = Registry::with_builtins();
    commands.add(Upper);
    let ctx = Context::new(commands);
    assert_eq!(run_once(&ctx, "upper", &args(&["a", "b"])).unwrap(), "A B");
    assert!(ctx.outputs.is_empty());
}

#[test]
fn test_process_echo() {
    let mut it = interpreter(10);
    assert_eq!(it.process("echo hello world"), Flow::Continue);
    assert_eq!(
        it.session().screen().rows()[..4],
        ["", "In: echo hello world", "Out: [1] hello world", ""]
    );
    assert_eq!(it.context().outputs.len(), 1);
}

#[test]
fn test_process_substitutes_outputs() {
    let mut it = interpreter(20);
    it.process("echo r1");
    it.process("echo r2");
    it.process("echo %0 %1 null");
    assert_eq!(it.context().outputs.get(2).unwrap().text, "r2 r1 ");
    assert_eq!(it.session().screen().row(9), "In: echo r2 r1 ''");
    assert_eq!(it.session().screen().row(10), "Out: [3] r2 r1");
}

#[test]
fn test_process_substitution_error() {
    let mut it = interpreter(10);
    it.process("echo %4");
    assert_eq!(
        it.session().screen().rows()[..2],
        ["Error: index out of range for token \"%4\"", ""]
    );
    assert!(it.context().outputs.is_empty());
}

#[test]
fn test_process_unknown_command() {
    let mut it = interpreter(10);
    it.process("ecko hi");
    assert_eq!(
        it.session().screen().rows()[..5],
        [
            "",
            "In: ecko hi",
            "Error: unknown command \"ecko\"",
            "  tip: did you mean \"echo\"?",
            ""
        ]
    );
    assert!(it.context().outputs.is_empty());
}

#[test]
fn test_process_multiline_output() {
    let mut it = interpreter(10);
    it.process("help");
    let rows = it.session().screen().rows();
    assert_eq!(rows[2], "Out: [1] List of commands:");
    assert_eq!(rows[3], Echo.usage());
    assert_eq!(rows[5], "exit - exit application.");
}

#[test]
fn test_process_without_separators() {
    let session = Session::new(MemoryScreen::new(40, 5), Options::default());
    let settings = TranscriptSettings {
        input_prefix: "< ".into(),
        output_prefix: "= ".into(),
        error_prefix: "! ".into(),
        separators: false,
    };
    let mut it = Interpreter::new(session, Context::default(), settings);
    it.process("echo x");
    it.process("nope");
    assert_eq!(
        it.session().screen().rows(),
        ["< echo x", "= [1] x", "< nope", "! unknown command \"nope\"", ""]
    );
}

#[test]
fn test_process_blank_and_exit() {
    let mut it = interpreter(5);
    assert_eq!(it.process("   "), Flow::Continue);
    assert_eq!(it.process("exit"), Flow::Exit);
    assert_eq!(it.process("exit now"), Flow::Continue);
}

#[test]
fn test_run_until_exit() {
    let mut it = interpreter(20);
    let mut keys = ScriptedKeys::new()
        .line("echo a")
        .push(Key::Enter)
        .push(Key::Up)
        .push(Key::Up)
        .push(Key::Enter)
        .line("exit")
        .line("echo never");
    it.run(&mut keys).unwrap();
    assert_eq!(keys.remaining(), 11);
    assert_eq!(it.context().outputs.len(), 2);
    assert_eq!(it.session().history().len(), 4);
    assert_eq!(it.session().screen().row(0), "> echo a");
}

#[test]
fn test_run_reports_closed_input() {
    let mut it = interpreter(5);
    let mut keys = ScriptedKeys::new().line("echo a");
    assert!(matches!(
        it.run(&mut keys),
        Err(crate::error::Error::InputClosed)
    ));
    assert_eq!(it.into_session().history().len(), 1);
}
