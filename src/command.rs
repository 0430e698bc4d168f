// std imports
use std::collections::BTreeMap;

// third-party imports
use itertools::Itertools;
use shell_escape::escape;
use thiserror::Error;

// local imports
use crate::{
    config::TranscriptSettings,
    error,
    session::Session,
    subst::{self, OutputHistory},
    surface::{KeySource, Screen},
    transcript::LineKind,
    xerr::Suggestions,
};

// ---

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown command {name:?}")]
    UnknownCommand {
        name: String,
        suggestions: Suggestions,
    },
}

impl Error {
    /// Plain text "did you mean" hint, if there is anything to suggest.
    pub fn tip(&self) -> Option<String> {
        match self {
            Self::UnknownCommand { suggestions, .. } if !suggestions.is_empty() => Some(format!(
                "did you mean {}?",
                suggestions.iter().map(|s| format!("{s:?}")).join(" or ")
            )),
            _ => None,
        }
    }
}

// ---

/// Command name that ends the interactive loop.
pub const EXIT: &str = "exit";
const EXIT_USAGE: &str = "exit - exit application.";

/// A named action producing one result string.
pub trait Command {
    fn name(&self) -> &str;

    /// One-line usage, shown by `help` and by `-h` or `--help`.
    fn usage(&self) -> &str;

    fn run(&self, ctx: &Context, args: &[String]) -> Result<String>;
}

/// Commands by name.
#[derive(Default)]
pub struct Registry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `help` and `echo`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.add(Help);
        registry.add(Echo);
        registry
    }

    /// Adds a command, replacing any command with the same name.
    pub fn add<C: Command + 'static>(&mut self, command: C) {
        let name = command.name().to_owned();
        if self.commands.insert(name.clone(), Box::new(command)).is_some() {
            log::warn!("command {name:?} replaced");
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Command> {
        self.commands
            .get(name)
            .map(|command| command.as_ref())
            .ok_or_else(|| Error::UnknownCommand {
                name: name.to_owned(),
                suggestions: Suggestions::new(
                    name,
                    self.names().chain([EXIT]).filter(|candidate| *candidate != name),
                ),
            })
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|command| command.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

// ---

/// State shared by all commands for the lifetime of a session.
pub struct Context {
    pub commands: Registry,
    pub outputs: OutputHistory,
}

impl Context {
    pub fn new(commands: Registry) -> Self {
        Self {
            commands,
            outputs: OutputHistory::new(),
        }
    }

    /// Runs a command, or prints its usage if the only argument is `-h` or `--help`.
    pub fn execute(&self, name: &str, args: &[String]) -> Result<String> {
        let command = self.commands.get(name)?;
        if let [arg] = args
            && (arg == "-h" || arg == "--help")
        {
            return Ok(command.usage().to_owned());
        }

        log::debug!("run {name} with {} argument(s)", args.len());
        command.run(self, args)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Registry::with_builtins())
    }
}

/// Runs a single command outside of an interactive session.
pub fn run_once(ctx: &Context, name: &str, args: &[String]) -> Result<String> {
    ctx.execute(name, args)
}

// ---

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Splits a line on whitespace, returns `None` for a blank line.
pub fn parse_input(line: &str) -> Option<Invocation> {
    let mut tokens = line.split_whitespace().map(str::to_owned);
    let name = tokens.next()?;
    Some(Invocation {
        name,
        args: tokens.collect(),
    })
}

fn to_command_line(name: &str, args: &[String]) -> String {
    std::iter::once(escape(name.into()))
        .chain(args.iter().map(|arg| escape(arg.as_str().into())))
        .join(" ")
}

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive read-execute-print loop over a [`Session`].
pub struct Interpreter<S> {
    session: Session<S>,
    context: Context,
    settings: TranscriptSettings,
}

impl<S: Screen> Interpreter<S> {
    pub fn new(session: Session<S>, context: Context, settings: TranscriptSettings) -> Self {
        Self {
            session,
            context,
            settings,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn into_session(self) -> Session<S> {
        self.session
    }

    /// Reads and processes lines until `exit` is entered.
    pub fn run(&mut self, keys: &mut impl KeySource) -> error::Result<()> {
        self.run_with(|session| session.get_line(keys))
    }

    /// Same as [`run`](Self::run) with the screen as the key source.
    pub fn run_attached(&mut self) -> error::Result<()>
    where
        S: KeySource,
    {
        self.run_with(Session::read_line)
    }

    fn run_with<F>(&mut self, mut read_line: F) -> error::Result<()>
    where
        F: FnMut(&mut Session<S>) -> error::Result<String>,
    {
        loop {
            let line = read_line(&mut self.session)?;
            if self.process(&line) == Flow::Exit {
                log::debug!("exit requested");
                return Ok(());
            }
        }
    }

    /// Processes one input line as if it was typed.
    pub fn process(&mut self, line: &str) -> Flow {
        let Some(Invocation { name, args }) = parse_input(line) else {
            return Flow::Continue;
        };
        if name == EXIT && args.is_empty() {
            return Flow::Exit;
        }

        let args = match subst::substitute(&self.context.outputs, &args) {
            Ok(args) => args,
            Err(e) => {
                self.error(&e.to_string(), None);
                self.separator();
                return Flow::Continue;
            }
        };

        self.separator();
        let text = format!("{}{}", self.settings.input_prefix, to_command_line(&name, &args));
        self.lines(&text, LineKind::Input);

        match self.context.execute(&name, &args) {
            Ok(output) => {
                let record = self.context.outputs.push(output);
                let text = format!(
                    "{}[{}] {}",
                    self.settings.output_prefix, record.ordinal, record.text
                );
                self.lines(&text, LineKind::Output);
            }
            Err(e) => self.error(&e.to_string(), e.tip()),
        }

        self.separator();
        Flow::Continue
    }

    fn error(&mut self, message: &str, tip: Option<String>) {
        let text = format!("{}{}", self.settings.error_prefix, message);
        self.lines(&text, LineKind::Error);
        if let Some(tip) = tip {
            self.lines(&format!("  tip: {tip}"), LineKind::Error);
        }
    }

    fn separator(&mut self) {
        if self.settings.separators {
            self.session.put_line("", LineKind::Output);
        }
    }

    fn lines(&mut self, text: &str, kind: LineKind) {
        for line in text.lines() {
            self.session.put_line(line, kind);
        }
    }
}

// ---

/// Lists commands or shows the usage of one.
pub struct Help;

impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn usage(&self) -> &str {
        "help [<command>] - displays help information."
    }

    fn run(&self, ctx: &Context, args: &[String]) -> Result<String> {
        match args {
            [] => Ok(std::iter::once("List of commands:".to_owned())
                .chain(ctx.commands.iter().map(|c| c.usage().to_owned()))
                .chain(std::iter::once(EXIT_USAGE.to_owned()))
                .join("\n")),
            [name] if name == EXIT => Ok(EXIT_USAGE.to_owned()),
            [name] => Ok(ctx.commands.get(name)?.usage().to_owned()),
            _ => Ok(self.usage().to_owned()),
        }
    }
}

/// Repeats its arguments.
pub struct Echo;

impl Command for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn usage(&self) -> &str {
        "echo <arg1> [<arg2> <arg3> ...] - repeats the arguments to output."
    }

    fn run(&self, _: &Context, args: &[String]) -> Result<String> {
        if args.is_empty() {
            return Ok(self.usage().to_owned());
        }
        Ok(args.join(" "))
    }
}

#[cfg(test)]
mod tests;
