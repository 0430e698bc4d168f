// std imports
use std::{borrow::Cow, fmt, io};

// third-party imports
use config::ConfigError;
use owo_colors::OwoColorize;
use thiserror::Error;

// local imports
use crate::{
    command, subst,
    xerr::{HighlightQuoted, Suggestions},
};

/// Result is an alias for standard result with bound Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error is an error which may occur in the application.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration loading error
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Terminal setup or output error
    #[error("terminal: {0}")]
    Terminal(#[from] termwiz::Error),

    /// Token substitution error
    #[error(transparent)]
    Substitution(#[from] subst::Error),

    /// Command execution error
    #[error(transparent)]
    Command(#[from] command::Error),

    /// Key source has no more input
    #[error("input closed")]
    InputClosed,

    /// Other errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Provides tips based on the error type.
    fn tips<'a, A>(&'a self, app: &A) -> Tips<'a>
    where
        A: AppInfoProvider,
    {
        match self {
            Error::Command(command::Error::UnknownCommand { suggestions, .. }) => Tips {
                did_you_mean: did_you_mean(suggestions),
                usage: usage(app, UsageRequest::ListCommands)
                    .map(|usage| format!("run {usage} to list available commands")),
            },
            _ => Default::default(),
        }
    }

    /// Logs the error to stderr.
    pub fn log<A>(&self, app: &A)
    where
        A: AppInfoProvider,
    {
        self.log_to(&mut io::stderr(), app).ok();
    }

    /// Logs the error to a specified target.
    pub fn log_to<A, W>(&self, target: &mut W, app: &A) -> io::Result<()>
    where
        A: AppInfoProvider,
        W: std::io::Write,
    {
        writeln!(target, "{} {:#}", ERR_PREFIX.bright_red().bold(), self)?;
        write!(target, "{}", self.tips(app))?;
        Ok(())
    }
}

/// Tips containing suggestions and usage information.
#[derive(Debug, Default)]
struct Tips<'a> {
    did_you_mean: Option<DidYouMean<'a>>,
    usage: Option<String>,
}

impl fmt::Display for Tips<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = TIP_PREFIX.green();
        let prefix = prefix.bold();

        if let Some(did_you_mean) = &self.did_you_mean {
            writeln!(f, "{prefix} {did_you_mean}")?;
        }

        if let Some(usage) = &self.usage {
            writeln!(f, "{prefix} {usage}")?;
        }

        Ok(())
    }
}

/// Trait for providing application information.
pub trait AppInfoProvider {
    /// Returns the application name.
    fn app_name(&self) -> Cow<'static, str> {
        std::env::args()
            .nth(0)
            .map(Cow::Owned)
            .unwrap_or("<app>".into())
    }

    /// Provides usage suggestions based on the request.
    fn usage_suggestion(&self, _request: UsageRequest) -> Option<UsageResponse> {
        None
    }
}

/// Usage request types.
pub enum UsageRequest {
    ListCommands,
}

/// Command and arguments to suggest.
pub type UsageResponse = (Cow<'static, str>, Cow<'static, str>);

fn usage<A: AppInfoProvider>(app: &A, request: UsageRequest) -> Option<String> {
    let (command, args) = app.usage_suggestion(request)?;
    let result = format!("{} {}", app.app_name(), command);
    let result = result.bold();
    if args.is_empty() {
        Some(result.to_string())
    } else {
        Some(format!("{} {}", result, args))
    }
}

#[derive(Debug)]
struct DidYouMean<'a> {
    suggestions: &'a Suggestions,
}

impl fmt::Display for DidYouMean<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "did you mean ")?;
        for (i, suggestion) in self.suggestions.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{}", suggestion.hlq())?;
        }
        write!(f, "?")
    }
}

fn did_you_mean(suggestions: &Suggestions) -> Option<DidYouMean<'_>> {
    if suggestions.is_empty() {
        return None;
    }

    Some(DidYouMean { suggestions })
}

const ERR_PREFIX: &str = "error:";
const TIP_PREFIX: &str = "  tip:";

#[cfg(test)]
mod tests;
