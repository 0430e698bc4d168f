// third-party imports
use clap::{ArgAction, Args, Parser, value_parser};
use clap_complete::Shell;

// local imports
use crate::{
    config::{self, Settings},
    geometry::MapMode,
};

// ---

/// Interactive command shell with recallable input and output history.
///
/// Without COMMAND, starts an interactive session. Arguments of the form %N
/// refer to earlier results: %0 is the last one, %~1 or %-1 the one before,
/// %1 the first one. The argument null is passed as an empty string.
#[derive(Parser)]
#[clap(version, disable_help_flag = true)]
pub struct Opt {
    #[command(flatten)]
    pub bootstrap: BootstrapArgs,

    /// Prompt shown in front of every input line.
    #[arg(long, default_value = config::global::get().session.prompt.as_str(), overrides_with = "prompt")]
    pub prompt: String,

    /// Start the line editor in replace mode.
    #[arg(long)]
    pub replace: bool,

    /// Clip long lines at the right edge instead of wrapping them.
    #[arg(long)]
    pub no_wrap: bool,

    /// Print help and exit.
    #[arg(long, default_value_t = false, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Print shell auto-completion script and exit.
    #[arg(
        long,
        value_parser = value_parser!(Shell),
        value_name = "SHELL",
    )]
    pub shell_completions: Option<Shell>,

    /// Print man page and exit.
    #[arg(long)]
    pub man_page: bool,

    /// Command with arguments to run once instead of starting an interactive session.
    #[arg(name = "COMMAND", trailing_var_arg = true, num_args = 0..)]
    pub command: Vec<String>,
}

impl Opt {
    /// Command name and arguments for one-shot mode.
    pub fn one_shot(&self) -> Option<(&str, &[String])> {
        let (name, args) = self.command.split_first()?;
        Some((name.as_str(), args))
    }
}

impl config::Patch for Opt {
    fn patch(&self, settings: Settings) -> Settings {
        let mut settings = settings;

        settings.session.prompt = self.prompt.clone();
        if self.replace {
            settings.editor.replace = true;
        }
        if self.no_wrap {
            settings.session.wrap = MapMode::None;
        }

        settings
    }
}

// ---

#[derive(Args)]
pub struct BootstrapArgs {
    /// Configuration file path.
    #[arg(long, value_name = "FILE", env = "TERMSHELL_CONFIG", num_args = 1)]
    pub config: Vec<String>,
}

/// Options needed before the configuration is loaded.
#[derive(Parser)]
#[clap(version, disable_help_flag = true)]
pub struct BootstrapOpt {
    #[command(flatten)]
    pub args: BootstrapArgs,
}

impl BootstrapOpt {
    pub fn parse() -> Self {
        Self::parse_from(Self::args())
    }

    pub fn args() -> Vec<String> {
        Self::filter(wild::args())
    }

    /// Keeps only the program name and `--config` options.
    pub fn filter<I>(args: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(first) = args.next() else {
            return vec![];
        };

        let mut result = vec![first];
        let mut follow_up = false;

        for arg in args {
            match (arg.as_bytes(), follow_up) {
                (b"--", _) => {
                    break;
                }
                ([b'-', b'-', b'c', b'o', b'n', b'f', b'i', b'g', b'=', ..], _) => {
                    result.push(arg);
                    follow_up = false;
                }
                (b"--config", _) => {
                    result.push(arg);
                    follow_up = true;
                }
                ([b'-'], true) => {
                    result.push(arg);
                    follow_up = false;
                }
                ([b'-', ..], true) => {
                    follow_up = false;
                }
                (_, true) => {
                    result.push(arg);
                    follow_up = false;
                }
                _ => {}
            }
        }

        result
    }
}

#[cfg(test)]
mod tests;
