// std imports
use std::{
    io::{self, Write},
    process,
};

// third-party imports
use anyhow::Context as _;
use clap::{CommandFactory, Parser};
use env_logger::Env;

// local imports
use termshell::{
    cli::{BootstrapOpt, Opt},
    command::{self, Context, Interpreter},
    config::{self, Patch, Settings},
    error::{AppInfoProvider, Error, Result, UsageRequest, UsageResponse},
    session::Session,
    term::Terminal,
};

// ---

struct App;

impl AppInfoProvider for App {
    fn usage_suggestion(&self, request: UsageRequest) -> Option<UsageResponse> {
        match request {
            UsageRequest::ListCommands => Some(("help".into(), "".into())),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("error")).init();

    if let Err(err) = run() {
        err.log(&App);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let bootstrap = BootstrapOpt::parse();
    let settings = config::at(&bootstrap.args.config).load()?;
    config::global::initialize(settings.clone());

    let opt = Opt::parse_from(wild::args());

    if opt.help {
        return Ok(Opt::command().print_help()?);
    }

    if let Some(shell) = opt.shell_completions {
        let mut cmd = Opt::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    if opt.man_page {
        let man = clap_mangen::Man::new(Opt::command());
        man.render(&mut io::stdout())?;
        return Ok(());
    }

    let settings = opt.patch(settings);
    let ctx = Context::default();

    if let Some((name, args)) = opt.one_shot() {
        let output = command::run_once(&ctx, name, args)?;
        writeln!(io::stdout(), "{output}").context("failed to write output")?;
        return Ok(());
    }

    interactive(&settings, ctx)
}

fn interactive(settings: &Settings, ctx: Context) -> Result<()> {
    let terminal = Terminal::new(settings.style)?;
    let session = Session::new(terminal, settings.session_options());
    let mut interpreter = Interpreter::new(session, ctx, settings.transcript.clone());

    match interpreter.run_attached() {
        Ok(()) | Err(Error::InputClosed) => Ok(()),
        Err(e) => Err(e),
    }
}
