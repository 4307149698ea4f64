use std::{io, path::PathBuf, process::ExitCode};

use autoform::{AutoformConfig, Command, Context, Outcome};
use clap::Parser;
use log::{LevelFilter, error};

#[derive(Parser, Debug)]
#[command(name = "autoform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "AUTOFORM_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let mut config = AutoformConfig::load(cli.config.as_deref())?;
    if cli.no_color {
        config.render.color = false;
    }
    if !config.render.color {
        colored::control::set_override(false);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut ctx = Context {
        config,
        out: &mut out,
    };
    cli.command.run(&mut ctx)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level().as_str()),
    )
    .init();

    match run(cli) {
        Ok(Outcome::Passed) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:?}");
            ExitCode::from(2)
        }
    }
}
