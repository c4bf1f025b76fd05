//! calkit CLI - Install the calendar component into React/Next.js projects

use anyhow::Result;
use calkit_core::manifest::StyleChoice;
use calkit_core::tui::{AddArgs, InitArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "calkit")]
#[command(about = "Add the calendar component and its config to your project")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect the project, choose a styling solution, write module.json
    Init(CliInitArgs),
    /// Fetch the component files and patch project configuration
    Add(CliAddArgs),
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Styling solution to use, skipping the prompt (css-modules or tailwind)
    #[arg(short, long, value_parser = parse_style)]
    pub style: Option<StyleChoice>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct CliAddArgs {
    /// Local directory to use for component sources instead of the remote (for development use)
    #[arg(long = "component-dir")]
    pub component_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

fn parse_style(value: &str) -> Result<StyleChoice, String> {
    match value.to_lowercase().as_str() {
        "css-modules" | "css" => Ok(StyleChoice::CssModules),
        "tailwind" | "tw" => Ok(StyleChoice::Tailwind),
        _ => Err(format!(
            "unknown style '{}', expected css-modules or tailwind",
            value
        )),
    }
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            style: args.style,
            yes: args.yes,
        }
    }
}

impl From<CliAddArgs> for AddArgs {
    fn from(args: CliAddArgs) -> Self {
        AddArgs {
            component_dir: args.component_dir,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let result = match args.command {
        Command::Init(init_args) => calkit_core::run_init(init_args.into(), CLI_VERSION).await,
        Command::Add(add_args) => calkit_core::run_add(add_args.into()).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
