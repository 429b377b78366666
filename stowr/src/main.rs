use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use console::{Term, style};
use dialoguer::{Select, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::stdout;
use std::sync::Arc;
use stowr_core::copy::FsCopier;
use stowr_core::orchestrator::{CopyOrchestrator, CopyReport};
use stowr_core::platform::{Capabilities, StorageLocations};
use stowr_core::screen::CopyScreen;
use tracing::debug;

mod notifier;
mod picker;
mod presenter;

use notifier::ConsoleNotifier;
use picker::{BrowsePicker, PathPicker};

#[derive(Parser)]
#[command(name = "stowr")]
#[command(about = "Copy a file into the app's document storage with live progress", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive copy screen (the default)
    Screen,
    /// Copy a file into the documents directory
    Copy {
        /// File path or file:// URI to copy
        #[arg(required = true)]
        file: String,
    },
    /// Show where copied files are stored
    Dirs,
}

/// The actions offered on the interactive screen, in menu order.
#[derive(Clone, Copy)]
enum Action {
    Select,
    Clear,
    Copy,
    Quit,
}

impl Action {
    const ALL: [Action; 4] = [Action::Select, Action::Clear, Action::Copy, Action::Quit];

    fn label(self) -> &'static str {
        match self {
            Action::Select => "Select",
            Action::Clear => "Clear",
            Action::Copy => "Copy",
            Action::Quit => "Quit",
        }
    }
}

fn init_tracing() {
    // Logs go to stderr so they never mix with the screen.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_screen() -> Result<CopyScreen<ConsoleNotifier>> {
    let locations = StorageLocations::resolve()?;
    let capabilities = Capabilities::detect();
    debug!(
        documents = %locations.documents.display(),
        cache = %locations.cache.display(),
        mirror_to_cache = capabilities.mirror_to_cache,
        "storage resolved"
    );
    let orchestrator = CopyOrchestrator::new(Arc::new(FsCopier), locations, capabilities);
    Ok(CopyScreen::new(orchestrator, ConsoleNotifier::default()))
}

fn copy_bar() -> Result<ProgressBar> {
    let bar = ProgressBar::new(100);
    bar.set_prefix("Copying");
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:12} [{elapsed_precise}] [{bar:40.green/black}] {pos:>3}% {msg}")?
            .progress_chars("■ "),
    );
    Ok(bar)
}

/// Runs the screen's copy action behind a live progress bar.
fn copy_with_progress(screen: &mut CopyScreen<ConsoleNotifier>) -> Result<Option<CopyReport>> {
    // Without a selection the copy is refused, so don't flash a bar.
    let bar = if screen.state().selected().is_some() {
        copy_bar()?
    } else {
        ProgressBar::hidden()
    };

    screen.notifier().attach(&bar);
    let report = screen.copy(|percent| bar.set_position(u64::from(percent)));
    screen.notifier().detach();

    match &report {
        Some(_) => bar.finish_with_message("Copy complete."),
        None => bar.abandon_with_message("❌ Copy failed."),
    }
    Ok(report)
}

fn run_screen(screen: &mut CopyScreen<ConsoleNotifier>) -> Result<()> {
    let mut picker = BrowsePicker::new();
    let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();

    loop {
        presenter::draw(&mut stdout(), screen.state())?;

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose an action")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        match choice.map(|i| Action::ALL[i]) {
            Some(Action::Select) => screen.pick(&mut picker),
            Some(Action::Clear) => screen.clear(),
            Some(Action::Copy) => {
                copy_with_progress(screen)?;
            }
            Some(Action::Quit) | None => break,
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    // dialoguer hides the cursor while a menu is open; give it back if the
    // user interrupts.
    ctrlc::set_handler(move || {
        let _ = Term::stdout().show_cursor();
        std::process::exit(130);
    })?;

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Screen) {
        Commands::Screen => {
            let mut screen = build_screen()?;
            run_screen(&mut screen)?;
        }
        Commands::Copy { file } => {
            let mut screen = build_screen()?;
            screen.pick(&mut PathPicker::new(file));
            let Some(source) = screen.state().selected().cloned() else {
                return Err(anyhow!("No file selected."));
            };

            println!("  Source: {}", style(&source).cyan());
            println!(
                "  Target: {}",
                style(screen.orchestrator().locations().documents.display()).cyan()
            );
            println!();

            let report = copy_with_progress(&mut screen)?
                .ok_or_else(|| anyhow!("Could not copy {source}."))?;

            println!(
                "\n✨ Successfully copied {} to {}.",
                style(&source).cyan(),
                style(report.destination.display()).cyan()
            );
            if let Some(mirror) = report.mirror {
                println!("   Cached at {}.", style(mirror.display()).cyan());
            }
        }
        Commands::Dirs => {
            let locations = StorageLocations::resolve()?;
            let capabilities = Capabilities::detect();

            println!("  {:<10} {}", "DOCUMENTS", locations.documents_uri()?);
            println!("  {:<10} {}", "CACHE", locations.cache_uri()?);
            println!(
                "  {:<10} {}",
                "MIRROR",
                if capabilities.mirror_to_cache {
                    "on (copies are also staged in the cache)"
                } else {
                    "off"
                }
            );
        }
    }

    Ok(())
}
