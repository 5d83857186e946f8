use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotidal::{
    cli::{self, ExportOptions, ImportOptions},
    config, error,
    management::{DEFAULT_LIBRARY_FILE, DEFAULT_REPORT_FILE},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Copy Spotify playlists to TIDAL
    Migrate(MigrateOptions),

    /// Save Spotify playlists to the library file
    Export(ExportArgs),

    /// Create TIDAL playlists from the library file
    Import(ImportArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct LibraryArgs {
    /// Library file written by export and read by import
    #[clap(long, default_value = DEFAULT_LIBRARY_FILE)]
    library: PathBuf,

    /// Skip confirmations and interactive selection
    #[clap(long, short = 'y')]
    yes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Comma separated indices of the playlists to include
    #[clap(long, conflicts_with = "exclude")]
    include: Option<String>,

    /// Comma separated indices of the playlists to exclude
    #[clap(long)]
    exclude: Option<String>,

    /// Do not migrate the liked songs
    #[clap(long)]
    no_liked: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// File receiving the tracks TIDAL could not find
    #[clap(long, default_value = DEFAULT_REPORT_FILE)]
    report: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateOptions {
    #[clap(flatten)]
    library: LibraryArgs,
    #[clap(flatten)]
    selection: SelectionArgs,
    #[clap(flatten)]
    report: ReportArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    #[clap(flatten)]
    library: LibraryArgs,
    #[clap(flatten)]
    selection: SelectionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    #[clap(flatten)]
    library: LibraryArgs,
    #[clap(flatten)]
    report: ReportArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn export_options(library: &LibraryArgs, selection: SelectionArgs) -> ExportOptions {
    ExportOptions {
        include: selection.include,
        exclude: selection.exclude,
        no_liked: selection.no_liked,
        yes: library.yes,
    }
}

fn import_options(library: &LibraryArgs, report: ReportArgs) -> ImportOptions {
    ImportOptions {
        report: report.report,
        yes: library.yes,
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Migrate(opt) => {
            let export_opts = export_options(&opt.library, opt.selection);
            let import_opts = import_options(&opt.library, opt.report);
            cli::migrate(&opt.library.library, &export_opts, &import_opts).await
        }
        Command::Export(opt) => {
            let export_opts = export_options(&opt.library, opt.selection);
            cli::export(&opt.library.library, &export_opts).await
        }
        Command::Import(opt) => {
            let import_opts = import_options(&opt.library, opt.report);
            cli::import(&opt.library.library, &import_opts).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
