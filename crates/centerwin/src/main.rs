mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use centerwin_core::DisplayMode;

#[derive(Parser)]
#[command(
    name = "centerwin",
    version,
    about = "Automatically centers newly opened windows on their monitor"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the centering daemon in the background
    Start {
        /// Detect new windows by polling instead of show events
        #[arg(long)]
        polling: bool,
    },
    /// Stop the centering daemon
    Stop,
    /// Show whether the daemon is running
    Status,
    /// Choose the area new windows are centered in
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Manage window titles that are never moved
    Ignore {
        #[command(subcommand)]
        command: IgnoreCommands,
    },
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
    /// Run the daemon in the foreground (used by `start`)
    #[command(hide = true)]
    Daemon {
        #[arg(long)]
        polling: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Center inside the work area (excludes the taskbar)
    WorkArea,
    /// Center on the full monitor
    FullMonitor,
}

impl From<ModeArg> for DisplayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::WorkArea => DisplayMode::RespectWorkArea,
            ModeArg::FullMonitor => DisplayMode::FullMonitor,
        }
    }
}

#[derive(Subcommand)]
enum IgnoreCommands {
    /// Never move windows with this exact title
    Add { title: String },
    /// Remove a title added with `ignore add`
    Remove { title: String },
    /// Show built-in and user-added ignored titles
    List,
}

#[derive(Subcommand)]
enum DebugCommands {
    /// List top-level windows and where they would be centered
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Watch window show events in real time
    Events,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start { polling } => commands::start::execute(polling),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Daemon { polling } => commands::daemon::execute(polling),
        Commands::Mode { mode } => commands::mode::execute(mode.into()),
        Commands::Ignore { command } => match command {
            IgnoreCommands::Add { title } => commands::ignore::add(&title),
            IgnoreCommands::Remove { title } => commands::ignore::remove(&title),
            IgnoreCommands::List => commands::ignore::list(),
        },
        Commands::Debug { command } => match command {
            DebugCommands::List { json } => commands::debug::list::execute(json),
            DebugCommands::Events => commands::debug::events::execute(),
        },
    }
}
