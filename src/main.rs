use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spolyrics::{cli, config, error, lyrics::PausePolicy};

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
    /// Run the local server and the lyric sync loop
    Serve,

    /// Authorize with Spotify API
    Auth,

    /// Show playback and lyric status of the running server
    Status,

    /// Render the live caption in this terminal
    Display(DisplayOptions),

    /// Print the lyric sync log
    Log,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DisplayOptions {
    /// Lines shown on each side of the active line
    #[clap(long)]
    window: Option<usize>,

    /// What to show while playback is paused (blank, hold)
    #[clap(long)]
    when_paused: Option<PausePolicy>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve().await,
        Command::Auth => cli::auth().await,
        Command::Status => cli::status().await,
        Command::Display(opt) => {
            cli::display(
                opt.window.unwrap_or_else(config::caption_window),
                opt.when_paused.unwrap_or_else(config::caption_when_paused),
            )
            .await
        }
        Command::Log => cli::log().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
