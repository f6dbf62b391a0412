//! Spotify Lyric Caption Sync Library
//!
//! This library keeps a stream caption in sync with the track currently
//! playing on Spotify. A background loop polls playback state, detects track
//! changes, resolves time-synced lyrics for new tracks and publishes them as
//! an LRC document; a display surface reads playback position and the
//! published document and renders a window of lines around the active one.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints served by the local server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `lyrics` - LRC parsing, lyric lookup, line matching and caption state
//! - `management` - Credential, lyric document, sync state and log persistence
//! - `server` - Local HTTP server wiring
//! - `spotify` - Spotify accounts and player API clients
//! - `sync` - Track-change detection and the lyric synchronization loop
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spolyrics::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spolyrics::Res<()> {
//!     config::load_env().await?;
//!     cli::serve().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod lyrics;
pub mod management;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for the binary glue code using
/// a boxed dynamic error trait object. Library components return their own
/// typed errors; this alias is where those meet.
///
/// # Example
///
/// ```
/// use spolyrics::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used while a command is starting up (missing configuration, address
/// already in use). Nothing inside the synchronization loop may call it.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every recoverable failure: a failed poll, refresh or lookup is
/// reported here and retried on the next tick.
///
/// # Example
///
/// ```
/// warning!("Playback fetch failed: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
