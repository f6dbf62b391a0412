//! # CLI Module
//!
//! Command implementations of the `spolyrics` binary. Each command is an
//! async function called from `main` once configuration is loaded.
//!
//! ## Commands
//!
//! ### Service
//!
//! - [`serve`] - runs the local HTTP server and the lyric synchronization
//!   loop side by side until Ctrl-C.
//! - [`auth`] - opens the Spotify consent page in a browser and waits until
//!   the callback has stored a credential.
//!
//! ### Clients of a running service
//!
//! - [`status`] - prints the status route as a table.
//! - [`display`] - terminal caption: polls status and the published lyric
//!   document every second and draws the window around the active line.
//! - [`log`] - prints the Sync Log.
//!
//! ## Typical Session
//!
//! ```bash
//! spolyrics auth        # once, stores the token pair
//! spolyrics serve       # keep running
//! spolyrics display     # in another terminal, or point an overlay at
//!                       # http://127.0.0.1:5172/lyrics/current.lrc
//! ```
//!
//! ## Error Handling
//!
//! Start-up problems (missing client id, unbindable address, unreachable
//! server) end the command through `error!`. Once running, failures are
//! reported with `warning!` and retried on the next tick.

mod auth;
mod display;
mod log;
mod serve;
mod status;

pub use auth::auth;
pub use display::display;
pub use log::log;
pub use serve::serve;
pub use status::status;
