mod auth;
mod credentials;
mod log;
mod lyrics;
mod state;

pub use auth::EXPIRY_MARGIN_SECS;
pub use auth::TokenManager;
pub use credentials::CredentialError;
pub use credentials::CredentialStore;
pub use log::SyncEvent;
pub use log::SyncLog;
pub use log::read_log;
pub use lyrics::LyricStore;
pub use state::MAX_NOT_FOUND_ATTEMPTS;
pub use state::NotFoundVerdict;
pub use state::SyncState;
pub use state::is_lyrics_synced;
