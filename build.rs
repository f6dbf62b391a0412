//! Build script for the spolyrics caption sync service.
//!
//! Copies the configuration template into the user's local data directory so
//! that `spolyrics/.env.example` sits next to the `.env` file the binary loads
//! at start-up.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to the local data directory.
///
/// # File Operations
///
/// Templates are copied to the platform-specific local data directory:
/// - Linux: `~/.local/share/spolyrics/.env.example`
/// - macOS: `~/Library/Application Support/spolyrics/.env.example`
/// - Windows: `%LOCALAPPDATA%/spolyrics/.env.example`
///
/// A missing template only produces a cargo warning; directory creation and
/// write failures fail the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spolyrics");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
