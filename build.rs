//! Build script for the playlist archiver.
//!
//! Copies the configuration templates from the crate root into the user's
//! local data directory, next to where the application looks for the real
//! files, so a fresh install comes with ready-to-edit examples.

use std::{env, fs, path::PathBuf};

/// Templates copied on every build, relative to the crate root.
const TEMPLATES: [&str; 2] = [".env.example", "config.example.toml"];

/// Copies [`TEMPLATES`] into the local data directory.
///
/// Destination:
/// - Linux: `~/.local/share/sparchive/`
/// - macOS: `~/Library/Application Support/sparchive/`
/// - Windows: `%LOCALAPPDATA%/sparchive/`
///
/// A missing template only produces a cargo warning; failing to create the
/// directory or to write a file fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    for template in TEMPLATES {
        println!("cargo:rerun-if-changed={template}");
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sparchive");
    fs::create_dir_all(&out_dir)?;

    for template in TEMPLATES {
        let source = manifest_dir.join(template);
        if source.is_file() {
            let contents = fs::read_to_string(&source)?;
            fs::write(out_dir.join(template), contents)?;
        } else {
            println!(
                "cargo:warning={} not found at {}",
                template,
                source.display()
            );
        }
    }

    Ok(())
}
