//! Build script for the storefront crate.
//!
//! Content-hashes `static/css/main.css` so the stylesheet URL changes
//! whenever its content does.

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Hex characters of the SHA-256 kept in the file name.
const HASH_LEN: usize = 8;

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")?;
    let css_dir = Path::new(&manifest_dir).join("static/css");
    let css_path = css_dir.join("main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return Ok(());
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..HASH_LEN).unwrap_or(&digest);

    // Sets CSS_HASH for `env!("CSS_HASH")` in filters.rs
    println!("cargo:rustc-env=CSS_HASH={short_hash}");

    let derived_dir = css_dir.join("derived");
    fs::create_dir_all(&derived_dir)?;

    let derived_name = format!("main.{short_hash}.css");
    for entry in fs::read_dir(&derived_dir)? {
        let entry = entry?;
        if entry.file_name() != derived_name.as_str() {
            fs::remove_file(entry.path())?;
        }
    }
    fs::write(derived_dir.join(&derived_name), &content)?;

    Ok(())
}
