//! Loads `NUTRIPLAN_API_URL` into the compile environment so the crate
//! can read it through `option_env!()`. A variable already set in the
//! real environment wins; otherwise a `.env` file next to the manifest
//! is consulted.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=.env");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let env_file = PathBuf::from(&manifest_dir).join(".env");
    if !env_file.exists() {
        return;
    }

    let contents = fs::read_to_string(&env_file).expect("failed to read .env");
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        // The real environment takes priority over the file.
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value.trim());
        }
    }
}
