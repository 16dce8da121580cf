//! `vodarc convert-cookies`: browser JSON export to a Netscape cookie file.

use anyhow::Result;
use std::path::{Path, PathBuf};
use vodarc_core::config;
use vodarc_core::cookies;

use super::load_config;

pub fn run_convert_cookies(
    config_override: Option<&Path>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let input = match input {
        Some(p) => p,
        None => match config_override.and_then(Path::parent) {
            Some(dir) => dir.join("cookies.json"),
            None => config::config_file("cookies.json")?,
        },
    };
    let output = match output {
        Some(p) => p,
        None => load_config(config_override)?.0.cookies_file,
    };
    let count = cookies::convert_file(&input, &output)?;
    println!("converted {} cookie(s) from {} to {}", count, input.display(), output.display());
    Ok(())
}
