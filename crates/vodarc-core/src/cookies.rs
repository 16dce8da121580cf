//! Browser cookie export (JSON array) to the Netscape cookie file the
//! downloader reads.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const HEADER: &str = "# Netscape HTTP Cookie File\n\n";
/// Session cookies have no expiry in the export; treat them as long-lived.
const FAR_FUTURE: i64 = 2_147_483_647;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserCookie {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub expiration_date: Option<f64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl BrowserCookie {
    fn netscape_line(&self) -> String {
        let flag = |b: bool| if b { "TRUE" } else { "FALSE" };
        let expires = self
            .expiration_date
            .filter(|e| e.is_finite())
            .map(|e| e.trunc() as i64)
            .unwrap_or(FAR_FUTURE)
            .to_string();
        [
            self.domain.as_str(),
            flag(self.domain.starts_with('.')),
            self.path.as_deref().unwrap_or("/"),
            flag(self.secure),
            expires.as_str(),
            self.name.as_str(),
            self.value.as_str(),
        ]
        .join("\t")
    }
}

/// Render cookies as a Netscape cookie file.
pub fn to_netscape(cookies: &[BrowserCookie]) -> String {
    let mut out = String::from(HEADER);
    for c in cookies {
        out.push_str(&c.netscape_line());
        out.push('\n');
    }
    out
}

/// Convert `input` (JSON) into `output` (Netscape). Returns the cookie count.
/// Nothing is written when the export holds no cookies.
pub fn convert_file(input: &Path, output: &Path) -> Result<usize> {
    let data = fs::read_to_string(input)
        .with_context(|| format!("read cookie export {}", input.display()))?;
    let cookies: Vec<BrowserCookie> = serde_json::from_str(&data)
        .with_context(|| format!("parse cookie export {} (expected a JSON array)", input.display()))?;
    if cookies.is_empty() {
        bail!("no cookies found in {}", input.display());
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(output, to_netscape(&cookies))
        .with_context(|| format!("write cookie file {}", output.display()))?;
    tracing::info!(count = cookies.len(), output = %output.display(), "cookies converted");
    Ok(cookies.len())
}
