//! Catalog client for the Helix HTTP API, built on the curl crate (libcurl).

use anyhow::Context;
use std::str;
use std::time::Duration;

use crate::config::ArchiveConfig;
use crate::error::ArchiveError;
use crate::model::VideoType;

use super::parse::{next_cursor, UsersResponse, VideosResponse};
use super::{CatalogError, CatalogPage, CatalogSource};

/// Blocking Helix client. One request per call; runs on the caller's thread.
#[derive(Debug, Clone)]
pub struct HelixClient {
    api_base: String,
    client_id: String,
    access_token: String,
    page_size: u32,
}

impl HelixClient {
    pub fn new(cfg: &ArchiveConfig) -> Self {
        Self::with_base(&cfg.api_base, &cfg.client_id, &cfg.access_token, cfg.page_size)
    }

    pub fn with_base(api_base: &str, client_id: &str, access_token: &str, page_size: u32) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            client_id: client_id.trim().to_string(),
            access_token: access_token.trim().to_string(),
            page_size,
        }
    }

    /// Resolves a channel login to the account id the catalog is keyed by.
    ///
    /// This is the first authenticated call of a run, so 401/403 here is reported
    /// as a credential error.
    pub fn resolve_user_id(&self, login: &str) -> anyhow::Result<String> {
        let url = self.endpoint("users", &[("login", login.trim())])?;
        let (status, body) = self
            .get(&url)
            .with_context(|| format!("look up channel '{}'", login))?;
        if status == 401 || status == 403 {
            return Err(ArchiveError::credential(format!(
                "catalog rejected credentials (HTTP {}): {}",
                status,
                body_excerpt(&body)
            ))
            .into());
        }
        if !(200..300).contains(&status) {
            anyhow::bail!("channel lookup for '{}' returned HTTP {}", login, status);
        }
        let users: UsersResponse =
            serde_json::from_slice(&body).context("decode channel lookup response")?;
        let user = users.data.into_iter().next().ok_or_else(|| {
            ArchiveError::configuration(format!("channel '{}' does not exist", login))
        })?;
        tracing::debug!(login, user_id = %user.id, "resolved channel");
        Ok(user.id)
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<String, CatalogError> {
        let base = format!("{}/{}", self.api_base, path);
        let mut url = url::Url::parse(&base).map_err(|e| CatalogError::InvalidUrl(format!("{base}: {e}")))?;
        {
            let mut q = url.query_pairs_mut();
            for (k, v) in params {
                q.append_pair(k, v);
            }
        }
        Ok(url.into())
    }

    /// GET with the auth headers; returns status and body.
    fn get(&self, url: &str) -> Result<(u32, Vec<u8>), CatalogError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(30))?;

        let mut list = curl::easy::List::new();
        list.append(&format!("Client-Id: {}", self.client_id))?;
        list.append(&format!("Authorization: Bearer {}", self.access_token))?;
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok((code, body))
    }
}

impl CatalogSource for HelixClient {
    fn fetch_page(
        &self,
        user_id: &str,
        video_type: VideoType,
        cursor: Option<&str>,
    ) -> Result<CatalogPage, CatalogError> {
        let first = self.page_size.to_string();
        let mut params = vec![
            ("user_id", user_id),
            ("type", video_type.as_str()),
            ("first", first.as_str()),
        ];
        if let Some(c) = cursor {
            params.push(("after", c));
        }
        let url = self.endpoint("videos", &params)?;
        let (status, body) = self.get(&url)?;
        if status == 401 || status == 403 {
            tracing::debug!(status, body = %body_excerpt(&body), "catalog rejected credentials");
            return Err(CatalogError::Unauthorized(status));
        }
        if !(200..300).contains(&status) {
            tracing::debug!(status, body = %body_excerpt(&body), "catalog page rejected");
            return Err(CatalogError::Http(status));
        }
        let resp: VideosResponse = serde_json::from_slice(&body).map_err(CatalogError::Decode)?;

        let item_count = resp.data.len();
        let mut records = Vec::with_capacity(item_count);
        for raw in resp.data {
            match raw.into_record(video_type) {
                Ok(r) => records.push(r),
                Err(reason) => tracing::warn!(%video_type, "skipping malformed catalog item: {}", reason),
            }
        }
        Ok(CatalogPage {
            records,
            cursor: next_cursor(resp.pagination),
            item_count,
        })
    }
}

fn body_excerpt(body: &[u8]) -> String {
    let s = String::from_utf8_lossy(body);
    s.chars().take(200).collect()
}
