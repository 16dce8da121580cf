//! Remote catalog of recordings.
//!
//! The fetcher only depends on the `CatalogSource` trait; `HelixClient` is the
//! HTTP implementation. Each enabled type is queried page by page and the pages
//! are concatenated in the order received. A failing type is logged and
//! contributes nothing; it never aborts the run.

mod helix;
mod parse;

pub use helix::HelixClient;

use std::collections::HashSet;
use std::fmt;

use crate::error::ArchiveError;
use crate::model::{VideoType, VodRecord};

/// One page of decoded records.
#[derive(Debug, Clone, Default)]
pub struct CatalogPage {
    pub records: Vec<VodRecord>,
    /// Cursor for the next page, `None` on the last page.
    pub cursor: Option<String>,
    /// Items the source returned before validation. Pagination continues past
    /// pages whose items were all rejected; only a page with no items at all
    /// ends it.
    pub item_count: usize,
}

impl CatalogPage {
    /// Page whose items all validated.
    pub fn new(records: Vec<VodRecord>, cursor: Option<String>) -> Self {
        let item_count = records.len();
        Self {
            records,
            cursor,
            item_count,
        }
    }
}

/// Error from a single catalog query.
#[derive(Debug)]
pub enum CatalogError {
    /// Curl reported an error (timeout, connection, etc.).
    Transport(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// The catalog rejected the credentials (401/403). Fatal for the run.
    Unauthorized(u32),
    /// Body was not the expected JSON shape.
    Decode(serde_json::Error),
    /// Endpoint could not be built from the configured base URL.
    InvalidUrl(String),
    /// Any other failure reported by a catalog implementation.
    Other(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Transport(e) => write!(f, "{}", e),
            CatalogError::Http(code) => write!(f, "HTTP {}", code),
            CatalogError::Unauthorized(code) => write!(f, "credentials rejected (HTTP {})", code),
            CatalogError::Decode(e) => write!(f, "decode: {}", e),
            CatalogError::InvalidUrl(u) => write!(f, "invalid URL {}", u),
            CatalogError::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Transport(e) => Some(e),
            CatalogError::Decode(e) => Some(e),
            CatalogError::Http(_)
            | CatalogError::Unauthorized(_)
            | CatalogError::InvalidUrl(_) | CatalogError::Other(_) => None,
        }
    }
}

impl From<curl::Error> for CatalogError {
    fn from(e: curl::Error) -> Self {
        CatalogError::Transport(e)
    }
}

/// Paginated, per-type access to the remote inventory.
pub trait CatalogSource {
    fn fetch_page(
        &self,
        user_id: &str,
        video_type: VideoType,
        cursor: Option<&str>,
    ) -> Result<CatalogPage, CatalogError>;
}

/// Everything fetched in one run.
#[derive(Debug, Default)]
pub struct FetchedCatalog {
    pub records: Vec<VodRecord>,
    /// Types whose query failed, with the reason.
    pub failed_types: Vec<(VideoType, String)>,
}

impl FetchedCatalog {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Types to query: just the restricted one, or all three.
pub fn enabled_types(restriction: Option<VideoType>) -> Vec<VideoType> {
    match restriction {
        Some(t) => vec![t],
        None => VideoType::ALL.to_vec(),
    }
}

pub struct CatalogFetcher<'a, S: CatalogSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: CatalogSource + ?Sized> CatalogFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Fetches every enabled type in order and merges the results.
    ///
    /// A type that fails is recorded and skipped. Rejected credentials abort
    /// the whole fetch, since every later query would fail the same way.
    pub fn fetch(&self, user_id: &str, types: &[VideoType]) -> Result<FetchedCatalog, ArchiveError> {
        let mut out = FetchedCatalog::default();
        let mut seen: HashSet<String> = HashSet::new();

        for &video_type in types {
            match self.fetch_type(user_id, video_type) {
                Ok(records) => {
                    tracing::info!(%video_type, count = records.len(), "fetched catalog type");
                    for r in records {
                        if seen.insert(r.id.clone()) {
                            out.records.push(r);
                        } else {
                            tracing::warn!(id = %r.id, %video_type, "duplicate recording id in catalog; keeping first");
                        }
                    }
                }
                Err(CatalogError::Unauthorized(status)) => {
                    return Err(ArchiveError::credential(format!(
                        "catalog rejected credentials while listing {} recordings (HTTP {})",
                        video_type, status
                    )));
                }
                Err(e) => {
                    tracing::warn!(%video_type, "catalog fetch failed, treating as empty: {}", e);
                    out.failed_types.push((video_type, e.to_string()));
                }
            }
        }
        Ok(out)
    }

    /// All pages of one type. Any page failure discards the whole type.
    fn fetch_type(&self, user_id: &str, video_type: VideoType) -> Result<Vec<VodRecord>, CatalogError> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors: HashSet<String> = HashSet::new();

        loop {
            let page = self
                .source
                .fetch_page(user_id, video_type, cursor.as_deref())?;
            let item_count = page.item_count;
            if page.records.len() < item_count {
                tracing::debug!(
                    %video_type,
                    rejected = item_count - page.records.len(),
                    "page had invalid items; continuing"
                );
            }
            records.extend(page.records);

            match page.cursor {
                Some(next) if item_count > 0 => {
                    if !seen_cursors.insert(next.clone()) {
                        tracing::warn!(%video_type, "catalog repeated a cursor; stopping pagination");
                        break;
                    }
                    cursor = Some(next);
                }
                _ => break,
            }
        }
        Ok(records)
    }
}
