//! vodarc core: catalog discovery, filtering, deterministic placement and
//! retried downloads for a channel's past broadcasts.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub mod archive;
pub mod audit;
pub mod catalog;
pub mod cookies;
pub mod deps;
pub mod downloader;
pub mod filter;
pub mod planner;
pub mod report;
pub mod retry;
