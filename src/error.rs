//! Error types for fetching and rendering.
//!
//! Both families are non-fatal: fetch errors end up in the rendered
//! document's error log, render errors only reach the log output.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single remote lookup.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no {0}")]
    Empty(&'static str),

    #[error("HTTP client unavailable: {0}")]
    Client(String),
}

/// Failure of a single render pass.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read template {}: {source}", .path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid template: {0}")]
    Template(#[from] TemplateError),

    #[error("failed to write {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure compiling or rendering a mustache template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to compile: {0}")]
    Compile(#[source] mustache::Error),

    #[error("failed to render: {0}")]
    Render(#[source] mustache::Error),
}
