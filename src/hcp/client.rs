//! TFE HTTP client for API interactions

use colored::Colorize;
use flate2::read::GzDecoder;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use crate::config::api;
use crate::context::ProbeContext;
use crate::error::{Result, TfeError};
use crate::hcp::document;

/// What to do with a successful response body
#[derive(Debug, Clone, Copy)]
pub enum FetchTarget<'a> {
    /// Parse the body as JSON and return it
    Json,
    /// Save the body to a file; the extension selects the handling
    ///
    /// `.tar`, `.tgz`, `.gz`: gzip body, decompressed before writing.
    /// `.json`: JSON body, re-serialized before writing.
    Download(&'a Path),
}

/// Result of a fetch
#[derive(Debug)]
pub enum Fetched {
    /// Decoded JSON document
    Json(Value),
    /// Decompressed archive written to the download target
    Archive { bytes: u64 },
    /// JSON document written to the download target
    Saved,
}

/// How a download target is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DownloadKind {
    Archive,
    Data,
}

impl DownloadKind {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tar") | Some("tgz") | Some("gz") => Ok(DownloadKind::Archive),
            Some("json") => Ok(DownloadKind::Data),
            _ => Err(TfeError::Config(format!(
                "unsupported download target '{}' (expected .tar, .tgz, .gz or .json)",
                path.display()
            ))),
        }
    }
}

/// TFE API client
pub struct TfeClient {
    client: Client,
    token: String,
    /// Normalized API address, e.g. "https://app.terraform.io"
    api_base: String,
    /// Echo request URLs and raw response bodies to stdout
    debug: bool,
    /// Page budget for `fetch_all_pages`
    max_pages: u32,
}

impl TfeClient {
    /// Create a client from a resolved context, trusting its CA bundle if any
    pub fn from_context(context: &ProbeContext) -> Result<Self> {
        let mut builder = Self::http_builder();

        if let Some(ca_path) = &context.ca_bundle {
            let pem = std::fs::read(ca_path).map_err(|e| {
                TfeError::Config(format!(
                    "could not read CA bundle '{}': {}",
                    ca_path.display(),
                    e
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                TfeError::Config(format!(
                    "invalid CA bundle '{}': {}",
                    ca_path.display(),
                    e
                ))
            })?;
            debug!("Trusting extra CA bundle {}", ca_path.display());
            builder = builder.add_root_certificate(cert);
        }

        let client = builder
            .build()
            .map_err(|e| TfeError::Config(format!("could not build HTTP client: {}", e)))?;
        Ok(Self::with_http_client(
            client,
            context.token.clone(),
            context.api_base.clone(),
        ))
    }

    fn http_builder() -> reqwest::ClientBuilder {
        Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(api::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(api::REQUEST_TIMEOUT_SECS))
    }

    fn with_http_client(client: Client, token: String, api_base: String) -> Self {
        Self {
            client,
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
            debug: false,
            max_pages: api::MAX_PAGES,
        }
    }

    /// Enable echoing of request URLs and raw response bodies
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Set the page budget for paginated collections
    pub fn set_max_pages(&mut self, max_pages: u32) {
        self.max_pages = max_pages.max(1);
    }

    /// Build the base URL for API requests
    pub(crate) fn base_url(&self) -> String {
        format!("{}{}", self.api_base, api::BASE_PATH)
    }

    /// Turn a link from a response into an absolute URL
    ///
    /// JSON:API links may be absolute or relative to the API address.
    pub(crate) fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.api_base, url)
        } else {
            format!("{}/{}", self.base_url(), url)
        }
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", api::CONTENT_TYPE)
    }

    /// Create a GET request builder with standard headers
    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    /// Fetch a URL and handle the body according to `target`
    pub async fn fetch(&self, url: &str, target: FetchTarget<'_>) -> Result<Fetched> {
        let url = self.resolve_url(url);

        match target {
            FetchTarget::Json => Ok(Fetched::Json(self.fetch_json(&url).await?)),
            FetchTarget::Download(path) => match DownloadKind::from_path(path)? {
                DownloadKind::Archive => {
                    let response = self.send(&url).await?;
                    let compressed = response.bytes().await?;
                    self.echo_body(&format!("<{} bytes of archive data>", compressed.len()));

                    let raw = decompress(&compressed, path)?;
                    tokio::fs::write(path, &raw).await.map_err(|e| {
                        TfeError::Io(format!("Failed to write '{}': {}", path.display(), e))
                    })?;

                    debug!("Wrote {} bytes to {}", raw.len(), path.display());
                    Ok(Fetched::Archive {
                        bytes: raw.len() as u64,
                    })
                }
                DownloadKind::Data => {
                    let json = self.fetch_json(&url).await?;
                    let pretty = serde_json::to_string_pretty(&json)?;
                    tokio::fs::write(path, pretty).await.map_err(|e| {
                        TfeError::Io(format!("Failed to write '{}': {}", path.display(), e))
                    })?;
                    Ok(Fetched::Saved)
                }
            },
        }
    }

    /// Fetch a single JSON:API document without following pagination links
    pub async fn fetch_document(&self, url: &str) -> Result<Value> {
        let url = self.resolve_url(url);
        self.fetch_json(&url).await
    }

    /// Fetch every page of a collection by following `links.next`
    ///
    /// Returns the concatenated `data` items in page order. Fails with
    /// `TfeError::Pagination` when the server keeps linking past the page
    /// budget.
    pub async fn fetch_all_pages(&self, url: &str) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let mut next = Some(self.resolve_url(url));
        let mut pages: u32 = 0;

        while let Some(page_url) = next.take() {
            if pages >= self.max_pages {
                return Err(TfeError::Pagination(format!(
                    "more than {} pages while listing '{}'",
                    self.max_pages, url
                )));
            }

            let mut page = self.fetch_json(&page_url).await?;
            pages += 1;

            next = document::next_link(&page).map(|link| self.resolve_url(link));
            let data = document::take_data(&mut page);
            debug!("Page {} returned {} items", pages, data.len());
            items.extend(data);
        }

        debug!("Fetched {} items in {} page(s) from {}", items.len(), pages, url);
        Ok(items)
    }

    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self.send(url).await?;
        let body = response.text().await?;
        self.echo_body(&body);

        serde_json::from_str(&body)
            .map_err(|e| TfeError::Json(format!("invalid response from '{}': {}", url, e)))
    }

    /// Send a GET, turning status >= 400 into `TfeError::Api`
    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        debug!("GET {}", url);
        if self.debug {
            echo(format_args!("{} {}", "Calling TFE with".magenta(), url));
        }

        let response = self.get(url).send().await?;
        let status = response.status().as_u16();

        if self.debug {
            echo(format_args!(
                "{} {}",
                "API Request Response code:".bright_magenta(),
                status
            ));
        }

        if status >= 400 {
            return Err(api_error(url, status, response).await);
        }
        Ok(response)
    }

    fn echo_body(&self, body: &str) {
        if self.debug {
            echo(body.bright_black());
        }
    }
}

/// Write one debug line to stdout, ignoring a closed pipe
fn echo(line: impl std::fmt::Display) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}", line);
}

/// Build an API error from a failed response, keeping the decoded body
async fn api_error(url: &str, status: u16, response: reqwest::Response) -> TfeError {
    let raw = response.text().await.unwrap_or_default();

    match serde_json::from_str::<Value>(&raw) {
        Ok(json) => {
            let message = json
                .pointer("/errors/0/detail")
                .or_else(|| json.pointer("/errors/0/title"))
                .or_else(|| json.pointer("/errors/0"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("request to '{}' failed", url));
            let body = serde_json::to_string_pretty(&json).unwrap_or(raw);
            TfeError::Api {
                status,
                message,
                body,
            }
        }
        Err(_) => TfeError::Api {
            status,
            message: format!("request to '{}' failed", url),
            body: raw,
        },
    }
}

/// Gunzip a downloaded archive body
fn decompress(compressed: &[u8], target: &Path) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(compressed);
    let mut raw = Vec::new();
    decoder.read_to_end(&mut raw).map_err(|e| {
        TfeError::Io(format!(
            "Failed to decompress archive for '{}': {}",
            target.display(),
            e
        ))
    })?;
    Ok(raw)
}

#[cfg(test)]
impl TfeClient {
    pub fn new(token: String, api_base: String) -> Self {
        let client = Self::http_builder()
            .build()
            .unwrap_or_else(|_| Client::new());

        Self::with_http_client(client, token, api_base)
    }

    /// Create a test client pointed at a mock server
    pub fn test_client(base_url: &str) -> Self {
        Self::new("test-token".to_string(), base_url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let client = TfeClient::new("token".to_string(), "https://example.com".to_string());
        assert_eq!(client.base_url(), "https://example.com/api/v2");
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let client = TfeClient::new("token".to_string(), "https://example.com/".to_string());
        assert_eq!(client.api_base, "https://example.com");
        assert!(!client.base_url().contains("//api"));
    }

    #[test]
    fn test_client_creation_defaults() {
        let client = TfeClient::new("my-token".to_string(), "https://tfe.local".to_string());
        assert_eq!(client.token, "my-token");
        assert!(!client.debug);
        assert_eq!(client.max_pages, api::MAX_PAGES);
    }

    #[test]
    fn test_set_max_pages_never_zero() {
        let mut client = TfeClient::new("t".to_string(), "https://tfe.local".to_string());
        client.set_max_pages(0);
        assert_eq!(client.max_pages, 1);
    }

    #[test]
    fn test_resolve_url_variants() {
        let client = TfeClient::new("t".to_string(), "https://tfe.local".to_string());
        assert_eq!(
            client.resolve_url("https://other.host/x"),
            "https://other.host/x"
        );
        assert_eq!(
            client.resolve_url("/api/v2/configuration-versions/cv-1/download"),
            "https://tfe.local/api/v2/configuration-versions/cv-1/download"
        );
        assert_eq!(
            client.resolve_url("workspaces/ws-1"),
            "https://tfe.local/api/v2/workspaces/ws-1"
        );
    }

    #[test]
    fn test_download_kind_from_path() {
        assert_eq!(
            DownloadKind::from_path(Path::new("/s/latest.tar")).unwrap(),
            DownloadKind::Archive
        );
        assert_eq!(
            DownloadKind::from_path(Path::new("/s/cfg.tgz")).unwrap(),
            DownloadKind::Archive
        );
        assert_eq!(
            DownloadKind::from_path(Path::new("/s/state.json")).unwrap(),
            DownloadKind::Data
        );
        assert!(matches!(
            DownloadKind::from_path(Path::new("/s/notes.txt")),
            Err(TfeError::Config(_))
        ));
    }

    #[test]
    fn test_decompress_rejects_plain_bytes() {
        let err = decompress(b"definitely not gzip", Path::new("x.tar")).unwrap_err();
        assert!(matches!(err, TfeError::Io(_)));
    }
}
