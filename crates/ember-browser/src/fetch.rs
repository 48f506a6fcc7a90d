//! Resource fetching seam.
//!
//! [Fetch Standard](https://fetch.spec.whatwg.org/)
//!
//! The renderer never performs network I/O itself. The host supplies a
//! [`ResourceFetcher`] that turns a resolved URL into the resource text and an
//! optional cache lifetime. Two fetchers ship with the crate: [`FileFetcher`]
//! for `file:` and `data:` URLs and plain paths, and [`MemoryFetcher`] for
//! embedding and tests.

use std::collections::HashMap;
use std::path::PathBuf;

use base64::Engine;
use thiserror::Error;
use url::Url;

/// A fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Decoded resource text.
    pub body: String,
    /// Cache lifetime in seconds, when the source supplied one.
    pub max_age: Option<u64>,
}

impl Resource {
    /// A resource with no cache lifetime.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            max_age: None,
        }
    }
}

/// Errors produced while fetching a resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Nothing is available at the URL.
    #[error("no resource at '{0}'")]
    NotFound(String),

    /// The fetcher does not handle this URL scheme.
    #[error("unsupported URL scheme in '{0}'")]
    UnsupportedScheme(String),

    /// A `data:` URL could not be decoded.
    #[error("malformed data URL: {0}")]
    MalformedDataUrl(String),

    /// Reading a local file failed.
    #[error("failed to read '{path}'")]
    Io {
        /// The path that was read.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Supplies resource text for resolved URLs.
///
/// Implementations must be `Send + Sync` so a host can share one fetcher
/// between sessions.
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the resource cannot be produced.
    fn fetch(&self, url: &str) -> Result<Resource, FetchError>;
}

/// Fetches `file:` URLs, `data:` URLs and plain filesystem paths.
///
/// Network schemes are rejected with [`FetchError::UnsupportedScheme`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl FileFetcher {
    fn read(path: PathBuf, url: &str) -> Result<Resource, FetchError> {
        let bytes = std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(url.to_string())
            } else {
                FetchError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;
        Ok(Resource::new(String::from_utf8_lossy(&bytes)))
    }
}

impl ResourceFetcher for FileFetcher {
    fn fetch(&self, url: &str) -> Result<Resource, FetchError> {
        if url.starts_with("data:") {
            return decode_data_url(url);
        }
        match Url::parse(url) {
            Ok(parsed) if parsed.scheme() == "file" => {
                let path = parsed
                    .to_file_path()
                    .map_err(|()| FetchError::NotFound(url.to_string()))?;
                Self::read(path, url)
            }
            // Windows drive letters parse as a one-letter scheme.
            Ok(parsed) if parsed.scheme().len() > 1 => {
                Err(FetchError::UnsupportedScheme(url.to_string()))
            }
            _ => Self::read(PathBuf::from(url), url),
        }
    }
}

/// Serves resources from an in-memory map keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, Resource>,
}

impl MemoryFetcher {
    /// Create an empty fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `body` under `url`, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.insert(url, Resource::new(body));
        self
    }

    /// Register a resource under `url`, replacing any previous entry.
    pub fn insert(&mut self, url: &str, resource: Resource) {
        let _ = self.resources.insert(url.to_string(), resource);
    }
}

impl ResourceFetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<Resource, FetchError> {
        self.resources
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}

/// [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
///
/// "data:[<mediatype>][;base64],<data>"
fn decode_data_url(url: &str) -> Result<Resource, FetchError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| FetchError::MalformedDataUrl(url.to_string()))?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| FetchError::MalformedDataUrl("missing ','".to_string()))?;

    let bytes = if header.split(';').any(|part| part == "base64") {
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| FetchError::MalformedDataUrl(e.to_string()))?
    } else {
        percent_decode(data)
    };
    Ok(Resource::new(String::from_utf8_lossy(&bytes)))
}

/// Decode `%XX` escapes; malformed escapes are kept as written.
fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(hex) = input.get(i + 1..i + 3)
            && hex.bytes().all(|b| b.is_ascii_hexdigit())
            && let Ok(byte) = u8::from_str_radix(hex, 16)
        {
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}
