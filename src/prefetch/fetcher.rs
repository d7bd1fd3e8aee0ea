//! Image downloader
//!
//! The prefetch loop only needs "URL in, bytes out"; the trait lets tests
//! substitute a fake for the network.

use crate::error::PrefetchError;

/// Blocking download of a single URL
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, PrefetchError>;
}

/// `reqwest` blocking client with default timeouts
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, PrefetchError> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(PrefetchError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}
