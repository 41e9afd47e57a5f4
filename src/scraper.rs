//! HTTP access to upstream endpoints.

use crate::errors::ResolveError;
use failure::Fallible;
use reqwest::header::USER_AGENT;
use reqwest::{Method, Url};

static CLIENT_USER_AGENT: &str = concat!("grsec-urls/", env!("CARGO_PKG_VERSION"));

/// Blocking GET returning the raw response body.
pub trait Fetch {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, ResolveError>;
}

impl<'a, F: Fetch + ?Sized> Fetch for &'a F {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, ResolveError> {
        (**self).get_bytes(url)
    }
}

/// Upstream scraper.
#[derive(Debug)]
pub struct Scraper {
    hclient: reqwest::Client,
}

impl Scraper {
    pub fn new() -> Fallible<Self> {
        let scraper = Self {
            hclient: reqwest::ClientBuilder::new().build()?,
        };
        Ok(scraper)
    }

    /// Return a request builder with URL and default headers set.
    fn new_request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.hclient
            .request(method, url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
    }
}

impl Fetch for Scraper {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, ResolveError> {
        let parsed = Url::parse(url).map_err(|e| ResolveError::fetch(url, e))?;
        log::debug!("fetching {}", parsed);

        let mut resp = self
            .new_request(Method::GET, parsed)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| ResolveError::fetch(url, e))?;

        let mut body = Vec::new();
        resp.copy_to(&mut body)
            .map_err(|e| ResolveError::fetch(url, e))?;
        log::trace!("fetched {} bytes from {}", body.len(), url);

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_is_a_fetch_error() {
        let scraper = Scraper::new().unwrap();
        match scraper.get_bytes("not a url") {
            Err(ResolveError::Fetch { url, .. }) => assert_eq!(url, "not a url"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
