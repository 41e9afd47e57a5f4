//! Latest patch lookup.

use crate::config::PatchConfig;
use crate::errors::ResolveError;
use crate::grammar::PatchFields;
use crate::metadata::{self, Release};
use crate::scraper::Fetch;
use crate::track::{Endpoint, EndpointStyle};
use reqwest::Url;
use std::collections::BTreeMap;

/// Download metadata for a single patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchMetadata {
    pub filename: String,
    pub url: String,
    pub signature_filename: String,
    pub signature_url: String,
    pub fields: PatchFields,
}

impl PatchMetadata {
    pub fn to_facts(&self) -> BTreeMap<String, String> {
        let mut facts = self.fields.to_facts();
        facts.insert(metadata::PATCH_FILENAME.to_string(), self.filename.clone());
        facts.insert(metadata::PATCH_URL.to_string(), self.url.clone());
        facts.insert(
            metadata::SIGNATURE_FILENAME.to_string(),
            self.signature_filename.clone(),
        );
        facts.insert(
            metadata::SIGNATURE_URL.to_string(),
            self.signature_url.clone(),
        );
        facts
    }
}

/// Patch and signature locations as published upstream.
struct Located {
    filename: String,
    url: String,
    signature_url: String,
}

/// Queries a "latest patch" endpoint and decodes its answer.
#[derive(Debug)]
pub struct PatchMetadataBuilder<F> {
    fetcher: F,
    config: PatchConfig,
}

impl<F: Fetch> PatchMetadataBuilder<F> {
    pub fn new(fetcher: F, config: PatchConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn build(&self, endpoint: &Endpoint) -> Result<PatchMetadata, ResolveError> {
        let body = self.fetcher.get_bytes(&endpoint.url)?;
        let located = match endpoint.style {
            EndpointStyle::PlainText => self.locate_plain_text(&endpoint.url, &body)?,
            EndpointStyle::JsonReleaseList => self.locate_in_releases(&endpoint.url, &body)?,
        };
        log::debug!("latest patch: {} ({})", located.filename, located.url);

        let fields = endpoint.grammar.parse(&located.filename)?;
        let signature_filename = format!("{}{}", located.filename, metadata::SIGNATURE_EXTENSION);

        Ok(PatchMetadata {
            filename: located.filename,
            url: located.url,
            signature_filename,
            signature_url: located.signature_url,
            fields,
        })
    }

    fn locate_plain_text(&self, url: &str, body: &[u8]) -> Result<Located, ResolveError> {
        let text = std::str::from_utf8(body).map_err(|e| ResolveError::parse(url, e))?;
        let filename = text.trim();
        if filename.is_empty() {
            return Err(ResolveError::parse(url, "empty patch filename"));
        }

        // The filename is a query value, so plain concatenation.
        let patch_url = format!("{}{}", self.config.download_prefix, filename);
        let signature_url = format!("{}{}", patch_url, metadata::SIGNATURE_EXTENSION);

        Ok(Located {
            filename: filename.to_string(),
            url: patch_url,
            signature_url,
        })
    }

    fn locate_in_releases(&self, url: &str, body: &[u8]) -> Result<Located, ResolveError> {
        let releases: Vec<Release> =
            serde_json::from_slice(body).map_err(|e| ResolveError::parse(url, e))?;
        let latest = releases
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::parse(url, "empty release list"))?;

        let patch_url = self.single_asset(url, &latest, &self.config.patch_extension)?;
        let signature_url = self.single_asset(url, &latest, &self.config.signature_extension)?;
        let filename = last_path_segment(&patch_url)?;

        Ok(Located {
            filename,
            url: patch_url,
            signature_url,
        })
    }

    /// Pick the one asset whose download URL ends with `extension`.
    fn single_asset(
        &self,
        url: &str,
        release: &Release,
        extension: &str,
    ) -> Result<String, ResolveError> {
        let mut candidates = release
            .assets
            .iter()
            .map(|asset| &asset.browser_download_url)
            .filter(|dl_url| dl_url.ends_with(extension));

        let first = candidates
            .next()
            .ok_or_else(|| ResolveError::parse(url, format!("no '{}' asset", extension)))?;
        if let Some(other) = candidates.next() {
            return Err(ResolveError::parse(
                url,
                format!("ambiguous '{}' assets: {}, {}", extension, first, other),
            ));
        }

        Ok(first.clone())
    }
}

fn last_path_segment(url: &str) -> Result<String, ResolveError> {
    let parsed = Url::parse(url).map_err(|e| ResolveError::parse(url, e))?;
    let filename = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .ok_or_else(|| ResolveError::parse(url, "no filename in asset URL"))?;
    Ok(filename)
}
