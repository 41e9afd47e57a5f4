//! Upstream kernel release locations.

use crate::config::KernelConfig;
use crate::errors::ResolveError;
use crate::metadata;
use failure::Fallible;
use maplit::btreemap;
use reqwest::Url;
use std::collections::BTreeMap;

/// Checksum list published in every major-version directory.
static CHECKSUMS_FILENAME: &str = "sha256sums.asc";

/// Download metadata for a kernel source release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelMetadata {
    pub version: String,
    pub major_version: String,
    pub base_url: Url,
    pub tarball_filename: String,
    pub tarball_xz_filename: String,
    pub tarball_xz_url: Url,
    pub checksums_url: Url,
    pub signature_filename: String,
    pub signature_url: Url,
}

impl KernelMetadata {
    pub fn to_facts(&self) -> BTreeMap<String, String> {
        btreemap! {
            metadata::LINUX_BASE_URL.to_string() => self.base_url.to_string(),
            metadata::LINUX_MAJOR_VERSION.to_string() => self.major_version.clone(),
            metadata::LINUX_TARBALL_FILENAME.to_string() => self.tarball_filename.clone(),
            metadata::LINUX_TARBALL_XZ_FILENAME.to_string() => self.tarball_xz_filename.clone(),
            metadata::LINUX_TARBALL_XZ_URL.to_string() => self.tarball_xz_url.to_string(),
            metadata::LINUX_CHECKSUMS_URL.to_string() => self.checksums_url.to_string(),
            metadata::LINUX_SIGNATURE_FILENAME.to_string() => self.signature_filename.clone(),
            metadata::LINUX_SIGNATURE_URL.to_string() => self.signature_url.to_string(),
        }
    }
}

/// Derives kernel.org locations from a version string; performs no I/O.
#[derive(Clone, Debug)]
pub struct KernelMetadataBuilder {
    archive_root: Url,
}

impl KernelMetadataBuilder {
    pub fn new(config: &KernelConfig) -> Fallible<Self> {
        let archive_root = Url::parse(&config.archive_root)?;
        Ok(Self { archive_root })
    }

    pub fn build(&self, version: &str) -> Result<KernelMetadata, ResolveError> {
        let major_version = major_version(version)?;
        let invalid = |_| ResolveError::InvalidVersion {
            version: version.to_string(),
        };

        // Base URL ends with '/', so joins append instead of replacing.
        let base_url = self
            .archive_root
            .join(&format!("v{}.x/", major_version))
            .map_err(invalid)?;

        let tarball_filename = format!("linux-{}.tar", version);
        let tarball_xz_filename = format!("{}.xz", tarball_filename);
        let tarball_xz_url = base_url.join(&tarball_xz_filename).map_err(invalid)?;
        let checksums_url = base_url.join(CHECKSUMS_FILENAME).map_err(invalid)?;
        let signature_filename = format!("linux-{}.tar.sign", version);
        let signature_url = base_url.join(&signature_filename).map_err(invalid)?;
        log::debug!("kernel {} tarball: {}", version, tarball_xz_url);

        Ok(KernelMetadata {
            version: version.to_string(),
            major_version: major_version.to_string(),
            base_url,
            tarball_filename,
            tarball_xz_filename,
            tarball_xz_url,
            checksums_url,
            signature_filename,
            signature_url,
        })
    }
}

/// Leading dot-separated component of a kernel version.
fn major_version(version: &str) -> Result<&str, ResolveError> {
    let mut parts = version.splitn(2, '.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(_)) if !major.is_empty() && major.bytes().all(|b| b.is_ascii_digit()) => {
            Ok(major)
        }
        _ => Err(ResolveError::InvalidVersion {
            version: version.to_string(),
        }),
    }
}
