//! Typed configuration, optionally loaded from a TOML file.

use crate::metadata;
use failure::{bail, format_err, Fallible};
use reqwest::Url;
use serde_derive::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub endpoints: EndpointsConfig,
    pub patch: PatchConfig,
    pub kernel: KernelConfig,
}

/// Upstream "latest patch" endpoints, one per track.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointsConfig {
    pub stable_url: String,
    pub stable2_url: String,
    pub stable3_url: String,
    pub minipli_releases_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            stable_url: metadata::LATEST_STABLE_PATCH.to_string(),
            stable2_url: metadata::LATEST_STABLE2_PATCH.to_string(),
            stable3_url: metadata::LATEST_STABLE3_PATCH.to_string(),
            minipli_releases_url: metadata::MINIPLI_RELEASES.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    /// Prepended verbatim to plain-text filenames.
    pub download_prefix: String,
    /// Suffix of the patch asset in a release list.
    pub patch_extension: String,
    /// Suffix of the detached signature asset in a release list.
    pub signature_extension: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            download_prefix: metadata::DOWNLOAD_REDIRECT_PREFIX.to_string(),
            patch_extension: metadata::PATCH_EXTENSION.to_string(),
            signature_extension: metadata::SIGNATURE_EXTENSION.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KernelConfig {
    /// Root of the kernel source archive, with trailing slash.
    pub archive_root: String,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            archive_root: metadata::LINUX_KERNEL_ARCHIVE.to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn parse(input: &str) -> Fallible<Self> {
        let cfg: Config = toml::from_str(input)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Fallible<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format_err!("failed to read '{}': {}", path.display(), e))?;
        let cfg = Self::parse(&content)
            .map_err(|e| format_err!("invalid config '{}': {}", path.display(), e))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Fallible<()> {
        let urls = [
            ("endpoints.stable_url", &self.endpoints.stable_url),
            ("endpoints.stable2_url", &self.endpoints.stable2_url),
            ("endpoints.stable3_url", &self.endpoints.stable3_url),
            (
                "endpoints.minipli_releases_url",
                &self.endpoints.minipli_releases_url,
            ),
            ("kernel.archive_root", &self.kernel.archive_root),
        ];
        for (name, url) in urls.iter() {
            if let Err(e) = Url::parse(url) {
                bail!("{} is not a valid URL ('{}'): {}", name, url, e);
            }
        }

        if !self.kernel.archive_root.ends_with('/') {
            bail!(
                "kernel.archive_root must end with '/' ('{}')",
                self.kernel.archive_root
            );
        }
        if self.patch.patch_extension.is_empty() || self.patch.signature_extension.is_empty() {
            bail!("patch extensions must not be empty");
        }
        if self.patch.patch_extension == self.patch.signature_extension {
            bail!("patch and signature extensions must differ");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.kernel.archive_root, "https://www.kernel.org/pub/linux/kernel/");
    }

    #[test]
    fn partial_override() {
        let input = r#"
            [endpoints]
            stable_url = "http://mirror.example/latest_stable_patch"

            [kernel]
            archive_root = "http://mirror.example/kernel/"
        "#;
        let cfg = Config::parse(input).unwrap();
        assert_eq!(
            cfg.endpoints.stable_url,
            "http://mirror.example/latest_stable_patch"
        );
        assert_eq!(cfg.endpoints.stable2_url, metadata::LATEST_STABLE2_PATCH);
        assert_eq!(cfg.kernel.archive_root, "http://mirror.example/kernel/");
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::parse("[kernel]\nmirror = \"x\"\n").is_err());
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(Config::parse("[endpoints]\nstable_url = \"not a url\"\n").is_err());
        assert!(Config::parse("[kernel]\narchive_root = \"https://example.com/kernel\"\n").is_err());
    }

    #[test]
    fn rejects_identical_extensions() {
        let input = "[patch]\npatch_extension = \".sig\"\n";
        assert!(Config::parse(input).is_err());
    }
}
