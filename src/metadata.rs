//! Upstream endpoints, fact keys and release-list payloads.

use serde_derive::Deserialize;

/// Plain-text endpoint for the "stable" series (kernel 3.14.x).
pub static LATEST_STABLE_PATCH: &str = "https://grsecurity.net/latest_stable_patch";

/// Plain-text endpoint for the "stable2" series (kernel 4.4.x).
pub static LATEST_STABLE2_PATCH: &str = "https://grsecurity.net/latest_stable2_patch";

/// Plain-text endpoint for the "stable3" series (kernel 4.14.x).
pub static LATEST_STABLE3_PATCH: &str = "https://grsecurity.net/latest_stable3_patch";

/// Release index of the unofficial community patches.
pub static MINIPLI_RELEASES: &str =
    "https://api.github.com/repos/minipli/linux-unofficial_grsec/releases";

/// Prefix for official patch downloads; the filename is a query value.
pub static DOWNLOAD_REDIRECT_PREFIX: &str =
    "https://grsecurity.net/download-restrict/download-redirect.php?file=";

pub static LINUX_KERNEL_ARCHIVE: &str = "https://www.kernel.org/pub/linux/kernel/";

pub static PATCH_EXTENSION: &str = ".diff";
pub static SIGNATURE_EXTENSION: &str = ".sig";

pub static PATCH_FILENAME: &str = "grsecurity_patch_filename";
pub static PATCH_URL: &str = "grsecurity_patch_url";
pub static SIGNATURE_FILENAME: &str = "grsecurity_signature_filename";
pub static SIGNATURE_URL: &str = "grsecurity_signature_url";
pub static PATCH_VERSION: &str = "grsecurity_version";
pub static KERNEL_VERSION: &str = "linux_kernel_version";
pub static PATCH_TIMESTAMP: &str = "grsecurity_patch_timestamp";

pub static LINUX_BASE_URL: &str = "linux_base_url";
pub static LINUX_MAJOR_VERSION: &str = "linux_major_version";
pub static LINUX_TARBALL_FILENAME: &str = "linux_tarball_filename";
pub static LINUX_TARBALL_XZ_FILENAME: &str = "linux_tarball_xz_filename";
pub static LINUX_TARBALL_XZ_URL: &str = "linux_tarball_xz_url";
pub static LINUX_CHECKSUMS_URL: &str = "linux_checksums_url";
pub static LINUX_SIGNATURE_FILENAME: &str = "linux_tarball_signature_filename";
pub static LINUX_SIGNATURE_URL: &str = "linux_tarball_signature_url";

/// GitHub release entry; the list is sorted newest first.
#[derive(Debug, Deserialize)]
pub struct Release {
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseAsset {
    pub browser_download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_list_ignores_extra_fields() {
        let json = r#"[{
            "tag_name": "v4.9.80-unofficial_grsec",
            "assets": [
                {"name": "a.diff", "browser_download_url": "https://example.com/a.diff"}
            ]
        }]"#;
        let releases: Vec<Release> = serde_json::from_str(json).unwrap();
        assert_eq!(releases.len(), 1);
        assert_eq!(
            releases[0].assets[0].browser_download_url,
            "https://example.com/a.diff"
        );
    }

    #[test]
    fn release_without_assets_is_rejected() {
        let json = r#"[{"tag_name": "v4.9.80"}]"#;
        assert!(serde_json::from_str::<Vec<Release>>(json).is_err());
    }
}
