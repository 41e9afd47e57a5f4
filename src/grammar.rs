//! Filename grammars for patch releases.

use crate::errors::ResolveError;
use crate::metadata;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static::lazy_static! {
    static ref OFFICIAL_FILENAME: Regex = Regex::new(
        r"(?x)^
        grsecurity-
        (?P<grsecurity_version>\d+\.\d+)-
        (?P<linux_kernel_version>\d+\.\d+\.\d+)-
        (?P<grsecurity_patch_timestamp>\d{12})\.patch
        $"
    ).unwrap();

    static ref MINIPLI_FILENAME: Regex = Regex::new(
        r"(?x)^
        v(?P<linux_kernel_version>\d+\.\d+\.\d+)
        -unofficial_grsec-
        (?P<grsecurity_patch_timestamp>\d{12})\.diff
        $"
    ).unwrap();
}

/// Filename layout of a patch series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilenameGrammar {
    /// `grsecurity-<patch>-<kernel>-<timestamp>.patch`
    Official,
    /// `v<kernel>-unofficial_grsec-<timestamp>.diff`
    Minipli,
}

/// Fields encoded in a patch filename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchFields {
    /// Patch series version, absent from community filenames.
    pub patch_version: Option<String>,
    pub kernel_version: String,
    pub timestamp: String,
}

impl PatchFields {
    pub fn to_facts(&self) -> BTreeMap<String, String> {
        let mut facts = BTreeMap::new();
        if let Some(ref version) = self.patch_version {
            facts.insert(metadata::PATCH_VERSION.to_string(), version.clone());
        }
        facts.insert(
            metadata::KERNEL_VERSION.to_string(),
            self.kernel_version.clone(),
        );
        facts.insert(metadata::PATCH_TIMESTAMP.to_string(), self.timestamp.clone());
        facts
    }
}

impl FilenameGrammar {
    fn regex(self) -> &'static Regex {
        match self {
            FilenameGrammar::Official => &*OFFICIAL_FILENAME,
            FilenameGrammar::Minipli => &*MINIPLI_FILENAME,
        }
    }

    /// Match the whole filename and extract its fields.
    pub fn parse(self, filename: &str) -> Result<PatchFields, ResolveError> {
        let caps = self.regex().captures(filename).ok_or_else(|| {
            ResolveError::parse(filename, format!("does not match {:?} filename grammar", self))
        })?;

        let group = |name: &str| -> Result<String, ResolveError> {
            match caps.name(name) {
                Some(m) if !m.as_str().is_empty() => Ok(m.as_str().to_string()),
                _ => Err(ResolveError::parse(
                    filename,
                    format!("missing field '{}'", name),
                )),
            }
        };

        let patch_version = match self {
            FilenameGrammar::Official => Some(group(metadata::PATCH_VERSION)?),
            FilenameGrammar::Minipli => None,
        };
        let fields = PatchFields {
            patch_version,
            kernel_version: group(metadata::KERNEL_VERSION)?,
            timestamp: group(metadata::PATCH_TIMESTAMP)?,
        };
        Ok(fields)
    }
}
