//! Top-level resolution of a track into a flat metadata record.

use crate::config::Config;
use crate::errors::ResolveError;
use crate::kernel::KernelMetadataBuilder;
use crate::patch::PatchMetadataBuilder;
use crate::scraper::Fetch;
use crate::track::{Track, TrackResolver};
use failure::Fallible;
use std::collections::BTreeMap;

/// Merged patch and kernel metadata, keyed by fact name.
pub type Facts = BTreeMap<String, String>;

/// Resolves tracks end-to-end.
#[derive(Debug)]
pub struct Resolver<F> {
    tracks: TrackResolver,
    patch: PatchMetadataBuilder<F>,
    kernel: KernelMetadataBuilder,
}

impl<F: Fetch> Resolver<F> {
    pub fn new(fetcher: F, config: Config) -> Fallible<Self> {
        config.validate()?;
        let resolver = Self {
            kernel: KernelMetadataBuilder::new(&config.kernel)?,
            tracks: TrackResolver::new(config.endpoints),
            patch: PatchMetadataBuilder::new(fetcher, config.patch),
        };
        Ok(resolver)
    }

    pub fn resolve(&self, track: Track) -> Result<Facts, ResolveError> {
        let endpoint = self.tracks.resolve(track);
        let patch = self.patch.build(&endpoint)?;
        let kernel = self.kernel.build(&patch.fields.kernel_version)?;

        let mut facts = patch.to_facts();
        for (key, value) in kernel.to_facts() {
            if facts.contains_key(&key) {
                return Err(ResolveError::KeyCollision { key });
            }
            facts.insert(key, value);
        }

        if facts.is_empty() {
            return Err(ResolveError::Resolution { url: endpoint.url });
        }
        log::debug!("resolved {} facts for track '{}'", facts.len(), track);

        Ok(facts)
    }

    /// Resolve a track given by name.
    pub fn resolve_name(&self, name: &str) -> Result<Facts, ResolveError> {
        let track = name.parse::<Track>()?;
        self.resolve(track)
    }
}
