//! Patch tracks and their upstream endpoints.

use crate::config::EndpointsConfig;
use crate::errors::ResolveError;
use crate::grammar::FilenameGrammar;
use std::fmt;
use std::str::FromStr;

/// Patch series to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Track {
    /// Official series on kernel 3.14.x.
    Stable,
    /// Official series on kernel 4.4.x.
    Stable2,
    /// Official series on kernel 4.14.x.
    Stable3,
    /// Unofficial community port published as GitHub releases.
    Minipli,
}

impl Track {
    /// All track names, in selector order.
    pub const NAMES: &'static [&'static str] = &["stable", "stable2", "stable3", "minipli"];

    pub fn as_str(self) -> &'static str {
        match self {
            Track::Stable => "stable",
            Track::Stable2 => "stable2",
            Track::Stable3 => "stable3",
            Track::Minipli => "minipli",
        }
    }
}

impl Default for Track {
    fn default() -> Self {
        Track::Stable2
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Track {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let track = match s {
            "stable" => Track::Stable,
            "stable2" => Track::Stable2,
            "stable3" => Track::Stable3,
            "minipli" => Track::Minipli,
            _ => {
                return Err(ResolveError::InvalidTrack {
                    track: s.to_string(),
                })
            }
        };
        Ok(track)
    }
}

/// Wire protocol of a "latest patch" endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointStyle {
    /// Body is the bare patch filename.
    PlainText,
    /// Body is a JSON list of releases with downloadable assets.
    JsonReleaseList,
}

/// Where and how to look up the latest patch for a track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub style: EndpointStyle,
    pub grammar: FilenameGrammar,
}

/// Static mapping from tracks to endpoints.
#[derive(Clone, Debug, Default)]
pub struct TrackResolver {
    endpoints: EndpointsConfig,
}

impl TrackResolver {
    pub fn new(endpoints: EndpointsConfig) -> Self {
        Self { endpoints }
    }

    pub fn resolve(&self, track: Track) -> Endpoint {
        let (url, style, grammar) = match track {
            Track::Stable => (
                &self.endpoints.stable_url,
                EndpointStyle::PlainText,
                FilenameGrammar::Official,
            ),
            Track::Stable2 => (
                &self.endpoints.stable2_url,
                EndpointStyle::PlainText,
                FilenameGrammar::Official,
            ),
            Track::Stable3 => (
                &self.endpoints.stable3_url,
                EndpointStyle::PlainText,
                FilenameGrammar::Official,
            ),
            Track::Minipli => (
                &self.endpoints.minipli_releases_url,
                EndpointStyle::JsonReleaseList,
                FilenameGrammar::Minipli,
            ),
        };
        log::debug!("track '{}' resolved to {:?} endpoint {}", track, style, url);

        Endpoint {
            url: url.clone(),
            style,
            grammar,
        }
    }

    /// Resolve a track given by name.
    pub fn resolve_name(&self, name: &str) -> Result<Endpoint, ResolveError> {
        let track = name.parse::<Track>()?;
        Ok(self.resolve(track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_round_trip() {
        for name in Track::NAMES {
            let track: Track = name.parse().unwrap();
            assert_eq!(track.to_string(), *name);
        }
        assert_eq!(Track::default(), Track::Stable2);
    }

    #[test]
    fn every_track_has_a_distinct_endpoint() {
        let resolver = TrackResolver::default();
        let urls: HashSet<_> = Track::NAMES
            .iter()
            .map(|name| resolver.resolve_name(name).unwrap().url)
            .collect();
        assert_eq!(urls.len(), Track::NAMES.len());
    }

    #[test]
    fn resolution_is_stable() {
        let resolver = TrackResolver::default();
        for name in Track::NAMES {
            assert_eq!(
                resolver.resolve_name(name).unwrap(),
                resolver.resolve_name(name).unwrap()
            );
        }
    }

    #[test]
    fn official_tracks_use_plain_text() {
        let resolver = TrackResolver::default();
        let ep = resolver.resolve(Track::Stable3);
        assert_eq!(ep.url, "https://grsecurity.net/latest_stable3_patch");
        assert_eq!(ep.style, EndpointStyle::PlainText);
        assert_eq!(ep.grammar, FilenameGrammar::Official);
    }

    #[test]
    fn minipli_uses_release_list() {
        let ep = TrackResolver::default().resolve(Track::Minipli);
        assert_eq!(ep.style, EndpointStyle::JsonReleaseList);
        assert_eq!(ep.grammar, FilenameGrammar::Minipli);
        assert!(ep.url.starts_with("https://api.github.com/"));
    }

    #[test]
    fn unknown_track_is_rejected() {
        let resolver = TrackResolver::default();
        for bad in &["", "stable4", "Stable", " stable"] {
            assert_eq!(
                resolver.resolve_name(bad),
                Err(ResolveError::InvalidTrack {
                    track: bad.to_string()
                })
            );
        }
    }
}
