//! Resolve download metadata for grsecurity kernel patches and the
//! matching upstream kernel release.
//!
//! A [`Track`](track/enum.Track.html) selects the upstream "latest patch"
//! endpoint; the patch filename found there encodes the kernel version from
//! which kernel.org locations are derived. The result is a flat map of facts
//! consumed by provisioning automation.

pub mod config;
pub mod errors;
pub mod facts;
pub mod grammar;
pub mod kernel;
pub mod metadata;
pub mod patch;
pub mod scraper;
pub mod track;

pub use crate::config::Config;
pub use crate::errors::ResolveError;
pub use crate::facts::{Facts, Resolver};
pub use crate::scraper::{Fetch, Scraper};
pub use crate::track::Track;
