#[macro_use]
extern crate log;

use failure::Fallible;
use grsec_urls::{Config, Resolver, Scraper, Track};
use std::path::PathBuf;
use structopt::StructOpt;

fn main() -> Fallible<()> {
    env_logger::Builder::from_default_env().try_init()?;

    let opts = CliOptions::from_args();
    trace!("starting with options: {:#?}", opts);

    let config = match opts.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::default(),
    };
    trace!("configuration: {:#?}", config);

    let resolver = Resolver::new(Scraper::new()?, config)?;
    let facts = resolver.resolve(opts.track)?;
    info!("resolved track '{}'", opts.track);

    let json = if opts.compact {
        serde_json::to_string(&facts)?
    } else {
        serde_json::to_string_pretty(&facts)?
    };
    println!("{}", json);

    Ok(())
}

#[derive(Debug, StructOpt)]
pub(crate) struct CliOptions {
    /// Patch track to resolve.
    #[structopt(
        short = "t",
        long = "track",
        default_value = "stable2",
        raw(possible_values = "Track::NAMES")
    )]
    track: Track,

    /// Path to TOML configuration overriding upstream locations.
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,

    /// Print single-line JSON.
    #[structopt(long = "compact")]
    compact: bool,
}
