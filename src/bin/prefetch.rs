//! Pre-download infografis images referenced by the cached database.
//!
//! No flags: the asset root comes from `dimsum.toml` / `DIMSUM__PATHS__ASSET_ROOT`,
//! defaulting to the `public` tree beside the crate, so the working directory
//! does not matter.

use dimsum_devserver::config::Config;
use dimsum_devserver::prefetch::{self, HttpFetcher};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    let layout = cfg.asset_layout();

    prefetch::run(&layout, &HttpFetcher::new())?;
    Ok(())
}
