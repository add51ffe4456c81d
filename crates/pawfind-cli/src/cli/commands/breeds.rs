//! Breeds command handler.

use anyhow::{Result, bail};
use pawfind_core::config::Config;

use crate::cli::connect;

pub async fn run(config: &Config, name: Option<&str>, email: Option<&str>) -> Result<()> {
    let mut runtime = connect::runtime(config)?;
    connect::enter_search(&mut runtime, name, email).await?;

    let breeds = &runtime.state.search.breeds;
    if breeds.is_empty() {
        bail!("The breed list is unavailable");
    }
    for breed in breeds {
        println!("{breed}");
    }
    Ok(())
}
