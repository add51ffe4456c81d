//! One-shot search command handler.

use anyhow::{Result, bail, ensure};
use pawfind_core::AppEvent;
use pawfind_core::config::Config;
use pawfind_core::search::PAGE_SIZES;
use pawfind_types::Sort;

use crate::cli::connect;
use crate::render;

pub struct SearchOptions<'a> {
    pub config: &'a Config,
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub breed: Option<&'a str>,
    pub page: u32,
    pub size: Option<u32>,
    pub sort: Option<Sort>,
}

pub async fn run(opts: SearchOptions<'_>) -> Result<()> {
    let mut runtime = connect::runtime(opts.config)?;

    // Size and sort need no catalog data, so they apply to the first search.
    let params = &mut runtime.state.search.params;
    if let Some(size) = opts.size {
        ensure!(
            PAGE_SIZES.contains(&size),
            "--size must be one of {PAGE_SIZES:?}"
        );
        params.page_size = size;
    }
    if let Some(sort) = opts.sort {
        params.sort = sort;
    }

    connect::enter_search(&mut runtime, opts.name, opts.email).await?;

    if opts.breed.is_some() {
        runtime.dispatch(AppEvent::SelectBreed(opts.breed.map(str::to_string)));
        runtime.settle().await;
    }
    if opts.page > 1 {
        runtime.dispatch(AppEvent::SetPage(opts.page));
        runtime.settle().await;
    }
    render::print_notices(&mut runtime.state.notices);

    let search = &runtime.state.search;
    if !search.searched {
        bail!("Search did not complete");
    }
    if let Some(breed) = opts.breed
        && search.params.breed.is_none()
    {
        bail!("Unknown breed '{breed}'");
    }
    println!("{}", render::results(search));
    Ok(())
}
