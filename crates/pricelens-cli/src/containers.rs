//! Containers command: list a page's block containers.

use std::path::Path;

use pricelens_selector::dom::summarize;
use pricelens_selector::Page;

pub(crate) fn run_containers(page_path: &Path) -> anyhow::Result<()> {
    let markup = std::fs::read_to_string(page_path)?;
    let page = Page::parse(&markup);

    let containers = page.block_containers();
    if containers.is_empty() {
        println!("no block containers found");
        return Ok(());
    }
    for element in containers {
        println!("{}", summarize(element));
    }
    Ok(())
}
