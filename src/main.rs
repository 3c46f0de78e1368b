//! cbwgen CLI - packages gallery image URLs into a `.cbw` archive.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cbwgen::console::Console;
use cbwgen::manifest::Manifest;
use cbwgen::scrapers::{AdapterRegistry, resolve_image_urls};
use cbwgen::archive;
use clap::Parser;

/// Packages a web gallery's image URLs into a `.cbw` archive.
#[derive(Parser, Debug)]
#[command(name = "cbwgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the gallery landing page.
    gallery_url: String,

    /// Path of the `.cbw` archive to write.
    output_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Arity mismatches print a usage line and exit 1 before any network
    // activity; --help and --version keep their usual behavior.
    let args = Args::try_parse().unwrap_or_else(|err| {
        if err.use_stderr() {
            println!("Usage: cbwgen <gallery_url> <output.cbw>");
            std::process::exit(1);
        }
        err.exit()
    });

    let console = Console::new();

    console.section("cbwgen - Web Comic Archive Generator");

    let gallery_url = args.gallery_url.trim_end_matches('/').to_string();

    // Find appropriate adapter
    console.step("Finding adapter for URL...");
    let registry = AdapterRegistry::new();
    let adapter = registry
        .find_for_url(&gallery_url)
        .ok_or_else(|| anyhow::anyhow!("No adapter found for URL: {}", gallery_url))?;

    console.success(&format!("Using {} adapter", adapter.name()));

    // Fetch gallery metadata; failure here aborts the run.
    console.step("Fetching gallery information...");
    let info = adapter
        .fetch_info(&gallery_url)
        .await
        .context("Failed to fetch gallery info")?;

    console.success(&format!("Title: {}", info.title));
    console.info(&format!("Pages: {}", info.page_count));

    // Enumerate per-page URLs; failure here aborts the run.
    console.step("Enumerating page URLs...");
    let page_urls = adapter
        .enumerate_page_urls(&gallery_url, info.page_count)
        .await
        .context("Failed to enumerate page URLs")?;

    console.success(&format!("Found {} page URLs", page_urls.len()));

    // Resolve full image URLs. Per-page failures terminate the loop but not
    // the run; whatever was accumulated still gets archived.
    let resolution = resolve_image_urls(adapter, &page_urls, &console).await;

    if resolution.stopped_early {
        console.warning(&format!(
            "Stopped early: resolved {} of {} pages",
            resolution.urls.len(),
            page_urls.len()
        ));
    }

    console.step(&format!(
        "Writing {} image URLs to {}",
        resolution.urls.len(),
        args.output_path.display()
    ));

    let manifest = Manifest::new(info.title, adapter.source(), resolution.urls);
    archive::write(&manifest, &args.output_path).context("Failed to write archive")?;

    console.success("Done.");
    Ok(())
}
