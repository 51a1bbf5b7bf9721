mod render;

use std::cell::{Cell, RefCell};
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use libskyfeed::logging::{LogFormat, LoggingConfig};
use libskyfeed::{Callbacks, Config, DisplayZone, FeedPage, PostsTable, SkyfeedError};
use serde::Serialize;

use render::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "sky-feed")]
#[command(version, about = "Render Bluesky feed pages as a table")]
#[command(long_about = r#"Render Bluesky feed pages (getTimeline / getAuthorFeed output) as a table.

Each PAGE is a JSON file holding either {"feed": [...], "cursor": "..."} or a
bare array of feed items. With no PAGE, one page is read from stdin. The first
page is shown; further pages are pulled in through load-more, up to --pages.

EXAMPLES:
    # Show a saved timeline page
    sky-feed timeline.json

    # Walk three saved pages
    sky-feed --pages 3 page1.json page2.json page3.json

    # Pipe straight from an API call
    curl -s "$APPVIEW/xrpc/app.bsky.feed.getAuthorFeed?actor=alice.bsky.social" | sky-feed

    # Report the second row
    sky-feed timeline.json --report 1

    # Machine-readable output
    sky-feed timeline.json --format json | jq '.[] | .navigation_id'
    sky-feed timeline.json --format csv > rows.csv

EXIT CODES:
    0 - Success
    1 - Error (unreadable page, malformed JSON, bad config)
    3 - Invalid input (report row out of range)
"#)]
struct Cli {
    /// Feed page files, in pagination order
    #[arg(value_name = "PAGE")]
    pages: Vec<PathBuf>,

    /// Maximum number of pages to load
    #[arg(long = "pages", default_value = "1", value_name = "N")]
    max_pages: usize,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json", "jsonl", "csv"])]
    format: Option<String>,

    /// Report the row at this index (repeatable)
    #[arg(long = "report", value_name = "ROW")]
    reports: Vec<usize>,

    /// Show timestamps in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format: text, json, pretty
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,
}

#[derive(Serialize)]
struct ReportRequest<'a> {
    action: &'static str,
    uri: &'a str,
}

fn main() {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    logging.verbose = cli.verbose;
    logging.init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<SkyfeedError>()
            .map(SkyfeedError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    tracing::debug!("sky-feed started with args: {:?}", cli);

    let config = Config::load().context("Failed to load configuration")?;

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(config.output.format.as_str())
        .parse()
        .map_err(SkyfeedError::InvalidInput)?;

    let mut style = config.display.timestamp_style();
    if cli.utc {
        style.zone = DisplayZone::Utc;
    }

    let wanted = Cell::new(0usize);
    let reported = RefCell::new(Vec::new());
    let table = PostsTable::new(Callbacks::new(
        |uri: &str| reported.borrow_mut().push(uri.to_string()),
        || wanted.set(wanted.get() + 1),
    ));

    let mut sources = cli.pages.iter();
    let first = match sources.next() {
        Some(path) => read_page(Some(path))?,
        None => read_page(None)?,
    };
    let mut cursor = first.cursor;
    let mut items = first.items;
    let mut loaded = 1;

    while loaded < cli.max_pages && sources.len() > 0 {
        table.load_more();
        if wanted.replace(0) == 0 {
            break;
        }
        if let Some(path) = sources.next() {
            let page = read_page(Some(path))?;
            cursor = page.cursor;
            items.extend(page.items);
            loaded += 1;
        }
    }
    tracing::debug!("Loaded {} page(s), {} items", loaded, items.len());

    for &row in &cli.reports {
        table.report(&items, row).map_err(SkyfeedError::from)?;
    }

    let rows = table.render(&items);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Jsonl => {
            for row in &rows {
                println!("{}", serde_json::to_string(row)?);
            }
        }
        OutputFormat::Csv => {
            println!("{}", render::CSV_HEADER);
            for (index, row) in rows.iter().enumerate() {
                println!("{}", render::csv_row(index, row));
            }
        }
        OutputFormat::Text => {
            for (index, row) in rows.iter().enumerate() {
                println!(
                    "{}",
                    render::text_row(index, row, &style, config.display.preview_chars)
                );
                println!();
            }
            if let Some(ref cursor) = cursor {
                println!("Next cursor: {}", cursor);
            }
        }
    }

    for uri in reported.borrow().iter() {
        match format {
            OutputFormat::Text => println!("report: {}", uri),
            _ => println!(
                "{}",
                serde_json::to_string(&ReportRequest {
                    action: "report",
                    uri: uri.as_str(),
                })?
            ),
        }
    }

    Ok(())
}

fn read_page(path: Option<&PathBuf>) -> Result<FeedPage> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read page from stdin")?;
            buffer
        }
    };

    let page = FeedPage::from_json(&input).map_err(SkyfeedError::from)?;
    if page.skipped > 0 {
        tracing::warn!("Skipped {} undecodable item(s)", page.skipped);
    }
    Ok(page)
}
