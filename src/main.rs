use anyhow::Context;
use clap::{Parser, ValueEnum};
use eventlens_core::config::Config;
use eventlens_core::detail::{applog_detail, tracker_detail, DetailField, DetailValue, TreeNode};
use eventlens_core::engine::{load_sorted, FilterSpec, Session, SortDir, SortKey, SortSpec};
use eventlens_core::export;
use eventlens_core::{normalize_applog, normalize_tracker, Category, NormalizedEvent};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    Applog,
    Tracker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Index,
    Time,
    Calibrated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "eventlens", about = "eventlens — analytics log normalization and triage")]
struct Cli {
    /// JSON export file to load.
    file: PathBuf,

    /// Which vendor produced the file.
    #[arg(long, value_enum, default_value_t = Source::Applog)]
    source: Source,

    /// Keep only events with this exact identifier.
    #[arg(long)]
    event: Option<String>,

    /// Keep only events in this category.
    #[arg(long)]
    category: Option<Category>,

    /// Keep only events at this level, e.g. ERROR. Levels are stored
    /// uppercased, so the value is uppercased before matching.
    #[arg(long)]
    level: Option<String>,

    /// Case-insensitive substring search over the salient fields.
    #[arg(long)]
    search: Option<String>,

    /// Search the whole serialized record instead of the salient fields.
    #[arg(long, requires = "search")]
    raw: bool,

    /// Sort key.
    #[arg(long, value_enum, default_value_t = SortArg::Time)]
    sort: SortArg,

    /// Sort descending (newest first).
    #[arg(long)]
    desc: bool,

    /// Page to display.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page (defaults from config).
    #[arg(long)]
    page_size: Option<usize>,

    /// Print the detail fields of the event with this index and exit.
    #[arg(long)]
    detail: Option<usize>,

    /// Instead of the table, write the full filtered view in this format.
    #[arg(long, value_enum)]
    export: Option<ExportFormat>,

    /// Write debug logs to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.debug { "debug" } else { "warn" })
            }),
        )
        .init();

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config load failed, using defaults");
        Config::defaults()
    });

    if let Ok(meta) = std::fs::metadata(&cli.file) {
        tracing::debug!(
            path = %cli.file.display(),
            size = %eventlens_core::time::format_size(meta.len()),
            "importing export file"
        );
    }

    let events = match cli.source {
        Source::Applog => {
            let records = eventlens_sources::load_records(&cli.file)
                .with_context(|| format!("loading {}", cli.file.display()))?;
            normalize_applog(&records)
        }
        Source::Tracker => {
            let rows = eventlens_sources::load_rows(&cli.file)
                .with_context(|| format!("loading {}", cli.file.display()))?;
            normalize_tracker(&rows)
        }
    };
    tracing::debug!(count = events.len(), "normalized dataset");

    let mut session = Session::new();
    load_sorted(&mut session, events);

    let desc = cli.desc || (cli.sort == SortArg::Time && config.table.sort_order == "desc");
    session.set_sort(SortSpec {
        key: match cli.sort {
            SortArg::Index => SortKey::Index,
            SortArg::Time => SortKey::Timestamp,
            SortArg::Calibrated => SortKey::Calibrated,
        },
        dir: if desc { SortDir::Desc } else { SortDir::Asc },
    });

    session.set_filter(FilterSpec {
        event: cli.event.clone(),
        category: cli.category,
        level: cli.level.as_deref().map(str::to_uppercase),
        search: cli.search.clone(),
        raw_search: cli.raw,
    });

    if let Some(index) = cli.detail {
        return print_detail(&session, index, cli.source);
    }

    if let Some(format) = cli.export {
        let filtered = session.filtered();
        let rows = export::project(filtered.iter().copied());
        let out = match format {
            ExportFormat::Json => export::to_json(&rows, config.export.pretty)?,
            ExportFormat::Csv => export::to_csv(&rows),
        };
        println!("{out}");
        return Ok(());
    }

    session.pager.set_page_size(cli.page_size.unwrap_or(config.table.page_size));
    session.go_to_page(cli.page);
    print_table(&session);
    Ok(())
}

fn print_table(session: &Session) {
    let (page, total) = session.page();
    println!(
        "{:>5}  {:<23}  {:<3} {:<34}  {:<10}  {:<7}  {}",
        "#", "time", "", "event", "category", "level", "desc"
    );
    for event in &page {
        println!(
            "{:>5}  {:<23}  {:<2} {:<34}  {:<10}  {:<7}  {}",
            event.index,
            event.time,
            event.icon,
            truncate(&event.event, 34),
            event.category.label(),
            event.level.as_deref().unwrap_or("-"),
            event.desc,
        );
    }
    let pager = &session.pager;
    println!(
        "\n{} of {} event(s), page {}/{}",
        page.len(),
        total,
        pager.current_page(),
        pager.total_pages(total),
    );
}

fn print_detail(session: &Session, index: usize, source: Source) -> anyhow::Result<()> {
    let event: &NormalizedEvent = session
        .events()
        .iter()
        .find(|e| e.index == index)
        .with_context(|| format!("no event with index {index}"))?;

    println!("{} {} — {}", event.icon, event.event, event.desc);
    if !event.time.is_empty() {
        println!("   {}", event.time);
    }
    let fields = match source {
        Source::Applog => applog_detail(event),
        Source::Tracker => tracker_detail(event),
    };
    for field in &fields {
        print_field(field);
    }
    Ok(())
}

fn print_field(field: &DetailField) {
    match &field.value {
        DetailValue::Text(text) => println!("{} {}: {}", field.icon, field.label, text),
        DetailValue::Tree(nodes) => {
            println!("{} {}:", field.icon, field.label);
            for node in nodes {
                print_node(node, 1);
            }
        }
    }
}

fn print_node(node: &TreeNode, depth: usize) {
    let pad = "  ".repeat(depth);
    match &node.value {
        Some(value) => println!("{pad}{}: {value}", node.label),
        None => {
            println!("{pad}{}:", node.label);
            for child in &node.children {
                print_node(child, depth + 1);
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
