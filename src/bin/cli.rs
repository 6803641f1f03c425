//! Storefront Dashboard CLI
//!
//! Terminal client for the admin dashboard endpoints:
//! - Print a one-off snapshot of every section
//! - Watch the dashboard, polling at the configured interval
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storefront_dashboard::client::HttpSource;
use storefront_dashboard::config::generate_default_config;
use storefront_dashboard::format;
use storefront_dashboard::{
    ApplyOutcome, CanvasId, ChartKind, ChartSpec, ChartSurface, DashboardConfig,
    DashboardController, DashboardView, LoggingConfig, ManualTimers, NotifierPhase, PollTrigger,
    TableBody, TimerOutcome,
};

#[derive(Parser)]
#[command(name = "storefront-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the storefront admin dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Origin serving /dashboard/ajax/* (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Config file (default: user config dir, /etc, ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one poll cycle and print every section
    Snapshot,

    /// Keep polling and print a summary after every cycle
    Watch {
        /// Poll interval in milliseconds (overrides config)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: Option<u64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Terminal stand-in for the two canvases. Charts are printed from the
/// view, so an instance only remembers which canvas it occupies.
struct TerminalSurface;

impl ChartSurface for TerminalSurface {
    type Instance = CanvasId;

    fn has_canvas(&self, _canvas: CanvasId) -> bool {
        true
    }

    fn create(&mut self, canvas: CanvasId, spec: &ChartSpec) -> Option<CanvasId> {
        tracing::debug!(canvas = canvas.dom_id(), points = spec.labels.len(), "Chart drawn");
        Some(canvas)
    }

    fn destroy(&mut self, canvas: CanvasId) {
        tracing::debug!(canvas = canvas.dom_id(), "Chart destroyed");
    }
}

type Controller = DashboardController<CanvasId, u64>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = generate_default_config();

        match output {
            Some(path) => {
                // Create parent directory if needed
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => {
                print!("{}", config);
            }
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load_with_env(path)?,
        None => DashboardConfig::load_default(),
    };
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }
    if let Commands::Watch {
        interval_ms: Some(ms),
    } = &cli.command
    {
        config.polling.interval_ms = *ms;
    }

    init_logging(&config.logging);

    if config.api.base_url.is_empty() {
        anyhow::bail!(
            "No base URL configured. Pass --base-url or set STOREFRONT_DASHBOARD_BASE_URL"
        );
    }

    let source = HttpSource::new(config.api.clone())?;
    let json = cli.format == "json";

    match cli.command {
        Commands::Snapshot => snapshot(config, &source, json).await?,
        Commands::Watch { .. } => watch(config, &source, json).await?,
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("storefront_dashboard={}", config.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Run one poll cycle, applying sections as they arrive. Returns the
/// number of sections that failed.
async fn run_cycle(
    controller: &mut Controller,
    source: &HttpSource,
    trigger: PollTrigger,
    timers: &mut ManualTimers,
) -> usize {
    let cycle = controller.begin_cycle(trigger, chrono::Local::now().time());
    let mut surface = TerminalSurface;
    let mut failed = 0;

    let mut results = storefront_dashboard::poll_sections(source);
    while let Some((section, result)) = results.next().await {
        if let ApplyOutcome::Failed(_) =
            controller.apply(cycle, section, result, &mut surface, timers)
        {
            failed += 1;
        }
    }
    controller.finish_cycle(cycle);
    failed
}

async fn snapshot(config: DashboardConfig, source: &HttpSource, json: bool) -> anyhow::Result<()> {
    let mut timers = ManualTimers::new();
    let mut controller = Controller::new(config);

    let failed = run_cycle(&mut controller, source, PollTrigger::Manual, &mut timers).await;

    if json {
        println!("{}", serde_json::to_string_pretty(controller.view())?);
    } else {
        print_view(controller.view());
        if let Some(toast) = controller.notifier().toast() {
            println!();
            println!("! {}", toast.headline());
            for item in &toast.items {
                println!("  {:<30} {} left", item.name, item.stock);
            }
            if let Some(more) = toast.overflow_label() {
                println!("  {}", more);
            }
        }
    }

    if failed > 0 {
        eprintln!("{} of 6 sections failed to load", failed);
    }
    controller.teardown(&mut TerminalSurface, &mut timers);
    Ok(())
}

async fn watch(config: DashboardConfig, source: &HttpSource, json: bool) -> anyhow::Result<()> {
    let mut timers = ManualTimers::new();
    let mut controller = Controller::new(config);
    let started = tokio::time::Instant::now();

    controller.start(&mut timers);
    run_cycle(&mut controller, source, PollTrigger::Initial, &mut timers).await;
    print_summary(controller.view(), json)?;

    while let Some(deadline) = timers.next_deadline() {
        tokio::select! {
            _ = tokio::time::sleep_until(started + deadline) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }

        while let Some(kind) = timers.pop_due(deadline) {
            match controller.on_timer(kind, &mut timers) {
                TimerOutcome::PollDue => {
                    run_cycle(&mut controller, source, PollTrigger::Timer, &mut timers).await;
                    timers.advance_to(started.elapsed());
                    print_summary(controller.view(), json)?;
                }
                TimerOutcome::NotificationChanged => {
                    let notifier = controller.notifier();
                    match (notifier.phase(), notifier.toast()) {
                        (NotifierPhase::Visible, Some(toast)) => {
                            let names: Vec<_> = toast.items.iter().map(|i| i.name.as_str()).collect();
                            tracing::warn!(items = ?names, "{}", toast.headline());
                        }
                        (NotifierPhase::Absent, _) => {
                            tracing::info!("Low stock notification dismissed");
                        }
                        _ => {}
                    }
                }
                TimerOutcome::FlashExpired(_) | TimerOutcome::Ignored => {}
            }
        }
    }

    controller.teardown(&mut TerminalSurface, &mut timers);
    Ok(())
}

fn print_summary(view: &DashboardView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(view)?);
        return Ok(());
    }

    let stamp = view.last_updated.as_deref().unwrap_or("Loaded");
    match &view.cards {
        Some(cards) => println!(
            "{} | Sales {} | Orders {} | Pending {} | Low stock {}",
            stamp, cards.total_sales, cards.total_orders, cards.pending_orders, cards.low_stock_items
        ),
        None => println!("{} | metrics unavailable", stamp),
    }
    Ok(())
}

fn print_view(view: &DashboardView) {
    if let Some(stamp) = &view.last_updated {
        println!("{}", stamp);
        println!();
    }

    if let Some(cards) = &view.cards {
        for (title, value) in cards.entries() {
            println!("{:<16} {}", title, value);
        }
        println!();
    }

    if let Some(spec) = &view.sales_chart {
        println!("Sales Overview");
        print_chart(spec);
        println!();
    }

    if let Some(spec) = &view.category_chart {
        println!("Sales by Category");
        print_chart(spec);
        println!();
    }

    if let Some(body) = &view.recent_orders {
        println!("Recent Orders");
        println!("{}", "-".repeat(72));
        match body {
            TableBody::Placeholder { text, .. } => println!("{}", text),
            TableBody::Rows { rows } => {
                for row in rows {
                    println!(
                        "{:<8} {:<20} {:>12} {:<12} {}",
                        row.reference, row.customer, row.amount, row.status, row.date
                    );
                }
            }
        }
        println!();
    }

    if let Some(body) = &view.top_products {
        println!("Top Products");
        println!("{}", "-".repeat(72));
        match body {
            TableBody::Placeholder { text, .. } => println!("{}", text),
            TableBody::Rows { rows } => {
                for row in rows {
                    println!(
                        "{:<30} {:<16} {:>6} {:>14}",
                        row.name, row.category, row.quantity, row.revenue
                    );
                }
            }
        }
        println!();
    }

    if let Some(inventory) = &view.inventory {
        println!(
            "Inventory: {} products, {} low on stock",
            inventory.total_products, inventory.low_stock_items
        );
    }
}

fn print_chart(spec: &ChartSpec) {
    match spec.kind {
        ChartKind::Line => {
            print!("{:<8}", "");
            for ds in &spec.datasets {
                print!(" {:>14}", ds.label);
            }
            println!();
            for (i, label) in spec.labels.iter().enumerate() {
                print!("{:<8}", label);
                for ds in &spec.datasets {
                    let value = ds.data.get(i).copied().unwrap_or(0.0);
                    print!(" {:>14}", format::peso(value));
                }
                println!();
            }
        }
        ChartKind::Doughnut => {
            for i in 0..spec.labels.len() {
                if let Some(line) = spec.tooltip(0, i) {
                    println!("  {}", line);
                }
            }
        }
    }
}
