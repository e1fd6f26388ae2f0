use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibe_test_core::configs::{load_vibe_config, VibeConfig};
use vibe_test_core::selection::RunOptions;
use vibe_test_core::tasks::TaskId;

mod commands;
mod console;

/// vibe-test - A comprehensive testing suite for web projects
#[derive(Parser, Debug)]
#[command(name = "vibe-test")]
#[command(about = "A comprehensive testing suite for web projects")]
#[command(version)]
struct Cli {
    /// URL or project path to test [default: config url, then http://localhost:5173]
    url: Option<String>,

    /// Run all tests
    #[arg(short, long)]
    all: bool,

    /// Performance tests only
    #[arg(short, long)]
    perf: bool,

    /// Accessibility tests only
    #[arg(long, visible_alias = "a11y")]
    accessibility: bool,

    /// Security tests only
    #[arg(short, long)]
    security: bool,

    /// Image analysis only
    #[arg(short, long)]
    images: bool,

    /// Link checking only
    #[arg(short, long)]
    links: bool,

    /// CSS analysis only
    #[arg(short, long)]
    css: bool,

    /// SEO analysis only
    #[arg(long)]
    seo: bool,

    /// Load testing only
    #[arg(long)]
    load: bool,

    /// Bundle analysis only
    #[arg(long)]
    bundle: bool,

    /// Quick scan (skip slow tests)
    #[arg(short, long)]
    quick: bool,

    /// Path to config file [default: ./vibe-test.yml when present]
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        let flags = [
            (self.perf, TaskId::Perf),
            (self.accessibility, TaskId::Accessibility),
            (self.security, TaskId::Security),
            (self.images, TaskId::Images),
            (self.links, TaskId::Links),
            (self.css, TaskId::Css),
            (self.seo, TaskId::Seo),
            (self.load, TaskId::Load),
            (self.bundle, TaskId::Bundle),
        ];

        RunOptions {
            all: self.all,
            quick: self.quick,
            tasks: flags
                .into_iter()
                .filter_map(|(set, id)| set.then_some(id))
                .collect(),
        }
    }

    fn load_config(&self, working_dir: &Path) -> Result<VibeConfig> {
        load_vibe_config(self.config.as_deref(), working_dir)
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the report on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    console::print_banner();

    let config = cli.load_config(&std::env::current_dir()?)?;
    let target = config.resolve_target(cli.url.as_deref());
    tracing::debug!(%target, "Resolved target");

    commands::run::execute(&target, &cli.run_options(), &config).await
}
