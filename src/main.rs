use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::{LevelFilter, info};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tokio::task::LocalSet;

use devdash::config::Config;
use devdash::DashError;
use devdash::dom::Dom;
use devdash::shell::{Dashboard, ToolInstance};
use devdash::tools::ToolCatalog;
use devdash::tools::common::COPY_FEEDBACK;
use devdash::tui::{self, App, ControlKind, TuiRunner, card_controls, card_outputs};

mod cli;

use cli::Cli;
use cli::commands::{Commands, parse_assignment};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("devdash")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("devdash.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins; otherwise the config's log_level narrows this later
    env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn apply_log_level(config: &Config) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    let level = config
        .log_level
        .as_deref()
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    log::set_max_level(level);
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => run_tui(config),
        Some(Commands::List) => handle_list_command(config),
        Some(Commands::Run { kind, set, click }) => handle_run_command(kind, set, click, config),
    }
}

/// Current-thread runtime; tool handlers spawn onto its `LocalSet`
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build runtime")
}

fn run_tui(config: &Config) -> Result<()> {
    info!("Launching TUI mode");
    let catalog = ToolCatalog::builtin(&config.http)?;

    let runtime = runtime()?;
    let local = LocalSet::new();
    local.block_on(&runtime, async {
        let dom = Dom::with_tasks();
        let mut app = App::new(&dom, catalog, config);
        app.open_all(&config.startup.tools);

        let terminal = tui::init_terminal()?;
        let result = TuiRunner::new(terminal, app, config.tui.tick_rate_ms).run().await;
        tui::restore_terminal()?;
        result
    })
}

fn handle_list_command(config: &Config) -> Result<()> {
    let catalog = ToolCatalog::builtin(&config.http)?;
    println!("{}", "Available tools:".bold());
    for tool in catalog.all() {
        println!("  {:<12} {}", tool.kind.cyan(), tool.title);
    }
    Ok(())
}

fn handle_run_command(kind: &str, set: &[String], click: &[String], config: &Config) -> Result<()> {
    info!("Running tool {} headless", kind);
    let catalog = ToolCatalog::builtin(&config.http)?;

    let runtime = runtime()?;
    let local = LocalSet::new();
    local.block_on(&runtime, async {
        let dom = Dom::with_tasks();
        let dashboard = Dashboard::new(&dom);
        dom.root().append_child(dashboard.render());

        let key = dashboard
            .select(kind, &catalog)?
            .ok_or_else(|| DashError::UnknownTool(kind.to_string()))
            .context("see `devdash list`")?;
        let card = dashboard.get(&key).ok_or_else(|| eyre!("Card {} did not mount", key))?;

        for raw in set {
            let (class, value) = parse_assignment(raw).ok_or_else(|| eyre!("Expected CLASS=VALUE, got {}", raw))?;
            let control = card
                .root
                .query(&format!(".{}", class))
                .ok_or_else(|| eyre!("No control with class {}", class))?;
            control.type_text(value);
        }
        dom.settle().await;

        for class in click {
            let button = card
                .root
                .query(&format!(".{}", class))
                .ok_or_else(|| eyre!("No button with class {}", class))?;
            button.click();
            dom.settle().await;
        }

        print_card(&card);
        for notice in dom.take_notices() {
            println!("{} {}", "!".red().bold(), notice.message.red());
        }
        if let Some(clipboard) = dom.clipboard() {
            println!("{} {}", "clipboard:".dimmed(), clipboard);
        }

        // Let feedback timers run out before the document goes away
        dom.run_timers(Instant::now() + COPY_FEEDBACK);
        dashboard.teardown();
        Ok::<(), eyre::Report>(())
    })
}

fn print_card(card: &ToolInstance) {
    println!("{} {}", card.descriptor.title.bold(), format!("({})", card.instance_key).dimmed());
    for control in card_controls(&card.root) {
        match control.kind {
            ControlKind::Button => continue,
            ControlKind::Select => println!("{} {}", format!("{}:", control.label()).cyan(), control.element.value()),
            ControlKind::Input | ControlKind::TextArea => {
                let value = control.element.value();
                if value.contains('\n') {
                    println!("{}", format!("{}:", control.label()).cyan());
                    for line in value.lines() {
                        println!("  {}", line);
                    }
                } else {
                    println!("{} {}", format!("{}:", control.label()).cyan(), value);
                }
            }
        }
    }
    for output in card_outputs(&card.root) {
        println!("{}", output.inner_text());
    }
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(&config);

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
