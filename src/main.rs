use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use red_protocol::app::{App, Screen};
use red_protocol::companion::{Companion, CompanionConfig};
use red_protocol::config::{Config, DEFAULT_CONFIG_PATH};
use red_protocol::save::SaveSlot;
use red_protocol::ui::draw_ui;
use red_protocol::{load_campaign, Locale, Session};

#[derive(Parser, Debug)]
#[command(name = "red-protocol", about = "A 24-day noir investigation in your terminal")]
struct Args {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory holding day_NN.toml files (overrides the config)
    #[arg(long)]
    campaign: Option<PathBuf>,

    /// Text language: en or fr (overrides the config)
    #[arg(long)]
    locale: Option<String>,

    /// Discard saved progress and start a new investigation
    #[arg(long)]
    reset: bool,
}

fn parse_locale(value: &str) -> Result<Locale> {
    match value.to_ascii_lowercase().as_str() {
        "en" => Ok(Locale::En),
        "fr" => Ok(Locale::Fr),
        other => bail!("unsupported locale {other:?}, expected en or fr"),
    }
}

fn init_logging(config: &Config) -> Result<()> {
    // The terminal owns stdout/stderr, so logs go to a file.
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("opening log file {}", config.log_path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::load(&args.config)?;
    if let Some(dir) = args.campaign {
        config.campaign_dir = dir;
    }
    if let Some(locale) = args.locale.as_deref() {
        config.locale = parse_locale(locale)?;
    }
    init_logging(&config)?;

    let campaign = load_campaign(&config.campaign_dir)
        .with_context(|| format!("loading campaign from {}", config.campaign_dir.display()))?;
    info!("campaign loaded: {} days", campaign.len());

    let mut session = Session::open(Arc::new(campaign), SaveSlot::new(&config.save_path));
    if args.reset {
        session.reset();
    }
    let companion = Companion::new(CompanionConfig::load(&config.companion_rules)?);
    let mut app = App::new(session, companion, config.locale);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);
    app.session.flush();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result?;

    if app.screen == Screen::CaseClosed {
        println!("\nCase closed. Merry Christmas, Inspector.\n");
    } else {
        let summary = app.session.store().summary();
        println!(
            "\nInvestigation paused: {}/{} days solved. Agent K will keep the coffee warm.\n",
            summary.solved, summary.total
        );
    }

    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| draw_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}
