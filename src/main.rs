//! biboutline: Outline navigation for markdown notes with bibliography entries.
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use biboutline::{app_state, config, input, tree, ui};
use clap::Parser;
use edtui::EditorEventHandler;
use ratatui::crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "biboutline")]
#[command(about = "Outline navigation for markdown notes with bibliography entries", long_about = None)]
struct Args {
    /// Files or directories to outline
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Print the fully expanded outline as JSON instead of opening the viewer
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct DocumentOutline {
    path: PathBuf,
    outline: Vec<tree::OutlineTree>,
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)
        .context("failed to collect documents")?;

    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }
    info!(count = documents.len(), "documents found");

    if args.json {
        return print_json(documents);
    }

    let state = app_state::AppState::new(documents, cfg.expand_headers);
    run_tui(state)
}

fn print_json(documents: Vec<PathBuf>) -> Result<()> {
    let mut outlines = Vec::with_capacity(documents.len());
    for path in documents {
        let lines = input::read_lines(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        outlines.push(DocumentOutline {
            outline: tree::build(&lines),
            path,
        });
    }

    let json = serde_json::to_string_pretty(&outlines).context("failed to serialise outline")?;
    println!("{json}");
    Ok(())
}

fn run_tui(mut app: app_state::AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor_handler = EditorEventHandler::default();

    let result = run_app(&mut terminal, &mut app, &mut editor_handler);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("viewer failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
    editor_handler: &mut EditorEventHandler,
) -> io::Result<()> {
    loop {
        app.sync();
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            match app.current_view {
                app_state::View::FileList => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Up => {
                        app.current_file_index = app.current_file_index.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        if app.current_file_index + 1 < app.files.len() {
                            app.current_file_index += 1;
                        }
                    }
                    KeyCode::Enter => app.open_file(app.current_file_index),
                    _ => {}
                },
                app_state::View::List => {
                    app.message = None;
                    match key.code {
                        KeyCode::Char('q') => {
                            if app.file_mode == app_state::FileMode::Multi {
                                app.current_view = app_state::View::FileList;
                            } else {
                                return Ok(());
                            }
                        }
                        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                        KeyCode::Left | KeyCode::Char('h') => app.collapse_current(),
                        KeyCode::Right | KeyCode::Char('l') => {
                            app.expand_current();
                        }
                        KeyCode::Char('r') => app.refresh(),
                        KeyCode::Enter => app.enter_detail_view(),
                        _ => {}
                    }
                }
                app_state::View::Detail => {
                    let normal_mode = app
                        .editor_state
                        .as_ref()
                        .is_none_or(|state| state.mode == edtui::EditorMode::Normal);
                    if key.code == KeyCode::Esc && normal_mode {
                        app.exit_detail_view();
                    } else if app_state::is_preview_key(key.code) {
                        if let Some(ref mut editor_state) = app.editor_state {
                            editor_handler.on_key_event(key, editor_state);
                        }
                    }
                }
            }
        }
    }
}
