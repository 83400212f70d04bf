//! Terminal UI for jomso that lists public waste bins and points out the nearest one.

mod app;
mod config;
mod input;
mod location;
mod ui;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use jomso_core::{plugin::SourceRegistry, service::JomsoService};
use jomso_source_fixture as fixture;
use jomso_source_remote as remote;
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tracing::{info, warn};

use crate::app::App;
use crate::config::CliArgs;
use crate::input::Action;
use crate::location::FixedLocation;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    config::init_tracing(args.log_file.as_ref())?;

    // HTTP + service setup
    let client = Client::builder().user_agent(args.user_agent.as_str()).build()?;

    let mut plugins = vec![fixture::plugin()];
    if let Some(url) = args.bins_url.clone() {
        info!(%url, "remote bin feed enabled");
        plugins.push(remote::plugin(client, url));
    }
    let registry = Arc::new(SourceRegistry::new(plugins));
    let location = Arc::new(FixedLocation::new(args.user_location()));
    let service = Arc::new(JomsoService::new(registry, location));

    // App state
    let mut app = App::new(service);
    refresh_location(&mut app).await;

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::LoadBins => {
                    let Some(source) = app.selected_source.clone() else {
                        app.error_message = Some("Select a source first".into());
                        continue;
                    };

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.load_bins(&source).await;

                    app.is_loading = false;
                    match res {
                        Ok(bins) => app.set_bins(bins),
                        Err(err) => {
                            warn!(source = %source.0, error = %err, "loading bins failed");
                            app.set_bins(Vec::new());
                            app.error_message = Some(format!("Failed to load bins: {err}"));
                        }
                    }
                }
                Action::RefreshLocation => {
                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    refresh_location(&mut app).await;
                    app.is_loading = false;
                }
            }
        }
    }

    Ok(())
}

async fn refresh_location(app: &mut App) {
    match app.service.user_location().await {
        Ok(location) => {
            app.set_user_location(location);
            if location.is_none() {
                app.error_message =
                    Some("Location unavailable; distances are hidden".into());
            }
        }
        Err(err) => {
            warn!(error = %err, "location query failed");
            app.set_user_location(None);
            app.error_message = Some(format!("Location query failed: {err}"));
        }
    }
}
