use jomso_core::{
    geo::format_distance,
    model::{Bin, BinKind, Priority},
};
use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Cell, Gauge, List, ListItem, ListState, Paragraph, Row, Table, TableState,
        Wrap,
    },
};

use crate::app::{App, Screen, SortMode};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let location = app
        .user_location
        .map_or_else(|| "location unknown".to_owned(), |point| format!("you are at {point}"));
    let header = Paragraph::new(format!("jomso – find the nearest bin · {location}"))
        .block(Block::default().borders(Borders::ALL).title("Jomso"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::SourceSelect => draw_source_select(frame, app, *content_area),
        Screen::BinList => draw_bin_list(frame, app, *content_area),
        Screen::BinDetail => draw_bin_detail(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::SourceSelect => "↑/↓ move · Enter/Space select source · q/Ctrl-C quit",
        Screen::BinList => {
            "↑/↓ move · Enter open · Tab sort · n nearest · r locate · l reload · Esc back · q quit"
        }
        Screen::BinDetail => "Esc/←/b back to list · r locate · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_source_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = app
        .sources
        .iter()
        .enumerate()
        .map(|(idx, (_id, name))| {
            let prefix = if idx == app.source_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{prefix}{name}"))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select bin source (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.sources.is_empty() {
        state.select(Some(app.source_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_bin_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),     // bins
            Constraint::Length(10), // nearest bin card
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [list_area, card_area] = chunks else {
        return;
    };

    let source_name = app.selected_source_name().unwrap_or("<source>");
    let summary = app.summary();
    let order = match app.sort {
        SortMode::Distance => "by distance",
        SortMode::Priority => "by fill level",
    };
    let title = format!(
        "{source_name}: {} bins, {} full, avg {:.0}% ({order})",
        summary.total, summary.full, summary.average_fill
    );

    if app.bins.is_empty() {
        let paragraph = Paragraph::new("No bins loaded. Press l to reload the source.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, *list_area);
    } else {
        let nearest_id = app.nearest.as_ref().map(|nearest| &nearest.bin.id);
        let rows = app.visible_bins().into_iter().map(|(bin, meters)| {
            let distance = meters.map_or_else(|| "–".to_owned(), format_distance);
            let mut style = Style::default().fg(kind_color(&bin.kind));
            if Some(&bin.id) == nearest_id {
                style = style.add_modifier(Modifier::BOLD);
            }
            Row::new(vec![
                Cell::from(distance),
                Cell::from(bin.fill.to_string()),
                Cell::from(priority_label(bin.fill.priority())),
                Cell::from(bin.kind.to_string()),
                Cell::from(bin.address.clone()),
            ])
            .style(style)
        });

        let column_widths = [
            Constraint::Length(9),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Min(20),
        ];

        let table = Table::new(rows, column_widths)
            .header(
                Row::new(vec!["Distance", "Fill", "Prio", "Type", "Address"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .column_spacing(1);

        let mut state = TableState::default();
        state.select(Some(app.bin_list_index));
        frame.render_stateful_widget(table, *list_area, &mut state);
    }

    draw_nearest_card(frame, app, *card_area);
}

fn draw_nearest_card(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Nearest bin");

    let Some(nearest) = &app.nearest else {
        let hint = if app.user_location.is_none() {
            "No nearest bin available: location unknown (pass --lat/--lng, r to retry)."
        } else {
            "No nearest bin available."
        };
        let paragraph = Paragraph::new(hint).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // address
            Constraint::Length(1), // fill gauge
            Constraint::Min(0),    // details
        ])
        .split(inner);

    let chunks = layout_chunks.as_ref();
    let [title_area, gauge_area, details_area] = chunks else {
        return;
    };

    let bin = &nearest.bin;
    let title = Paragraph::new(format!("{} · {}", bin.address, nearest.label))
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, *title_area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(fill_color(bin)))
        .percent(u16::from(bin.fill.percent()))
        .label(format!("Fill level {}", bin.fill));
    frame.render_widget(gauge, *gauge_area);

    let details = Paragraph::new(vec![
        Line::from(format!("Type: {}", bin.kind)),
        Line::from(format!("Size: {}", bin.size)),
        Line::from(format!("Distance: {}", nearest.label)),
    ]);
    frame.render_widget(details, *details_area);
}

fn draw_bin_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(bin) = app.detail_bin() else {
        let paragraph = Paragraph::new("No bin selected.")
            .block(Block::default().borders(Borders::ALL).title("Bin"));
        frame.render_widget(paragraph, area);
        return;
    };

    let distance = app
        .distance_to(bin)
        .map_or_else(|| "unknown".to_owned(), format_distance);
    let last_emptied = bin.last_emptied_at.map_or_else(
        || "unknown".to_owned(),
        |stamp| stamp.format("%d.%m.%Y %H:%M UTC").to_string(),
    );

    let lines = vec![
        Line::from(bin.address.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(format!(
            "Fill level: {} ({})",
            bin.fill,
            priority_label(bin.fill.priority())
        ))
        .style(Style::default().fg(fill_color(bin))),
        Line::from(format!(
            "Lat: {}, Lng: {}",
            bin.location.latitude, bin.location.longitude
        )),
        Line::from(format!("Type: {}", bin.kind)),
        Line::from(format!("Size: {}", bin.size)),
        Line::from(format!("Last emptied: {last_emptied}")),
        Line::from(format!("Distance: {distance}")),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Bin {} (Esc/←/b to go back)", bin.id)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

fn fill_color(bin: &Bin) -> Color {
    if bin.fill.is_full() {
        Color::Red
    } else {
        match bin.fill.priority() {
            Priority::High => Color::LightRed,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        }
    }
}

fn kind_color(kind: &BinKind) -> Color {
    match kind {
        BinKind::Glass => Color::Cyan,
        BinKind::Clothes => Color::Magenta,
        BinKind::Paper => Color::Blue,
        BinKind::Plastic => Color::Yellow,
        BinKind::Other(_) => Color::Gray,
    }
}
