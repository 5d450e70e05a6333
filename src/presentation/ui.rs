use crate::application::{App, AppMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    // Borders and the header row take three lines.
    app.update_viewport_size(chunks[1].height.saturating_sub(3) as usize);

    render_header(f, app, chunks[0]);
    render_restaurants(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let loading = if app.is_loading() { " | loading..." } else { "" };
    let header = Paragraph::new(format!(
        "restaurants | {} | favorites: {}/{}{}",
        app.source.describe(),
        app.favorite_count(),
        app.restaurants.len(),
        loading
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_restaurants(f: &mut Frame, app: &App, area: Rect) {
    let header_row = Row::new(vec![
        Cell::from(" "),
        Cell::from("Restaurant"),
        Cell::from("Description"),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let mut rows = vec![header_row];

    let visible = app
        .restaurants
        .iter()
        .enumerate()
        .skip(app.scroll)
        .take(app.viewport_rows);

    for (index, restaurant) in visible {
        let star = if restaurant.is_favorite { "★" } else { "☆" };
        let star_style = if restaurant.is_favorite {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let row_style = if index == app.selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };

        rows.push(
            Row::new(vec![
                Cell::from(star).style(star_style),
                Cell::from(restaurant.title.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(restaurant.description.trim().to_string()),
            ])
            .style(row_style)
            .height(1),
        );
    }

    let title = if app.restaurants.is_empty() && app.is_loading() {
        "Restaurants (loading)"
    } else {
        "Restaurants"
    };

    let widths = [
        Constraint::Length(2),
        Constraint::Length(28),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => app.status_message.clone().unwrap_or_else(|| {
            "↑↓/jk: move | Enter/Space/f: toggle favorite | r: reload | ?: help | q: quit".to_string()
        }),
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let help_widget = Paragraph::new(help_lines[start_line..end_line].join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub const HELP_TEXT: &str = r#"RESTAURANTS

=== FAVORITES ===
Enter/Space/f   Toggle favorite for the selected restaurant
                Favorites are saved immediately and restored
                when the app is restarted

=== NAVIGATION ===
↑↓ or j/k       Move selection
Page Up/Down    Move 5 rows
Home/End        Jump to first/last restaurant

=== DATA ===
r               Reload the list from its source
                Saved favorites are applied to the new list;
                on failure the current list is kept

=== OTHER ===
F1 or ?         Show this help
q or Esc        Quit"#;
