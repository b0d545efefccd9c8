//! Rendering of the weather view.
//!
//! Pure functions of [`ViewState`]; nothing here mutates state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
};
use skycast_core::{
    ForecastDay, Theme, WeatherSnapshot,
    theme::Rgb,
    view::{Tab, ViewState},
};

const TITLE: &str = "Skycast";
const SEARCH_PLACEHOLDER: &str = "Search city...";
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const BAR_WIDTH: usize = 10;

fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

pub fn render(frame: &mut Frame, state: &ViewState) {
    let theme = state.theme();
    let banner = if state.error.is_some() { 1 } else { 0 };

    let [header, error, body, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(banner),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, state, theme);
    if let Some(message) = &state.error {
        render_error(frame, error, message);
    }

    match &state.weather {
        Some(weather) if !state.shows_placeholder() => {
            render_weather(frame, body, state, weather, theme)
        }
        _ => render_placeholder(frame, body, state, theme),
    }

    render_help(frame, help, state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &ViewState, theme: Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(rgb(theme.accent())));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title, search, clock] = Layout::horizontal([
        Constraint::Length(TITLE.len() as u16 + 2),
        Constraint::Min(10),
        Constraint::Length(20),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {TITLE}"),
            Style::default().fg(rgb(theme.stops()[0])).bold(),
        )),
        title,
    );

    let search_line = if state.search_focused {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(&state.search_text, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if state.search_text.is_empty() {
        Line::from(Span::styled(
            format!("  {SEARCH_PLACEHOLDER}"),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(format!("  {}", state.search_text))
    };
    frame.render_widget(Paragraph::new(search_line), search);

    let locating = if state.locating { "locating " } else { "" };
    frame.render_widget(
        Paragraph::new(format!("{locating}{}", state.clock)).alignment(Alignment::Right),
        clock,
    );
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let line = Line::from(vec![
        Span::styled(format!(" ! {message} "), Style::default().fg(Color::White)),
        Span::styled("(x to dismiss)", Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(Color::Red)),
        area,
    );
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &ViewState, theme: Theme) {
    let status = if state.is_loading {
        format!(
            "{} Loading Weather...",
            SPINNER[state.tick_count as usize % SPINNER.len()]
        )
    } else {
        "offline: press l or / to try again".to_string()
    };

    let lines = vec![
        Line::from(""),
        Line::from(state.date.as_str()).bold(),
        Line::from(state.clock.as_str()),
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(rgb(theme.accent())))),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Weather ")),
        area,
    );
}

fn render_weather(
    frame: &mut Frame,
    area: Rect,
    state: &ViewState,
    weather: &WeatherSnapshot,
    theme: Theme,
) {
    let [card, tabs, content] = Layout::vertical([
        Constraint::Length(9),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    render_current(frame, card, state, weather, theme);
    render_tabs(frame, tabs, state.tab, theme);

    match state.tab {
        Tab::Today => render_hourly(frame, content, weather, theme),
        Tab::Week => render_week(frame, content, weather, theme),
    }
}

fn render_current(
    frame: &mut Frame,
    area: Rect,
    state: &ViewState,
    weather: &WeatherSnapshot,
    theme: Theme,
) {
    let accent = rgb(theme.accent());
    let mut title = format!(" {} ", weather.location.name);
    if state.stale {
        title.push_str("(stale) ");
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(title, Style::default().bold()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);

    let current = &weather.current;
    let summary = vec![
        Line::from(Span::styled(
            format!("{}°C", current.temperature_c),
            Style::default().fg(accent).bold(),
        )),
        Line::from(format!("Feels like {}°C", current.feels_like_c)),
        Line::from(current.condition.text.as_str()),
        Line::from(Span::styled(
            weather.location.locality.as_str(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("Local time {}", weather.location.local_time),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(summary).wrap(Wrap { trim: true }), left);

    let mut details = vec![
        detail("Wind", format!("{} km/h", current.wind_kph)),
        detail("Humidity", format!("{}%", current.humidity_pct)),
        detail("Visibility", format!("{} km", current.visibility_km)),
        detail("Pressure", format!("{} mb", current.pressure_mb)),
    ];
    if let Some(today) = weather.today() {
        details.push(detail("Sunrise", today.sunrise.clone()));
        details.push(detail("Sunset", today.sunset.clone()));
        details.push(detail("UV index", today.uv_index.to_string()));
    }
    frame.render_widget(Paragraph::new(details), right);
}

fn detail(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<11}"), Style::default().fg(Color::Gray)),
        Span::raw(value),
    ])
}

fn render_tabs(frame: &mut Frame, area: Rect, selected: Tab, theme: Theme) {
    let index = Tab::ALL.iter().position(|t| *t == selected).unwrap_or(0);
    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.label()))
        .select(index)
        .highlight_style(Style::default().fg(rgb(theme.accent())).bold().underlined());
    frame.render_widget(tabs, area);
}

fn render_hourly(frame: &mut Frame, area: Rect, weather: &WeatherSnapshot, theme: Theme) {
    let hours = weather.today().map(|d| d.hours.as_slice()).unwrap_or(&[]);

    let rows = hours.iter().map(|h| {
        Row::new(vec![
            Cell::from(h.label()),
            Cell::from(format!("{}°C", h.temperature_c)),
            Cell::from(h.condition.text.clone()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Min(10),
        ],
    )
    .header(Row::new(["Time", "Temp", "Condition"]).style(Style::default().bold()))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(rgb(theme.accent()))),
    );

    frame.render_widget(table, area);
}

fn render_week(frame: &mut Frame, area: Rect, weather: &WeatherSnapshot, theme: Theme) {
    let accent = rgb(theme.accent());

    let rows = weather.days.iter().map(|day| {
        Row::new(vec![
            Cell::from(day.weekday_label()),
            Cell::from(day.condition.text.clone()),
            Cell::from(format!("{}%", day.chance_of_rain_pct)),
            Cell::from(format!("{}°", day.min_temp_c)),
            Cell::from(Span::styled(span_bar(day), Style::default().fg(accent))),
            Cell::from(format!("{}°", day.max_temp_c)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(BAR_WIDTH as u16),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(["Day", "Condition", "Rain", "Min", "", "Max"]).style(Style::default().bold()),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent)),
    );

    frame.render_widget(table, area);
}

fn span_bar(day: &ForecastDay) -> String {
    let filled = ((day.temp_span_ratio() * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn render_help(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = if state.search_focused {
        "Enter search  Esc cancel"
    } else {
        "/ search  l my location  Tab switch view  q quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded(condition: &str) -> ViewState {
        let mut state = ViewState::default();
        state.weather = Some(fixtures::snapshot("Surat", condition));
        state.is_loading = false;
        state
    }

    #[test]
    fn placeholder_while_loading() {
        let mut state = ViewState::default();
        state.clock = "2:05:09 PM".into();
        state.date = "1/6/2025".into();

        let out = draw(&state);

        assert!(out.contains("Loading Weather..."));
        assert!(out.contains("2:05:09 PM"));
        assert!(out.contains("1/6/2025"));
        assert!(out.contains(SEARCH_PLACEHOLDER));
    }

    #[test]
    fn current_card_shows_conditions() {
        let out = draw(&loaded("Sunny"));

        assert!(out.contains("Surat"));
        assert!(out.contains("Feels like 35.2"));
        assert!(out.contains("Gujarat, India"));
        assert!(out.contains("14.4 km/h"));
        assert!(out.contains("62%"));
        assert!(out.contains("1004 mb"));
        assert!(out.contains("05:58 AM"));
        assert!(!out.contains("Loading Weather..."));
    }

    #[test]
    fn today_tab_lists_hours() {
        let out = draw(&loaded("Sunny"));

        assert!(out.contains("9 AM"));
        assert!(out.contains("3 PM"));
        assert!(out.contains("Partly cloudy"));
    }

    #[test]
    fn week_tab_lists_days() {
        let mut state = loaded("Sunny");
        state.tab = Tab::Week;

        let out = draw(&state);

        assert!(out.contains("Sun"));
        assert!(out.contains("Mon"));
        assert!(out.contains("40%"));
        assert!(!out.contains("9 AM"));
    }

    #[test]
    fn error_banner_and_stale_marker() {
        let mut state = loaded("Sunny");
        state.error = Some(skycast_core::error::NETWORK_PROBLEM.to_string());
        state.stale = true;

        let out = draw(&state);

        assert!(out.contains("Network problem"));
        assert!(out.contains("x to dismiss"));
        assert!(out.contains("(stale)"));
    }

    #[test]
    fn focused_search_shows_typed_text() {
        let mut state = loaded("Sunny");
        state.search_focused = true;
        state.search_text = "Mumbai".into();

        let out = draw(&state);

        assert!(out.contains("> Mumbai"));
        assert!(out.contains("Esc cancel"));
    }

    #[test]
    fn span_bar_fills_by_ratio() {
        let snapshot = fixtures::snapshot("Surat", "Sunny");

        // 8 degree span -> 0.4 -> 4 of 10 cells
        assert_eq!(span_bar(&snapshot.days[0]), "████░░░░░░");
        // clamped at full width
        assert_eq!(span_bar(&snapshot.days[1]), "█".repeat(BAR_WIDTH));
        assert_eq!(span_bar(&snapshot.days[2]), "░".repeat(BAR_WIDTH));
    }
}
