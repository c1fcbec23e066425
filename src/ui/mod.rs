mod bars;

use std::sync::OnceLock;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::algo::ALL_ALGORITHMS;
use crate::app::{App, Popup, Section};
use crate::session::{Bar, Highlight, PlayState, Session};
use crate::theme::Theme;

// Load theme colors from the terminal config once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn success() -> Color { theme().success }
fn warning() -> Color { theme().warning }
fn danger() -> Color { theme().danger }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(8), // Controls row
            Constraint::Min(8),    // Visualization
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_controls_row(f, app, chunks[1]);
    draw_visualization(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message > animation state > ready
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(warning())))
    } else if app.is_animating() {
        let applied: usize = app.sessions.iter().map(|s| s.cursor()).sum();
        let total: usize = app.sessions.iter().map(|s| s.step_count()).sum();
        let state = if app.paused { "Paused" } else { "Running" };
        Line::from(vec![
            Span::styled(state, Style::default().fg(accent())),
            Span::styled(
                format!(" │ step {}/{}", applied, total),
                Style::default().fg(text_dim()),
            ),
        ])
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(text_dim())))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_controls_row(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(32), // Array input + speed
            Constraint::Percentage(26), // Algorithm checkboxes
            Constraint::Percentage(42), // Algorithm info card
        ])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(chunks[0]);

    draw_array_box(f, app, left[0]);
    draw_speed_box(f, app, left[1]);
    draw_algorithms_box(f, app, chunks[1]);
    draw_info_card(f, app, chunks[2]);
}

fn draw_array_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Array;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let cursor = if is_active { "_" } else { "" };
    let input = Paragraph::new(format!("{}{}", app.input_buffer, cursor))
        .style(Style::default().fg(text()))
        .block(
            Block::default()
                .title(Span::styled(" Array ", title_style))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    f.render_widget(input, area);
}

fn draw_speed_box(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Speed ←/→ ", Style::default().fg(inactive())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let filled = app.speed as usize;
    let line = Line::from(vec![
        Span::styled("▮".repeat(filled), Style::default().fg(accent())),
        Span::styled("▯".repeat(10 - filled), Style::default().fg(inactive())),
        Span::styled(format!(" {}", app.speed), Style::default().fg(text())),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_algorithms_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Algorithms;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let block = Block::default()
        .title(Span::styled(" Algorithms ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let lines: Vec<Line> = ALL_ALGORITHMS
        .iter()
        .enumerate()
        .map(|(i, algo)| {
            let selected = app.algo_selected.get(i).copied().unwrap_or(false);
            let checkbox = if selected { "[x]" } else { "[ ]" };
            let checkbox_color = if selected { success() } else { text_dim() };

            let row_style = if i == app.selected_algo && is_active {
                Style::default().bg(bg_selected()).fg(text())
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::styled(format!(" {} ", checkbox), Style::default().fg(checkbox_color)),
                Span::styled(algo.display_name(), Style::default().fg(text())),
            ])
            .style(row_style)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_info_card(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" About ", Style::default().fg(inactive())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let selected = app.selected_algorithms();
    let lines: Vec<Line> = match selected.as_slice() {
        [algo] => vec![
            Line::from(Span::styled(
                algo.display_name(),
                Style::default().fg(header()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(algo.description(), Style::default().fg(text()))),
            Line::from(vec![
                Span::styled("Time: ", Style::default().fg(text_dim())),
                Span::styled(algo.time_complexity(), Style::default().fg(text())),
                Span::styled("  Space: ", Style::default().fg(text_dim())),
                Span::styled(algo.space_complexity(), Style::default().fg(text())),
            ]),
        ],
        [] => vec![Line::from(Span::styled(
            "Select an algorithm to see its description and complexity.",
            Style::default().fg(text_dim()),
        ))],
        _ => vec![Line::from(Span::styled(
            "Multiple algorithms selected. Start to compare them side by side.",
            Style::default().fg(text_dim()),
        ))],
    };

    let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(card, area);
}

fn draw_visualization(f: &mut Frame, app: &App, area: Rect) {
    if app.sessions.is_empty() {
        // initial paint: the plain input array, no highlights
        let bars: Vec<Bar> = {
            let max = app.preview.iter().copied().max().filter(|m| *m > 0).unwrap_or(1);
            app.preview
                .iter()
                .map(|&value| Bar {
                    value,
                    height: crate::session::scale_height(value, max),
                    highlight: Highlight::None,
                })
                .collect()
        };
        let title = vec![Span::styled(" Array ", Style::default().fg(text_dim()))];
        bars::draw_bar_group(f, area, theme(), title, &bars, inactive());
        return;
    }

    let constraints: Vec<Constraint> = app
        .sessions
        .iter()
        .map(|_| Constraint::Ratio(1, app.sessions.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (session, chunk) in app.sessions.iter().zip(chunks.iter()) {
        draw_session_group(f, *chunk, session);
    }
}

fn draw_session_group(f: &mut Frame, area: Rect, session: &Session) {
    let (state_color, state_label) = match session.state {
        PlayState::Running => (accent(), None),
        PlayState::Paused => (warning(), Some("⏸")),
        PlayState::Finished => (success(), Some("✓")),
    };

    let mut title = vec![Span::styled(
        format!(" {} ", session.algorithm.display_name()),
        Style::default().fg(state_color).add_modifier(Modifier::BOLD),
    )];

    if session.is_finished() {
        if let Some(ms) = session.time_taken {
            title.push(Span::styled(
                format!("· {:.2} ms ", ms),
                Style::default().fg(text_dim()),
            ));
        }
    } else {
        title.push(Span::styled(
            format!("· {}/{} ", session.cursor(), session.step_count()),
            Style::default().fg(text_dim()),
        ));
    }

    if let Some(label) = state_label {
        title.push(Span::styled(format!("{} ", label), Style::default().fg(state_color)));
    }

    bars::draw_bar_group(f, area, theme(), title, &session.bars, state_color);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = if app.is_animating() {
        vec![
            ("Space", if app.paused { "Resume" } else { "Pause" }),
            ("n", "Step"),
            ("r", "Reset"),
            ("←→", "Speed"),
            ("h", "Help"),
            ("q", "Quit"),
        ]
    } else {
        match app.section {
            Section::Array => vec![
                ("0-9,", "Edit"),
                ("g", "Random"),
                ("s", "Start"),
                ("Tab", "Next"),
                ("h", "Help"),
                ("q", "Quit"),
            ],
            Section::Algorithms => vec![
                ("↑↓", "Nav"),
                ("Space", "Toggle"),
                ("s", "Start"),
                ("Tab", "Next"),
                ("h", "Help"),
                ("q", "Quit"),
            ],
        }
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 75 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled("═══ Setup ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("  Tab       ", Style::default().fg(accent())),
            Span::raw("Switch between array input and algorithm list"),
        ]),
        Line::from(vec![
            Span::styled("  0-9 , -   ", Style::default().fg(accent())),
            Span::raw("Edit the comma-separated array"),
        ]),
        Line::from(vec![
            Span::styled("  g         ", Style::default().fg(accent())),
            Span::raw("Generate a random array (5-14 values, 1-100)"),
        ]),
        Line::from(vec![
            Span::styled("  Space     ", Style::default().fg(accent())),
            Span::raw("Toggle the highlighted algorithm checkbox"),
        ]),
        Line::from(""),
        Line::from(Span::styled("═══ Animation ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("  s         ", Style::default().fg(accent())),
            Span::raw("Fetch steps and start all selected algorithms"),
        ]),
        Line::from(vec![
            Span::styled("  Space/p   ", Style::default().fg(accent())),
            Span::raw("Pause / resume every running animation"),
        ]),
        Line::from(vec![
            Span::styled("  n         ", Style::default().fg(accent())),
            Span::raw("Advance one step (single algorithm, while paused)"),
        ]),
        Line::from(vec![
            Span::styled("  r         ", Style::default().fg(accent())),
            Span::raw("Reset and repaint the plain array"),
        ]),
        Line::from(vec![
            Span::styled("  ← →       ", Style::default().fg(accent())),
            Span::raw("Adjust speed (1 slowest, 10 fastest)"),
        ]),
        Line::from(""),
        Line::from(Span::styled("═══ Bar colors ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("  ██ ", Style::default().fg(warning())),
            Span::raw("comparing      "),
            Span::styled("██ ", Style::default().fg(danger())),
            Span::raw("swapping"),
        ]),
        Line::from(vec![
            Span::styled("  ██ ", Style::default().fg(header())),
            Span::raw("merging/pivot  "),
            Span::styled("██ ", Style::default().fg(success())),
            Span::raw("placed/complete"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("h", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" sortvis Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
