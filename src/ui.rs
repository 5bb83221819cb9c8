use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{block::Title, Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, FocusPane, HitAreas, InputMode, MENU_ROWS, MENU_SETTINGS_ROW, MENU_SIGN_OUT_ROW};
use crate::catalog::{self, ColorTag, MenuEntry, EXTERNAL_APPS, INTERNAL_APPS, LAUNCHER_COLUMNS, PRIMARY_NAV, QUICK_LINKS, SETTINGS_ENTRY};
use crate::chat::{ChatPanel, Sender};
use crate::nav::View;
use crate::pages::deploy::{DeployTab, DEPLOYMENTS, ENVIRONMENTS};
use crate::pages::monitor::{MonitorTab, ALERTS, METRICS};
use crate::pages::shell::{ShellPage, ShellTab};
use crate::pages::{dashboard, format_timestamp, PageState};

const ACCENT: Color = Color::Rgb(99, 102, 241);
const MUTED: Color = Color::DarkGray;

/// Wrap text to fit within a given width, returning multiple lines
/// Uses word boundaries for wrapping (doesn't break mid-word)
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len == 0 {
            current_line = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
            current_len = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Column `offset` cells into `area`, pinned to its last column.
fn offset_column(area: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    area.x
        .saturating_add(offset)
        .min(area.right().saturating_sub(1))
}

fn badge(label: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", label),
        Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
    )
}

fn card_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(format!(" {} ", title))
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    app.areas = HitAreas::default();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let external = match app.view() {
        View::External(url) => Some(url.to_string()),
        View::Routed(_) => None,
    };
    match external {
        Some(url) => render_external(frame, body_area, &url),
        None => render_page(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    if app.search.shows_dropdown() {
        render_search_dropdown(app, frame, body_area);
    }

    render_chat(app, frame, body_area);

    // Panels sit above everything else
    if app.menu.open {
        render_menu(app, frame, body_area);
    } else if app.launcher.open {
        render_launcher(app, frame, body_area);
    }
}

fn render_header(app: &mut App, frame: &mut Frame, area: Rect) {
    let links_width: u16 = QUICK_LINKS
        .iter()
        .map(|l| l.label.chars().count() as u16 + 5)
        .sum();

    let [menu_area, logo_area, links_area, search_area, apps_area, status_area] =
        Layout::horizontal([
            Constraint::Length(3),
            Constraint::Length(10),
            Constraint::Length(links_width),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(7),
        ])
        .areas(area);

    frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);

    frame.render_widget(Paragraph::new(" ☰ ").fg(Color::White), menu_area);
    app.areas.menu_button = Some(menu_area);

    frame.render_widget(
        Paragraph::new(Span::styled("myAFS.io", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))),
        logo_area,
    );
    app.areas.logo = Some(logo_area);

    let mut x = links_area.x;
    let mut spans = Vec::new();
    for (i, link) in QUICK_LINKS.iter().enumerate() {
        let text = format!("{}:{} {} ", i + 1, link.icon, link.label);
        let width = text.chars().count() as u16;
        app.areas
            .quick_links
            .push(Rect::new(x, area.y, width.min(links_area.right().saturating_sub(x)), 1));
        x = x.saturating_add(width);
        spans.push(Span::styled(text, Style::default().fg(Color::Gray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), links_area);

    render_search_bar(app, frame, search_area);

    frame.render_widget(
        Paragraph::new(Span::styled(" ▦ Apps ", Style::default().fg(Color::White))),
        apps_area,
    );
    app.areas.launcher_button = Some(apps_area);

    // Notifications and profile are static badges
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("🔔", Style::default().fg(Color::White)),
            Span::styled("•", Style::default().fg(Color::Red)),
            Span::raw(" "),
            Span::styled(" ☺ ", Style::default().fg(Color::White).bg(ACCENT)),
        ])),
        status_area,
    );
}

fn render_search_bar(app: &mut App, frame: &mut Frame, area: Rect) {
    app.areas.search = Some(area);
    let search = &app.search;

    let line = if search.is_expanded() {
        let border = if search.is_focused() { Color::Cyan } else { MUTED };
        let body = if search.input().text().is_empty() {
            Span::styled(search.placeholder().to_string(), Style::default().fg(MUTED))
        } else {
            Span::styled(search.input().text().to_string(), Style::default().fg(Color::White))
        };
        let mut spans = vec![Span::styled("[⌕ ", Style::default().fg(border)), body];
        if !search.input().text().is_empty() {
            spans.push(Span::styled("  ✕", Style::default().fg(MUTED)));
            let clear_x = offset_column(area, 3 + search.input().width() + 2);
            if clear_x < area.right() {
                app.areas.search_clear = Some(Rect::new(clear_x, area.y, 1, 1));
            }
        }
        spans.push(Span::styled("]", Style::default().fg(border)));
        Line::from(spans)
    } else {
        Line::from(Span::styled(" ⌕ Search ", Style::default().fg(Color::Gray)))
    };

    frame.render_widget(Paragraph::new(line), area);

    if app.input_mode == InputMode::Editing && app.focus == FocusPane::Search {
        let cursor_x = offset_column(area, 3 + app.search.input().cursor_width());
        frame.set_cursor_position((cursor_x, area.y));
    }
}

fn render_search_dropdown(app: &mut App, frame: &mut Frame, body: Rect) {
    let Some(search_area) = app.areas.search else {
        return;
    };
    let dropdown = Rect::new(search_area.x, body.y, search_area.width, 3).intersection(body);
    // The dropdown is part of the search field for outside-click purposes
    app.areas.search = Some(search_area.union(dropdown));
    frame.render_widget(Clear, dropdown);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Start typing to see search results...",
            Style::default().fg(MUTED),
        ))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED))),
        dropdown,
    );
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = if app.menu.open {
        " MENU ".to_string()
    } else if app.launcher.open {
        " APPS ".to_string()
    } else if app.external().is_some() {
        " EXTERNAL ".to_string()
    } else {
        format!(" {} ", app.route().title())
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |k: &'static str, label: &'static str| {
        [Span::styled(k, key_style), Span::styled(label, label_style)]
    };

    let mut hints: Vec<Span> = Vec::new();
    if app.menu.open {
        hints.extend(hint(" j/k ", " nav "));
        hints.extend(hint(" Enter ", " go "));
        hints.extend(hint(" Esc ", " close "));
    } else if app.launcher.open {
        hints.extend(hint(" h/j/k/l ", " move "));
        hints.extend(hint(" Enter ", " open "));
        hints.extend(hint(" Esc ", " close "));
    } else {
        match (app.input_mode, app.focus) {
            (InputMode::Editing, FocusPane::Search) => {
                hints.extend(hint(" Enter ", " search "));
                hints.extend(hint(" ^L ", " clear "));
                hints.extend(hint(" Esc ", " close "));
            }
            (InputMode::Editing, FocusPane::Chat) => {
                hints.extend(hint(" Enter ", " send "));
                hints.extend(hint(" Esc ", " stop typing "));
            }
            _ => {
                hints.extend(hint(" m ", " menu "));
                hints.extend(hint(" a ", " apps "));
                hints.extend(hint(" / ", " search "));
                hints.extend(hint(" 1-4 ", " links "));
                if app.external().is_some() {
                    hints.extend(hint(" o ", " browser "));
                } else if app.page().and_then(|p| p.tab_bar()).is_some() {
                    hints.extend(hint(" Tab ", " tabs "));
                }
                hints.extend(hint(" h ", " home "));
                if app.chat.is_open() {
                    hints.extend(hint(" z ", " min "));
                    hints.extend(hint(" x ", " close chat "));
                } else {
                    hints.extend(hint(" c ", " AVA "));
                }
                hints.extend(hint(" q ", " quit "));
            }
        }
    }

    let footer_content = Line::from(
        vec![Span::styled(mode_text, mode_style), Span::styled(" ", label_style)]
            .into_iter()
            .chain(hints)
            .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_external(frame: &mut Frame, area: Rect, url: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" External content ");

    let text = Text::from(vec![
        Line::default(),
        Line::from(Span::styled(url.to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
        Line::default(),
        Line::from(Span::styled(
            "This target renders outside the terminal. Press o to open it in your browser.",
            Style::default().fg(MUTED),
        )),
    ]);

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_page(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(page) = app.page().cloned() else {
        return;
    };
    let area = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };

    let content = match page.tab_bar() {
        Some((titles, active)) => {
            let [title_area, tab_area, content_area] = Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .areas(area);
            render_page_title(frame, title_area, &page);
            render_tab_bar(app, frame, tab_area, &titles, active);
            content_area
        }
        None => area,
    };

    match page {
        PageState::Dashboard => render_dashboard(frame, content),
        PageState::Deploy(tabs) => render_deploy(frame, content, tabs.active()),
        PageState::Monitor(tabs) => render_monitor(frame, content, tabs.active()),
        PageState::Shell(shell, tabs) => render_shell(frame, content, shell, tabs.active()),
        PageState::NotFound(path) => render_not_found(frame, content, &path),
    }
}

fn render_page_title(frame: &mut Frame, area: Rect, page: &PageState) {
    let (icon, title, accent, action) = match page {
        PageState::Deploy(_) => ("⇪", "Deploy", ColorTag::Orange, Some("New Deployment")),
        PageState::Monitor(_) => ("∿", "Monitor", ColorTag::Cyan, Some("New Dashboard")),
        PageState::Shell(shell, _) => (shell.icon, shell.title, shell.accent, shell.action),
        PageState::Dashboard | PageState::NotFound(_) => return,
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(Color::Black).bg(accent.color())),
        Span::raw(" "),
        Span::styled(title, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ];
    if let Some(action) = action {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!(" + {} ", action),
            Style::default().fg(Color::White).bg(ACCENT),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tab_bar(app: &mut App, frame: &mut Frame, area: Rect, titles: &[&str], active: usize) {
    let mut x = area.x;
    let mut spans = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        let text = format!(" {} ", title);
        let width = text.chars().count() as u16;
        app.areas.tabs.push(Rect::new(x, area.y, width, 1));
        x = x.saturating_add(width + 1);

        let style = if i == active {
            Style::default().fg(ACCENT).bg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_dashboard(frame: &mut Frame, area: Rect) {
    let [title_area, sections_area, lists_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(5 * dashboard::SECTIONS.len() as u16),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled("Dashboard", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
        title_area,
    );

    let rows = Layout::vertical(
        dashboard::SECTIONS.iter().map(|_| Constraint::Length(5)),
    )
    .split(sections_area);

    for (section, row) in dashboard::SECTIONS.iter().zip(rows.iter()) {
        let [label_area, cards_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(4)]).areas(*row);
        frame.render_widget(
            Paragraph::new(Span::styled(section.title, Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))),
            label_area,
        );

        let cols = Layout::horizontal(
            section.cards.iter().map(|_| Constraint::Ratio(1, section.cards.len() as u32)),
        )
        .split(cards_area);
        for (card, col) in section.cards.iter().zip(cols.iter()) {
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{} ", card.icon), card.color.tile_style()),
                Span::styled(card.value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ])];
            if let (Some(trend), Some(color)) = (card.trend, card.trend_color()) {
                lines.push(Line::from(Span::styled(
                    format!("{} vs last week", trend),
                    Style::default().fg(color),
                )));
            }
            frame.render_widget(Paragraph::new(lines).block(card_block(card.title)), *col);
        }
    }

    let [events_area, tickets_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(lists_area);

    let events: Vec<Line> = dashboard::EVENTS
        .iter()
        .map(|e| {
            Line::from(vec![
                Span::styled(format!("{:>9}  ", e.time), Style::default().fg(MUTED)),
                Span::styled(e.title, Style::default().fg(Color::White)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(events).block(card_block("▥ Upcoming Events")), events_area);

    let tickets: Vec<Line> = dashboard::TICKETS
        .iter()
        .map(|t| {
            Line::from(vec![
                Span::styled(format!("{}  ", t.id), Style::default().fg(MUTED)),
                Span::styled(format!("{}  ", t.title), Style::default().fg(Color::White)),
                badge(t.priority.label(), t.priority.color()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(tickets).block(card_block("☑ Active Tickets")), tickets_area);
}

fn render_deploy(frame: &mut Frame, content_area: Rect, tab: DeployTab) {
    match tab {
        DeployTab::Environments => {
            let rows = Layout::vertical(ENVIRONMENTS.iter().map(|_| Constraint::Length(4)))
                .split(content_area);
            for (env, row) in ENVIRONMENTS.iter().zip(rows.iter()) {
                let lines = vec![
                    Line::from(vec![
                        Span::styled(format!("{}  ", env.region), Style::default().fg(MUTED)),
                        badge(env.status.label(), env.status.color()),
                        Span::raw("   "),
                        Span::styled(env.version, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                    ]),
                    Line::from(vec![
                        Span::styled(
                            format!("Last deploy: {}", format_timestamp(env.last_deploy)),
                            Style::default().fg(MUTED),
                        ),
                        Span::raw("   "),
                        Span::styled("[Deploy]", Style::default().fg(ACCENT)),
                        Span::styled(" [View Logs]", Style::default().fg(ACCENT)),
                    ]),
                ];
                frame.render_widget(Paragraph::new(lines).block(card_block(env.name)), *row);
            }
        }
        DeployTab::Deployments => {
            let rows = Layout::vertical(DEPLOYMENTS.iter().map(|_| Constraint::Length(4)))
                .split(content_area);
            for (deployment, row) in DEPLOYMENTS.iter().zip(rows.iter()) {
                let lines = vec![
                    Line::from(vec![
                        badge(deployment.status.label(), deployment.status.color()),
                        Span::styled(
                            format!("  Duration: {}", deployment.duration),
                            Style::default().fg(MUTED),
                        ),
                    ]),
                    Line::from(vec![
                        Span::styled(
                            format!(
                                "{} by {}",
                                format_timestamp(deployment.timestamp),
                                deployment.triggered_by
                            ),
                            Style::default().fg(MUTED),
                        ),
                        Span::raw("   "),
                        Span::styled("[View Details]", Style::default().fg(ACCENT)),
                        Span::styled(" [Download Logs]", Style::default().fg(ACCENT)),
                    ]),
                ];
                let title = format!("{} {}", deployment.environment, deployment.version);
                frame.render_widget(Paragraph::new(lines).block(card_block(&title)), *row);
            }
        }
    }
}

fn render_monitor(frame: &mut Frame, content_area: Rect, tab: MonitorTab) {
    match tab {
        MonitorTab::Metrics => {
            let [cards_area, chart_area] =
                Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).areas(content_area);
            let cols = Layout::horizontal(METRICS.iter().map(|_| Constraint::Ratio(1, METRICS.len() as u32)))
                .split(cards_area);
            for (metric, col) in METRICS.iter().zip(cols.iter()) {
                let lines = vec![Line::from(vec![
                    Span::styled("● ", Style::default().fg(metric.health.color())),
                    Span::styled(metric.value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(metric.change, Style::default().fg(metric.trend.color())),
                ])];
                frame.render_widget(Paragraph::new(lines).block(card_block(metric.name)), *col);
            }
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Chart placeholder - Add your preferred charting library",
                    Style::default().fg(MUTED),
                ))
                .alignment(Alignment::Center)
                .block(card_block("Performance Overview")),
                chart_area,
            );
        }
        MonitorTab::Alerts => {
            let rows = Layout::vertical(ALERTS.iter().map(|_| Constraint::Length(4)))
                .split(content_area);
            for (alert, row) in ALERTS.iter().zip(rows.iter()) {
                let mut actions = vec![Span::styled("[View Details]", Style::default().fg(ACCENT))];
                if alert.status == crate::pages::monitor::AlertStatus::Active {
                    actions.push(Span::styled(" [Acknowledge]", Style::default().fg(ACCENT)));
                }
                let mut second = vec![Span::styled(
                    format!("Triggered: {}   ", format_timestamp(alert.timestamp)),
                    Style::default().fg(MUTED),
                )];
                second.extend(actions);

                let lines = vec![
                    Line::from(vec![
                        Span::styled("▲ ", Style::default().fg(alert.severity.color())),
                        Span::styled(format!("{}  ", alert.service), Style::default().fg(MUTED)),
                        badge(alert.severity.label(), alert.severity.color()),
                        Span::raw(" "),
                        badge(alert.status.label(), alert.status.color()),
                    ]),
                    Line::from(second),
                ];
                frame.render_widget(Paragraph::new(lines).block(card_block(alert.title)), *row);
            }
        }
    }
}

fn render_shell(frame: &mut Frame, content_area: Rect, shell: &ShellPage, tab: ShellTab) {
    let items = shell.items_for(tab);
    let rows = Layout::vertical(items.iter().map(|_| Constraint::Length(3))).split(content_area);
    for (item, row) in items.iter().zip(rows.iter()) {
        let line = Line::from(vec![
            badge(item.tag, item.color.color()),
            Span::raw("  "),
            Span::styled(item.detail, Style::default().fg(MUTED)),
        ]);
        frame.render_widget(Paragraph::new(line).block(card_block(item.title)), *row);
    }
}

fn render_not_found(frame: &mut Frame, area: Rect, path: &str) {
    let text = Text::from(vec![
        Line::default(),
        Line::from(Span::styled("404", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            format!("Page not found: {}", path),
            Style::default().fg(Color::White),
        )),
        Line::default(),
        Line::from(Span::styled("Press h to return to the dashboard", Style::default().fg(MUTED))),
    ]);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn render_menu(app: &mut App, frame: &mut Frame, body: Rect) {
    let width = 32.min(body.width);
    let panel = Rect::new(body.x, body.y, width, body.height);
    app.areas.menu_panel = Some(panel);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" myAFS.io ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled("Developer Platform ", Style::default().fg(MUTED)),
        ]));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let row_style = |row: usize| {
        if row == app.menu.selected {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let mut lines = Vec::with_capacity(MENU_ROWS + 1);
    let mut rows = Vec::with_capacity(MENU_ROWS);
    let entry_line = |entry: &MenuEntry, style: Style| {
        Line::from(vec![
            Span::styled(format!("  {} ", entry.icon), entry.color.tile_style()),
            Span::styled(format!("{:<width$}", entry.label, width = 20), style),
        ])
    };

    for (row, entry) in PRIMARY_NAV.iter().enumerate() {
        lines.push(entry_line(entry, row_style(row)));
    }
    lines.push(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Style::default().fg(MUTED),
    )));
    lines.push(entry_line(&SETTINGS_ENTRY, row_style(MENU_SETTINGS_ROW)));
    lines.push(Line::from(vec![
        Span::styled("  ⏻ ", Style::default().fg(Color::Red)),
        Span::styled(
            format!("{:<width$}", "Sign Out", width = 20),
            row_style(MENU_SIGN_OUT_ROW).fg(Color::Red),
        ),
    ]));

    for (i, _) in lines.iter().enumerate() {
        // The divider line is not a row
        if i == PRIMARY_NAV.len() {
            continue;
        }
        let y = inner.y + i as u16;
        if y < inner.bottom() {
            rows.push(Rect::new(inner.x, y, inner.width, 1));
        }
    }
    app.areas.menu_rows = rows;

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_launcher(app: &mut App, frame: &mut Frame, body: Rect) {
    let tile_width: u16 = 16;
    let internal_rows = INTERNAL_APPS.len().div_ceil(LAUNCHER_COLUMNS) as u16;
    let external_rows = EXTERNAL_APPS.len().div_ceil(LAUNCHER_COLUMNS) as u16;

    let width = (tile_width * LAUNCHER_COLUMNS as u16 + 2).min(body.width);
    let height = (internal_rows + external_rows + 4 + 2).min(body.height);
    let panel = Rect::new(
        body.right().saturating_sub(width + 1).max(body.x),
        body.y,
        width,
        height,
    );
    app.areas.launcher_panel = Some(panel);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Apps ");
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let mut y = inner.y;
    let mut index = 0;
    let mut tiles = Vec::with_capacity(catalog::launcher_len());

    for (heading, entries) in [("Internal Apps", &INTERNAL_APPS[..]), ("External Apps", &EXTERNAL_APPS[..])] {
        if y >= inner.bottom() {
            break;
        }
        frame.render_widget(
            Paragraph::new(Span::styled(heading, Style::default().fg(MUTED).add_modifier(Modifier::BOLD))),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 1;

        for chunk in entries.chunks(LAUNCHER_COLUMNS) {
            if y >= inner.bottom() {
                break;
            }
            for (col, entry) in chunk.iter().enumerate() {
                let x = inner.x + col as u16 * tile_width;
                let tile = Rect::new(x, y, tile_width.min(inner.right().saturating_sub(x)), 1);
                tiles.push(tile);

                let label_style = if index == app.launcher.selected {
                    Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let line = Line::from(vec![
                    Span::styled(format!(" {} ", entry.icon), entry.color.tile_style()),
                    Span::styled(entry.label, label_style),
                ]);
                frame.render_widget(Paragraph::new(line), tile);
                index += 1;
            }
            y += 1;
        }
        y += 1;
    }

    app.areas.launcher_tiles = tiles;
}

fn render_chat(app: &mut App, frame: &mut Frame, body: Rect) {
    let width = 46.min(body.width);

    match app.chat.panel() {
        ChatPanel::Closed => {
            let button = Rect::new(
                body.right().saturating_sub(12),
                body.bottom().saturating_sub(1),
                12.min(body.width),
                1,
            );
            app.areas.chat_button = Some(button);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" ✉ AVA ", Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD)),
                    Span::styled("●", Style::default().fg(Color::Green)),
                ])),
                button,
            );
        }
        ChatPanel::Open { minimized } => {
            let height = if minimized { 3 } else { 20.min(body.height) };
            let panel = Rect::new(
                body.right().saturating_sub(width),
                body.bottom().saturating_sub(height),
                width,
                height,
            );
            app.areas.chat_panel = Some(panel);
            frame.render_widget(Clear, panel);

            let title = Line::from(vec![
                Span::styled(" AVA ✦ ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                Span::styled("● Online ", Style::default().fg(Color::Green)),
            ]);
            let controls = Title::from(Line::from(vec![
                Span::styled(if minimized { "[□]" } else { "[_]" }, Style::default().fg(MUTED)),
                Span::styled("[✕]", Style::default().fg(MUTED)),
            ]))
            .alignment(Alignment::Right);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(title)
                .title(controls);
            let inner = block.inner(panel);
            frame.render_widget(block, panel);

            // Control hit boxes sit on the top border, right aligned
            let controls_x = panel.right().saturating_sub(7);
            app.areas.chat_minimize = Some(Rect::new(controls_x, panel.y, 3, 1));
            app.areas.chat_close = Some(Rect::new(controls_x + 3, panel.y, 3, 1));

            if minimized || inner.height < 3 {
                return;
            }

            let [messages_area, input_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(inner);
            render_chat_messages(app, frame, messages_area);
            render_chat_input(app, frame, input_area);
        }
    }
}

fn render_chat_messages(app: &App, frame: &mut Frame, area: Rect) {
    let wrap_width = (area.width as usize).saturating_sub(4).max(8);
    let mut lines: Vec<Line> = Vec::new();

    for msg in app.chat.messages() {
        let (who, color, align) = match msg.sender {
            Sender::User => ("You", Color::Cyan, Alignment::Right),
            Sender::Assistant => ("AVA", ACCENT, Alignment::Left),
        };
        lines.push(
            Line::from(vec![
                Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!(" {}", msg.timestamp.format("%H:%M:%S")),
                    Style::default().fg(MUTED),
                ),
            ])
            .alignment(align),
        );
        for wrapped in wrap_text_to_width(&msg.text, wrap_width) {
            lines.push(Line::from(wrapped).alignment(align));
        }
        lines.push(Line::default());
    }

    if app.chat.is_composing() {
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat(app.animation_frame as usize + 1);
        lines.push(Line::from(vec![
            Span::styled("AVA", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" is typing{}", dots),
                Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    // Keep the latest message in view
    let scroll = (lines.len() as u16).saturating_sub(area.height);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

fn render_chat_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing && app.focus == FocusPane::Chat;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::Yellow } else { MUTED }));

    let input = app.chat.input();
    let content = if input.text().is_empty() && !editing {
        Span::styled("Ask me anything...", Style::default().fg(MUTED))
    } else {
        Span::raw(input.text().to_string())
    };

    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(content).block(block), area);

    if editing {
        frame.set_cursor_position((offset_column(inner, input.cursor_width()), inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::nav::{NavTarget, Route};
    use crate::app::NavSource;
    use crate::handler::handle_event;
    use crate::tui::AppEvent;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use crate::store::LocalStore;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::tempdir;
    use tokio::sync::mpsc;

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut out = String::new();
        for row in buffer.content.chunks(width) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    fn click(x: u16, y: u16) -> AppEvent {
        AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn with_app(f: impl FnOnce(&mut App)) {
        let dir = tempdir().unwrap();
        let mut store = LocalStore::open(dir.path().join("storage.json")).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), &mut store, tx);
        f(&mut app);
    }

    #[test]
    fn test_wrap_text_to_width() {
        assert_eq!(wrap_text_to_width("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap_text_to_width("", 10), vec![String::new()]);
    }

    #[test]
    fn test_dashboard_renders_sections() {
        with_app(|app| {
            let screen = draw(app);
            assert!(screen.contains("DORA Metrics"));
            assert!(screen.contains("Deployment Frequency"));
            assert!(screen.contains("Security & Infrastructure"));
            assert!(screen.contains("myAFS.io"));
        });
    }

    #[test]
    fn test_every_route_renders() {
        with_app(|app| {
            for path in ["/plan", "/design", "/code", "/test", "/deploy", "/monitor", "/settings", "/nowhere"] {
                app.navigate(NavTarget::internal(path), NavSource::TopBar);
                let screen = draw(app);
                assert!(screen.contains(app.route().title()) || screen.contains("Page not found"), "{path}");
            }
        });
    }

    #[test]
    fn test_deploy_environments_listed() {
        with_app(|app| {
            app.navigate(NavTarget::Internal(Route::Deploy), NavSource::TopBar);
            let screen = draw(app);
            for name in ["Production", "Staging", "Development"] {
                assert!(screen.contains(name), "{name}");
            }
            assert_eq!(app.areas.tabs.len(), 2);
        });
    }

    #[test]
    fn test_monitor_alerts_tab() {
        with_app(|app| {
            app.navigate(NavTarget::Internal(Route::Monitor), NavSource::TopBar);
            app.select_tab(1);
            let screen = draw(app);
            assert!(screen.contains("High Memory Usage"));
            assert!(screen.contains("API Latency Spike"));
            assert!(!screen.contains("API Response Time"));
        });
    }

    #[test]
    fn test_external_panel_replaces_page() {
        with_app(|app| {
            app.navigate(NavTarget::external("https://outlook.office365.us/mail/"), NavSource::Launcher);
            let screen = draw(app);
            assert!(screen.contains("External content"));
            assert!(screen.contains("https://outlook.office365.us/mail/"));
            assert!(!screen.contains("DORA Metrics"));
        });
    }

    #[test]
    fn test_overlays_render_and_record_hit_areas() {
        with_app(|app| {
            app.open_menu();
            let screen = draw(app);
            assert!(screen.contains("Sign Out"));
            assert_eq!(app.areas.menu_rows.len(), MENU_ROWS);

            app.open_launcher();
            let screen = draw(app);
            assert!(screen.contains("Internal Apps"));
            assert!(screen.contains("Cayosoft"));
            assert_eq!(app.areas.launcher_tiles.len(), catalog::launcher_len());
        });
    }

    #[test]
    fn test_chat_panel_renders_welcome() {
        with_app(|app| {
            let screen = draw(app);
            assert!(screen.contains("AVA"));
            assert!(app.areas.chat_button.is_some());

            app.open_chat();
            let screen = draw(app);
            assert!(screen.contains("Online"));
            assert!(screen.contains("Hello!"));

            app.toggle_chat_minimize();
            let screen = draw(app);
            assert!(!screen.contains("Hello!"));
        });
    }

    #[test]
    fn test_menu_row_click_skips_divider() {
        with_app(|app| {
            app.open_menu();
            draw(app);
            let row = app.areas.menu_rows[MENU_SETTINGS_ROW];
            handle_event(app, click(row.x + 2, row.y));
            assert!(!app.menu.open);
            assert_eq!(app.route(), &Route::Settings);
        });
    }

    #[test]
    fn test_search_clear_hit_area_follows_text() {
        with_app(|app| {
            app.focus_search();
            for c in "api".chars() {
                app.search.input_mut().insert(c);
            }
            draw(app);
            let clear = app.areas.search_clear.unwrap();
            assert!(app.areas.search.unwrap().intersects(clear));

            handle_event(app, click(clear.x, clear.y));
            assert_eq!(app.search.input().text(), "");
            assert!(app.search.is_focused());
        });
    }

    #[test]
    fn test_long_input_keeps_cursor_in_field() {
        with_app(|app| {
            app.open_chat();
            for _ in 0..400 {
                app.chat.input_mut().insert('漢');
            }
            let screen = draw(app);
            assert!(screen.contains("漢"));
        });
    }
}
