use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::profile::{ProfileStatus, ProfileSummary};
use crate::storage::SlotStore;
use crate::tabs::Tab;
use crate::todo::{Filter, RenderedItem};

use super::app::{AppState, StatusKind, TodoFocus};

const CHECK_WIDTH: usize = 3;
const HELP_KEY_WIDTH: usize = 14;
const LABEL_WIDTH: usize = 10;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_DETAIL: Color = Color::Rgb(180, 156, 92);

pub fn render<S: SlotStore>(frame: &mut Frame, app: &AppState<S>) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_tabs(frame, app, chunks[0]);
    match app.tabs.active() {
        Tab::Todo => render_todo(frame, app, chunks[1]),
        Tab::Profile => render_profile(frame, app, chunks[1]),
    }
    render_footer(frame, app, chunks[2]);
}

fn render_tabs<S: SlotStore>(frame: &mut Frame, app: &AppState<S>, area: Rect) {
    let mut spans = Vec::new();
    for (idx, tab) in Tab::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", Style::default().fg(COLOR_MUTED_DARK)));
        }
        let (text, color) = match tab {
            Tab::Todo => (
                format!("{} ({})", tab.label(), app.todo.view().counters.pending),
                COLOR_INFO,
            ),
            Tab::Profile => (tab.label().to_string(), COLOR_ACCENT),
        };
        let style = if app.tabs.active() == *tab {
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(text, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_todo<S: SlotStore>(frame: &mut Frame, app: &AppState<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let focused = app.focus == TodoFocus::Input;
    render_input(
        frame,
        chunks[0],
        "New task",
        app.todo.input(),
        "What needs to be done?",
        focused,
    );
    render_list(frame, app, chunks[1]);
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let line = if value.is_empty() {
        let mut spans = Vec::new();
        if focused {
            spans.push(caret_span());
        }
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(COLOR_MUTED_DARK),
        ));
        Line::from(spans)
    } else {
        let mut spans = vec![Span::styled(
            value.to_string(),
            Style::default().fg(COLOR_TEXT),
        )];
        if focused {
            spans.push(caret_span());
        }
        Line::from(spans)
    };
    let border = if focused {
        COLOR_ACCENT
    } else {
        COLOR_BORDER_LIST
    };
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(widget, area);
}

fn render_list<S: SlotStore>(frame: &mut Frame, app: &AppState<S>, area: Rect) {
    let view = app.todo.view();
    let content_width = area.width.saturating_sub(2) as usize;
    let mut lines = vec![filter_line(view.filter), Line::from("")];

    if view.is_empty() {
        let message = match view.filter {
            Filter::All => "No tasks",
            Filter::Pending => "No pending tasks",
            Filter::Completed => "No completed tasks",
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(COLOR_MUTED),
        )));
    } else {
        let help_reserved = if app.show_help { HELP_LINES + 1 } else { 0 };
        let list_height = area
            .height
            .saturating_sub(2)
            .saturating_sub(lines.len() as u16)
            .saturating_sub(help_reserved as u16) as usize;
        let list_focused = app.focus == TodoFocus::List;
        let (start, end) = list_window(view.len(), Some(app.selected), list_height);
        for (row, item) in view.items.iter().enumerate().take(end).skip(start) {
            let selected = list_focused && row == app.selected;
            lines.push(render_list_row(item, selected, content_width));
        }
    }

    if app.show_help {
        lines.push(Line::from(""));
        lines.extend(build_list_help_lines(content_width));
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Tasks")
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn filter_line(active: Filter) -> Line<'static> {
    let mut spans = vec![Span::styled("filter: ", Style::default().fg(COLOR_MUTED))];
    for (idx, filter) in Filter::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *filter == active {
            Style::default()
                .fg(COLOR_WARNING)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_MUTED_DARK)
        };
        spans.push(Span::styled(filter.as_str().to_string(), style));
    }
    Line::from(spans)
}

fn render_list_row(item: &RenderedItem, selected: bool, width: usize) -> Line<'static> {
    let task = &item.task;
    let (mark, mark_color) = if task.completed() {
        ("[x]", COLOR_SUCCESS)
    } else {
        ("[ ]", COLOR_MUTED)
    };
    let text_width = width.saturating_sub(CHECK_WIDTH + 1);
    let mut text_style = Style::default().fg(COLOR_TEXT);
    if task.completed() {
        text_style = text_style
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    let mut mark_style = Style::default().fg(mark_color);
    if selected {
        text_style = text_style.bg(COLOR_BG_MUTED).add_modifier(Modifier::BOLD);
        mark_style = mark_style.bg(COLOR_BG_MUTED);
    }
    Line::from(vec![
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(pad_text(task.text(), text_width), text_style),
    ])
}

fn render_profile<S: SlotStore>(frame: &mut Frame, app: &AppState<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    render_input(
        frame,
        chunks[0],
        "GitHub username",
        app.profile.input(),
        "octocat",
        true,
    );

    let content_width = chunks[1].width.saturating_sub(2) as usize;
    let lines = match app.profile.status() {
        ProfileStatus::Idle => vec![Line::from(Span::styled(
            "Enter a username and press enter",
            Style::default().fg(COLOR_MUTED),
        ))],
        ProfileStatus::Loading(username) => vec![Line::from(Span::styled(
            format!("Loading {username}..."),
            Style::default().fg(COLOR_INFO),
        ))],
        ProfileStatus::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        ))],
        ProfileStatus::Loaded(summary) => build_profile_lines(summary, content_width),
    };

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Profile")
                .border_style(Style::default().fg(COLOR_BORDER_DETAIL)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, chunks[1]);
}

fn build_profile_lines(summary: &ProfileSummary, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                summary.name.clone(),
                Style::default()
                    .fg(COLOR_TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("@{}", summary.login),
                Style::default().fg(COLOR_ACCENT),
            ),
        ]),
        Line::from(Span::styled(
            truncate_text(&summary.bio, width.max(1) * 4),
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(""),
        Line::from(vec![
            stat_span(summary.public_repos, "repos"),
            Span::raw("   "),
            stat_span(summary.followers, "followers"),
            Span::raw("   "),
            stat_span(summary.following, "following"),
        ]),
        Line::from(""),
    ];
    for (label, value) in [
        ("Company", &summary.company),
        ("Location", &summary.location),
        ("Email", &summary.email),
        ("Website", &summary.blog),
        ("Twitter", &summary.twitter),
    ] {
        lines.push(detail_line(label, value, width));
    }
    if let Some(url) = summary.profile_url.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            url.to_string(),
            Style::default()
                .fg(COLOR_INFO)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines
}

fn stat_span(value: u64, label: &str) -> Span<'static> {
    Span::styled(
        format!("{value} {label}"),
        Style::default().fg(COLOR_SUCCESS),
    )
}

fn detail_line(label: &str, value: &str, width: usize) -> Line<'static> {
    let value_width = width.saturating_sub(LABEL_WIDTH + 1);
    Line::from(vec![
        Span::styled(pad_text(label, LABEL_WIDTH), Style::default().fg(COLOR_MUTED)),
        Span::raw(" "),
        Span::styled(
            truncate_text(value, value_width),
            Style::default().fg(COLOR_TEXT),
        ),
    ])
}

fn render_footer<S: SlotStore>(frame: &mut Frame, app: &AppState<S>, area: Rect) {
    let hint = app.footer_hint();
    let hint_span = Span::styled(hint, Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let counts_line = Line::from(Span::styled(
        app.task_count_summary(),
        Style::default().fg(COLOR_ACCENT),
    ));
    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

const HELP_LINES: usize = 10;

fn build_list_help_lines(width: usize) -> Vec<Line<'static>> {
    vec![
        help_header("More commands"),
        help_line("j/k or up/down", "move selection", width),
        help_line("space/x", "toggle task", width),
        help_line("d", "delete task", width),
        help_line("a/p/c", "show all, pending, completed", width),
        help_line("i/enter", "focus input", width),
        help_line("1/2", "switch tab", width),
        help_line("tab", "next tab", width),
        help_line("q", "quit", width),
        help_line("?", "hide help", width),
    ]
}

fn help_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(COLOR_INFO).add_modifier(Modifier::BOLD),
    ))
}

fn help_line(keys: &str, desc: &str, width: usize) -> Line<'static> {
    let key_text = pad_text(keys, HELP_KEY_WIDTH.min(width));
    let desc_width = width.saturating_sub(HELP_KEY_WIDTH + 1);
    Line::from(vec![
        Span::styled(
            key_text,
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(truncate_text(desc, desc_width), Style::default().fg(COLOR_MUTED)),
    ])
}

fn caret_span() -> Span<'static> {
    Span::styled("_", Style::default().fg(COLOR_ACCENT))
}

fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if total == 0 || height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn pad_text(value: &str, width: usize) -> String {
    let text = truncate_text(value, width);
    format!("{text:width$}")
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}
