//! TUI Rendering
//!
//! Landing hero plus the modal overlay hosting the wizard or file picker.

use super::app::App;
use super::events::AppMode;
use super::file_picker::{FilePicker, VISIBLE_ITEMS};
use super::wizard_render;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Retro terminal palette
pub const NEON_GREEN: Color = Color::Rgb(0, 255, 0);
pub const MINT: Color = Color::Rgb(0, 255, 153);
pub const DIM_GREEN: Color = Color::Rgb(0, 128, 0);

/// Render the entire UI
pub fn render(f: &mut Frame, app: &App) {
    render_landing(f, app);

    match app.mode {
        AppMode::Landing => {}
        AppMode::Wizard => wizard_render::render_wizard(f, app),
        AppMode::FilePicker => {
            if let Some(ref picker) = app.file_picker {
                render_file_picker(f, picker);
            }
        }
    }
}

/// Area of `width` x `height` centered in `area`, clamped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_landing(f: &mut Frame, app: &App) {
    let area = f.area();
    let button_style = if app.mode == AppMode::Landing {
        Style::default()
            .fg(Color::Black)
            .bg(NEON_GREEN)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM_GREEN)
    };

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled("·", Style::default().fg(DIM_GREEN))),
        Line::from(""),
        Line::from(Span::styled("🎮", Style::default().fg(NEON_GREEN))),
        Line::from(""),
        Line::from(Span::styled(
            "G A M E   C R E A T O R",
            Style::default()
                .fg(NEON_GREEN)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Create and share your games with just a few clicks. Start your journey now.",
            Style::default().fg(NEON_GREEN),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(" ▶ Create a Game ", button_style)),
        Line::from(""),
    ];

    if let Some(ref notice) = app.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(MINT),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled(
            "[Enter] ",
            Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Create  ", Style::default().fg(Color::White)),
        Span::styled(
            "[q] ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Quit", Style::default().fg(Color::White)),
    ]));

    let hero_area = centered_rect(area, area.width, lines.len() as u16);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, hero_area);
}

fn render_file_picker(f: &mut Frame, picker: &FilePicker) {
    let area = centered_rect(f.area(), 70, VISIBLE_ITEMS as u16 + 8);
    let mut lines: Vec<Line<'static>> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            "📁 ",
            Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            picker.current_dir.to_string_lossy().to_string(),
            Style::default().fg(MINT),
        ),
    ]));
    lines.push(Line::from(""));

    let start = picker.scroll_offset;
    let end = (start + VISIBLE_ITEMS).min(picker.entries.len());

    for (idx, path) in picker
        .entries
        .iter()
        .enumerate()
        .skip(start)
        .take(end - start)
    {
        let is_selected = idx == picker.selected;
        let is_dir = path.is_dir();
        let mark = if is_dir {
            "   "
        } else if picker.is_marked(path) {
            "[x]"
        } else {
            "[ ]"
        };

        let name = if path.ends_with("..") {
            "..".to_string()
        } else {
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "?".to_string())
        };
        let label = if is_dir { format!("{}/", name) } else { name };

        let style = if is_selected {
            Style::default()
                .fg(Color::Black)
                .bg(NEON_GREEN)
                .add_modifier(Modifier::BOLD)
        } else if is_dir {
            Style::default().fg(MINT)
        } else {
            Style::default().fg(NEON_GREEN)
        };

        let prefix = if is_selected { "▶ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{} {}", mark, label), style),
        ]));
    }

    if picker.entries.len() > VISIBLE_ITEMS {
        lines.push(Line::from(Span::styled(
            format!(
                "Showing {}-{} of {} entries",
                start + 1,
                end,
                picker.entries.len()
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            "[↑↓] ",
            Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Move  ", Style::default().fg(Color::White)),
        Span::styled(
            "[Space] ",
            Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("Mark ({})  ", picker.marked.len()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            "[Enter] ",
            Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Open/Confirm  ", Style::default().fg(Color::White)),
        Span::styled(
            "[Esc] ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Cancel", Style::default().fg(Color::White)),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(NEON_GREEN))
            .title(Span::styled(
                " Select Game Files ",
                Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
