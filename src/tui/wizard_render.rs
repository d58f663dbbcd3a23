//! Wizard Rendering
//!
//! Render functions for each step of the wizard modal. Pure mapping from
//! wizard state to lines; nothing here mutates state.

use super::app::App;
use super::render::{DIM_GREEN, MINT, NEON_GREEN, centered_rect};
use crate::wizard::{CodeField, DeliveryOption, DetailField, Wizard, WizardStep};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MODAL_WIDTH: u16 = 64;
/// Usable text width inside the modal borders and indent
const TEXT_WIDTH: usize = 56;
/// Lines of each code editor shown at once
const CODE_PREVIEW_LINES: usize = 3;

/// Render the wizard modal over the landing view
pub fn render_wizard(f: &mut Frame, app: &App) {
    let wizard = app.wizard();
    let step = wizard.step();
    let mut lines: Vec<Line<'static>> = Vec::new();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        render_progress_dots(step),
        Style::default().fg(DIM_GREEN),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        step.title().to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    match step {
        WizardStep::Naming => render_naming(&mut lines, wizard),
        WizardStep::ChoosingOption => render_choosing(&mut lines, app.option_cursor),
        WizardStep::EnteringDetails(DeliveryOption::Url) => render_url(&mut lines, wizard),
        WizardStep::EnteringDetails(DeliveryOption::Code) => {
            render_code(&mut lines, wizard, app.code_focus)
        }
        WizardStep::EnteringDetails(DeliveryOption::Upload) => {
            render_upload(&mut lines, wizard, app.drop_flash > 0)
        }
    }

    if let Some(ref notice) = app.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  ! {}", notice),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(""));
    lines.push(render_footer(step));

    let height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect(f.area(), MODAL_WIDTH, height);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(NEON_GREEN))
                .title(Span::styled(
                    format!(" Create a Game ({}/{}) ", step.index() + 1, WizardStep::total()),
                    Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

/// Filled dots for reached steps, hollow for the rest
fn render_progress_dots(step: WizardStep) -> String {
    let current = step.index();
    let dots = (0..WizardStep::total())
        .map(|i| if i <= current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ");
    format!("  {}", dots)
}

/// Style for a button that may be disabled
pub fn button_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(NEON_GREEN)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }
}

fn button(label: &str, enabled: bool) -> Span<'static> {
    Span::styled(format!("[ {} ]", label), button_style(enabled))
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Text input rendered as a bordered-looking box line, with a cursor
fn input_lines(value: &str, placeholder: &str, focused: bool, max_lines: usize) -> Vec<Line<'static>> {
    let border = if focused { NEON_GREEN } else { DIM_GREEN };
    let cursor = if focused { "█" } else { "" };

    if value.is_empty() {
        return vec![Line::from(vec![
            Span::styled("  │ ", Style::default().fg(border)),
            Span::styled(cursor.to_string(), Style::default().fg(NEON_GREEN)),
            Span::styled(placeholder.to_string(), Style::default().fg(DIM_GREEN)),
        ])];
    }

    let all: Vec<&str> = value.split('\n').collect();
    let skip = all.len().saturating_sub(max_lines);
    let last = all.len() - 1;
    all.iter()
        .enumerate()
        .skip(skip)
        .map(|(i, line)| {
            let mut spans = vec![
                Span::styled("  │ ", Style::default().fg(border)),
                Span::styled(
                    truncate_to_width(line, TEXT_WIDTH),
                    Style::default().fg(NEON_GREEN),
                ),
            ];
            if i == last {
                spans.push(Span::styled(cursor.to_string(), Style::default().fg(NEON_GREEN)));
            }
            Line::from(spans)
        })
        .collect()
}

fn render_naming(lines: &mut Vec<Line<'static>>, wizard: &Wizard) {
    lines.extend(input_lines(
        wizard.game_name(),
        "Enter your game name...",
        true,
        1,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        button("Continue", wizard.can_advance()),
    ]));
}

fn render_choosing(lines: &mut Vec<Line<'static>>, cursor: usize) {
    for (i, option) in DeliveryOption::ALL.iter().enumerate() {
        let selected = i == cursor;
        let icon = match option {
            DeliveryOption::Url => "🔗",
            DeliveryOption::Code => "</>",
            DeliveryOption::Upload => "⇪",
        };
        lines.push(Line::from(vec![
            Span::styled(
                if selected { " > " } else { "   " },
                Style::default().fg(MINT),
            ),
            Span::styled(
                format!("{}. {} {}", i + 1, icon, option.label()),
                Style::default()
                    .fg(if selected { NEON_GREEN } else { DIM_GREEN })
                    .add_modifier(if selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("       {}", option.hint()),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
}

fn details_buttons(lines: &mut Vec<Line<'static>>, wizard: &Wizard) {
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        button("Back", true),
        Span::raw("  "),
        button("Submit", wizard.can_submit()),
    ]));
}

fn render_url(lines: &mut Vec<Line<'static>>, wizard: &Wizard) {
    lines.extend(input_lines(
        wizard.draft().field(DetailField::Url),
        "Enter game URL...",
        true,
        4,
    ));
    details_buttons(lines, wizard);
}

fn render_code(lines: &mut Vec<Line<'static>>, wizard: &Wizard, focus: CodeField) {
    for field in CodeField::ALL {
        let focused = field == focus;
        lines.push(Line::from(Span::styled(
            format!("  {}", field.label()),
            Style::default()
                .fg(if focused { NEON_GREEN } else { DIM_GREEN })
                .add_modifier(Modifier::BOLD),
        )));
        let placeholder = format!("Enter {} code...", field.label());
        lines.extend(input_lines(
            wizard.draft().field(DetailField::Code(field)),
            &placeholder,
            focused,
            CODE_PREVIEW_LINES,
        ));
    }
    details_buttons(lines, wizard);
}

fn render_upload(lines: &mut Vec<Line<'static>>, wizard: &Wizard, drop_active: bool) {
    let zone = if drop_active { MINT } else { NEON_GREEN };
    let edge = format!("  ┌{}┐", "╌".repeat(TEXT_WIDTH - 2));
    let bottom = format!("  └{}┘", "╌".repeat(TEXT_WIDTH - 2));
    let centered = |text: &str| {
        let pad = (TEXT_WIDTH - 2).saturating_sub(text.width());
        let left = pad / 2;
        format!("  ╎{}{}{}╎", " ".repeat(left), text, " ".repeat(pad - left))
    };
    let zone_style = Style::default().fg(zone).add_modifier(if drop_active {
        Modifier::BOLD
    } else {
        Modifier::empty()
    });

    lines.push(Line::from(Span::styled(edge, zone_style)));
    lines.push(Line::from(Span::styled(centered("⇪"), zone_style)));
    lines.push(Line::from(Span::styled(
        centered("Drag and drop your files here"),
        zone_style,
    )));
    lines.push(Line::from(Span::styled(
        centered("or press Enter to select files"),
        zone_style,
    )));
    lines.push(Line::from(Span::styled(bottom, zone_style)));

    let files = &wizard.draft().uploaded_files;
    if !files.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Uploaded Files:",
            Style::default().fg(NEON_GREEN),
        )));
        for file in files {
            let size = file.size.map(format_size).unwrap_or_default();
            let name = truncate_to_width(&file.name, TEXT_WIDTH - 4 - size.width());
            lines.push(Line::from(vec![
                Span::styled(format!("  • {}", name), Style::default().fg(NEON_GREEN)),
                Span::styled(size, Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    details_buttons(lines, wizard);
}

fn format_size(bytes: u64) -> String {
    match bytes {
        b if b >= 1024 * 1024 => format!(" ({:.1} MB)", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!(" ({:.1} KB)", b as f64 / 1024.0),
        b => format!(" ({} B)", b),
    }
}

fn render_footer(step: WizardStep) -> Line<'static> {
    let hint = |key: &str, label: &str, color: Color| {
        vec![
            Span::styled(
                format!("[{}] ", key),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{}  ", label), Style::default().fg(Color::White)),
        ]
    };

    let mut spans = vec![Span::raw(" ")];
    match step {
        WizardStep::Naming => {
            spans.extend(hint("Esc", "Close", Color::Red));
            spans.extend(hint("Enter", "Continue", NEON_GREEN));
        }
        WizardStep::ChoosingOption => {
            spans.extend(hint("Esc", "Close", Color::Red));
            spans.extend(hint("↑↓/1-3", "Choose", MINT));
            spans.extend(hint("Enter", "Select", NEON_GREEN));
        }
        WizardStep::EnteringDetails(option) => {
            spans.extend(hint("Esc", "Back", Color::Red));
            match option {
                DeliveryOption::Url => spans.extend(hint("Enter", "Submit", NEON_GREEN)),
                DeliveryOption::Code => {
                    spans.extend(hint("Tab", "Next", MINT));
                    spans.extend(hint("Ctrl+S", "Submit", NEON_GREEN));
                }
                DeliveryOption::Upload => {
                    spans.extend(hint("Enter", "Browse", MINT));
                    spans.extend(hint("Ctrl+S", "Submit", NEON_GREEN));
                }
            }
        }
    }
    Line::from(spans)
}
