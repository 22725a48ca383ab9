use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::game::{Game, Phase, Visual};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const HINT_STRIP_LINES: u16 = 4;

impl Widget for &Game {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let dim_italic_style = Style::default()
            .patch(dim_style)
            .add_modifier(Modifier::ITALIC);
        let underlined_dim_style = Style::default()
            .patch(dim_style)
            .add_modifier(Modifier::UNDERLINED);

        if self.is_complete() {
            render_completion(self, area, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1), // progress
                    Constraint::Min(1),    // problem rows
                    Constraint::Length(HINT_STRIP_LINES),
                    Constraint::Length(1), // action hint
                ]
                .as_ref(),
            )
            .split(area);

        let progress = Paragraph::new(Span::styled(
            format!(
                "{}/{}",
                self.session().solved_count(),
                self.session().total_problems()
            ),
            dim_style,
        ))
        .alignment(Alignment::Right);
        progress.render(chunks[0], buf);

        // Problem rows, most recent last. Operands are right-aligned so the
        // equals signs line up down the column.
        let mut lines: Vec<Line> = Vec::new();
        for entry in self.session().entries() {
            let p = entry.problem;
            let lhs = format!("{} × {:>2} = ", p.multiplier, p.operand);
            let is_current = self.session().current_id() == Some(entry.id);

            let mut spans = vec![Span::styled(lhs, bold_style)];
            match self.entry_visual(entry.id) {
                Visual::Correct => {
                    spans.push(Span::styled(p.answer.to_string(), green_bold_style));
                }
                Visual::Wrong => {
                    spans.push(Span::styled(self.input().to_string(), red_bold_style));
                }
                Visual::Neutral => {
                    if is_current {
                        spans.push(Span::styled(self.input().to_string(), bold_style));
                        if self.input_enabled() {
                            spans.push(Span::styled(" ", underlined_dim_style));
                        }
                    }
                }
            }
            lines.push(Line::from(spans));
        }

        // Show only as many rows as fit, keeping the current one visible
        let visible = chunks[1].height as usize;
        let skip = lines.len().saturating_sub(visible);
        let pad = block_padding(self, chunks[1].width);
        let rows: Vec<Line> = lines
            .into_iter()
            .skip(skip)
            .map(|l| {
                let mut spans = vec![Span::raw(" ".repeat(pad))];
                spans.extend(l.spans);
                Line::from(spans)
            })
            .collect();
        Paragraph::new(rows).render(chunks[1], buf);

        render_hint_strip(self, chunks[2], buf);

        let action = if self.check_enabled() {
            Span::styled("[enter] check", bold_style)
        } else {
            Span::styled("[enter] check", dim_style)
        };
        let footer = Line::from(vec![
            action,
            Span::raw("   "),
            Span::styled("(esc) quit", dim_italic_style),
        ]);
        Paragraph::new(footer)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

/// Left padding that centers the problem column inside `width`.
fn block_padding(game: &Game, width: u16) -> usize {
    let widest = game
        .session()
        .entries()
        .iter()
        .map(|e| {
            let p = e.problem;
            format!("{} × {:>2} = {}", p.multiplier, p.operand, p.answer).width()
        })
        .max()
        .unwrap_or(0);
    ((width as usize).saturating_sub(widest)) / 2
}

/// The cube hint: one cube per unit of the multiplier, rising from the
/// bottom of the strip while the hint animation plays.
fn render_hint_strip(game: &Game, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let multiplier = game.config().multiplier as usize;
    let cubes = vec!["■"; multiplier].join(" ");

    let travel = area.height.saturating_sub(1) as f64;
    let offset = ((1.0 - game.hint_progress()) * travel).round() as u16;

    let style = if game.phase() == Phase::Hint {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM)
    };

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..area.height {
        if row == offset {
            lines.push(Line::from(Span::styled(cubes.clone(), style)));
        } else {
            lines.push(Line::default());
        }
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_completion(game: &Game, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1), // banner
                Constraint::Length(1),
                Constraint::Length(1), // keys
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    let banner = Paragraph::new(Span::styled(
        format!(
            "Congratulations! You solved all {} problems!",
            game.session().total_problems()
        ),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    banner.render(chunks[1], buf);

    let keys = Paragraph::new(Span::styled(
        "(r)estart  (esc) quit",
        Style::default()
            .add_modifier(Modifier::DIM)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    keys.render(chunks[3], buf);
}
