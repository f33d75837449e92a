//! Stateless UI rendering for the prize ladder.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::games::ladder::{FeedbackOutcome, GameView, LADDER, OptionLabel};

use super::app::{describe_hint, format_prize};

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, view: &GameView, status: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Body
            Constraint::Length(3), // Status
            Constraint::Length(1), // Key help
        ])
        .split(frame.area());

    let title = Paragraph::new("Strictly Millions")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(chunks[1]);

    if view.question.is_some() {
        draw_question(frame, body[0], view);
    } else {
        draw_feedback(frame, body[0], view);
    }
    draw_sidebar(frame, body[1], view);

    let status_text = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);

    let help = Paragraph::new(
        "a-d answer  Enter continue  s stop  p skip  u audience  e cards  i AI  r restart  q quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_question(frame: &mut Frame, area: Rect, view: &GameView) {
    let Some(question) = &view.question else {
        return;
    };

    let mut lines = Vec::new();
    if view.is_million_question {
        lines.push(Line::from(Span::styled(
            "MILLION QUESTION! No help available. A wrong answer loses everything.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        question.prompt.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    for option in &question.options {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", option.label),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::raw(format!("  {}", option.text)),
        ]));
    }
    if !view.hints.is_empty() {
        lines.push(Line::default());
        for hint in &view.hints {
            lines.push(Line::from(Span::styled(
                describe_hint(hint),
                Style::default().fg(Color::Magenta),
            )));
        }
    }

    let title = format!(
        " Question {}/{} for {} ",
        view.question_number,
        view.total_questions,
        format_prize(view.prize_at_stake)
    );
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_feedback(frame: &mut Frame, area: Rect, view: &GameView) {
    let mut lines = Vec::new();
    if let Some(feedback) = &view.feedback {
        let question = feedback.question();
        lines.push(Line::from(Span::styled(
            question.prompt().clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        for (label, text) in question.options().iter() {
            lines.push(review_line(
                label,
                text,
                *question.correct(),
                *feedback.selected(),
                *feedback.outcome(),
            ));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(format!(
        "Banked: {}",
        format_prize(view.accumulated)
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Review ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn review_line(
    label: OptionLabel,
    text: &str,
    correct: OptionLabel,
    selected: Option<OptionLabel>,
    outcome: FeedbackOutcome,
) -> Line<'static> {
    if label == correct {
        Line::from(Span::styled(
            format!(" {label}  {text}  (correct)"),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else if outcome == FeedbackOutcome::Wrong && selected == Some(label) {
        Line::from(Span::styled(
            format!(" {label}  {text}  (your answer)"),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(format!(" {label}  {text}"))
    }
}

fn draw_sidebar(frame: &mut Frame, area: Rect, view: &GameView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let stop = view
        .stop_prize
        .map(format_prize)
        .unwrap_or_else(|| "-".to_string());
    let prizes = Paragraph::new(vec![
        Line::from(format!("At stake:  {}", format_prize(view.prize_at_stake))),
        Line::from(format!("Banked:    {}", format_prize(view.accumulated))),
        Line::from(format!("If stop:   {stop}")),
        Line::from(format!("If wrong:  {}", format_prize(view.forfeit_if_wrong))),
    ])
    .block(Block::default().title(" Prizes ").borders(Borders::ALL));
    frame.render_widget(prizes, rows[0]);

    let flag = |available: bool, name: &str| {
        let style = if available {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Line::from(Span::styled(name.to_string(), style))
    };
    let lifelines = Paragraph::new(vec![
        flag(
            view.lifelines.skip,
            &format!("[p] Skip ({})", view.skips_remaining),
        ),
        flag(view.lifelines.audience, "[u] Audience"),
        flag(view.lifelines.cards, "[e] Cards"),
        flag(view.lifelines.ai, "[i] Virtual assistant"),
    ])
    .block(Block::default().title(" Help ").borders(Borders::ALL));
    frame.render_widget(lifelines, rows[1]);

    let ladder: Vec<Line> = LADDER
        .iter()
        .enumerate()
        .rev()
        .map(|(position, prize)| {
            let style = if position == view.position && !view.ended {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else if position < view.position {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("{:>2}  {}", position + 1, format_prize(*prize)),
                style,
            ))
        })
        .collect();
    let ladder = Paragraph::new(ladder).block(Block::default().title(" Ladder ").borders(Borders::ALL));
    frame.render_widget(ladder, rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ladder::{
        GameController, Question, QuestionOptions, QuestionPool, TOTAL_QUESTIONS,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn rendered(view: &GameView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, view, "status line")).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn controller() -> GameController<StdRng> {
        let questions = (0..TOTAL_QUESTIONS)
            .map(|i| {
                Question::new(
                    format!("Prompt number {i}"),
                    QuestionOptions::new(
                        "Alpha".to_string(),
                        "Bravo".to_string(),
                        "Charlie".to_string(),
                        "Delta".to_string(),
                    ),
                    OptionLabel::C,
                )
            })
            .collect();
        GameController::start(Arc::new(QuestionPool::new(questions)), StdRng::seed_from_u64(4))
            .unwrap()
    }

    #[test]
    fn test_renders_question_and_options() {
        let controller = controller();
        let screen = rendered(&controller.view());
        assert!(screen.contains("Prompt number"));
        assert!(screen.contains("Charlie"));
        assert!(screen.contains("status line"));
    }

    #[test]
    fn test_renders_review_after_wrong_answer() {
        let mut controller = controller();
        let view = controller.answer(OptionLabel::A).unwrap();
        let screen = rendered(&view);
        assert!(screen.contains("Review"));
        assert!(screen.contains("(correct)"));
        assert!(screen.contains("(your answer)"));
    }
}
