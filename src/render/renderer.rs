use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::game::{Position, SnakeState};
use crate::menu::{Menu, MenuEntry};

const HEAD_GLYPH: &str = "O";
const BODY_GLYPH: &str = "o";
const FOOD_GLYPH: &str = "*";
const EMPTY_GLYPH: &str = " ";

/// Width of the boxes used for the menu and text screens
const PANEL_WIDTH: u16 = 36;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the playfield, the score line and, once the game is over, the final score
    pub fn render_game(&self, frame: &mut Frame, state: &SnakeState) {
        let board_width = to_u16(state.grid_width).saturating_add(2);
        let board_height = to_u16(state.grid_height).saturating_add(2);

        let [board_area, score_area, footer_area] = Layout::vertical([
            Constraint::Length(board_height),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .flex(Flex::Center)
        .areas(frame.area());

        let [board_area] = center_horizontally(board_area, board_width);
        let [score_area] = center_horizontally(score_area, board_width);
        let [footer_area] = center_horizontally(footer_area, board_width);

        frame.render_widget(self.render_grid(state), board_area);
        frame.render_widget(self.render_score(state), score_area);

        let footer = if state.is_running() {
            self.render_controls()
        } else {
            self.render_game_over(state)
        };
        frame.render_widget(footer, footer_area);
    }

    /// Draw the main menu with the selected entry highlighted
    pub fn render_menu(&self, frame: &mut Frame, menu: &Menu) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Snake Game",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for entry in MenuEntry::ALL {
            let line = if entry == menu.selected() {
                Line::from(Span::styled(
                    format!("> {}", entry.label()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::raw(format!("  {}", entry.label())))
            };
            lines.push(line);
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "↑↓ to choose, Enter to confirm",
            Style::default().fg(Color::DarkGray),
        )));

        self.render_panel(frame, " Menu ", lines);
    }

    /// Draw the high score table; `scores` is already sorted and truncated
    pub fn render_high_scores(&self, frame: &mut Frame, scores: &[u32]) {
        let mut lines = vec![
            Line::from(Span::styled(
                "High Scores:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if scores.is_empty() {
            lines.push(Line::from("No scores yet."));
        }
        for (rank, score) in scores.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>2}. ", rank + 1), Style::default().fg(Color::Gray)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(press_any_key());

        self.render_panel(frame, " High Scores ", lines);
    }

    /// Draw the static help screen
    pub fn render_help(&self, frame: &mut Frame) {
        let key_style = Style::default().fg(Color::Cyan);
        let lines = vec![
            Line::from(Span::styled(
                "Controls:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Arrow Keys / WASD", key_style),
                Span::raw(" - Move"),
            ]),
            Line::from(vec![
                Span::styled("Q / Esc", key_style),
                Span::raw(" - Quit Game"),
            ]),
            Line::from(""),
            press_any_key(),
        ];

        self.render_panel(frame, " Controls ", lines);
    }

    fn render_grid(&self, state: &SnakeState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                // Head first, so it covers stale food once the board is full
                let cell = if pos == head {
                    Span::styled(
                        HEAD_GLYPH,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled(BODY_GLYPH, Style::default().fg(Color::Green))
                } else if pos == state.food && state.is_running() {
                    Span::styled(
                        FOOD_GLYPH,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw(EMPTY_GLYPH)
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let border_color = if state.is_running() {
            Color::White
        } else {
            Color::Red
        };

        Paragraph::new(lines).block(
            Block::bordered()
                .border_type(BorderType::Plain)
                .border_style(Style::default().fg(border_color)),
        )
    }

    fn render_score(&self, state: &SnakeState) -> Paragraph<'_> {
        Paragraph::new(Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
    }

    fn render_game_over(&self, state: &SnakeState) -> Paragraph<'_> {
        let reason = state
            .end_reason()
            .map(|reason| reason.describe())
            .unwrap_or("Game over");

        let text = vec![
            Line::from(vec![
                Span::styled(
                    "Game Over! ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled(reason, Style::default().fg(Color::Gray)),
                Span::styled(" - press any key to return.", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text)
    }

    fn render_panel(&self, frame: &mut Frame, title: &str, lines: Vec<Line<'_>>) {
        let height = to_u16(lines.len()).saturating_add(2);
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(frame.area());
        let [area] = center_horizontally(area, PANEL_WIDTH);

        let panel = Paragraph::new(lines).alignment(Alignment::Left).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::White))
                .title(title.to_string()),
        );
        frame.render_widget(panel, area);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn press_any_key() -> Line<'static> {
    Line::from(Span::styled(
        "Press any key to return.",
        Style::default().fg(Color::DarkGray),
    ))
}

fn center_horizontally(area: Rect, width: u16) -> [Rect; 1] {
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area)
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
