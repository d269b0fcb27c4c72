use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::game::{BurstColor, GameSession, Phase};
use crate::metrics::SessionMetrics;

const HEAD_COLOR: Color = Color::Cyan;
const BODY_COLOR: Color = Color::Green;
const DASH_BODY_COLOR: Color = Color::Cyan;
const PICKUP_COLOR: Color = Color::Magenta;
const CIRCUIT_COLOR: Color = Color::DarkGray;

/// Terminal renderer for the pixel-space playfield
///
/// One grid cell maps to a two-character terminal cell. The circuit-line
/// backdrop always animates; the snake, pickup and particles only appear
/// while a run is live, with start/game-over panels layered over the field
/// otherwise.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        session: &GameSession,
        metrics: &SessionMetrics,
        volume: f32,
        muted: bool,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Playfield
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], session, metrics);

        // Center the playfield horizontally
        let field_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let field = self.render_field(session);
        frame.render_widget(field, field_area);

        match session.phase {
            Phase::Idle => frame.render_widget(self.render_start_panel(), overlay(field_area)),
            Phase::GameOver => {
                frame.render_widget(self.render_game_over(session), overlay(field_area))
            }
            Phase::Running => {}
        }

        let controls = self.render_controls(session, volume, muted);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        session: &GameSession,
        metrics: &SessionMetrics,
    ) {
        let columns = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(area);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:03}", session.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:03}", metrics.high_score),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), columns[0]);

        if session.config.dash_enabled {
            let stamina = &session.snake.stamina;
            let color = if stamina.dashing {
                DASH_BODY_COLOR
            } else if stamina.value <= session.config.dash_min_stamina {
                Color::Red
            } else {
                BODY_COLOR
            };
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(" Stamina "))
                .gauge_style(Style::default().fg(color))
                .ratio(stamina.ratio(&session.config) as f64)
                .label(format!("{:.0}", stamina.value));
            frame.render_widget(gauge, columns[1]);
        }
    }

    fn render_field(&self, session: &GameSession) -> Paragraph<'_> {
        let config = &session.config;
        let (cols, rows) = (config.cols() as usize, config.rows() as usize);
        let mut cells = vec![vec![(". ", Style::default().fg(Color::Black)); cols]; rows];

        let paint = |cells: &mut Vec<Vec<(&'static str, Style)>>, px: i32, py: i32, glyph, style| {
            let (cx, cy) = (px.div_euclid(config.grid), py.div_euclid(config.grid));
            if cx >= 0 && (cx as usize) < cols && cy >= 0 && (cy as usize) < rows {
                cells[cy as usize][cx as usize] = (glyph, style);
            }
        };

        // Circuit-line backdrop
        for line in &session.background.lines {
            let glyph = if line.horizontal { "──" } else { "│ " };
            let style = Style::default().fg(CIRCUIT_COLOR).add_modifier(Modifier::DIM);
            let steps = (line.length / config.grid as f32).ceil() as i32;
            for i in 0..steps.max(1) {
                let (px, py) = if line.horizontal {
                    (line.x as i32 + i * config.grid, line.y as i32)
                } else {
                    (line.x as i32, line.y as i32 + i * config.grid)
                };
                paint(&mut cells, px, py, glyph, style);
            }
        }

        if session.phase == Phase::Running {
            let body_color = if session.snake.stamina.dashing {
                DASH_BODY_COLOR
            } else {
                BODY_COLOR
            };
            for p in session.snake.trail.iter().skip(1) {
                paint(
                    &mut cells,
                    p.x,
                    p.y,
                    "□ ",
                    Style::default().fg(body_color),
                );
            }

            paint(
                &mut cells,
                session.pickup.pos.x,
                session.pickup.pos.y,
                "◆ ",
                Style::default()
                    .fg(PICKUP_COLOR)
                    .add_modifier(Modifier::BOLD),
            );

            for p in session.particles.iter() {
                let color = match p.color {
                    BurstColor::Pink => PICKUP_COLOR,
                    BurstColor::Teal => DASH_BODY_COLOR,
                };
                let style = if p.life > 0.5 {
                    Style::default().fg(color)
                } else {
                    Style::default().fg(color).add_modifier(Modifier::DIM)
                };
                paint(&mut cells, p.x as i32, p.y as i32, "· ", style);
            }

            let head = match session.snake.vel {
                (vx, _) if vx > 0 => "▶ ",
                (vx, _) if vx < 0 => "◀ ",
                (_, vy) if vy > 0 => "▼ ",
                (_, vy) if vy < 0 => "▲ ",
                _ => "■ ",
            };
            paint(
                &mut cells,
                session.snake.pos.x,
                session.snake.pos.y,
                head,
                Style::default()
                    .fg(HEAD_COLOR)
                    .add_modifier(Modifier::BOLD),
            );
        }

        let lines: Vec<Line> = cells
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|(glyph, style)| Span::styled(glyph, style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Neon Serpent "),
            )
            .alignment(Alignment::Center)
    }

    fn render_start_panel(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "NEON SERPENT",
                Style::default()
                    .fg(HEAD_COLOR)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(HEAD_COLOR)),
        )
    }

    fn render_game_over(&self, session: &GameSession) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SYSTEM FAILURE",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, session: &GameSession, volume: f32, muted: bool) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(HEAD_COLOR)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(HEAD_COLOR)),
            Span::raw(" to steer | "),
        ];
        if session.config.dash_enabled {
            spans.push(Span::styled("Space", Style::default().fg(HEAD_COLOR)));
            spans.push(Span::raw(" to dash | "));
        }
        spans.push(Span::styled("M", Style::default().fg(HEAD_COLOR)));
        spans.push(Span::raw(" mute | "));
        spans.push(Span::styled("+/-", Style::default().fg(HEAD_COLOR)));
        let volume_label = if muted {
            " vol (muted) | ".to_string()
        } else {
            format!(" vol {:.0}% | ", volume * 100.0)
        };
        spans.push(Span::raw(volume_label));
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" quit"));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Centered overlay box inside the playfield area
fn overlay(area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(area)[1];
    Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical)[1]
}
