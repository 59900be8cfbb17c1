use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::game::{Grid, GridGeometry, Position, Snapshot};
use crate::metrics::GameMetrics;

const SNAKE_PINK: Color = Color::Rgb(255, 120, 200);
const SNAKE_BORDER: Color = Color::Rgb(200, 70, 160);
const FOOD_COLOR: Color = Color::Rgb(250, 220, 100);

/// Draws the grid of a snapshot, one `cell_size`-square block per cell
pub struct Board<'a> {
    snapshot: &'a Snapshot,
    grid: Grid,
    geometry: GridGeometry,
}

impl<'a> Board<'a> {
    pub fn new(snapshot: &'a Snapshot, grid: Grid, geometry: GridGeometry) -> Self {
        Self {
            snapshot,
            grid,
            geometry,
        }
    }

    fn paint(&self, area: Rect, buf: &mut Buffer, cell: Position, symbol: &str, style: Style) {
        let (px, py) = self.geometry.cell_to_pixel(cell);
        if px < 0 || py < 0 {
            return;
        }
        let size = self.geometry.cell_size() as i32;

        for dy in 0..size {
            for dx in 0..size {
                let x = area.x as i32 + px + dx;
                let y = area.y as i32 + py + dy;
                if x >= area.right() as i32 || y >= area.bottom() as i32 {
                    continue;
                }
                if let Some(target) = buf.cell_mut((x as u16, y as u16)) {
                    target.set_symbol(symbol).set_style(style);
                }
            }
        }
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let empty = Style::default().fg(Color::DarkGray);
        for cell in self.grid.cells() {
            self.paint(area, buf, cell, "·", empty);
        }

        let food = Style::default().fg(FOOD_COLOR).add_modifier(Modifier::BOLD);
        self.paint(area, buf, self.snapshot.food, "●", food);

        let mut segments = self.snapshot.snake_body.iter();
        let head = segments.next();
        for &segment in segments {
            if self.grid.contains(segment) {
                self.paint(area, buf, segment, "▓", Style::default().fg(SNAKE_PINK));
            }
        }
        if let Some(&head) = head {
            let style = Style::default()
                .fg(SNAKE_BORDER)
                .add_modifier(Modifier::BOLD);
            self.paint(area, buf, head, "█", style);
        }
    }
}

pub struct Renderer {
    geometry: GridGeometry,
}

impl Renderer {
    pub fn new(cell_size: u32) -> Self {
        Self {
            geometry: GridGeometry::new(cell_size.max(1)),
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot,
        grid: Grid,
        metrics: &GameMetrics,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        let (width, height) = self.geometry.pixel_size(grid);
        let board_area = centered(chunks[1], width as u16 + 2, height as u16 + 2);

        if snapshot.complete {
            frame.render_widget(self.render_banner(snapshot, true), chunks[1]);
        } else if !snapshot.alive {
            frame.render_widget(self.render_banner(snapshot, false), chunks[1]);
        } else {
            let title = if paused { " Paused " } else { " Snake " };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title);
            let inner = block.inner(board_area);
            frame.render_widget(block, board_area);
            frame.render_widget(Board::new(snapshot, grid, self.geometry), inner);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(snapshot.speed.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_banner(&self, snapshot: &Snapshot, won: bool) -> Paragraph<'_> {
        let (title, color) = if won {
            ("YOU WIN", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press R to restart or Esc to quit",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled("WASD", key),
            Span::raw(" to move | "),
            Span::styled("Space", key),
            Span::raw(" pause | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(2)
    }
}

/// A `width`x`height` rect centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn snapshot() -> Snapshot {
        Snapshot {
            snake_body: vec![
                Position::new(2, 5),
                Position::new(1, 5),
                Position::new(0, 5),
                Position::new(-1, 5),
            ],
            food: Position::new(4, 0),
            score: 3,
            alive: true,
            speed: 11,
            complete: false,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_board_places_cells() {
        let grid = Grid::new(5, 10);
        let area = Rect::new(0, 0, 10, 20);
        let mut buf = Buffer::empty(area);
        let snapshot = snapshot();

        Board::new(&snapshot, grid, GridGeometry::new(2)).render(area, &mut buf);

        // head (2,5) covers columns 4-5, rows 10-11
        assert_eq!(buf.cell((4, 10)).unwrap().symbol(), "█");
        assert_eq!(buf.cell((5, 11)).unwrap().symbol(), "█");
        assert_eq!(buf.cell((2, 10)).unwrap().symbol(), "▓");
        assert_eq!(buf.cell((0, 10)).unwrap().symbol(), "▓");
        assert_eq!(buf.cell((8, 0)).unwrap().symbol(), "●");
        assert_eq!(buf.cell((6, 10)).unwrap().symbol(), "·");
    }

    #[test]
    fn test_board_clips_to_area() {
        let grid = Grid::new(5, 10);
        let area = Rect::new(0, 0, 3, 3);
        let mut buf = Buffer::empty(area);
        let snapshot = snapshot();

        Board::new(&snapshot, grid, GridGeometry::new(2)).render(area, &mut buf);
        assert_eq!(buf.cell((2, 2)).unwrap().symbol(), "·");
    }

    #[test]
    fn test_render_running_frame() {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        let renderer = Renderer::new(2);
        let metrics = GameMetrics::new();
        let snapshot = snapshot();

        terminal
            .draw(|frame| renderer.render(frame, &snapshot, Grid::new(5, 10), &metrics, false))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 3"));
        assert!(text.contains("Speed: 11"));
        assert!(text.contains("Snake"));
    }

    #[test]
    fn test_render_banners() {
        let renderer = Renderer::new(2);
        let metrics = GameMetrics::new();

        let mut dead = snapshot();
        dead.alive = false;
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, &dead, Grid::new(5, 10), &metrics, false))
            .unwrap();
        assert!(screen_text(&terminal).contains("GAME OVER"));

        let mut won = snapshot();
        won.complete = true;
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, &won, Grid::new(5, 10), &metrics, false))
            .unwrap();
        assert!(screen_text(&terminal).contains("YOU WIN"));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 40, 40), area);
    }
}
