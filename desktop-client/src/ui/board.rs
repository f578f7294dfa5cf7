use common::tictactoe::{BOARD_SIZE, Mark, Position};
use egui::{Color32, Painter, Rect, Sense, Stroke, Ui, pos2, vec2};

use crate::state::ViewState;

pub struct BoardView {
    last_hover: Option<Position>,
}

impl BoardView {
    const MIN_CELL_SIZE: f32 = 40.0;
    const MAX_CELL_SIZE: f32 = 140.0;
    const LINE_WIDTH: f32 = 2.0;
    const MARK_WIDTH: f32 = 5.0;

    pub fn new() -> Self {
        Self { last_hover: None }
    }

    fn calculate_cell_size(available_width: f32, available_height: f32) -> f32 {
        let cell_size = available_width.min(available_height) / BOARD_SIZE as f32;
        cell_size.clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE)
    }

    fn cell_rect(board_rect: Rect, position: Position, cell_size: f32) -> Rect {
        Rect::from_min_size(
            pos2(
                board_rect.left() + position.col as f32 * cell_size,
                board_rect.top() + position.row as f32 * cell_size,
            ),
            vec2(cell_size, cell_size),
        )
    }

    /// Draws the grid and returns the cell the user clicked, if any.
    pub fn render(&mut self, ui: &mut Ui, view: &ViewState) -> Option<Position> {
        let cell_size = Self::calculate_cell_size(ui.available_width(), ui.available_height());
        let board_size = cell_size * BOARD_SIZE as f32;

        let (rect, response) =
            ui.allocate_exact_size(vec2(board_size, board_size), Sense::click());
        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, Color32::from_rgb(240, 240, 240));

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let position = Position::new(row, col);
                if Self::is_winning_cell(view, position) {
                    painter.rect_filled(
                        Self::cell_rect(rect, position, cell_size),
                        0.0,
                        Color32::from_rgb(200, 240, 200),
                    );
                }
            }
        }

        for i in 1..BOARD_SIZE {
            let offset = i as f32 * cell_size;
            let stroke = Stroke::new(Self::LINE_WIDTH, Color32::BLACK);
            painter.line_segment(
                [pos2(rect.left() + offset, rect.top()), pos2(rect.left() + offset, rect.bottom())],
                stroke,
            );
            painter.line_segment(
                [pos2(rect.left(), rect.top() + offset), pos2(rect.right(), rect.top() + offset)],
                stroke,
            );
        }

        for (row, cells) in view.board.rows().iter().enumerate() {
            for (col, mark) in cells.iter().enumerate() {
                let cell_rect = Self::cell_rect(rect, Position::new(row, col), cell_size);
                match mark {
                    Mark::X => self.draw_x(painter, cell_rect),
                    Mark::O => self.draw_o(painter, cell_rect),
                    Mark::Empty => {}
                }
            }
        }

        if let Some(line) = view.winning_line {
            let start = Self::cell_rect(rect, line.start(), cell_size).center();
            let end = Self::cell_rect(rect, line.end(), cell_size).center();
            painter.line_segment(
                [start, end],
                Stroke::new(Self::MARK_WIDTH, Color32::from_rgb(40, 160, 40)),
            );
        }

        if view.is_game_over() {
            self.last_hover = None;
            return None;
        }

        self.last_hover = response
            .hover_pos()
            .map(|pos| {
                Position::new(
                    ((pos.y - rect.top()) / cell_size) as usize,
                    ((pos.x - rect.left()) / cell_size) as usize,
                )
            })
            .filter(|position| position.is_on_board() && view.board.get(*position) == Mark::Empty);

        if let Some(position) = self.last_hover {
            painter.rect_filled(
                Self::cell_rect(rect, position, cell_size),
                0.0,
                Color32::from_rgba_unmultiplied(100, 150, 255, 50),
            );
        }

        if response.clicked() {
            return self.last_hover;
        }
        None
    }

    fn is_winning_cell(view: &ViewState, position: Position) -> bool {
        view.winning_line
            .is_some_and(|line| line.contains(position))
    }

    fn draw_x(&self, painter: &Painter, rect: Rect) {
        let padding = rect.width() * 0.2;
        let stroke = Stroke::new(Self::MARK_WIDTH, Color32::from_rgb(220, 50, 50));

        painter.line_segment(
            [
                pos2(rect.left() + padding, rect.top() + padding),
                pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );
        painter.line_segment(
            [
                pos2(rect.right() - padding, rect.top() + padding),
                pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(&self, painter: &Painter, rect: Rect) {
        let padding = rect.width() * 0.2;
        let radius = (rect.width() / 2.0) - padding;
        let stroke = Stroke::new(Self::MARK_WIDTH, Color32::from_rgb(50, 50, 220));

        painter.circle_stroke(rect.center(), radius, stroke);
    }
}
