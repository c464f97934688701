//! Windowed front end.
//!
//! Draws the board with `x = col` and `y = row`, so pieces fall down the
//! screen. Platforms are thick lines on the grid line under their square.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::Config;
use crate::game::Game;
use crate::platforms::MAX_PLATFORMS;
use crate::position::{Board, Color, Piece, PieceType, Square, SquareState};
use crate::selection::{can_place_any, lane_is_selectable, Outcome, Selection, Target};
use crate::utils::contains;

/// Thickness of a drawn platform, and half the height of a lane's hit band.
const LANE_PX: f32 = 6.0;

const LIGHT_SQUARE: egui::Color32 = egui::Color32::from_rgb(240, 217, 181);
const DARK_SQUARE: egui::Color32 = egui::Color32::from_rgb(181, 136, 99);
const SELECTED: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const HOVERED: egui::Color32 = egui::Color32::from_rgb(255, 245, 150);

pub struct GravityChessApp {
    game: Game,
    selection: Selection,
    config: Config,
    frames: VecDeque<Board>,
    last_frame: Instant,
    message: Option<String>,
}

impl GravityChessApp {
    fn new(_cc: &eframe::CreationContext<'_>, config: Config, game: Game) -> Self {
        Self {
            game,
            selection: Selection::new(),
            config,
            frames: VecDeque::new(),
            last_frame: Instant::now(),
            message: None,
        }
    }

    fn animating(&self) -> bool {
        !self.frames.is_empty()
    }

    /// The board to draw: the current gravity frame, or the settled board.
    fn shown_board(&self) -> Board {
        self.frames.front().copied().unwrap_or(self.game.state().board)
    }

    fn start_animation(&mut self) {
        let mut frames = self.game.take_gravity_frames();
        frames.dedup();
        self.frames = frames.into();
        self.last_frame = Instant::now();
    }

    fn advance_animation(&mut self, ctx: &egui::Context) {
        if self.frames.is_empty() {
            return;
        }
        let delay = Duration::from_millis(self.config.gravity_frame_ms);
        if self.last_frame.elapsed() >= delay {
            self.frames.pop_front();
            self.last_frame = Instant::now();
        }
        if !self.frames.is_empty() {
            ctx.request_repaint_after(delay);
        }
    }

    fn handle_click(&mut self, target: Target) {
        match self.selection.click(&mut self.game, target) {
            Outcome::Committed => {
                self.message = None;
                self.start_animation();
            }
            Outcome::Rejected(rejection) => {
                debug!("click on {:?} rejected: {}", target, rejection);
                self.message = Some(rejection.to_string());
            }
            Outcome::PromotionPending => self.message = None,
            Outcome::Selected | Outcome::Deselected | Outcome::Ignored => {}
        }
    }

    fn new_game(&mut self) {
        self.game.reset();
        self.selection.clear();
        self.frames.clear();
        self.message = None;
    }

    fn draw_board(&mut self, ui: &mut egui::Ui) {
        let board_size = ui.available_width().min(ui.available_height()) - 20.0;
        let cell = board_size / 8.0;
        let board_rect = egui::Rect::from_min_size(ui.cursor().min, egui::vec2(board_size, board_size));
        let response = ui.allocate_rect(board_rect, egui::Sense::click());
        let painter = ui.painter();

        let board = self.shown_board();
        let state = *self.game.state();
        let idle = !self.animating() && state.promotion_pending.is_none();
        let hover = match response.hover_pos() {
            Some(pos) if idle => hit_test(pos, board_rect, LANE_PX),
            _ => Target::Nothing,
        };

        for row in 0..8 {
            for col in 0..8 {
                let square = Square::new(row, col);
                let rect = egui::Rect::from_min_size(
                    egui::pos2(board_rect.min.x + col as f32 * cell, board_rect.min.y + row as f32 * cell),
                    egui::vec2(cell, cell),
                );

                let own_piece = board.state(square) == SquareState::Occupied(state.turn);
                let color = if self.selection.piece() == Some(square) {
                    SELECTED
                } else if hover == Target::Square(square) && own_piece {
                    HOVERED
                } else if (row + col) % 2 == 0 {
                    LIGHT_SQUARE
                } else {
                    DARK_SQUARE
                };
                painter.rect_filled(rect, 0.0, color);

                if self.config.show_legal_moves && contains(self.selection.highlights(), square) {
                    painter.circle_filled(rect.center(), cell * 0.15, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 70));
                }

                if let Some(piece) = board.get(square) {
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        glyph(piece),
                        egui::FontId::proportional(cell * 0.8),
                        if piece.color == Color::White {
                            egui::Color32::WHITE
                        } else {
                            egui::Color32::BLACK
                        },
                    );
                }
            }
        }

        for row in 0..7 {
            for col in 0..8 {
                let lane = Square::new(row, col);
                let value = state.platforms.get(lane);
                let highlighted = self.selection.lane() == Some(lane)
                    || (hover == Target::Lane(lane) && lane_is_selectable(&state, lane));
                let stroke_color = if highlighted {
                    SELECTED
                } else if value > 0 {
                    egui::Color32::BLACK
                } else {
                    continue;
                };

                let y = board_rect.min.y + (row + 1) as f32 * cell;
                let x0 = board_rect.min.x + col as f32 * cell;
                painter.line_segment(
                    [egui::pos2(x0, y), egui::pos2(x0 + cell, y)],
                    egui::Stroke::new(LANE_PX, stroke_color),
                );
                // Half-moves left until the platform unlocks.
                if value > 1 {
                    painter.text(
                        egui::pos2(x0 + cell * 0.5, y - LANE_PX),
                        egui::Align2::CENTER_BOTTOM,
                        (value - 1).to_string(),
                        egui::FontId::proportional(cell * 0.2),
                        egui::Color32::RED,
                    );
                }
            }
        }

        if idle && response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.handle_click(hit_test(pos, board_rect, LANE_PX));
            }
        }
    }

    fn draw_status(&mut self, ui: &mut egui::Ui) {
        let state = *self.game.state();
        ui.heading("Gravity Chess");
        ui.separator();

        match state.end_state.message(state.turn) {
            Some(text) => {
                ui.label(egui::RichText::new(text).size(20.0).strong());
            }
            None => {
                ui.label(format!("{} to move", state.turn));
                if self.game.is_in_check(state.turn) {
                    ui.colored_label(egui::Color32::RED, "Check!");
                }
            }
        }

        ui.separator();
        ui.label(format!("Platforms: {}/{}", state.active_platforms(), MAX_PLATFORMS));
        for color in [Color::White, Color::Black] {
            let text = if can_place_any(&state, color) {
                "platform available"
            } else if state.has_platformed(color) {
                "must move a piece first"
            } else {
                "no platforms left"
            };
            ui.label(format!("{}: {}", color, text));
        }

        if let Some(message) = &self.message {
            ui.colored_label(egui::Color32::from_rgb(200, 80, 80), message);
        }

        ui.separator();
        if ui.button("New game").clicked() {
            self.new_game();
        }
    }

    fn draw_promotion(&mut self, ctx: &egui::Context) {
        if self.game.state().promotion_pending.is_none() {
            return;
        }
        let color = self.game.turn();
        let mut choice = None;
        egui::Window::new("Promote pawn")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for piece_type in PieceType::PROMOTIONS {
                        let label = egui::RichText::new(glyph(Piece::new(color, piece_type))).size(40.0);
                        if ui.button(label).clicked() {
                            choice = Some(piece_type);
                        }
                    }
                });
            });

        if let Some(piece_type) = choice {
            match self.game.resolve_promotion(piece_type) {
                Ok(()) => self.start_animation(),
                Err(rejection) => self.message = Some(rejection.to_string()),
            }
        }
    }
}

impl eframe::App for GravityChessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance_animation(ctx);

        egui::SidePanel::right("status").min_width(200.0).show(ctx, |ui| {
            self.draw_status(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_board(ui);
        });

        self.draw_promotion(ctx);
    }
}

/// Resolves a pointer position over `board` to a square or a lane.
///
/// A pointer within `lane_px` of an interior horizontal grid line targets the
/// lane of the square above that line; anywhere else targets the square under
/// the pointer.
pub fn hit_test(pos: egui::Pos2, board: egui::Rect, lane_px: f32) -> Target {
    if !board.contains(pos) {
        return Target::Nothing;
    }
    let cell = board.width() / 8.0;
    let x = (pos.x - board.min.x) / cell;
    let y = (pos.y - board.min.y) / cell;
    let col = (x.floor() as i32).min(7);

    let band = lane_px / cell;
    let near_line = y.fract() < band || y.fract() > 1.0 - band;
    if near_line && y > 0.5 && y < 7.5 {
        return Target::Lane(Square::new(y.round() as i32 - 1, col));
    }
    Target::Square(Square::new((y.floor() as i32).min(7), col))
}

fn glyph(piece: Piece) -> &'static str {
    match (piece.piece_type, piece.color) {
        (PieceType::Pawn, Color::White) => "♙",
        (PieceType::Knight, Color::White) => "♘",
        (PieceType::Bishop, Color::White) => "♗",
        (PieceType::Rook, Color::White) => "♖",
        (PieceType::Queen, Color::White) => "♕",
        (PieceType::King, Color::White) => "♔",
        (PieceType::Pawn, Color::Black) => "♟",
        (PieceType::Knight, Color::Black) => "♞",
        (PieceType::Bishop, Color::Black) => "♝",
        (PieceType::Rook, Color::Black) => "♜",
        (PieceType::Queen, Color::Black) => "♛",
        (PieceType::King, Color::Black) => "♚",
    }
}

pub fn run_gui(config: Config, game: Game) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(config.window_width, config.window_height)),
        ..Default::default()
    };
    eframe::run_native(
        "Gravity Chess",
        options,
        Box::new(move |cc| Box::new(GravityChessApp::new(cc, config, game))),
    )
}
