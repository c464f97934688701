//! Click-driven selection.
//!
//! Two sub-machines share one [`Selection`]: a piece can be selected and its
//! legal destinations highlighted, or a platform lane can be selected and
//! then placed on, moved or removed. Only one is active at a time; a click on
//! a square drops any lane selection and vice versa.

use crate::chess_move::PlatformAction;
use crate::error::Rejection;
use crate::game::{Game, GameState};
use crate::platforms::MAX_PLATFORMS;
use crate::position::{Color, Square, SquareState};
use crate::utils::{contains, Bitboard};

/// What a pointer position resolves to on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Square(Square),
    /// The lane under the given square.
    Lane(Square),
    Nothing,
}

/// Result of feeding one click into a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Selected,
    Deselected,
    Committed,
    PromotionPending,
    Rejected(Rejection),
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    piece: Option<Square>,
    highlights: Bitboard,
    lane: Option<Square>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn piece(&self) -> Option<Square> {
        self.piece
    }

    /// Legal destinations of the selected piece.
    pub fn highlights(&self) -> Bitboard {
        self.highlights
    }

    pub fn lane(&self) -> Option<Square> {
        self.lane
    }

    /// Feeds a click on `target` into the selection, committing a move or a
    /// platform action on `game` when the click completes one.
    pub fn click(&mut self, game: &mut Game, target: Target) -> Outcome {
        let state = game.state();
        if state.end_state.is_over() || state.promotion_pending.is_some() {
            return Outcome::Ignored;
        }
        match target {
            Target::Square(square) => self.click_square(game, square),
            Target::Lane(lane) => self.click_lane(game, lane),
            Target::Nothing => Outcome::Ignored,
        }
    }

    fn click_square(&mut self, game: &mut Game, square: Square) -> Outcome {
        self.lane = None;

        if let Some(from) = self.piece {
            if contains(self.highlights, square) {
                self.piece = None;
                self.highlights = 0;
                return match game.apply_move(from, square) {
                    Ok(()) if game.state().promotion_pending.is_some() => Outcome::PromotionPending,
                    Ok(()) => Outcome::Committed,
                    Err(rejection) => Outcome::Rejected(rejection),
                };
            }
        }

        let mover = game.turn();
        if game.state().board.state(square) != SquareState::Occupied(mover) {
            // A stray click keeps an existing piece selection.
            return Outcome::Ignored;
        }

        let moves = game.legal_moves(square);
        if moves == 0 {
            let had_selection = self.piece.take().is_some();
            self.highlights = 0;
            return if had_selection { Outcome::Deselected } else { Outcome::Ignored };
        }
        self.piece = Some(square);
        self.highlights = moves;
        Outcome::Selected
    }

    fn click_lane(&mut self, game: &mut Game, lane: Square) -> Outcome {
        let state = *game.state();
        let mover = state.turn;
        if state.has_platformed(mover) {
            return Outcome::Ignored;
        }
        self.piece = None;
        self.highlights = 0;

        let selected = match self.lane {
            None => {
                return if lane_is_selectable(&state, lane) {
                    self.lane = Some(lane);
                    Outcome::Selected
                } else {
                    Outcome::Ignored
                };
            }
            Some(selected) => selected,
        };

        let value = state.platforms.get(lane);
        let current = state.platforms.get(selected);
        let action = match current {
            1 if lane == selected => PlatformAction::Remove(lane),
            1 if value == 0 => PlatformAction::Move { from: selected, to: lane },
            0 if lane == selected => PlatformAction::Place(lane),
            // Switch only between lanes of the same kind.
            _ if value == current && lane_is_selectable(&state, lane) => {
                self.lane = Some(lane);
                return Outcome::Selected;
            }
            _ => return Outcome::Ignored,
        };

        match game.platform_action(action) {
            Ok(()) => {
                self.lane = None;
                Outcome::Committed
            }
            Err(rejection) => Outcome::Rejected(rejection),
        }
    }
}

/// Whether the player to move may start a platform action on `lane`: an
/// active platform, or a free lane while platforms remain.
pub fn lane_is_selectable(state: &GameState, lane: Square) -> bool {
    if !crate::platforms::Platforms::has_lane(lane) || state.has_platformed(state.turn) {
        return false;
    }
    match state.platforms.get(lane) {
        1 => true,
        0 => state.active_platforms() < MAX_PLATFORMS,
        _ => false,
    }
}

/// Whether `color` may place a platform at all right now.
pub fn can_place_any(state: &GameState, color: Color) -> bool {
    !state.has_platformed(color) && state.active_platforms() < MAX_PLATFORMS
}
