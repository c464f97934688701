//! Game/turn state machine.
//!
//! [`Game`] owns the single [`GameState`] of a session and is the only thing
//! that mutates it. Every mutating call either commits completely or returns
//! a [`Rejection`] and leaves the state as it was.

use log::{debug, info, trace};

use crate::chess_move::{Move, PlatformAction};
use crate::error::{LayoutError, Rejection};
use crate::evaluation::{evaluate_with, EndType};
use crate::gravity::resolve_gravity_with;
use crate::legality::{self, play_move};
use crate::platforms::{self, Platforms, PLATFORM_COOLDOWN, PLATFORM_LOCK};
use crate::position::{Board, Color, Piece, PieceType, Square};
use crate::transposition::LegalMoveTable;
use crate::utils::{contains, Bitboard};
use crate::zobrist::Zobrist;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub platforms: Platforms,
    pub turn: Color,
    /// Square of a pawn waiting for its promotion choice.
    pub promotion_pending: Option<Square>,
    /// Per color: took a platform action and has not made a piece move since.
    pub just_platformed: [bool; 2],
    pub end_state: EndType,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The initial position, White to move.
    pub fn new() -> GameState {
        GameState::from_board(Board::new(), Platforms::new(), Color::White)
    }

    pub fn from_board(board: Board, platforms: Platforms, turn: Color) -> GameState {
        GameState {
            board,
            platforms,
            turn,
            promotion_pending: None,
            just_platformed: [false; 2],
            end_state: EndType::Playing,
        }
    }

    /// Checks that play can start from this state: one king per color, and
    /// the side waiting for its turn is not already in check.
    pub fn check_playable(&self) -> Result<(), LayoutError> {
        for color in [Color::White, Color::Black] {
            let found = self.board.count_piece(Piece::new(color, PieceType::King));
            if found != 1 {
                return Err(LayoutError::KingCount { color, found });
            }
        }
        let waiting = self.turn.opposite();
        if legality::is_in_check(&self.board, waiting) {
            return Err(LayoutError::WaitingSideInCheck(waiting));
        }
        Ok(())
    }

    /// Number of platforms on the board, locked or active.
    pub fn active_platforms(&self) -> usize {
        self.platforms.count()
    }

    pub fn has_platformed(&self, color: Color) -> bool {
        self.just_platformed[color.index()]
    }
}

/// A game session: the state plus the legal-move memo.
pub struct Game {
    state: GameState,
    zobrist: Zobrist,
    table: LegalMoveTable,
    gravity_frames: Vec<Board>,
}

impl Game {
    /// Starts a new game with a legal-move memo of `cache_entries` slots.
    pub fn new(cache_entries: usize) -> Game {
        Game::with_state(GameState::new(), cache_entries)
    }

    /// Starts a session from an arbitrary state; its end state is recomputed.
    ///
    /// The state is trusted. Boards from outside the game go through
    /// [`GameState::check_playable`] first.
    pub fn with_state(state: GameState, cache_entries: usize) -> Game {
        let mut game = Game {
            state,
            zobrist: Zobrist::new(),
            table: LegalMoveTable::new(cache_entries),
            gravity_frames: Vec::new(),
        };
        debug!("legal-move memo with {} slots", game.table.capacity());
        game.evaluate();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn turn(&self) -> Color {
        self.state.turn
    }

    pub fn reset(&mut self) {
        let (hits, misses) = self.table.stats();
        debug!("legal-move memo: {} hits, {} misses", hits, misses);
        self.state = GameState::new();
        self.table.clear();
        self.gravity_frames.clear();
        info!("new game");
    }

    /// Legal destinations of the piece on `from` for the player to move.
    pub fn legal_moves(&mut self, from: Square) -> Bitboard {
        let turn = self.state.turn;
        cached_legal_moves(&self.zobrist, &mut self.table, &self.state.board, &self.state.platforms, from, turn)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        legality::is_in_check(&self.state.board, color)
    }

    /// Hands over the boards recorded by the last gravity pass, oldest first.
    pub fn take_gravity_frames(&mut self) -> Vec<Board> {
        std::mem::take(&mut self.gravity_frames)
    }

    /// Plays `from -> to` for the player to move.
    ///
    /// A pawn reaching column 0 or 7 leaves the turn open until
    /// [`Game::resolve_promotion`] is called.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<(), Rejection> {
        self.ensure_accepting()?;
        if !contains(self.legal_moves(from), to) {
            return Err(Rejection::IllegalMove { from, to });
        }
        let mover = self.state.turn;
        let is_pawn = self.state.board.get(from).map_or(false, |p| p.piece_type == PieceType::Pawn);

        self.state.board = play_move(&self.state.board, from, to);
        debug!("{} plays {}", mover, Move::new(from, to));

        if is_pawn && (to.col == 0 || to.col == 7) {
            debug!("{} pawn on {} awaits promotion", mover, to);
            self.state.promotion_pending = Some(to);
            return Ok(());
        }
        self.finish_half_move(mover, true);
        Ok(())
    }

    /// Replaces the pending pawn with a fresh piece of `piece_type` and ends the turn.
    pub fn resolve_promotion(&mut self, piece_type: PieceType) -> Result<(), Rejection> {
        let square = self.state.promotion_pending.ok_or(Rejection::NoPromotionPending)?;
        if !PieceType::PROMOTIONS.contains(&piece_type) {
            return Err(Rejection::InvalidPromotion(piece_type));
        }
        let mover = self.state.turn;
        self.state.board.set(square, Some(Piece::new(mover, piece_type)));
        self.state.promotion_pending = None;
        debug!("{} promotes on {} to {:?}", mover, square, piece_type);
        self.finish_half_move(mover, true);
        Ok(())
    }

    /// Takes a platform action for the player to move, in place of a piece move.
    pub fn platform_action(&mut self, action: PlatformAction) -> Result<(), Rejection> {
        self.ensure_accepting()?;
        let mover = self.state.turn;
        let already = self.state.has_platformed(mover);
        let board = &self.state.board;
        let lanes = &mut self.state.platforms;

        match action {
            PlatformAction::Place(lane) => {
                platforms::check_place(board, lanes, lane, mover, already)?;
                lanes.set(lane, PLATFORM_LOCK);
            }
            PlatformAction::Move { from, to } => {
                platforms::check_move(board, lanes, from, to, mover, already)?;
                lanes.set(to, PLATFORM_LOCK);
                lanes.set(from, PLATFORM_COOLDOWN);
            }
            PlatformAction::Remove(lane) => {
                platforms::check_remove(board, lanes, lane, mover, already)?;
                lanes.set(lane, PLATFORM_COOLDOWN);
            }
        }

        debug!("{}: {}", mover, action);
        self.state.just_platformed[mover.index()] = true;
        self.finish_half_move(mover, false);
        Ok(())
    }

    /// Recomputes and stores the end state for the player to move.
    pub fn evaluate(&mut self) -> EndType {
        let board = self.state.board;
        let platforms = self.state.platforms;
        let zobrist = &self.zobrist;
        let table = &mut self.table;
        let result = evaluate_with(&board, self.state.turn, |square, color| {
            cached_legal_moves(zobrist, table, &board, &platforms, square, color)
        });

        if result.is_over() && !self.state.end_state.is_over() {
            info!("game over: {}", result.message(self.state.turn).unwrap_or_default());
        }
        self.state.end_state = result;
        result
    }

    fn ensure_accepting(&self) -> Result<(), Rejection> {
        if self.state.end_state.is_over() {
            return Err(Rejection::GameOver);
        }
        if self.state.promotion_pending.is_some() {
            return Err(Rejection::PromotionPending);
        }
        Ok(())
    }

    /// Passes the turn, settles the board, ticks the lanes and re-evaluates.
    fn finish_half_move(&mut self, mover: Color, piece_move: bool) {
        self.state.turn = mover.opposite();

        let frames = &mut self.gravity_frames;
        frames.clear();
        self.state.board = resolve_gravity_with(&self.state.board, &self.state.platforms, |b| frames.push(*b));
        self.state.platforms.tick();

        if piece_move {
            self.state.just_platformed[mover.index()] = false;
        }
        self.evaluate();
    }
}

fn cached_legal_moves(
    zobrist: &Zobrist,
    table: &mut LegalMoveTable,
    board: &Board,
    platforms: &Platforms,
    from: Square,
    mover: Color,
) -> Bitboard {
    let hash = zobrist.hash_query(board, platforms, from, mover);
    if let Some(moves) = table.probe(hash) {
        trace!("legal moves of {} served from cache", from);
        return moves;
    }
    let moves = legality::legal_moves(board, platforms, from, mover);
    table.store(hash, moves);
    moves
}
