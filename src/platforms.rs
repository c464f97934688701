//! Platform lanes.
//!
//! A platform sits on the lane between `row` and `row + 1` of one column and
//! stops pieces on `row` from falling. Each lane carries a single counter:
//!
//! - `0`: free, a platform may be placed here
//! - `1`: active, the platform may be moved or removed
//! - `>1`: locked, counts down once per half-move until it becomes active
//! - `<0`: cooling down after being vacated, counts up to free
//!
//! Row 7 is the floor and has no lane beneath it.

use crate::error::Rejection;
use crate::gravity::resolve_gravity;
use crate::legality::is_in_check;
use crate::position::{Board, Color, Square};

/// Maximum number of platforms on the board at once.
pub const MAX_PLATFORMS: usize = 4;

/// Counter given to a freshly placed platform.
pub const PLATFORM_LOCK: i8 = 7;

/// Counter given to a lane a platform has just left.
pub const PLATFORM_COOLDOWN: i8 = -(PLATFORM_LOCK - 3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Platforms {
    cells: [[i8; 8]; 8],
}

impl Platforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `lane` names a lane that exists.
    pub fn has_lane(lane: Square) -> bool {
        lane.is_on_board() && lane.row < 7
    }

    /// Lane counter; `0` for squares without a lane.
    pub fn get(&self, lane: Square) -> i8 {
        if lane.is_on_board() {
            self.cells[lane.row as usize][lane.col as usize]
        } else {
            0
        }
    }

    pub fn set(&mut self, lane: Square, value: i8) {
        if lane.is_on_board() {
            self.cells[lane.row as usize][lane.col as usize] = value;
        }
    }

    /// Whether a piece on `lane` is held up by a platform.
    pub fn blocks(&self, lane: Square) -> bool {
        self.get(lane) >= 1
    }

    /// Number of platforms currently on the board, locked or active.
    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&value| value > 0).count()
    }

    /// Advances every counter by one half-move.
    ///
    /// Locked platforms count down to `1` and cooling lanes count up to `0`;
    /// free and active lanes stay put.
    pub fn tick(&mut self) {
        for value in self.cells.iter_mut().flatten() {
            if *value > 1 {
                *value -= 1;
            } else if *value < 0 {
                *value += 1;
            }
        }
    }
}

/// Checks that `mover` may place a platform on `lane`.
///
/// # Arguments
///
/// * `board` - The current board
/// * `platforms` - The current lanes
/// * `lane` - The lane to place on
/// * `mover` - The color taking the action
/// * `already_platformed` - Whether `mover` took a platform action since its last move
///
/// # Returns
///
/// * `Ok(())` if the placement is legal, otherwise the reason it is not
pub fn check_place(
    board: &Board,
    platforms: &Platforms,
    lane: Square,
    mover: Color,
    already_platformed: bool,
) -> Result<(), Rejection> {
    if !Platforms::has_lane(lane) {
        return Err(Rejection::NoLane(lane));
    }
    if already_platformed {
        return Err(Rejection::AlreadyPlatformed);
    }
    if platforms.count() >= MAX_PLATFORMS {
        return Err(Rejection::PlatformCapReached);
    }
    if platforms.get(lane) != 0 {
        return Err(Rejection::LaneUnavailable(lane));
    }
    if is_in_check(board, mover) {
        return Err(Rejection::InCheck);
    }
    Ok(())
}

/// Checks that `mover` may move the active platform on `from` to the free lane `to`.
pub fn check_move(
    board: &Board,
    platforms: &Platforms,
    from: Square,
    to: Square,
    mover: Color,
    already_platformed: bool,
) -> Result<(), Rejection> {
    if !Platforms::has_lane(from) {
        return Err(Rejection::NoLane(from));
    }
    if !Platforms::has_lane(to) {
        return Err(Rejection::NoLane(to));
    }
    if already_platformed {
        return Err(Rejection::AlreadyPlatformed);
    }
    if platforms.get(from) != 1 {
        return Err(Rejection::NotActivePlatform(from));
    }
    if from == to || platforms.get(to) != 0 {
        return Err(Rejection::LaneUnavailable(to));
    }
    if exposes_king(board, platforms, from, Some(to), mover) {
        return Err(Rejection::ExposesKing);
    }
    Ok(())
}

/// Checks that `mover` may remove the active platform on `lane`.
pub fn check_remove(
    board: &Board,
    platforms: &Platforms,
    lane: Square,
    mover: Color,
    already_platformed: bool,
) -> Result<(), Rejection> {
    if !Platforms::has_lane(lane) {
        return Err(Rejection::NoLane(lane));
    }
    if already_platformed {
        return Err(Rejection::AlreadyPlatformed);
    }
    if platforms.get(lane) != 1 {
        return Err(Rejection::NotActivePlatform(lane));
    }
    if exposes_king(board, platforms, lane, None, mover) {
        return Err(Rejection::ExposesKing);
    }
    Ok(())
}

/// Simulates vacating `vacate` (and occupying `occupy`), lets the board
/// settle, and reports whether `mover`'s king ends up attacked.
fn exposes_king(
    board: &Board,
    platforms: &Platforms,
    vacate: Square,
    occupy: Option<Square>,
    mover: Color,
) -> bool {
    let mut trial = *platforms;
    trial.set(vacate, 0);
    if let Some(lane) = occupy {
        trial.set(lane, 1);
    }
    is_in_check(&resolve_gravity(board, &trial), mover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout(rows: &[&str]) -> Board {
        Board::from_layout(&rows.join("\n")).unwrap()
    }

    #[test]
    fn test_cooldown_constant() {
        assert_eq!(PLATFORM_COOLDOWN, -4);
    }

    #[test]
    fn test_tick_moves_counters_toward_rest() {
        let mut platforms = Platforms::new();
        platforms.set(Square::new(0, 0), PLATFORM_LOCK);
        platforms.set(Square::new(0, 1), 1);
        platforms.set(Square::new(0, 2), PLATFORM_COOLDOWN);
        platforms.tick();
        assert_eq!(platforms.get(Square::new(0, 0)), 6);
        assert_eq!(platforms.get(Square::new(0, 1)), 1);
        assert_eq!(platforms.get(Square::new(0, 2)), -3);
        for _ in 0..10 {
            platforms.tick();
        }
        assert_eq!(platforms.get(Square::new(0, 0)), 1);
        assert_eq!(platforms.get(Square::new(0, 2)), 0);
        assert_eq!(platforms.count(), 2);
    }

    #[test]
    fn test_floor_row_has_no_lane() {
        let board = Board::new();
        let platforms = Platforms::new();
        assert_eq!(
            check_place(&board, &platforms, Square::new(7, 3), Color::White, false),
            Err(Rejection::NoLane(Square::new(7, 3)))
        );
        assert!(check_place(&board, &platforms, Square::new(6, 3), Color::White, false).is_ok());
    }

    #[test]
    fn test_place_rejected_at_cap() {
        let board = Board::new();
        let mut platforms = Platforms::new();
        for col in 0..4 {
            platforms.set(Square::new(0, col), 1);
        }
        assert_eq!(
            check_place(&board, &platforms, Square::new(3, 2), Color::White, false),
            Err(Rejection::PlatformCapReached)
        );
    }

    #[test]
    fn test_place_rejected_on_cooling_lane_or_after_platforming() {
        let board = Board::new();
        let mut platforms = Platforms::new();
        platforms.set(Square::new(3, 2), -1);
        assert_eq!(
            check_place(&board, &platforms, Square::new(3, 2), Color::White, false),
            Err(Rejection::LaneUnavailable(Square::new(3, 2)))
        );
        assert_eq!(
            check_place(&board, &platforms, Square::new(3, 3), Color::White, true),
            Err(Rejection::AlreadyPlatformed)
        );
    }

    #[test]
    fn test_place_rejected_in_check() {
        let board = layout(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "K.....rk",
        ]);
        assert_eq!(
            check_place(&board, &Platforms::new(), Square::new(3, 3), Color::White, false),
            Err(Rejection::InCheck)
        );
    }

    #[test]
    fn test_remove_rejected_when_drop_exposes_king() {
        // The white king stands on a platform above the rook's row.
        let board = layout(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "K......k",
            ".......r",
        ]);
        let mut platforms = Platforms::new();
        platforms.set(Square::new(6, 0), 1);
        platforms.set(Square::new(2, 3), 1);
        assert!(!is_in_check(&board, Color::White));

        assert_eq!(
            check_remove(&board, &platforms, Square::new(6, 0), Color::White, false),
            Err(Rejection::ExposesKing)
        );
        assert_eq!(
            check_move(&board, &platforms, Square::new(6, 0), Square::new(4, 4), Color::White, false),
            Err(Rejection::ExposesKing)
        );
        assert!(check_remove(&board, &platforms, Square::new(2, 3), Color::White, false).is_ok());
        assert!(check_move(&board, &platforms, Square::new(2, 3), Square::new(4, 4), Color::White, false).is_ok());
    }

    #[test]
    fn test_move_requires_active_source_and_free_target() {
        let board = Board::new();
        let mut platforms = Platforms::new();
        platforms.set(Square::new(2, 2), 3);
        platforms.set(Square::new(2, 3), 1);
        assert_eq!(
            check_move(&board, &platforms, Square::new(2, 2), Square::new(2, 4), Color::White, false),
            Err(Rejection::NotActivePlatform(Square::new(2, 2)))
        );
        assert_eq!(
            check_move(&board, &platforms, Square::new(2, 3), Square::new(2, 2), Color::White, false),
            Err(Rejection::LaneUnavailable(Square::new(2, 2)))
        );
        assert_eq!(
            check_move(&board, &platforms, Square::new(2, 3), Square::new(2, 3), Color::White, false),
            Err(Rejection::LaneUnavailable(Square::new(2, 3)))
        );
        assert!(check_move(&board, &platforms, Square::new(2, 3), Square::new(2, 4), Color::White, false).is_ok());
    }

    proptest! {
        #[test]
        fn tick_never_skips_rest_values(start in -4i8..=7, ticks in 0usize..12) {
            let lane = Square::new(0, 0);
            let mut platforms = Platforms::new();
            platforms.set(lane, start);
            let mut previous = start;
            for _ in 0..ticks {
                platforms.tick();
                let value = platforms.get(lane);
                if previous > 1 {
                    prop_assert_eq!(value, previous - 1);
                } else if previous < 0 {
                    prop_assert_eq!(value, previous + 1);
                } else {
                    prop_assert_eq!(value, previous);
                }
                previous = value;
            }
        }
    }
}
