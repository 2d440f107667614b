use std::fmt::{self, Display, Formatter};

use bevy::prelude::*;
use thiserror::Error;

pub const MIN_ROWS: usize = 2;
pub const MIN_COLUMNS: usize = 2;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("a sliding puzzle needs at least {MIN_ROWS} rows, got {0}")]
    TooFewRows(usize),

    #[error("a sliding puzzle needs at least {MIN_COLUMNS} columns, got {0}")]
    TooFewColumns(usize),
}

/// A grid cell, addressed by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub const fn is_same_row(self, other: Self) -> bool {
        self.row == other.row
    }

    pub const fn is_same_column(self, other: Self) -> bool {
        self.column == other.column
    }

    /// Same row, strictly smaller column.
    pub const fn is_left_of(self, other: Self) -> bool {
        self.row == other.row && self.column < other.column
    }

    /// Same row, strictly larger column.
    pub const fn is_right_of(self, other: Self) -> bool {
        self.row == other.row && self.column > other.column
    }

    /// Same column, strictly smaller row.
    pub const fn is_above(self, other: Self) -> bool {
        self.column == other.column && self.row < other.row
    }

    /// Same column, strictly larger row.
    pub const fn is_below(self, other: Self) -> bool {
        self.column == other.column && self.row > other.row
    }

    /// Direction a tile at `self` would travel to reach `other`, if they
    /// share a row or a column.
    pub const fn direction_toward(self, other: Self) -> Option<SlideDirection> {
        if self.is_left_of(other) {
            Some(SlideDirection::Right)
        } else if self.is_right_of(other) {
            Some(SlideDirection::Left)
        } else if self.is_above(other) {
            Some(SlideDirection::Down)
        } else if self.is_below(other) {
            Some(SlideDirection::Up)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Up,
    Right,
    Down,
    Left,
}

/// The tile grid. Tiles are plain indices `0..rows * cols` stored in
/// row-major order; the index `rows * cols - 1` marks the empty slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    tiles: Vec<usize>,
    empty: Position,
}

impl Board {
    /// A board with the full tile set under a uniform random permutation.
    pub fn shuffled(rows: usize, cols: usize) -> Self {
        let mut tiles: Vec<usize> = (0..rows * cols).collect();
        fastrand::shuffle(&mut tiles);
        Self::from_tiles(rows, cols, tiles)
    }

    fn from_tiles(rows: usize, cols: usize, tiles: Vec<usize>) -> Self {
        let empty_tile = rows * cols - 1;
        let index = tiles
            .iter()
            .position(|&tile| tile == empty_tile)
            .expect("tile set must contain the empty tile");
        let empty = Position::new(index / cols, index % cols);

        Self {
            rows,
            cols,
            tiles,
            empty,
        }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn empty_tile(&self) -> usize {
        self.rows * self.cols - 1
    }

    pub const fn empty_position(&self) -> Position {
        self.empty
    }

    const fn cell_index(&self, position: Position) -> usize {
        position.row * self.cols + position.column
    }

    pub fn tile_at(&self, position: Position) -> Option<usize> {
        self.tiles.get(self.cell_index(position)).copied()
    }

    /// Current cell of a tile.
    pub fn position_of(&self, tile: usize) -> Option<Position> {
        let index = self.tiles.iter().position(|&t| t == tile)?;
        Some(Position::new(index / self.cols, index % self.cols))
    }

    /// Maps a point in surface pixels (origin top-left, y down) to a cell.
    /// Points outside the board are the caller's responsibility to filter.
    pub fn position_at(&self, point: Vec2, tile_size: Vec2) -> Position {
        Position::new(
            (point.y / tile_size.y) as usize,
            (point.x / tile_size.x) as usize,
        )
    }

    /// Slides the straight run of tiles between `selected` and the empty
    /// slot one cell toward the empty slot; the empty slot ends up where
    /// `selected` was. Returns false without touching the grid when
    /// `selected` shares neither a row nor a column with the empty slot
    /// (which includes selecting the empty slot itself).
    pub fn slide_toward(&mut self, selected: Position) -> bool {
        let empty = self.empty;
        let row_base = selected.row * self.cols;

        if selected.is_left_of(empty) {
            // Run moves one column right
            self.tiles.copy_within(
                row_base + selected.column..row_base + empty.column,
                row_base + selected.column + 1,
            );
        } else if selected.is_right_of(empty) {
            // Run moves one column left
            self.tiles.copy_within(
                row_base + empty.column + 1..=row_base + selected.column,
                row_base + empty.column,
            );
        } else if selected.is_above(empty) {
            // Run moves one row down
            for row in (selected.row..empty.row).rev() {
                self.copy_tile(
                    Position::new(row, selected.column),
                    Position::new(row + 1, selected.column),
                );
            }
        } else if selected.is_below(empty) {
            // Run moves one row up
            for row in empty.row..selected.row {
                self.copy_tile(
                    Position::new(row + 1, selected.column),
                    Position::new(row, selected.column),
                );
            }
        } else {
            return false;
        }

        let selected_cell = self.cell_index(selected);
        let empty_tile = self.empty_tile();
        if let Some(slot) = self.tiles.get_mut(selected_cell) {
            *slot = empty_tile;
        }
        self.empty = selected;

        true
    }

    fn copy_tile(&mut self, from: Position, to: Position) {
        let from = self.cell_index(from);
        let to = self.cell_index(to);
        if let Some(&tile) = self.tiles.get(from) {
            if let Some(slot) = self.tiles.get_mut(to) {
                *slot = tile;
            }
        }
    }

    /// True when every tile sits at its row-major home cell.
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().enumerate().all(|(index, &tile)| tile == index)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.cols {
                match self.tile_at(Position::new(row, column)) {
                    Some(tile) if tile == self.empty_tile() => write!(f, "   ")?,
                    Some(tile) => write!(f, "{:>02} ", tile + 1)?,
                    None => {}
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One in-progress drag: the grabbed tile's cell and the signed pointer
/// displacement along the axis toward the empty slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub position: Position,
    pub displacement: f32,
}

/// What a commit attempt did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing happened; the selection could not reach the empty slot or
    /// the drag fell short of the commit threshold.
    Ignored,
    Moved,
    /// The commit happened and it put the board into the solved
    /// arrangement.
    Solved,
}

impl MoveOutcome {
    pub const fn moved(self) -> bool {
        matches!(self, Self::Moved | Self::Solved)
    }
}

/// Owns the board and the transient drag state, and turns gestures into
/// board mutations and per-tile render offsets.
#[derive(Resource)]
pub struct PuzzleEngine {
    board: Board,
    drag: Option<DragSession>,
    tile_size: Vec2,
}

impl PuzzleEngine {
    pub fn new(rows: usize, cols: usize, tile_size: Vec2) -> Result<Self, GridError> {
        if rows < MIN_ROWS {
            return Err(GridError::TooFewRows(rows));
        }
        if cols < MIN_COLUMNS {
            return Err(GridError::TooFewColumns(cols));
        }

        Ok(Self {
            board: Board::shuffled(rows, cols),
            drag: None,
            tile_size,
        })
    }

    #[cfg(test)]
    fn with_board(board: Board, tile_size: Vec2) -> Self {
        Self {
            board,
            drag: None,
            tile_size,
        }
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Starts the next round: a freshly shuffled board, no drag carried
    /// over.
    pub fn reshuffle(&mut self) {
        self.board = Board::shuffled(self.board.rows(), self.board.cols());
        self.drag = None;
    }

    /// An instantaneous tap: commit attempt at the tapped cell, no drag
    /// state or threshold involved.
    pub fn on_tap(&mut self, point: Vec2) -> MoveOutcome {
        let selected = self.board.position_at(point, self.tile_size);
        self.commit(selected)
    }

    /// A drag update. Opens or refreshes the session when the grabbed
    /// tile lines up with the empty slot and the pointer has moved
    /// toward it; any other update leaves existing drag state untouched.
    /// Returns whether the session changed.
    pub fn on_drag(&mut self, start: Vec2, end: Vec2) -> bool {
        let selected = self.board.position_at(start, self.tile_size);
        let empty = self.board.empty_position();

        if selected.is_left_of(empty) || selected.is_right_of(empty) {
            let displacement = end.x - start.x;
            if (selected.is_left_of(empty) && displacement > 0.0)
                || (selected.is_right_of(empty) && displacement < 0.0)
            {
                self.drag = Some(DragSession {
                    position: selected,
                    displacement,
                });
                return true;
            }
        } else if selected.is_above(empty) || selected.is_below(empty) {
            let displacement = end.y - start.y;
            if (selected.is_above(empty) && displacement > 0.0)
                || (selected.is_below(empty) && displacement < 0.0)
            {
                self.drag = Some(DragSession {
                    position: selected,
                    displacement,
                });
                return true;
            }
        }

        false
    }

    /// Ends the gesture. Commits when the drag travelled more than half
    /// a tile toward the empty slot, otherwise discards it; the session
    /// is cleared either way.
    pub fn on_release(&mut self) -> MoveOutcome {
        let Some(drag) = self.drag.take() else {
            return MoveOutcome::Ignored;
        };

        let half_extent = match drag.position.direction_toward(self.board.empty_position()) {
            Some(SlideDirection::Left | SlideDirection::Right) => self.tile_size.x / 2.0,
            Some(SlideDirection::Up | SlideDirection::Down) => self.tile_size.y / 2.0,
            None => return MoveOutcome::Ignored,
        };

        if drag.displacement.abs() > half_extent {
            self.commit(drag.position)
        } else {
            MoveOutcome::Ignored
        }
    }

    fn commit(&mut self, selected: Position) -> MoveOutcome {
        if !self.board.slide_toward(selected) {
            return MoveOutcome::Ignored;
        }

        if self.board.is_solved() {
            MoveOutcome::Solved
        } else {
            MoveOutcome::Moved
        }
    }

    /// Render offset for the tile at `position`, in surface pixels.
    /// Nonzero only while a drag is live and only for tiles on the
    /// dragged run, clamped to one tile of travel.
    pub fn drag_offset(&self, position: Position) -> Vec2 {
        Vec2::new(
            self.horizontal_offset(position),
            self.vertical_offset(position),
        )
    }

    fn horizontal_offset(&self, position: Position) -> f32 {
        let Some(drag) = self.drag else {
            return 0.0;
        };
        let empty = self.board.empty_position();

        if position.is_left_of(empty)
            && (position == drag.position || position.is_right_of(drag.position))
        {
            // Tile is the grabbed tile, or between it and the empty slot
            drag.displacement.min(self.tile_size.x)
        } else if position.is_right_of(empty)
            && (position == drag.position || position.is_left_of(drag.position))
        {
            drag.displacement.max(-self.tile_size.x)
        } else {
            0.0
        }
    }

    fn vertical_offset(&self, position: Position) -> f32 {
        let Some(drag) = self.drag else {
            return 0.0;
        };
        let empty = self.board.empty_position();

        if position.is_above(empty)
            && (position == drag.position || position.is_below(drag.position))
        {
            drag.displacement.min(self.tile_size.y)
        } else if position.is_below(empty)
            && (position == drag.position || position.is_above(drag.position))
        {
            drag.displacement.max(-self.tile_size.y)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: Vec2 = Vec2::new(90.0, 160.0);

    fn board_3x3(tiles: [usize; 9]) -> Board {
        Board::from_tiles(3, 3, tiles.to_vec())
    }

    fn engine_with(board: Board) -> PuzzleEngine {
        PuzzleEngine::with_board(board, TILE)
    }

    // Center of a cell in surface pixels
    fn cell_point(row: usize, column: usize) -> Vec2 {
        Vec2::new(
            (column as f32 + 0.5) * TILE.x,
            (row as f32 + 0.5) * TILE.y,
        )
    }

    fn assert_permutation(board: &Board) {
        let mut seen: Vec<usize> = (0..board.rows() * board.cols())
            .filter_map(|index| {
                board.tile_at(Position::new(index / board.cols(), index % board.cols()))
            })
            .collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..board.rows() * board.cols()).collect();
        assert_eq!(seen, expected, "tile multiset must stay a permutation");

        let empty_cells = expected
            .iter()
            .filter(|&&index| {
                board.tile_at(Position::new(index / board.cols(), index % board.cols()))
                    == Some(board.empty_tile())
            })
            .count();
        assert_eq!(empty_cells, 1, "exactly one cell holds the empty tile");
        assert_eq!(
            board.tile_at(board.empty_position()),
            Some(board.empty_tile()),
            "cached empty position must point at the empty tile"
        );
    }

    #[test]
    fn position_predicates() {
        let center = Position::new(1, 1);

        assert!(Position::new(1, 0).is_left_of(center));
        assert!(Position::new(1, 2).is_right_of(center));
        assert!(Position::new(0, 1).is_above(center));
        assert!(Position::new(2, 1).is_below(center));

        // No relation across rows and columns at once
        let diagonal = Position::new(0, 0);
        assert!(!diagonal.is_left_of(center));
        assert!(!diagonal.is_above(center));
        assert!(diagonal.direction_toward(center).is_none());

        // Strictness: a position has no relation to itself
        assert!(!center.is_left_of(center));
        assert!(!center.is_above(center));
        assert!(center.direction_toward(center).is_none());
    }

    #[test]
    fn direction_toward_empty() {
        let empty = Position::new(1, 1);
        assert_eq!(
            Position::new(1, 0).direction_toward(empty),
            Some(SlideDirection::Right)
        );
        assert_eq!(
            Position::new(1, 2).direction_toward(empty),
            Some(SlideDirection::Left)
        );
        assert_eq!(
            Position::new(0, 1).direction_toward(empty),
            Some(SlideDirection::Down)
        );
        assert_eq!(
            Position::new(2, 1).direction_toward(empty),
            Some(SlideDirection::Up)
        );
    }

    #[test]
    fn slide_shifts_row_run_right() {
        // Empty slot (tile 8) at the end of the first row
        let mut board = board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]);

        assert!(board.slide_toward(Position::new(0, 0)));

        assert_eq!(board.tile_at(Position::new(0, 0)), Some(8));
        assert_eq!(board.tile_at(Position::new(0, 1)), Some(0));
        assert_eq!(board.tile_at(Position::new(0, 2)), Some(1));
        assert_eq!(board.empty_position(), Position::new(0, 0));
        assert_permutation(&board);
    }

    #[test]
    fn slide_shifts_row_run_left() {
        let mut board = board_3x3([8, 0, 1, 3, 4, 5, 6, 7, 2]);

        assert!(board.slide_toward(Position::new(0, 2)));

        assert_eq!(board.tile_at(Position::new(0, 0)), Some(0));
        assert_eq!(board.tile_at(Position::new(0, 1)), Some(1));
        assert_eq!(board.tile_at(Position::new(0, 2)), Some(8));
        assert_eq!(board.empty_position(), Position::new(0, 2));
        assert_permutation(&board);
    }

    #[test]
    fn slide_shifts_column_run_down() {
        let mut board = board_3x3([0, 1, 2, 3, 4, 5, 6, 8, 7]);

        assert!(board.slide_toward(Position::new(0, 1)));

        assert_eq!(board.tile_at(Position::new(0, 1)), Some(8));
        assert_eq!(board.tile_at(Position::new(1, 1)), Some(1));
        assert_eq!(board.tile_at(Position::new(2, 1)), Some(4));
        assert_eq!(board.empty_position(), Position::new(0, 1));
        assert_permutation(&board);
    }

    #[test]
    fn slide_shifts_column_run_up() {
        let mut board = board_3x3([0, 8, 2, 3, 4, 5, 6, 1, 7]);

        assert!(board.slide_toward(Position::new(2, 1)));

        assert_eq!(board.tile_at(Position::new(0, 1)), Some(4));
        assert_eq!(board.tile_at(Position::new(1, 1)), Some(1));
        assert_eq!(board.tile_at(Position::new(2, 1)), Some(8));
        assert_eq!(board.empty_position(), Position::new(2, 1));
        assert_permutation(&board);
    }

    #[test]
    fn slide_rejects_unreachable_selections() {
        let mut board = board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]);
        let before = board.clone();

        // Shares neither row nor column with the empty slot
        assert!(!board.slide_toward(Position::new(1, 0)));
        assert_eq!(board, before);

        // Selecting the empty slot itself is a no-op
        assert!(!board.slide_toward(Position::new(0, 2)));
        assert_eq!(board, before);
    }

    #[test]
    fn invariants_hold_across_many_slides() {
        let mut board = Board::shuffled(4, 3);
        assert_permutation(&board);

        for turn in 0..40 {
            // Walk the empty slot around by alternating axis targets
            let empty = board.empty_position();
            let selected = if turn % 2 == 0 {
                Position::new(empty.row, (empty.column + 1) % board.cols())
            } else {
                Position::new((empty.row + 1) % board.rows(), empty.column)
            };
            board.slide_toward(selected);
            assert_permutation(&board);
        }
    }

    #[test]
    fn solved_detection_on_2x2() {
        assert!(Board::from_tiles(2, 2, vec![0, 1, 2, 3]).is_solved());
        assert!(!Board::from_tiles(2, 2, vec![1, 0, 2, 3]).is_solved());
        assert!(!Board::from_tiles(2, 2, vec![0, 1, 3, 2]).is_solved());
    }

    #[test]
    fn position_at_divides_by_tile_extent() {
        let board = board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]);
        assert_eq!(
            board.position_at(Vec2::new(95.0, 10.0), TILE),
            Position::new(0, 1)
        );
        assert_eq!(
            board.position_at(Vec2::new(0.0, 0.0), TILE),
            Position::new(0, 0)
        );
        assert_eq!(
            board.position_at(cell_point(2, 2), TILE),
            Position::new(2, 2)
        );
    }

    #[test]
    fn tap_commits_immediately_when_aligned() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));

        assert_eq!(engine.on_tap(cell_point(0, 0)), MoveOutcome::Moved);
        assert_eq!(engine.board().empty_position(), Position::new(0, 0));
    }

    #[test]
    fn tap_is_noop_when_misaligned() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let before = engine.board().clone();

        assert_eq!(engine.on_tap(cell_point(2, 0)), MoveOutcome::Ignored);
        assert_eq!(*engine.board(), before);
    }

    #[test]
    fn drag_below_half_tile_never_moves() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let before = engine.board().clone();
        let start = cell_point(0, 0);

        // Many updates, none of them past half a tile width
        for step in 1..=10 {
            let end = start + Vec2::new(step as f32 * 4.5, 0.0);
            engine.on_drag(start, end);
        }

        assert_eq!(engine.on_release(), MoveOutcome::Ignored);
        assert_eq!(*engine.board(), before);
    }

    #[test]
    fn drag_past_half_tile_commits_on_release() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let start = cell_point(0, 0);

        assert!(engine.on_drag(start, start + Vec2::new(TILE.x / 2.0 + 1.0, 0.0)));
        assert_eq!(engine.on_release(), MoveOutcome::Moved);
        assert_eq!(engine.board().empty_position(), Position::new(0, 0));
    }

    #[test]
    fn drag_away_from_empty_is_ignored() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let start = cell_point(0, 0);

        // Empty slot is to the right; dragging left cannot move the run
        assert!(!engine.on_drag(start, start + Vec2::new(-TILE.x, 0.0)));
        assert_eq!(engine.drag_offset(Position::new(0, 0)), Vec2::ZERO);
        assert_eq!(engine.on_release(), MoveOutcome::Ignored);
    }

    #[test]
    fn away_update_leaves_prior_session_untouched() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let start = cell_point(0, 0);

        assert!(engine.on_drag(start, start + Vec2::new(30.0, 0.0)));
        assert!(!engine.on_drag(start, start + Vec2::new(-30.0, 0.0)));

        // The qualifying displacement is still what renders
        assert_eq!(
            engine.drag_offset(Position::new(0, 0)),
            Vec2::new(30.0, 0.0)
        );
    }

    #[test]
    fn misaligned_drag_start_opens_no_session() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let start = cell_point(2, 0);

        assert!(!engine.on_drag(start, start + Vec2::new(TILE.x, 0.0)));
        assert!(!engine.on_drag(start, start + Vec2::new(0.0, TILE.y)));
        assert_eq!(engine.on_release(), MoveOutcome::Ignored);
    }

    #[test]
    fn offsets_cover_the_dragged_run_and_nothing_else() {
        // Empty at (0, 2), grab the far-left tile: both row tiles slide
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let start = cell_point(0, 0);
        engine.on_drag(start, start + Vec2::new(40.0, 0.0));

        assert_eq!(
            engine.drag_offset(Position::new(0, 0)),
            Vec2::new(40.0, 0.0)
        );
        assert_eq!(
            engine.drag_offset(Position::new(0, 1)),
            Vec2::new(40.0, 0.0)
        );
        // The empty cell and off-run tiles stay put
        assert_eq!(engine.drag_offset(Position::new(0, 2)), Vec2::ZERO);
        assert_eq!(engine.drag_offset(Position::new(1, 0)), Vec2::ZERO);
        assert_eq!(engine.drag_offset(Position::new(2, 2)), Vec2::ZERO);
    }

    #[test]
    fn offsets_clamp_to_one_tile_extent() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let start = cell_point(0, 0);
        engine.on_drag(start, start + Vec2::new(5000.0, 0.0));

        for row in 0..3 {
            for column in 0..3 {
                let offset = engine.drag_offset(Position::new(row, column));
                assert!(
                    offset.x.abs() <= TILE.x && offset.y.abs() <= TILE.y,
                    "offset {offset:?} exceeds one tile"
                );
            }
        }

        // Vertical clamp, dragging up toward an empty slot above
        let mut engine = engine_with(board_3x3([0, 8, 2, 3, 4, 5, 6, 1, 7]));
        let start = cell_point(2, 1);
        engine.on_drag(start, start - Vec2::new(0.0, 5000.0));
        assert_eq!(
            engine.drag_offset(Position::new(2, 1)),
            Vec2::new(0.0, -TILE.y)
        );
    }

    #[test]
    fn release_clears_the_session_unconditionally() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let start = cell_point(0, 0);

        engine.on_drag(start, start + Vec2::new(TILE.x, 0.0));
        assert_eq!(engine.on_release(), MoveOutcome::Moved);
        assert_eq!(engine.drag_offset(Position::new(0, 1)), Vec2::ZERO);
        assert_eq!(engine.on_release(), MoveOutcome::Ignored);
    }

    #[test]
    fn solving_commit_reports_solved_exactly_once() {
        // One slide away from solved: tile 2 sits right of its home
        let mut engine = engine_with(Board::from_tiles(2, 2, vec![0, 1, 3, 2]));
        let tap = Vec2::new(1.5 * TILE.x, 1.5 * TILE.y);

        assert_eq!(engine.on_tap(tap), MoveOutcome::Solved);
        assert!(engine.board().is_solved());

        // Any further commit leaves the solved arrangement again
        assert_eq!(
            engine.on_tap(Vec2::new(0.5 * TILE.x, 1.5 * TILE.y)),
            MoveOutcome::Moved
        );
    }

    #[test]
    fn construction_refuses_degenerate_grids() {
        assert_eq!(
            PuzzleEngine::new(1, 4, TILE).err(),
            Some(GridError::TooFewRows(1))
        );
        assert_eq!(
            PuzzleEngine::new(4, 0, TILE).err(),
            Some(GridError::TooFewColumns(0))
        );
        assert!(PuzzleEngine::new(2, 2, TILE).is_ok());
    }

    #[test]
    fn reshuffle_recreates_the_board_and_drops_the_drag() {
        let mut engine = engine_with(board_3x3([0, 1, 8, 3, 4, 5, 6, 7, 2]));
        let start = cell_point(0, 0);
        engine.on_drag(start, start + Vec2::new(30.0, 0.0));

        engine.reshuffle();

        assert_eq!(engine.drag_offset(Position::new(0, 0)), Vec2::ZERO);
        assert_eq!(engine.on_release(), MoveOutcome::Ignored);
        assert_permutation(engine.board());
    }
}
