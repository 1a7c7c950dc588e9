use crate::game::{Board, Piece, Segment};

/// Trait for evaluating a board position from a piece's perspective.
///
/// Scores are relative: higher is better for `piece`. Implementations are
/// shared by concurrent search workers, hence `Sync`.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board, piece: Piece) -> i32;
}

/// Score of a window holding 0, 1, 2, 3 or 4 pieces of a single color.
pub const SEGMENT_WEIGHTS: [i32; 5] = [0, 1, 5, 50, 5000];

/// Default heuristic that sums a weight for every 4-cell window holding
/// pieces of only one color.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentHeuristic;

impl SegmentHeuristic {
    /// Contribution of a single window. Windows mixing both colors count 0.
    pub fn score_segment(segment: &Segment, piece: Piece) -> i32 {
        let mut owner = Piece::Empty;
        let mut count = 0;
        for &cell in segment {
            if cell.is_empty() {
                continue;
            }
            if owner.is_empty() {
                owner = cell;
            } else if cell != owner {
                return 0;
            }
            count += 1;
        }

        let weight = SEGMENT_WEIGHTS[count];
        if owner.is_empty() {
            0
        } else if owner == piece {
            weight
        } else if owner == piece.opposite() {
            -weight
        } else {
            0
        }
    }
}

impl Heuristic for SegmentHeuristic {
    fn evaluate(&self, board: &Board, piece: Piece) -> i32 {
        board
            .all_segments()
            .map(|segment| Self::score_segment(&segment, piece))
            .sum()
    }
}

/// Score `board` for `piece` with the default segment heuristic.
pub fn evaluate(board: &Board, piece: Piece) -> i32 {
    SegmentHeuristic.evaluate(board, piece)
}
