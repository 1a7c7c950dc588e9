use std::sync::mpsc;
use std::thread;

use log::{debug, trace};

use crate::error::{BoardError, SearchError};
use crate::game::{Board, Move, Piece};

use super::heuristic::{Heuristic, SegmentHeuristic};

/// A root move together with the minimax score of the position it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveScore {
    pub mv: Move,
    pub score: i32,
}

/// Depth-limited minimax search without pruning.
///
/// Every node up to the requested depth is visited, so the scores are exact
/// for the given heuristic and both the sequential and the concurrent root
/// searches agree on them.
#[derive(Debug, Clone, Default)]
pub struct Search<H = SegmentHeuristic> {
    heuristic: H,
}

impl Search {
    pub fn new() -> Self {
        Search {
            heuristic: SegmentHeuristic,
        }
    }
}

impl<H: Heuristic> Search<H> {
    pub fn with_heuristic(heuristic: H) -> Self {
        Search { heuristic }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    /// Best achievable score for `piece` looking `depth` plies ahead.
    ///
    /// On maximizing plies `piece` moves, on minimizing plies its opponent does.
    pub fn minimax(
        &self,
        board: &Board,
        maximizing: bool,
        piece: Piece,
        depth: i32,
    ) -> Result<i32, SearchError> {
        let depth = check_args(piece, depth)?;
        Ok(self.search(board, maximizing, piece, depth)?)
    }

    fn search(
        &self,
        board: &Board,
        maximizing: bool,
        piece: Piece,
        depth: u32,
    ) -> Result<i32, BoardError> {
        if depth == 0 || board.is_game_over() {
            return Ok(self.heuristic.evaluate(board, piece));
        }

        let mover = if maximizing { piece } else { piece.opposite() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in board.legal_moves() {
            let child = board.apply_move(mover, mv)?;
            let score = self.search(&child, !maximizing, piece, depth - 1)?;
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        Ok(best)
    }

    /// Score every legal root move for `piece`, one after another.
    pub fn score_moves(
        &self,
        board: &Board,
        piece: Piece,
        depth: i32,
    ) -> Result<Vec<MoveScore>, SearchError> {
        let depth = check_args(piece, depth)?;
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let mut scores = Vec::with_capacity(legal.len());
        for mv in legal {
            let child = board.apply_move(piece, mv)?;
            let score = self.search(&child, false, piece, depth)?;
            debug!("column {} scores {} for {}", mv, score, piece.name());
            scores.push(MoveScore { mv, score });
        }
        Ok(scores)
    }

    /// Pick the best move for `piece`. Ties go to the lowest column.
    pub fn find_best_move(
        &self,
        board: &Board,
        piece: Piece,
        depth: i32,
    ) -> Result<Move, SearchError> {
        let scores = self.score_moves(board, piece, depth)?;
        select_best(&scores).ok_or(SearchError::NoLegalMoves)
    }

    /// Score every legal root move on its own worker thread.
    ///
    /// Each worker owns a private copy of `board` and reports its
    /// (index, move, score) over a channel. Results are put back into legal
    /// move order before returning, whatever order the workers finish in.
    pub fn concurrent_score_moves(
        &self,
        board: &Board,
        piece: Piece,
        depth: i32,
    ) -> Result<Vec<MoveScore>, SearchError> {
        let depth = check_args(piece, depth)?;
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let (tx, rx) = mpsc::channel::<(usize, Move, Result<i32, BoardError>)>();
        let (mut reports, panicked) = thread::scope(|scope| {
            let handles: Vec<_> = legal
                .iter()
                .copied()
                .enumerate()
                .map(|(index, mv)| {
                    let tx = tx.clone();
                    let snapshot = board.clone();
                    let handle = scope.spawn(move || {
                        let score = snapshot
                            .apply_move(piece, mv)
                            .and_then(|child| self.search(&child, false, piece, depth));
                        trace!("worker for column {} finished: {:?}", mv, score);
                        // The receiver outlives every worker.
                        let _ = tx.send((index, mv, score));
                    });
                    (mv, handle)
                })
                .collect();
            drop(tx);

            let reports: Vec<_> = rx.iter().collect();
            let mut panicked = None;
            for (mv, handle) in handles {
                if handle.join().is_err() && panicked.is_none() {
                    panicked = Some(mv);
                }
            }
            (reports, panicked)
        });

        if let Some(mv) = panicked {
            return Err(SearchError::WorkerPanicked {
                column: mv.column(),
            });
        }

        reports.sort_by_key(|&(index, _, _)| index);
        reports
            .into_iter()
            .map(|(_, mv, score)| -> Result<MoveScore, SearchError> {
                let score = score?;
                debug!("column {} scores {} for {}", mv, score, piece.name());
                Ok(MoveScore { mv, score })
            })
            .collect()
    }

    /// Same choice as [`Search::find_best_move`], with the root moves
    /// searched in parallel.
    pub fn concurrent_find_best_move(
        &self,
        board: &Board,
        piece: Piece,
        depth: i32,
    ) -> Result<Move, SearchError> {
        let scores = self.concurrent_score_moves(board, piece, depth)?;
        select_best(&scores).ok_or(SearchError::NoLegalMoves)
    }
}

/// The first move with the strictly greatest score.
pub fn select_best(scores: &[MoveScore]) -> Option<Move> {
    let mut best: Option<MoveScore> = None;
    for &candidate in scores {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best.map(|b| b.mv)
}

/// Reject an empty perspective piece and negative depths before searching.
fn check_args(piece: Piece, depth: i32) -> Result<u32, SearchError> {
    if piece.is_empty() {
        return Err(BoardError::EmptyPiece.into());
    }
    u32::try_from(depth).map_err(|_| SearchError::NegativeDepth(depth))
}

/// Minimax with the default heuristic.
pub fn minimax(
    board: &Board,
    maximizing: bool,
    piece: Piece,
    depth: i32,
) -> Result<i32, SearchError> {
    Search::new().minimax(board, maximizing, piece, depth)
}

/// Sequential best-move search with the default heuristic.
pub fn find_best_move(board: &Board, piece: Piece, depth: i32) -> Result<Move, SearchError> {
    Search::new().find_best_move(board, piece, depth)
}

/// Concurrent best-move search with the default heuristic.
pub fn concurrent_find_best_move(
    board: &Board,
    piece: Piece,
    depth: i32,
) -> Result<Move, SearchError> {
    Search::new().concurrent_find_best_move(board, piece, depth)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::ai::heuristic::evaluate;
    use crate::game::COLS;

    const A: Piece = Piece::PlayerA;
    const B: Piece = Piece::PlayerB;

    /// Scores every position the same, forcing a tie across all moves.
    struct FlatHeuristic;

    impl Heuristic for FlatHeuristic {
        fn evaluate(&self, _board: &Board, _piece: Piece) -> i32 {
            0
        }
    }

    /// Flat scores, but the further left the last piece, the slower the
    /// evaluation, so low columns finish last.
    struct SlowLeftHeuristic;

    impl Heuristic for SlowLeftHeuristic {
        fn evaluate(&self, board: &Board, _piece: Piece) -> i32 {
            let col = (0..board.cols())
                .find(|&c| board.height(c) != Some(0))
                .unwrap_or(0);
            thread::sleep(Duration::from_millis(((board.cols() - col) * 15) as u64));
            0
        }
    }

    fn sample_boards() -> Vec<Board> {
        vec![
            Board::standard(),
            Board::standard().play_columns(&[3, 3, 2]).unwrap(),
            Board::standard()
                .play_columns(&[0, 1, 1, 2, 2, 3, 2, 3])
                .unwrap(),
            Board::standard().play_columns(&[0, 0, 1, 1, 2, 2, 3]).unwrap(),
        ]
    }

    // --- minimax ---

    #[test]
    fn depth_zero_is_static_evaluation() {
        for board in sample_boards() {
            for piece in [A, B] {
                for maximizing in [true, false] {
                    assert_eq!(
                        minimax(&board, maximizing, piece, 0).unwrap(),
                        evaluate(&board, piece)
                    );
                }
            }
        }
    }

    #[test]
    fn terminal_board_is_static_evaluation() {
        let won = Board::standard().play_columns(&[0, 0, 1, 1, 2, 2, 3]).unwrap();
        assert!(won.is_game_over());
        assert_eq!(minimax(&won, true, A, 3).unwrap(), evaluate(&won, A));
        assert_eq!(minimax(&won, false, B, 2).unwrap(), evaluate(&won, B));
    }

    #[test]
    fn negative_depth_rejected() {
        let board = Board::standard();
        assert_eq!(
            minimax(&board, true, A, -1),
            Err(SearchError::NegativeDepth(-1))
        );
        assert_eq!(
            find_best_move(&board, A, -2),
            Err(SearchError::NegativeDepth(-2))
        );
        assert_eq!(
            concurrent_find_best_move(&board, A, -3),
            Err(SearchError::NegativeDepth(-3))
        );
    }

    #[test]
    fn one_ply_takes_the_extreme_child() {
        let board = Board::standard().play_columns(&[3, 3]).unwrap();
        let children: Vec<i32> = board
            .legal_moves()
            .into_iter()
            .map(|mv| evaluate(&board.apply_move(A, mv).unwrap(), A))
            .collect();
        let max = children.iter().copied().max().unwrap();
        assert_eq!(minimax(&board, true, A, 1).unwrap(), max);

        let replies: Vec<i32> = board
            .legal_moves()
            .into_iter()
            .map(|mv| evaluate(&board.apply_move(B, mv).unwrap(), A))
            .collect();
        let min = replies.iter().copied().min().unwrap();
        assert_eq!(minimax(&board, false, A, 1).unwrap(), min);
    }

    #[test]
    fn empty_perspective_rejected_at_every_depth() {
        let board = Board::standard().play_columns(&[3, 4]).unwrap();
        let expected = Err(SearchError::Board(BoardError::EmptyPiece));
        for depth in 0..3 {
            for maximizing in [true, false] {
                assert_eq!(minimax(&board, maximizing, Piece::Empty, depth), expected);
            }
            assert_eq!(
                find_best_move(&board, Piece::Empty, depth),
                Err(SearchError::Board(BoardError::EmptyPiece))
            );
            assert_eq!(
                concurrent_find_best_move(&board, Piece::Empty, depth),
                Err(SearchError::Board(BoardError::EmptyPiece))
            );
        }
    }

    // --- root selection ---

    #[test]
    fn select_best_keeps_earliest_tie() {
        let scores = [
            MoveScore { mv: Move::new(1), score: 4 },
            MoveScore { mv: Move::new(2), score: 9 },
            MoveScore { mv: Move::new(4), score: 9 },
            MoveScore { mv: Move::new(5), score: -3 },
        ];
        assert_eq!(select_best(&scores), Some(Move::new(2)));
        assert_eq!(select_best(&[]), None);
    }

    #[test]
    fn full_board_has_no_move() {
        let mut board = Board::new(4, 4).unwrap();
        // Columns of AABB / BBAA alternate so nothing connects.
        for col in 0..4 {
            let pattern = if col % 2 == 0 { [A, A, B, B] } else { [B, B, A, A] };
            for piece in pattern {
                board = board.apply_move(piece, Move::new(col)).unwrap();
            }
        }
        assert!(board.is_draw());
        assert_eq!(
            find_best_move(&board, A, 2),
            Err(SearchError::NoLegalMoves)
        );
        assert_eq!(
            concurrent_find_best_move(&board, A, 2),
            Err(SearchError::NoLegalMoves)
        );
    }

    #[test]
    fn takes_winning_move() {
        // PlayerA holds columns 0-2 on the bottom row; column 3 wins.
        let board = Board::standard().play_columns(&[0, 0, 1, 1, 2, 2]).unwrap();
        assert_eq!(find_best_move(&board, A, 3).unwrap(), Move::new(3));
        assert_eq!(concurrent_find_best_move(&board, A, 3).unwrap(), Move::new(3));
    }

    #[test]
    fn blocks_opponent_win() {
        // PlayerB holds columns 0-2 on the bottom row; PlayerA must take column 3.
        let board = Board::standard()
            .play_columns(&[6, 0, 6, 1, 5, 2])
            .unwrap();
        assert_eq!(board.next_to_move(), A);
        assert_eq!(find_best_move(&board, A, 3).unwrap(), Move::new(3));
        assert_eq!(concurrent_find_best_move(&board, A, 3).unwrap(), Move::new(3));
    }

    #[test]
    fn sequential_and_concurrent_scores_agree() {
        let search = Search::new();
        for board in sample_boards() {
            for depth in 0..3 {
                let piece = board.next_to_move();
                let sequential = search.score_moves(&board, piece, depth).unwrap();
                let concurrent = search.concurrent_score_moves(&board, piece, depth).unwrap();
                assert_eq!(sequential, concurrent);
                assert_eq!(
                    search.find_best_move(&board, piece, depth).unwrap(),
                    search.concurrent_find_best_move(&board, piece, depth).unwrap()
                );
            }
        }
    }

    #[test]
    fn forced_tie_resolves_to_lowest_column() {
        let search = Search::with_heuristic(FlatHeuristic);
        let board = Board::standard();
        assert_eq!(search.find_best_move(&board, A, 2).unwrap(), Move::new(0));
        assert_eq!(
            search.concurrent_find_best_move(&board, A, 2).unwrap(),
            Move::new(0)
        );

        // With column 0 full the lowest legal column is 1.
        let board = Board::standard()
            .play_columns(&[0, 0, 0, 0, 0, 0])
            .unwrap();
        assert_eq!(search.find_best_move(&board, A, 1).unwrap(), Move::new(1));
        assert_eq!(
            search.concurrent_find_best_move(&board, A, 1).unwrap(),
            Move::new(1)
        );
    }

    #[test]
    fn concurrent_order_survives_out_of_order_completion() {
        let search = Search::with_heuristic(SlowLeftHeuristic);
        let board = Board::standard();
        let scores = search.concurrent_score_moves(&board, A, 0).unwrap();
        let columns: Vec<usize> = scores.iter().map(|s| s.mv.column()).collect();
        assert_eq!(columns, (0..COLS).collect::<Vec<_>>());
        assert_eq!(
            search.concurrent_find_best_move(&board, A, 0).unwrap(),
            Move::new(0)
        );
    }

    #[test]
    fn original_board_unchanged_by_search() {
        let board = Board::standard().play_columns(&[3, 2, 3]).unwrap();
        let snapshot = board.clone();
        concurrent_find_best_move(&board, B, 2).unwrap();
        find_best_move(&board, B, 2).unwrap();
        assert_eq!(board, snapshot);
    }
}
