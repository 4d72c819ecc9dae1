//! Set scoring rule.
//!
//! A set goes to 7, win-by-2 capped at 8: the loser's score N is 0..=6 and
//! the winner's score is 7 unless N is 6, in which case it is 8. Entry forms
//! offer buttons 0..=6 per side and fill the other side automatically; both
//! scores are never entered independently.

/// Selectable losing scores.
pub const SCORE_SELECTION: [u8; 7] = [0, 1, 2, 3, 4, 5, 6];

/// Winning score for an observed losing score.
pub fn winning_score(losing_score: u8) -> u8 {
    if losing_score == 6 {
        8
    } else {
        7
    }
}

/// Which side the selected (losing) score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSide {
    Mine,
    Opponent,
}

/// Score pair produced by selecting losing score `n` for `side`.
pub fn pair_for_selection(side: ScoreSide, n: u8) -> (u8, u8) {
    let winner = winning_score(n);
    match side {
        ScoreSide::Mine => (n, winner),
        ScoreSide::Opponent => (winner, n),
    }
}

/// Whether a score pair is one the selector could have produced.
///
/// Symmetric: either side may hold the losing score.
pub fn is_valid_score_pair(my_score: u8, opponent_score: u8) -> bool {
    selected_score(my_score, opponent_score).is_some()
}

/// The selected losing score and its side, if the pair is valid.
pub fn selected_score(my_score: u8, opponent_score: u8) -> Option<(ScoreSide, u8)> {
    if my_score <= 6 && opponent_score == winning_score(my_score) {
        return Some((ScoreSide::Mine, my_score));
    }
    if opponent_score <= 6 && my_score == winning_score(opponent_score) {
        return Some((ScoreSide::Opponent, opponent_score));
    }
    None
}
