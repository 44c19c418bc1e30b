use crate::moves::Move::{self, *};

/// Face priority R, U, F, L, D, B; within a face single, double, then inverse turn.
#[rustfmt::skip]
pub const MOVE_PRIORITY: [Move; 18] = [
    R, R2, R3,
    U, U2, U3,
    F, F2, F3,
    L, L2, L3,
    D, D2, D3,
    B, B2, B3,
];

/// Candidate successors of a node reached by `history`, best first.
///
/// Pruning:
/// - no move on the face just turned,
/// - no move on the face opposite the one just turned,
/// - no move whose opposite face was turned by both of the last two moves.
pub fn order_moves(history: &[Move]) -> Vec<Move> {
    let last = history.last().copied();
    let second_last = history.len().checked_sub(2).map(|i| history[i]);
    MOVE_PRIORITY
        .into_iter()
        .filter(|m| match last {
            None => true,
            Some(l) => {
                if m.is_same_layer(l) || m.is_opposite(l) {
                    return false;
                }
                match second_last {
                    Some(s) => !(m.is_opposite(l) && m.is_opposite(s)),
                    None => true,
                }
            }
        })
        .collect()
}
