//! Player turn order.
//!
//! Each team is shuffled on its own, then the two lists are interleaved
//! first-team-first. When one team runs out, the rest of the longer team
//! follows in sequence.

use crate::core::GameRng;

/// Alternate items from `first` and `second`, then append the leftover tail.
///
/// ```
/// use chhota_pandit::session::order::interleave;
///
/// let order = interleave(&["A", "B", "E"], &["C", "D"]);
/// assert_eq!(order, vec!["A", "C", "B", "D", "E"]);
/// ```
pub fn interleave<T: Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let longest = first.len().max(second.len());
    let mut order = Vec::with_capacity(first.len() + second.len());

    for i in 0..longest {
        if let Some(item) = first.get(i) {
            order.push(item.clone());
        }
        if let Some(item) = second.get(i) {
            order.push(item.clone());
        }
    }

    order
}

/// Shuffle both rosters independently and interleave them.
pub fn generate_player_order(rng: &mut GameRng, first: &[String], second: &[String]) -> Vec<String> {
    let mut first = first.to_vec();
    let mut second = second.to_vec();
    rng.shuffle(&mut first);
    rng.shuffle(&mut second);
    interleave(&first, &second)
}
