//! Tournament selection over batched draws.
//!
//! Selection consumes pre-drawn candidate indices rather than touching
//! random state itself; given the fitness vector it is a pure array
//! transform.

/// Pick one parent index per child slot by tournament.
///
/// `draws` holds `rounds` consecutive candidate indices per slot, drawn
/// with replacement from `[0, fitness.len())`. The winner of each
/// tournament is the candidate with the maximum fitness; ties keep the
/// earliest draw, so the result is fully determined by the inputs.
/// A single round degenerates to uniform random selection.
pub fn select_parents(fitness: &[f64], draws: &[usize], rounds: usize, parents: &mut [usize]) {
    debug_assert!(rounds > 0);
    debug_assert_eq!(draws.len(), parents.len() * rounds);

    for (slot, parent) in parents.iter_mut().enumerate() {
        let candidates = &draws[slot * rounds..(slot + 1) * rounds];
        let mut winner = candidates[0];
        for &challenger in &candidates[1..] {
            if fitness[challenger] > fitness[winner] {
                winner = challenger;
            }
        }
        *parent = winner;
    }
}
