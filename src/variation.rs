//! Variation: one-point crossover and point mutation.
//!
//! Children are produced with batch operations over the flat bit
//! matrix: a bulk copy of every selected parent row, a conditional
//! suffix exchange per crossing pair, and a single masked flip pass
//! for mutation. The current generation is read-only throughout;
//! writes land exclusively in the next-generation buffer.

use crate::planner::DrawBatch;
use crate::population::Population;

/// Fill the next-generation buffer from the selected parents.
///
/// For each consecutive child pair `(2k, 2k + 1)` whose participation
/// draw fired, the children exchange suffixes at the pair's crossover
/// point; otherwise each child is a copy of its parent. Every child
/// bit is then flipped where the mutation mask is set. The next
/// buffer's cached fitness is left stale until the following
/// evaluation pass.
pub fn populate_children(
    current: &Population,
    parents: &[usize],
    batch: &DrawBatch,
    next: &mut Population,
) {
    debug_assert_eq!(parents.len(), current.size());
    debug_assert_eq!(next.size(), current.size());
    debug_assert_eq!(next.string_length(), current.string_length());
    debug_assert_eq!(batch.cross_mask.len(), parents.len() / 2);
    debug_assert_eq!(batch.mutation_mask.len(), next.bits().len());

    // Copy every selected parent row into its child slot.
    for (slot, &parent) in parents.iter().enumerate() {
        next.individual_mut(slot).copy_from_slice(current.individual(parent));
    }

    // Exchange suffixes for pairs whose participation draw fired.
    for (pair, (&crossed, &point)) in
        batch.cross_mask.iter().zip(&batch.cross_points).enumerate()
    {
        if !crossed {
            continue;
        }
        let (a, b) = (2 * pair, 2 * pair + 1);
        next.individual_mut(a)[point..].copy_from_slice(&current.individual(parents[b])[point..]);
        next.individual_mut(b)[point..].copy_from_slice(&current.individual(parents[a])[point..]);
    }

    // Masked flip over the whole next generation.
    for (bit, &flip) in next.bits_mut().iter_mut().zip(&batch.mutation_mask) {
        *bit ^= flip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_batch(size: usize, string_length: usize) -> DrawBatch {
        DrawBatch {
            tournament: Vec::new(),
            cross_mask: vec![false; size / 2],
            cross_points: vec![1; size / 2],
            mutation_mask: vec![false; size * string_length],
        }
    }

    fn two_parent_setup() -> (Population, Vec<usize>) {
        let mut current = Population::new(2, 8).unwrap();
        current.individual_mut(1).fill(true);
        (current, vec![0, 1])
    }

    #[test]
    fn test_crossover_exchanges_suffixes() {
        let (current, parents) = two_parent_setup();
        let mut next = Population::new(2, 8).unwrap();
        let mut batch = quiet_batch(2, 8);
        batch.cross_mask[0] = true;
        batch.cross_points[0] = 3;

        populate_children(&current, &parents, &batch, &mut next);

        // Child 0: parent 0 prefix, parent 1 suffix.
        assert_eq!(next.individual(0)[..3], current.individual(0)[..3]);
        assert_eq!(next.individual(0)[3..], current.individual(1)[3..]);
        // Child 1: parent 1 prefix, parent 0 suffix.
        assert_eq!(next.individual(1)[..3], current.individual(1)[..3]);
        assert_eq!(next.individual(1)[3..], current.individual(0)[3..]);
    }

    #[test]
    fn test_non_crossing_pair_copies_parents() {
        let (current, parents) = two_parent_setup();
        let mut next = Population::new(2, 8).unwrap();
        let batch = quiet_batch(2, 8);

        populate_children(&current, &parents, &batch, &mut next);

        assert_eq!(next.individual(0), current.individual(0));
        assert_eq!(next.individual(1), current.individual(1));
    }

    #[test]
    fn test_children_come_from_selected_parents() {
        let mut current = Population::new(4, 4).unwrap();
        current.individual_mut(3).fill(true);
        // Every slot selects parent 3.
        let parents = vec![3; 4];
        let mut next = Population::new(4, 4).unwrap();
        let batch = quiet_batch(4, 4);

        populate_children(&current, &parents, &batch, &mut next);

        assert!(next.bits().iter().all(|&b| b));
    }

    #[test]
    fn test_mutation_flips_exactly_the_mask() {
        let (current, parents) = two_parent_setup();
        let mut next = Population::new(2, 8).unwrap();
        let mut batch = quiet_batch(2, 8);
        batch.mutation_mask[0] = true;
        batch.mutation_mask[9] = true;

        populate_children(&current, &parents, &batch, &mut next);

        // Parent 0 is all clear, parent 1 all set; the flips invert
        // bit 0 of child 0 and bit 1 of child 1.
        assert!(next.individual(0)[0]);
        assert!(next.individual(0)[1..].iter().all(|&b| !b));
        assert!(!next.individual(1)[1]);
        assert!(next.individual(1)[0]);
        assert!(next.individual(1)[2..].iter().all(|&b| b));
    }

    #[test]
    fn test_next_buffer_fitness_is_stale() {
        let (mut current, parents) = two_parent_setup();
        let mut next = Population::new(2, 8).unwrap();
        crate::fitness::evaluate_population(&mut next, &crate::fitness::OneMax);
        crate::fitness::evaluate_population(&mut current, &crate::fitness::OneMax);
        assert!(next.is_evaluated());

        let batch = quiet_batch(2, 8);
        populate_children(&current, &parents, &batch, &mut next);

        assert!(!next.is_evaluated());
        assert!(current.is_evaluated());
    }
}
