use crate::core::{Assignment, Participant, RandomSource, Result};
use crate::utils::error::SantaError;
use rand::rngs::ThreadRng;
use rand::Rng;

/// Production randomness backed by the thread-local RNG.
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn pick(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Shuffles a copy of `participants` and pairs each with the next one in the
/// shuffled order, the last wrapping around to the first.
pub fn generate_matches<R: RandomSource + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    if participants.is_empty() {
        return Err(SantaError::EmptyInput);
    }
    if participants.len() == 1 {
        tracing::warn!(
            "Only one participant; {} will be matched with themselves",
            participants[0].name
        );
    }

    let mut shuffled = participants.to_vec();
    shuffle(&mut shuffled, rng);

    Ok(cyclic_pairs(shuffled))
}

/// Fisher–Yates: every ordering is equally likely given a uniform `rng`.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.pick(i + 1);
        items.swap(i, j);
    }
}

pub fn cyclic_pairs(ordered: Vec<Participant>) -> Vec<Assignment> {
    let n = ordered.len();
    (0..n)
        .map(|i| Assignment {
            giver: ordered[i].clone(),
            recipient: ordered[(i + 1) % n].clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always picks the upper end, which leaves the order untouched.
    struct Identity;

    impl RandomSource for Identity {
        fn pick(&mut self, bound: usize) -> usize {
            bound - 1
        }
    }

    /// Replays a fixed sequence of picks, reduced into range.
    struct Scripted(Vec<usize>, usize);

    impl RandomSource for Scripted {
        fn pick(&mut self, bound: usize) -> usize {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value % bound
        }
    }

    fn abc() -> Vec<Participant> {
        vec![
            Participant::new("A", "a@x"),
            Participant::new("B", "b@x"),
            Participant::new("C", "c@x"),
        ]
    }

    fn names(assignments: &[Assignment]) -> Vec<(String, String)> {
        assignments
            .iter()
            .map(|a| (a.giver.name.clone(), a.recipient.name.clone()))
            .collect()
    }

    #[test]
    fn test_identity_shuffle_gives_cyclic_pairs() {
        let matches = generate_matches(&abc(), &mut Identity).unwrap();

        assert_eq!(
            names(&matches),
            vec![
                ("A".to_string(), "B".to_string()),
                ("B".to_string(), "C".to_string()),
                ("C".to_string(), "A".to_string()),
            ]
        );
    }

    #[test]
    fn test_scripted_shuffle_is_deterministic() {
        // i=2 picks 0 -> [C, B, A]; i=1 picks 0 -> [B, C, A]
        let matches = generate_matches(&abc(), &mut Scripted(vec![0], 0)).unwrap();

        assert_eq!(
            names(&matches),
            vec![
                ("B".to_string(), "C".to_string()),
                ("C".to_string(), "A".to_string()),
                ("A".to_string(), "B".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = generate_matches(&[], &mut Identity);
        assert!(matches!(result, Err(SantaError::EmptyInput)));
    }

    #[test]
    fn test_single_participant_matches_themselves() {
        let solo = vec![Participant::new("A", "a@x")];
        let matches = generate_matches(&solo, &mut ThreadRandom::new()).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].giver, matches[0].recipient);
    }

    #[test]
    fn test_shuffle_keeps_every_element() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut ThreadRandom::new());
        items.sort_unstable();
        assert_eq!(items, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_cyclic_pairs_of_empty_list_is_empty() {
        assert!(cyclic_pairs(Vec::new()).is_empty());
    }
}
