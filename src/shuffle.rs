use crate::question::{OptionKey, Question};
use itertools::Itertools;
use rand::Rng;
use std::collections::BTreeMap;

/// Returns a uniformly random permutation of `items`, leaving the input untouched.
pub fn shuffle_sequence<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_sequence_with(items, &mut rand::thread_rng())
}

/// Fisher-Yates over a copy of `items`, walking down from the last slot.
pub fn shuffle_sequence_with<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Redistributes the option texts among the existing keys.
///
/// Returns the new mapping together with the key that now holds the text the
/// `correct_key` pointed at. A `correct_key` that is not present is returned as is.
pub fn shuffle_options(
    options: &BTreeMap<OptionKey, String>,
    correct_key: &str,
) -> (BTreeMap<OptionKey, String>, OptionKey) {
    shuffle_options_with(options, correct_key, &mut rand::thread_rng())
}

pub fn shuffle_options_with<R: Rng>(
    options: &BTreeMap<OptionKey, String>,
    correct_key: &str,
    rng: &mut R,
) -> (BTreeMap<OptionKey, String>, OptionKey) {
    let keys: Vec<&OptionKey> = options.keys().sorted().collect();
    let values: Vec<&String> = keys.iter().map(|k| &options[*k]).collect();
    let correct_pos = keys.iter().position(|k| k.as_str() == correct_key);

    // permute positions so the correct text can be followed to its new slot
    let order: Vec<usize> = (0..values.len()).collect();
    let order = shuffle_sequence_with(&order, rng);

    let mut new_correct = correct_key.to_string();
    let mut shuffled = BTreeMap::new();
    for (key, &from) in keys.iter().zip(order.iter()) {
        if Some(from) == correct_pos {
            new_correct = (*key).clone();
        }
        shuffled.insert((*key).clone(), values[from].clone());
    }

    (shuffled, new_correct)
}

/// Session-local copy of `question` with shuffled options. The bank copy is not touched.
pub fn shuffle_question(question: &Question) -> Question {
    shuffle_question_with(question, &mut rand::thread_rng())
}

pub fn shuffle_question_with<R: Rng>(question: &Question, rng: &mut R) -> Question {
    let (options, correct_answer) =
        shuffle_options_with(&question.options, &question.correct_answer, rng);
    Question {
        options,
        correct_answer,
        ..question.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::sample_question;
    use itertools::Itertools;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<OptionKey, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn shuffle_sequence_keeps_input_intact() {
        let input = vec![1, 2, 3, 4, 5];
        let shuffled = shuffle_sequence(&input);
        assert_eq!(input, vec![1, 2, 3, 4, 5]);
        assert_eq!(shuffled.len(), 5);
        assert_eq!(
            shuffled.iter().sorted().collect::<Vec<_>>(),
            input.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn shuffle_sequence_handles_empty_and_single() {
        let empty: Vec<u8> = vec![];
        assert!(shuffle_sequence(&empty).is_empty());
        assert_eq!(shuffle_sequence(&[42]), vec![42]);
    }

    #[test]
    fn shuffle_sequence_is_deterministic_for_a_seed() {
        let input: Vec<u32> = (0..20).collect();
        let a = shuffle_sequence_with(&input, &mut StdRng::seed_from_u64(7));
        let b = shuffle_sequence_with(&input, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_sequence_reaches_every_permutation_of_three() {
        let input = ['x', 'y', 'z'];
        let mut rng = StdRng::seed_from_u64(1234);
        let mut counts: HashMap<Vec<char>, usize> = HashMap::new();
        for _ in 0..6000 {
            *counts.entry(shuffle_sequence_with(&input, &mut rng)).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 6);
        // each of the 6 permutations expects ~1000 hits
        for (perm, n) in counts {
            assert!((800..1200).contains(&n), "{:?} drawn {} times", perm, n);
        }
    }

    #[test]
    fn shuffle_options_tracks_correct_text() {
        let opts = options(&[("a", "red"), ("b", "green"), ("c", "blue")]);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let (shuffled, key) = shuffle_options_with(&opts, "b", &mut rng);
            assert_eq!(shuffled[&key], "green");
            assert_eq!(
                shuffled.keys().collect::<Vec<_>>(),
                opts.keys().collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn shuffle_options_moves_correct_text_to_every_key() {
        let opts = options(&[("a", "one"), ("b", "two"), ("c", "three"), ("d", "four")]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut landed: HashMap<OptionKey, usize> = HashMap::new();
        for _ in 0..4000 {
            let (_, key) = shuffle_options_with(&opts, "a", &mut rng);
            *landed.entry(key).or_insert(0) += 1;
        }
        assert_eq!(landed.len(), 4);
        for (key, n) in landed {
            assert!((800..1200).contains(&n), "{} chosen {} times", key, n);
        }
    }

    #[test]
    fn shuffle_options_with_unknown_correct_key_keeps_it() {
        let opts = options(&[("a", "one"), ("b", "two")]);
        let (shuffled, key) = shuffle_options(&opts, "z");
        assert_eq!(key, "z");
        assert_eq!(shuffled.len(), 2);
    }

    #[test]
    fn shuffle_question_preserves_identity_fields() {
        let q = sample_question(11, "d", 3);
        let shuffled = shuffle_question(&q);
        assert_eq!(shuffled.id, 11);
        assert_eq!(shuffled.points, 3);
        assert_eq!(shuffled.question, q.question);
        assert_eq!(shuffled.correct_text(), q.correct_text());
        // the bank copy is untouched
        assert_eq!(q.correct_answer, "d");
    }

    proptest! {
        #[test]
        fn prop_shuffle_sequence_is_permutation(items in proptest::collection::vec(any::<i32>(), 0..64)) {
            let before = items.clone();
            let shuffled = shuffle_sequence(&items);
            prop_assert_eq!(&items, &before);
            prop_assert_eq!(shuffled.len(), items.len());
            let mut a = shuffled.clone();
            let mut b = items.clone();
            a.sort();
            b.sort();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_shuffle_options_preserves_keys_and_values(
            opts in proptest::collection::btree_map("[a-f]", "[a-z ]{0,12}", 1..6),
            pick in any::<prop::sample::Index>(),
        ) {
            let correct = opts.keys().nth(pick.index(opts.len())).unwrap().clone();
            let (shuffled, new_key) = shuffle_options(&opts, &correct);

            prop_assert_eq!(
                shuffled.keys().collect::<Vec<_>>(),
                opts.keys().collect::<Vec<_>>()
            );
            let mut before: Vec<_> = opts.values().cloned().collect();
            let mut after: Vec<_> = shuffled.values().cloned().collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
            prop_assert_eq!(&shuffled[&new_key], &opts[&correct]);
        }
    }
}
