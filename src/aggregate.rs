use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

fn counts<T, I>(values: I) -> HashMap<T, usize>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    let mut counts = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Count per distinct value, most frequent first; ties in ascending value order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Ord,
{
    let mut sorted: Vec<(T, usize)> = counts(values).into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// Every value that reaches the highest frequency, ascending.
pub fn mode<T, I>(values: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Ord,
{
    let counts = counts(values);
    let Some(&top) = counts.values().max() else {
        return Vec::new();
    };
    let mut modes: Vec<T> = counts
        .into_iter()
        .filter(|&(_, count)| count == top)
        .map(|(value, _)| value)
        .collect();
    modes.sort();
    modes
}

pub fn distinct_count<T, I>(values: I) -> usize
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    values.into_iter().collect::<HashSet<_>>().len()
}

/// The most frequent pair. Pairs are ranked in ascending key order, so on a
/// tie the smallest pair wins.
pub fn most_common_pair<A, B, I>(pairs: I) -> Option<((A, B), usize)>
where
    I: IntoIterator<Item = (A, B)>,
    A: Ord,
    B: Ord,
{
    let mut grouped: BTreeMap<(A, B), usize> = BTreeMap::new();
    for pair in pairs {
        *grouped.entry(pair).or_insert(0) += 1;
    }
    grouped
        .into_iter()
        .fold(None, |best, (pair, count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((pair, count)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_returns_all_ties() {
        assert_eq!(mode(["b", "a", "b", "a", "c"]), vec!["a", "b"]);
        assert_eq!(mode([7, 7, 3]), vec![7]);
        assert!(mode(Vec::<u32>::new()).is_empty());
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts(["Customer", "Subscriber", "Subscriber", "Dependent", "Customer", "Subscriber"]);
        assert_eq!(
            counts,
            vec![("Subscriber", 3), ("Customer", 2), ("Dependent", 1)]
        );
        let tied = value_counts(["b", "a"]);
        assert_eq!(tied, vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn test_distinct_count() {
        assert_eq!(distinct_count([1, 1, 2, 3, 3]), 3);
        assert_eq!(distinct_count(Vec::<u8>::new()), 0);
    }

    #[test]
    fn test_most_common_pair_single_winner() {
        let pairs = vec![("B", "C"), ("A", "B"), ("B", "C"), ("A", "B"), ("C", "A")];
        assert_eq!(most_common_pair(pairs), Some((("A", "B"), 2)));
        assert_eq!(
            most_common_pair(vec![("X", "Y"), ("A", "Z"), ("X", "Y")]),
            Some((("X", "Y"), 2))
        );
        assert_eq!(most_common_pair(Vec::<(u8, u8)>::new()), None);
    }
}
