use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Most frequent value, breaking ties toward the smallest value.
///
/// Returns `None` for empty input.
pub fn mode_lowest<T, I>(values: I) -> Option<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    // ascending scan keeps the smallest value on ties
    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().is_none_or(|(_, n)| count > *n) {
            best = Some((value, count));
        }
    }
    best
}

/// Most frequent value, breaking ties toward the value seen first.
///
/// Returns `None` for empty input.
pub fn mode_first_seen<T, I>(values: I) -> Option<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next()
}

/// Occurrence count of every distinct value, highest count first.
///
/// Values with equal counts stay in first-seen order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<(T, usize)> = Vec::new();
    let mut index: HashMap<T, usize> = HashMap::new();

    for v in values {
        if let Some(&i) = index.get(&v) {
            counts[i].1 += 1;
        } else {
            index.insert(v.clone(), counts.len());
            counts.push((v, 1));
        }
    }

    // stable sort: equal counts keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
