//! Stable identity for values that move around a snapshot.
//!
//! Duplicates are told apart by occurrence: the second `7` from the left is
//! `7#1` wherever it ends up. Tokens are recomputed from each snapshot, so
//! nothing here carries state between calls.

use std::collections::HashMap;

use crate::trace::SortValue;

/// A value paired with how many equal values precede it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueToken {
    key: u128,
    occurrence: usize,
}

/// One token per position, in order.
pub fn value_tokens<T: SortValue>(snapshot: &[T]) -> Vec<ValueToken> {
    let mut counts: HashMap<u128, usize> = HashMap::new();
    snapshot
        .iter()
        .map(|value| {
            let key = value.identity();
            let count = counts.entry(key).or_insert(0);
            let token = ValueToken {
                key,
                occurrence: *count,
            };
            *count += 1;
            token
        })
        .collect()
}

/// Where each value sat in the first snapshot of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialIndexLookup {
    by_token: HashMap<ValueToken, usize>,
}

impl InitialIndexLookup {
    pub fn new<T: SortValue>(initial: &[T]) -> Self {
        let by_token = value_tokens(initial)
            .into_iter()
            .enumerate()
            .map(|(index, token)| (token, index))
            .collect();
        Self { by_token }
    }

    /// Initial index of every value in `snapshot`. Values that were not in
    /// the initial snapshot keep their current index.
    pub fn labels_for<T: SortValue>(&self, snapshot: &[T]) -> Vec<usize> {
        value_tokens(snapshot)
            .iter()
            .enumerate()
            .map(|(index, token)| self.by_token.get(token).copied().unwrap_or(index))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}
