use std::collections::HashSet;
use std::hash::Hash;

/// Sizes of the three regions of a two-set Venn diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetOverlap {
    /// |A \ B|
    pub only_first: usize,

    /// |B \ A|
    pub only_second: usize,

    /// |A ∩ B|
    pub shared: usize,
}

impl SetOverlap {
    /// Partition `first` and `second` into their difference and intersection sizes.
    #[must_use]
    pub fn between<T: Eq + Hash>(first: &HashSet<T>, second: &HashSet<T>) -> Self {
        let shared = first.intersection(second).count();
        Self {
            only_first: first.len() - shared,
            only_second: second.len() - shared,
            shared,
        }
    }

    /// |A|
    #[must_use]
    pub fn first_total(&self) -> usize {
        self.only_first + self.shared
    }

    /// |B|
    #[must_use]
    pub fn second_total(&self) -> usize {
        self.only_second + self.shared
    }

    /// |A ∪ B|
    #[must_use]
    pub fn union(&self) -> usize {
        self.only_first + self.only_second + self.shared
    }
}
