use std::collections::HashSet;

use crate::analysis::overlap::SetOverlap;
use crate::core::record::BlastHits;

/// The distinct subject sequence ids hit by one BLAST search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    ids: HashSet<String>,
}

impl IdentifierSet {
    /// Collect subject ids from loaded hits, collapsing duplicates.
    #[must_use]
    pub fn from_hits(hits: &BlastHits) -> Self {
        hits.subject_ids().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }

    /// Partition sizes of `self` (first) against `other` (second).
    #[must_use]
    pub fn overlap(&self, other: &IdentifierSet) -> SetOverlap {
        SetOverlap::between(&self.ids, &other.ids)
    }
}

impl<'a> FromIterator<&'a str> for IdentifierSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::tests::record;

    fn hits(subjects: &[&str]) -> BlastHits {
        BlastHits::new(
            subjects
                .iter()
                .map(|s| record(s, 99.0, 0.0, 100.0))
                .collect(),
        )
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = IdentifierSet::from_hits(&hits(&["s1", "s2", "s1", "s3", "s2"]));
        assert_eq!(set.len(), 3);
        assert!(set.contains("s1"));
        assert!(set.contains("s3"));
        assert!(!set.contains("s4"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let h = hits(&["a", "b", "b", "c"]);
        assert_eq!(IdentifierSet::from_hits(&h), IdentifierSet::from_hits(&h));
    }

    #[test]
    fn test_empty_hits() {
        let set = IdentifierSet::from_hits(&BlastHits::new(Vec::new()));
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_overlap_five_and_five_sharing_two() {
        let a = IdentifierSet::from_hits(&hits(&["s1", "s2", "s3", "s4", "s5"]));
        let b = IdentifierSet::from_hits(&hits(&["s4", "s5", "s6", "s7", "s8"]));
        let overlap = a.overlap(&b);
        assert_eq!(overlap.only_first, 3);
        assert_eq!(overlap.only_second, 3);
        assert_eq!(overlap.shared, 2);
    }
}
