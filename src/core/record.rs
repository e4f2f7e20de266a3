use std::path::{Path, PathBuf};

/// Column names of tabular BLAST output, in file order.
pub const BLAST_COLUMNS: [&str; 12] = [
    "qseqid", "sseqid", "pident", "length", "mismatch", "gapopen", "qstart", "qend", "sstart",
    "send", "evalue", "bitscore",
];

/// A single alignment (HSP) from a tabular BLAST file.
///
/// Float columns hold `f64::NAN` when the file marks the value as missing.
/// Coordinate and count columns are never summarized, so a value that is not
/// an unsigned integer is kept as `None` rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRecord {
    pub query_id: String,
    pub subject_id: String,
    /// Percentage of identical matches
    pub percent_identity: f64,
    pub alignment_length: Option<u64>,
    pub mismatches: Option<u64>,
    pub gap_openings: Option<u64>,
    pub query_start: Option<u64>,
    pub query_end: Option<u64>,
    pub subject_start: Option<u64>,
    pub subject_end: Option<u64>,
    pub evalue: f64,
    pub bit_score: f64,
}

/// All alignment records loaded from one tabular BLAST file.
#[derive(Debug, Clone)]
pub struct BlastHits {
    /// Source file path (if loaded from disk)
    pub source: Option<PathBuf>,

    /// Records in file order
    pub records: Vec<AlignmentRecord>,
}

impl BlastHits {
    #[must_use]
    pub fn new(records: Vec<AlignmentRecord>) -> Self {
        Self {
            source: None,
            records,
        }
    }

    #[must_use]
    pub fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn percent_identities(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.percent_identity)
    }

    pub fn evalues(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.evalue)
    }

    pub fn bit_scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.bit_score)
    }

    pub fn subject_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.subject_id.as_str())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a record with the given subject id and scores; other columns are filler.
    pub(crate) fn record(subject: &str, pident: f64, evalue: f64, bitscore: f64) -> AlignmentRecord {
        AlignmentRecord {
            query_id: "q1".to_string(),
            subject_id: subject.to_string(),
            percent_identity: pident,
            alignment_length: Some(100),
            mismatches: Some(0),
            gap_openings: Some(0),
            query_start: Some(1),
            query_end: Some(100),
            subject_start: Some(1),
            subject_end: Some(100),
            evalue,
            bit_score: bitscore,
        }
    }

    #[test]
    fn test_column_accessors() {
        let hits = BlastHits::new(vec![
            record("s1", 90.0, 1e-10, 50.0),
            record("s2", 95.0, 1e-20, 80.0),
        ]);

        assert_eq!(hits.len(), 2);
        assert!(!hits.is_empty());
        assert_eq!(hits.percent_identities().collect::<Vec<_>>(), vec![90.0, 95.0]);
        assert_eq!(hits.evalues().count(), 2);
        assert!((hits.bit_scores().sum::<f64>() - 130.0).abs() < 1e-12);
        assert_eq!(hits.subject_ids().collect::<Vec<_>>(), vec!["s1", "s2"]);
        assert!(hits.source.is_none());
    }

    #[test]
    fn test_with_source() {
        let hits = BlastHits::new(Vec::new()).with_source(Path::new("/data/run1.tsv"));
        assert_eq!(hits.source.as_deref(), Some(Path::new("/data/run1.tsv")));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_column_names() {
        assert_eq!(BLAST_COLUMNS.len(), 12);
        assert_eq!(BLAST_COLUMNS[1], "sseqid");
        assert_eq!(BLAST_COLUMNS[11], "bitscore");
    }
}
