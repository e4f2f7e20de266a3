//! Core data types for BLASTN result comparison.
//!
//! - [`AlignmentRecord`]: One row of a 12-column tabular BLAST file
//! - [`BlastHits`]: All records loaded from one file, with its source path
//! - [`IdentifierSet`]: Distinct subject ids hit by one search
//!
//! ## Column Layout
//!
//! Tabular BLAST output (`-outfmt 6`) has no header row. Columns are positional:
//!
//! | #  | Name     | Type    |
//! |----|----------|---------|
//! | 1  | qseqid   | text    |
//! | 2  | sseqid   | text    |
//! | 3  | pident   | float   |
//! | 4  | length   | integer |
//! | 5  | mismatch | integer |
//! | 6  | gapopen  | integer |
//! | 7  | qstart   | integer |
//! | 8  | qend     | integer |
//! | 9  | sstart   | integer |
//! | 10 | send     | integer |
//! | 11 | evalue   | float   |
//! | 12 | bitscore | float   |
//!
//! [`AlignmentRecord`]: record::AlignmentRecord
//! [`BlastHits`]: record::BlastHits
//! [`IdentifierSet`]: identifiers::IdentifierSet

pub mod identifiers;
pub mod record;
