//! Parsers for BLAST search results.
//!
//! Currently one format is supported:
//!
//! - **Tabular BLAST** (`-outfmt 6`, and `-outfmt 7` whose `#` comment lines are skipped):
//!   twelve tab-separated columns per alignment, no header row
//!
//! ## Example
//!
//! ```rust,no_run
//! use blastn_compare::parsing::blast::{parse_blast_file, parse_blast_text};
//! use std::path::Path;
//!
//! // Parse from a file
//! let hits = parse_blast_file(Path::new("same1.tsv")).unwrap();
//!
//! // Or parse from text
//! let text = "q1\tNR_1\t99.5\t200\t1\t0\t1\t200\t1\t200\t1e-100\t365\n";
//! let hits = parse_blast_text(text).unwrap();
//! assert_eq!(hits.len(), 1);
//! ```
//!
//! ## Missing Values
//!
//! Float columns (`pident`, `evalue`, `bitscore`) accept these missing markers,
//! which load as NaN:
//!
//! | Marker | Example |
//! |--------|---------|
//! | empty  | `\t\t`  |
//! | `NA`   | `\tNA\t` |
//! | `N/A`  | `\tN/A\t` |
//! | `nan`  | `\tnan\t` |

pub mod blast;
