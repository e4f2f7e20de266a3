use crate::core::record::BlastHits;

/// Number of decimal places kept in every reported statistic.
pub const STAT_DECIMALS: i32 = 4;

/// Column headers of a rendered statistics table, in field order.
pub const STAT_COLUMNS: [&str; 6] = [
    "Mean_pident",
    "SD_pident",
    "Mean_evalue",
    "SD_evalue",
    "Mean_bitscore",
    "SD_bitscore",
];

/// Summary statistics for one BLAST result file.
///
/// Every field is rounded to [`STAT_DECIMALS`] places (ties to even).
/// Standard deviations use the sample (N-1) denominator and are NaN
/// when fewer than two values are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsRow {
    pub mean_pident: f64,
    pub sd_pident: f64,
    pub mean_evalue: f64,
    pub sd_evalue: f64,
    pub mean_bitscore: f64,
    pub sd_bitscore: f64,
}

impl StatisticsRow {
    #[must_use]
    pub fn from_hits(hits: &BlastHits) -> Self {
        let pident = ColumnSummary::of(hits.percent_identities());
        let evalue = ColumnSummary::of(hits.evalues());
        let bitscore = ColumnSummary::of(hits.bit_scores());

        Self {
            mean_pident: round_to(pident.mean, STAT_DECIMALS),
            sd_pident: round_to(pident.std_dev, STAT_DECIMALS),
            mean_evalue: round_to(evalue.mean, STAT_DECIMALS),
            sd_evalue: round_to(evalue.std_dev, STAT_DECIMALS),
            mean_bitscore: round_to(bitscore.mean, STAT_DECIMALS),
            sd_bitscore: round_to(bitscore.std_dev, STAT_DECIMALS),
        }
    }

    /// Field values in [`STAT_COLUMNS`] order.
    #[must_use]
    pub fn values(&self) -> [f64; 6] {
        [
            self.mean_pident,
            self.sd_pident,
            self.mean_evalue,
            self.sd_evalue,
            self.mean_bitscore,
            self.sd_bitscore,
        ]
    }

    /// Field values formatted for display in [`STAT_COLUMNS`] order.
    #[must_use]
    pub fn formatted_values(&self) -> Vec<String> {
        self.values().iter().map(|v| format_stat(*v)).collect()
    }

    /// True when any standard deviation is undefined.
    #[must_use]
    pub fn has_undefined_sd(&self) -> bool {
        self.sd_pident.is_nan() || self.sd_evalue.is_nan() || self.sd_bitscore.is_nan()
    }
}

/// Mean and sample standard deviation over the non-missing values of a column.
#[derive(Debug, Clone, Copy)]
struct ColumnSummary {
    mean: f64,
    std_dev: f64,
}

impl ColumnSummary {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let values: Vec<f64> = values.filter(|v| !v.is_nan()).collect();
        let n = values.len();

        if n == 0 {
            return Self {
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }

        let mean = values.iter().sum::<f64>() / count_to_f64(n);

        let std_dev = if n < 2 {
            f64::NAN
        } else {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / count_to_f64(n - 1)).sqrt()
        };

        Self { mean, std_dev }
    }
}

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Round to `decimals` places, ties to even. NaN and infinities pass through.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    // Beyond 2^52 every f64 is already integral at this precision
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    scaled.round_ties_even() / factor
}

/// Magnitude from which statistics are shown in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e16;

/// Format a statistic for a report table: `nan` for undefined values,
/// integral values keep one decimal place (`92.0`) and very large values use
/// exponent form (`1e+20`).
#[must_use]
pub fn format_stat(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value.abs() >= EXPONENT_THRESHOLD {
        return format_exponent(value);
    }
    let text = format!("{value}");
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Shortest round-trip mantissa with a signed, at least two digit exponent.
fn format_exponent(value: f64) -> String {
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |d| ("-", d));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::tests::record;

    fn hits(rows: &[(f64, f64, f64)]) -> BlastHits {
        BlastHits::new(
            rows.iter()
                .enumerate()
                .map(|(i, (p, e, b))| record(&format!("s{i}"), *p, *e, *b))
                .collect(),
        )
    }

    #[test]
    fn test_mean_and_sample_sd() {
        let stats = StatisticsRow::from_hits(&hits(&[
            (90.0, 1e-10, 100.0),
            (92.0, 2e-10, 200.0),
            (94.0, 3e-10, 300.0),
        ]));

        assert!((stats.mean_pident - 92.0).abs() < 1e-12);
        assert!((stats.sd_pident - 2.0).abs() < 1e-12);
        assert!((stats.mean_bitscore - 200.0).abs() < 1e-12);
        assert!((stats.sd_bitscore - 100.0).abs() < 1e-12);
        // Tiny e-values round away at 4 decimals
        assert!(stats.mean_evalue.abs() < 1e-12);
        assert!(stats.sd_evalue.abs() < 1e-12);
        assert!(!stats.has_undefined_sd());
    }

    #[test]
    fn test_matches_closed_form() {
        let pidents = [97.5, 88.25, 100.0, 91.125, 79.0];
        let rows: Vec<(f64, f64, f64)> = pidents.iter().map(|p| (*p, 0.5, 42.0)).collect();
        let stats = StatisticsRow::from_hits(&hits(&rows));

        let n = pidents.len() as f64;
        let mean = pidents.iter().sum::<f64>() / n;
        let var = pidents.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (n - 1.0);

        assert!((stats.mean_pident - round_to(mean, 4)).abs() < 1e-9);
        assert!((stats.sd_pident - round_to(var.sqrt(), 4)).abs() < 1e-9);
        assert!((stats.mean_evalue - 0.5).abs() < 1e-12);
        assert!(stats.sd_evalue.abs() < 1e-12);
    }

    #[test]
    fn test_single_record_sd_is_nan() {
        let stats = StatisticsRow::from_hits(&hits(&[(99.0, 1e-5, 55.5)]));
        assert!((stats.mean_pident - 99.0).abs() < 1e-12);
        assert!(stats.sd_pident.is_nan());
        assert!(stats.sd_evalue.is_nan());
        assert!(stats.sd_bitscore.is_nan());
        assert!(stats.has_undefined_sd());
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let stats = StatisticsRow::from_hits(&hits(&[
            (90.0, f64::NAN, 10.0),
            (f64::NAN, f64::NAN, 20.0),
            (94.0, f64::NAN, 30.0),
        ]));

        assert!((stats.mean_pident - 92.0).abs() < 1e-12);
        assert!((stats.sd_pident - 8.0_f64.sqrt()).abs() < 1e-4);
        assert!(stats.mean_evalue.is_nan());
        assert!(stats.sd_evalue.is_nan());
        assert!((stats.mean_bitscore - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_to_ties_even() {
        assert!((round_to(1.23456, 4) - 1.2346).abs() < 1e-12);
        assert!((round_to(2.5, 0) - 2.0).abs() < 1e-12);
        assert!((round_to(3.5, 0) - 4.0).abs() < 1e-12);
        assert!(round_to(f64::NAN, 4).is_nan());
        assert!(round_to(f64::INFINITY, 4).is_infinite());
        assert_eq!(round_to(1e20, 4).to_bits(), 1e20f64.to_bits());
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(92.0), "92.0");
        assert_eq!(format_stat(2.0), "2.0");
        assert_eq!(format_stat(0.1234), "0.1234");
        assert_eq!(format_stat(f64::NAN), "nan");
        assert_eq!(format_stat(-1.5), "-1.5");
    }

    #[test]
    fn test_format_stat_large_values() {
        assert_eq!(format_stat(1e20), "1e+20");
        assert_eq!(format_stat(1.5e17), "1.5e+17");
        assert_eq!(format_stat(-2.25e16), "-2.25e+16");
        assert_eq!(format_stat(1e100), "1e+100");
        assert_eq!(format_stat(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_values_follow_column_order() {
        let stats = StatisticsRow {
            mean_pident: 1.0,
            sd_pident: 2.0,
            mean_evalue: 3.0,
            sd_evalue: 4.0,
            mean_bitscore: 5.0,
            sd_bitscore: 6.0,
        };
        assert_eq!(stats.values(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(stats.formatted_values()[5], "6.0");
        assert_eq!(STAT_COLUMNS[2], "Mean_evalue");
    }
}
