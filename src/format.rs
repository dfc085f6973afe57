//! Human-readable formatting of tick counts, ratios and diffs.
//!
//! A [`Formatter`] is built once per profile from the largest value it will
//! have to print, so every value in one view shares the same unit.

use crate::model::Units;

const DURATION_STEPS: [(f64, &str); 5] = [
    (60.0, "minute"),
    (60.0, "hour"),
    (24.0, "day"),
    (30.0, "month"),
    (12.0, "year"),
];

const SUBSECOND_STEPS: [(f64, &str); 7] = [
    (1000.0, "ms"),
    (1000.0, "second"),
    (60.0, "minute"),
    (60.0, "hour"),
    (24.0, "day"),
    (30.0, "month"),
    (12.0, "year"),
];

const OBJECT_STEPS: [(f64, &str); 5] = [
    (1000.0, "K"),
    (1000.0, "M"),
    (1000.0, "G"),
    (1000.0, "T"),
    (1000.0, "P"),
];

const BYTE_STEPS: [(f64, &str); 5] = [
    (1024.0, "KB"),
    (1024.0, "MB"),
    (1024.0, "GB"),
    (1024.0, "TB"),
    (1024.0, "PB"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterKind {
    /// Samples divided by the sample rate, in seconds and up
    Duration,
    /// Like `Duration`, starting at microseconds
    SubsecondDuration,
    /// Raw values in nanoseconds
    Nanoseconds,
    /// Counts, stepped by 1000
    Objects,
    /// Sizes, stepped by 1024
    Bytes,
}

/// Unit-aware value printer with a precomputed divider and suffix
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter {
    pub kind: FormatterKind,
    pub divider: f64,
    pub suffix: &'static str,
}

/// Walk `steps` while `max` still reaches the next unit
fn pick_unit(mut max: f64, base: &'static str, steps: &[(f64, &'static str)]) -> (f64, &'static str) {
    let mut divider = 1.0;
    let mut suffix = base;
    for (step, name) in steps {
        if max >= *step {
            divider *= step;
            max /= step;
            suffix = name;
        } else {
            break;
        }
    }
    (divider, suffix)
}

/// Choose a formatter for values up to `max` ticks
pub fn get_formatter(max: f64, sample_rate: f64, units: Units) -> Formatter {
    let (kind, (divider, suffix)) = match units {
        Units::Samples | Units::Unknown => (
            FormatterKind::Duration,
            pick_unit(max / sample_rate, "second", &DURATION_STEPS),
        ),
        Units::TraceSamples => (
            FormatterKind::SubsecondDuration,
            pick_unit(max / sample_rate * 1e6, "μs", &SUBSECOND_STEPS),
        ),
        Units::LockNanoseconds => (
            FormatterKind::Nanoseconds,
            pick_unit(max / 1e9, "second", &DURATION_STEPS),
        ),
        Units::Objects | Units::Goroutines | Units::LockSamples | Units::Exceptions => {
            (FormatterKind::Objects, pick_unit(max, "", &OBJECT_STEPS))
        }
        Units::Bytes => (FormatterKind::Bytes, pick_unit(max, "bytes", &BYTE_STEPS)),
    };

    Formatter {
        kind,
        divider,
        suffix,
    }
}

impl Formatter {
    /// Format `samples` with the unit suffix
    pub fn format(&self, samples: f64, sample_rate: f64) -> String {
        let (n, plural) = match self.kind {
            FormatterKind::Duration => (samples / sample_rate / self.divider, true),
            FormatterKind::SubsecondDuration => {
                let plural = self.suffix != "μs" && self.suffix != "ms";
                (samples / (sample_rate / 1e6) / self.divider, plural)
            }
            FormatterKind::Nanoseconds => (samples / 1e9 / self.divider, true),
            FormatterKind::Objects | FormatterKind::Bytes => (samples / self.divider, false),
        };
        format_number(n, self.suffix, plural)
    }
}

/// Two decimals, trailing zeros stripped
fn pretty_num(n: f64) -> String {
    let s = format!("{:.2}", n);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Print `n` followed by `unit`; `plural` appends an `s` unless `n == 1`
pub fn format_number(n: f64, unit: &str, plural: bool) -> String {
    if !n.is_finite() || n == 0.0 {
        return "0".to_string();
    }

    let value = if n.abs() < 0.01 {
        "< 0.01".to_string()
    } else {
        pretty_num(n)
    };

    let s = if plural && n != 1.0 { "s" } else { "" };
    format!("{} {}{}", value, unit, s).trim_end().to_string()
}

/// Insert thousands separators
pub fn number_with_commas(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Ratio in [0, 1] to a percentage with two decimals
pub fn ratio_to_percent(ratio: f64) -> f64 {
    (10000.0 * ratio).round() / 100.0
}

pub fn format_percent(ratio: f64) -> String {
    format!("{}%", ratio_to_percent(ratio))
}

/// Relative change between two percentages, in percent
pub fn diff_percent(left_percent: f64, right_percent: f64) -> f64 {
    (right_percent - left_percent) / left_percent * 100.0
}

/// Label drawn inside a bar: `name (share, value)`
pub fn bar_label(name: &str, ratio: f64, formatter: &Formatter, ticks: u64, sample_rate: f64) -> String {
    format!(
        "{} ({}, {})",
        name,
        format_percent(ratio),
        formatter.format(ticks as f64, sample_rate)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_with_commas() {
        assert_eq!(number_with_commas(0), "0");
        assert_eq!(number_with_commas(1_000), "1,000");
        assert_eq!(number_with_commas(100), "100");
        assert_eq!(number_with_commas(1_000_000_000), "1,000,000,000");
        assert_eq!(number_with_commas(-1_000_000), "-1,000,000");
    }

    #[test]
    fn test_percent() {
        assert_eq!(ratio_to_percent(214.0 / 988.0), 21.66);
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(214.0 / 988.0), "21.66%");
    }

    #[test]
    fn test_duration_formatter() {
        let f = get_formatter(988.0, 100.0, Units::Samples);
        assert_eq!(f.suffix, "second");
        assert_eq!(f.format(988.0, 100.0), "9.88 seconds");
        assert_eq!(f.format(100.0, 100.0), "1 second");
        assert_eq!(f.format(0.0, 100.0), "0");

        let f = get_formatter(16000.0, 100.0, Units::Samples);
        assert_eq!(f.suffix, "minute");
        assert_eq!(f.format(8000.0, 100.0), "1.33 minutes");
        assert_eq!(f.format(6000.0, 100.0), "1 minute");
    }

    #[test]
    fn test_trace_samples_subsecond() {
        let f = get_formatter(10.0, 100.0, Units::TraceSamples);
        assert_eq!(f.suffix, "ms");
        assert_eq!(f.format(55.0, 100.0), "550 ms");
        assert_eq!(f.format(0.331, 100.0), "3.31 ms");
    }

    #[test]
    fn test_objects_and_bytes() {
        let f = get_formatter(829449.0, 100.0, Units::Objects);
        assert_eq!(f.format(829449.0, 100.0), "829.45 K");
        assert_eq!(get_formatter(1.0, 100.0, Units::Objects).format(1.0, 100.0), "1");

        let f = get_formatter(2048.0, 100.0, Units::Bytes);
        assert_eq!(f.format(1536.0, 100.0), "1.5 KB");
        assert_eq!(get_formatter(10.0, 100.0, Units::Bytes).format(10.0, 100.0), "10 bytes");
    }

    #[test]
    fn test_tiny_values() {
        assert_eq!(format_number(0.001, "seconds", false), "< 0.01 seconds");
        assert_eq!(format_number(f64::NAN, "seconds", true), "0");
    }

    #[test]
    fn test_diff_percent() {
        assert_eq!(diff_percent(10.0, 15.0), 50.0);
        assert_eq!(diff_percent(20.0, 10.0), -50.0);
    }
}
