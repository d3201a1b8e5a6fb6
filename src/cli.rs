use std::str::FromStr;

use clap::Parser;

use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(author, version, about = "Randomized customer arrival generator")]
pub struct Cli {
    /// Inter-arrival delay, inclusive on both ends.
    #[arg(long, value_name = "min..max", default_value = "100..500")]
    pub arrival_ms: MillisRange,
    /// Service time assigned to each customer, inclusive on both ends.
    #[arg(long, value_name = "min..max", default_value = "200..2000")]
    pub service_ms: MillisRange,
    #[arg(long, value_name = "count", default_value = "1")]
    pub generators: usize,
    #[arg(long, value_name = "count", default_value = "3")]
    pub cashiers: usize,
    #[arg(long, value_name = "count", default_value = "64")]
    pub capacity: usize,
    /// Stop after this long instead of waiting for Ctrl-C.
    #[arg(long, value_name = "millis")]
    pub run_for_ms: Option<u64>,
    #[arg(long, value_name = "millis")]
    pub print_metrics_ms: Option<u64>,
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Textual millisecond range. Both `a..b` and `a..=b` include `b`; a single
/// number is a constant. Ordering of the bounds is checked later, together
/// with the other generator settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MillisRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl FromStr for MillisRange {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (min, max) = if let Some((start, end)) = trimmed.split_once("..=") {
            (start, end)
        } else if let Some((start, end)) = trimmed.split_once("..") {
            (start, end)
        } else {
            (trimmed, trimmed)
        };

        Ok(MillisRange {
            min_ms: parse_bound(min, trimmed)?,
            max_ms: parse_bound(max, trimmed)?,
        })
    }
}

fn parse_bound(bound: &str, whole: &str) -> Result<u64, ConfigError> {
    let value: i64 = bound
        .trim()
        .parse()
        .map_err(|_| ConfigError::Malformed(whole.to_string()))?;

    u64::try_from(value).map_err(|_| ConfigError::Negative { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min_ms: u64, max_ms: u64) -> MillisRange {
        MillisRange { min_ms, max_ms }
    }

    #[test]
    fn parses_both_range_forms() {
        assert_eq!("10..20".parse::<MillisRange>(), Ok(range(10, 20)));
        assert_eq!("10..=20".parse::<MillisRange>(), Ok(range(10, 20)));
        assert_eq!(" 0..0 ".parse::<MillisRange>(), Ok(range(0, 0)));
    }

    #[test]
    fn single_value_is_constant() {
        assert_eq!("250".parse::<MillisRange>(), Ok(range(250, 250)));
    }

    #[test]
    fn inverted_range_is_left_for_validation() {
        assert_eq!("5..2".parse::<MillisRange>(), Ok(range(5, 2)));
    }

    #[test]
    fn rejects_negative_bounds() {
        assert_eq!(
            "-5..10".parse::<MillisRange>(),
            Err(ConfigError::Negative { value: -5 })
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "fast..slow".parse::<MillisRange>(),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn parses_command_line() {
        let cli = Cli::parse_from([
            "arrivals",
            "--arrival-ms",
            "0..0",
            "--service-ms",
            "1",
            "--generators",
            "2",
            "--seed",
            "9",
        ]);
        assert_eq!(cli.arrival_ms, range(0, 0));
        assert_eq!(cli.service_ms, range(1, 1));
        assert_eq!(cli.generators, 2);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.run_for_ms, None);
    }
}
