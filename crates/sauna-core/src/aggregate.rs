//! Small numeric helpers shared by the section aggregators.

use chrono::{Datelike, NaiveDate, Weekday};

use sauna_model::GroupStats;

/// Running min/max/sum/count accumulator for grouped statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accumulator {
    sum: f64,
    min: f64,
    max: f64,
    count: u64,
}

impl Accumulator {
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count += 1;
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    #[must_use]
    pub fn stats(&self) -> GroupStats {
        GroupStats {
            average: self.mean(),
            min: self.min,
            max: self.max,
            count: self.count,
        }
    }
}

/// `YYYY-MM` key for a date.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Full English weekday name, matching the chart axis labels.
#[must_use]
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_tracks_extremes() {
        let mut acc = Accumulator::default();
        for v in [80.0, 60.0, 100.0] {
            acc.push(v);
        }
        let stats = acc.stats();
        assert_eq!(stats.min, 60.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.count, 3);
        assert!((stats.average - 80.0).abs() < 1e-9);
    }

    #[test]
    fn empty_accumulator_averages_zero() {
        assert_eq!(Accumulator::default().mean(), 0.0);
    }

    #[test]
    fn month_and_weekday_keys() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(month_key(date), "2024-03");
        assert_eq!(weekday_name(date), "Friday");
    }
}
