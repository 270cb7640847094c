use crate::error::{PullError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One scoring week of one season. Ordering is by year, then week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub week: u32,
}

impl Period {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    /// The following week, rolling over into week 1 of the next season.
    pub fn next(self, season_weeks: u32) -> Self {
        Self::new(self.year, self.week + 1).normalized(season_weeks)
    }

    /// Week 0 becomes week 1, weeks past the season roll into the next year.
    pub fn normalized(self, season_weeks: u32) -> Self {
        if self.week == 0 {
            Self::new(self.year, 1)
        } else if self.week > season_weeks {
            Self::new(self.year + 1, 1)
        } else {
            self
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.year, self.week)
    }
}

impl FromStr for Period {
    type Err = PullError;

    fn from_str(s: &str) -> Result<Self> {
        let (year, week) = s
            .split_once(':')
            .ok_or_else(|| PullError::Config(format!("expected YEAR:WEEK, got '{s}'")))?;

        let year = year
            .trim()
            .parse()
            .map_err(|_| PullError::Config(format!("invalid year in '{s}'")))?;
        let week = week
            .trim()
            .parse()
            .map_err(|_| PullError::Config(format!("invalid week in '{s}'")))?;

        Ok(Self { year, week })
    }
}

/// Walks every period from `start` to `end` inclusive.
///
/// The walker owns its cursor, so cloning it restarts the same sequence
/// without any state shared between callers.
#[derive(Debug, Clone)]
pub struct PeriodWalker {
    next: Option<Period>,
    end: Period,
    season_weeks: u32,
    last_year: Option<i32>,
}

impl PeriodWalker {
    pub fn new(start: Period, end: Period, season_weeks: u32) -> Self {
        let season_weeks = season_weeks.max(1);
        let start = start.normalized(season_weeks);
        Self {
            next: (start <= end).then_some(start),
            end,
            season_weeks,
            last_year: None,
        }
    }

    /// Stops the walk once the start year is exhausted.
    pub fn first_season_only(mut self) -> Self {
        self.last_year = self.next.map(|p| p.year);
        self
    }
}

impl Iterator for PeriodWalker {
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        let current = self.next?;
        let following = current.next(self.season_weeks);

        self.next = match self.last_year {
            _ if current >= self.end => None,
            Some(year) if following.year > year => None,
            _ if following > self.end => None,
            _ => Some(following),
        };

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_week() {
        let period: Period = "2015:7".parse().unwrap();
        assert_eq!(period, Period::new(2015, 7));
        assert!("2015".parse::<Period>().is_err());
        assert!("2015:x".parse::<Period>().is_err());
    }

    #[test]
    fn orders_by_year_then_week() {
        assert!(Period::new(2014, 17) < Period::new(2015, 1));
        assert!(Period::new(2015, 2) < Period::new(2015, 10));
    }

    #[test]
    fn single_period_when_start_equals_end() {
        let p = Period::new(2015, 3);
        let periods: Vec<_> = PeriodWalker::new(p, p, 17).collect();
        assert_eq!(periods, vec![p]);
    }

    #[test]
    fn wraps_into_next_season() {
        let periods: Vec<_> =
            PeriodWalker::new(Period::new(2014, 16), Period::new(2015, 2), 17).collect();
        assert_eq!(
            periods,
            vec![
                Period::new(2014, 16),
                Period::new(2014, 17),
                Period::new(2015, 1),
                Period::new(2015, 2),
            ]
        );
    }

    #[test]
    fn count_matches_closed_form() {
        let season_weeks = 17;
        for (start, end) in [
            (Period::new(2012, 1), Period::new(2015, 17)),
            (Period::new(2013, 9), Period::new(2014, 3)),
            (Period::new(2015, 4), Period::new(2015, 4)),
            (Period::new(2010, 17), Period::new(2011, 1)),
        ] {
            let expected = (end.week as i64 - start.week as i64)
                + (end.year - start.year) as i64 * season_weeks as i64
                + 1;
            let walked = PeriodWalker::new(start, end, season_weeks).count() as i64;
            assert_eq!(walked, expected, "{start} -> {end}");
        }
    }

    #[test]
    fn empty_when_start_after_end() {
        let walker = PeriodWalker::new(Period::new(2015, 5), Period::new(2015, 4), 17);
        assert_eq!(walker.count(), 0);
    }

    #[test]
    fn clone_restarts_the_walk() {
        let walker = PeriodWalker::new(Period::new(2015, 1), Period::new(2015, 3), 17);
        let first: Vec<_> = walker.clone().collect();
        let second: Vec<_> = walker.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn first_season_only_stops_at_year_end() {
        let periods: Vec<_> = PeriodWalker::new(Period::new(2014, 15), Period::new(2016, 2), 17)
            .first_season_only()
            .collect();
        assert_eq!(
            periods,
            vec![
                Period::new(2014, 15),
                Period::new(2014, 16),
                Period::new(2014, 17)
            ]
        );
    }

    #[test]
    fn normalizes_resume_points() {
        assert_eq!(Period::new(2015, 17).next(17), Period::new(2016, 1));
        assert_eq!(Period::new(2015, 0).normalized(17), Period::new(2015, 1));
    }
}
