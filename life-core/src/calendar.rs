//! Fixed simulated calendar: 4 seasons of 28 days, years starting at 1.
//!
//! The host delivers time as an absolute day count (day 0 = Spring 1,
//! Year 1); generated correspondence needs it back as a display date.

use std::fmt;

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

pub const DAYS_PER_SEASON: u32 = 28;
pub const SEASONS_PER_YEAR: u32 = 4;
pub const DAYS_PER_YEAR: u32 = DAYS_PER_SEASON * SEASONS_PER_YEAR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    fn from_index(index: u32) -> Self {
        match index % SEASONS_PER_YEAR {
            0 => Season::Spring,
            1 => Season::Summer,
            2 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

/// A (year, season, day-of-season) display date. Day and year are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: u32,
    pub season: Season,
    pub day: u32,
}

impl CalendarDate {
    pub fn from_total_days(total: u32) -> Self {
        Self {
            year: 1 + total / DAYS_PER_YEAR,
            season: Season::from_index((total % DAYS_PER_YEAR) / DAYS_PER_SEASON),
            day: 1 + total % DAYS_PER_SEASON,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, Year {}", self.season.name(), self.day, self.year)
    }
}
