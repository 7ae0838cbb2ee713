use std::{
    fmt::{self, Display},
    iter::Sum,
    ops::{Add, Sub},
};

use derive_more::Into;

const KG_PER_LB: f64 = 0.453_592_37;
const KM_PER_MI: f64 = 1.609_344;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    #[must_use]
    pub fn weight_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    #[must_use]
    pub fn distance_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }

    #[must_use]
    pub fn speed_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                UnitSystem::Metric => "Metric (SI)",
                UnitSystem::Imperial => "Imperial",
            }
        )
    }
}

/// Mass with a canonical backing store in kilograms.
#[derive(Into, Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Mass(f64);

impl Mass {
    pub const ZERO: Mass = Mass(0.0);

    #[must_use]
    pub fn from_kg(kg: f64) -> Self {
        Self(kg)
    }

    #[must_use]
    pub fn from_lb(lb: f64) -> Self {
        Self(lb * KG_PER_LB)
    }

    #[must_use]
    pub fn in_kg(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn in_lb(self) -> f64 {
        self.0 / KG_PER_LB
    }

    #[must_use]
    pub fn display_value(self, system: UnitSystem) -> f64 {
        match system {
            UnitSystem::Metric => self.in_kg(),
            UnitSystem::Imperial => self.in_lb(),
        }
    }

    #[must_use]
    pub fn display_string(self, system: UnitSystem) -> String {
        format!(
            "{} {}",
            format_value(self.display_value(system)),
            system.weight_unit()
        )
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Parses user input given in the display units of `system`.
    pub fn parse(value: &str, system: UnitSystem) -> Result<Self, MassError> {
        match value.replace(',', ".").trim().parse::<f64>() {
            Ok(parsed_value) => {
                if parsed_value.is_finite() && parsed_value >= 0.0 {
                    Ok(match system {
                        UnitSystem::Metric => Mass::from_kg(parsed_value),
                        UnitSystem::Imperial => Mass::from_lb(parsed_value),
                    })
                } else {
                    Err(MassError::OutOfRange)
                }
            }
            Err(_) => Err(MassError::ParseError),
        }
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Mass {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Mass::ZERO, |acc, mass| acc + mass)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MassError {
    #[error("Weight must be a non-negative number")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Distance with a canonical backing store in kilometers.
#[derive(Into, Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    #[must_use]
    pub fn from_km(km: f64) -> Self {
        Self(km)
    }

    #[must_use]
    pub fn from_mi(mi: f64) -> Self {
        Self(mi * KM_PER_MI)
    }

    #[must_use]
    pub fn in_km(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn in_mi(self) -> f64 {
        self.0 / KM_PER_MI
    }

    #[must_use]
    pub fn display_value(self, system: UnitSystem) -> f64 {
        match system {
            UnitSystem::Metric => self.in_km(),
            UnitSystem::Imperial => self.in_mi(),
        }
    }

    #[must_use]
    pub fn display_string(self, system: UnitSystem) -> String {
        format!(
            "{} {}",
            format_value(self.display_value(system)),
            system.distance_unit()
        )
    }
}

/// Speed with a canonical backing store in km/h. Never negative.
#[derive(Into, Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f64);

impl Speed {
    #[must_use]
    pub fn from_kmh(kmh: f64) -> Self {
        Self(kmh.max(0.0))
    }

    #[must_use]
    pub fn from_mph(mph: f64) -> Self {
        Self((mph * KM_PER_MI).max(0.0))
    }

    #[must_use]
    pub fn in_kmh(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn in_mph(self) -> f64 {
        self.0 / KM_PER_MI
    }

    #[must_use]
    pub fn display_value(self, system: UnitSystem) -> f64 {
        match system {
            UnitSystem::Metric => self.in_kmh(),
            UnitSystem::Imperial => self.in_mph(),
        }
    }

    #[must_use]
    pub fn display_string(self, system: UnitSystem) -> String {
        format!(
            "{} {}",
            format_value(self.display_value(system)),
            system.speed_unit()
        )
    }
}

/// Duration with a canonical backing store in whole seconds.
#[derive(Into, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSpan(u32);

impl TimeSpan {
    #[must_use]
    pub fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    #[must_use]
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes * 60)
    }

    #[must_use]
    pub fn from_hr_min(hours: u32, minutes: u32) -> Self {
        Self(hours * 3600 + minutes * 60)
    }

    #[must_use]
    pub fn from_min_sec(minutes: u32, seconds: u32) -> Self {
        Self(minutes * 60 + seconds)
    }

    #[must_use]
    pub fn in_seconds(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn in_minutes(self) -> u32 {
        self.0 / 60
    }

    #[must_use]
    pub fn in_hours(self) -> u32 {
        self.0 / 3600
    }

    #[must_use]
    pub fn components(self) -> (u32, u32, u32) {
        (self.in_hours(), self.0 % 3600 / 60, self.0 % 60)
    }

    /// Lenient parsing of "h:mm:ss", "mm:ss" or "ss". Non-digit noise is
    /// stripped; unparseable input yields a zero duration.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let cleaned = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ':')
            .collect::<String>();
        let parts = cleaned
            .split(':')
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        let nums = parts
            .iter()
            .rev()
            .take(3)
            .rev()
            .map(|p| p.parse::<u32>().unwrap_or(0))
            .collect::<Vec<_>>();

        match nums[..] {
            [s] => Self(s),
            [m, s] => Self(m * 60 + s),
            [h, m, s] => Self(h * 3600 + m * 60 + s),
            _ => Self(0),
        }
    }

    /// Whether both durations agree within `tolerance` (a fraction of
    /// `other`), compared at minute resolution.
    #[must_use]
    pub fn is_within(self, other: TimeSpan, tolerance: f64) -> bool {
        let self_min = f64::from(self.in_minutes());
        let other_min = f64::from(other.in_minutes());
        if other_min <= 0.0 {
            return true;
        }
        (self_min - other_min).abs() / other_min <= tolerance
    }
}

impl Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.components();
        if h > 0 {
            write!(f, "{h}:{m:02}:{s:02}")
        } else {
            write!(f, "{m}:{s:02}")
        }
    }
}

fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let mut formatted = format!("{rounded:.2}");
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }
    formatted
}
