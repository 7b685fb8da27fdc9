//! Unit conversion tables
//!
//! Every raw value read from a TNTP file is multiplied into a canonical unit:
//! kilometres for length, km/h for speed, hours for time and vehicles per hour
//! for capacity.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::Error;

/// A unit that converts into its canonical counterpart by a fixed multiplier
pub trait CanonicalUnit: Copy {
    fn multiplier(self) -> f64;

    /// `raw * multiplier`, without rounding
    fn convert(self, raw: f64) -> f64 {
        raw * self.multiplier()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LengthUnit {
    Kilometers,
    Meters,
    Miles,
    Feet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SpeedUnit {
    KilometersPerHour,
    MetersPerSecond,
    MilesPerHour,
    FeetPerMinute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
}

impl CanonicalUnit for LengthUnit {
    fn multiplier(self) -> f64 {
        match self {
            LengthUnit::Kilometers => 1.0,
            LengthUnit::Meters => 0.001,
            LengthUnit::Miles => 1.61,
            LengthUnit::Feet => 0.000_304_924_24,
        }
    }
}

impl CanonicalUnit for SpeedUnit {
    fn multiplier(self) -> f64 {
        match self {
            SpeedUnit::KilometersPerHour => 1.0,
            SpeedUnit::MetersPerSecond => 3.6,
            SpeedUnit::MilesPerHour => 1.61,
            SpeedUnit::FeetPerMinute => 0.018_295_454_55,
        }
    }
}

impl CanonicalUnit for TimeUnit {
    fn multiplier(self) -> f64 {
        match self {
            TimeUnit::Hours => 1.0,
            TimeUnit::Minutes => 0.016_666_666_7,
            TimeUnit::Seconds => 0.000_277_777_8,
        }
    }
}

/// Period a capacity value in the network file refers to, e.g. "per 24 hours"
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CapacityPeriod {
    pub duration: f64,
    pub unit: TimeUnit,
}

impl Default for CapacityPeriod {
    fn default() -> Self {
        Self {
            duration: 1.0,
            unit: TimeUnit::Hours,
        }
    }
}

impl CapacityPeriod {
    pub fn new(duration: f64, unit: TimeUnit) -> Self {
        Self { duration, unit }
    }

    /// Length of the period in hours
    pub fn hours(&self) -> f64 {
        self.unit.convert(self.duration)
    }

    /// Multiplier turning a per-period capacity into a per-hour capacity
    pub fn multiplier(&self) -> f64 {
        1.0 / self.hours()
    }

    pub fn to_hourly(&self, capacity: f64) -> f64 {
        capacity * self.multiplier()
    }
}

fn unknown_unit(kind: &str, name: &str) -> Error {
    Error::Configuration(format!("Unrecognized {kind} unit '{name}'"))
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Ok(Self::Kilometers),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meters),
            "mi" | "mile" | "miles" => Ok(Self::Miles),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            _ => Err(unknown_unit("length", s)),
        }
    }
}

impl FromStr for SpeedUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km/h" | "kmh" | "kph" | "kilometers_per_hour" => Ok(Self::KilometersPerHour),
            "m/s" | "mps" | "meters_per_second" => Ok(Self::MetersPerSecond),
            "mi/h" | "mph" | "miles_per_hour" => Ok(Self::MilesPerHour),
            "ft/min" | "fpm" | "feet_per_minute" => Ok(Self::FeetPerMinute),
            _ => Err(unknown_unit("speed", s)),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hr" | "hour" | "hours" => Ok(Self::Hours),
            "min" | "minute" | "minutes" => Ok(Self::Minutes),
            "s" | "sec" | "second" | "seconds" => Ok(Self::Seconds),
            _ => Err(unknown_unit("time", s)),
        }
    }
}

macro_rules! impl_try_from_string {
    ($($unit:ty),*) => {
        $(
            impl TryFrom<String> for $unit {
                type Error = Error;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }
        )*
    };
}

impl_try_from_string!(LengthUnit, SpeedUnit, TimeUnit);

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LengthUnit::Kilometers => "km",
            LengthUnit::Meters => "m",
            LengthUnit::Miles => "mi",
            LengthUnit::Feet => "ft",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpeedUnit::KilometersPerHour => "km/h",
            SpeedUnit::MetersPerSecond => "m/s",
            SpeedUnit::MilesPerHour => "mi/h",
            SpeedUnit::FeetPerMinute => "ft/min",
        };
        f.write_str(name)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Hours => "h",
            TimeUnit::Minutes => "min",
            TimeUnit::Seconds => "s",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENGTHS: [LengthUnit; 4] = [
        LengthUnit::Kilometers,
        LengthUnit::Meters,
        LengthUnit::Miles,
        LengthUnit::Feet,
    ];
    const SPEEDS: [SpeedUnit; 4] = [
        SpeedUnit::KilometersPerHour,
        SpeedUnit::MetersPerSecond,
        SpeedUnit::MilesPerHour,
        SpeedUnit::FeetPerMinute,
    ];
    const TIMES: [TimeUnit; 3] = [TimeUnit::Hours, TimeUnit::Minutes, TimeUnit::Seconds];

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{a} != {b}");
    }

    fn round_trip<U: CanonicalUnit>(unit: U, raw: f64) {
        let canonical = unit.convert(raw);
        assert_close(unit.convert(canonical / unit.multiplier()), canonical);
        assert_close(canonical / unit.multiplier(), raw);
    }

    #[test]
    fn conversion_is_linear_and_invertible() {
        for raw in [0.0, 1.0, 12.5, 1234.567] {
            LENGTHS.iter().for_each(|u| round_trip(*u, raw));
            SPEEDS.iter().for_each(|u| round_trip(*u, raw));
            TIMES.iter().for_each(|u| round_trip(*u, raw));
        }
    }

    #[test]
    fn multipliers_match_tables() {
        assert_close(LengthUnit::Meters.convert(1500.0), 1.5);
        assert_close(LengthUnit::Miles.convert(2.0), 3.22);
        assert_close(SpeedUnit::MetersPerSecond.convert(10.0), 36.0);
        assert_close(TimeUnit::Minutes.convert(30.0), 0.500_000_001);
        assert_close(TimeUnit::Seconds.multiplier(), 0.000_277_777_8);
    }

    #[test]
    fn daily_capacity_becomes_hourly() {
        let period = CapacityPeriod::new(24.0, TimeUnit::Hours);
        assert_close(period.to_hourly(2400.0), 100.0);
        assert_close(CapacityPeriod::default().to_hourly(1000.0), 1000.0);
    }

    #[test]
    fn parses_unit_names() {
        assert_eq!("KM".parse::<LengthUnit>().unwrap(), LengthUnit::Kilometers);
        assert_eq!("mph".parse::<SpeedUnit>().unwrap(), SpeedUnit::MilesPerHour);
        assert_eq!(" minutes ".parse::<TimeUnit>().unwrap(), TimeUnit::Minutes);
        for name in LENGTHS.iter().map(ToString::to_string) {
            assert!(name.parse::<LengthUnit>().is_ok());
        }
    }

    #[test]
    fn unknown_unit_is_a_configuration_error() {
        let err = "furlongs".parse::<LengthUnit>().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(matches!(
            "knots".parse::<SpeedUnit>(),
            Err(Error::Configuration(_))
        ));
    }
}
