//! Weather Clock
//!
//! Maps the wall clock to weather, time of day and season.
//!
//! Every function here is pure: the same calendar date gives the same weather
//! on every client, so all players share one forecast without talking to a
//! server.
//!
//! # Example
//!
//! ```
//! use critter_events::{weather, CalendarDate, Weather};
//!
//! let date = CalendarDate::new(2025, 6, 15);
//! assert_eq!(weather(date), Weather::Fog);
//! assert_eq!(weather(date), weather(date));
//! ```

use chrono::{Datelike, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::creature::UnknownName;

/// Knuth's multiplicative hashing constant (2^32 / golden ratio).
pub const WEATHER_HASH_MULTIPLIER: u64 = 2_654_435_761;

/// A day on the Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Local::now().date_naive().into()
    }

    /// Integer seed shared by every client on this day.
    pub fn seed(self) -> i64 {
        self.year as i64 * 10_000 + self.month as i64 * 100 + self.day as i64
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Daily weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Clear,
    Rain,
    Snow,
    Fog,
    Storm,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Rain,
        Weather::Snow,
        Weather::Fog,
        Weather::Storm,
    ];
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Clear => write!(f, "clear"),
            Weather::Rain => write!(f, "rain"),
            Weather::Snow => write!(f, "snow"),
            Weather::Fog => write!(f, "fog"),
            Weather::Storm => write!(f, "storm"),
        }
    }
}

impl FromStr for Weather {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clear" => Ok(Weather::Clear),
            "rain" => Ok(Weather::Rain),
            "snow" => Ok(Weather::Snow),
            "fog" => Ok(Weather::Fog),
            "storm" => Ok(Weather::Storm),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

/// Part of the day, used for sky colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Dawn,
    Morning,
    Afternoon,
    Dusk,
    Night,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Dawn => write!(f, "dawn"),
            TimeOfDay::Morning => write!(f, "morning"),
            TimeOfDay::Afternoon => write!(f, "afternoon"),
            TimeOfDay::Dusk => write!(f, "dusk"),
            TimeOfDay::Night => write!(f, "night"),
        }
    }
}

/// Season of the year (northern hemisphere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Autumn => write!(f, "autumn"),
            Season::Winter => write!(f, "winter"),
        }
    }
}

/// Creature elements affected by the weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Earth,
    Wind,
    Light,
    Dark,
    Metal,
}

impl Element {
    pub const COUNT: usize = 11;

    pub const ALL: [Element; Element::COUNT] = [
        Element::Normal,
        Element::Fire,
        Element::Water,
        Element::Grass,
        Element::Electric,
        Element::Ice,
        Element::Earth,
        Element::Wind,
        Element::Light,
        Element::Dark,
        Element::Metal,
    ];
}

/// Per-element multipliers for one weather condition, indexed like [`Element::ALL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBuffs(pub [f32; Element::COUNT]);

impl ElementBuffs {
    pub fn get(&self, element: Element) -> f32 {
        self.0[element as usize]
    }

    /// Iterates `(element, multiplier)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Element, f32)> + '_ {
        Element::ALL.into_iter().zip(self.0.iter().copied())
    }
}

//                       normal fire  water grass elec  ice   earth wind  light dark  metal
const CLEAR_BUFFS: ElementBuffs =
    ElementBuffs([1.0, 1.2, 0.9, 1.1, 1.0, 0.8, 1.0, 1.0, 1.2, 0.9, 1.0]);
const RAIN_BUFFS: ElementBuffs =
    ElementBuffs([1.0, 0.7, 1.3, 1.1, 1.2, 1.0, 0.9, 1.0, 0.9, 1.0, 0.9]);
const SNOW_BUFFS: ElementBuffs =
    ElementBuffs([1.0, 0.8, 0.9, 0.8, 1.0, 1.4, 1.0, 1.1, 1.0, 1.0, 1.1]);
const FOG_BUFFS: ElementBuffs =
    ElementBuffs([1.0, 0.9, 1.1, 1.0, 0.9, 1.0, 1.0, 0.8, 0.8, 1.3, 1.0]);
const STORM_BUFFS: ElementBuffs =
    ElementBuffs([0.9, 0.8, 1.2, 0.9, 1.5, 1.0, 0.9, 1.3, 0.8, 1.1, 1.0]);

/// Classifies an hour (0-23) into a part of the day.
pub fn time_of_day(hour: u32) -> TimeOfDay {
    match hour {
        5..=6 => TimeOfDay::Dawn,
        7..=11 => TimeOfDay::Morning,
        12..=16 => TimeOfDay::Afternoon,
        17..=19 => TimeOfDay::Dusk,
        _ => TimeOfDay::Night,
    }
}

/// Roll in `0..100` for a date, from a 32-bit multiplicative hash of its seed.
pub fn weather_roll(date: CalendarDate) -> u32 {
    let hash = (date.seed() as u64).wrapping_mul(WEATHER_HASH_MULTIPLIER) as u32;
    hash % 100
}

/// The shared weather for a calendar day.
///
/// Bands: clear 50%, rain 25%, snow 10%, fog 10%, storm 5%.
pub fn weather(date: CalendarDate) -> Weather {
    match weather_roll(date) {
        0..=49 => Weather::Clear,
        50..=74 => Weather::Rain,
        75..=84 => Weather::Snow,
        85..=94 => Weather::Fog,
        _ => Weather::Storm,
    }
}

/// Element multipliers in effect under the given weather.
pub fn weather_buffs(weather: Weather) -> ElementBuffs {
    match weather {
        Weather::Clear => CLEAR_BUFFS,
        Weather::Rain => RAIN_BUFFS,
        Weather::Snow => SNOW_BUFFS,
        Weather::Fog => FOG_BUFFS,
        Weather::Storm => STORM_BUFFS,
    }
}

/// Top and bottom sky gradient colours as `0xRRGGBB`.
pub fn sky_colors(time: TimeOfDay) -> (u32, u32) {
    match time {
        TimeOfDay::Dawn => (0xFFB88C, 0xFFE0B2),
        TimeOfDay::Morning => (0x87CEEB, 0xE0F6FF),
        TimeOfDay::Afternoon => (0x4FA3E0, 0xBFE6FF),
        TimeOfDay::Dusk => (0xFF7E5F, 0xFEB47B),
        TimeOfDay::Night => (0x0B1D3A, 0x2C3E6B),
    }
}

pub fn weather_icon(weather: Weather) -> &'static str {
    match weather {
        Weather::Clear => "☀️",
        Weather::Rain => "🌧️",
        Weather::Snow => "❄️",
        Weather::Fog => "🌫️",
        Weather::Storm => "⛈️",
    }
}

/// Display name for the weather badge.
pub fn weather_name(weather: Weather) -> &'static str {
    match weather {
        Weather::Clear => "Clear",
        Weather::Rain => "Rain",
        Weather::Snow => "Snow",
        Weather::Fog => "Fog",
        Weather::Storm => "Storm",
    }
}

/// Season for a month (1-12). Out-of-range months count as winter.
pub fn season(month: u32) -> Season {
    match month {
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        9..=11 => Season::Autumn,
        _ => Season::Winter,
    }
}

/// Today's weather, from the local clock.
pub fn current_weather() -> Weather {
    weather(CalendarDate::today())
}

/// Current part of the day, from the local clock.
pub fn current_time_of_day() -> TimeOfDay {
    time_of_day(Local::now().hour())
}
