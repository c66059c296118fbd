// ABOUTME: Display locale for effort labels, card defaults, month titles, and weekday headers
// ABOUTME: Japanese and English strings, selected per server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language used for user-facing labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Japanese
    Ja,
}

const WEEKDAYS_EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Locale {
    /// Parse from string with fallback to English
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Column headers for a Sunday-first week
    #[must_use]
    pub const fn weekday_headers(self) -> [&'static str; 7] {
        match self {
            Self::En => WEEKDAYS_EN,
            Self::Ja => WEEKDAYS_JA,
        }
    }

    /// Month title, `month0` is 0-indexed and must already be normalized
    #[must_use]
    pub fn month_title(self, year: i32, month0: u32) -> String {
        match self {
            Self::En => {
                let name = MONTHS_EN.get(month0 as usize).copied().unwrap_or("");
                format!("{name} {year}")
            }
            Self::Ja => format!("{year}年 {}月", month0 + 1),
        }
    }

    /// Card title for an activity without a name
    #[must_use]
    pub const fn untitled_activity(self) -> &'static str {
        match self {
            Self::En => "Activity",
            Self::Ja => "アクティビティ",
        }
    }

    /// Card subtitle for an activity without a type
    #[must_use]
    pub const fn unknown_activity_type(self) -> &'static str {
        match self {
            Self::En => "Other",
            Self::Ja => "その他",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Ja => write!(f, "ja"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::En),
            "ja" | "ja-jp" | "japanese" => Ok(Self::Ja),
            other => Err(format!("Unsupported locale: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_titles() {
        assert_eq!(Locale::Ja.month_title(2024, 1), "2024年 2月");
        assert_eq!(Locale::En.month_title(2024, 11), "December 2024");
    }

    #[test]
    fn test_locale_parsing_falls_back_to_english() {
        assert_eq!(Locale::from_str_or_default("JA"), Locale::Ja);
        assert_eq!(Locale::from_str_or_default("fr"), Locale::En);
    }
}
