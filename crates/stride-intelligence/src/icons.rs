// ABOUTME: Activity-type icon selection from free-form upstream type keys
// ABOUTME: Case-insensitive substring matching with a running fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Serialize, Serializer};

/// Icon shown on a calendar day badge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActivityIcon {
    /// 🏃, also the fallback
    #[default]
    Run,
    /// 🚶
    Walk,
    /// 🚴
    Cycle,
    /// 🏊
    Swim,
    /// 🥾
    Hike,
}

/// Substring rules, checked in order
const ICON_RULES: [(&str, ActivityIcon); 6] = [
    ("run", ActivityIcon::Run),
    ("walk", ActivityIcon::Walk),
    ("cycl", ActivityIcon::Cycle),
    ("bike", ActivityIcon::Cycle),
    ("swim", ActivityIcon::Swim),
    ("hik", ActivityIcon::Hike),
];

impl ActivityIcon {
    /// Pick the icon for an upstream `typeKey`
    ///
    /// Unknown or absent keys map to [`ActivityIcon::Run`].
    #[must_use]
    pub fn from_type_key(type_key: Option<&str>) -> Self {
        let Some(key) = type_key else {
            return Self::default();
        };
        let key = key.to_lowercase();
        ICON_RULES
            .iter()
            .find(|(needle, _)| key.contains(needle))
            .map_or_else(Self::default, |(_, icon)| *icon)
    }

    /// Emoji rendering
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Run => "🏃",
            Self::Walk => "🚶",
            Self::Cycle => "🚴",
            Self::Swim => "🏊",
            Self::Hike => "🥾",
        }
    }
}

impl Serialize for ActivityIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.emoji())
    }
}
