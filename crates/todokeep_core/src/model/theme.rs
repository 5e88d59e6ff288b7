//! Theme identifiers and palettes.
//!
//! # Responsibility
//! - Enumerate the built-in themes and their color tokens.
//! - Parse persisted theme ids.
//!
//! # Invariants
//! - `THEMES` holds exactly one entry per `ThemeId`, in picker order.
//! - `ThemeId::default()` is `Dark`, which is also the fallback for unknown ids.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Built-in theme identifier, persisted as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeId {
    #[default]
    Dark,
    Light,
    Midnight,
    Forest,
    Sunset,
}

impl ThemeId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Midnight => "midnight",
            Self::Forest => "forest",
            Self::Sunset => "sunset",
        }
    }

    /// Returns the palette for this theme.
    pub fn theme(self) -> &'static Theme {
        THEMES
            .iter()
            .find(|theme| theme.id == self)
            .unwrap_or(&THEMES[0])
    }
}

impl Display for ThemeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or user-supplied theme id is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeParseError(pub String);

impl Display for ThemeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown theme `{}`; expected dark|light|midnight|forest|sunset",
            self.0
        )
    }
}

impl Error for ThemeParseError {}

impl FromStr for ThemeId {
    type Err = ThemeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "midnight" => Ok(Self::Midnight),
            "forest" => Ok(Self::Forest),
            "sunset" => Ok(Self::Sunset),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

/// Color tokens consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: &'static str,
    pub foreground: &'static str,
    pub card_bg: &'static str,
    pub card_hover: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_hover: &'static str,
    pub danger: &'static str,
    pub success: &'static str,
    pub muted: &'static str,
}

/// Named theme with its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: ThemeId,
    pub name: &'static str,
    pub colors: ThemeColors,
}

pub const THEMES: [Theme; 5] = [
    Theme {
        id: ThemeId::Dark,
        name: "Dark",
        colors: ThemeColors {
            background: "#0f0f0f",
            foreground: "#ededed",
            card_bg: "#1a1a1a",
            card_hover: "#252525",
            border: "#2a2a2a",
            accent: "#3b82f6",
            accent_hover: "#2563eb",
            danger: "#ef4444",
            success: "#22c55e",
            muted: "#6b7280",
        },
    },
    Theme {
        id: ThemeId::Light,
        name: "Light",
        colors: ThemeColors {
            background: "#f5f5f5",
            foreground: "#171717",
            card_bg: "#ffffff",
            card_hover: "#f0f0f0",
            border: "#e5e5e5",
            accent: "#3b82f6",
            accent_hover: "#2563eb",
            danger: "#ef4444",
            success: "#22c55e",
            muted: "#6b7280",
        },
    },
    Theme {
        id: ThemeId::Midnight,
        name: "Midnight",
        colors: ThemeColors {
            background: "#0f172a",
            foreground: "#e2e8f0",
            card_bg: "#1e293b",
            card_hover: "#334155",
            border: "#334155",
            accent: "#8b5cf6",
            accent_hover: "#7c3aed",
            danger: "#f43f5e",
            success: "#10b981",
            muted: "#64748b",
        },
    },
    Theme {
        id: ThemeId::Forest,
        name: "Forest",
        colors: ThemeColors {
            background: "#0c1a0f",
            foreground: "#e2f5e6",
            card_bg: "#132517",
            card_hover: "#1a3320",
            border: "#234529",
            accent: "#22c55e",
            accent_hover: "#16a34a",
            danger: "#ef4444",
            success: "#4ade80",
            muted: "#6b8a70",
        },
    },
    Theme {
        id: ThemeId::Sunset,
        name: "Sunset",
        colors: ThemeColors {
            background: "#1a0f0f",
            foreground: "#fce7e7",
            card_bg: "#2a1515",
            card_hover: "#3a2020",
            border: "#4a2a2a",
            accent: "#f97316",
            accent_hover: "#ea580c",
            danger: "#ef4444",
            success: "#22c55e",
            muted: "#8a6b6b",
        },
    },
];
