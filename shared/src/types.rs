//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Navigation state of an advisory session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Login,
    Dashboard,
    Monitoring,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Dashboard => "dashboard",
            Page::Monitoring => "monitoring",
        }
    }
}

/// Growing season, derived from the calendar month at login time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Northern-hemisphere mapping from calendar month (1-12)
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}
