// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Light/dark theme of the session

use serde::{Deserialize, Serialize};

/// Current theme. Lives for one session only; toggles are never saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeState {
    #[default]
    Dark,
    Light,
}

impl ThemeState {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            ThemeState::Dark => ThemeState::Light,
            ThemeState::Light => ThemeState::Dark,
        }
    }

    pub fn is_light(self) -> bool {
        self == ThemeState::Light
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeState::Dark => "dark",
            ThemeState::Light => "light",
        }
    }
}
