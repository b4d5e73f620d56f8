/*
    mood-report-rs | Rust CLI tool to turn listening history into a mood report.
    Copyright (C) 2025  The mood-report-rs authors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A track as the analyzer sees it, mapped from the provider's model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub popularity: u32, // 0-100, provider-estimated mainstream-ness
    pub explicit: bool,
    pub album_art: Option<String>,
}

impl Track {
    /// The primary (first-credited) artist, used for diversity counts.
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.as_str())
    }
}

/// One entry of the recently-played history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayedTrack {
    pub track: Track,
    pub played_at: DateTime<Utc>,
}

/// An artist with its genre tags. Rank is positional in the list it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
}

/// The provider's three fixed lookback periods (~4 weeks / ~6 months / all-time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    Short,
    Medium,
    Long,
}

/// One value per time window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Windowed<T> {
    pub short: T,
    pub medium: T,
    pub long: T,
}

impl<T> Windowed<T> {
    pub fn get(&self, window: TimeWindow) -> &T {
        match window {
            TimeWindow::Short => &self.short,
            TimeWindow::Medium => &self.medium,
            TimeWindow::Long => &self.long,
        }
    }
}

/// Everything the analyzer needs, fetched in one shot.
///
/// `recent_plays` is most-recent-first; the ranked lists preserve provider
/// order (index 0 = most played). Each list holds at most 50 entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListeningSnapshot {
    pub recent_plays: Vec<PlayedTrack>,
    pub top_tracks: Windowed<Vec<Track>>,
    pub top_artists: Windowed<Vec<Artist>>,
}

impl ListeningSnapshot {
    /// True when neither primary data source has anything to analyze.
    pub fn is_insufficient(&self) -> bool {
        self.top_tracks.short.is_empty() && self.recent_plays.is_empty()
    }
}

/// Per-calendar-day aggregate of the recent plays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayMood {
    pub date: NaiveDate,
    pub plays: usize,
    pub vibe: f64, // 0-1, mean popularity / 100
    pub mood: String,
    pub diversity: f64,      // unique primary artists / plays, capped at 1
    pub explicit_ratio: f64, // explicit plays / plays
}

/// One of the four 0-100 emotional dimensions, with its tier description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalScore {
    pub value: f64,
    pub tier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalScores {
    pub range: EmotionalScore,
    pub comfort_seeking: EmotionalScore,
    pub depth: EmotionalScore,
    pub mood_swing: EmotionalScore,
}

/// Listener archetype picked from the decision table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personality {
    pub archetype: String,
    pub description: String,
}

/// The full report. Computed once per snapshot, never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodReport {
    pub days: Vec<DayMood>,
    pub overall_vibe: f64, // 0-1
    pub overall_mood: String,
    pub mood_description: String,
    pub emotional: EmotionalScores,
    pub personality: Personality,
    pub top_genres: Vec<String>,
    pub emerging_genres: Vec<String>,
    pub fading_genres: Vec<String>,
    pub comfort_artists: Vec<String>,
    pub rising_artists: Vec<String>,
    pub fading_artists: Vec<String>,
    pub narrative: String,
}
