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

use crate::analyze::analyze;
use crate::models::{
    Artist, ListeningSnapshot, MoodReport, PlayedTrack, TimeWindow, Track, Windowed,
};
use async_trait::async_trait;
use log::{debug, info};
use rspotify::{
    model::{FullArtist, FullTrack, TimeRange},
    prelude::*,
    AuthCodeSpotify,
};
use std::sync::Arc;
use thiserror::Error;

/// The provider maximum per list, and the bound the analyzer assumes.
pub const FETCH_LIMIT: u32 = 50;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Spotify API error: {0}")]
    Spotify(#[from] rspotify::ClientError),
    #[error("listening history fetch failed: {0}")]
    Upstream(String),
}

/// The read operations a mood report needs from a music catalog.
///
/// A failed read must surface as an error, never as a silently empty list, so
/// the caller can tell "nothing to report" apart from a broken fetch.
#[async_trait]
pub trait ListeningSource: Send + Sync {
    /// Most-recent-first play history, bounded by `limit`.
    async fn recent_plays(&self, limit: u32) -> Result<Vec<PlayedTrack>, SourceError>;

    /// Ranked top tracks for one lookback window, index 0 = most played.
    async fn top_tracks(&self, window: TimeWindow, limit: u32)
        -> Result<Vec<Track>, SourceError>;

    /// Ranked top artists for one lookback window, with genre tags.
    async fn top_artists(
        &self,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<Artist>, SourceError>;
}

/// Spotify-backed listening source. The authenticated client is constructed
/// and refreshed by the caller; this type never handles tokens itself.
pub struct SpotifySource {
    spotify: Arc<AuthCodeSpotify>,
}

impl SpotifySource {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        Self {
            spotify: Arc::new(spotify),
        }
    }
}

fn time_range(window: TimeWindow) -> TimeRange {
    match window {
        TimeWindow::Short => TimeRange::ShortTerm,
        TimeWindow::Medium => TimeRange::MediumTerm,
        TimeWindow::Long => TimeRange::LongTerm,
    }
}

fn map_track(track: &FullTrack) -> Track {
    Track {
        id: track
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        name: track.name.clone(),
        artists: track.artists.iter().map(|a| a.name.clone()).collect(),
        popularity: track.popularity,
        explicit: track.explicit,
        // Prefer the mid-size album image, fall back to the largest.
        album_art: track
            .album
            .images
            .get(1)
            .or_else(|| track.album.images.first())
            .map(|img| img.url.clone()),
    }
}

fn map_artist(artist: &FullArtist) -> Artist {
    Artist {
        id: artist.id.to_string(),
        name: artist.name.clone(),
        genres: artist.genres.clone(),
    }
}

#[async_trait]
impl ListeningSource for SpotifySource {
    async fn recent_plays(&self, limit: u32) -> Result<Vec<PlayedTrack>, SourceError> {
        let page = self
            .spotify
            .current_user_recently_played(Some(limit), None)
            .await?;
        debug!("fetched {} recent plays", page.items.len());
        Ok(page
            .items
            .iter()
            .map(|history| PlayedTrack {
                track: map_track(&history.track),
                played_at: history.played_at,
            })
            .collect())
    }

    async fn top_tracks(
        &self,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<Track>, SourceError> {
        let page = self
            .spotify
            .current_user_top_tracks_manual(Some(time_range(window)), Some(limit), Some(0))
            .await?;
        debug!("fetched {} top tracks for {:?}", page.items.len(), window);
        Ok(page.items.iter().map(map_track).collect())
    }

    async fn top_artists(
        &self,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<Artist>, SourceError> {
        let page = self
            .spotify
            .current_user_top_artists_manual(Some(time_range(window)), Some(limit), Some(0))
            .await?;
        debug!("fetched {} top artists for {:?}", page.items.len(), window);
        Ok(page.items.iter().map(map_artist).collect())
    }
}

/// Fetches snapshots and runs the analyzer over them.
pub struct Reporter<S> {
    source: S,
}

impl<S: ListeningSource> Reporter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Issues all seven reads concurrently. Fails as a whole if any read
    /// fails; the analyzer never sees a partial snapshot.
    pub async fn fetch_snapshot(&self) -> Result<ListeningSnapshot, SourceError> {
        let (
            recent_plays,
            short_tracks,
            medium_tracks,
            long_tracks,
            short_artists,
            medium_artists,
            long_artists,
        ) = futures::try_join!(
            self.source.recent_plays(FETCH_LIMIT),
            self.source.top_tracks(TimeWindow::Short, FETCH_LIMIT),
            self.source.top_tracks(TimeWindow::Medium, FETCH_LIMIT),
            self.source.top_tracks(TimeWindow::Long, FETCH_LIMIT),
            self.source.top_artists(TimeWindow::Short, FETCH_LIMIT),
            self.source.top_artists(TimeWindow::Medium, FETCH_LIMIT),
            self.source.top_artists(TimeWindow::Long, FETCH_LIMIT),
        )?;

        Ok(ListeningSnapshot {
            recent_plays,
            top_tracks: Windowed {
                short: short_tracks,
                medium: medium_tracks,
                long: long_tracks,
            },
            top_artists: Windowed {
                short: short_artists,
                medium: medium_artists,
                long: long_artists,
            },
        })
    }

    /// Fetch and analyze. `Ok(None)` means the history was fetched fine but
    /// holds nothing to report; `Err` means a fetch itself failed.
    pub async fn mood_report(&self) -> Result<Option<MoodReport>, SourceError> {
        let snapshot = self.fetch_snapshot().await?;
        if snapshot.is_insufficient() {
            info!("listening history is empty, no report");
        }
        Ok(analyze(&snapshot))
    }
}
