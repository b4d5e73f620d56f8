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

use rspotify::{prelude::*, scopes, AuthCodeSpotify, Config, Credentials, OAuth};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to initialize Spotify client: {0}")]
    ClientConfig(String),
    #[error("Spotify authentication failed: {0}")]
    Spotify(#[from] rspotify::ClientError),
}

/// Initializes and authenticates a Spotify client using the Authorization Code Flow.
///
/// This function:
/// 1. Reads credentials (`RSPOTIFY_CLIENT_ID`, `RSPOTIFY_CLIENT_SECRET`) from the environment.
/// 2. Reads the redirect URI (`RSPOTIFY_REDIRECT_URI`) from the environment.
/// 3. Requests the read-only scopes a mood report needs (top items, play history).
/// 4. Handles the OAuth2 flow, including token caching and refreshing.
///
/// If a valid token is not cached, it will prompt the user (via stdout) to visit a URL
/// to authorize the application. Token refresh stays inside the rspotify client; the
/// analyzer and the listening source never see a token.
pub async fn get_spotify_client() -> Result<AuthCodeSpotify, AuthError> {
    // Load credentials from env. `rspotify` expects RSPOTIFY_CLIENT_ID/SECRET.
    let creds = Credentials::from_env().ok_or_else(|| {
        AuthError::ClientConfig("Missing RSPOTIFY_CLIENT_ID or RSPOTIFY_CLIENT_SECRET".to_string())
    })?;

    // Scopes required for the mood report.
    // - user-top-read: top tracks and artists per time window.
    // - user-read-recently-played: the recent play history.
    let scopes = scopes!("user-top-read", "user-read-recently-played");

    // Load OAuth config (Redirect URI) from env.
    let oauth = OAuth::from_env(scopes)
        .ok_or_else(|| AuthError::ClientConfig("Missing RSPOTIFY_REDIRECT_URI".to_string()))?;

    // `token_cached: true` enables saving the token to a file (default: .spotify_token_cache.json).
    let config = Config {
        token_cached: true,
        token_refreshing: true,
        ..Default::default()
    };

    let spotify = AuthCodeSpotify::with_config(creds, oauth, config);

    let url = spotify.get_authorize_url(false)?;

    // The `cli` feature of rspotify handles the interaction: it tries to open
    // the URL in the default browser, falls back to printing it, and waits
    // for the redirect to complete.
    spotify.prompt_for_token(&url).await?;

    Ok(spotify)
}
