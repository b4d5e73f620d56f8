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

use crate::models::{
    Artist, DayMood, EmotionalScore, EmotionalScores, ListeningSnapshot, MoodReport, Personality,
    PlayedTrack, Track,
};
use chrono::NaiveDate;
use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet};

/// One mood band: an inclusive lower bound on the vibe scalar plus its prose.
/// Bands are scanned in order, first match wins.
struct MoodBand {
    floor: f64,
    label: &'static str,
    description: &'static str,
}

const MOOD_BANDS: [MoodBand; 5] = [
    MoodBand {
        floor: 0.72,
        label: "On Top",
        description: "Riding high. Your rotation is bright, loud, and unmistakably mainstream.",
    },
    MoodBand {
        floor: 0.58,
        label: "Cruising",
        description: "Comfortable and upbeat, with plenty of crowd-pleasers in the mix.",
    },
    MoodBand {
        floor: 0.44,
        label: "Drifting",
        description: "Somewhere in between, neither chasing hits nor hiding from them.",
    },
    MoodBand {
        floor: 0.30,
        label: "Digging Deep",
        description: "Leaning into quieter, less-traveled corners of the catalog.",
    },
    MoodBand {
        floor: 0.0,
        label: "In the Dark",
        description: "Deep in the niche. The charts are a distant rumor right now.",
    },
];

const GENRE_SET_SIZE: usize = 15;
const EMERGING_PROBE: usize = 7;
const MAX_GENRE_SHIFTS: usize = 3;
const MAX_TOP_GENRES: usize = 5;
const MAX_COMFORT_ARTISTS: usize = 5;
const MAX_RISING_ARTISTS: usize = 5;
const MAX_FADING_ARTISTS: usize = 4;

/// Produces a mood report from a listening snapshot, or `None` when both the
/// short-window top tracks and the recent plays are empty.
///
/// Pure transformation: no I/O, no retries, no shared state. Upstream fetch
/// failures never reach this function; the caller surfaces them separately so
/// "nothing to report" is never conflated with "the fetch broke".
pub fn analyze(snapshot: &ListeningSnapshot) -> Option<MoodReport> {
    if snapshot.is_insufficient() {
        return None;
    }

    let days = aggregate_days(&snapshot.recent_plays);

    // Overall vibe comes from the short-window top tracks, falling back to
    // the flattened recent plays when the top list is empty.
    let recent_tracks: Vec<Track> = snapshot
        .recent_plays
        .iter()
        .map(|p| p.track.clone())
        .collect();
    let primary_tracks: &[Track] = if snapshot.top_tracks.short.is_empty() {
        &recent_tracks
    } else {
        &snapshot.top_tracks.short
    };

    let avg_popularity = mean_popularity(primary_tracks.iter());
    let overall_vibe = (avg_popularity / 100.0).clamp(0.0, 1.0);
    let band = classify_vibe(overall_vibe);

    debug!(
        "analyzing snapshot: {} recent plays, {} short top tracks, vibe {:.3}",
        snapshot.recent_plays.len(),
        snapshot.top_tracks.short.len(),
        overall_vibe
    );

    let range = range_score(primary_tracks);
    let comfort = comfort_score(&snapshot.top_artists.short, &snapshot.top_artists.long);
    let depth = (100.0 - avg_popularity).clamp(0.0, 100.0);
    let swing = mood_swing_score(&days);

    let emotional = EmotionalScores {
        range: tiered(
            range,
            65.0,
            40.0,
            [
                "Wide open. You rarely stay with one artist for long.",
                "A healthy rotation with a few anchors.",
                "Locked in on a handful of favorites.",
            ],
        ),
        comfort_seeking: tiered(
            comfort,
            60.0,
            30.0,
            [
                "You keep coming home to the artists you have always loved.",
                "A familiar core with room for newcomers.",
                "Almost everything on rotation is new territory.",
            ],
        ),
        depth: tiered(
            depth,
            55.0,
            30.0,
            [
                "Well off the beaten path. Most of this never touches the charts.",
                "A balanced mix of hits and hidden gems.",
                "Mainstream through and through.",
            ],
        ),
        mood_swing: tiered(
            swing,
            50.0,
            25.0,
            [
                "Whiplash days. Your vibe swings hard between highs and lows.",
                "Noticeable ups and downs from day to day.",
                "Remarkably even keel.",
            ],
        ),
    };

    let (top_genres, emerging_genres, fading_genres) =
        genre_evolution(&snapshot.top_artists.short, &snapshot.top_artists.long);
    let (comfort_artists, rising_artists, fading_artists) = artist_evolution(snapshot);

    let top_artist = snapshot
        .top_artists
        .short
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "your favorites".to_string());
    let top_genre = top_genres
        .first()
        .cloned()
        .unwrap_or_else(|| "your usual sounds".to_string());

    Some(MoodReport {
        narrative: narrative(&days, &top_artist, &top_genre),
        days,
        overall_vibe,
        overall_mood: band.label.to_string(),
        mood_description: band.description.to_string(),
        personality: personality(depth, comfort, range),
        emotional,
        top_genres,
        emerging_genres,
        fading_genres,
        comfort_artists,
        rising_artists,
        fading_artists,
    })
}

fn classify_vibe(vibe: f64) -> &'static MoodBand {
    MOOD_BANDS
        .iter()
        .find(|band| vibe >= band.floor)
        .unwrap_or(&MOOD_BANDS[MOOD_BANDS.len() - 1])
}

fn mean_popularity<'a, I>(tracks: I) -> f64
where
    I: Iterator<Item = &'a Track>,
{
    let (sum, count) = tracks.fold((0u64, 0u64), |(s, n), t| (s + u64::from(t.popularity), n + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Groups the recent plays by UTC calendar day and aggregates each day.
/// Returned in chronological order.
fn aggregate_days(plays: &[PlayedTrack]) -> Vec<DayMood> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&Track>> = BTreeMap::new();
    for play in plays {
        by_day
            .entry(play.played_at.date_naive())
            .or_default()
            .push(&play.track);
    }

    by_day
        .into_iter()
        .map(|(date, tracks)| {
            let play_count = tracks.len();
            let vibe = (mean_popularity(tracks.iter().copied()) / 100.0).clamp(0.0, 1.0);
            let unique_artists: HashSet<&str> =
                tracks.iter().filter_map(|t| t.primary_artist()).collect();
            let explicit_plays = tracks.iter().filter(|t| t.explicit).count();
            DayMood {
                date,
                plays: play_count,
                vibe,
                mood: classify_vibe(vibe).label.to_string(),
                diversity: (unique_artists.len() as f64 / play_count as f64).min(1.0),
                explicit_ratio: explicit_plays as f64 / play_count as f64,
            }
        })
        .collect()
}

/// Distinct primary artists among the given tracks, as a percentage.
fn range_score(tracks: &[Track]) -> f64 {
    if tracks.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = tracks.iter().filter_map(|t| t.primary_artist()).collect();
    (unique.len() as f64 / tracks.len() as f64 * 100.0).clamp(0.0, 100.0)
}

/// Fraction of short-window artists also present, by name, in the long window.
fn comfort_score(short: &[Artist], long: &[Artist]) -> f64 {
    if short.is_empty() {
        return 0.0;
    }
    let long_names: HashSet<&str> = long.iter().map(|a| a.name.as_str()).collect();
    let kept = short
        .iter()
        .filter(|a| long_names.contains(a.name.as_str()))
        .count();
    (kept as f64 / short.len() as f64 * 100.0).clamp(0.0, 100.0)
}

/// Mean absolute day-over-day vibe change, scaled by 200. Needs at least two
/// days, otherwise 0.
fn mood_swing_score(days: &[DayMood]) -> f64 {
    if days.len() < 2 {
        return 0.0;
    }
    let total: f64 = days.windows(2).map(|w| (w[1].vibe - w[0].vibe).abs()).sum();
    let mean = total / (days.len() - 1) as f64;
    (mean * 200.0).clamp(0.0, 100.0)
}

fn tiered(value: f64, high: f64, mid: f64, descriptions: [&str; 3]) -> EmotionalScore {
    let tier = if value >= high {
        descriptions[0]
    } else if value >= mid {
        descriptions[1]
    } else {
        descriptions[2]
    };
    EmotionalScore {
        value,
        tier: tier.to_string(),
    }
}

/// Ordered rule table over the three scores; the first matching row wins.
/// The Range override beats everything, then Depth and Comfort-Seeking split
/// the remaining five archetypes between them.
fn personality(depth: f64, comfort: f64, range: f64) -> Personality {
    let rules: [(bool, &str, &str); 6] = [
        (
            range >= 65.0,
            "The Explorer",
            "Always chasing new voices. No single artist holds you for long.",
        ),
        (
            depth >= 55.0 && comfort > 55.0,
            "The Deep Loyalist",
            "You found your obscure corner years ago and you still live there.",
        ),
        (
            depth >= 55.0 && comfort <= 35.0,
            "The Excavator",
            "Forever digging for music nobody else has heard yet.",
        ),
        (
            depth >= 55.0,
            "The Curator",
            "One foot in the crates, one foot in the familiar.",
        ),
        (
            comfort > 55.0,
            "The Homebody",
            "The old favorites are favorites for a reason.",
        ),
        (
            true,
            "The Crowd Surfer",
            "You ride the mainstream wave and enjoy every minute of it.",
        ),
    ];

    let (_, archetype, description) = rules
        .iter()
        .copied()
        .find(|(hit, _, _)| *hit)
        .unwrap_or(rules[rules.len() - 1]);

    Personality {
        archetype: archetype.to_string(),
        description: description.to_string(),
    }
}

/// Rank-weighted genre frequency: an artist at rank `i` in a list of length
/// `n` contributes weight `n - i` to each of its genres. Descending weight,
/// ties keep first-seen order.
fn genre_weights(artists: &[Artist]) -> Vec<(String, usize)> {
    let n = artists.len();
    let mut weights: HashMap<&str, usize> = HashMap::new();
    let mut seen_order: Vec<&str> = Vec::new();

    for (i, artist) in artists.iter().enumerate() {
        for genre in &artist.genres {
            if !weights.contains_key(genre.as_str()) {
                seen_order.push(genre.as_str());
            }
            *weights.entry(genre.as_str()).or_insert(0) += n - i;
        }
    }

    let mut ranked: Vec<(String, usize)> = seen_order
        .into_iter()
        .map(|g| (g.to_string(), weights[g]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// (top, emerging, fading) genre lists from the short vs. long windows.
fn genre_evolution(
    short: &[Artist],
    long: &[Artist],
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let short_ranked = genre_weights(short);
    let long_ranked = genre_weights(long);

    let short_set: HashSet<&str> = short_ranked
        .iter()
        .take(GENRE_SET_SIZE)
        .map(|(g, _)| g.as_str())
        .collect();
    let long_set: HashSet<&str> = long_ranked
        .iter()
        .take(GENRE_SET_SIZE)
        .map(|(g, _)| g.as_str())
        .collect();

    let top = short_ranked
        .iter()
        .take(MAX_TOP_GENRES)
        .map(|(g, _)| g.clone())
        .collect();

    let emerging = short_ranked
        .iter()
        .take(EMERGING_PROBE)
        .filter(|(g, _)| !long_set.contains(g.as_str()))
        .take(MAX_GENRE_SHIFTS)
        .map(|(g, _)| g.clone())
        .collect();

    let fading = long_ranked
        .iter()
        .take(GENRE_SET_SIZE)
        .filter(|(g, _)| !short_set.contains(g.as_str()))
        .take(MAX_GENRE_SHIFTS)
        .map(|(g, _)| g.clone())
        .collect();

    (top, emerging, fading)
}

/// (comfort, rising, fading) artist name lists from window membership.
/// Missing non-primary windows behave as empty sets.
fn artist_evolution(snapshot: &ListeningSnapshot) -> (Vec<String>, Vec<String>, Vec<String>) {
    let short = &snapshot.top_artists.short;
    let long = &snapshot.top_artists.long;

    let medium_names: HashSet<&str> = snapshot
        .top_artists
        .medium
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    let long_names: HashSet<&str> = long.iter().map(|a| a.name.as_str()).collect();
    let short_names: HashSet<&str> = short.iter().map(|a| a.name.as_str()).collect();

    let comfort = short
        .iter()
        .filter(|a| medium_names.contains(a.name.as_str()) && long_names.contains(a.name.as_str()))
        .take(MAX_COMFORT_ARTISTS)
        .map(|a| a.name.clone())
        .collect();

    let rising = short
        .iter()
        .filter(|a| !long_names.contains(a.name.as_str()))
        .take(MAX_RISING_ARTISTS)
        .map(|a| a.name.clone())
        .collect();

    let fading = long
        .iter()
        .filter(|a| !short_names.contains(a.name.as_str()))
        .take(MAX_FADING_ARTISTS)
        .map(|a| a.name.clone())
        .collect();

    (comfort, rising, fading)
}

/// Single templated sentence keyed on the first-to-last day vibe trend.
fn narrative(days: &[DayMood], top_artist: &str, top_genre: &str) -> String {
    if days.len() < 3 {
        return format!(
            "Not enough days on record for a trend yet, but {} and {} are setting the tone.",
            top_artist, top_genre
        );
    }

    let delta = days[days.len() - 1].vibe - days[0].vibe;
    if delta > 0.15 {
        format!(
            "Your days are building brighter, with {} and plenty of {} lifting the back half of the week.",
            top_artist, top_genre
        )
    } else if delta < -0.15 {
        format!(
            "You're settling into introspection, drifting from the bright stuff toward {} and late-night {}.",
            top_artist, top_genre
        )
    } else {
        format!(
            "A steady stretch: {} on repeat and a constant undercurrent of {}.",
            top_artist, top_genre
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListeningSnapshot, Windowed};
    use chrono::{DateTime, Utc};

    fn track(id: &str, artist: &str, popularity: u32) -> Track {
        Track {
            id: id.to_string(),
            name: format!("Song {}", id),
            artists: vec![artist.to_string()],
            popularity,
            explicit: false,
            album_art: None,
        }
    }

    fn explicit(mut t: Track) -> Track {
        t.explicit = true;
        t
    }

    fn artist(name: &str, genres: &[&str]) -> Artist {
        Artist {
            id: name.to_lowercase(),
            name: name.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn play(track: Track, timestamp: &str) -> PlayedTrack {
        PlayedTrack {
            track,
            played_at: timestamp.parse::<DateTime<Utc>>().unwrap(),
        }
    }

    fn day(date: &str, vibe: f64) -> DayMood {
        DayMood {
            date: date.parse().unwrap(),
            plays: 1,
            vibe,
            mood: classify_vibe(vibe).label.to_string(),
            diversity: 1.0,
            explicit_ratio: 0.0,
        }
    }

    fn snapshot_with_top_tracks(popularities: &[u32]) -> ListeningSnapshot {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.top_tracks.short = popularities
            .iter()
            .enumerate()
            .map(|(i, p)| track(&format!("t{}", i), &format!("artist{}", i), *p))
            .collect();
        snapshot
    }

    #[test]
    fn test_overall_vibe_cruising() {
        let snapshot = snapshot_with_top_tracks(&[90, 85, 80, 75, 70, 65, 60, 55, 50, 45]);
        let report = analyze(&snapshot).unwrap();
        assert!((report.overall_vibe - 0.675).abs() < 1e-9);
        assert_eq!(report.overall_mood, "Cruising");
    }

    // Uniformly unpopular listening reads as maximum depth.
    #[test]
    fn test_low_popularity_reads_as_deep() {
        let snapshot = snapshot_with_top_tracks(&[20, 20, 20, 20, 20]);
        let report = analyze(&snapshot).unwrap();
        assert!((report.overall_vibe - 0.20).abs() < 1e-9);
        assert_eq!(report.overall_mood, "In the Dark");
        assert!((report.emotional.depth.value - 80.0).abs() < 1e-9);
    }

    // Every current favorite is an old favorite.
    #[test]
    fn test_full_overlap_comfort_and_artist_evolution() {
        let mut snapshot = snapshot_with_top_tracks(&[50, 50, 50]);
        snapshot.top_artists.short = vec![
            artist("A", &["pop"]),
            artist("B", &["rock"]),
            artist("C", &["jazz"]),
        ];
        snapshot.top_artists.long = vec![
            artist("A", &["pop"]),
            artist("B", &["rock"]),
            artist("C", &["jazz"]),
            artist("D", &["folk"]),
            artist("E", &["metal"]),
        ];
        let report = analyze(&snapshot).unwrap();
        assert!((report.emotional.comfort_seeking.value - 100.0).abs() < 1e-9);
        assert!(report.rising_artists.is_empty());
        assert_eq!(report.fading_artists, vec!["D", "E"]);
    }

    // One calendar day means no swing regardless of variance within it.
    #[test]
    fn test_single_day_has_no_mood_swing() {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.recent_plays = vec![
            play(track("1", "A", 95), "2025-03-10T08:00:00Z"),
            play(track("2", "B", 5), "2025-03-10T12:00:00Z"),
            play(track("3", "C", 60), "2025-03-10T22:00:00Z"),
        ];
        let report = analyze(&snapshot).unwrap();
        assert_eq!(report.days.len(), 1);
        assert_eq!(report.emotional.mood_swing.value, 0.0);
    }

    #[test]
    fn test_empty_snapshot_yields_no_report() {
        assert!(analyze(&ListeningSnapshot::default()).is_none());
    }

    #[test]
    fn test_recent_plays_alone_are_sufficient() {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.recent_plays = vec![play(track("1", "A", 40), "2025-03-10T08:00:00Z")];
        let report = analyze(&snapshot).unwrap();
        // Fallback path: vibe computed over the recent plays themselves.
        assert!((report.overall_vibe - 0.40).abs() < 1e-9);
    }

    #[test]
    fn test_band_thresholds_are_inclusive() {
        assert_eq!(classify_vibe(0.72).label, "On Top");
        assert_eq!(classify_vibe(0.58).label, "Cruising");
        assert_eq!(classify_vibe(0.44).label, "Drifting");
        assert_eq!(classify_vibe(0.30).label, "Digging Deep");
        assert_eq!(classify_vibe(0.2999).label, "In the Dark");
        assert_eq!(classify_vibe(0.0).label, "In the Dark");
        assert_eq!(classify_vibe(1.0).label, "On Top");
    }

    #[test]
    fn test_band_classification_is_monotonic() {
        let band_index = |vibe: f64| {
            MOOD_BANDS
                .iter()
                .position(|b| vibe >= b.floor)
                .unwrap_or(MOOD_BANDS.len() - 1)
        };
        let mut previous = band_index(0.0);
        for step in 0..=100 {
            let vibe = step as f64 / 100.0;
            let current = band_index(vibe);
            assert!(current <= previous, "band regressed at vibe {}", vibe);
            previous = current;
        }
    }

    #[test]
    fn test_mood_swing_zero_for_identical_days() {
        let days = vec![
            day("2025-03-10", 0.5),
            day("2025-03-11", 0.5),
            day("2025-03-12", 0.5),
        ];
        assert_eq!(mood_swing_score(&days), 0.0);
    }

    #[test]
    fn test_mood_swing_scales_mean_delta() {
        // Deltas 0.2 and 0.2, mean 0.2, scaled to 40.
        let days = vec![
            day("2025-03-10", 0.2),
            day("2025-03-11", 0.4),
            day("2025-03-12", 0.2),
        ];
        assert!((mood_swing_score(&days) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_mood_swing_clamped_at_100() {
        let days = vec![
            day("2025-03-10", 0.0),
            day("2025-03-11", 1.0),
            day("2025-03-12", 0.0),
        ];
        assert_eq!(mood_swing_score(&days), 100.0);
    }

    #[test]
    fn test_comfort_zero_when_windows_disjoint() {
        let short = vec![artist("A", &[]), artist("B", &[])];
        let long = vec![artist("C", &[]), artist("D", &[])];
        assert_eq!(comfort_score(&short, &long), 0.0);
    }

    #[test]
    fn test_comfort_zero_when_long_window_missing() {
        let short = vec![artist("A", &[])];
        assert_eq!(comfort_score(&short, &[]), 0.0);
    }

    #[test]
    fn test_range_counts_distinct_primary_artists() {
        let tracks: Vec<Track> = (0..10)
            .map(|i| track(&format!("t{}", i), &format!("artist{}", i % 5), 50))
            .collect();
        assert!((range_score(&tracks) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_genre_weights_favor_top_ranks() {
        let artists = vec![
            artist("A", &["indie"]),
            artist("B", &["indie"]),
            artist("C", &["pop"]),
        ];
        let ranked = genre_weights(&artists);
        assert_eq!(ranked[0], ("indie".to_string(), 5)); // 3 + 2
        assert_eq!(ranked[1], ("pop".to_string(), 1));
    }

    #[test]
    fn test_emerging_and_fading_genres_never_overlap() {
        let short = vec![
            artist("A", &["hyperpop", "glitch"]),
            artist("B", &["shoegaze"]),
            artist("C", &["indie"]),
        ];
        let long = vec![
            artist("D", &["indie", "classic rock"]),
            artist("E", &["folk"]),
            artist("F", &["shoegaze"]),
        ];
        let (_, emerging, fading) = genre_evolution(&short, &long);
        for genre in &emerging {
            assert!(!fading.contains(genre), "{} is both emerging and fading", genre);
        }
        assert!(emerging.contains(&"hyperpop".to_string()));
        assert!(fading.contains(&"folk".to_string()));
    }

    #[test]
    fn test_comfort_artists_require_all_three_windows() {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.top_artists = Windowed {
            short: vec![artist("A", &[]), artist("B", &[]), artist("C", &[])],
            medium: vec![artist("A", &[]), artist("C", &[])],
            long: vec![artist("A", &[]), artist("B", &[])],
        };
        let (comfort, rising, fading) = artist_evolution(&snapshot);
        assert_eq!(comfort, vec!["A"]);
        assert_eq!(rising, vec!["C"]);
        assert!(fading.is_empty());
    }

    #[test]
    fn test_personality_table_covers_all_archetypes() {
        assert_eq!(personality(0.0, 0.0, 70.0).archetype, "The Explorer");
        assert_eq!(personality(60.0, 60.0, 10.0).archetype, "The Deep Loyalist");
        assert_eq!(personality(60.0, 30.0, 10.0).archetype, "The Excavator");
        assert_eq!(personality(60.0, 45.0, 10.0).archetype, "The Curator");
        assert_eq!(personality(30.0, 60.0, 10.0).archetype, "The Homebody");
        assert_eq!(personality(30.0, 30.0, 10.0).archetype, "The Crowd Surfer");
    }

    #[test]
    fn test_range_override_beats_depth_and_comfort() {
        // Deep and loyal, but the override still wins at 65% range.
        assert_eq!(personality(90.0, 90.0, 65.0).archetype, "The Explorer");
    }

    #[test]
    fn test_day_aggregation_orders_chronologically() {
        let mut snapshot = ListeningSnapshot::default();
        // Most recent first, as the provider returns them.
        snapshot.recent_plays = vec![
            play(track("3", "C", 80), "2025-03-12T10:00:00Z"),
            play(track("2", "B", 50), "2025-03-11T10:00:00Z"),
            play(track("1", "A", 20), "2025-03-10T10:00:00Z"),
        ];
        let report = analyze(&snapshot).unwrap();
        let dates: Vec<String> = report.days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-03-10", "2025-03-11", "2025-03-12"]);
    }

    #[test]
    fn test_day_diversity_and_explicit_ratio() {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.recent_plays = vec![
            play(track("1", "A", 50), "2025-03-10T08:00:00Z"),
            play(track("2", "A", 50), "2025-03-10T09:00:00Z"),
            play(track("3", "B", 50), "2025-03-10T10:00:00Z"),
            play(explicit(track("4", "B", 50)), "2025-03-10T11:00:00Z"),
        ];
        let report = analyze(&snapshot).unwrap();
        let day = &report.days[0];
        assert_eq!(day.plays, 4);
        assert!((day.diversity - 0.5).abs() < 1e-9);
        assert!((day.explicit_ratio - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_narrative_brightening_trend() {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.recent_plays = vec![
            play(track("3", "C", 90), "2025-03-12T10:00:00Z"),
            play(track("2", "B", 50), "2025-03-11T10:00:00Z"),
            play(track("1", "A", 20), "2025-03-10T10:00:00Z"),
        ];
        snapshot.top_artists.short = vec![artist("Laufey", &["jazz pop"])];
        let report = analyze(&snapshot).unwrap();
        assert!(report.narrative.contains("building brighter"));
        assert!(report.narrative.contains("Laufey"));
        assert!(report.narrative.contains("jazz pop"));
    }

    #[test]
    fn test_narrative_introspective_trend() {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.recent_plays = vec![
            play(track("3", "C", 20), "2025-03-12T10:00:00Z"),
            play(track("2", "B", 50), "2025-03-11T10:00:00Z"),
            play(track("1", "A", 90), "2025-03-10T10:00:00Z"),
        ];
        let report = analyze(&snapshot).unwrap();
        assert!(report.narrative.contains("introspection"));
    }

    #[test]
    fn test_narrative_steady_trend() {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.recent_plays = vec![
            play(track("3", "C", 55), "2025-03-12T10:00:00Z"),
            play(track("2", "B", 50), "2025-03-11T10:00:00Z"),
            play(track("1", "A", 50), "2025-03-10T10:00:00Z"),
        ];
        let report = analyze(&snapshot).unwrap();
        assert!(report.narrative.contains("steady stretch"));
    }

    #[test]
    fn test_narrative_fallback_with_few_days() {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.recent_plays = vec![play(track("1", "A", 50), "2025-03-10T10:00:00Z")];
        let report = analyze(&snapshot).unwrap();
        assert!(report.narrative.contains("Not enough days"));
    }

    #[test]
    fn test_all_scores_stay_in_range_on_degenerate_input() {
        let mut snapshot = ListeningSnapshot::default();
        snapshot.top_tracks.short = vec![
            track("1", "A", 0),
            track("2", "A", 100),
            track("3", "A", 0),
        ];
        snapshot.recent_plays = vec![
            play(track("4", "B", 0), "2025-03-10T10:00:00Z"),
            play(track("5", "C", 100), "2025-03-11T10:00:00Z"),
        ];
        let report = analyze(&snapshot).unwrap();
        assert!((0.0..=1.0).contains(&report.overall_vibe));
        for score in [
            &report.emotional.range,
            &report.emotional.comfort_seeking,
            &report.emotional.depth,
            &report.emotional.mood_swing,
        ] {
            assert!((0.0..=100.0).contains(&score.value));
        }
        for day in &report.days {
            assert!((0.0..=1.0).contains(&day.vibe));
            assert!((0.0..=1.0).contains(&day.diversity));
            assert!((0.0..=1.0).contains(&day.explicit_ratio));
        }
    }

    #[test]
    fn test_depth_zero_for_pure_chart_listening() {
        let snapshot = snapshot_with_top_tracks(&[100, 100, 100]);
        let report = analyze(&snapshot).unwrap();
        assert_eq!(report.emotional.depth.value, 0.0);
        assert_eq!(report.overall_mood, "On Top");
    }
}
