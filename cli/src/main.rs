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

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use mood_core::models::MoodReport;
use mood_core::{get_spotify_client, ListeningSource, Reporter, SpotifySource, TimeWindow};
use std::fs::File;
use std::io::Write;
use std::process;

#[derive(Parser)]
#[command(name = "mood-report")]
#[command(about = "Turns your Spotify listening history into a mood report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum WindowArg {
    /// Roughly the last 4 weeks
    Short,
    /// Roughly the last 6 months
    Medium,
    /// All-time
    Long,
}

impl From<WindowArg> for TimeWindow {
    fn from(window: WindowArg) -> Self {
        match window {
            WindowArg::Short => TimeWindow::Short,
            WindowArg::Medium => TimeWindow::Medium,
            WindowArg::Long => TimeWindow::Long,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyzes your listening history and prints the full mood report
    Report {
        /// Output the report to a JSON file (e.g., --json=report.json)
        #[arg(long)]
        json: Option<String>,
    },
    /// Lists your recently played tracks
    Recent {
        /// How many plays to show (max 50)
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Lists your top tracks (or artists) for a time window
    Top {
        /// Show top artists instead of top tracks
        #[arg(long)]
        artists: bool,
        /// Which lookback window to use
        #[arg(long, value_enum, default_value = "short")]
        window: WindowArg,
        /// How many entries to show (max 50)
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if dotenv().is_err() {
        // Silently ignore
    }

    let cli = Cli::parse();

    match &cli.command {
        Commands::Report { json } => {
            handle_report(json.as_deref()).await;
        }
        Commands::Recent { limit } => {
            handle_recent(*limit).await;
        }
        Commands::Top {
            artists,
            window,
            limit,
        } => {
            handle_top(*artists, (*window).into(), *limit).await;
        }
    }
}

async fn get_source() -> SpotifySource {
    let spotify = match get_spotify_client().await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error initializing Spotify client: {}", e);
            process::exit(1);
        }
    };
    SpotifySource::new(spotify)
}

async fn handle_report(json_path: Option<&str>) {
    let reporter = Reporter::new(get_source().await);
    println!("Reading your listening history...");

    match reporter.mood_report().await {
        Ok(Some(report)) => {
            print_report(&report);

            if let Some(path) = json_path {
                match write_json(path, &report) {
                    Ok(()) => {
                        println!();
                        println!("[SAVED] Report saved to: {}", path);
                    }
                    Err(e) => {
                        eprintln!();
                        eprintln!("[ERROR] {:#}", e);
                    }
                }
            }
        }
        Ok(None) => {
            println!();
            println!("Not enough listening history to report on yet.");
            println!("Play some music and come back.");
        }
        Err(e) => {
            eprintln!();
            eprintln!("Report failed: {}", e);
            process::exit(1);
        }
    }
}

fn print_report(report: &MoodReport) {
    println!();
    println!("---------------------------------------------------");
    println!("MOOD REPORT");
    println!("---------------------------------------------------");
    println!(
        "Overall vibe:  {:.2}  ({})",
        report.overall_vibe, report.overall_mood
    );
    println!("  {}", report.mood_description);

    if !report.days.is_empty() {
        println!("---------------------------------------------------");
        println!("DAY BY DAY");
        for day in &report.days {
            println!(
                "  {}  {:<12} vibe {:.2} | {:>2} plays | diversity {:.2} | explicit {:.0}%",
                day.date,
                day.mood,
                day.vibe,
                day.plays,
                day.diversity,
                day.explicit_ratio * 100.0
            );
        }
    }

    println!("---------------------------------------------------");
    println!("EMOTIONAL DIMENSIONS");
    let dimensions = [
        ("Range", &report.emotional.range),
        ("Comfort-Seeking", &report.emotional.comfort_seeking),
        ("Depth", &report.emotional.depth),
        ("Mood-Swing", &report.emotional.mood_swing),
    ];
    for (name, score) in dimensions {
        println!("  {:<16} {:>3.0}/100  {}", name, score.value, score.tier);
    }

    println!("---------------------------------------------------");
    println!("PERSONALITY: {}", report.personality.archetype);
    println!("  {}", report.personality.description);

    println!("---------------------------------------------------");
    println!("GENRES");
    println!("  Top:      {}", join_or_dash(&report.top_genres));
    println!("  Emerging: {}", join_or_dash(&report.emerging_genres));
    println!("  Fading:   {}", join_or_dash(&report.fading_genres));

    println!("---------------------------------------------------");
    println!("ARTIST ROTATION");
    println!("  Comfort:  {}", join_or_dash(&report.comfort_artists));
    println!("  Rising:   {}", join_or_dash(&report.rising_artists));
    println!("  Fading:   {}", join_or_dash(&report.fading_artists));

    println!("---------------------------------------------------");
    println!("{}", report.narrative);
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn write_json(path: &str, report: &MoodReport) -> anyhow::Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file '{}'", path))?;
    let json_content = serde_json::to_string_pretty(report)?;
    file.write_all(json_content.as_bytes())
        .with_context(|| format!("Failed to write report to '{}'", path))?;
    Ok(())
}

async fn handle_recent(limit: u32) {
    let source = get_source().await;
    println!("Fetching your recent plays...");

    match source.recent_plays(limit.min(50)).await {
        Ok(plays) => {
            println!();
            println!(
                "{:<20} | {:<30} | {:<25} | {:<4}",
                "Played At", "Track", "Artists", "Pop"
            );
            println!("{:-<20}-+-{:-<30}-+-{:-<25}-+-{:-<4}", "", "", "", "");
            for play in plays {
                println!(
                    "{:<20} | {:<30} | {:<25} | {:<4}",
                    play.played_at.format("%Y-%m-%d %H:%M"),
                    truncate(&play.track.name, 30),
                    truncate(&play.track.artists.join(", "), 25),
                    play.track.popularity
                );
            }
        }
        Err(e) => {
            eprintln!("Failed to fetch recent plays: {}", e);
            process::exit(1);
        }
    }
}

async fn handle_top(artists: bool, window: TimeWindow, limit: u32) {
    let source = get_source().await;
    let limit = limit.min(50);

    if artists {
        println!("Fetching your top artists...");
        match source.top_artists(window, limit).await {
            Ok(list) => {
                println!();
                println!("{:<4} | {:<25} | {:<40}", "Rank", "Artist", "Genres");
                println!("{:-<4}-+-{:-<25}-+-{:-<40}", "", "", "");
                for (i, artist) in list.iter().enumerate() {
                    println!(
                        "{:<4} | {:<25} | {:<40}",
                        i + 1,
                        truncate(&artist.name, 25),
                        truncate(&artist.genres.join(", "), 40)
                    );
                }
            }
            Err(e) => {
                eprintln!("Failed to fetch top artists: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("Fetching your top tracks...");
        match source.top_tracks(window, limit).await {
            Ok(list) => {
                println!();
                println!(
                    "{:<4} | {:<30} | {:<25} | {:<4}",
                    "Rank", "Track", "Artists", "Pop"
                );
                println!("{:-<4}-+-{:-<30}-+-{:-<25}-+-{:-<4}", "", "", "", "");
                for (i, track) in list.iter().enumerate() {
                    println!(
                        "{:<4} | {:<30} | {:<25} | {:<4}",
                        i + 1,
                        truncate(&track.name, 30),
                        truncate(&track.artists.join(", "), 25),
                        track.popularity
                    );
                }
            }
            Err(e) => {
                eprintln!("Failed to fetch top tracks: {}", e);
                process::exit(1);
            }
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(2)).collect();
        format!("{}..", kept)
    } else {
        text.to_string()
    }
}
