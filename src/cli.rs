use std::fmt::Write as _;
use std::io;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::{error, info};
use songday::{
    DailySongSelector, RandomSongSelector,
    clients::{
        Song,
        errors::{Error, Result},
    },
    config::{Config, ConfigBuilder},
};

#[derive(Parser)]
#[command(name = "songday")]
#[command(version, about = "Pick today's songs from the iTunes Search API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Songs of the day, the same for everybody on that date
    Today {
        /// Number of songs [default: SONGDAY_COUNT or 5]
        #[arg(short, long)]
        count: Option<usize>,
        /// Day to pick for, as YYYY-MM-DD [default: today]
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Print the songs as JSON
        #[arg(long)]
        json: bool,
    },
    /// A fresh random mix
    Random {
        #[arg(short, long)]
        count: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

// Selection failures are reported here and turn into a failing exit code
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Today { count, date, json } => {
            let config = build_config(count)?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let selector = DailySongSelector::new(config.search_client()?);
            match selector.select(date, config.count).await {
                Ok(songs) => print_songs(date, &songs, json),
                Err(e) => Ok(report_failure(
                    &mut io::stderr(),
                    "Couldn't load songs. Check your internet connection.",
                    &e,
                )),
            }
        }
        Commands::Random { count, json } => {
            let config = build_config(count)?;
            let selector = RandomSongSelector::new(config.search_client()?);
            match selector.select(config.count).await {
                Ok(songs) => print_songs(Local::now().date_naive(), &songs, json),
                Err(e) => Ok(report_failure(
                    &mut io::stderr(),
                    "Couldn't load new songs. Please try again.",
                    &e,
                )),
            }
        }
    }
}

fn build_config(count: Option<usize>) -> Result<Config> {
    let mut builder = ConfigBuilder::new();
    if let Some(count) = count {
        builder = builder.count(count);
    }
    builder.build()
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| Error::ParseError(format!("date {raw:?}: {e}")))
}

fn report_failure(out: &mut impl io::Write, message: &str, err: &Error) -> ExitCode {
    error!("Selection failed: {err}");
    let _ = writeln!(out, "😕 {message}");
    ExitCode::FAILURE
}

fn print_songs(date: NaiveDate, songs: &[Song], json: bool) -> Result<ExitCode> {
    if json {
        let body = serde_json::to_string_pretty(songs)?;
        println!("{body}");
    } else {
        print!("{}", render(date, songs));
    }
    info!("Printed {} songs", songs.len());
    Ok(ExitCode::SUCCESS)
}

// Long form date, e.g. "Friday, March 15, 2024"
fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn render(date: NaiveDate, songs: &[Song]) -> String {
    let mut out = format!("{}\n\n", format_date(date));
    for (i, song) in songs.iter().enumerate() {
        let _ = writeln!(out, "{}. {} - {}", i + 1, song.title, song.artist);
        let _ = writeln!(out, "   Album:   {}", song.album);
        let _ = writeln!(out, "   Cover:   {}", song.cover);
        if let Some(preview) = &song.preview_url {
            let _ = writeln!(out, "   Preview: {preview}");
        }
        let _ = writeln!(out, "   Spotify: {}", song.spotify_url);
        out.push('\n');
    }
    out
}
