use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    cancel_pair, config::load_settings, decode_data_url, run_analysis, FanoutPolicy, GeminiClient,
};
use shared::{
    domain::{parse_birth_date, Language, UserInfo, ZodiacSign},
    protocol::AnalysisReport,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "oracle", about = "Zodiac lookups and generated birth-chart readings")]
struct Cli {
    /// Output language for prompts and sign names (`en` or `ar`).
    #[arg(long, global = true, value_parser = parse_language)]
    language: Option<Language>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the sun sign for a birth date and print its metadata. Works offline.
    Sign {
        #[arg(long)]
        birth_date: String,
    },
    /// Run the full horoscope, natal analysis and artwork cycle.
    Read {
        #[arg(long)]
        name: String,
        #[arg(long)]
        birth_date: String,
        #[arg(long, default_value = "")]
        birth_time: String,
        #[arg(long, default_value = "")]
        birth_location: String,
        /// Write the generated artwork to this path.
        #[arg(long)]
        image_out: Option<PathBuf>,
        /// Do not request the artwork at all.
        #[arg(long)]
        skip_image: bool,
        /// Print the merged report as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn parse_language(raw: &str) -> Result<Language, String> {
    Language::parse(raw).ok_or_else(|| format!("unsupported language `{raw}` (use en or ar)"))
}

fn render_sign(sign: ZodiacSign, language: Language) -> String {
    let data = sign.data();
    let compatibility = data
        .compatibility
        .iter()
        .map(|other| other.name(language))
        .collect::<Vec<_>>()
        .join(", ");
    let lucky_numbers = data
        .lucky_numbers
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", data.symbol, sign.name(language));
    let _ = writeln!(out, "  dates:         {}", data.date_range);
    let _ = writeln!(out, "  element:       {}", data.element.label());
    let _ = writeln!(out, "  modality:      {}", data.modality.label());
    let _ = writeln!(out, "  ruler:         {}", data.ruler);
    let _ = writeln!(out, "  lucky numbers: {lucky_numbers}");
    let _ = writeln!(out, "  lucky color:   {}", data.lucky_color);
    let _ = writeln!(out, "  compatible:    {compatibility}");
    let _ = write!(out, "  {}", data.description);
    out
}

fn render_report(user: &UserInfo, report: &AnalysisReport, language: Language) -> String {
    let prediction = &report.prediction;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} | {} {} | born {}{}",
        user.name,
        report.sign.symbol(),
        report.sign.name(language),
        user.birth_date_label(),
        user.birth_time_label()
            .map(|time| format!(" {time}"))
            .unwrap_or_default()
    );
    if let Some(location) = &user.birth_location {
        let _ = writeln!(out, "in {location}");
    }
    let _ = writeln!(out);
    for (title, body) in [
        ("Today", &prediction.daily),
        ("Love", &prediction.love),
        ("Career", &prediction.career),
        ("Health", &prediction.health),
        ("Advice", &prediction.astrological_advice),
    ] {
        let _ = writeln!(out, "[{title}] {body}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Natal analysis");
    for paragraph in report.natal_paragraphs() {
        let _ = writeln!(out, "  {paragraph}");
    }
    if report.zodiac_image.is_none() {
        let _ = writeln!(out);
        let _ = write!(out, "(no artwork was generated)");
    }
    out.trim_end().to_string()
}

async fn write_artwork(report: &AnalysisReport, path: &Path) -> Result<()> {
    let Some(url) = &report.zodiac_image else {
        warn!("no artwork to write");
        return Ok(());
    };
    let decoded = decode_data_url(url).context("artwork payload")?;
    tokio::fs::write(path, &decoded.bytes)
        .await
        .with_context(|| format!("writing artwork to {}", path.display()))?;
    info!(path = %path.display(), mime = %decoded.mime_type, "artwork written");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(language) = cli.language {
        settings.language = language;
    }
    let language = settings.language;

    match cli.command {
        Command::Sign { birth_date } => {
            let birth_date = parse_birth_date(&birth_date)?;
            println!("{}", render_sign(ZodiacSign::from_birth_date(birth_date), language));
        }
        Command::Read {
            name,
            birth_date,
            birth_time,
            birth_location,
            image_out,
            skip_image,
            json,
        } => {
            let user = UserInfo::from_form(&name, &birth_date, &birth_time, &birth_location)?;
            let sign = ZodiacSign::from_birth_date(user.birth_date);
            let client = GeminiClient::from_settings(&settings)?;
            let policy = if skip_image {
                FanoutPolicy::default().without_image()
            } else {
                FanoutPolicy::default()
            };

            let (cancel, signal) = cancel_pair();
            let ctrl_c = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });
            let outcome = run_analysis(&client, &user, sign, policy, signal).await;
            ctrl_c.abort();

            let report = match outcome {
                Ok(report) => report,
                Err(err) if err.is_cancelled() => {
                    eprintln!("reading cancelled");
                    return Ok(());
                }
                Err(err) => {
                    eprintln!("{}", language.connection_error_message());
                    return Err(err.into());
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report(&user, &report, language));
            }
            if let Some(path) = image_out {
                write_artwork(&report, &path).await?;
            }
        }
    }

    Ok(())
}
