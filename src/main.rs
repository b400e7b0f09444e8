//! Wellness Arcade headless driver
//!
//! Runs one game at the fixed tick cadence on autopilot and prints the final
//! snapshot and the high-score table as JSON. When a scores file is given,
//! the table is read from it first and written back after the run.
//!
//! Usage: `wellness-arcade [variant] [max_ticks] [settings.json] [scores.json]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use wellness_arcade::consts::TICKS_PER_SECOND;
use wellness_arcade::{ArcadeSession, GameEvent, HighScores, Settings, Variant};

/// One minute of play at the nominal cadence
const DEFAULT_MAX_TICKS: u64 = 60 * TICKS_PER_SECOND;

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let variant = match args.first() {
        Some(name) => match Variant::from_str(name) {
            Some(v) => v,
            None => bail!(
                "unknown game '{}' (expected one of: {})",
                name,
                Variant::ALL.map(|v| v.as_str()).join(", ")
            ),
        },
        None => Variant::Snake,
    };
    let max_ticks = match args.get(1) {
        Some(n) => n
            .parse::<u64>()
            .with_context(|| format!("invalid tick count '{}'", n))?,
        None => DEFAULT_MAX_TICKS,
    };
    let settings = match args.get(2) {
        Some(path) => Settings::load(Path::new(path)),
        None => Settings::default(),
    };
    let scores_path = args.get(3).map(Path::new);
    let mut scores = match scores_path {
        Some(path) => load_scores(path),
        None => HighScores::new(),
    };
    let seed = settings.seed.unwrap_or_else(clock_seed);

    log::info!(
        "{} (seed {}, up to {} ticks of {} ms)",
        variant.title(),
        seed,
        max_ticks,
        settings.tick_ms
    );

    let mut session = ArcadeSession::new(variant, &settings, seed);
    session.start()?;

    for _ in 0..max_ticks {
        if let Some(input) = session.demo_input() {
            session.apply(input);
        }
        session.tick()?;

        for event in session.drain_events() {
            match event {
                GameEvent::Cue(cue) => log::trace!("cue {:?}", cue),
                GameEvent::ScoreChanged { score } => log::debug!("score {}", score),
                other => log::info!("{:?}", other),
            }
        }
        if session.state().is_terminal() {
            break;
        }
    }

    if session.state().is_terminal() {
        if session.record(&mut scores).is_none() {
            log::info!("Score {} did not make the table", session.score());
        }
    } else {
        log::info!("Stopped after {} ticks", session.frame_count());
    }

    if let Some(path) = scores_path {
        let json = scores.to_json().context("failed to serialize high scores")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let snapshot = session
        .snapshot_json()
        .context("failed to serialize snapshot")?;
    let output = serde_json::json!({
        "snapshot": snapshot,
        "high_scores": scores,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// A missing or unreadable table starts empty
fn load_scores(path: &Path) -> HighScores {
    match std::fs::read_to_string(path) {
        Ok(json) => HighScores::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring high scores in {}: {}", path.display(), e);
            HighScores::new()
        }),
        Err(e) => {
            log::debug!("No high scores at {} ({})", path.display(), e);
            HighScores::new()
        }
    }
}
