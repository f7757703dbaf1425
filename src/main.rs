//! Headless autoplay runner (default binary).
//!
//! Plays the hinted swap every turn, detonating any bomb on the board first,
//! until the level ends. Wins advance to the next level; a loss ends the run.
//! Settings come from `GEMFALL_*` environment variables and the log level
//! from `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use flexi_logger::Logger;
use log::info;

use gemfall::core::snapshot::bonus_code;
use gemfall::core::{GameSnapshot, SwapOutcome};
use gemfall::session::{LogSink, Outcome, Session, SessionConfig};
use gemfall::types::{BonusKind, Position, TileKind, BOARD_SIZE};

const BOMB: u8 = bonus_code(Some(BonusKind::Bomb));

fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?
        .start()
        .context("failed to start logger")?;

    let config = SessionConfig::from_env();
    info!("autoplay config: {:?}", config);

    let mut session = Session::from_config(&config)
        .with_stats_sink(LogSink)
        .with_leaderboard_sink(LogSink);

    let mut played = 0;
    while played < config.levels {
        let outcome = play_level(&mut session)?;
        played += 1;

        let level = session.level();
        println!(
            "level {} {}: {} / {} points, {} moves left, best combo x{}",
            level.level,
            if outcome == Outcome::Won { "won" } else { "lost" },
            level.score,
            level.target_score,
            level.moves_remaining,
            level.highest_combo
        );
        print!("{}", render(&session.snapshot()));

        if outcome != Outcome::Won || played == config.levels {
            break;
        }
        session.next_level()?;
    }

    let entry = session.submit_score(&config.player)?;
    println!(
        "{} finished with {} points over {} level(s); high score {}",
        entry.name,
        entry.score,
        played,
        session.high_score()
    );
    Ok(())
}

fn play_level(session: &mut Session) -> Result<Outcome> {
    while !session.level().outcome.is_finished() {
        let outcome = take_turn(session)?;
        if outcome.reshuffled {
            info!("board had no moves left and was regenerated");
        }
    }
    Ok(session.level().outcome)
}

fn take_turn(session: &mut Session) -> Result<SwapOutcome> {
    if let Some(bomb) = find_bomb(&session.snapshot()) {
        return Ok(session.activate(bomb)?);
    }
    let (a, b) = session
        .hint()
        .context("board has no valid move after regeneration")?;
    Ok(session.swap(a, b)?)
}

fn find_bomb(snapshot: &GameSnapshot) -> Option<Position> {
    (0..BOARD_SIZE)
        .flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
        .find(|pos| snapshot.bonus[pos.row][pos.col] == BOMB)
}

fn render(snapshot: &GameSnapshot) -> String {
    let mut out = String::with_capacity((BOARD_SIZE + 1) * BOARD_SIZE);
    for (kinds, bonuses) in snapshot.board.iter().zip(snapshot.bonus.iter()) {
        for (&kind, &bonus) in kinds.iter().zip(bonuses.iter()) {
            let glyph = match (kind as usize).checked_sub(1).and_then(TileKind::from_index) {
                None => '.',
                Some(kind) if bonus != 0 => kind.glyph().to_ascii_lowercase(),
                Some(kind) => kind.glyph(),
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
