use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use lane_defence_strategy::Strategy;
use lane_defence_world::{query, GameStateMessage, Submission, TurnPhase, UnitCatalog};
use rand::Rng;

/// Outcome of a match driven through [`run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct MatchSummary {
    /// Deploy phases answered with a submission.
    pub(crate) turns_played: u32,
    /// Whether the engine announced the end of the match.
    pub(crate) finished: bool,
}

/// Plays a match over the engine's line protocol.
///
/// The first line carries the unit configuration. Every later line is a game
/// state: deploy phases are answered with two submission lines, action frames
/// feed the breach history, and the end-of-match message stops the loop.
pub(crate) fn run<R, I, O>(
    strategy: &mut Strategy<R>,
    input: I,
    mut output: O,
) -> Result<MatchSummary>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut lines = input.lines();
    let config = lines
        .next()
        .context("engine closed the stream before sending the configuration")?
        .context("failed to read the configuration line")?;
    let catalog = UnitCatalog::from_json(&config).context("invalid engine configuration")?;

    let mut summary = MatchSummary::default();
    for line in lines {
        let line = line.context("failed to read a game state line")?;
        if line.trim().is_empty() {
            continue;
        }
        let message = GameStateMessage::from_json(&line).context("invalid game state")?;

        match message.phase()? {
            TurnPhase::Deploy => {
                play_turn(strategy, &message, &catalog, &mut output)?;
                summary.turns_played += 1;
            }
            TurnPhase::Action => {
                let breaches = message.breaches().context("invalid action frame")?;
                let _ = strategy.on_action_frame(&breaches);
            }
            TurnPhase::End => {
                summary.finished = true;
                break;
            }
        }
    }

    let history = strategy.state().breach_history();
    tracing::info!(
        turns = summary.turns_played,
        finished = summary.finished,
        breaches = history.locations().len(),
        hotspots = ?history.hotspots(),
        "match over"
    );
    Ok(summary)
}

fn play_turn<R, O>(
    strategy: &mut Strategy<R>,
    message: &GameStateMessage,
    catalog: &UnitCatalog,
    output: &mut O,
) -> Result<()>
where
    R: Rng,
    O: Write,
{
    let mut board = message.board(catalog).context("invalid turn snapshot")?;
    let turn = query::turn(&board);
    let resources = query::resources(&board);
    tracing::debug!(
        turn = turn.get(),
        structure_points = resources.structure_points,
        mobility_points = resources.mobility_points,
        "deploy phase"
    );

    let direction = strategy.on_turn(&mut board);
    let commands = board.into_commands();
    let submission = Submission::encode(&commands, catalog);
    let [build, deploy] = submission
        .to_lines()
        .context("failed to encode the submission")?;

    writeln!(output, "{build}")?;
    writeln!(output, "{deploy}")?;
    output.flush()?;

    tracing::info!(
        turn = turn.get(),
        ?direction,
        build = submission.build_stack().len(),
        deploy = submission.deploy_stack().len(),
        "submitted turn"
    );
    Ok(())
}
