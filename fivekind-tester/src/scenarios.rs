use anyhow::{Context, Result, anyhow, ensure};
use fivekind_game::{
    Category, GameAction, GameConfig, GamePhase, GameState, Outcome, Player, PlayerId, ScoreSession,
    compute_totals, game_summary, reduce,
};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use std::time::{Duration, Instant};

use crate::simulation::{GameSimulator, SimulationSummary, play_out, random_value, replay};

pub type ScenarioFn = fn(&GameSimulator, u64) -> Result<()>;

#[derive(Clone)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

pub fn catalog_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            key: "smoke",
            description: "Play a seeded game to completion and check totals",
            run: smoke,
        },
        Scenario {
            key: "first-write-wins",
            description: "Filled boxes ignore later writes",
            run: first_write_wins,
        },
        Scenario {
            key: "order-independence",
            description: "Any fill order converges to the same totals",
            run: order_independence,
        },
        Scenario {
            key: "bonus-events",
            description: "Bonus events only accrue after a maximum five of a kind",
            run: bonus_events,
        },
        Scenario {
            key: "undo-round-trip",
            description: "Undo plus delayed commit restores the previous snapshot",
            run: undo_round_trip,
        },
        Scenario {
            key: "reset",
            description: "Reset returns to empty setup and clears undo",
            run: reset_from_any_phase,
        },
        Scenario {
            key: "snapshot-json",
            description: "Game state survives JSON export and import",
            run: snapshot_json,
        },
        Scenario {
            key: "standings",
            description: "Game-over summary ranks players and detects ties",
            run: standings,
        },
    ]
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog_scenarios()
        .into_iter()
        .map(|s| (s.key, s.description))
        .collect()
}

pub fn get_scenario(name: &str) -> Option<Scenario> {
    let name = name.to_lowercase();
    catalog_scenarios().into_iter().find(|s| s.key == name)
}

fn check_totals(summary: &SimulationSummary) -> Result<()> {
    for sheet in &summary.final_state.scores {
        let totals = compute_totals(&sheet.categories, sheet.bonus_count);
        ensure!(
            totals.grand_total == totals.upper_total + totals.lower_total + totals.bonus_total,
            "grand total mismatch for {}",
            sheet.player_id
        );
        let expected_bonus = if totals.upper_subtotal >= 63 { 35 } else { 0 };
        ensure!(
            totals.upper_bonus == expected_bonus,
            "upper bonus {} for subtotal {}",
            totals.upper_bonus,
            totals.upper_subtotal
        );
        for (category, slot) in sheet.categories.iter() {
            let value = slot.ok_or_else(|| anyhow!("{category} left open at game over"))?;
            ensure!(category.is_legal(value), "{category} holds illegal {value}");
        }
    }
    Ok(())
}

fn smoke(sim: &GameSimulator, seed: u64) -> Result<()> {
    let summary = sim.play(seed);
    ensure!(
        summary.final_state.phase == GamePhase::GameOver,
        "game ended in phase {}",
        summary.final_state.phase
    );
    ensure!(
        summary.turns.len() == sim.seats() * Category::ALL.len(),
        "expected {} entries, saw {}",
        sim.seats() * Category::ALL.len(),
        summary.turns.len()
    );
    check_totals(&summary)
}

fn first_write_wins(sim: &GameSimulator, seed: u64) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let session = sim.new_session(&mut rng);
    let state = session.state().clone();
    let id = state.players[0].id.clone();

    for category in Category::ALL {
        let first = random_value(category, &mut rng);
        let filled = reduce(&state, &GameAction::set_score(id.clone(), category, first));
        ensure!(
            filled.score(&id, category) == Some(first),
            "{category} did not take {first}"
        );
        for &other in category.legal_values() {
            let again = reduce(&filled, &GameAction::set_score(id.clone(), category, other));
            ensure!(again == filled, "{category} overwritten with {other}");
        }
    }

    let ghost = reduce(&state, &GameAction::set_score("ghost", Category::Ones, 1));
    ensure!(ghost == state, "unknown player changed the state");
    Ok(())
}

fn order_independence(sim: &GameSimulator, seed: u64) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let session = sim.new_session(&mut rng);
    let initial = session.state().clone();

    let mut cells: Vec<(PlayerId, Category, u16)> = Vec::new();
    for player in &initial.players {
        for category in Category::ALL {
            cells.push((player.id.clone(), category, random_value(category, &mut rng)));
        }
    }

    let fill = |cells: &[(PlayerId, Category, u16)]| {
        cells.iter().fold(initial.clone(), |state, (id, category, value)| {
            reduce(&state, &GameAction::set_score(id.clone(), *category, *value))
        })
    };
    let forward = fill(&cells);
    cells.shuffle(&mut rng);
    let shuffled = fill(&cells);

    ensure!(forward == shuffled, "fill order changed the final state");
    ensure!(forward.phase == GamePhase::GameOver, "not over after filling");
    Ok(())
}

fn bonus_events(sim: &GameSimulator, seed: u64) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut session = sim.new_session(&mut rng);
    let id = session.state().players[0].id.clone();
    let sheet_bonus = |session: &ScoreSession| {
        session
            .state()
            .sheet(&id)
            .map(|sheet| sheet.bonus_count)
            .unwrap_or_default()
    };

    session.add_bonus_event(&id);
    ensure!(sheet_bonus(&session) == 0, "bonus granted without five of a kind");

    session.set_score(&id, Category::FiveOfAKind, 50);
    let claims = (seed % 5) + 1;
    for _ in 0..claims {
        session.add_bonus_event(&id);
    }
    ensure!(
        u64::from(sheet_bonus(&session)) == claims,
        "expected {claims} bonus events"
    );
    let totals = session.totals_for(&id).context("player missing")?;
    ensure!(
        u64::from(totals.bonus_total) == claims * 100,
        "bonus total {} for {claims} events",
        totals.bonus_total
    );

    let mut zeroed = sim.new_session(&mut rng);
    let zid = zeroed.state().players[0].id.clone();
    zeroed.set_score(&zid, Category::FiveOfAKind, 0);
    zeroed.add_bonus_event(&zid);
    ensure!(
        zeroed.state().sheet(&zid).map(|s| s.bonus_count) == Some(0),
        "bonus granted on a scratched five of a kind"
    );
    Ok(())
}

fn undo_round_trip(sim: &GameSimulator, seed: u64) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut session = sim.new_session(&mut rng);
    let ids: Vec<PlayerId> = session.state().players.iter().map(|p| p.id.clone()).collect();

    let id = ids.choose(&mut rng).context("empty roster")?;
    let category = *Category::ALL.choose(&mut rng).context("no categories")?;
    let before = session.state().clone();
    session.set_score(id, category, random_value(category, &mut rng));
    ensure!(session.can_undo(), "score entry was not recorded");

    let highlight = session.undo().context("undo had nothing to do")?;
    ensure!(
        &highlight.player_id == id && highlight.category == category,
        "highlighted {} {} instead of {id} {category}",
        highlight.player_id,
        highlight.category
    );

    let now = Instant::now();
    let delay = session.config().undo_commit_delay();
    session.commit_pending_restore(now);
    ensure!(
        !session.poll(now + delay - Duration::from_millis(1)),
        "restore fired before the delay"
    );
    ensure!(session.poll(now + delay), "restore did not fire after the delay");
    ensure!(session.state() == &before, "undo was lossy");
    ensure!(!session.can_undo(), "undo stack not drained");
    ensure!(session.try_undo().is_err(), "empty history not reported");
    Ok(())
}

fn reset_from_any_phase(sim: &GameSimulator, seed: u64) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let mut playing = sim.new_session(&mut rng);
    let id = playing.state().players[0].id.clone();
    playing.set_score(&id, Category::Chance, 17);
    ensure!(playing.undo().is_some(), "nothing armed");
    playing.commit_pending_restore(Instant::now());
    playing.reset();
    ensure!(playing.state() == &GameState::initial(), "reset mid-game");
    ensure!(!playing.can_undo(), "reset kept undo history");
    ensure!(
        !playing.poll(Instant::now() + playing.config().undo_commit_delay()),
        "cancelled restore still fired"
    );
    ensure!(playing.state() == &GameState::initial(), "restore overwrote reset");

    let mut finished = sim.new_session(&mut rng);
    play_out(&mut finished, &mut rng);
    ensure!(finished.state().is_over(), "game did not finish");
    finished.reset();
    ensure!(finished.state() == &GameState::initial(), "reset after game over");
    Ok(())
}

fn snapshot_json(sim: &GameSimulator, seed: u64) -> Result<()> {
    let summary = sim.play(seed);
    let json = summary.final_state.to_json()?;
    let restored = GameState::from_json(&json).context("re-importing snapshot")?;
    ensure!(restored == summary.final_state, "snapshot changed in transit");

    let resumed = ScoreSession::from_state(GameConfig::default(), restored);
    ensure!(resumed.phase() == GamePhase::GameOver, "resumed phase drifted");
    ensure!(!resumed.can_undo(), "imported snapshot carried undo history");
    Ok(())
}

fn standings(_sim: &GameSimulator, seed: u64) -> Result<()> {
    let chance = |offset: u64| u16::try_from(5 + (seed + offset) % 26).unwrap_or(5);
    let scores = [("a", chance(0)), ("b", chance(7)), ("c", chance(0))];
    let mut actions = vec![GameAction::StartGame {
        players: scores
            .iter()
            .map(|(id, _)| Player::new(*id, id.to_uppercase()))
            .collect(),
    }];
    for (id, value) in scores {
        for category in Category::ALL {
            let v = if category == Category::Chance { value } else { 0 };
            actions.push(GameAction::set_score(id, category, v));
        }
    }
    let state = replay(&actions);
    let summary = game_summary(&state);

    let top = scores.iter().map(|(_, v)| u32::from(*v)).max().unwrap_or(0);
    ensure!(summary.top_score == top, "top score {}", summary.top_score);
    let expected = if scores.iter().filter(|(_, v)| u32::from(*v) == top).count() > 1 {
        Outcome::Tie
    } else {
        Outcome::Winner
    };
    ensure!(
        summary.outcome == expected,
        "outcome {} expected {expected}",
        summary.outcome
    );
    ensure!(
        summary
            .standings
            .windows(2)
            .all(|w| w[0].totals.grand_total >= w[1].totals.grand_total),
        "standings not sorted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_scenario_passes_on_a_few_seeds() {
        let sim = GameSimulator::new(3, GameConfig::default());
        for scenario in catalog_scenarios() {
            for seed in [1, 1337, 0xFACE] {
                (scenario.run)(&sim, seed)
                    .unwrap_or_else(|e| panic!("{} seed {seed}: {e:#}", scenario.key));
            }
        }
    }

    #[test]
    fn scenario_lookup_is_case_insensitive() {
        assert!(get_scenario("SMOKE").is_some());
        assert!(get_scenario("missing").is_none());
        assert_eq!(list_scenarios().len(), catalog_scenarios().len());
    }
}
