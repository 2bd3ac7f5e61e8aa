use std::time::{Duration, Instant};

use fivekind_game::{
    Category, GameAction, GamePhase, GameState, PlayerId, ScoreSession, compute_totals, reduce,
    roster_from_names,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

type Cell = (PlayerId, Category, u16);

fn random_cells(state: &GameState, rng: &mut ChaCha20Rng) -> Vec<Cell> {
    let mut cells = Vec::new();
    for player in &state.players {
        for category in Category::ALL {
            let values = category.legal_values();
            let value = values[rng.gen_range(0..values.len())];
            cells.push((player.id.clone(), category, value));
        }
    }
    cells
}

fn start(names: &[&str], rng: &mut ChaCha20Rng) -> GameState {
    let players = roster_from_names(names, rng);
    reduce(&GameState::initial(), &GameAction::StartGame { players })
}

fn play(state: &GameState, cells: &[Cell]) -> GameState {
    cells.iter().fold(state.clone(), |state, (id, category, value)| {
        reduce(&state, &GameAction::set_score(id.clone(), *category, *value))
    })
}

#[test]
fn random_legal_games_finish_exactly_on_last_cell() {
    for seed in 0..20_u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let seats = rng.gen_range(1..=6);
        let names: Vec<String> = (0..seats).map(|i| format!("P{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = start(&refs, &mut rng);
        let mut cells = random_cells(&state, &mut rng);
        cells.shuffle(&mut rng);

        let last = cells.len() - 1;
        for (idx, (id, category, value)) in cells.iter().enumerate() {
            state = reduce(&state, &GameAction::set_score(id.clone(), *category, *value));
            let expected = if idx == last {
                GamePhase::GameOver
            } else {
                GamePhase::Playing
            };
            assert_eq!(state.phase, expected, "seed {seed} cell {idx}");
            assert!(state.is_aligned());
        }
    }
}

#[test]
fn fill_order_does_not_change_totals() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xD1CE);
    let initial = start(&["Ada", "Bo", "Cy"], &mut rng);
    let cells = random_cells(&initial, &mut rng);

    let in_order = play(&initial, &cells);
    let mut shuffled = cells.clone();
    shuffled.shuffle(&mut rng);
    let out_of_order = play(&initial, &shuffled);

    assert_eq!(in_order, out_of_order);
    for sheet in &in_order.scores {
        let totals = compute_totals(&sheet.categories, sheet.bonus_count);
        assert_eq!(
            totals.grand_total,
            totals.upper_total + totals.lower_total + totals.bonus_total
        );
    }
}

#[test]
fn repeated_writes_never_overwrite() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let initial = start(&["Ada"], &mut rng);
    let id = initial.players[0].id.clone();
    for category in Category::ALL {
        for &value in category.legal_values() {
            let first = reduce(&initial, &GameAction::set_score(id.clone(), category, value));
            assert_eq!(first.score(&id, category), Some(value));
            let other = category.legal_values()[0];
            let second = reduce(&first, &GameAction::set_score(id.clone(), category, other));
            assert_eq!(second, first);
        }
    }
}

#[test]
fn session_undo_walks_back_to_start() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xBEEF);
    let mut session = ScoreSession::default();
    session.start_game(&["Ada", "Bo"], &mut rng);
    let start_state = session.state().clone();
    let mut cells = random_cells(&start_state, &mut rng);
    cells.shuffle(&mut rng);
    cells.truncate(8);

    let mut history = vec![start_state.clone()];
    for (id, category, value) in &cells {
        session.set_score(id, *category, *value);
        history.push(session.state().clone());
    }

    let mut now = Instant::now();
    history.pop();
    while let Some(expected) = history.pop() {
        let highlight = session.undo().expect("history left to undo");
        assert!(session.state().score(&highlight.player_id, highlight.category).is_some());
        assert!(session.commit_pending_restore(now));
        now += Duration::from_millis(500);
        assert!(session.poll(now));
        assert_eq!(session.state(), &expected);
    }
    assert!(!session.can_undo());
    assert_eq!(session.state(), &start_state);
}

#[test]
fn start_game_clears_undo_history() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let mut session = ScoreSession::default();
    session.start_game(&["Ada"], &mut rng);
    let id = session.state().players[0].id.clone();
    session.set_score(&id, Category::Fours, 12);
    assert!(session.can_undo());

    session.start_game(&["Bo", "Cy"], &mut rng);
    assert!(!session.can_undo());
    assert!(session.undo().is_none());
    assert_eq!(session.state().players.len(), 2);
}

#[test]
fn start_game_cancels_committed_undo() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let mut session = ScoreSession::default();
    session.start_game(&["Ada"], &mut rng);
    let id = session.state().players[0].id.clone();
    session.set_score(&id, Category::Sixes, 24);
    assert!(session.undo().is_some());
    let t0 = Instant::now();
    assert!(session.commit_pending_restore(t0));

    session.start_game(&["Bo", "Cy"], &mut rng);
    let fresh = session.state().clone();
    assert!(!session.can_undo());
    assert!(session.pending_highlight().is_none());

    assert!(!session.poll(t0 + Duration::from_secs(1)));
    assert_eq!(session.state(), &fresh);
    assert_eq!(session.state().players.len(), 2);
    assert!(session.state().sheet(&id).is_none());
}
