use fivekind_game::{
    Category, GameAction, GameConfig, GameState, GameSummary, PlayerId, ScoreSession, game_summary,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

/// Chance that a player who already holds five of a kind rolls it again on a turn.
const REPEAT_FIVE_OF_A_KIND_CHANCE: f64 = 0.05;

/// One score entry made during a simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub player_id: PlayerId,
    pub category: Category,
    pub value: u16,
    pub bonus_claimed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub turns: Vec<Turn>,
    pub bonus_events: u32,
    pub final_state: GameState,
    pub result: GameSummary,
}

/// Plays seeded games the way a table would: seats take turns, each picks a
/// random open box and a random legal value for it.
#[derive(Debug, Clone)]
pub struct GameSimulator {
    seats: usize,
    config: GameConfig,
}

impl GameSimulator {
    pub fn new(seats: usize, config: GameConfig) -> Self {
        Self { seats, config }
    }

    pub const fn seats(&self) -> usize {
        self.seats
    }

    pub fn names(&self) -> Vec<String> {
        (0..self.seats).map(|seat| format!("Seat {}", seat + 1)).collect()
    }

    pub fn new_session(&self, rng: &mut ChaCha20Rng) -> ScoreSession {
        let mut session = ScoreSession::new(self.config.clone());
        let names = self.names();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        session.start_game(&refs, rng);
        session
    }

    pub fn play(&self, seed: u64) -> SimulationSummary {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut session = self.new_session(&mut rng);
        let turns = play_out(&mut session, &mut rng);
        let bonus_events = turns.iter().filter(|t| t.bonus_claimed).count();
        let final_state = session.into_state();
        SimulationSummary {
            seed,
            bonus_events: u32::try_from(bonus_events).unwrap_or(u32::MAX),
            result: game_summary(&final_state),
            final_state,
            turns,
        }
    }
}

/// Random legal value for `category`.
pub fn random_value(category: Category, rng: &mut ChaCha20Rng) -> u16 {
    category.legal_values().choose(rng).copied().unwrap_or(0)
}

/// Take turns until every box is filled, returning the entries made.
pub fn play_out(session: &mut ScoreSession, rng: &mut ChaCha20Rng) -> Vec<Turn> {
    let ids: Vec<PlayerId> = session.state().players.iter().map(|p| p.id.clone()).collect();
    let mut turns = Vec::new();

    while !session.state().is_over() {
        let before = turns.len();
        for id in &ids {
            let Some(sheet) = session.state().sheet(id) else {
                continue;
            };
            let bonus_claimed =
                sheet.qualifies_for_bonus() && rng.gen_bool(REPEAT_FIVE_OF_A_KIND_CHANCE);
            let open: Vec<Category> = sheet.categories.open_categories().collect();
            let placeable: Vec<Category> = if bonus_claimed {
                open.iter()
                    .copied()
                    .filter(|c| c.accepts_bonus_placement())
                    .collect()
            } else {
                open.clone()
            };
            let choices = if placeable.is_empty() { &open } else { &placeable };
            let Some(&category) = choices.choose(rng) else {
                continue;
            };
            let value = random_value(category, rng);
            if bonus_claimed {
                session.add_bonus_event(id);
            }
            session.set_score(id, category, value);
            turns.push(Turn {
                player_id: id.clone(),
                category,
                value,
                bonus_claimed,
            });
        }
        if turns.len() == before {
            break;
        }
    }

    turns
}

/// Convenience for scenarios that only need the state after a scripted action list.
pub fn replay(actions: &[GameAction]) -> GameState {
    actions
        .iter()
        .fold(GameState::initial(), |state, action| {
            fivekind_game::reduce(&state, action)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_games_fill_every_box() {
        let sim = GameSimulator::new(3, GameConfig::default());
        let summary = sim.play(1337);
        assert!(summary.final_state.is_over());
        assert_eq!(summary.turns.len(), 3 * 13);
        assert_eq!(summary.result.standings.len(), 3);
    }

    #[test]
    fn same_seed_same_game() {
        let sim = GameSimulator::new(2, GameConfig::default());
        let a = sim.play(42);
        let b = sim.play(42);
        let cards = |s: &SimulationSummary| {
            s.final_state
                .scores
                .iter()
                .map(|sheet| (sheet.categories, sheet.bonus_count))
                .collect::<Vec<_>>()
        };
        assert_eq!(cards(&a), cards(&b));
        assert_eq!(a.bonus_events, b.bonus_events);
    }
}
