//! Roster construction and opaque player ids.
//! Id format: `<random base-36><millisecond timestamp base-36>`, e.g. `k3j9x0a1lzq8r0m4`.

use chrono::Utc;
use rand::Rng;

use crate::constants::DEFAULT_PLAYER_NAME_PREFIX;
use crate::state::{Player, PlayerId};

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_ID_DIGITS: usize = 10;

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_component<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..RANDOM_ID_DIGITS)
        .map(|_| char::from(BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())]))
        .collect()
}

/// Generate a collision-resistant-enough player id. Collisions are not
/// defended against.
#[must_use]
pub fn generate_player_id<R: Rng + ?Sized>(rng: &mut R) -> PlayerId {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    PlayerId::new(format!("{}{}", random_component(rng), to_base36(millis)))
}

/// Display name for the player at `index`, falling back to `Player N` when
/// the entered name is blank.
#[must_use]
pub fn display_name(entered: &str, index: usize) -> String {
    let trimmed = entered.trim();
    if trimmed.is_empty() {
        format!("{DEFAULT_PLAYER_NAME_PREFIX} {}", index + 1)
    } else {
        trimmed.to_string()
    }
}

/// Build a roster from setup-screen names, one fresh id per player.
#[must_use]
pub fn roster_from_names<R: Rng + ?Sized>(names: &[&str], rng: &mut R) -> Vec<Player> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Player {
            id: generate_player_id(rng),
            name: display_name(name, index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_295), "zz");
    }

    #[test]
    fn blank_names_fall_back_to_seat_number() {
        assert_eq!(display_name("  ", 2), "Player 3");
        assert_eq!(display_name(" Ada ", 0), "Ada");
    }

    #[test]
    fn roster_ids_are_distinct_and_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(0xF1FE);
        let roster = roster_from_names(&["Ada", "", "Cy", "", "Eve", "Flo"], &mut rng);
        assert_eq!(roster.len(), 6);
        assert_eq!(roster[1].name, "Player 2");
        let ids: HashSet<_> = roster.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), 6);
        for player in &roster {
            assert!(player.id.as_str().len() > RANDOM_ID_DIGITS);
            assert!(
                player
                    .id
                    .as_str()
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
            );
        }
    }
}
