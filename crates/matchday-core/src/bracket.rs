//! Bracket view helpers

use std::collections::BTreeMap;

use matchday_api::Game;

/// Group games by round, rounds ascending. Order within a round follows the
/// server's; bracket generation itself is entirely server-side.
pub fn rounds(games: Vec<Game>) -> Vec<(i64, Vec<Game>)> {
    let mut by_round: BTreeMap<i64, Vec<Game>> = BTreeMap::new();
    for game in games {
        by_round.entry(game.round).or_default().push(game);
    }
    by_round.into_iter().collect()
}
