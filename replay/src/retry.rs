use revanche_core::{Difficulty, Game, PlayHistory, Pos, Seed, UserAction};

/// Restarts a finished game's mine layout for live play.
///
/// The recorded seed is forced into generation with its retry ordinal
/// bumped (the layout depends only on the seed base, so it is unchanged),
/// the original opening reveal is applied programmatically, and the
/// resulting game is handed back for the player to continue.
pub fn retry(seed: &Seed, difficulty: Difficulty, first_step: Option<Pos>) -> Option<Game> {
    let Some(position) = first_step else {
        log::warn!("no opening move recorded, retry not started");
        return None;
    };

    let mut game = Game::new_seeded(difficulty, seed.next_iteration());
    if game.board().size() != game.config().size() {
        log::warn!("board does not match the configured size, retry not started");
        return None;
    }

    let score = game.apply(UserAction::reveal(position));
    log::debug!(
        "retried seed {} (iteration {}), opening {:?} scored {}",
        seed,
        seed.iteration() + 1,
        position,
        score
    );
    Some(game)
}

/// Retry straight from a history entry.
pub fn retry_history(entry: &PlayHistory) -> Option<Game> {
    retry(&entry.seed, entry.difficulty, entry.first_step())
}

#[cfg(test)]
mod tests {
    use super::*;
    use revanche_core::{GamePhase, GameResult};

    fn lost_game(seed: &str) -> (Game, PlayHistory) {
        let mut game = Game::new_seeded(Difficulty::Easy, Seed::new(seed));
        game.apply(UserAction::reveal(Pos::new(4, 4)));
        let (rows, cols) = game.board().size();
        let mine = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Pos::new(r, c)))
            .find(|&pos| game.board()[pos].is_mine)
            .expect("board has mines");
        game.apply(UserAction::reveal(mine));
        assert_eq!(game.result(), Some(GameResult::Loss));
        let history = game.finish().expect("finished game");
        (game, history)
    }

    fn mine_mask(game: &Game) -> Vec<bool> {
        let (rows, cols) = game.board().size();
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| game.board()[Pos::new(r, c)].is_mine))
            .collect()
    }

    #[test]
    fn retry_regenerates_the_identical_layout_and_opens_the_first_step() {
        let (original, history) = lost_game("abc");

        let retried = retry_history(&history).expect("retry starts");

        assert_eq!(mine_mask(&retried), mine_mask(&original));
        assert!(retried.board()[Pos::new(4, 4)].is_revealed);
        // control is back with the player
        assert_eq!(retried.phase(), GamePhase::Gaming);
        assert_eq!(retried.actions().len(), 1);
    }

    #[test]
    fn retry_bumps_the_seed_iteration() {
        let (_, history) = lost_game("abc");

        let retried = retry_history(&history).expect("retry starts");
        assert_eq!(retried.seed(), Some(&Seed::new("abc-2")));

        let mut second = retried;
        let (rows, cols) = second.board().size();
        let mine = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Pos::new(r, c)))
            .find(|&pos| second.board()[pos].is_mine)
            .unwrap();
        second.apply(UserAction::reveal(mine));
        let second_history = second.finish().unwrap();
        assert_eq!(second_history.retry_iteration(), 2);

        let third = retry_history(&second_history).expect("retry starts");
        assert_eq!(third.seed(), Some(&Seed::new("abc-3")));
        assert_eq!(mine_mask(&third), mine_mask(&second));
    }

    #[test]
    fn retry_without_a_first_step_is_a_noop() {
        let (_, mut history) = lost_game("abc");
        history.actions.clear();

        assert!(retry_history(&history).is_none());
    }
}
