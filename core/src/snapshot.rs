use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of a game after an action, for status lines and diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub selection_size: usize,
    /// Points the current selection would score if cleared
    pub potential_score: u32,
    pub score: u32,
    pub can_move: bool,
    pub has_won: bool,
}

impl Snapshot {
    pub fn from_game(game: &Game) -> Self {
        let selection_size = game.session().selection().len();
        Self {
            selection_size,
            potential_score: if selection_size > 1 {
                score_for(selection_size)
            } else {
                0
            },
            score: game.session().score(),
            can_move: game.can_move(),
            has_won: game.has_won(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_game_snapshot() {
        let mut game = Game::new(GameConfig::new(5, 3));
        game.new_game(Seed::new(7), &mut Headless).unwrap();

        let snapshot = game.snapshot();

        assert_eq!(snapshot.selection_size, 0);
        assert_eq!(snapshot.potential_score, 0);
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.has_won);
        assert_eq!(snapshot.can_move, has_adjacent_pair(game.grid()));
    }

    #[test]
    fn empty_board_counts_as_won() {
        let game = Game::new(GameConfig::default());

        let snapshot = game.snapshot();

        assert!(snapshot.has_won);
        assert!(!snapshot.can_move);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let snapshot = Snapshot {
            can_move: true,
            ..Snapshot::default()
        };

        assert_eq!(
            serde_json::to_string(&snapshot).unwrap(),
            r#"{"selectionSize":0,"potentialScore":0,"score":0,"canMove":true,"hasWon":false}"#
        );
    }
}
