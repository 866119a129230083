use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Pos;

/// Per-action outcome: 1 success, 0 no-op, -1 fatal mine hit.
pub type Score = i8;

pub const SCORE_SUCCESS: Score = 1;
pub const SCORE_IGNORED: Score = 0;
pub const SCORE_MINE_HIT: Score = -1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Reveal,
    Flag,
    Chord,
}

/// One user input dispatched into the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub position: Pos,
}

impl UserAction {
    pub const fn reveal(position: Pos) -> Self {
        Self {
            kind: ActionKind::Reveal,
            position,
        }
    }

    pub const fn flag(position: Pos) -> Self {
        Self {
            kind: ActionKind::Flag,
            position,
        }
    }

    pub const fn chord(position: Pos) -> Self {
        Self {
            kind: ActionKind::Chord,
            position,
        }
    }
}

/// A recorded action with its outcome score and timing.
///
/// `time` holds an absolute millisecond timestamp while the game is live and
/// the delay to the next action once the log has been finalized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActionDetail {
    #[serde(flatten)]
    pub action: UserAction,
    pub score: Score,
    pub time: i64,
}

/// Append-only log of the actions taken during one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecorder {
    actions: Vec<UserActionDetail>,
    finalized: bool,
}

impl ActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, action: UserAction, score: Score, at: DateTime<Utc>) {
        if self.finalized {
            log::warn!("action log already finalized, dropping {:?}", action);
            return;
        }
        self.actions.push(UserActionDetail {
            action,
            score,
            time: at.timestamp_millis(),
        });
    }

    /// Rewrites each record's absolute timestamp into the delay until the
    /// next action; the final action gets 0. Turns the log into a
    /// wall-clock-independent replay script. Runs at most once.
    pub fn finalize(&mut self) {
        if self.finalized {
            log::warn!("action log finalized twice, keeping the first result");
            return;
        }
        for i in 0..self.actions.len().saturating_sub(1) {
            self.actions[i].time = self.actions[i + 1].time - self.actions[i].time;
        }
        if let Some(last) = self.actions.last_mut() {
            last.time = 0;
        }
        self.finalized = true;
    }

    pub fn clear(&mut self) {
        self.actions.clear();
        self.finalized = false;
    }

    pub fn actions(&self) -> &[UserActionDetail] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn finalize_rewrites_times_into_inter_action_delays() {
        let mut recorder = ActionRecorder::new();
        recorder.record(UserAction::reveal(Pos::new(0, 0)), SCORE_SUCCESS, at(1_000));
        recorder.record(UserAction::flag(Pos::new(1, 1)), SCORE_SUCCESS, at(1_250));
        recorder.record(UserAction::chord(Pos::new(0, 0)), SCORE_IGNORED, at(2_000));

        recorder.finalize();

        let times: Vec<i64> = recorder.actions().iter().map(|a| a.time).collect();
        assert_eq!(times, vec![250, 750, 0]);
        assert!(recorder.is_finalized());
    }

    #[test]
    fn finalize_runs_at_most_once() {
        let mut recorder = ActionRecorder::new();
        recorder.record(UserAction::reveal(Pos::new(0, 0)), SCORE_SUCCESS, at(100));
        recorder.record(UserAction::reveal(Pos::new(0, 1)), SCORE_SUCCESS, at(400));

        recorder.finalize();
        let snapshot = recorder.actions().to_vec();
        recorder.finalize();

        assert_eq!(recorder.actions(), snapshot.as_slice());
    }

    #[test]
    fn records_after_finalize_are_dropped() {
        let mut recorder = ActionRecorder::new();
        recorder.record(UserAction::reveal(Pos::new(0, 0)), SCORE_SUCCESS, at(100));
        recorder.finalize();

        recorder.record(UserAction::flag(Pos::new(1, 1)), SCORE_SUCCESS, at(200));

        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn clear_resets_the_log_for_a_new_game() {
        let mut recorder = ActionRecorder::new();
        recorder.record(UserAction::reveal(Pos::new(0, 0)), SCORE_SUCCESS, at(100));
        recorder.finalize();

        recorder.clear();

        assert!(recorder.is_empty());
        assert!(!recorder.is_finalized());
    }

    #[test]
    fn detail_serializes_with_the_flat_wire_shape() {
        let detail = UserActionDetail {
            action: UserAction::reveal(Pos::new(4, 4)),
            score: SCORE_SUCCESS,
            time: 250,
        };

        let value = serde_json::to_value(detail).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "reveal",
                "position": { "r": 4, "c": 4 },
                "score": 1,
                "time": 250,
            })
        );

        let back: UserActionDetail = serde_json::from_value(value).unwrap();
        assert_eq!(back, detail);
    }
}
