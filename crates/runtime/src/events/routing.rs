//! Maps core events onto bus topics.

use maze_core::GameEvent;

use super::Topic;

/// Topic a core event is published on.
pub fn topic_of(event: &GameEvent) -> Topic {
    match event {
        GameEvent::MoveExecuted { .. }
        | GameEvent::CoinCollected { .. }
        | GameEvent::DeadEndMarked { .. }
        | GameEvent::RemainingChanged { .. }
        | GameEvent::MazeRegenerated { .. } => Topic::Movement,

        GameEvent::CoinsChanged { .. } => Topic::Economy,

        GameEvent::QuestionIssued { .. }
        | GameEvent::AnswerEvaluated { .. }
        | GameEvent::OverrideOffered { .. }
        | GameEvent::DebtReliefOffered { .. }
        | GameEvent::Warning(_) => Topic::Prompt,

        GameEvent::Cue(_) => Topic::Audio,

        GameEvent::TimeoutArmed { .. }
        | GameEvent::TimeoutCancelled { .. }
        | GameEvent::ConsistencyViolation { .. }
        | GameEvent::GameCompleted(_)
        | GameEvent::PersistenceFailed(_) => Topic::Session,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{CoinReason, SoundCue, Warning};

    #[test]
    fn collaborators_get_their_concerns() {
        assert_eq!(topic_of(&GameEvent::Cue(SoundCue::CoinCollect)), Topic::Audio);
        assert_eq!(
            topic_of(&GameEvent::CoinsChanged {
                delta: 10,
                balance: 10,
                reason: CoinReason::CorrectAnswer,
            }),
            Topic::Economy
        );
        assert_eq!(
            topic_of(&GameEvent::Warning(Warning::FalseExit)),
            Topic::Prompt
        );
        assert_eq!(
            topic_of(&GameEvent::RemainingChanged { remaining: 3 }),
            Topic::Movement
        );
    }
}
