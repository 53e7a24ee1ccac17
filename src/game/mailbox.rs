//! Serialized command mailbox
//!
//! The engine is single-threaded. To serve several independent clients it
//! runs as a tokio task that owns the [`GameState`] and drains a channel,
//! so commands apply one at a time in arrival order. Clients hold cloneable
//! [`EngineHandle`]s and get each result back on a oneshot.

use crate::core::PlayerId;
use crate::events::GameEvent;
use crate::game::{Command, GameSnapshot, GameState};
use crate::{MonopolyError, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Commands queued before senders wait
const MAILBOX_CAPACITY: usize = 64;

enum Request {
    Apply {
        issuer: PlayerId,
        command: Command,
        reply: oneshot::Sender<Result<Vec<GameEvent>>>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
}

/// Cloneable client side of the mailbox
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Request>,
}

impl EngineHandle {
    /// Queue a command and wait for its outcome
    pub async fn apply(&self, issuer: PlayerId, command: Command) -> Result<Vec<GameEvent>> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Request::Apply {
                issuer,
                command,
                reply,
            })
            .await
            .map_err(|_| MonopolyError::EngineStopped)?;
        response.await.map_err(|_| MonopolyError::EngineStopped)?
    }

    /// Snapshot taken after every command queued before this one
    pub async fn snapshot(&self) -> Result<GameSnapshot> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Request::Snapshot { reply })
            .await
            .map_err(|_| MonopolyError::EngineStopped)?;
        response.await.map_err(|_| MonopolyError::EngineStopped)
    }
}

/// Move `game` into a mailbox task
///
/// The task ends when every handle is dropped and hands the final state
/// back through its join handle.
pub fn spawn_engine(game: GameState) -> (EngineHandle, JoinHandle<GameState>) {
    let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);
    let task = tokio::spawn(run_mailbox(game, rx));
    (EngineHandle { tx }, task)
}

async fn run_mailbox(mut game: GameState, mut rx: mpsc::Receiver<Request>) -> GameState {
    while let Some(request) = rx.recv().await {
        match request {
            Request::Apply {
                issuer,
                command,
                reply,
            } => {
                let result = game.apply(issuer, command);
                // Client may have stopped waiting
                let _ = reply.send(result);
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(game.snapshot());
            }
        }
    }
    game
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, TurnPhase, VerbosityLevel};

    fn quiet_engine() -> (EngineHandle, JoinHandle<GameState>) {
        let mut game = GameState::new(GameConfig::with_player_count(2).with_seed(3)).unwrap();
        game.logger.set_verbosity(VerbosityLevel::Silent);
        spawn_engine(game)
    }

    #[tokio::test]
    async fn test_apply_through_mailbox() {
        let (engine, task) = quiet_engine();
        let events = engine.apply(PlayerId::new(0), Command::RollDice).await.unwrap();
        assert!(matches!(events[0], GameEvent::DiceRolled { .. }));

        let err = engine.apply(PlayerId::new(1), Command::EndTurn).await;
        assert!(err.is_err());

        drop(engine);
        let game = task.await.unwrap();
        assert_ne!(game.phase, TurnPhase::AwaitingRoll);
    }

    #[tokio::test]
    async fn test_snapshot_through_mailbox() {
        let (engine, _task) = quiet_engine();
        let snapshot = engine.snapshot().await.unwrap();
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.current_player, PlayerId::new(0));
    }
}
