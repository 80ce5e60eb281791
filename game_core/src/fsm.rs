//! Screen State Machine
//!
//! Start → Playing → GameOver → (restart) Playing, or GameOver → exit.
//! Every `(state, action)` pair is matched explicitly; anything not listed is
//! a rejected transition and leaves the state untouched.

use crate::components::Side;
use crate::input::Key;

/// Screen states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Title screen, waiting for any key
    Start,
    /// Match in progress
    Playing,
    /// Match decided
    GameOver { winner: Side },
}

impl MatchState {
    /// Winner if and only if the match is over
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchState::GameOver { winner } => Some(*winner),
            MatchState::Start | MatchState::Playing => None,
        }
    }
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Any key press not bound to something else
    AnyKey,
    /// A side reached the win threshold
    WinnerDecided(Side),
    /// R key
    Restart,
    /// Q key
    Quit,
}

impl GameAction {
    pub fn from_key(key: Key) -> Self {
        match key {
            Key::R => GameAction::Restart,
            Key::Q => GameAction::Quit,
            _ => GameAction::AnyKey,
        }
    }
}

/// Where a legal transition leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Enter(MatchState),
    Exit,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: MatchState,
    pub to_state: MatchState,
    pub action: GameAction,
    /// The transition asked the process to terminate
    pub exit: bool,
}

/// Game Finite State Machine
#[derive(Debug)]
pub struct GameFsm {
    state: MatchState,
    exit_requested: bool,
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            state: MatchState::Start,
            exit_requested: false,
        }
    }

    /// Get current state
    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: GameAction) -> bool {
        self.get_next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.state;

        match self.get_next_state(action) {
            Some(Next::Enter(next_state)) => {
                self.state = next_state;
                log::info!("{:?} -> {:?} on {:?}", from_state, next_state, action);
                TransitionResult {
                    success: true,
                    from_state,
                    to_state: next_state,
                    action,
                    exit: false,
                }
            }
            Some(Next::Exit) => {
                self.exit_requested = true;
                log::info!("Exit requested from {:?}", from_state);
                TransitionResult {
                    success: true,
                    from_state,
                    to_state: from_state,
                    action,
                    exit: true,
                }
            }
            None => {
                log::trace!("Ignored {:?} in {:?}", action, from_state);
                TransitionResult {
                    success: false,
                    from_state,
                    to_state: from_state,
                    action,
                    exit: false,
                }
            }
        }
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: GameAction) -> Option<Next> {
        match (self.state, action) {
            // From Start: any key press begins play
            (MatchState::Start, GameAction::AnyKey | GameAction::Restart | GameAction::Quit) => {
                Some(Next::Enter(MatchState::Playing))
            }
            (MatchState::Start, GameAction::WinnerDecided(_)) => None,

            // From Playing
            (MatchState::Playing, GameAction::WinnerDecided(winner)) => {
                Some(Next::Enter(MatchState::GameOver { winner }))
            }
            (MatchState::Playing, GameAction::AnyKey | GameAction::Restart | GameAction::Quit) => {
                None
            }

            // From GameOver
            (MatchState::GameOver { .. }, GameAction::Restart) => {
                Some(Next::Enter(MatchState::Playing))
            }
            (MatchState::GameOver { .. }, GameAction::Quit) => Some(Next::Exit),
            (MatchState::GameOver { .. }, GameAction::AnyKey | GameAction::WinnerDecided(_)) => {
                None
            }
        }
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        matches!(self.state, MatchState::Playing)
    }

    /// Check if in game over state
    pub fn is_game_over(&self) -> bool {
        matches!(self.state, MatchState::GameOver { .. })
    }
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_over(winner: Side) -> GameFsm {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::AnyKey);
        fsm.transition(GameAction::WinnerDecided(winner));
        fsm
    }

    #[test]
    fn test_initial_state() {
        let fsm = GameFsm::new();
        assert_eq!(fsm.state(), MatchState::Start);
        assert_eq!(fsm.state().winner(), None);
        assert!(!fsm.exit_requested());
    }

    #[test]
    fn test_any_key_starts_play() {
        for key in [Key::Space, Key::W, Key::R, Key::Q, Key::Other] {
            let mut fsm = GameFsm::new();
            let result = fsm.transition(GameAction::from_key(key));
            assert!(result.success, "{key:?} should start the game");
            assert_eq!(fsm.state(), MatchState::Playing);
            assert!(!fsm.exit_requested());
        }
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = GameFsm::new();
        let result = fsm.transition(GameAction::WinnerDecided(Side::Left));
        assert!(!result.success);
        assert_eq!(fsm.state(), MatchState::Start);
    }

    #[test]
    fn test_keys_ignored_while_playing() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::AnyKey);
        for action in [GameAction::AnyKey, GameAction::Restart, GameAction::Quit] {
            assert!(!fsm.can_transition(action));
            let result = fsm.transition(action);
            assert!(!result.success);
            assert_eq!(fsm.state(), MatchState::Playing);
        }
    }

    #[test]
    fn test_winner_decided_ends_match() {
        let fsm = game_over(Side::Left);
        assert_eq!(
            fsm.state(),
            MatchState::GameOver {
                winner: Side::Left
            }
        );
        assert_eq!(fsm.state().winner(), Some(Side::Left));
        assert!(fsm.is_game_over());
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut fsm = game_over(Side::Right);
        let result = fsm.transition(GameAction::Restart);
        assert!(result.success);
        assert_eq!(
            result.from_state,
            MatchState::GameOver {
                winner: Side::Right
            }
        );
        assert_eq!(result.to_state, MatchState::Playing);
        assert_eq!(fsm.state().winner(), None, "Winner cleared on restart");
    }

    #[test]
    fn test_quit_from_game_over_requests_exit() {
        let mut fsm = game_over(Side::Left);
        let result = fsm.transition(GameAction::Quit);
        assert!(result.success);
        assert!(result.exit);
        assert!(fsm.exit_requested());
    }

    #[test]
    fn test_any_key_ignored_in_game_over() {
        let mut fsm = game_over(Side::Left);
        let result = fsm.transition(GameAction::AnyKey);
        assert!(!result.success);
        assert!(fsm.is_game_over());
        assert!(!fsm.can_transition(GameAction::WinnerDecided(Side::Right)));
    }

    #[test]
    fn test_local_game_flow() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::AnyKey);
        assert!(fsm.is_playing());
        fsm.transition(GameAction::WinnerDecided(Side::Right));
        assert!(fsm.is_game_over());
        fsm.transition(GameAction::Restart);
        assert!(fsm.is_playing());
        fsm.transition(GameAction::WinnerDecided(Side::Left));
        fsm.transition(GameAction::Quit);
        assert!(fsm.exit_requested());
    }
}
