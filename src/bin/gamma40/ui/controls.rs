//! Keyboard control surface
//!
//! Keys map to actions; actions flip the shared atomics and hand back a
//! feedback line for the status row. Nothing here waits on the audio thread.

use crossterm::event::KeyCode;
use tracing::info;

use gamma40::{PlaybackState, ToneMode};

/// Commands the user can issue from the keyboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    /// Toggle play/pause
    TogglePlayback,
    /// Toggle the continuous 1kHz test tone
    ToggleTestTone,
    /// Leave the program
    Quit,
}

impl ControlAction {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Char(' ') => Some(Self::TogglePlayback),
            KeyCode::Char('t') | KeyCode::Char('T') => Some(Self::ToggleTestTone),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    /// Apply to the shared state and report what changed.
    pub fn apply(self, state: &PlaybackState) -> ControlOutcome {
        let feedback = match self {
            Self::TogglePlayback => {
                if state.toggle_playing() {
                    "▶ Resumed"
                } else {
                    "⏸ Paused"
                }
            }
            Self::ToggleTestTone => match state.toggle_continuous() {
                ToneMode::Continuous => "Continuous 1kHz tone (test mode)",
                ToneMode::Pulsed => "40Hz pulsed mode (normal)",
            },
            Self::Quit => return ControlOutcome::Quit,
        };
        info!("{feedback}");
        ControlOutcome::Feedback(feedback)
    }
}

/// Result of applying a [`ControlAction`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlOutcome {
    /// State changed; the line to show the user
    Feedback(&'static str),
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bindings() {
        assert_eq!(
            ControlAction::from_key(KeyCode::Char(' ')),
            Some(ControlAction::TogglePlayback)
        );
        assert_eq!(
            ControlAction::from_key(KeyCode::Char('T')),
            Some(ControlAction::ToggleTestTone)
        );
        assert_eq!(ControlAction::from_key(KeyCode::Esc), Some(ControlAction::Quit));
        assert_eq!(ControlAction::from_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn actions_flip_shared_flags() {
        let state = PlaybackState::default();

        assert_eq!(
            ControlAction::TogglePlayback.apply(&state),
            ControlOutcome::Feedback("⏸ Paused")
        );
        assert!(!state.is_playing());
        assert_eq!(
            ControlAction::TogglePlayback.apply(&state),
            ControlOutcome::Feedback("▶ Resumed")
        );

        assert_eq!(
            ControlAction::ToggleTestTone.apply(&state),
            ControlOutcome::Feedback("Continuous 1kHz tone (test mode)")
        );
        assert_eq!(state.tone_mode(), ToneMode::Continuous);
        assert_eq!(
            ControlAction::ToggleTestTone.apply(&state),
            ControlOutcome::Feedback("40Hz pulsed mode (normal)")
        );

        assert_eq!(ControlAction::Quit.apply(&state), ControlOutcome::Quit);
    }
}
