//! State machine trait for mode-like enums.
//!
//! Gives every finite state enum in the domain the same validated
//! transition API, so callers never assign a new state without checking
//! the transition table first.

use super::ValidationError;

/// Trait for enums whose values form a finite state machine.
///
/// Implementors only describe the edges; validated transitions come for free.
///
/// ```ignore
/// let next = ConversationMode::ModeSelection.transition_to(ConversationMode::Sentiment)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if an edge exists from self to target.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all targets reachable in one step from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs a transition, failing if the edge does not exist.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// A state with no outgoing edges.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Switch {
        Off,
        On,
        Broken,
    }

    impl StateMachine for Switch {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Switch::*;
            matches!((self, target), (Off, On) | (On, Off) | (On, Broken))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Switch::*;
            match self {
                Off => vec![On],
                On => vec![Off, Broken],
                Broken => vec![],
            }
        }
    }

    #[test]
    fn transition_to_follows_existing_edge() {
        assert_eq!(Switch::Off.transition_to(Switch::On), Ok(Switch::On));
    }

    #[test]
    fn transition_to_rejects_missing_edge() {
        let err = Switch::Off.transition_to(Switch::Broken).unwrap_err();
        assert_eq!(err.field(), "state_transition");
        assert!(err.to_string().contains("Off"));
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn terminal_state_has_no_edges() {
        assert!(Switch::Broken.is_terminal());
        assert!(!Switch::On.is_terminal());
    }

    #[test]
    fn valid_transitions_agree_with_can_transition_to() {
        for state in [Switch::Off, Switch::On, Switch::Broken] {
            for target in state.valid_transitions() {
                assert!(state.can_transition_to(&target));
            }
        }
    }
}
