//! Session state machine
//!
//! Two states, one transition. Dormant is terminal: nothing but an
//! external reset brings the sign back, which is what bounds total
//! device-on time.

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Fetching, composing, scrolling
    Active,
    /// Display blanked, output off, no further activity
    Dormant,
}

/// Events that can trigger session transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// The total active-session cap elapsed
    CapReached,
}

impl SessionState {
    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Active, CapReached) => Dormant,

            // Dormant is terminal
            _ => self,
        }
    }

    /// Check if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Dormant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_ends_the_session() {
        let next = SessionState::Active.transition(SessionEvent::CapReached);
        assert_eq!(next, SessionState::Dormant);
        assert!(next.is_terminal());
    }

    #[test]
    fn test_dormant_is_terminal() {
        let next = SessionState::Dormant.transition(SessionEvent::CapReached);
        assert_eq!(next, SessionState::Dormant);
    }

    #[test]
    fn test_active_is_not_terminal() {
        assert!(!SessionState::Active.is_terminal());
    }
}
