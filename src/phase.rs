use num_enum::TryFromPrimitive;

/// A point in time, supplied by the caller
///
/// The ledger never reads a clock of its own. Every operation that depends on
/// time takes a `now` from outside and compares it against the two deadlines.
pub type Timestamp = u64;

/// The lifecycle stage of one voting instance
///
/// Phases are strictly ordered and only ever advance.
#[derive(
    Serialize,
    Deserialize,
    TryFromPrimitive,
    Copy,
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    Registration = 1,
    Voting = 2,
    Complete = 3,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Phase::Registration => "registration",
            Phase::Voting => "voting",
            Phase::Complete => "complete",
        };
        write!(f, "{}", name)
    }
}

/// Derive the phase for a given time and schedule
///
/// Pure and total: every `now` maps to exactly one phase.
pub fn derive_phase(
    now: Timestamp,
    registration_deadline: Timestamp,
    voting_deadline: Timestamp,
) -> Phase {
    if now < registration_deadline {
        Phase::Registration
    } else if now < voting_deadline {
        Phase::Voting
    } else {
        Phase::Complete
    }
}

/// The committed-phase cell for one voting instance
///
/// The committed phase is what readers observe between ticks. `tick` re-derives
/// the phase from the supplied time and commits it directly, so a stale clock
/// can jump from `Registration` straight to `Complete` without ever committing
/// `Voting`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PhaseClock {
    registration_deadline: Timestamp,
    voting_deadline: Timestamp,
    committed: Phase,
}

impl PhaseClock {
    pub fn new(registration_deadline: Timestamp, voting_deadline: Timestamp) -> Self {
        PhaseClock {
            registration_deadline,
            voting_deadline,
            committed: Phase::Registration,
        }
    }

    pub fn committed(&self) -> Phase {
        self.committed
    }

    pub fn registration_deadline(&self) -> Timestamp {
        self.registration_deadline
    }

    pub fn voting_deadline(&self) -> Timestamp {
        self.voting_deadline
    }

    /// Resynchronize the committed phase against `now`
    ///
    /// Returns the newly committed phase, or `None` if the committed phase is
    /// still current. Idempotent: repeated ticks with non-decreasing `now`
    /// report each phase value at most once. The committed phase never moves
    /// backward, even if `now` does.
    pub fn tick(&mut self, now: Timestamp) -> Option<Phase> {
        let derived = derive_phase(now, self.registration_deadline, self.voting_deadline);

        if derived <= self.committed {
            return None;
        }

        self.committed = derived;
        Some(derived)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn phase_ordering() {
        assert!(Phase::Registration < Phase::Voting);
        assert!(Phase::Voting < Phase::Complete);

        assert_eq!(Phase::try_from(1).unwrap(), Phase::Registration);
        assert_eq!(Phase::try_from(2).unwrap(), Phase::Voting);
        assert_eq!(Phase::try_from(3).unwrap(), Phase::Complete);
        assert!(Phase::try_from(4).is_err());
    }

    #[test]
    fn derive_phase_is_total() {
        assert_eq!(derive_phase(0, 1000, 2000), Phase::Registration);
        assert_eq!(derive_phase(999, 1000, 2000), Phase::Registration);
        assert_eq!(derive_phase(1000, 1000, 2000), Phase::Voting);
        assert_eq!(derive_phase(1999, 1000, 2000), Phase::Voting);
        assert_eq!(derive_phase(2000, 1000, 2000), Phase::Complete);
        assert_eq!(derive_phase(u64::MAX, 1000, 2000), Phase::Complete);
    }

    #[test]
    fn tick_commits_each_phase_once() {
        let mut clock = PhaseClock::new(1000, 2000);
        assert_eq!(clock.committed(), Phase::Registration);

        // Before the registration deadline nothing changes
        assert_eq!(clock.tick(0), None);
        assert_eq!(clock.tick(999), None);
        assert_eq!(clock.committed(), Phase::Registration);

        // First tick past the deadline commits voting, exactly once
        assert_eq!(clock.tick(1000), Some(Phase::Voting));
        assert_eq!(clock.tick(1500), None);
        assert_eq!(clock.committed(), Phase::Voting);

        assert_eq!(clock.tick(2000), Some(Phase::Complete));
        assert_eq!(clock.tick(u64::MAX), None);
        assert_eq!(clock.committed(), Phase::Complete);
    }

    #[test]
    fn tick_skips_voting_when_both_deadlines_passed() {
        let mut clock = PhaseClock::new(1000, 2000);

        assert_eq!(clock.tick(2100), Some(Phase::Complete));
        assert_eq!(clock.committed(), Phase::Complete);
    }

    #[test]
    fn committed_phase_never_moves_backward() {
        let mut clock = PhaseClock::new(1000, 2000);

        assert_eq!(clock.tick(1500), Some(Phase::Voting));

        // A clock running behind must not roll the phase back
        assert_eq!(clock.tick(500), None);
        assert_eq!(clock.committed(), Phase::Voting);
    }
}
