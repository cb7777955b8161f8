use crate::*;

/// A notification published by a voting instance
///
/// Events are recorded in commit order in the instance's event log; downstream
/// notifiers drain them with `VotingInstance::take_events`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// An eligible identity published a blinded commitment
    VoterInitiatedRegistration { identity: Identity },

    /// The registration authority issued the credential signature
    RegistrationComplete { identity: Identity },

    /// The committed phase advanced
    NewPhase { phase: Phase },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::VoterInitiatedRegistration { identity } => {
                write!(f, "voter_initiated_registration({})", identity)
            }
            Event::RegistrationComplete { identity } => {
                write!(f, "registration_complete({})", identity)
            }
            Event::NewPhase { phase } => write!(f, "new_phase({})", phase),
        }
    }
}
