use crate::*;
use content_inspector::ContentType;
use log::{debug, info};
use uuid::Uuid;

/// One voting event's registration and credential-issuance state machine
///
/// The instance exclusively owns its voter records, pending counter and event
/// log; the only mutation points are `register`, `complete_registration` and
/// `tick`. Each state-mutating call resynchronizes the committed phase against
/// the caller-supplied time before checking its own preconditions, and either
/// fully commits or fails leaving the ledger untouched.
pub struct VotingInstance {
    id: Uuid,
    parameters_hash: ParametersHash,
    registration_authority: Identity,
    gatekeeper: Box<dyn EligibilityGatekeeper>,
    clock: PhaseClock,
    ledger: RegistrationLedger,
    events: Vec<Event>,
}

impl std::fmt::Debug for VotingInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VotingInstance")
            .field("id", &self.id)
            .field("parameters_hash", &self.parameters_hash)
            .field("registration_authority", &self.registration_authority)
            .field("clock", &self.clock)
            .field("ledger", &self.ledger)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl VotingInstance {
    /// Create a new voting instance
    ///
    /// Fails with `InvalidSchedule` unless
    /// `now < registration_deadline < voting_deadline`. On success the phase is
    /// `Registration` with no records and an empty event log.
    pub fn new(
        now: Timestamp,
        registration_deadline: Timestamp,
        voting_deadline: Timestamp,
        parameters_hash: ParametersHash,
        gatekeeper: Box<dyn EligibilityGatekeeper>,
        registration_authority: Identity,
    ) -> Result<Self, ValidationError> {
        if registration_deadline <= now || voting_deadline <= registration_deadline {
            return Err(ValidationError::InvalidSchedule);
        }

        let id = Uuid::new_v4();
        info!(
            "blindballot: instance {} created, registration closes at {}, voting closes at {}",
            id, registration_deadline, voting_deadline
        );

        Ok(VotingInstance {
            id,
            parameters_hash,
            registration_authority,
            gatekeeper,
            clock: PhaseClock::new(registration_deadline, voting_deadline),
            ledger: RegistrationLedger::default(),
            events: Vec::new(),
        })
    }

    /// Publish a blinded commitment for an identity
    ///
    /// Preconditions, first failure wins: the committed phase (after an
    /// implicit tick) must be `Registration`, the gatekeeper must authorise the
    /// identity, and the identity must not already hold a commitment.
    pub fn register(
        &mut self,
        now: Timestamp,
        identity: Identity,
        commitment: CommitmentHash,
    ) -> Result<(), ValidationError> {
        self.tick(now);

        let phase = self.clock.committed();
        if phase != Phase::Registration {
            return Err(ValidationError::PhaseViolation(phase));
        }

        // The gatekeeper sees only the identity, never the ledger, so it
        // cannot re-enter this transition. The write happens after it returns.
        if !self.gatekeeper.is_authorised(&identity) {
            return Err(ValidationError::NotEligible(identity));
        }

        self.ledger.commit(identity, commitment)?;

        debug!(
            "blindballot: instance {} registered {} ({} pending)",
            self.id,
            identity,
            self.ledger.pending_registrations()
        );
        self.events.push(Event::VoterInitiatedRegistration { identity });
        Ok(())
    }

    /// Publish the blind signature over an identity's commitment
    ///
    /// Only the registration authority may call this, but it is valid in every
    /// phase: the authority must be able to drain commitments submitted just
    /// before the registration deadline.
    pub fn complete_registration(
        &mut self,
        now: Timestamp,
        caller: Identity,
        identity: Identity,
        signature: SignatureHash,
    ) -> Result<(), ValidationError> {
        self.tick(now);

        if caller != self.registration_authority {
            return Err(ValidationError::Unauthorised(caller));
        }

        self.ledger.sign(identity, signature)?;

        debug!(
            "blindballot: instance {} issued credential signature for {} ({} pending)",
            self.id,
            identity,
            self.ledger.pending_registrations()
        );
        self.events.push(Event::RegistrationComplete { identity });
        Ok(())
    }

    /// Resynchronize the committed phase against `now`
    ///
    /// Anyone may trigger this; state-mutating calls do it implicitly. Emits a
    /// `NewPhase` event only when the committed phase actually changes.
    pub fn tick(&mut self, now: Timestamp) -> Option<Phase> {
        let phase = self.clock.tick(now)?;

        info!("blindballot: instance {} entered {} phase", self.id, phase);
        self.events.push(Event::NewPhase { phase });
        Some(phase)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The committed phase, as of the last tick
    pub fn current_phase(&self) -> Phase {
        self.clock.committed()
    }

    pub fn registration_deadline(&self) -> Timestamp {
        self.clock.registration_deadline()
    }

    pub fn voting_deadline(&self) -> Timestamp {
        self.clock.voting_deadline()
    }

    pub fn parameters_hash(&self) -> &ParametersHash {
        &self.parameters_hash
    }

    pub fn registration_authority(&self) -> Identity {
        self.registration_authority
    }

    pub fn gatekeeper(&self) -> &dyn EligibilityGatekeeper {
        &*self.gatekeeper
    }

    pub fn pending_registrations(&self) -> usize {
        self.ledger.pending_registrations()
    }

    /// The record for an identity, if it ever registered
    pub fn voter_record(&self, identity: &Identity) -> Option<&VoterRecord> {
        self.ledger.record(identity)
    }

    pub fn ledger(&self) -> &RegistrationLedger {
        &self.ledger
    }

    /// All events published so far, in commit order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain the event log for delivery to downstream notifiers
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::replace(&mut self.events, Vec::new())
    }

    /// An auditable serde view of the full public state
    pub fn snapshot(&self) -> InstanceSnapshot {
        InstanceSnapshot {
            id: self.id,
            registration_deadline: self.clock.registration_deadline(),
            voting_deadline: self.clock.voting_deadline(),
            parameters_hash: self.parameters_hash.clone(),
            registration_authority: self.registration_authority,
            current_phase: self.clock.committed(),
            ledger: self.ledger.clone(),
            events: self.events.clone(),
        }
    }
}

/// A point-in-time export of one instance's public state
///
/// Everything an external auditor needs to replay the register: the schedule,
/// the committed phase, every voter record in commit order and the event log.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InstanceSnapshot {
    pub id: Uuid,
    pub registration_deadline: Timestamp,
    pub voting_deadline: Timestamp,
    pub parameters_hash: ParametersHash,
    pub registration_authority: Identity,
    pub current_phase: Phase,
    pub ledger: RegistrationLedger,
    pub events: Vec<Event>,
}

impl InstanceSnapshot {
    /// Pack into bytes
    pub fn as_bytes(&self) -> Vec<u8> {
        serde_cbor::to_vec(self).expect("blindballot: Unexpected error packing snapshot")
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("blindballot: Unexpected error packing snapshot")
    }

    /// Unpack from either JSON or CBOR bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        match content_inspector::inspect(bytes) {
            ContentType::UTF_8 => Ok(serde_json::from_slice(bytes)?),
            ContentType::BINARY => Ok(serde_cbor::from_slice(bytes)?),
            _ => Err(Error::DeserializationUnknownFormat),
        }
    }
}
