use crate::*;
use indexmap::IndexMap;

/// Per-identity registration record
///
/// Created lazily on first `register`. Each hash is set at most once and never
/// overwritten; the signature can only be set after the commitment. A record
/// with both set is immutable.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct VoterRecord {
    pub blinded_commitment_hash: Option<CommitmentHash>,
    pub credential_signature_hash: Option<SignatureHash>,
}

impl VoterRecord {
    /// A pending record has a commitment but no issued signature yet
    pub fn is_pending(&self) -> bool {
        self.blinded_commitment_hash.is_some() && self.credential_signature_hash.is_none()
    }

    pub fn is_signed(&self) -> bool {
        self.credential_signature_hash.is_some()
    }
}

/// The per-identity record store of one voting instance
///
/// Records iterate in commit order. The pending counter always equals the
/// number of records with a commitment and no signature; it is adjusted only
/// inside `commit` and `sign`, so it can never go negative.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct RegistrationLedger {
    records: IndexMap<Identity, VoterRecord>,
    pending: usize,
}

impl RegistrationLedger {
    /// Get the record for an identity, if one exists
    pub fn record(&self, identity: &Identity) -> Option<&VoterRecord> {
        self.records.get(identity)
    }

    /// Number of identities holding a commitment but no signature
    pub fn pending_registrations(&self) -> usize {
        self.pending
    }

    /// Number of records in the ledger
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in commit order
    pub fn iter(&self) -> impl Iterator<Item = (&Identity, &VoterRecord)> {
        self.records.iter()
    }

    /// File a blinded commitment for an identity
    ///
    /// Fails with `AlreadyRegistered` if the identity already holds a
    /// commitment, whatever its value.
    pub fn commit(
        &mut self,
        identity: Identity,
        commitment: CommitmentHash,
    ) -> Result<(), ValidationError> {
        let record = self
            .records
            .entry(identity)
            .or_insert_with(VoterRecord::default);
        if record.blinded_commitment_hash.is_some() {
            return Err(ValidationError::AlreadyRegistered(identity));
        }

        record.blinded_commitment_hash = Some(commitment);
        self.pending += 1;
        Ok(())
    }

    /// File the credential signature for a registered identity
    pub fn sign(
        &mut self,
        identity: Identity,
        signature: SignatureHash,
    ) -> Result<(), ValidationError> {
        let record = self
            .records
            .get_mut(&identity)
            .ok_or(ValidationError::NotRegistered(identity))?;

        if record.credential_signature_hash.is_some() {
            return Err(ValidationError::AlreadySigned(identity));
        }

        record.credential_signature_hash = Some(signature);
        self.pending -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn commit_then_sign() {
        let mut ledger = RegistrationLedger::default();
        let identity = Identity::random();

        assert!(ledger.record(&identity).is_none());
        assert!(ledger.is_empty());

        ledger
            .commit(identity, CommitmentHash::from("H1"))
            .unwrap();
        let record = ledger.record(&identity).unwrap();
        assert_eq!(
            record.blinded_commitment_hash,
            Some(CommitmentHash::from("H1"))
        );
        assert_eq!(record.credential_signature_hash, None);
        assert!(record.is_pending());
        assert_eq!(ledger.pending_registrations(), 1);
        assert_eq!(ledger.len(), 1);

        ledger.sign(identity, SignatureHash::from("S1")).unwrap();
        let record = ledger.record(&identity).unwrap();
        assert_eq!(
            record.blinded_commitment_hash,
            Some(CommitmentHash::from("H1"))
        );
        assert_eq!(
            record.credential_signature_hash,
            Some(SignatureHash::from("S1"))
        );
        assert!(record.is_signed());
        assert!(!record.is_pending());
        assert_eq!(ledger.pending_registrations(), 0);
    }

    #[test]
    fn commitment_is_set_at_most_once() {
        let mut ledger = RegistrationLedger::default();
        let identity = Identity::random();

        ledger
            .commit(identity, CommitmentHash::from("H1"))
            .unwrap();

        // A different commitment value makes no difference
        let err = ledger
            .commit(identity, CommitmentHash::from("H2"))
            .unwrap_err();
        assert_eq!(err, ValidationError::AlreadyRegistered(identity));

        // The original commitment is untouched and the counter did not move
        let record = ledger.record(&identity).unwrap();
        assert_eq!(
            record.blinded_commitment_hash,
            Some(CommitmentHash::from("H1"))
        );
        assert_eq!(ledger.pending_registrations(), 1);
    }

    #[test]
    fn signature_requires_commitment_and_is_set_at_most_once() {
        let mut ledger = RegistrationLedger::default();
        let registered = Identity::random();
        let unknown = Identity::random();

        ledger
            .commit(registered, CommitmentHash::from("H1"))
            .unwrap();

        let err = ledger
            .sign(unknown, SignatureHash::from("S1"))
            .unwrap_err();
        assert_eq!(err, ValidationError::NotRegistered(unknown));
        assert_eq!(ledger.pending_registrations(), 1);

        ledger.sign(registered, SignatureHash::from("S1")).unwrap();
        let err = ledger
            .sign(registered, SignatureHash::from("S2"))
            .unwrap_err();
        assert_eq!(err, ValidationError::AlreadySigned(registered));

        let record = ledger.record(&registered).unwrap();
        assert_eq!(
            record.credential_signature_hash,
            Some(SignatureHash::from("S1"))
        );
        assert_eq!(ledger.pending_registrations(), 0);
    }

    #[test]
    fn records_iterate_in_commit_order() {
        let mut ledger = RegistrationLedger::default();
        let identities: Vec<Identity> = (0..4).map(|_| Identity::random()).collect();

        for identity in &identities {
            ledger
                .commit(*identity, CommitmentHash::from("H"))
                .unwrap();
        }

        let order: Vec<Identity> = ledger.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, identities);
    }
}
