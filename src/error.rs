use crate::*;

use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("blindballot: invalid identity - invalid hexadecimal")]
    IdentityBadHex,

    #[error("blindballot: invalid identity - wrong length")]
    IdentityBadLen,

    #[error("blindballot: invalid hash - invalid hexadecimal")]
    HashBadHex,

    #[error("blindballot: CBOR error deserializing snapshot: {0}")]
    CBORDeserialization(#[from] serde_cbor::Error),

    #[error("blindballot: JSON error deserializing snapshot: {0}")]
    JSONDeserialization(#[from] serde_json::Error),

    #[error("blindballot: error deserializing snapshot: unknown format")]
    DeserializationUnknownFormat,

    #[error("blindballot: validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Operation rejection errors
///
/// Every rejection is synchronous and leaves the ledger exactly as it was
/// before the call; nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("blindballot validation: registration deadline must be in the future and precede the voting deadline")]
    InvalidSchedule,

    #[error("blindballot validation: operation not permitted in {0} phase")]
    PhaseViolation(Phase),

    #[error("blindballot validation: identity {0} is not eligible to register")]
    NotEligible(Identity),

    #[error("blindballot validation: identity {0} is already registered")]
    AlreadyRegistered(Identity),

    #[error("blindballot validation: identity {0} has no registration on record")]
    NotRegistered(Identity),

    #[error("blindballot validation: identity {0} already holds an issued credential signature")]
    AlreadySigned(Identity),

    #[error("blindballot validation: caller {0} is not the registration authority")]
    Unauthorised(Identity),
}
