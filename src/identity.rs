use crate::Error;
use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryInto;
use std::str::FromStr;

/// An opaque participant identity
///
/// Identities are 16 bytes rendered as hexadecimal. The ledger never interprets
/// them beyond equality: linking an identity to a real person is the job of the
/// eligibility gatekeeper, and unlinking it from a credential is the whole point
/// of the blind-signature scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(pub [u8; 16]);

impl Identity {
    /// Generate a fresh random identity
    pub fn random() -> Self {
        let mut csprng = rand::rngs::OsRng {};
        Identity(csprng.gen())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<[u8; 16]> for Identity {
    fn from(bytes: [u8; 16]) -> Self {
        Identity(bytes)
    }
}

impl FromStr for Identity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| Error::IdentityBadHex)?;

        if bytes.len() != 16 {
            return Err(Error::IdentityBadLen);
        }

        // This unwrap is OK - we know the length is valid
        let bytes: [u8; 16] = bytes[..].try_into().unwrap();
        Ok(Identity(bytes))
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        std::str::FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for Identity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn identity_hex_round_trip() {
        let identity = Identity::random();

        let stringed = identity.to_string();
        let from_string = Identity::from_str(&stringed).unwrap();
        assert_eq!(identity, from_string);

        // Bad hex and bad lengths are rejected
        assert!(Identity::from_str("not-hexadecimal!").is_err());
        assert!(Identity::from_str("abcdef").is_err());
    }

    #[test]
    fn identity_serializes_as_string() {
        let identity = Identity::from([7; 16]);
        let json = serde_json::to_string(&identity).unwrap();
        assert_eq!(json, format!("\"{}\"", identity));

        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(identity, back);
    }
}
