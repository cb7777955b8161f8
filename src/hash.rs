use crate::Error;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// The off-ledger cryptographic layer interprets these hashes; the ledger only
// ever checks presence or absence. They are kept as distinct types so a
// credential signature can never be filed where a blinded commitment belongs.
// TODO: use a macro for these three

/// A blinded commitment to an anonymous voting credential
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommitmentHash(pub Vec<u8>);

impl CommitmentHash {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for CommitmentHash {
    fn from(s: &str) -> Self {
        CommitmentHash(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for CommitmentHash {
    fn from(bytes: Vec<u8>) -> Self {
        CommitmentHash(bytes)
    }
}

impl FromStr for CommitmentHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| Error::HashBadHex)?;
        Ok(CommitmentHash(bytes))
    }
}

impl std::fmt::Display for CommitmentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Serialize for CommitmentHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CommitmentHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        std::str::FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

/// The registration authority's blind signature over a blinded commitment
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignatureHash(pub Vec<u8>);

impl SignatureHash {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for SignatureHash {
    fn from(s: &str) -> Self {
        SignatureHash(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for SignatureHash {
    fn from(bytes: Vec<u8>) -> Self {
        SignatureHash(bytes)
    }
}

impl FromStr for SignatureHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| Error::HashBadHex)?;
        Ok(SignatureHash(bytes))
    }
}

impl std::fmt::Display for SignatureHash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Serialize for SignatureHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SignatureHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        std::str::FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

/// Content address of the off-ledger election parameters
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParametersHash(pub Vec<u8>);

impl ParametersHash {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for ParametersHash {
    fn from(s: &str) -> Self {
        ParametersHash(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for ParametersHash {
    fn from(bytes: Vec<u8>) -> Self {
        ParametersHash(bytes)
    }
}

impl FromStr for ParametersHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| Error::HashBadHex)?;
        Ok(ParametersHash(bytes))
    }
}

impl std::fmt::Display for ParametersHash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Serialize for ParametersHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ParametersHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        std::str::FromStr::from_str(&s).map_err(de::Error::custom)
    }
}
