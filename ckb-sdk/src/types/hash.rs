use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

type HashArray = [u8; 32];

/// A 32-byte hash as returned by the host: transaction hash, script hash, lock hash,
/// type hash or data hash. Can be represented as a hex string.
#[derive(Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Byte32(HashArray);

impl Byte32 {
    pub const LEN: usize = 32;

    /// Returns a reference to the inner `[u8; 32]` array
    pub fn as_bytes(&self) -> &HashArray {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Returns `true` if all bytes are zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<HashArray> for Byte32 {
    fn from(hash: HashArray) -> Self {
        Self(hash)
    }
}

impl From<Byte32> for HashArray {
    fn from(hash: Byte32) -> HashArray {
        hash.0
    }
}

impl AsRef<[u8]> for Byte32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Byte32 {
    type Error = String;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        <HashArray>::try_from(value)
            .map(Self)
            .map_err(|_| format!("Can't create Byte32 from slice length={}", value.len()))
    }
}

impl TryFrom<&str> for Byte32 {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.strip_prefix("0x").unwrap_or(value);
        let bytes =
            hex::decode(value).map_err(|_| format!("Can't create Byte32 from string {}", value))?;
        Self::try_from(bytes.as_slice())
    }
}

impl Serialize for Byte32 {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}", self))
    }
}

impl<'de> Deserialize<'de> for Byte32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        Byte32::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}
