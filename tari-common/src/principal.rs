use bech32::{decode, encode, FromBase32, ToBase32, Variant};
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

use crate::errors::PrincipalError;

/// Human-readable prefix of every principal string.
pub const PRINCIPAL_HRP: &str = "tari";

/// An opaque account identity: a bech32m-encoded Ed25519 public key with
/// the `tari` prefix.
///
/// The ledger never inspects the key material; principals are only compared
/// for equality and used as balance-map keys. Unforgeability comes from the
/// key derivation: a valid principal can only be produced from a real
/// public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal(String);

impl TryFrom<String> for Principal {
    type Error = PrincipalError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if Principal::is_valid(&s) {
            Ok(Principal(s))
        } else {
            Err(PrincipalError::InvalidEncoding(format!("Invalid principal: {}", s)))
        }
    }
}

impl TryFrom<&str> for Principal {
    type Error = PrincipalError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if Principal::is_valid(s) {
            Ok(Principal(s.to_string()))
        } else {
            Err(PrincipalError::InvalidEncoding(format!("Invalid principal: {}", s)))
        }
    }
}

impl std::ops::Deref for Principal {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Principal {
    /// Returns whether the given string is a well-formed principal.
    pub fn is_valid(s: &str) -> bool {
        Self::public_key_from_str(s).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives a principal from an Ed25519 public key.
    pub fn from_pk(public_key: &VerifyingKey) -> Result<Self, PrincipalError> {
        let encoded = encode(
            PRINCIPAL_HRP,
            public_key.to_bytes().to_base32(),
            Variant::Bech32m,
        )?;
        Ok(Principal(encoded))
    }

    /// Extracts the public key embedded in a principal string.
    pub fn public_key_from_str(s: &str) -> Result<VerifyingKey, PrincipalError> {
        let (hrp, data, variant) = decode(s)
            .map_err(|e| PrincipalError::InvalidEncoding(e.to_string()))?;

        if hrp != PRINCIPAL_HRP || variant != Variant::Bech32m {
            return Err(PrincipalError::InvalidEncoding(format!("Unknown principal prefix: {}", s)));
        }

        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| PrincipalError::InvalidEncoding(e.to_string()))?;

        if bytes.len() != 32 {
            return Err(PrincipalError::InvalidPublicKeyLength(bytes.len()));
        }

        let key: [u8; 32] = match bytes.as_slice().try_into() {
            Ok(key) => key,
            Err(_) => return Err(PrincipalError::InvalidPublicKeyLength(bytes.len())),
        };

        VerifyingKey::from_bytes(&key)
            .map_err(|e| PrincipalError::InvalidPublicKey(e.to_string()))
    }

    /// Extracts the public key of this principal.
    pub fn public_key(&self) -> Result<VerifyingKey, PrincipalError> {
        Self::public_key_from_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    use super::*;

    /// Asserts that a principal generated from a public key can be parsed
    /// back to the same public key.
    #[test]
    fn principal_from_public_key_and_back() -> Result<(), PrincipalError> {
        let secret_key = SigningKey::generate(&mut OsRng);
        let public_key = secret_key.verifying_key();

        let principal = Principal::from_pk(&public_key)?;
        let extracted_pk = principal.public_key()?;

        assert_eq!(public_key, extracted_pk);
        assert!(principal.as_str().starts_with(PRINCIPAL_HRP));

        Ok(())
    }

    /// Verifies that an invalid principal string is rejected.
    #[test]
    fn invalid_principal_is_rejected() {
        let invalid = "tari1invalidprincipal";
        assert!(!Principal::is_valid(invalid));
        assert!(Principal::try_from(invalid).is_err());
    }

    /// A valid bech32m string with a foreign prefix is not a principal.
    #[test]
    fn foreign_prefix_is_rejected() {
        let secret_key = SigningKey::generate(&mut OsRng);
        let foreign = encode(
            "nbex",
            secret_key.verifying_key().to_bytes().to_base32(),
            Variant::Bech32m,
        )
        .unwrap();

        assert!(!Principal::is_valid(&foreign));
    }

    #[test]
    fn parse_roundtrip_preserves_string() -> Result<(), PrincipalError> {
        let secret_key = SigningKey::generate(&mut OsRng);
        let principal = Principal::from_pk(&secret_key.verifying_key())?;

        let reparsed = Principal::try_from(principal.as_str())?;
        assert_eq!(principal, reparsed);

        Ok(())
    }
}
