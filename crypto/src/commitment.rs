//! Turning a `(choice, secret)` pair into a commitment.
//!
//! The preimage layout is part of the wire contract: a voter who commits with
//! one implementation must be able to reveal with another, so the exact bytes
//! fed to the hash are fixed per [`CommitmentScheme`].

use commitvote_types::{ChoiceTag, Commitment, CommitmentScheme};

use crate::hash::{blake2b_256_multi, keccak256_multi};
use crate::CryptoError;

/// Byte between the choice tag and the secret in every preimage.
pub const SEPARATOR: u8 = b'~';

/// Domain prefix of the `blake2b-v1` scheme.
pub const BLAKE2B_V1_DOMAIN: &[u8] = b"commitvote:v1";

/// Build the exact bytes hashed for `(tag, secret)` under `scheme`.
pub fn preimage(
    scheme: CommitmentScheme,
    tag: ChoiceTag,
    secret: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if secret.is_empty() {
        return Err(CryptoError::EmptySecret);
    }
    let mut out = Vec::with_capacity(BLAKE2B_V1_DOMAIN.len() + 2 + secret.len());
    match scheme {
        CommitmentScheme::Keccak256 => {
            // Decimal digit, as in "1~secret".
            out.extend_from_slice(tag.to_string().as_bytes());
        }
        CommitmentScheme::Blake2bV1 => {
            out.extend_from_slice(BLAKE2B_V1_DOMAIN);
            out.push(tag.as_u8());
        }
    }
    out.push(SEPARATOR);
    out.extend_from_slice(secret);
    Ok(out)
}

/// Compute the commitment for `(tag, secret)`.
///
/// Pure and deterministic: equal inputs give bit-identical commitments.
pub fn commit(
    scheme: CommitmentScheme,
    tag: ChoiceTag,
    secret: &[u8],
) -> Result<Commitment, CryptoError> {
    let bytes = preimage(scheme, tag, secret)?;
    let digest = match scheme {
        CommitmentScheme::Keccak256 => keccak256_multi(&[&bytes]),
        CommitmentScheme::Blake2bV1 => blake2b_256_multi(&[&bytes]),
    };
    Ok(Commitment::new(digest))
}

/// Recompute the commitment for `(tag, secret)` and compare it with `claimed`.
pub fn verify(
    scheme: CommitmentScheme,
    tag: ChoiceTag,
    secret: &[u8],
    claimed: &Commitment,
) -> Result<bool, CryptoError> {
    Ok(commit(scheme, tag, secret)? == *claimed)
}
