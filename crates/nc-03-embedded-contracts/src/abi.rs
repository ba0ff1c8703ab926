//! Method selectors and call data.
//!
//! Call data is the 4-byte selector of the method signature followed by
//! the bincode-encoded parameters.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha3::{Digest, Keccak256};

use crate::error::{EmbeddedError, Result};

/// Length of a method selector.
pub const SELECTOR_SIZE: usize = 4;

/// Method selector: first four bytes of `keccak256(signature)`.
pub type Selector = [u8; SELECTOR_SIZE];

/// Selector for a method signature such as `"Fuse(address)"`.
pub fn selector(signature: &str) -> Selector {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; SELECTOR_SIZE];
    out.copy_from_slice(&digest[..SELECTOR_SIZE]);
    out
}

/// Split call data into selector and encoded parameters.
pub fn split_call(data: &[u8]) -> Option<(Selector, &[u8])> {
    if data.len() < SELECTOR_SIZE {
        return None;
    }
    let (head, params) = data.split_at(SELECTOR_SIZE);
    let mut sel = [0u8; SELECTOR_SIZE];
    sel.copy_from_slice(head);
    Some((sel, params))
}

/// Encode a call to `signature` with `params`.
pub fn pack_method<T: Serialize>(signature: &str, params: &T) -> Result<Vec<u8>> {
    let mut data = selector(signature).to_vec();
    let encoded = bincode::serialize(params).map_err(|_| EmbeddedError::UnpackError)?;
    data.extend_from_slice(&encoded);
    Ok(data)
}

/// Decode the parameters of a call to `signature`.
///
/// Fails when the selector does not match or trailing bytes remain.
pub fn unpack_method<T: DeserializeOwned + Serialize>(signature: &str, data: &[u8]) -> Result<T> {
    let (sel, params) = split_call(data).ok_or(EmbeddedError::UnpackError)?;
    if sel != selector(signature) {
        return Err(EmbeddedError::UnpackError);
    }
    let value: T = bincode::deserialize(params).map_err(|_| EmbeddedError::UnpackError)?;
    let consumed = bincode::serialized_size(&value).map_err(|_| EmbeddedError::UnpackError)?;
    if consumed as usize != params.len() {
        return Err(EmbeddedError::UnpackError);
    }
    Ok(value)
}
