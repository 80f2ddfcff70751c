//! Envelope decryption.
//!
//! The appliance answers `GET /data` with a base64 envelope whose decoded
//! form is `IV(16) || ciphertext`, AES-256-CBC under a key derived from
//! the shared secret. The derivation is a device-compatibility shortcut,
//! not a KDF: the secret is truncated to 32 bytes or right-padded with
//! ASCII '0' characters.

use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, KeyIvInit};

use airbridge_domain::{BridgeError, Result};

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 32;
/// Initialization vector length in bytes.
pub const IV_LEN: usize = 16;

const BLOCK_LEN: usize = 16;

/// Stretch or truncate the shared secret into a fixed 32-byte key.
pub fn derive_key(secret: &str) -> [u8; KEY_LEN] {
    let mut key = [b'0'; KEY_LEN];
    let bytes = secret.as_bytes();
    let n = bytes.len().min(KEY_LEN);
    key[..n].copy_from_slice(&bytes[..n]);
    key
}

/// Decrypt a base64 envelope with the device's shared secret.
///
/// Only whole cipher blocks are decrypted and no padding is stripped
/// afterwards, matching the appliance firmware's behavior; callers must
/// tolerate trailing padding bytes in the returned plaintext.
pub fn decrypt(envelope: &str, secret: &str) -> Result<Vec<u8>> {
    let decoded = BASE64
        .decode(envelope.trim())
        .map_err(|e| BridgeError::DecryptFailed(format!("invalid base64 envelope: {e}")))?;

    if decoded.len() < IV_LEN {
        return Err(BridgeError::DecryptFailed(format!(
            "decoded envelope too short: {} bytes",
            decoded.len()
        )));
    }

    let key = derive_key(secret);
    let (iv, ciphertext) = decoded.split_at(IV_LEN);
    let whole = ciphertext.len() - ciphertext.len() % BLOCK_LEN;
    let mut buf = ciphertext[..whole].to_vec();

    let cipher = Aes256CbcDec::new_from_slices(&key, iv)
        .map_err(|e| BridgeError::DecryptFailed(format!("cipher init failed: {e}")))?;
    let plain = cipher
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|e| BridgeError::DecryptFailed(format!("cbc decrypt failed: {e}")))?;

    Ok(plain.to_vec())
}
