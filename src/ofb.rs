//! Output feedback (OFB) mode of operation as defined in GOST R 34.13-2015.
//!
//! Keystream generation does not depend on plaintext or ciphertext, so
//! encryption and decryption are the same operation.

use std::collections::VecDeque;

use crate::cipher::BlockCipher;
use crate::error::{validate_block_size, Error};
use crate::util::xor;

fn register_from_iv(iv: &[u8], bs: usize) -> Result<VecDeque<Vec<u8>>, Error> {
    if iv.is_empty() || iv.len() % bs != 0 {
        return Err(Error::InvalidIvLength {
            expected: bs,
            actual: iv.len(),
        });
    }
    Ok(iv.chunks(bs).map(|c| c.to_vec()).collect())
}

fn process(cipher: &dyn BlockCipher, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    let mut register = register_from_iv(iv, bs)?;
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks(bs) {
        let feed = register.pop_front().expect("register is never empty");
        let keystream = cipher.encrypt_block(&feed);
        register.push_back(keystream.clone());
        out.extend(xor(chunk, &keystream));
    }
    Ok(out)
}

/// Encrypt `data` under `cipher` with register (IV) `iv`.
pub fn encrypt(cipher: &dyn BlockCipher, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    process(cipher, iv, data)
}

/// Decrypt `data` under `cipher` with register (IV) `iv`.
pub fn decrypt(cipher: &dyn BlockCipher, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    process(cipher, iv, data)
}
