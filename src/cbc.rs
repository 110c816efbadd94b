//! Cipher block chaining (CBC) mode of operation as defined in GOST R
//! 34.13-2015.
//!
//! The IV may be one or more blocks long; it is treated as a FIFO register,
//! generalising the usual single-block CBC register.

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

/// Encrypt `data` under `cipher` with register (IV) `iv`. `data` must be a
/// positive multiple of the block size.
pub fn encrypt(cipher: &dyn BlockCipher, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    let mut register = register_from_iv(iv, bs)?;
    if data.is_empty() || data.len() % bs != 0 {
        return Err(Error::NotBlockAligned {
            length: data.len(),
            block_size: bs,
        });
    }
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks(bs) {
        let feed = register.pop_front().expect("register is never empty");
        let block = cipher.encrypt_block(&xor(chunk, &feed));
        register.push_back(block.clone());
        out.extend(block);
    }
    Ok(out)
}

/// Decrypt `data` under `cipher` (the caller's inverse permutation) with
/// register (IV) `iv`. `data` must be a positive multiple of the block size.
pub fn decrypt(cipher: &dyn BlockCipher, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    let mut register = register_from_iv(iv, bs)?;
    if data.is_empty() || data.len() % bs != 0 {
        return Err(Error::NotBlockAligned {
            length: data.len(),
            block_size: bs,
        });
    }
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks(bs) {
        let feed = register.pop_front().expect("register is never empty");
        let decrypted = cipher.encrypt_block(chunk);
        register.push_back(chunk.to_vec());
        out.extend(xor(&decrypted, &feed));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::toy_pair;

    #[test]
    fn round_trip_single_block_iv() {
        let (enc, dec) = toy_pair(16, b"a fine thirty-two octet key!!!!");
        let iv = [0x42u8; 16];
        let pt = b"0123456789abcdef0123456789abcdef".to_vec();
        let ct = encrypt(&*enc, &iv, &pt).unwrap();
        assert_eq!(decrypt(&*dec, &iv, &ct).unwrap(), pt);
    }

    #[test]
    fn round_trip_multi_block_register() {
        let (enc, dec) = toy_pair(8, b"a fine thirty-two octet key!!!!");
        let iv = [0x11u8; 24]; // 3-block register
        let pt: Vec<u8> = (0..40u8).collect();
        let ct = encrypt(&*enc, &iv, &pt).unwrap();
        assert_eq!(decrypt(&*dec, &iv, &ct).unwrap(), pt);
    }

    #[test]
    fn rejects_bad_iv_length() {
        let (enc, _) = toy_pair(16, b"a fine thirty-two octet key!!!!");
        assert!(matches!(
            encrypt(&*enc, &[0u8; 5], &[0u8; 16]),
            Err(Error::InvalidIvLength { .. })
        ));
    }

    #[test]
    fn rejects_unaligned_data() {
        let (enc, _) = toy_pair(16, b"a fine thirty-two octet key!!!!");
        assert!(matches!(
            encrypt(&*enc, &[0u8; 16], &[0u8; 5]),
            Err(Error::NotBlockAligned { .. })
        ));
    }
}
