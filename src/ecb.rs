//! Electronic codebook (ECB) mode of operation as defined in GOST R 34.13-2015.

use crate::cipher::BlockCipher;
use crate::error::{validate_block_size, Error};

fn process(cipher: &dyn BlockCipher, data: &[u8]) -> Result<Vec<u8>, Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    if data.is_empty() || data.len() % bs != 0 {
        return Err(Error::NotBlockAligned {
            length: data.len(),
            block_size: bs,
        });
    }
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks(bs) {
        out.extend(cipher.encrypt_block(chunk));
    }
    Ok(out)
}

/// Encrypt `data` block by block under `cipher`. `data` must be a positive
/// multiple of the block size.
pub fn encrypt(cipher: &dyn BlockCipher, data: &[u8]) -> Result<Vec<u8>, Error> {
    process(cipher, data)
}

/// Decrypt `data` block by block under `cipher` (the caller's inverse
/// permutation). `data` must be a positive multiple of the block size.
pub fn decrypt(cipher: &dyn BlockCipher, data: &[u8]) -> Result<Vec<u8>, Error> {
    process(cipher, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{toy, toy_pair};
    use hex_literal::hex;

    #[test]
    fn fixed_vector_against_toy_cipher() {
        // Key and block the length of the toy cipher's block size, so each
        // key octet lines up with the plaintext octet it's added to
        // (k = key[i % key.len()]); the expected ciphertext below is that
        // per-octet `wrapping_add` followed by `rotate_left(1)`, worked out
        // by hand rather than read back from the implementation.
        let key = hex!("000102030405060708090a0b0c0d0e0f");
        let pt = hex!("00112233445566778899aabbccddeeff");
        let expected = hex!("0024486c90b4d8fc2145698db1d5f91c");
        let cipher = toy(16, &key);
        assert_eq!(encrypt(&*cipher, &pt).unwrap(), expected.to_vec());
    }

    #[test]
    fn round_trip() {
        let (enc, dec) = toy_pair(16, b"a fine thirty-two octet key!!!!");
        let pt = b"0123456789abcdef0123456789abcdef".to_vec();
        let ct = encrypt(&*enc, &pt).unwrap();
        assert_eq!(decrypt(&*dec, &ct).unwrap(), pt);
    }

    #[test]
    fn rejects_unaligned() {
        let (enc, _) = toy_pair(16, b"a fine thirty-two octet key!!!!");
        assert!(matches!(
            encrypt(&*enc, b"short"),
            Err(Error::NotBlockAligned { .. })
        ));
    }

    #[test]
    fn rejects_empty() {
        let (enc, _) = toy_pair(16, b"a fine thirty-two octet key!!!!");
        assert!(matches!(encrypt(&*enc, b""), Err(Error::NotBlockAligned { .. })));
    }
}
