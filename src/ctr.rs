//! Counter (CTR) mode of operation as defined in GOST R 34.13-2015.
//!
//! The IV is half a block; keystream block `i` is the encryption of
//! `IV ‖ to_be(i, block_size/2)`.

use crate::cipher::BlockCipher;
use crate::error::{validate_block_size, Error};
use crate::util::{concat, to_be, xor};

/// Maximum number of keystream blocks addressable by a half-block counter.
pub(crate) fn max_blocks(block_size: usize) -> u128 {
    1u128 << (block_size * 4)
}

fn check_iv(iv: &[u8], bs: usize) -> Result<(), Error> {
    let half = bs / 2;
    if iv.len() != half {
        return Err(Error::InvalidIvLength {
            expected: half,
            actual: iv.len(),
        });
    }
    Ok(())
}

fn check_length(data_len: usize, bs: usize) -> Result<(), Error> {
    let blocks_needed = ((data_len + bs - 1) / bs) as u128;
    if blocks_needed > max_blocks(bs) {
        return Err(Error::SizeExceeded {
            length: data_len as u128,
            max: max_blocks(bs) * bs as u128,
        });
    }
    Ok(())
}

fn keystream_block(cipher: &dyn BlockCipher, iv: &[u8], bs: usize, index: u128) -> Vec<u8> {
    let ctr = to_be(index, bs - iv.len());
    cipher.encrypt_block(&concat(&[iv, &ctr]))
}

/// Produce the CTR keystream XORed against `data`. Symmetric: the same
/// operation both encrypts and decrypts.
fn process(cipher: &dyn BlockCipher, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    check_iv(iv, bs)?;
    check_length(data.len(), bs)?;
    let mut out = Vec::with_capacity(data.len());
    for (i, chunk) in data.chunks(bs).enumerate() {
        let ks = keystream_block(cipher, iv, bs, i as u128);
        out.extend(xor(chunk, &ks));
    }
    Ok(out)
}

/// Encrypt `data` under `cipher` with half-block IV `iv`.
pub fn encrypt(cipher: &dyn BlockCipher, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    process(cipher, iv, data)
}

/// Decrypt `data` under `cipher` with half-block IV `iv`.
pub fn decrypt(cipher: &dyn BlockCipher, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    process(cipher, iv, data)
}
