//! CMAC/OMAC1 as defined in GOST R 34.13-2015: subkey derivation and
//! variable-length message authentication.

use crate::cipher::BlockCipher;
use crate::error::{validate_block_size, Error};
use crate::padding::pad2;
use crate::util::xor;

fn rb_for_block_size(block_size: usize) -> u8 {
    if block_size == 16 {
        0x87
    } else {
        0x1B
    }
}

/// Left-shift `block` by one bit, then XOR the reduction constant `rb` into
/// the last octet if the original top bit was set.
pub(crate) fn shift_xor(block: &[u8], rb: u8) -> Vec<u8> {
    let msb_set = block[0] & 0x80 != 0;
    let mut out = vec![0u8; block.len()];
    let mut carry = 0u8;
    for i in (0..block.len()).rev() {
        out[i] = (block[i] << 1) | carry;
        carry = (block[i] & 0x80) >> 7;
    }
    if msb_set {
        let last = out.len() - 1;
        out[last] ^= rb;
    }
    out
}

/// Derive a second subkey from a first subkey by the same shift-XOR rule
/// used to derive `K1` from `L`. Used by OMAC-ACPKM, where `K1` for a
/// section comes from the pre-derived master keystream rather than from
/// encrypting the zero block.
pub(crate) fn derive_k2(k1: &[u8], block_size: usize) -> Vec<u8> {
    shift_xor(k1, rb_for_block_size(block_size))
}

/// Derive the CMAC subkeys `(K1, K2)` from `cipher`.
pub fn subkeys(cipher: &dyn BlockCipher) -> Result<(Vec<u8>, Vec<u8>), Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    let rb = rb_for_block_size(bs);
    let l = cipher.encrypt_block(&vec![0u8; bs]);
    let k1 = shift_xor(&l, rb);
    let k2 = shift_xor(&k1, rb);
    Ok((k1, k2))
}

/// Chain all but the last block of `data` via CBC-style encryption, starting
/// from a zero chaining value. Returns `(chain, tail)` where `tail` is the
/// final partial or full block (possibly empty, if `data` is empty).
pub(crate) fn chain_prefix<'a>(cipher: &dyn BlockCipher, bs: usize, data: &'a [u8]) -> (Vec<u8>, &'a [u8]) {
    if data.is_empty() {
        return (vec![0u8; bs], data);
    }
    let full_blocks = if data.len() % bs == 0 {
        data.len() / bs - 1
    } else {
        data.len() / bs
    };
    let mut chain = vec![0u8; bs];
    for i in 0..full_blocks {
        let chunk = &data[i * bs..(i + 1) * bs];
        chain = cipher.encrypt_block(&xor(chunk, &chain));
    }
    (chain, &data[full_blocks * bs..])
}

/// Compute the full-block-sized CMAC/OMAC1 of `data` under `cipher`; callers
/// truncate as needed.
pub fn mac(cipher: &dyn BlockCipher, data: &[u8]) -> Result<Vec<u8>, Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    let (k1, k2) = subkeys(cipher)?;
    let (chain, tail) = chain_prefix(cipher, bs, data);
    let aligned = !data.is_empty() && data.len() % bs == 0;
    let key = if aligned { &k1 } else { &k2 };
    let padded_tail = if aligned { tail.to_vec() } else { pad2(tail, bs) };
    let block = xor(&xor(&padded_tail, &chain), key);
    Ok(cipher.encrypt_block(&block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::toy;

    #[test]
    fn subkey_rule_matches_textbook_cmac() {
        let cipher = toy(16, b"a fine thirty-two octet key!!!!");
        let (k1, k2) = subkeys(&*cipher).unwrap();
        let l = cipher.encrypt_block(&[0u8; 16]);
        let expected_k1 = shift_xor(&l, 0x87);
        let expected_k2 = shift_xor(&expected_k1, 0x87);
        assert_eq!(k1, expected_k1);
        assert_eq!(k2, expected_k2);
    }

    #[test]
    fn mac_is_deterministic() {
        let cipher = toy(16, b"a fine thirty-two octet key!!!!");
        let data = b"authenticate this message please".to_vec();
        assert_eq!(mac(&*cipher, &data).unwrap(), mac(&*cipher, &data).unwrap());
    }

    #[test]
    fn mac_differs_for_aligned_vs_unaligned_tail() {
        let cipher = toy(16, b"a fine thirty-two octet key!!!!");
        let aligned = [0x11u8; 16];
        let unaligned = [0x11u8; 15];
        assert_ne!(
            mac(&*cipher, &aligned).unwrap(),
            mac(&*cipher, &unaligned).unwrap()
        );
    }

    #[test]
    fn mac_of_empty_input_uses_k2() {
        let cipher = toy(16, b"a fine thirty-two octet key!!!!");
        let (_, k2) = subkeys(&*cipher).unwrap();
        let padded = pad2(&[], 16);
        let expected = cipher.encrypt_block(&xor(&padded, &k2));
        assert_eq!(mac(&*cipher, &[]).unwrap(), expected);
    }
}
