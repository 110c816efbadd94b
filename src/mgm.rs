//! Multilinear Galois Mode (MGM): a nonce-based AEAD built from a block
//! function and the [`crate::gf`] multiplier, with no internal MAC or mode
//! primitive shared with the rest of this crate beyond the block function.

use subtle::ConstantTimeEq;

use crate::cipher::BlockCipher;
use crate::error::{validate_block_size, Error};
use crate::gf::{gf_mul, reduction_constant};
use crate::padding::pad1;
use crate::util::{concat, from_be, to_be, xor};

/// An MGM instance bound to a block function, block size and tag size.
///
/// Stateless between calls: `seal`/`open` take the nonce, plaintext/
/// ciphertext and associated data fresh each time. Safe to reuse across
/// calls from a single thread; see the crate's concurrency notes for sharing
/// across threads.
pub struct Mgm<'c> {
    cipher: &'c dyn BlockCipher,
    block_size: usize,
    tag_size: usize,
    max_size: u128,
    r: u8,
}

/// Clear the high bit of the first octet of `nonce`, producing a value safe
/// to pass as the E-counter seed. Sealing does not enforce this itself;
/// callers that want a canonical nonce should call this first.
pub fn nonce_prepare(nonce: &[u8]) -> Vec<u8> {
    let mut out = nonce.to_vec();
    if let Some(first) = out.first_mut() {
        *first &= 0x7F;
    }
    out
}

fn incr_half(half: &mut [u8]) {
    let mask = (1u128 << (half.len() * 8)) - 1;
    let next = (from_be(half).wrapping_add(1)) & mask;
    let encoded = to_be(next, half.len());
    half.copy_from_slice(&encoded);
}

fn incr_r(register: &[u8]) -> Vec<u8> {
    let half = register.len() / 2;
    let mut out = register.to_vec();
    let mut right = out[half..].to_vec();
    incr_half(&mut right);
    out[half..].copy_from_slice(&right);
    out
}

fn incr_l(register: &[u8]) -> Vec<u8> {
    let half = register.len() / 2;
    let mut out = register.to_vec();
    let mut left = out[..half].to_vec();
    incr_half(&mut left);
    out[..half].copy_from_slice(&left);
    out
}

impl<'c> Mgm<'c> {
    /// Construct an MGM instance over `cipher`, truncating tags to
    /// `tag_size` octets.
    pub fn new(cipher: &'c dyn BlockCipher, tag_size: usize) -> Result<Self, Error> {
        let bs = cipher.block_size();
        validate_block_size(bs)?;
        if tag_size < 4 || tag_size > bs {
            return Err(Error::InvalidTagSize {
                tag_size,
                block_size: bs,
            });
        }
        let max_size = (1u128 << (bs * 4)) - 1;
        Ok(Self {
            cipher,
            block_size: bs,
            tag_size,
            max_size,
            r: reduction_constant(bs),
        })
    }

    fn check_sizes(&self, plaintext_len: usize, ad_len: usize) -> Result<(), Error> {
        if plaintext_len == 0 && ad_len == 0 {
            return Err(Error::EmptyInput);
        }
        let total = (plaintext_len + ad_len) as u128;
        if total > self.max_size {
            return Err(Error::SizeExceeded {
                length: total,
                max: self.max_size,
            });
        }
        Ok(())
    }

    fn check_nonce(&self, nonce: &[u8]) -> Result<(), Error> {
        if nonce.len() != self.block_size {
            return Err(Error::InvalidIvLength {
                expected: self.block_size,
                actual: nonce.len(),
            });
        }
        Ok(())
    }

    /// CTR-like encryption under the MGM E-counter; the same operation
    /// both encrypts and decrypts.
    fn crypt(&self, nonce: &[u8], data: &[u8]) -> Vec<u8> {
        let mut e_initial = nonce.to_vec();
        e_initial[0] &= 0x7F;
        let mut register = self.cipher.encrypt_block(&e_initial);
        let mut out = Vec::with_capacity(data.len());
        for chunk in data.chunks(self.block_size) {
            let keystream = self.cipher.encrypt_block(&register);
            out.extend(xor(chunk, &keystream));
            register = incr_r(&register);
        }
        out
    }

    fn auth(&self, nonce: &[u8], ciphertext: &[u8], ad: &[u8]) -> Vec<u8> {
        let mut a_initial = nonce.to_vec();
        a_initial[0] |= 0x80;
        let mut register = self.cipher.encrypt_block(&a_initial);
        let mut sum = vec![0u8; self.block_size];

        for chunk in ad.chunks(self.block_size) {
            let padded = pad1(chunk, self.block_size);
            let keystream = self.cipher.encrypt_block(&register);
            sum = xor(&sum, &gf_mul(&keystream, &padded, self.block_size, self.r));
            register = incr_l(&register);
        }
        for chunk in ciphertext.chunks(self.block_size) {
            let padded = pad1(chunk, self.block_size);
            let keystream = self.cipher.encrypt_block(&register);
            sum = xor(&sum, &gf_mul(&keystream, &padded, self.block_size, self.r));
            register = incr_l(&register);
        }

        let half = self.block_size / 2;
        let len_block = concat(&[
            &to_be((ad.len() as u128) * 8, half),
            &to_be((ciphertext.len() as u128) * 8, half),
        ]);
        let keystream = self.cipher.encrypt_block(&register);
        sum = xor(&sum, &gf_mul(&keystream, &len_block, self.block_size, self.r));

        self.cipher.encrypt_block(&sum)
    }

    /// Encrypt `plaintext` under `nonce`, authenticating `ad` alongside it.
    /// Returns `ciphertext ‖ tag`.
    pub fn seal(&self, nonce: &[u8], plaintext: &[u8], ad: &[u8]) -> Result<Vec<u8>, Error> {
        self.check_nonce(nonce)?;
        self.check_sizes(plaintext.len(), ad.len())?;
        let ciphertext = self.crypt(nonce, plaintext);
        let tag = self.auth(nonce, &ciphertext, ad);
        Ok(concat(&[&ciphertext, &tag[..self.tag_size]]))
    }

    /// Verify and decrypt `sealed` (ciphertext ‖ tag) under `nonce` and `ad`.
    /// The tag comparison is constant time; on mismatch no plaintext is
    /// returned.
    pub fn open(&self, nonce: &[u8], sealed: &[u8], ad: &[u8]) -> Result<Vec<u8>, Error> {
        self.check_nonce(nonce)?;
        if sealed.len() < self.tag_size {
            return Err(Error::AuthenticationFailed);
        }
        let body_len = sealed.len() - self.tag_size;
        let (body, received_tag) = sealed.split_at(body_len);
        self.check_sizes(body.len(), ad.len())?;

        let expected_tag = self.auth(nonce, body, ad);
        let matches: bool = expected_tag[..self.tag_size].ct_eq(received_tag).into();
        if !matches {
            return Err(Error::AuthenticationFailed);
        }
        Ok(self.crypt(nonce, body))
    }
}
