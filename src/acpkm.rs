//! ACPKM (Advanced Cryptographic Prolongation of Key Material) re-keying:
//! section-key derivation, CTR-ACPKM, master-key derivation and OMAC-ACPKM.

use zeroize::Zeroizing;

use crate::cipher::{BlockCipher, CipherFactory, KEYSIZE};
use crate::cmac::derive_k2;
use crate::ctr::max_blocks;
use crate::error::{validate_block_size, Error};
use crate::padding::pad2;
use crate::util::{concat, to_be, xor};

/// Derive `KEYSIZE` octets of fresh key material from the current cipher, by
/// encrypting a fixed schedule of blocks under the key being retired.
pub fn acpkm_derive(cipher: &dyn BlockCipher) -> Zeroizing<Vec<u8>> {
    let bs = cipher.block_size();
    let steps = KEYSIZE / bs;
    let mut out = Vec::with_capacity(KEYSIZE);
    for j in 0..steps {
        let d = 0x80u32 + (bs as u32) * j as u32;
        let block: Vec<u8> = (0..bs).map(|k| (d.wrapping_add(k as u32) & 0xFF) as u8).collect();
        out.extend(cipher.encrypt_block(&block));
    }
    Zeroizing::new(out)
}

/// The active cipher during a rekeying walk: the caller's original cipher
/// until the first section boundary, a freshly constructed one afterwards.
struct Rekeyed<'c> {
    original: &'c dyn BlockCipher,
    current: Option<Box<dyn BlockCipher>>,
}

impl<'c> Rekeyed<'c> {
    fn new(original: &'c dyn BlockCipher) -> Self {
        Self {
            original,
            current: None,
        }
    }

    fn active(&self) -> &dyn BlockCipher {
        self.current.as_deref().unwrap_or(self.original)
    }

    fn rotate(&mut self, factory: &dyn CipherFactory) {
        let new_key = acpkm_derive(self.active());
        self.current = Some(factory.new_cipher(&new_key));
    }
}

/// CTR mode whose key is rotated via [`acpkm_derive`] every `section_size`
/// octets of keystream. With `section_size` at least `data.len()` rounded up
/// to a block, this is identical to plain CTR.
pub fn ctr_acpkm(
    factory: &dyn CipherFactory,
    cipher: &dyn BlockCipher,
    iv: &[u8],
    data: &[u8],
    section_size: usize,
) -> Result<Vec<u8>, Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    let half = bs / 2;
    if iv.len() != half {
        return Err(Error::InvalidIvLength {
            expected: half,
            actual: iv.len(),
        });
    }
    if section_size == 0 || section_size % bs != 0 {
        return Err(Error::InvalidSectionSize {
            section_size,
            block_size: bs,
        });
    }
    let blocks_needed = ((data.len() + bs - 1) / bs) as u128;
    if blocks_needed > max_blocks(bs) {
        return Err(Error::SizeExceeded {
            length: data.len() as u128,
            max: max_blocks(bs) * bs as u128,
        });
    }

    let blocks_per_section = section_size / bs;
    let mut rekeyed = Rekeyed::new(cipher);
    let mut out = Vec::with_capacity(data.len());
    for (i, chunk) in data.chunks(bs).enumerate() {
        if i > 0 && i % blocks_per_section == 0 {
            rekeyed.rotate(factory);
        }
        let ctr = to_be(i as u128, bs - iv.len());
        let ks = rekeyed.active().encrypt_block(&concat(&[iv, &ctr]));
        out.extend(xor(chunk, &ks));
    }
    Ok(out)
}

/// Derive `length` octets of master key material: CTR-ACPKM applied to a
/// zero-filled buffer with an all-0xFF half-block IV and rotation interval
/// `key_section_size`.
pub fn acpkm_master(
    factory: &dyn CipherFactory,
    cipher: &dyn BlockCipher,
    key_section_size: usize,
    length: usize,
) -> Result<Zeroizing<Vec<u8>>, Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    let iv = vec![0xFFu8; bs / 2];
    let zeros = vec![0u8; length];
    let keystream = ctr_acpkm(factory, cipher, &iv, &zeros, key_section_size)?;
    Ok(Zeroizing::new(keystream))
}

/// Number of (key, K1-candidate) tuples that must be pre-derived for
/// [`omac_acpkm`] to never run out, including the edge case (see
/// module docs) where a block-aligned tail forces one section-boundary
/// rotation more than the naive "message length over section size" count.
fn tuples_needed(data_len: usize, block_size: usize, blocks_per_section: usize) -> usize {
    if data_len == 0 {
        return 1;
    }
    let aligned = data_len % block_size == 0;
    let total_blocks = data_len / block_size + if aligned { 0 } else { 1 };
    let loop_blocks = total_blocks - 1;
    let rotations_in_loop = if loop_blocks == 0 {
        0
    } else {
        (loop_blocks - 1) / blocks_per_section
    };
    1 + rotations_in_loop + if aligned { 1 } else { 0 }
}

/// OMAC-ACPKM (master): a CMAC/OMAC1 whose key, and CMAC `K1`, rotate every
/// `section_size` octets of message, with per-section keys and `K1`
/// candidates drawn from [`acpkm_master`] keyed under `key_section_size`.
pub fn omac_acpkm(
    factory: &dyn CipherFactory,
    cipher: &dyn BlockCipher,
    section_size: usize,
    key_section_size: usize,
    data: &[u8],
) -> Result<Vec<u8>, Error> {
    let bs = cipher.block_size();
    validate_block_size(bs)?;
    if section_size == 0 || section_size % bs != 0 {
        return Err(Error::InvalidSectionSize {
            section_size,
            block_size: bs,
        });
    }
    let blocks_per_section = section_size / bs;
    let tuples = tuples_needed(data.len(), bs, blocks_per_section);

    let tuple_len = KEYSIZE + bs;
    let keystream = acpkm_master(factory, cipher, key_section_size, tuple_len * tuples)?;
    let tuple_at = |idx: usize| -> (Vec<u8>, Vec<u8>) {
        let t = &keystream[idx * tuple_len..(idx + 1) * tuple_len];
        (t[..KEYSIZE].to_vec(), t[KEYSIZE..].to_vec())
    };

    let mut next_tuple = 0usize;
    let mut take_tuple = || {
        let t = tuple_at(next_tuple);
        next_tuple += 1;
        t
    };

    let (key, mut k1) = take_tuple();
    let mut current = factory.new_cipher(&key);

    let aligned = !data.is_empty() && data.len() % bs == 0;
    let last_block_start = if data.is_empty() {
        0
    } else if aligned {
        data.len() - bs
    } else {
        (data.len() / bs) * bs
    };

    let mut chain = vec![0u8; bs];
    let mut i = 0usize;
    while i * bs < last_block_start {
        if i > 0 && i % blocks_per_section == 0 {
            let (key, new_k1) = take_tuple();
            current = factory.new_cipher(&key);
            k1 = new_k1;
        }
        let chunk = &data[i * bs..(i + 1) * bs];
        chain = current.encrypt_block(&xor(chunk, &chain));
        i += 1;
    }

    let tail = &data[last_block_start..];
    if aligned {
        let (key, new_k1) = take_tuple();
        current = factory.new_cipher(&key);
        k1 = new_k1;
    }
    let k2 = derive_k2(&k1, bs);
    let key_for_tail = if aligned { &k1 } else { &k2 };
    let padded_tail = if aligned { tail.to_vec() } else { pad2(tail, bs) };
    let block = xor(&xor(&padded_tail, &chain), key_for_tail);
    Ok(current.encrypt_block(&block))
}
