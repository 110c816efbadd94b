//! Toy block ciphers used only by this crate's own unit tests.
//!
//! These are deliberately not real ciphers: a per-byte key-dependent
//! permutation that exercises the generic mode logic without depending on an
//! external block-cipher crate.
#![cfg(test)]

use crate::cipher::{BlockCipher, CipherFactory};

pub(crate) struct Toy {
    key: Vec<u8>,
    block_size: usize,
    inverse: bool,
}

impl BlockCipher for Toy {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn encrypt_block(&self, block: &[u8]) -> Vec<u8> {
        assert_eq!(block.len(), self.block_size);
        block
            .iter()
            .enumerate()
            .map(|(i, &b)| {
                let k = self.key[i % self.key.len()];
                if self.inverse {
                    b.rotate_right(1).wrapping_sub(k)
                } else {
                    b.wrapping_add(k).rotate_left(1)
                }
            })
            .collect()
    }
}

pub(crate) fn toy(block_size: usize, key: &[u8]) -> Box<dyn BlockCipher> {
    Box::new(Toy {
        key: key.to_vec(),
        block_size,
        inverse: false,
    })
}

pub(crate) fn toy_inv(block_size: usize, key: &[u8]) -> Box<dyn BlockCipher> {
    Box::new(Toy {
        key: key.to_vec(),
        block_size,
        inverse: true,
    })
}

/// A matched (encrypt, decrypt) pair of toy ciphers under the same key.
pub(crate) fn toy_pair(block_size: usize, key: &[u8]) -> (Box<dyn BlockCipher>, Box<dyn BlockCipher>) {
    (toy(block_size, key), toy_inv(block_size, key))
}

pub(crate) struct ToyFactory {
    pub block_size: usize,
    pub inverse: bool,
}

impl CipherFactory for ToyFactory {
    fn new_cipher(&self, key: &[u8]) -> Box<dyn BlockCipher> {
        if self.inverse {
            toy_inv(self.block_size, key)
        } else {
            toy(self.block_size, key)
        }
    }
}
