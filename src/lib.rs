//! This crate contains a generic implementation of [block cipher modes of
//! operation][1] defined in [GOST R 34.13-2015], the CMAC/OMAC1 message
//! authentication code from the same standard, the ACPKM key-prolongation
//! family from [R 23565.1.017-2018], and the Multilinear Galois Mode (MGM)
//! authenticated-encryption construction.
//!
//! Unlike the [`cipher`]-based modes this crate is descended from, the block
//! function is supplied at runtime through the [`BlockCipher`] trait rather
//! than fixed at compile time, since callers here select an 8- or 16-octet
//! block size dynamically. No block cipher implementation is provided; see
//! [`test_support`] (test-only) for the toy cipher used by this crate's own
//! unit tests.
//!
//! [1]: https://en.wikipedia.org/wiki/Block_cipher_mode_of_operation
//! [GOST R 34.13-2015]: https://tc26.ru/standard/gost/GOST_R_3413-2015.pdf
//! [R 23565.1.017-2018]: https://tc26.ru/standard/rs/%D0%A0%2050.1.113-2016.pdf
//! [`cipher`]: https://docs.rs/cipher/
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod acpkm;
mod cbc;
mod cfb;
mod cipher;
mod cmac;
mod ctr;
mod ecb;
mod error;
mod gf;
mod mgm;
mod ofb;
mod padding;
#[cfg(test)]
mod test_support;
mod util;

pub use acpkm::{acpkm_derive, acpkm_master, ctr_acpkm, omac_acpkm};
pub use cipher::{BlockCipher, CipherFactory, KEYSIZE};
pub use cmac::{mac, subkeys};
pub use error::Error;
pub use mgm::{nonce_prepare, Mgm};
pub use padding::{pad1, pad2, pad3, unpad2};

/// Electronic codebook (ECB) mode.
pub mod ecb_mode {
    pub use crate::ecb::{decrypt, encrypt};
}

/// Cipher block chaining (CBC) mode.
pub mod cbc_mode {
    pub use crate::cbc::{decrypt, encrypt};
}

/// Cipher feedback (CFB) mode.
pub mod cfb_mode {
    pub use crate::cfb::{decrypt, encrypt};
}

/// Output feedback (OFB) mode.
pub mod ofb_mode {
    pub use crate::ofb::{decrypt, encrypt};
}

/// Counter (CTR) mode.
pub mod ctr_mode {
    pub use crate::ctr::{decrypt, encrypt};
}
