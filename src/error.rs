//! Error type shared by every mode, MGM and the ACPKM family.

use thiserror::Error;

/// Failure reasons produced by this crate's modes, MGM and ACPKM functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Block size is not 8 or 16 octets.
    #[error("invalid block size: {0} (only 8 or 16 are supported)")]
    InvalidBlockSize(usize),

    /// MGM tag size is outside `[4, block_size]`.
    #[error("invalid tag size: {tag_size} (must be between 4 and {block_size})")]
    InvalidTagSize {
        /// Requested tag size.
        tag_size: usize,
        /// Block size of the underlying cipher.
        block_size: usize,
    },

    /// IV/nonce has the wrong length for this mode.
    #[error("invalid IV length: expected {expected}, got {actual}")]
    InvalidIvLength {
        /// Expected IV length in octets.
        expected: usize,
        /// Actual IV length supplied.
        actual: usize,
    },

    /// Data is not a positive multiple of the block size where alignment is required.
    #[error("data length {length} is not a positive multiple of block size {block_size}")]
    NotBlockAligned {
        /// Length of the offending buffer.
        length: usize,
        /// Block size it was required to align to.
        block_size: usize,
    },

    /// Input that must be non-empty was empty.
    #[error("empty input is not permitted here")]
    EmptyInput,

    /// A length-bounded operation (CTR keystream, MGM payload) exceeded its maximum.
    #[error("size {length} exceeds the maximum of {max}")]
    SizeExceeded {
        /// Requested length.
        length: u128,
        /// Maximum permitted length.
        max: u128,
    },

    /// Section size is zero or not a multiple of the block size.
    #[error("invalid section size {section_size} for block size {block_size}")]
    InvalidSectionSize {
        /// Requested section size.
        section_size: usize,
        /// Block size of the underlying cipher.
        block_size: usize,
    },

    /// MGM tag verification failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// `unpad2` found no 0x80 marker, or non-zero bytes after it, in the last block.
    #[error("malformed padding")]
    MalformedPadding,
}

pub(crate) fn validate_block_size(block_size: usize) -> Result<(), Error> {
    match block_size {
        8 | 16 => Ok(()),
        other => Err(Error::InvalidBlockSize(other)),
    }
}
