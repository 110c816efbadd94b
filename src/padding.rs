//! Padding procedures 1, 2 and 3 from GOST R 34.13-2015, and the inverse of
//! procedure 2.

use crate::error::Error;

/// Zero-extend `data` to the next multiple of `block_size`.
///
/// A zero-length input stays zero-length: there is no minimum-one-block
/// guarantee, and this padding has no inverse.
pub fn pad1(data: &[u8], block_size: usize) -> Vec<u8> {
    let rem = data.len() % block_size;
    let mut out = data.to_vec();
    if rem != 0 {
        out.extend(std::iter::repeat(0u8).take(block_size - rem));
    }
    out
}

/// Append a single `0x80` marker, then zero-pad to the next multiple of
/// `block_size`. Fully equivalent to ISO/IEC 7816-4 padding; always adds at
/// least one octet.
pub fn pad2(data: &[u8], block_size: usize) -> Vec<u8> {
    let mut out = data.to_vec();
    out.push(0x80);
    let rem = out.len() % block_size;
    if rem != 0 {
        out.extend(std::iter::repeat(0u8).take(block_size - rem));
    }
    out
}

/// `data` unchanged if already aligned to `block_size`, otherwise [`pad2`].
pub fn pad3(data: &[u8], block_size: usize) -> Vec<u8> {
    if data.len() % block_size == 0 {
        data.to_vec()
    } else {
        pad2(data, block_size)
    }
}

/// Inverse of [`pad2`]: strip the trailing `0x80 00…00` marker.
///
/// Scans the last block right-to-left; fails with
/// [`Error::MalformedPadding`] if no `0x80` is found in the last block, or if
/// any octet following it is non-zero.
pub fn unpad2(data: &[u8], block_size: usize) -> Result<Vec<u8>, Error> {
    if data.is_empty() || data.len() % block_size != 0 {
        return Err(Error::MalformedPadding);
    }
    let tail_start = data.len() - block_size;
    let tail = &data[tail_start..];
    for i in (0..block_size).rev() {
        if tail[i] == 0x80 {
            return Ok(data[..tail_start + i].to_vec());
        }
        if tail[i] != 0 {
            return Err(Error::MalformedPadding);
        }
    }
    Err(Error::MalformedPadding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad2_vector() {
        assert_eq!(
            pad2(&[0x11, 0x22], 8),
            vec![0x11, 0x22, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn pad3_aligned_unchanged() {
        let data = [0x11u8; 8];
        assert_eq!(pad3(&data, 8), data.to_vec());
    }

    #[test]
    fn pad3_unaligned_applies_pad2() {
        assert_eq!(pad3(&[0x11], 8), pad2(&[0x11], 8));
    }

    #[test]
    fn unpad2_vector() {
        let padded = [0x11, 0x22, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(unpad2(&padded, 8).unwrap(), vec![0x11, 0x22]);
    }

    #[test]
    fn pad2_unpad2_round_trip() {
        for len in 0..40usize {
            let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let padded = pad2(&data, 16);
            assert_eq!(unpad2(&padded, 16).unwrap(), data);
        }
    }

    #[test]
    fn unpad2_rejects_missing_marker() {
        let bad = [0u8; 8];
        assert!(matches!(unpad2(&bad, 8), Err(Error::MalformedPadding)));
    }

    #[test]
    fn unpad2_rejects_trailing_garbage() {
        let bad = [0x11, 0x80, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(unpad2(&bad, 8), Err(Error::MalformedPadding)));
    }

    #[test]
    fn unpad2_rejects_unaligned_input() {
        assert!(matches!(unpad2(&[0x80, 0x00, 0x00], 8), Err(Error::MalformedPadding)));
    }

    #[test]
    fn pad1_empty_stays_empty() {
        assert!(pad1(&[], 16).is_empty());
    }

    #[test]
    fn pad1_zero_extends() {
        assert_eq!(pad1(&[1, 2, 3], 8), vec![1, 2, 3, 0, 0, 0, 0, 0]);
    }
}
