use sha2::{Digest, Sha256};
use std::fmt::Display;

/// Multiplier of the rolling hash.
pub const ROLLING_PRIME: u32 = 53;

/// One hash function of the chain, turning a URL into an integer digest.
///
/// The set of stages is closed: a cheap polynomial hash for the common
/// case and SHA-256 as the collision fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashStage {
    /// Order-sensitive polynomial accumulator over the URL's code points,
    /// `h = (h * 53 + c) mod 2^32`. Not collision resistant against
    /// adversarial input.
    Rolling,
    /// The top `6 * length` bits of the big-endian SHA-256 digest of the
    /// URL's UTF-8 bytes.
    Sha256,
}

impl HashStage {
    /// Computes the integer this stage feeds to the encoder for a code of
    /// `length` symbols.
    pub fn digest(&self, url: &str, length: usize) -> u128 {
        match self {
            HashStage::Rolling => rolling_hash(url) as u128,
            HashStage::Sha256 => sha256_prefix(url, length),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashStage::Rolling => "rolling",
            HashStage::Sha256 => "sha256",
        }
    }
}

impl Display for HashStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `mod 2^32` arithmetic is exactly `u32` wrapping arithmetic.
fn rolling_hash(url: &str) -> u32 {
    url.chars().fold(0u32, |hash, c| {
        hash.wrapping_mul(ROLLING_PRIME).wrapping_add(c as u32)
    })
}

fn sha256_prefix(url: &str, length: usize) -> u128 {
    let bits = (6 * length).min(128);
    if bits == 0 {
        return 0;
    }

    let digest = Sha256::digest(url.as_bytes());
    let mut head = [0u8; 16];
    head.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(head) >> (128 - bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_hash_known_values() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("a"), 97);
        assert_eq!(rolling_hash("ab"), 97 * 53 + 98);
        assert_eq!(rolling_hash("https://example.com"), 3_550_939_256);
    }

    #[test]
    fn rolling_hash_is_order_sensitive() {
        assert_ne!(rolling_hash("ab"), rolling_hash("ba"));
    }

    #[test]
    fn rolling_hash_collides_on_carried_digits() {
        // 'a'*53 + 'z' == 'b'*53 + 'E'
        assert_eq!(
            rolling_hash("https://example.com/az"),
            rolling_hash("https://example.com/bE")
        );
    }

    #[test]
    fn rolling_hash_uses_code_points() {
        // U+00E9 contributes 233, not its two UTF-8 bytes.
        assert_eq!(rolling_hash("é"), 233);
    }

    #[test]
    fn sha256_prefix_takes_top_bits() {
        // First nine digest bytes of sha256("https://example.com") are
        // 10 06 80 ad 54 6c e6 a5 77; 72 bits cover them exactly.
        assert_eq!(
            sha256_prefix("https://example.com", 12),
            0x10_06_80_ad_54_6c_e6_a5_77
        );
        assert_eq!(
            sha256_prefix("https://example.com", 8),
            0x10_06_80_ad_54_6c_e6_a5_77 >> 24
        );
    }

    #[test]
    fn sha256_zero_length_is_zero() {
        assert_eq!(sha256_prefix("https://example.com", 0), 0);
    }

    #[test]
    fn stages_disagree_on_same_input() {
        let url = "https://example.com";
        assert_ne!(
            HashStage::Rolling.digest(url, 8),
            HashStage::Sha256.digest(url, 8)
        );
    }
}
