/// The 64 code symbols, indexed 0..63. The order is part of the code format.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Renders integers as fixed-width base-64 numerals over [`ALPHABET`].
///
/// The output always has exactly `length` symbols. Values that need more
/// than `6 * length` bits lose their high-order bits: the encoder keeps the
/// `length` least significant base-64 digits. Code length stays bounded
/// whatever the digest width, at the price of a smaller effective code
/// space; collisions this introduces are resolved by the hash chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeEncoder;

impl CodeEncoder {
    /// Encodes `value` into exactly `length` symbols, most significant first.
    pub fn encode(value: u128, length: usize) -> String {
        let mut value = value;
        let mut symbols = Vec::with_capacity(length);
        for _ in 0..length {
            symbols.push(ALPHABET[(value % 64) as usize]);
            value /= 64;
        }
        symbols.reverse();
        // ALPHABET is pure ASCII.
        symbols.into_iter().map(char::from).collect()
    }
}
