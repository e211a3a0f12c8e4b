//! Random alphanumeric payloads for synthetic column values.
//!
//! Values are drawn uniformly from `[a-zA-Z0-9]`. The generator is fast and
//! non-cryptographic.
//!
//! # Concurrency
//!
//! [`generate`] draws from `rand::rng()`, which is a thread-local generator.
//! Every worker thread therefore owns its own independent source and no
//! locking is required. Callers that need reproducible output pass their own
//! generator to [`generate_with`].
//!
//! # Example
//!
//! ```
//! let name = payload_generator::generate(20);
//! assert_eq!(name.len(), 20);
//! ```

use rand::Rng;

/// The 62-symbol alphabet payload characters are drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random alphanumeric string of exactly `length` characters
/// using the calling thread's generator.
pub fn generate(length: usize) -> String {
    generate_with(&mut rand::rng(), length)
}

/// Generate a random alphanumeric string of exactly `length` characters
/// from the given generator.
pub fn generate_with<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generate one string per entry of `shape` using the calling thread's generator.
pub fn generate_row(shape: &[usize]) -> Vec<String> {
    let mut rng = rand::rng();
    shape.iter().map(|&len| generate_with(&mut rng, len)).collect()
}
