use crate::Generator;
use tinylink_core::{GenerateError, ShortCode};

const MULTIPLIER: u64 = 17;
const SCALE: u64 = 5;
const MODULUS: u64 = 10_000_000;

/// Derives a short code from the characters of a URL.
///
/// For every character the accumulator becomes
/// `5 * (acc * 17 / len + codepoint + 17) mod 10_000_000`, where `len` is
/// the byte length of the whole URL and the division truncates. The final
/// accumulator is rendered as unpadded lowercase hex, so codes are at most
/// six characters long.
///
/// Collisions between unrelated URLs are expected: `http://x.io/ag` and
/// `http://x.io/ba` both produce `772d10`.
pub fn generate(original_url: &str) -> Result<ShortCode, GenerateError> {
    if original_url.is_empty() {
        return Err(GenerateError::EmptyInput);
    }

    let len = original_url.len() as u64;
    let hash = original_url.chars().fold(0_u64, |acc, c| {
        SCALE * (acc * MULTIPLIER / len + u64::from(c) + MULTIPLIER) % MODULUS
    });

    Ok(ShortCode::new(format!("{:x}", hash)))
}

/// [`Generator`] backed by [`generate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HashGenerator;

impl HashGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for HashGenerator {
    type Output = ShortCode;

    fn generate(&self, original_url: &str) -> Result<ShortCode, GenerateError> {
        generate(original_url)
    }
}
