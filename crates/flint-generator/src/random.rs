//! Random, coordination-free identifiers.
//!
//! Unlike Snowflake IDs these carry no ordering, but need no worker or
//! datacenter assignment either.

use crate::Generator;
use rand::Rng;
use std::convert::Infallible;
use typed_builder::TypedBuilder;
use uuid::Uuid;

const CHARACTERS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length used by [`random_string`] when asked for an empty string.
pub const DEFAULT_LENGTH: usize = 16;

/// A random (v4) UUID as 32 lowercase hex digits, without hyphens.
pub fn random_uuid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// A random (v4) UUID in the hyphenated `8-4-4-4-12` form.
pub fn random_uuid_hyphenated() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// A string of `length` characters drawn uniformly from `[0-9a-z]`.
///
/// A `length` of zero yields [`DEFAULT_LENGTH`] characters.
pub fn random_string(length: usize) -> String {
    let length = if length == 0 { DEFAULT_LENGTH } else { length };
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARACTERS[rng.random_range(0..CHARACTERS.len())] as char)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, TypedBuilder)]
pub struct UuidGenerator {
    #[builder(default)]
    hyphenated: bool,
}

impl Generator for UuidGenerator {
    type Output = String;
    type Error = Infallible;

    fn generate(&self) -> Result<Self::Output, Self::Error> {
        Ok(if self.hyphenated {
            random_uuid_hyphenated()
        } else {
            random_uuid()
        })
    }
}

#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomStringGenerator {
    #[builder(default = DEFAULT_LENGTH)]
    length: usize,
}

impl Generator for RandomStringGenerator {
    type Output = String;
    type Error = Infallible;

    fn generate(&self) -> Result<Self::Output, Self::Error> {
        Ok(random_string(self.length))
    }
}
