pub mod random;

use flint_snowflake::{Clock, Snowflake, SnowflakeId};
use std::fmt::Display;

pub use random::{RandomStringGenerator, UuidGenerator};

/// Trait for opaque identifier sources.
///
/// Callers such as a request-handling layer hold a `Generator` and only ever
/// ask it for the next identifier.
///
/// Implementations can vary from random generators to
/// distributed ID generators (e.g., Snowflake, UUID, etc.)
pub trait Generator: Send + Sync + 'static {
    type Output: Display;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generates the next identifier.
    ///
    /// The generated identifier should be unique
    fn generate(&self) -> Result<Self::Output, Self::Error>;
}

impl<C: Clock + 'static> Generator for Snowflake<C> {
    type Output = SnowflakeId;
    type Error = flint_snowflake::Error;

    fn generate(&self) -> Result<Self::Output, Self::Error> {
        self.next_id()
    }
}
