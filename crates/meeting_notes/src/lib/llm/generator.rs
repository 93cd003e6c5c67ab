use std::{fmt::Display, future::Future};

/// A generative text capability: prompt in, free text out.
///
/// Implementations may fail or return text without the requested JSON; callers are
/// expected to recover from both.
pub trait Generator {
    const GENERATOR_MODEL: &'static str;

    type Error: Display;

    /// Model actually in use, when an instance overrides the default.
    fn model(&self) -> &str {
        Self::GENERATOR_MODEL
    }

    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Stands in for "no generator configured". It has no values, so it can never be called.
#[derive(Debug, Clone, Copy)]
pub enum NoGenerator {}

impl Generator for NoGenerator {
    const GENERATOR_MODEL: &'static str = "none";

    type Error = std::convert::Infallible;

    async fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
        match *self {}
    }
}
