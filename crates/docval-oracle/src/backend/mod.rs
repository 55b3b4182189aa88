//! Oracle backend implementations.

#[cfg(feature = "native")]
pub mod process;

#[cfg(feature = "http")]
pub mod http;

use std::sync::Arc;

use crate::Result;

/// Trait for text-completion oracles.
///
/// An oracle turns a prompt into free text. Nothing about the returned text
/// is trusted: it may be empty, prose-wrapped, or entirely unrelated, and
/// callers are expected to re-validate it.
///
/// Implementations block until the completion is available. Timeouts and
/// retries belong to the caller.
pub trait TextOracle: Send + Sync {
    /// Run a completion for the given prompt.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Short human-readable name used in logs.
    fn name(&self) -> &str {
        "oracle"
    }
}

impl<T: TextOracle + ?Sized> TextOracle for &T {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: TextOracle + ?Sized> TextOracle for Box<T> {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: TextOracle + ?Sized> TextOracle for Arc<T> {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Oracle backed by a closure.
pub struct FnOracle<F> {
    f: F,
}

impl<F> FnOracle<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> TextOracle for FnOracle<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn complete(&self, prompt: &str) -> Result<String> {
        (self.f)(prompt)
    }

    fn name(&self) -> &str {
        "fn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OracleError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fn_oracle_passes_prompt_through() {
        let oracle = FnOracle::new(|prompt: &str| Ok(format!("echo: {}", prompt)));
        assert_eq!(oracle.complete("hello").unwrap(), "echo: hello");
        assert_eq!(oracle.name(), "fn");
    }

    #[test]
    fn test_boxed_oracle_delegates() {
        let oracle: Box<dyn TextOracle> = Box::new(FnOracle::new(|_: &str| {
            Err(OracleError::Unavailable("offline".to_string()))
        }));

        let err = oracle.complete("anything").unwrap_err();
        assert_eq!(err.to_string(), "oracle unavailable: offline");
    }

    #[test]
    fn test_arc_oracle_delegates() {
        let oracle = Arc::new(FnOracle::new(|_: &str| Ok("{}".to_string())));
        let shared = Arc::clone(&oracle);
        assert_eq!(shared.complete("x").unwrap(), "{}");
    }
}
