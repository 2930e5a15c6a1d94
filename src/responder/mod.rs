//! Canned-reply chatbot.
//!
//! Input is normalized, then tested against an ordered table of intent
//! categories. The first category that matches picks a reply uniformly at
//! random from its pool; when nothing matches the reply comes from the
//! fallback pool.

pub mod categories;
pub mod cleaner;
pub mod intent;

pub use categories::{Category, CATEGORIES, FALLBACK};
pub use cleaner::Cleaner;
pub use intent::Intent;

use rand_core::{OsRng, RngCore};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ResponderError {
    #[error("Invalid pattern for {intent}: {pattern}")]
    InvalidPattern {
        intent: Intent,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Reply pool for {pool} is empty")]
    EmptyPool { pool: String },
    #[error("Category {intent} has no patterns")]
    NoPatterns { intent: Intent },
}

struct CompiledCategory {
    intent: Intent,
    matchers: Vec<Regex>,
    replies: &'static [&'static str],
}

impl CompiledCategory {
    fn compile(category: &Category) -> Result<Self, ResponderError> {
        if category.patterns.is_empty() {
            return Err(ResponderError::NoPatterns {
                intent: category.intent,
            });
        }
        if category.replies.is_empty() {
            return Err(ResponderError::EmptyPool {
                pool: category.intent.to_string(),
            });
        }

        let matchers = category
            .patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ResponderError::InvalidPattern {
                    intent: category.intent,
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            intent: category.intent,
            matchers,
            replies: category.replies,
        })
    }

    fn matches(&self, normalized: &str) -> bool {
        self.matchers.iter().any(|m| m.is_match(normalized))
    }
}

pub struct Responder<R: RngCore = OsRng> {
    categories: Vec<CompiledCategory>,
    fallback: &'static [&'static str],
    rng: R,
}

impl Responder<OsRng> {
    pub fn new() -> Result<Self, ResponderError> {
        Self::with_rng(OsRng)
    }
}

impl<R: RngCore> Responder<R> {
    /// Builds a responder over the built-in table with the given random source.
    pub fn with_rng(rng: R) -> Result<Self, ResponderError> {
        Self::from_table(CATEGORIES, FALLBACK, rng)
    }

    /// Builds a responder over an arbitrary ordered table. Every pattern is
    /// compiled and every pool checked here, once.
    pub fn from_table(
        table: &[Category],
        fallback: &'static [&'static str],
        rng: R,
    ) -> Result<Self, ResponderError> {
        if fallback.is_empty() {
            return Err(ResponderError::EmptyPool {
                pool: "fallback".to_string(),
            });
        }
        let categories = table
            .iter()
            .map(CompiledCategory::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            categories,
            fallback,
            rng,
        })
    }

    /// The first intent whose patterns match, in table order.
    pub fn classify(&self, input: &str) -> Option<Intent> {
        let normalized = Cleaner::normalize(input)?;
        self.categories
            .iter()
            .find(|category| category.matches(&normalized))
            .map(|category| category.intent)
    }

    pub fn respond(&mut self, input: &str) -> &'static str {
        let intent = self.classify(input);
        let pool = self.pool(intent);
        debug!(intent = intent.map(|i| i.as_str()).unwrap_or("fallback"), "Responding");
        pick(&mut self.rng, pool)
    }

    /// The reply pool for an intent; `None` selects the fallback pool.
    pub fn pool(&self, intent: Option<Intent>) -> &'static [&'static str] {
        intent
            .and_then(|intent| self.categories.iter().find(|c| c.intent == intent))
            .map(|c| c.replies)
            .unwrap_or(self.fallback)
    }

    pub fn intents(&self) -> impl Iterator<Item = Intent> + '_ {
        self.categories.iter().map(|c| c.intent)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

/// Uniform pick. Pools are never empty once a `Responder` exists.
fn pick<R: RngCore>(rng: &mut R, pool: &'static [&'static str]) -> &'static str {
    pool[uniform_index(rng, pool.len())]
}

/// Uniform index in `0..len` without modulo bias. `len` must be non-zero.
pub(crate) fn uniform_index<R: RngCore>(rng: &mut R, len: usize) -> usize {
    let n = len as u64;
    let limit = u64::MAX - u64::MAX % n;
    loop {
        let value = rng.next_u64();
        if value < limit {
            return (value % n) as usize;
        }
    }
}

#[cfg(test)]
mod tests;
