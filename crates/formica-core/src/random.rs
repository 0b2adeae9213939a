//! RandomSource - the single sequential random stream of a colony.
//!
//! Every stochastic decision in a tick draws from one `RandomSource`, in a
//! fixed order. Reordering draws changes outcomes even with the same seed,
//! so behaviours take the source by `&mut` and never clone it.

use crate::error::{FormicaError, Result};
use crate::types::AgentId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

enum Backend {
    Seeded(StdRng),
    /// Replays a fixed list of raw draws (reduced modulo the bound).
    Scripted(VecDeque<u32>),
}

/// Bounded-integer random generator threaded through the scheduler.
pub struct RandomSource {
    backend: Backend,
    draws: u64,
}

impl RandomSource {
    /// A reproducible stream.
    pub fn seeded(seed: u64) -> Self {
        Self {
            backend: Backend::Seeded(StdRng::seed_from_u64(seed)),
            draws: 0,
        }
    }

    /// A stream seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            backend: Backend::Seeded(StdRng::from_entropy()),
            draws: 0,
        }
    }

    /// A stream that replays `values` in order (for testing).
    ///
    /// Each value is reduced modulo the requested bound. Once the script is
    /// exhausted every draw yields 0.
    pub fn scripted(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            backend: Backend::Scripted(values.into_iter().collect()),
            draws: 0,
        }
    }

    /// Next integer in `[0, bound)`. `bound` must be positive.
    pub fn below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "RandomSource::below called with zero bound");
        if bound == 0 {
            return 0;
        }
        self.draws += 1;
        match &mut self.backend {
            Backend::Seeded(rng) => rng.gen_range(0..bound),
            Backend::Scripted(script) => match script.pop_front() {
                Some(v) => v % bound,
                None => {
                    tracing::warn!(draw = self.draws, "scripted random source exhausted");
                    0
                }
            },
        }
    }

    /// True with probability `percent`/100.
    pub fn percent(&mut self, percent: u32) -> bool {
        self.below(100) < percent
    }

    /// Uniform index into a collection of `len` items.
    pub fn index(
        &mut self,
        len: usize,
        agent: Option<AgentId>,
        context: &'static str,
    ) -> Result<usize> {
        if len == 0 {
            return Err(FormicaError::empty(agent, context));
        }
        let bound = u32::try_from(len).unwrap_or(u32::MAX);
        Ok(self.below(bound) as usize)
    }

    /// Uniform choice from `items`; fails explicitly when `items` is empty.
    pub fn choose<'a, T>(
        &mut self,
        items: &'a [T],
        agent: Option<AgentId>,
        context: &'static str,
    ) -> Result<&'a T> {
        let i = self.index(items.len(), agent, context)?;
        Ok(&items[i])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl std::fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.backend {
            Backend::Seeded(_) => "seeded",
            Backend::Scripted(_) => "scripted",
        };
        f.debug_struct("RandomSource")
            .field("kind", &kind)
            .field("draws", &self.draws)
            .finish()
    }
}
