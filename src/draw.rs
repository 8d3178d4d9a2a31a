//! Draw sources: where selection randomness comes from.
//!
//! The table never touches an RNG directly: it asks a [`DrawSource`] for a
//! uniform integer in `[0, total_weight)`. This keeps the selection engine
//! deterministic under test: substitute [`SequenceDraws`] and every `next()`
//! call is scripted.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::ThreadRng;

/// A source of uniform random integers in a bounded range.
pub trait DrawSource {
    /// Produce an integer uniformly distributed in `[0, bound)`.
    ///
    /// Callers guarantee `bound >= 1`.
    fn draw(&mut self, bound: u64) -> u64;
}

/// The default source: the thread-local RNG.
pub struct ThreadDraws(ThreadRng);

impl ThreadDraws {
    pub fn new() -> ThreadDraws {
        return ThreadDraws(rand::thread_rng());
    }
}

impl Default for ThreadDraws {
    fn default() -> ThreadDraws {
        return ThreadDraws::new();
    }
}

impl DrawSource for ThreadDraws {
    fn draw(&mut self, bound: u64) -> u64 {
        return self.0.gen_range(0..bound);
    }
}

/// Adapter for any [`rand::Rng`], e.g. a seeded `StdRng` when selections
/// must be reproducible across runs.
pub struct RngDraws<R: Rng>(pub R);

impl<R: Rng> DrawSource for RngDraws<R> {
    fn draw(&mut self, bound: u64) -> u64 {
        return self.0.gen_range(0..bound);
    }
}

/// A scripted source that replays a fixed sequence of draws, ignoring the
/// requested bound. Values at or past the bound are clamped by the table to
/// the top of the range space.
///
/// Intended for deterministic tests of selection behavior.
pub struct SequenceDraws {
    draws: VecDeque<u64>,
}

impl SequenceDraws {
    /// Script a sequence of draws, consumed front to back.
    pub fn new(draws: impl IntoIterator<Item = u64>) -> SequenceDraws {
        return SequenceDraws {
            draws: draws.into_iter().collect(),
        };
    }

    /// Number of scripted draws left.
    pub fn remaining(&self) -> usize {
        return self.draws.len();
    }
}

impl DrawSource for SequenceDraws {
    /// Pop the next scripted draw.
    ///
    /// Panics if the sequence is exhausted.
    fn draw(&mut self, _bound: u64) -> u64 {
        return self
            .draws
            .pop_front()
            .expect("SequenceDraws exhausted");
    }
}
