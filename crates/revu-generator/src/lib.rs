//! Review text synthesis.
//!
//! A review is one paragraph assembled in fixed order: intro line, body
//! line(s), the visitor's own comment verbatim, closing line. Every line
//! is drawn uniformly at random from a fixed pool, over an injectable
//! RNG so tests can cover the whole candidate space deterministically.

mod generate;
mod pools;

pub use generate::*;
pub use pools::*;
