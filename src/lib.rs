//! wrr - Weighted round-robin selection over a dynamic entry set.
//!
//! Each entry carries a key, an opaque value, and a positive weight; every
//! call to [`Wrr::next`] returns one value chosen with probability
//! proportional to its weight. The entry set can be mutated live (`set`,
//! `add`, `replace`, `remove`) between selections.
//!
//! This is a pure in-memory selection primitive, meant to be embedded in a
//! larger routing or load-distribution component. It performs no I/O, keeps
//! no history between draws, and leaves synchronization to the embedder.
//!
//! # Quick Start
//!
//! ```
//! use wrr::{Entry, Wrr};
//!
//! // Two backends, one carrying twice the traffic share of the other.
//! let mut table = Wrr::new([
//!     Entry::weighted("a", "10.0.0.1:80", 200),
//!     Entry::weighted("b", "10.0.0.2:80", 100),
//! ]);
//!
//! // An independent weighted draw.
//! let backend = table.next();
//! assert!(backend.is_some());
//!
//! // Drain a backend out of rotation.
//! assert!(table.remove(&"a"));
//! assert_eq!(table.next(), Some(&"10.0.0.2:80"));
//! ```

pub mod draw;
pub mod entry;
pub mod select;
pub mod table;

// Re-exports for convenience
pub use draw::DrawSource;
pub use draw::RngDraws;
pub use draw::SequenceDraws;
pub use draw::ThreadDraws;
pub use entry::Entry;
pub use entry::Indexed;
pub use table::DEFAULT_WEIGHT;
pub use table::SELECTION_THRESHOLD;
pub use table::TableConfig;
pub use table::Wrr;
