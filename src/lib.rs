//! # Rusty-hoeffding
//!
//! `rusty-hoeffding` implements Hoeffding trees (Very Fast Decision Trees): decision trees
//! that learn from a stream of examples, one at a time, and decide when to split a leaf
//! using the Hoeffding bound instead of a full pass over the data.
//!
//! ## Getting Started
//!
//! To use `rusty-hoeffding`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-hoeffding = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can train a classifier on a stream of labelled examples:
//!
//! ```rust
//! use rusty_hoeffding::data::{features, Target};
//! use rusty_hoeffding::trees::{HoeffdingTree, TreeParams};
//!
//! let mut params = TreeParams::new();
//! params.set_patience(1).unwrap();
//! params.set_confidence(0.99).unwrap();
//!
//! let mut tree = HoeffdingTree::classifier(params).unwrap();
//!
//! for i in 0..200 {
//!     let x = (i % 10) as f64;
//!     let label = if x < 5.0 { "small" } else { "large" };
//!     tree.learn_one(&features([("x", x)]), &Target::Class(label)).unwrap();
//! }
//!
//! assert_eq!(tree.predict_class(&features([("x", 1.0)])), Some("small"));
//! assert_eq!(tree.predict_class(&features([("x", 8.0)])), Some("large"));
//! ```

/// Examples, features and replayable datasets
pub mod data;
/// Errors raised while building or growing trees
pub mod errors;
/// Functions for evaluating model performance
pub mod metrics;
/// Running statistics of targets and features
pub mod proba;
/// Split candidates and the per-feature statistics that propose them
pub mod splitting;
/// Hoeffding trees
pub mod trees;

pub use errors::{Result, TreeError};
