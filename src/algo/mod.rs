//! Pure algorithms used by the reconciler.
//!
//! - `lis`: longest increasing subsequence for move minimisation

mod lis;

pub use lis::longest_increasing_subsequence;
