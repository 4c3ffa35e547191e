//! Ordered-chain element resolution.
//!
//! UI trees differ wildly in which handles stay stable - some screens carry
//! rich accessibility ids, others only visible text. A [`LocatorChain`]
//! encodes the caller's preference order from most specific to most generic;
//! [`LocatorResolver`] walks it, giving each candidate a bounded wait, and
//! returns the first hit. Exhausting the chain is a normal outcome, not an
//! error.
//!
//! [`LocatorChain`]: fingertip_core_types::LocatorChain

pub mod errors;
pub mod resolver;
pub mod types;

pub use errors::LocatorError;
pub use resolver::LocatorResolver;
pub use types::{ResolvedElement, ResolverConfig, WaitMode};
