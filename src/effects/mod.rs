//! Card scripts and their resolution.
//!
//! - [`Action`]: one declarative instruction of a script
//! - [`Selector`] / [`EntityFilter`]: late-bound target selection,
//!   relative to the entity whose script is running
//! - [`ResolverContext`]: source, chosen target, triggering event and
//!   Choose One index for the script being resolved
//!
//! Scripts are plain data. The resolver in [`resolver`] interprets them
//! against the current [`GameState`](crate::core::GameState).

pub mod action;
pub mod resolver;
pub mod targeting;

pub use action::{Action, ActionResult, Amount};
pub use resolver::ResolverContext;
pub use targeting::{EntityFilter, Selector};
