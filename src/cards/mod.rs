//! Cards: tags, definitions, entities, registry and the attribute overlay.
//!
//! ## Key Types
//!
//! - `GameTag` / `Tags`: named i64 attributes
//! - `CardDefinition`: static data plus script slots
//! - `Entity` / `CardKind`: a card on the board
//! - `CardRegistry`: definition lookup
//!
//! Effective attribute values are computed by the overlay
//! (`GameState::attribute`), never stored.

pub mod attributes;
pub mod definition;
pub mod instance;
pub mod overlay;
pub mod registry;

pub use attributes::{fold_modifiers, GameTag, Race, TagModifier, TagOp, Tags};
pub use definition::{CardDefinition, CardId, CardType, PlayReq, PowerUp, Scripts};
pub use instance::{CardKind, EnchantmentState, Entity};
pub use registry::CardRegistry;
