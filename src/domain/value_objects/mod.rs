//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod asset_id;
mod cook_state;
mod platform;

pub use asset_id::AssetId;
pub use cook_state::CookState;
pub use platform::{PlatformId, ALL_PLATFORMS};
