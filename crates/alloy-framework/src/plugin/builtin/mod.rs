//! Built-in plugins shipped with the Alloy plugin runtime.
//!
//! | Plugin | Description |
//! |--------|-------------|
//! | [`inject::InjectPlugin`] | Config-driven static context injections (spec §6) |

pub mod inject;

pub use inject::InjectPlugin;
