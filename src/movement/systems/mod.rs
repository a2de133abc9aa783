//! Movement domain: system modules for input and locomotion.

pub(crate) mod input;
pub(crate) mod locomotion;

pub(crate) use input::{derive_player_intent, read_keyboard_controls};
pub(crate) use locomotion::{move_enemies, move_player};
pub use locomotion::{apply_gravity, apply_knockback, clamp_to_world, try_jump, walk};
