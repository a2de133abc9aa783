//! Combat domain: enemy AI.

pub(crate) mod enemy;

pub use enemy::{AiContext, AiControlled, AiDecision, EnemyBrain, PlayerView, think};

pub(crate) use enemy::update_enemy_ai;
