//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Seeded RNG only
//! - Per-frame timers, never wall-clock reads
//! - No rendering, audio or platform dependencies

pub mod input;
pub mod object;
pub mod player;
pub mod rect;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use input::{FrameInput, InputMapper, MoveCommand};
pub use object::{FallingObject, GemKind};
pub use player::Cart;
pub use rect::Aabb;
pub use score::{FloatingText, ScoreEvent, ScoreLedger, SubscriberId};
pub use spawn::Spawner;
pub use state::{GameEvent, GameSession, Screen, ScreenFlash};
pub use tick::update;
