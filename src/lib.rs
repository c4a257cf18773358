pub mod core;
pub mod driver;
pub mod logging;
pub mod player;
pub mod prelude;
pub mod store;
pub mod ui;

pub use crate::core::*;
pub use driver::{play_ai_match, play_match, MatchSummary};
pub use logging::init_logging;
pub use player::{AiPlayer, Player};
pub use store::{DuplicateMatchId, MatchHandle, MatchSession, MatchStore};
