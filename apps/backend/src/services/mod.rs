pub mod artifacts;
pub mod export;
pub mod game_flow;
pub mod matchmaking;
pub mod moves;
pub mod rooms;
