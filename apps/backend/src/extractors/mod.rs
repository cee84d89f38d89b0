pub mod admin_access;
pub mod current_player;
pub mod room_id;
pub mod validated_json;

pub use admin_access::{AdminAccess, CallbackAccess};
pub use current_player::CurrentPlayer;
pub use room_id::RoomId;
pub use validated_json::ValidatedJson;
