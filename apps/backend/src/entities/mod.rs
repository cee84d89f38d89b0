pub mod cells;
pub mod players;
pub mod rooms;
pub mod token_color;

pub use cells::Entity as Cells;
pub use cells::Model as Cell;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use rooms::Entity as Rooms;
pub use rooms::Model as Room;
pub use token_color::TokenColor;
