//! Out-of-process consumer of the export queue.
//!
//! One item at a time: reserve, capture the finished board as an SVG, tell
//! the API the artifact is ready, then ack. Any failure rejects the item
//! without requeue.

pub mod callback;
pub mod capture;
pub mod config;
pub mod snapshot;
pub mod worker;

pub use callback::{CallbackError, HttpNotifier, Notifier};
pub use capture::{render_board_svg, CaptureError, Capturer, SvgBoardCapturer};
pub use config::WorkerArgs;
pub use snapshot::RoomSnapshot;
pub use worker::{ExportWorker, Outcome};
