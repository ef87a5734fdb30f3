#![forbid(unsafe_code)]

pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod model;
pub mod navigation;
pub mod player;
pub mod progress;
pub mod time;

pub use error::Error;
pub use navigation::{ActiveLesson, Direction};
pub use player::{CompletionOutcome, PlayerState};
pub use progress::CourseProgress;
pub use time::Clock;
