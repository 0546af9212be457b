//! Clock-face time selection
//!
//! Geometry, interaction state and formatting for picking a time of day on an
//! analog dial. The crate has no rendering code: hosts draw the ticks and hand
//! it describes and forward pointer input in face-local pixels.
//!
//! - [`face`] maps values to angles and pointer positions back to values
//! - [`controller`] turns pointer and touch input into selections
//! - [`picker`] combines hours and minutes into a full time

pub mod angle;
pub mod config;
pub mod controller;
pub mod error;
pub mod face;
pub mod format;
pub mod mode;
pub mod picker;
pub mod settle;
pub mod time_source;

pub use config::{ConfigError, PickerConfig};
pub use controller::{EditingField, Notification, PointerEvent, SelectionController};
pub use error::FaceError;
pub use face::{Dial, Point};
pub use mode::{ClockMode, HourCycle, Meridiem};
pub use picker::{PickerEvent, TimePicker};
