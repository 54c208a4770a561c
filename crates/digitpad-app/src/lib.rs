//! Digit Pad
//!
//! Draw a digit with the mouse, ask a remote classifier what it is, and send
//! the drawing back labeled with that answer to train the model.
//!
//! - `session`: the state container tying surface, sampler and client together
//! - `config`: environment-driven settings
//! - `app`: the winit/softbuffer window

pub mod app;
pub mod config;
pub mod session;

pub use app::{DigitPad, UserEvent, status_line};
pub use config::{AppConfig, ConfigError};
pub use session::{
    Completion, PendingPredict, PendingTrain, SessionState, Ticket, Workbench, WorkbenchError,
};
