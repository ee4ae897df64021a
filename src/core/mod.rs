//! Panel controllers
//!
//! Pure state machines for each panel of the portfolio shell, plus the
//! `Session` that owns them and drives their timers.

pub mod carousel;
pub mod catalog;
pub mod chat;
pub mod contact;
pub mod navigation;
mod session;

pub use session::{Session, SessionError, SessionRegistry, SessionSnapshot};
