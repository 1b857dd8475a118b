//! Terminal form: input controls, verdict box and key handling

pub mod app;
pub mod draw;
pub mod form;
pub mod run;
pub mod theme;

pub use app::{Action, App};
pub use form::FormState;
pub use run::run;
