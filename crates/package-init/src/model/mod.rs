//! Package records as stored: [`Provider`] and [`Configuration`].

pub mod configuration;
pub mod package;
pub mod provider;

pub use configuration::*;
pub use package::*;
pub use provider::*;
