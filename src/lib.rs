pub mod bootstrap;
pub mod classify;
pub mod config;
pub mod error;
pub mod proposal;
pub mod source;
pub mod state;
