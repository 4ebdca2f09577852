pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod render;
pub mod session;
pub mod state;
