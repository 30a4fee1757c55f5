pub mod config_io;
pub mod export;
pub mod state;
pub mod store;
pub mod workspace;
