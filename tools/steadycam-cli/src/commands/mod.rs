pub mod config;
pub mod modes;
pub mod offset;
pub mod simulate;
