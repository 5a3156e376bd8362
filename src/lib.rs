pub use anyhow::{anyhow, Result};

pub mod cli;
pub mod config;
pub mod grid;
pub mod inspect;
pub mod paths;
pub mod showcase;
