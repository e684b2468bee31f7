// Library for tests to access modules

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod models;
pub mod monitor;
pub mod snapshot_builder;
pub mod ticker;
pub mod version;
pub mod worker;
