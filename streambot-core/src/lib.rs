// src/lib.rs

pub mod platforms;
pub mod repositories;
pub mod services;
pub mod tasks;

pub use streambot_common::error::Error;
