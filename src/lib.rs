//! Synchronous-reactive actors over a three-valued signal model, and a
//! fixed-point director that runs networks of them tick by tick.

pub mod actor;
pub mod cli;
pub mod config;
pub mod director;
pub mod library;
pub mod logging;
pub mod model;
pub mod network;
pub mod signal;
pub mod testing;
