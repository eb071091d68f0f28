pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod fixtures;
pub mod scenarios;
pub mod testing;
pub mod validation;
