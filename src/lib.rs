//! CarTrace: synthetic vehicle snapshots by license plate, served over a
//! direct JSON API and a tool-calling surface for language-model agents.

#[macro_use]
extern crate failure;

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod mcp;
pub mod privacy;
pub mod repository;
pub mod seed;
pub mod server;
pub mod types;
pub mod vehicle_api;
