//! Cumulative driver and constructor standings for a motorsport league.
//!
//! Reads per-race results from static JSON fixtures and writes the standings
//! artifacts the league website renders.

pub mod config;
pub mod fixtures;
pub mod generate;
pub mod output;
pub mod standings;
pub mod writer;
