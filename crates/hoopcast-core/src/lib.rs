// Library root: re-exports all modules so integration tests and the
// harness binary can access the crate's public API.

pub mod config;
pub mod export;
pub mod favourites;
pub mod player;
pub mod valuation;
pub mod view;
