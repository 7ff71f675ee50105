pub mod ledger;
pub mod player_service;
pub mod registry;
pub mod resolution;
