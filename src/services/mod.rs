// Write path
pub mod audit;
pub mod ledger;

// Read paths
pub mod medications;
pub mod transactions;
