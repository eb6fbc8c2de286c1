//! Ethereum backend for the PDP benchmark suite.
//!
//! Connects a signing provider to the target network, deploys the contract
//! set and implements the workload drivers' backend seam by submitting
//! signed decision calls and awaiting their receipts.

pub mod addresses;
pub mod client;
pub mod contracts;
pub mod deploy;
pub mod token;

pub use addresses::DeployedAddresses;
pub use client::{ContractAddresses, PdpClient, connect, print_operator_balance};
