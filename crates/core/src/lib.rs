//! Core business logic for Opsdesk.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here; persistence and transport are collaborators injected from outside.
//!
//! # Modules
//!
//! - `finance` - Line item and labor cost totals with VAT
//! - `numbering` - Sequential document number allocation
//! - `policy` - Ownership and visibility decisions
//! - `customer` - Customer records
//! - `quote` - Quote lifecycle state machine
//! - `invoice` - Invoice lifecycle state machine
//! - `workorder` - Work order lifecycle and queue ordering
//! - `inventory` - Stock ledger rules
//! - `stats` - Dashboard metric reductions

pub mod customer;
pub mod finance;
pub mod inventory;
pub mod invoice;
pub mod numbering;
pub mod policy;
pub mod quote;
pub mod stats;
pub mod workorder;
