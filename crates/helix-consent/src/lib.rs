//! Consent ledger: the single authority for which data-use features a
//! user has authorized. Mutations serialize per `(user, feature)` key so
//! a concurrent grant/revoke pair can never leave two active records.

mod ledger;

pub use ledger::ConsentLedger;
