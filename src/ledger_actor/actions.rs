//! Ledger mutations.
//!
//! Each action is handled by [`Account::handle_action`](crate::model::Account) while the ledger
//! actor holds the account exclusively, so the sufficiency check inside `Debit` and the
//! subtraction are one atomic step.

use rust_decimal::Decimal;

/// Custom actions for Account entities. Every action resolves to the new balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LedgerAction {
    /// Adds a positive amount.
    Credit(Decimal),
    /// Subtracts a positive amount if, and only if, the balance covers it.
    Debit(Decimal),
}
