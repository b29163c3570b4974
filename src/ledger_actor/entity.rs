//! [`ActorEntity`] implementation for [`Account`].
//!
//! Accounts are keyed by their owner, so opening a second account for the same user is
//! rejected by the actor before `from_create_params` runs.

use super::actions::LedgerAction;
use super::error::LedgerError;
use crate::model::{Account, AccountOpen, UserId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

#[async_trait]
impl ActorEntity for Account {
    type Id = UserId;
    type Create = AccountOpen;
    type Action = LedgerAction;
    type ActionResult = Decimal;
    type Context = ();
    type Error = LedgerError;

    fn assign_id(_seq: u64, params: &AccountOpen) -> UserId {
        params.user_id.clone()
    }

    fn from_create_params(id: UserId, _params: AccountOpen) -> Result<Self, Self::Error> {
        Ok(Self::open(id))
    }

    /// # Actions
    /// - `Credit`: adds the amount, returns the new balance. A sum past `Decimal::MAX` fails
    ///   with `BalanceOverflow`.
    /// - `Debit`: subtracts the amount when the balance covers it, returns the new balance;
    ///   otherwise fails with `InsufficientFunds` and leaves the balance untouched.
    async fn handle_action(
        &mut self,
        action: LedgerAction,
        _ctx: &Self::Context,
    ) -> Result<Decimal, Self::Error> {
        match action {
            LedgerAction::Credit(amount) => {
                if amount <= Decimal::ZERO {
                    return Err(LedgerError::InvalidAmount(amount));
                }
                self.balance = self.balance.checked_add(amount).ok_or(
                    LedgerError::BalanceOverflow {
                        balance: self.balance,
                        amount,
                    },
                )?;
            }
            LedgerAction::Debit(amount) => {
                if amount <= Decimal::ZERO {
                    return Err(LedgerError::InvalidAmount(amount));
                }
                if self.balance < amount {
                    return Err(LedgerError::InsufficientFunds {
                        requested: amount,
                        available: self.balance,
                    });
                }
                self.balance -= amount;
            }
        }

        assert!(
            self.balance >= Decimal::ZERO,
            "account {} went negative: {}",
            self.user_id,
            self.balance
        );
        debug!(user_id = %self.user_id, balance = %self.balance, "Balance changed");
        Ok(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        Account {
            balance,
            ..Account::open("dave".into())
        }
    }

    #[tokio::test]
    async fn debit_within_balance() {
        let mut acc = account(dec!(10));
        let left = acc.handle_action(LedgerAction::Debit(dec!(10)), &()).await.unwrap();
        assert_eq!(left, dec!(0));
    }

    #[tokio::test]
    async fn overdraft_leaves_balance_untouched() {
        let mut acc = account(dec!(5));
        let err = acc
            .handle_action(LedgerAction::Debit(dec!(5.01)), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                requested: dec!(5.01),
                available: dec!(5)
            }
        );
        assert_eq!(acc.balance, dec!(5));
    }

    #[tokio::test]
    async fn non_positive_amounts_are_rejected() {
        let mut acc = account(dec!(5));
        for action in [
            LedgerAction::Credit(dec!(0)),
            LedgerAction::Credit(dec!(-1)),
            LedgerAction::Debit(dec!(0)),
            LedgerAction::Debit(dec!(-3)),
        ] {
            let err = acc.handle_action(action, &()).await.unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)), "{action:?}");
        }
        assert_eq!(acc.balance, dec!(5));
    }

    #[tokio::test]
    async fn credit_past_decimal_max_is_refused() {
        let mut acc = account(Decimal::MAX);
        let err = acc
            .handle_action(LedgerAction::Credit(dec!(1)), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::BalanceOverflow {
                balance: Decimal::MAX,
                amount: dec!(1)
            }
        );
        assert_eq!(acc.balance, Decimal::MAX);
    }

    #[test]
    fn accounts_are_keyed_by_user() {
        let params = AccountOpen {
            user_id: "erin".into(),
        };
        assert_eq!(Account::assign_id(7, &params), UserId::from("erin"));
        assert_eq!(Account::open("erin".into()).id, "acc_erin");
    }
}
