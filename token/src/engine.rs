//! The ledger engine: the public operation surface.

use crate::accounts::AccountStore;
use crate::allowances::AllowanceStore;
use crate::error::TokenError;
use crate::events::{EventLog, Receipt};
use crate::metadata::TokenMetadata;
use crate::policy::{Faucet, FaucetConfig, MintPolicy};
use fungible_types::{AccountId, Timestamp, TokenAmount, TokenEvent};
use tracing::debug;

/// A fungible-token ledger.
///
/// All state lives in this struct and every operation takes it by `&mut`,
/// so independent ledgers never share anything. Each operation either
/// commits completely and returns a [`Receipt`], or returns the reason it
/// was rejected and leaves the ledger exactly as it was.
///
/// The caller's identity is supplied by the host on every call.
#[derive(Clone, Debug)]
pub struct TokenLedger {
    metadata: TokenMetadata,
    accounts: AccountStore,
    allowances: AllowanceStore,
    total_supply: TokenAmount,
    admin: AccountId,
    mint_policy: MintPolicy,
    faucet: Faucet,
    log: EventLog,
}

fn ensure_target(target: &AccountId) -> Result<(), TokenError> {
    if target.is_null() {
        return Err(TokenError::ZeroAddressTarget);
    }
    Ok(())
}

impl TokenLedger {
    /// Deploy a ledger. A non-zero `initial_supply` is credited to
    /// `deployer` and logged as a mint from the null identifier.
    ///
    /// The deployer also becomes the administrator.
    pub fn new(
        deployer: AccountId,
        metadata: TokenMetadata,
        initial_supply: TokenAmount,
    ) -> Result<Self, TokenError> {
        ensure_target(&deployer)?;
        let mut ledger = Self {
            metadata,
            accounts: AccountStore::new(),
            allowances: AllowanceStore::new(),
            total_supply: TokenAmount::zero(),
            admin: deployer,
            mint_policy: MintPolicy::default(),
            faucet: Faucet::disabled(),
            log: EventLog::new(),
        };
        if !initial_supply.is_zero() {
            let outcome = ledger.try_issue(deployer, initial_supply);
            let _ = ledger.commit("deploy", &deployer, outcome)?;
        }
        debug!(
            name = ledger.metadata.name(),
            symbol = ledger.metadata.symbol(),
            supply = %ledger.total_supply,
            "ledger deployed"
        );
        Ok(ledger)
    }

    pub fn with_mint_policy(mut self, policy: MintPolicy) -> Self {
        self.mint_policy = policy;
        self
    }

    pub fn with_faucet(mut self, config: FaucetConfig) -> Self {
        self.faucet = Faucet::new(config);
        self
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    pub fn symbol(&self) -> &str {
        self.metadata.symbol()
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals()
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn total_supply(&self) -> &TokenAmount {
        &self.total_supply
    }

    pub fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.accounts.balance_of(account)
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> TokenAmount {
        self.allowances.allowance_of(owner, spender)
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn allowances(&self) -> &AllowanceStore {
        &self.allowances
    }

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    pub fn mint_policy(&self) -> MintPolicy {
        self.mint_policy
    }

    pub fn faucet(&self) -> &Faucet {
        &self.faucet
    }

    pub fn events(&self) -> &EventLog {
        &self.log
    }

    /// Recompute the sum of all balances and compare it with the supply.
    pub fn audit(&self) -> Result<(), TokenError> {
        let balances = self.accounts.sum().ok_or(TokenError::ArithmeticOverflow)?;
        if balances != self.total_supply {
            return Err(TokenError::ConservationViolated {
                balances,
                supply: self.total_supply.clone(),
            });
        }
        Ok(())
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// Move `amount` from the caller to `to`.
    pub fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        amount: TokenAmount,
    ) -> Result<Receipt, TokenError> {
        let outcome = self.try_transfer(caller, to, amount);
        self.commit("transfer", &caller, outcome)
    }

    /// Set the caller's allowance for `spender` to exactly `amount`.
    pub fn approve(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        amount: TokenAmount,
    ) -> Result<Receipt, TokenError> {
        let outcome = self.try_approve(caller, spender, amount);
        self.commit("approve", &caller, outcome)
    }

    /// Move `amount` from `from` to `to`, spending the caller's allowance.
    pub fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        amount: TokenAmount,
    ) -> Result<Receipt, TokenError> {
        let outcome = self.try_transfer_from(caller, from, to, amount);
        self.commit("transfer_from", &caller, outcome)
    }

    pub fn increase_allowance(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        delta: TokenAmount,
    ) -> Result<Receipt, TokenError> {
        let outcome = self.try_increase_allowance(caller, spender, delta);
        self.commit("increase_allowance", &caller, outcome)
    }

    pub fn decrease_allowance(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        delta: TokenAmount,
    ) -> Result<Receipt, TokenError> {
        let outcome = self.try_decrease_allowance(caller, spender, delta);
        self.commit("decrease_allowance", &caller, outcome)
    }

    /// Create `amount` new tokens for `to`.
    ///
    /// Under [`MintPolicy::Open`] there is no caller check at all.
    pub fn mint(
        &mut self,
        caller: AccountId,
        to: AccountId,
        amount: TokenAmount,
    ) -> Result<Receipt, TokenError> {
        let outcome = self
            .mint_policy
            .authorize(&caller, &self.admin)
            .and_then(|()| self.try_issue(to, amount));
        self.commit("mint", &caller, outcome)
    }

    /// Destroy `amount` of the caller's own tokens.
    pub fn burn(&mut self, caller: AccountId, amount: TokenAmount) -> Result<Receipt, TokenError> {
        let outcome = self.try_burn(caller, amount);
        self.commit("burn", &caller, outcome)
    }

    /// Destroy `amount` of `owner`'s tokens, spending the caller's allowance.
    pub fn burn_from(
        &mut self,
        caller: AccountId,
        owner: AccountId,
        amount: TokenAmount,
    ) -> Result<Receipt, TokenError> {
        let outcome = self.try_burn_from(caller, owner, amount);
        self.commit("burn_from", &caller, outcome)
    }

    /// Mint the faucet amount to the caller, at most once per interval.
    pub fn claim(&mut self, caller: AccountId, now: Timestamp) -> Result<Receipt, TokenError> {
        let outcome = self.try_claim(caller, now);
        self.commit("claim", &caller, outcome)
    }

    /// Hand the administrator role to `new_admin`. Emits no events.
    pub fn transfer_admin(
        &mut self,
        caller: AccountId,
        new_admin: AccountId,
    ) -> Result<Receipt, TokenError> {
        let outcome = self.try_transfer_admin(caller, new_admin);
        self.commit("transfer_admin", &caller, outcome)
    }

    // ── Internals ──────────────────────────────────────────────────────
    //
    // Each `try_*` validates before it writes: every check that can fail
    // runs first, and the writes that follow cannot fail.

    fn commit(
        &mut self,
        op: &'static str,
        caller: &AccountId,
        outcome: Result<Vec<TokenEvent>, TokenError>,
    ) -> Result<Receipt, TokenError> {
        match outcome {
            Ok(events) => {
                let records = self.log.append(events);
                debug!(op, %caller, events = records.len(), supply = %self.total_supply, "committed");
                Ok(Receipt::new(records))
            }
            Err(e) => {
                debug!(op, %caller, error = %e, "rejected");
                Err(e)
            }
        }
    }

    fn try_transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        amount: TokenAmount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        ensure_target(&to)?;
        self.accounts.move_balance(&caller, &to, &amount)?;
        Ok(vec![TokenEvent::Transfer {
            from: caller,
            to,
            value: amount,
        }])
    }

    fn try_approve(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        amount: TokenAmount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        ensure_target(&spender)?;
        self.allowances.set_allowance(&caller, &spender, amount.clone());
        Ok(vec![TokenEvent::Approval {
            owner: caller,
            spender,
            value: amount,
        }])
    }

    fn try_transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        amount: TokenAmount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        ensure_target(&to)?;
        self.allowances.require_allowance(&from, &caller, &amount)?;
        self.accounts.move_balance(&from, &to, &amount)?;
        self.allowances.consume(&from, &caller, &amount)?;
        Ok(vec![TokenEvent::Transfer {
            from,
            to,
            value: amount,
        }])
    }

    fn try_increase_allowance(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        delta: TokenAmount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        ensure_target(&spender)?;
        let total = self.allowances.increase(&caller, &spender, &delta)?;
        Ok(vec![TokenEvent::Approval {
            owner: caller,
            spender,
            value: total,
        }])
    }

    fn try_decrease_allowance(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        delta: TokenAmount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        ensure_target(&spender)?;
        let total = self.allowances.decrease(&caller, &spender, &delta)?;
        Ok(vec![TokenEvent::Approval {
            owner: caller,
            spender,
            value: total,
        }])
    }

    /// Credit `to` with freshly created tokens. Shared by deploy, mint and
    /// faucet claims; authorization happens in the callers.
    fn try_issue(&mut self, to: AccountId, amount: TokenAmount) -> Result<Vec<TokenEvent>, TokenError> {
        ensure_target(&to)?;
        let supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.accounts.credit(&to, &amount)?;
        self.total_supply = supply;
        Ok(vec![TokenEvent::Transfer {
            from: AccountId::NULL,
            to,
            value: amount,
        }])
    }

    /// Remove `amount` of `owner`'s tokens from circulation.
    fn destroy(&mut self, owner: &AccountId, amount: &TokenAmount) -> Result<(), TokenError> {
        self.accounts.require_balance(owner, amount)?;
        let supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.accounts.debit(owner, amount)?;
        self.total_supply = supply;
        Ok(())
    }

    fn try_burn(&mut self, caller: AccountId, amount: TokenAmount) -> Result<Vec<TokenEvent>, TokenError> {
        self.destroy(&caller, &amount)?;
        Ok(vec![TokenEvent::Transfer {
            from: caller,
            to: AccountId::NULL,
            value: amount,
        }])
    }

    fn try_burn_from(
        &mut self,
        caller: AccountId,
        owner: AccountId,
        amount: TokenAmount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.allowances.require_allowance(&owner, &caller, &amount)?;
        self.destroy(&owner, &amount)?;
        self.allowances.consume(&owner, &caller, &amount)?;
        Ok(vec![TokenEvent::Transfer {
            from: owner,
            to: AccountId::NULL,
            value: amount,
        }])
    }

    fn try_claim(&mut self, caller: AccountId, now: Timestamp) -> Result<Vec<TokenEvent>, TokenError> {
        let amount = self.faucet.check_claim(&caller, now)?;
        let events = self.try_issue(caller, amount)?;
        self.faucet.record_claim(&caller, now);
        Ok(events)
    }

    fn try_transfer_admin(
        &mut self,
        caller: AccountId,
        new_admin: AccountId,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        if caller != self.admin {
            return Err(TokenError::Unauthorized {
                caller,
                action: "transfer the admin role",
            });
        }
        ensure_target(&new_admin)?;
        self.admin = new_admin;
        Ok(Vec::new())
    }

    /// Reassemble a ledger from persisted parts. Conservation is checked by
    /// the caller.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        metadata: TokenMetadata,
        accounts: AccountStore,
        allowances: AllowanceStore,
        total_supply: TokenAmount,
        admin: AccountId,
        mint_policy: MintPolicy,
        faucet: Faucet,
        log: EventLog,
    ) -> Self {
        Self {
            metadata,
            accounts,
            allowances,
            total_supply,
            admin,
            mint_policy,
            faucet,
            log,
        }
    }
}
