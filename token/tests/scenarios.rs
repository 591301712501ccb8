//! End-to-end ledger scenarios: deploy, move tokens, delegate, mint, burn,
//! and check both the state and the event stream after each step.

use fungible_token::{
    Call, FaucetConfig, MintPolicy, TokenError, TokenLedger, TokenMetadata, UNLIMITED_ALLOWANCE,
};
use fungible_types::{AccountId, Timestamp, TokenAmount, TokenEvent};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const OWNER: AccountId = AccountId::new([0x11; 20]);
const ADDR1: AccountId = AccountId::new([0x22; 20]);
const ADDR2: AccountId = AccountId::new([0x33; 20]);

fn amt(n: u64) -> TokenAmount {
    TokenAmount::from(n)
}

fn deploy(supply: u64) -> TokenLedger {
    TokenLedger::new(OWNER, TokenMetadata::new("Test Token", "TST", 18), amt(supply))
        .expect("deploy")
}

/// Balances, allowances between the three test accounts, supply and log
/// length: everything a failed call must leave alone.
fn fingerprint(ledger: &TokenLedger) -> (Vec<TokenAmount>, Vec<TokenAmount>, TokenAmount, usize) {
    let accounts = [OWNER, ADDR1, ADDR2];
    let balances = accounts.iter().map(|a| ledger.balance_of(a)).collect();
    let allowances = accounts
        .iter()
        .flat_map(|o| accounts.iter().map(move |s| (*o, *s)))
        .map(|(o, s)| ledger.allowance(&o, &s))
        .collect();
    (balances, allowances, ledger.total_supply().clone(), ledger.events().len())
}

// ---------------------------------------------------------------------------
// Deployment and metadata
// ---------------------------------------------------------------------------

#[test]
fn deploy_credits_owner_and_logs_mint() {
    let ledger = deploy(1_000_000);
    assert_eq!(ledger.name(), "Test Token");
    assert_eq!(ledger.symbol(), "TST");
    assert_eq!(ledger.decimals(), 18);
    assert_eq!(ledger.total_supply(), &amt(1_000_000));
    assert_eq!(ledger.balance_of(&OWNER), amt(1_000_000));
    assert_eq!(ledger.admin(), &OWNER);

    let entries = ledger.events().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].event,
        TokenEvent::Transfer {
            from: AccountId::NULL,
            to: OWNER,
            value: amt(1_000_000),
        }
    );
}

#[test]
fn deploy_with_zero_supply_logs_nothing() {
    let ledger = deploy(0);
    assert!(ledger.total_supply().is_zero());
    assert!(ledger.events().is_empty());
}

#[test]
fn deploy_from_null_identifier_is_rejected() {
    let result = TokenLedger::new(AccountId::NULL, TokenMetadata::new("T", "T", 18), amt(1));
    assert!(matches!(result, Err(TokenError::ZeroAddressTarget)));
}

#[test]
fn unknown_accounts_read_as_zero() {
    let ledger = deploy(10);
    assert!(ledger.balance_of(&ADDR2).is_zero());
    assert!(ledger.allowance(&ADDR1, &ADDR2).is_zero());
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_simple_transfer() {
    let mut ledger = deploy(1_000_000);
    let receipt = ledger.transfer(OWNER, ADDR1, amt(100)).unwrap();
    assert!(receipt.success);
    assert_eq!(ledger.balance_of(&OWNER), amt(999_900));
    assert_eq!(ledger.balance_of(&ADDR1), amt(100));
    assert_eq!(
        receipt.event(),
        Some(&TokenEvent::Transfer {
            from: OWNER,
            to: ADDR1,
            value: amt(100),
        })
    );
}

#[test]
fn scenario_b_transfer_from_beyond_allowance() {
    let mut ledger = deploy(1_000_000);
    let _ = ledger.approve(OWNER, ADDR1, amt(100)).unwrap();
    let before = fingerprint(&ledger);

    let err = ledger.transfer_from(ADDR1, OWNER, ADDR2, amt(150)).unwrap_err();
    assert!(matches!(err, TokenError::InsufficientAllowance { .. }));
    assert_eq!(fingerprint(&ledger), before);
    assert_eq!(ledger.allowance(&OWNER, &ADDR1), amt(100));
}

#[test]
fn scenario_c_decrease_allowance_underflow() {
    let mut ledger = deploy(1_000_000);
    let _ = ledger.approve(OWNER, ADDR1, amt(50)).unwrap();
    let err = ledger.decrease_allowance(OWNER, ADDR1, amt(100)).unwrap_err();
    assert!(matches!(err, TokenError::AllowanceUnderflow { .. }));
    assert_eq!(ledger.allowance(&OWNER, &ADDR1), amt(50));
}

#[test]
fn scenario_d_burn_more_than_balance() {
    let mut ledger = deploy(1_000_000);
    let before = fingerprint(&ledger);
    let err = ledger.burn(ADDR1, amt(1)).unwrap_err();
    assert!(matches!(err, TokenError::InsufficientBalance { .. }));
    assert_eq!(ledger.total_supply(), &amt(1_000_000));
    assert_eq!(fingerprint(&ledger), before);
}

// ---------------------------------------------------------------------------
// Transfers
// ---------------------------------------------------------------------------

#[test]
fn zero_amount_calls_succeed_and_still_emit() {
    let mut ledger = deploy(500);
    let t = ledger.transfer(OWNER, ADDR1, amt(0)).unwrap();
    let a = ledger.approve(OWNER, ADDR1, amt(0)).unwrap();
    assert_eq!(ledger.balance_of(&OWNER), amt(500));
    assert!(ledger.balance_of(&ADDR1).is_zero());
    assert_eq!(t.event().map(TokenEvent::value), Some(&amt(0)));
    assert_eq!(a.event().map(TokenEvent::value), Some(&amt(0)));
    assert_eq!(ledger.events().len(), 3);
}

#[test]
fn zero_amount_transfer_from_empty_account() {
    let mut ledger = deploy(500);
    let receipt = ledger.transfer(ADDR2, ADDR1, amt(0)).unwrap();
    assert_eq!(receipt.events.len(), 1);
}

#[test]
fn transfer_to_null_identifier_is_rejected() {
    let mut ledger = deploy(500);
    let before = fingerprint(&ledger);
    let err = ledger.transfer(OWNER, AccountId::NULL, amt(1)).unwrap_err();
    assert!(matches!(err, TokenError::ZeroAddressTarget));
    assert_eq!(fingerprint(&ledger), before);
}

#[test]
fn transfer_of_entire_balance() {
    let mut ledger = deploy(500);
    let _ = ledger.transfer(OWNER, ADDR1, amt(500)).unwrap();
    assert!(ledger.balance_of(&OWNER).is_zero());
    assert_eq!(ledger.accounts().holder_count(), 1);
    let err = ledger.transfer(OWNER, ADDR1, amt(1)).unwrap_err();
    assert!(matches!(err, TokenError::InsufficientBalance { .. }));
}

#[test]
fn self_transfer_keeps_balance_and_emits() {
    let mut ledger = deploy(500);
    let receipt = ledger.transfer(OWNER, OWNER, amt(200)).unwrap();
    assert_eq!(ledger.balance_of(&OWNER), amt(500));
    assert_eq!(
        receipt.event(),
        Some(&TokenEvent::Transfer {
            from: OWNER,
            to: OWNER,
            value: amt(200),
        })
    );
    let err = ledger.transfer(OWNER, OWNER, amt(501)).unwrap_err();
    assert!(matches!(err, TokenError::InsufficientBalance { .. }));
}

#[test]
fn chain_of_transfers_conserves_supply() {
    let mut ledger = deploy(1_000);
    let _ = ledger.transfer(OWNER, ADDR1, amt(400)).unwrap();
    let _ = ledger.transfer(ADDR1, ADDR2, amt(150)).unwrap();
    let _ = ledger.transfer(ADDR2, OWNER, amt(50)).unwrap();
    assert_eq!(ledger.balance_of(&OWNER), amt(650));
    assert_eq!(ledger.balance_of(&ADDR1), amt(250));
    assert_eq!(ledger.balance_of(&ADDR2), amt(100));
    ledger.audit().unwrap();
}

// ---------------------------------------------------------------------------
// Allowances
// ---------------------------------------------------------------------------

#[test]
fn approve_overwrites_previous_value() {
    let mut ledger = deploy(1_000);
    let _ = ledger.approve(OWNER, ADDR1, amt(300)).unwrap();
    let _ = ledger.approve(OWNER, ADDR1, amt(20)).unwrap();
    assert_eq!(ledger.allowance(&OWNER, &ADDR1), amt(20));
}

#[test]
fn approve_null_spender_is_rejected() {
    let mut ledger = deploy(1_000);
    let err = ledger.approve(OWNER, AccountId::NULL, amt(1)).unwrap_err();
    assert!(matches!(err, TokenError::ZeroAddressTarget));
    assert_eq!(ledger.events().len(), 1);
}

#[test]
fn multiple_spenders_are_independent() {
    let mut ledger = deploy(1_000);
    let _ = ledger.approve(OWNER, ADDR1, amt(100)).unwrap();
    let _ = ledger.approve(OWNER, ADDR2, amt(200)).unwrap();
    let _ = ledger.transfer_from(ADDR1, OWNER, ADDR1, amt(60)).unwrap();
    assert_eq!(ledger.allowance(&OWNER, &ADDR1), amt(40));
    assert_eq!(ledger.allowance(&OWNER, &ADDR2), amt(200));
    assert_eq!(ledger.allowances().grants_by(&OWNER).count(), 2);
}

#[test]
fn transfer_from_spends_allowance_and_moves_balance() {
    let mut ledger = deploy(1_000);
    let _ = ledger.approve(OWNER, ADDR1, amt(300)).unwrap();
    let receipt = ledger.transfer_from(ADDR1, OWNER, ADDR2, amt(120)).unwrap();
    assert_eq!(ledger.balance_of(&OWNER), amt(880));
    assert_eq!(ledger.balance_of(&ADDR2), amt(120));
    assert!(ledger.balance_of(&ADDR1).is_zero());
    assert_eq!(ledger.allowance(&OWNER, &ADDR1), amt(180));
    assert_eq!(
        receipt.emitted(),
        vec![&TokenEvent::Transfer {
            from: OWNER,
            to: ADDR2,
            value: amt(120),
        }]
    );
}

#[test]
fn transfer_from_with_allowance_but_no_balance() {
    let mut ledger = deploy(1_000);
    let _ = ledger.approve(ADDR2, ADDR1, amt(300)).unwrap();
    let before = fingerprint(&ledger);
    let err = ledger.transfer_from(ADDR1, ADDR2, OWNER, amt(1)).unwrap_err();
    assert!(matches!(err, TokenError::InsufficientBalance { .. }));
    assert_eq!(fingerprint(&ledger), before);
}

#[test]
fn transfer_from_checks_target_before_allowance() {
    let mut ledger = deploy(1_000);
    let err = ledger
        .transfer_from(ADDR1, OWNER, AccountId::NULL, amt(5))
        .unwrap_err();
    assert!(matches!(err, TokenError::ZeroAddressTarget));
}

#[test]
fn unlimited_allowance_is_never_consumed() {
    let mut ledger = deploy(1_000);
    let _ = ledger.approve(OWNER, ADDR1, UNLIMITED_ALLOWANCE.clone()).unwrap();
    for _ in 0..5 {
        let _ = ledger.transfer_from(ADDR1, OWNER, ADDR2, amt(100)).unwrap();
    }
    assert_eq!(ledger.allowance(&OWNER, &ADDR1), *UNLIMITED_ALLOWANCE);
    assert_eq!(ledger.balance_of(&ADDR2), amt(500));
}

#[test]
fn increase_and_decrease_report_new_total() {
    let mut ledger = deploy(1_000);
    let up = ledger.increase_allowance(OWNER, ADDR1, amt(70)).unwrap();
    assert_eq!(
        up.event(),
        Some(&TokenEvent::Approval {
            owner: OWNER,
            spender: ADDR1,
            value: amt(70),
        })
    );
    let up = ledger.increase_allowance(OWNER, ADDR1, amt(30)).unwrap();
    assert_eq!(up.event().map(TokenEvent::value), Some(&amt(100)));
    let down = ledger.decrease_allowance(OWNER, ADDR1, amt(100)).unwrap();
    assert_eq!(down.event().map(TokenEvent::value), Some(&amt(0)));
    assert!(ledger.allowances().is_empty());
}

#[test]
fn increase_past_max_overflows() {
    let mut ledger = deploy(1_000);
    let _ = ledger.approve(OWNER, ADDR1, TokenAmount::max()).unwrap();
    let err = ledger.increase_allowance(OWNER, ADDR1, amt(1)).unwrap_err();
    assert!(matches!(err, TokenError::ArithmeticOverflow));
    assert!(ledger.allowance(&OWNER, &ADDR1).is_max());
}

// ---------------------------------------------------------------------------
// Mint and burn
// ---------------------------------------------------------------------------

#[test]
fn open_mint_lets_anyone_create_tokens() {
    let mut ledger = deploy(1_000);
    let receipt = ledger.mint(ADDR2, ADDR1, amt(250)).unwrap();
    assert_eq!(ledger.total_supply(), &amt(1_250));
    assert_eq!(ledger.balance_of(&ADDR1), amt(250));
    assert_eq!(
        receipt.event(),
        Some(&TokenEvent::Transfer {
            from: AccountId::NULL,
            to: ADDR1,
            value: amt(250),
        })
    );
}

#[test]
fn mint_to_null_identifier_is_rejected() {
    let mut ledger = deploy(1_000);
    let err = ledger.mint(OWNER, AccountId::NULL, amt(1)).unwrap_err();
    assert!(matches!(err, TokenError::ZeroAddressTarget));
}

#[test]
fn mint_past_max_supply_overflows() {
    let mut ledger = deploy(0);
    let _ = ledger.mint(OWNER, OWNER, TokenAmount::max()).unwrap();
    let before = fingerprint(&ledger);
    let err = ledger.mint(OWNER, ADDR1, amt(1)).unwrap_err();
    assert!(matches!(err, TokenError::ArithmeticOverflow));
    assert_eq!(fingerprint(&ledger), before);
}

#[test]
fn admin_only_mint_rejects_others() {
    let mut ledger = deploy(1_000).with_mint_policy(MintPolicy::AdminOnly);
    let err = ledger.mint(ADDR1, ADDR1, amt(5)).unwrap_err();
    assert!(matches!(err, TokenError::Unauthorized { caller, .. } if caller == ADDR1));
    let _ = ledger.mint(OWNER, ADDR1, amt(5)).unwrap();
    assert_eq!(ledger.balance_of(&ADDR1), amt(5));
}

#[test]
fn transferred_admin_role_carries_mint_rights() {
    let mut ledger = deploy(1_000).with_mint_policy(MintPolicy::AdminOnly);
    let receipt = ledger.transfer_admin(OWNER, ADDR1).unwrap();
    assert!(receipt.events.is_empty());
    assert!(ledger.mint(OWNER, OWNER, amt(1)).is_err());
    let _ = ledger.mint(ADDR1, ADDR2, amt(1)).unwrap();
    assert!(matches!(
        ledger.transfer_admin(OWNER, OWNER),
        Err(TokenError::Unauthorized { .. })
    ));
}

#[test]
fn burn_reduces_supply_and_logs_to_null() {
    let mut ledger = deploy(1_000);
    let receipt = ledger.burn(OWNER, amt(400)).unwrap();
    assert_eq!(ledger.total_supply(), &amt(600));
    assert_eq!(ledger.balance_of(&OWNER), amt(600));
    assert_eq!(
        receipt.event(),
        Some(&TokenEvent::Transfer {
            from: OWNER,
            to: AccountId::NULL,
            value: amt(400),
        })
    );
}

#[test]
fn burn_from_spends_allowance() {
    let mut ledger = deploy(1_000);
    let _ = ledger.approve(OWNER, ADDR1, amt(300)).unwrap();
    let _ = ledger.burn_from(ADDR1, OWNER, amt(200)).unwrap();
    assert_eq!(ledger.total_supply(), &amt(800));
    assert_eq!(ledger.allowance(&OWNER, &ADDR1), amt(100));

    let before = fingerprint(&ledger);
    let err = ledger.burn_from(ADDR1, OWNER, amt(101)).unwrap_err();
    assert!(matches!(err, TokenError::InsufficientAllowance { .. }));
    assert_eq!(fingerprint(&ledger), before);
}

#[test]
fn burn_from_with_allowance_but_no_balance() {
    let mut ledger = deploy(1_000);
    let _ = ledger.approve(ADDR2, ADDR1, amt(300)).unwrap();
    let before = fingerprint(&ledger);
    let err = ledger.burn_from(ADDR1, ADDR2, amt(1)).unwrap_err();
    assert!(matches!(err, TokenError::InsufficientBalance { .. }));
    assert_eq!(ledger.allowance(&ADDR2, &ADDR1), amt(300));
    assert_eq!(ledger.total_supply(), &amt(1_000));
    assert_eq!(fingerprint(&ledger), before);
}

#[test]
fn burn_from_with_unlimited_allowance() {
    let mut ledger = deploy(1_000);
    let _ = ledger.approve(OWNER, ADDR1, UNLIMITED_ALLOWANCE.clone()).unwrap();
    let _ = ledger.burn_from(ADDR1, OWNER, amt(1_000)).unwrap();
    assert!(ledger.total_supply().is_zero());
    assert!(ledger.allowance(&OWNER, &ADDR1).is_max());
}

// ---------------------------------------------------------------------------
// Faucet
// ---------------------------------------------------------------------------

#[test]
fn faucet_claims_respect_interval() {
    let mut ledger = deploy(0).with_faucet(FaucetConfig {
        amount: amt(10),
        interval_secs: 60,
    });
    let _ = ledger.claim(ADDR1, Timestamp::new(1_000)).unwrap();
    let err = ledger.claim(ADDR1, Timestamp::new(1_059)).unwrap_err();
    assert!(matches!(err, TokenError::FaucetCooldown { retry_at } if retry_at == Timestamp::new(1_060)));
    let _ = ledger.claim(ADDR2, Timestamp::new(1_059)).unwrap();
    let _ = ledger.claim(ADDR1, Timestamp::new(1_060)).unwrap();
    assert_eq!(ledger.balance_of(&ADDR1), amt(20));
    assert_eq!(ledger.total_supply(), &amt(30));
}

#[test]
fn claim_without_faucet_is_rejected() {
    let mut ledger = deploy(0);
    assert!(matches!(
        ledger.claim(ADDR1, Timestamp::new(1)),
        Err(TokenError::FaucetDisabled)
    ));
    assert!(ledger.events().is_empty());
}

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

#[test]
fn event_log_is_gapless_and_in_call_order() {
    let mut ledger = deploy(1_000);
    let _ = ledger.transfer(OWNER, ADDR1, amt(1)).unwrap();
    let _ = ledger.transfer(OWNER, AccountId::NULL, amt(1)).unwrap_err();
    let _ = ledger.approve(OWNER, ADDR2, amt(2)).unwrap();
    let _ = ledger.burn(ADDR1, amt(1)).unwrap();

    let seqs: Vec<u64> = ledger.events().entries().iter().map(|r| r.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2, 3]);
    let names: Vec<&str> = ledger
        .events()
        .entries()
        .iter()
        .map(|r| r.event.name())
        .collect();
    assert_eq!(names, vec!["Transfer", "Transfer", "Approval", "Transfer"]);
    assert_eq!(ledger.events().transfers_of(&ADDR1).count(), 2);
    assert_eq!(ledger.events().since(2).len(), 2);
}

#[test]
fn execute_runs_a_decoded_script() {
    let mut ledger = deploy(1_000);
    let calls: Vec<(AccountId, Call)> = vec![
        (OWNER, Call::Approve { spender: ADDR1, amount: amt(50) }),
        (
            ADDR1,
            Call::TransferFrom {
                from: OWNER,
                to: ADDR2,
                amount: amt(50),
            },
        ),
        (ADDR2, Call::Burn { amount: amt(10) }),
    ];
    for (caller, call) in calls {
        let _ = ledger.execute(caller, call, Timestamp::EPOCH).unwrap();
    }
    assert_eq!(ledger.balance_of(&ADDR2), amt(40));
    assert_eq!(ledger.total_supply(), &amt(990));
    ledger.audit().unwrap();
}
