#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use fungible_token::{Call, FaucetConfig, TokenLedger, TokenMetadata, UNLIMITED_ALLOWANCE};
use fungible_types::{AccountId, Timestamp, TokenAmount};

#[derive(Arbitrary, Debug)]
enum Amount {
    Small(u16),
    Wide(u128),
    Unlimited,
}

impl Amount {
    fn to_amount(&self) -> TokenAmount {
        match self {
            Amount::Small(n) => TokenAmount::from(u64::from(*n)),
            Amount::Wide(n) => TokenAmount::from(*n),
            Amount::Unlimited => UNLIMITED_ALLOWANCE.clone(),
        }
    }
}

#[derive(Arbitrary, Debug)]
enum Op {
    Transfer(u8, Amount),
    Approve(u8, Amount),
    TransferFrom(u8, u8, Amount),
    IncreaseAllowance(u8, Amount),
    DecreaseAllowance(u8, Amount),
    Mint(u8, Amount),
    Burn(Amount),
    BurnFrom(u8, Amount),
    Claim,
    TransferAdmin(u8),
}

// Six accounts; 0 is the null identifier.
fn account(i: u8) -> AccountId {
    match i % 6 {
        0 => AccountId::NULL,
        n => AccountId::from_low_u64(u64::from(n)),
    }
}

impl Op {
    fn into_call(self) -> Call {
        match self {
            Op::Transfer(to, a) => Call::Transfer { to: account(to), amount: a.to_amount() },
            Op::Approve(s, a) => Call::Approve { spender: account(s), amount: a.to_amount() },
            Op::TransferFrom(f, t, a) => Call::TransferFrom {
                from: account(f),
                to: account(t),
                amount: a.to_amount(),
            },
            Op::IncreaseAllowance(s, a) => Call::IncreaseAllowance { spender: account(s), delta: a.to_amount() },
            Op::DecreaseAllowance(s, a) => Call::DecreaseAllowance { spender: account(s), delta: a.to_amount() },
            Op::Mint(to, a) => Call::Mint { to: account(to), amount: a.to_amount() },
            Op::Burn(a) => Call::Burn { amount: a.to_amount() },
            Op::BurnFrom(o, a) => Call::BurnFrom { owner: account(o), amount: a.to_amount() },
            Op::Claim => Call::Claim,
            Op::TransferAdmin(n) => Call::TransferAdmin { new_admin: account(n) },
        }
    }
}

// Run arbitrary call sequences and check that no call panics, balances
// always sum to the supply, and rejected calls log nothing.
fuzz_target!(|input: (u64, Vec<(u8, u16, Op)>)| {
    let (supply, steps) = input;
    let Ok(mut ledger) = TokenLedger::new(
        account(1),
        TokenMetadata::new("Fuzz", "FZZ", 18),
        TokenAmount::from(supply),
    ) else {
        return;
    };
    ledger = ledger.with_faucet(FaucetConfig {
        amount: TokenAmount::from(10u64),
        interval_secs: 60,
    });

    let mut now = 0u64;
    for (caller, elapsed, op) in steps {
        now = now.saturating_add(u64::from(elapsed));
        let logged = ledger.events().len();
        let result = ledger.execute(account(caller), op.into_call(), Timestamp::new(now));
        if result.is_err() {
            assert_eq!(ledger.events().len(), logged);
        }
        assert!(ledger.audit().is_ok());
    }
});
