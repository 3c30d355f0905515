use proptest::prelude::*;

use rebase_ledger::{AccrualLedger, MemoryLedger};
use rebase_types::{Address, Timestamp, FULL_BALANCE};

fn holder(n: u8) -> Address {
    Address::new(format!("holder-{n}"))
}

proptest! {
    /// Effective balance must monotonically increase with time (no mutations).
    #[test]
    fn accrual_is_monotonic(
        principal in 1u128..1_000_000_000,
        rate in 1u128..1_000_000_000_000,
        t1 in 1u64..1_000_000,
        t2_offset in 1u64..100_000,
    ) {
        let mut ledger = AccrualLedger::with_rate(MemoryLedger::new(), rate);
        ledger.fund(&holder(1), principal, rate, Timestamp::new(0)).unwrap();
        let b1 = ledger.effective_balance_of(&holder(1), Timestamp::new(t1)).unwrap();
        let b2 = ledger.effective_balance_of(&holder(1), Timestamp::new(t1 + t2_offset)).unwrap();
        prop_assert!(b2 >= b1, "balance must not decrease: b1={}, b2={}", b1, b2);
    }

    /// Equal intervals yield equal deltas (linear, non-compounding), within
    /// a rounding tolerance of 1 raw unit.
    #[test]
    fn growth_is_linear(
        principal in 1u128..1_000_000_000,
        rate in 1u128..1_000_000_000_000,
        start in 0u64..1_000_000,
        interval in 1u64..100_000,
    ) {
        let mut ledger = AccrualLedger::with_rate(MemoryLedger::new(), rate);
        ledger.fund(&holder(1), principal, rate, Timestamp::new(start)).unwrap();
        let b0 = ledger.effective_balance_of(&holder(1), Timestamp::new(start)).unwrap();
        let b1 = ledger.effective_balance_of(&holder(1), Timestamp::new(start + interval)).unwrap();
        let b2 = ledger.effective_balance_of(&holder(1), Timestamp::new(start + 2 * interval)).unwrap();
        let d1 = b1 - b0;
        let d2 = b2 - b1;
        let diff = d1.abs_diff(d2);
        prop_assert!(diff <= 1, "interval deltas differ by {}: d1={}, d2={}", diff, d1, d2);
    }

    /// Effective balance never drops below settled principal.
    #[test]
    fn effective_at_least_principal(
        principal in 0u128..1_000_000_000,
        rate in 0u128..1_000_000_000_000,
        at in 0u64..1_000_000,
    ) {
        let mut ledger = AccrualLedger::with_rate(MemoryLedger::new(), rate);
        ledger.fund(&holder(1), principal, rate, Timestamp::new(0)).unwrap();
        let effective = ledger.effective_balance_of(&holder(1), Timestamp::new(at)).unwrap();
        prop_assert!(effective >= ledger.principal_of(&holder(1)));
    }

    /// Settlement must not change the effective balance.
    #[test]
    fn settlement_preserves_value(
        principal in 1u128..1_000_000_000,
        rate in 1u128..1_000_000_000_000,
        at in 1u64..1_000_000,
    ) {
        let mut ledger = AccrualLedger::with_rate(MemoryLedger::new(), rate);
        ledger.fund(&holder(1), principal, rate, Timestamp::new(0)).unwrap();
        let now = Timestamp::new(at);
        let before = ledger.effective_balance_of(&holder(1), now).unwrap();
        ledger.settle(&holder(1), now).unwrap();
        let after = ledger.effective_balance_of(&holder(1), now).unwrap();
        prop_assert_eq!(before, after, "settlement changed spendable value");
    }

    /// Any attempted global-rate increase fails and leaves the rate unchanged.
    #[test]
    fn global_rate_never_increases(
        initial in 0u128..1_000_000_000_000,
        bump in 1u128..1_000_000,
    ) {
        let mut ledger = AccrualLedger::with_rate(MemoryLedger::new(), initial);
        let result = ledger.set_global_rate(initial + bump);
        prop_assert!(result.is_err());
        prop_assert_eq!(ledger.global_rate(), initial);
    }

    /// A transfer conserves the sum of both endpoints' effective balances
    /// at the transfer instant.
    #[test]
    fn transfer_conserves_value(
        p1 in 1u128..1_000_000_000,
        p2 in 0u128..1_000_000_000,
        rate in 1u128..1_000_000_000_000,
        at in 1u64..1_000_000,
        frac in 0u64..=100,
    ) {
        let mut ledger = AccrualLedger::with_rate(MemoryLedger::new(), rate);
        ledger.fund(&holder(1), p1, rate, Timestamp::new(0)).unwrap();
        if p2 > 0 {
            ledger.fund(&holder(2), p2, rate, Timestamp::new(0)).unwrap();
        }
        let now = Timestamp::new(at);
        let b1 = ledger.effective_balance_of(&holder(1), now).unwrap();
        let b2 = ledger.effective_balance_of(&holder(2), now).unwrap();
        let amount = b1 * frac as u128 / 100;
        ledger.move_value(&holder(1), &holder(2), amount, now).unwrap();
        let a1 = ledger.effective_balance_of(&holder(1), now).unwrap();
        let a2 = ledger.effective_balance_of(&holder(2), now).unwrap();
        prop_assert_eq!(b1 + b2, a1 + a2, "transfer changed total value");
    }

    /// Full-balance withdrawal leaves nothing behind, and the debited
    /// amount equals the pre-withdrawal effective balance.
    #[test]
    fn full_withdrawal_empties_holder(
        principal in 1u128..1_000_000_000,
        rate in 1u128..1_000_000_000_000,
        at in 1u64..1_000_000,
    ) {
        let mut ledger = AccrualLedger::with_rate(MemoryLedger::new(), rate);
        ledger.fund(&holder(1), principal, rate, Timestamp::new(0)).unwrap();
        let now = Timestamp::new(at);
        let effective = ledger.effective_balance_of(&holder(1), now).unwrap();
        let resolved = ledger.withdraw(&holder(1), FULL_BALANCE, now).unwrap();
        prop_assert_eq!(resolved, effective);
        prop_assert_eq!(ledger.principal_of(&holder(1)), 0);
        prop_assert_eq!(ledger.effective_balance_of(&holder(1), Timestamp::new(at + 1000)).unwrap(), 0);
    }

    /// Snapshot round-trip is lossless.
    #[test]
    fn snapshot_roundtrip(
        principal in 1u128..1_000_000_000,
        rate in 1u128..1_000_000_000_000,
        at in 1u64..1_000_000,
    ) {
        let mut ledger = AccrualLedger::with_rate(MemoryLedger::new(), rate);
        ledger.fund(&holder(1), principal, rate, Timestamp::new(0)).unwrap();
        ledger.settle(&holder(1), Timestamp::new(at)).unwrap();

        let bytes = ledger.to_bytes().unwrap();
        let restored: AccrualLedger<MemoryLedger> = AccrualLedger::from_bytes(&bytes).unwrap();
        let later = Timestamp::new(at + 12_345);
        prop_assert_eq!(
            restored.effective_balance_of(&holder(1), later).unwrap(),
            ledger.effective_balance_of(&holder(1), later).unwrap()
        );
    }
}
