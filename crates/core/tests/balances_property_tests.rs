//! Property-based integration tests for the cross-company balance merge.

use cari_core::aging::{AgingRecord, CompanyAging};
use cari_core::balances::{merge_balances, MergedBalance, OverdueDetail};
use cari_core::filters::{filter_balances, BalanceSign, FilterState};
use cari_core::names::NameDirectory;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

// =============================================================================
// Generators
// =============================================================================

/// Amounts with two decimal places, zero and negatives included.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        6 => (-10_000_000i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

fn arb_code() -> impl Strategy<Value = String> {
    "A00[0-9]"
}

fn arb_record() -> impl Strategy<Value = AgingRecord> {
    (
        arb_code(),
        arb_amount(),
        arb_amount(),
        arb_amount(),
        -30i32..400,
        0i32..120,
    )
        .prop_map(
            |(code, balance, overdue, not_yet_due, days, threshold)| AgingRecord {
                account_code: Some(code),
                name: None,
                balance,
                overdue_amount: overdue.abs(),
                not_yet_due: not_yet_due.abs(),
                days_overdue: days,
                threshold_days: threshold,
            },
        )
}

fn arb_blank_record() -> impl Strategy<Value = AgingRecord> {
    let blank_code = prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("  ".to_string())),
    ];
    (blank_code, arb_amount())
        .prop_map(|(account_code, balance)| AgingRecord {
            account_code,
            balance,
            ..Default::default()
        })
}

/// Between one and five companies with distinct ids.
fn arb_companies() -> impl Strategy<Value = Vec<CompanyAging>> {
    proptest::collection::vec(proptest::collection::vec(arb_record(), 0..12), 1..=5).prop_map(
        |lists| {
            lists
                .into_iter()
                .enumerate()
                .map(|(i, records)| CompanyAging::new(format!("C{}", i + 1), records))
                .collect()
        },
    )
}

/// Order-independent projection of a merge result.
fn by_code(
    merged: &[MergedBalance],
) -> BTreeMap<String, (Decimal, BTreeMap<String, Decimal>, Decimal, OverdueDetail)> {
    merged
        .iter()
        .map(|m| {
            (
                m.account_code.clone(),
                (
                    m.total_balance,
                    m.company_balances.clone(),
                    m.overdue_balance,
                    m.overdue.clone(),
                ),
            )
        })
        .collect()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The total always equals the exact sum of per-company contributions,
    /// and each contribution equals the sum of that company's rows.
    #[test]
    fn prop_total_equals_sum_of_contributions(companies in arb_companies()) {
        let merged = merge_balances(&companies, &NameDirectory::new());

        for balance in &merged {
            let sum: Decimal = balance.company_balances.values().copied().sum();
            prop_assert_eq!(balance.total_balance, sum);

            for company in &companies {
                let expected: Decimal = company
                    .records
                    .iter()
                    .filter(|r| r.join_key() == Some(balance.account_code.as_str()))
                    .map(|r| r.balance)
                    .sum();
                let reported = company
                    .records
                    .iter()
                    .any(|r| r.join_key() == Some(balance.account_code.as_str()));
                prop_assert_eq!(
                    balance.company_balance(&company.company_id),
                    reported.then_some(expected)
                );
            }
        }
    }

    /// Company processing order does not change the result set or any total.
    #[test]
    fn prop_merge_is_commutative(
        (companies, shuffled) in arb_companies()
            .prop_flat_map(|c| (Just(c.clone()), Just(c).prop_shuffle()))
    ) {
        let names = NameDirectory::new();
        let original = merge_balances(&companies, &names);
        let permuted = merge_balances(&shuffled, &names);

        prop_assert_eq!(by_code(&original), by_code(&permuted));
    }

    /// Output is sorted by descending absolute total.
    #[test]
    fn prop_sorted_by_absolute_total(companies in arb_companies()) {
        let merged = merge_balances(&companies, &NameDirectory::new());
        for pair in merged.windows(2) {
            prop_assert!(pair[0].total_balance.abs() >= pair[1].total_balance.abs());
        }
    }

    /// A company whose rows all lack an account code changes nothing.
    #[test]
    fn prop_blank_code_company_is_noop(
        companies in arb_companies(),
        blanks in proptest::collection::vec(arb_blank_record(), 0..10)
    ) {
        let names = NameDirectory::new();
        let baseline = merge_balances(&companies, &names);

        let mut with_blanks = companies.clone();
        with_blanks.push(CompanyAging::new("CX", blanks));
        prop_assert_eq!(merge_balances(&with_blanks, &names), baseline);
    }

    /// Merging is a pure function: running it twice yields identical output.
    #[test]
    fn prop_merge_is_idempotent(companies in arb_companies()) {
        let names = NameDirectory::new();
        prop_assert_eq!(
            merge_balances(&companies, &names),
            merge_balances(&companies, &names)
        );
    }

    /// Independent filters give the same subset in either order.
    #[test]
    fn prop_independent_filters_commute(
        companies in arb_companies(),
        company_pick in 1usize..=5,
        sign in prop_oneof![
            Just(BalanceSign::All),
            Just(BalanceSign::Positive),
            Just(BalanceSign::Negative),
            Just(BalanceSign::Overdue),
        ],
        search in "[0-9]{0,2}"
    ) {
        let merged = merge_balances(&companies, &NameDirectory::new());
        let filters = [
            FilterState { company_id: Some(format!("C{}", company_pick)), ..Default::default() },
            FilterState { balance_sign: sign, ..Default::default() },
            FilterState { search, ..Default::default() },
        ];

        for first in &filters {
            for second in &filters {
                let a = filter_balances(&filter_balances(&merged, first), second);
                let b = filter_balances(&filter_balances(&merged, second), first);
                prop_assert_eq!(a, b);
            }
        }
    }
}
