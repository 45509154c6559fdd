//! Property-based tests for the stock ledger math and pagination metadata.
//!
//! These tests use proptest to verify invariants across a wide range of
//! inputs, helping to catch edge cases that unit tests might miss.

use medledger_api::entities::transaction::TransactionType;
use medledger_api::handlers::common::PageMeta;
use medledger_api::services::ledger::compute_new_stock;
use proptest::prelude::*;

// Strategies for generating test data
fn stock_strategy() -> impl Strategy<Value = i32> {
    0i32..1_000_000
}

fn quantity_strategy() -> impl Strategy<Value = i32> {
    1i32..1_000_000
}

fn transaction_type_strategy() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::Checkout),
        Just(TransactionType::Return),
        Just(TransactionType::Waste),
    ]
}

// Property: stock arithmetic never produces a negative balance
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn checkout_never_drives_stock_negative(
        stock in stock_strategy(),
        quantity in quantity_strategy(),
    ) {
        match compute_new_stock(stock, TransactionType::Checkout, quantity) {
            Ok(Some(new_stock)) => {
                prop_assert_eq!(new_stock, stock - quantity);
                prop_assert!(new_stock >= 0, "stock went negative: {}", new_stock);
            }
            Ok(None) => prop_assert!(false, "checkout must always produce a stock value"),
            Err(_) => prop_assert!(
                quantity > stock,
                "checkout of {} from {} should have succeeded",
                quantity,
                stock
            ),
        }
    }

    #[test]
    fn checkout_succeeds_exactly_when_stock_covers_quantity(
        stock in stock_strategy(),
        quantity in quantity_strategy(),
    ) {
        let result = compute_new_stock(stock, TransactionType::Checkout, quantity);
        prop_assert_eq!(result.is_ok(), quantity <= stock);
    }

    #[test]
    fn return_always_increases_stock(
        stock in stock_strategy(),
        quantity in quantity_strategy(),
    ) {
        let new_stock = compute_new_stock(stock, TransactionType::Return, quantity)
            .expect("returns never fail")
            .expect("returns always produce a stock value");
        prop_assert_eq!(new_stock, stock + quantity);
        prop_assert!(new_stock > stock);
    }

    #[test]
    fn waste_never_touches_stock(
        stock in stock_strategy(),
        quantity in quantity_strategy(),
    ) {
        let result = compute_new_stock(stock, TransactionType::Waste, quantity)
            .expect("waste never fails");
        prop_assert_eq!(result, None);
    }

    #[test]
    fn successful_transactions_leave_stock_non_negative(
        stock in stock_strategy(),
        quantity in quantity_strategy(),
        r#type in transaction_type_strategy(),
    ) {
        if let Ok(Some(new_stock)) = compute_new_stock(stock, r#type, quantity) {
            prop_assert!(new_stock >= 0, "stock went negative: {}", new_stock);
        }
    }
}

// Property: pagination metadata always covers the full result set
proptest! {
    #[test]
    fn total_pages_covers_every_row(
        page in 1u64..1_000,
        limit in 1u64..=100,
        total in 0u64..10_000,
    ) {
        let meta = PageMeta::new(page, limit, total);

        prop_assert!(
            meta.total_pages * limit >= total,
            "pages {} x limit {} cannot hold {} rows",
            meta.total_pages,
            limit,
            total
        );

        if total == 0 {
            prop_assert_eq!(meta.total_pages, 0);
        } else {
            // The last page is never empty
            prop_assert!((meta.total_pages - 1) * limit < total);
        }
    }

    #[test]
    fn meta_echoes_the_requested_window(
        page in 1u64..1_000,
        limit in 1u64..=100,
        total in 0u64..10_000,
    ) {
        let meta = PageMeta::new(page, limit, total);
        prop_assert_eq!(meta.page, page);
        prop_assert_eq!(meta.limit, limit);
        prop_assert_eq!(meta.total, total);
    }
}
