//! 并发分析测试 - one shared manager, many threads, different carts

use discount_engine::{DiscountManager, InMemoryDiscountStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::models::DiscountRule;
use shared::order::{CartLine, CartSnapshot};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const RUNS_PER_THREAD: usize = 200;

fn make_manager() -> DiscountManager {
    let store = InMemoryDiscountStore::new(vec![
        DiscountRule::over_price_percent(1, "over 100", dec!(100), dec!(10)),
        DiscountRule::free_piece_by_category(2, "books 3+1", 3, 3, 1),
        DiscountRule::cheapest_percent_by_category(3, "toys 20%", 7, 2, dec!(20)),
    ]);
    DiscountManager::with_default_policy(Arc::new(store))
}

fn cart_for(seed: usize) -> CartSnapshot {
    let books = (seed % 7) as i32;
    let toys = (seed % 4) as i32;
    CartSnapshot::new(vec![
        CartLine::new(1, 3, dec!(12.40), books),
        CartLine::new(2, 7, dec!(19.90), toys),
        CartLine::new(3, None, Decimal::from(seed as i64 % 90), 1),
    ])
}

#[test]
fn concurrent_analyses_match_sequential_results() {
    let manager = make_manager();

    let expected: Vec<_> = (0..THREADS)
        .map(|t| manager.analyze(&cart_for(t)).unwrap())
        .collect();

    thread::scope(|scope| {
        for (t, expected) in expected.iter().enumerate() {
            let manager = manager.clone();
            scope.spawn(move || {
                let cart = cart_for(t);
                for _ in 0..RUNS_PER_THREAD {
                    let report = manager.analyze(&cart).unwrap();
                    assert_eq!(&report, expected);
                }
            });
        }
    });
}

#[test]
fn manager_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DiscountManager>();
}
