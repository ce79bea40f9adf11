//! Analyze Cart Example - 加载规则并分析一个示例购物车
//!
//! 运行: cargo run -p discount-engine --example analyze_cart
//!
//! Rules come from `DISCOUNT_RULES_PATH` (falls back to the bundled
//! `examples/rules.json`); policy flags come from the environment or `.env`.

use discount_engine::{DiscountService, EngineConfig, init_logger_with_file};
use rust_decimal::Decimal;
use shared::order::{CartLine, CartSnapshot};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let mut config = EngineConfig::from_env();
    init_logger_with_file(Some(config.log_level.as_str()), config.log_dir.as_deref());

    if config.rules_path.is_none() {
        config.rules_path = Some(concat!(env!("CARGO_MANIFEST_DIR"), "/examples/rules.json").into());
    }

    let service = DiscountService::from_config(&config)?;

    let cart = CartSnapshot::new(vec![
        CartLine::new(101, 3, Decimal::new(1000, 2), 2).with_name("Dune"),
        CartLine::new(102, 3, Decimal::new(800, 2), 2).with_name("Emma"),
        CartLine::new(103, 3, Decimal::new(1200, 2), 2).with_name("Ulysses"),
        CartLine::new(201, 7, Decimal::new(1990, 2), 3).with_name("Kite"),
        CartLine::new(202, 7, Decimal::new(499, 2), 2).with_name("Yo-yo"),
    ]);

    let report = service.analyze_current(&cart)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    println!(
        "grand total {} - saved {} = {}",
        report.grand_total(),
        report.effective_saved(),
        report.payable_total()
    );

    Ok(())
}
