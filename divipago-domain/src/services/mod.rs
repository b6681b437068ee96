pub mod balance_calculator;
pub mod debt_consolidator;
pub mod item_share_projector;
pub mod settlement_engine;
pub mod sharing;

pub use balance_calculator::BalanceCalculator;
pub use debt_consolidator::DebtConsolidator;
pub use item_share_projector::ItemShareProjector;
pub use settlement_engine::SettlementEngine;
pub use sharing::{resolved_payer, SharingSet};
