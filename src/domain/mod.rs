pub mod amount;
pub mod eth;
pub mod wallet;
