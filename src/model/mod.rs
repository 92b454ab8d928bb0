pub mod activity;
pub mod history;
pub mod point;
pub mod prediction;
