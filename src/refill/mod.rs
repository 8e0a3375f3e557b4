pub mod calculator;
pub mod capacity;
pub mod denomination;
pub mod form;
