pub mod car;
pub mod fsm;
mod fsm_tests;

pub use car::Car;
pub use fsm::{CarFsm, CarState};
