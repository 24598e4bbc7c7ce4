/*
 * Elevator bank simulator.
 *
 * Every car runs as its own timed state machine on its own thread, and a dispatcher routes
 * floor calls to the closest idle car, or to the least loaded one when all are busy.
 */

/* Modules */
pub mod config;
pub mod dispatcher;
pub mod elevator;
pub mod error;
pub mod shared;

/* Re-exports */
pub use config::{CarConfig, Config, DispatcherConfig};
pub use dispatcher::{CallOutcome, Dispatcher};
pub use elevator::{Car, CarFsm, CarState};
pub use error::{Error, Result};
pub use shared::{CarSnapshot, Status};
