pub mod assigner;
pub mod dispatcher;

pub use assigner::CallOutcome;
pub use dispatcher::Dispatcher;
