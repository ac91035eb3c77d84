//! In-memory registry adapters.

mod period;
mod task;

pub use period::InMemoryPeriodRepository;
pub use task::InMemoryTaskRepository;
