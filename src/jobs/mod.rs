// Deferred action dispatch
//
// The core engine runs every matched action immediately; actions a caller
// wants delayed (rule `delay_minutes` > 0) are enqueued here instead and a
// background scheduler replays them through the same executor when due.

pub mod queue;
pub mod scheduler;

pub use queue::{ActionQueue, InMemoryActionQueue, QueuedAction};
pub use scheduler::{run_due_actions, AutomationScheduler};
