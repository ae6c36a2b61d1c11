use thiserror::Error;

use super::state::Ticks;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A process with this name is already registered; the existing one is kept.
    #[error("process `{name}` already exists, skipping it")]
    DuplicateProcess { name: String },

    #[error("ready queue has no process at head {head} (t={at})")]
    ReadyQueueExhausted { at: Ticks, head: usize },
}
