//! Domain model for help requests and their settlement.
//!
//! A task moves `open -> accepted -> completed`. Completing a task produces a
//! pending [`TaskCompletion`] which the requester later approves. Every
//! guard lives on the aggregates so adapters only persist the outcome.

mod completion;
mod error;
mod ids;
mod task;

pub use completion::{ConfirmationStatus, PersistedCompletionData, TaskCompletion};
pub use error::{ParseConfirmationStatusError, ParseTaskStatusError, TaskDomainError};
pub use ids::{CompletionId, CreditValue, TaskId};
pub use task::{PersistedTaskData, Task, TaskDetails, TaskStatus};
