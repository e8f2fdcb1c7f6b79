//! Application services for task lifecycle orchestration.

mod board;
mod lifecycle;

pub use board::TaskBoard;
pub use lifecycle::{
    CompletedTask, ConfirmedCompletion, CreateTaskRequest, RequestSkillHelpRequest,
    TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
