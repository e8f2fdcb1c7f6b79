//! Read-side queries over tasks: the requester's board, incoming requests,
//! and contributed hours.

use super::lifecycle::{TaskLifecycleResult, TaskLifecycleService};
use crate::identity::{IdentityProvider, UserId};
use crate::skill::{
    domain::{Skill, SkillId},
    ports::SkillRepository,
};
use crate::task::{
    domain::{Task, TaskCompletion, TaskId, TaskStatus},
    ports::TaskRepository,
};
use mockable::Clock;
use tracing::debug;

/// A requester's tasks grouped by lifecycle status, each newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    /// Tasks waiting for a provider.
    pub open: Vec<Task>,
    /// Tasks a provider is working on.
    pub active: Vec<Task>,
    /// Finished tasks.
    pub completed: Vec<Task>,
    /// Tasks withdrawn outside the lifecycle.
    pub cancelled: Vec<Task>,
}

impl TaskBoard {
    /// Groups `tasks` by status, preserving their order.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut board, task| {
            match task.status() {
                TaskStatus::Open => board.open.push(task),
                TaskStatus::Accepted => board.active.push(task),
                TaskStatus::Completed => board.completed.push(task),
                TaskStatus::Cancelled => board.cancelled.push(task),
            }
            board
        })
    }

    /// Returns the total number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len() + self.active.len() + self.completed.len() + self.cancelled.len()
    }

    /// Returns whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R, S, C> TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: SkillRepository,
    C: Clock + Send + Sync,
{
    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when the lookup
    /// fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Finds the completion record of a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when the lookup
    /// fails.
    pub async fn find_completion(
        &self,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Option<TaskCompletion>> {
        Ok(self.repository.find_completion(task_id).await?)
    }

    /// Returns the caller's own requests grouped by status.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Authentication`] without a
    /// principal.
    pub async fn task_board(&self, identity: &impl IdentityProvider) -> TaskLifecycleResult<TaskBoard> {
        let requester = identity.require_principal()?;
        let tasks = self.repository.find_by_requester(requester).await?;
        debug!(user_id = %requester, tasks = tasks.len(), "task board loaded");
        Ok(TaskBoard::from_tasks(tasks))
    }

    /// Returns open, unclaimed requests made against the caller's skills.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Authentication`] without a
    /// principal.
    pub async fn incoming_requests(
        &self,
        identity: &impl IdentityProvider,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let owner = identity.require_principal()?;
        let skill_ids: Vec<SkillId> = self
            .skills
            .find_by_owner(owner)
            .await?
            .iter()
            .map(Skill::id)
            .collect();
        if skill_ids.is_empty() {
            return Ok(Vec::new());
        }
        let incoming = self.repository.find_open_for_skills(&skill_ids).await?;
        debug!(user_id = %owner, requests = incoming.len(), "incoming requests loaded");
        Ok(incoming)
    }

    /// Returns the hours `user` has contributed through approved
    /// completions.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when the read
    /// fails.
    pub async fn hours_contributed(&self, user: UserId) -> TaskLifecycleResult<u64> {
        Ok(self.repository.approved_credits_for_provider(user).await?)
    }
}
