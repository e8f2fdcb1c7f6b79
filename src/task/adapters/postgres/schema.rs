//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Help requests.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Member who asked for help.
        requester_id -> Uuid,
        /// Member who accepted the task.
        provider_id -> Nullable<Uuid>,
        /// Skill the request was made from.
        skill_id -> Nullable<Uuid>,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Lowercase category name.
        #[max_length = 50]
        category -> Nullable<Varchar>,
        /// Credits the task is worth.
        credits_value -> Int4,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Completion records, one per completed task.
    task_completions (id) {
        /// Completion identifier.
        id -> Uuid,
        /// Completed task.
        task_id -> Uuid,
        /// Member who did the work.
        provider_id -> Uuid,
        /// Member who asked for help.
        requester_id -> Uuid,
        /// Credits moved by the settlement.
        credits_transferred -> Int4,
        /// `pending` or `approved`.
        #[max_length = 20]
        confirmation_status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Confirmation timestamp.
        confirmed_at -> Nullable<Timestamptz>,
    }
}
