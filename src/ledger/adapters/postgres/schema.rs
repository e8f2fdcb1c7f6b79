//! Diesel schema for the credit ledger.

diesel::table! {
    /// Append-only credit entries. A trigger rejects updates and deletes.
    credits (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Member whose balance the entry affects.
        user_id -> Uuid,
        /// Signed amount in credits.
        amount -> Int8,
        /// `earned` or `spent`.
        #[max_length = 20]
        transaction_type -> Varchar,
        /// Task that caused the movement.
        related_task_id -> Nullable<Uuid>,
        /// Human-readable description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
