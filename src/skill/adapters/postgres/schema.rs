//! Diesel schema for skill persistence.

diesel::table! {
    /// Skills offered by members.
    skills (id) {
        /// Skill identifier.
        id -> Uuid,
        /// Owning member.
        user_id -> Uuid,
        /// Skill name.
        #[max_length = 255]
        skill_name -> Varchar,
        /// Lowercase category name.
        #[max_length = 50]
        category -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
