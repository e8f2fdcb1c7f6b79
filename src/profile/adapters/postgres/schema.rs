//! Diesel schema for profiles and badges.

diesel::table! {
    /// Member profiles keyed by user identifier.
    profiles (id) {
        /// Member identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        full_name -> Nullable<Varchar>,
        /// Free-text bio.
        bio -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Badges awarded to members.
    badges (id) {
        /// Badge identifier.
        id -> Uuid,
        /// Holder.
        user_id -> Uuid,
        /// Kind of recognition.
        #[max_length = 50]
        badge_type -> Varchar,
        /// Display name.
        #[max_length = 255]
        badge_name -> Varchar,
        /// Award timestamp.
        earned_at -> Timestamptz,
    }
}
