//! Diesel schema for reflection persistence.

diesel::table! {
    /// Weekly reflection records, user-written or generated.
    reflections (id) {
        /// Reflection identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Monday opening the reflected week.
        week_start -> Date,
        /// Free-text reflection body.
        summary -> Text,
        /// Self-reported energy on a 1-5 scale; null on generated
        /// reflections.
        energy -> Nullable<Int2>,
        /// Tasks completed during the week.
        tasks_completed -> Int4,
        /// Tasks scheduled during the week.
        tasks_scheduled -> Int4,
        /// Forward-looking focus goals as a JSON array of strings.
        focus_goals -> Jsonb,
        /// Hash of the generation prompt; null on user-written
        /// reflections.
        #[max_length = 64]
        prompt_hash -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
