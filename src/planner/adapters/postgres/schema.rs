//! Diesel schema for planner persistence.

diesel::table! {
    /// Task records, including timer and completion bookkeeping.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional calendar due date.
        due_date -> Nullable<Date>,
        /// Optional goal link; nulled when the goal is deleted.
        goal_id -> Nullable<Uuid>,
        /// Optional daily timeline start.
        start_time -> Nullable<Time>,
        /// Estimated duration in minutes.
        duration_minutes -> Int4,
        /// Completion flag.
        completed -> Bool,
        /// Completion timestamp while completed.
        completed_at -> Nullable<Timestamptz>,
        /// Priority label.
        #[max_length = 16]
        priority -> Varchar,
        /// Accumulated actual minutes from the timer.
        actual_minutes -> Int4,
        /// Running-timer marker.
        timer_started_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Weekly goal records.
    goals (id) {
        /// Goal identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Goal title.
        #[max_length = 255]
        title -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recurring blueprint records.
    blueprints (id) {
        /// Blueprint identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Template title.
        #[max_length = 255]
        title -> Varchar,
        /// Day-of-week code: 0-6 weekday (0 = Sunday), 7 every day,
        /// 8 weekdays, 9 weekend, null for an undated template.
        day_of_week -> Nullable<Int2>,
        /// Duration in minutes copied onto expanded instances.
        duration_minutes -> Int4,
        /// Priority label copied onto expanded instances.
        #[max_length = 16]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
