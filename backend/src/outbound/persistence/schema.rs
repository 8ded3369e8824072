//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts: engineers and managers.
    ///
    /// The `id` column is the primary key (UUID v4). `email` is unique and
    /// serves as the login subject; `password_hash` holds an argon2 PHC
    /// string and never leaves the persistence layer.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Unique login address.
        email -> Varchar,
        /// Argon2 PHC password hash.
        password_hash -> Varchar,
        /// Account role: `engineer` or `manager`.
        role -> Varchar,
        /// Advisory skill labels.
        skills -> Array<Text>,
        /// Seniority band; NULL for managers.
        seniority -> Nullable<Varchar>,
        /// Total assignable percentage (0-100).
        max_capacity -> Int4,
        /// Free-text department label.
        department -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects owned by managers.
    projects (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Project name.
        name -> Varchar,
        /// Free-text description.
        description -> Text,
        /// First day of the delivery window.
        start_date -> Date,
        /// Last day of the delivery window.
        end_date -> Date,
        /// Advisory skill labels.
        required_skills -> Array<Text>,
        /// Intended head count.
        team_size -> Int4,
        /// Lifecycle label: `planning`, `active`, or `completed`.
        status -> Varchar,
        /// Owning manager (references `users.id`).
        manager_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Capacity commitments linking engineers to projects.
    ///
    /// Overlapping windows for one engineer are allowed; the allocation sum
    /// is bounded by admission control at creation time, not by a database
    /// constraint.
    assignments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Assigned engineer (references `users.id`).
        engineer_id -> Uuid,
        /// Target project (references `projects.id`).
        project_id -> Uuid,
        /// Committed capacity fraction (1-100).
        allocation_percentage -> Int4,
        /// First day of the commitment.
        start_date -> Date,
        /// Last day of the commitment.
        end_date -> Date,
        /// Free-text role label.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(assignments -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, assignments);
