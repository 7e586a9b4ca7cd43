//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly; Diesel uses them for compile-time query validation. Regenerate
//! with `diesel print-schema` after changing migrations.

diesel::table! {
    /// Registered accounts, their credential hash, role, and profile fields.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login email.
        email -> Varchar,
        /// Opaque credential produced by the password hasher.
        password_hash -> Text,
        /// Either `submitter` or `admin`.
        role -> Varchar,
        /// Deactivated users cannot authenticate.
        is_active -> Bool,
        avatar_url -> Nullable<Text>,
        bio -> Nullable<Text>,
        github_link -> Nullable<Text>,
        linkedin_link -> Nullable<Text>,
        studio_name -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submitted ideas and their evaluation state.
    ideas (id) {
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        title -> Varchar,
        description -> Text,
        category -> Varchar,
        /// Relative path of the stored attachment, when one was uploaded.
        file_path -> Nullable<Text>,
        /// One of `submitted`, `accepted`, `rejected`.
        status -> Varchar,
        admin_comment -> Nullable<Text>,
        /// Evaluating admin; set exactly once.
        reviewed_by_id -> Nullable<Uuid>,
        tags -> Nullable<Text>,
        problem_statement -> Nullable<Text>,
        solution -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user todo items, optionally admin-assigned.
    todos (id) {
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        title -> Varchar,
        description -> Nullable<Text>,
        /// Date label, `YYYY-MM-DD`.
        date -> Nullable<Varchar>,
        /// Time label, `HH:MM`.
        start_time -> Nullable<Varchar>,
        end_time -> Nullable<Varchar>,
        tags -> Nullable<Text>,
        /// Assigning admin, when created on the owner's behalf.
        assigned_by -> Nullable<Uuid>,
        done -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user calendar events; create/list only.
    calendar_events (id) {
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        title -> Varchar,
        /// Date label, `YYYY-MM-DD`.
        date -> Varchar,
        /// Time label, `HH:MM`.
        time -> Nullable<Varchar>,
        description -> Nullable<Text>,
        /// Display colour.
        color -> Varchar,
    }
}

diesel::table! {
    /// Append-only per-user notification feed.
    notifications (id) {
        id -> Uuid,
        /// Recipient user.
        user_id -> Uuid,
        message -> Text,
        /// One of `idea_review`, `task_assigned`, `new_idea`.
        kind -> Varchar,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bearer-token fingerprints; raw tokens are never stored.
    access_tokens (fingerprint) {
        /// SHA-256 hex digest of the issued token.
        fingerprint -> Varchar,
        /// User the token names.
        user_id -> Uuid,
        created_at -> Timestamptz,
        /// Tokens past this instant no longer resolve.
        expires_at -> Timestamptz,
    }
}
