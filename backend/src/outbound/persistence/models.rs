//! Row structs mapping Diesel query results to and from domain types.
//!
//! Rows are deliberately separate from domain entities: reads go through the
//! validated domain constructors so corrupt rows surface as query errors
//! instead of leaking invalid state into the core.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{assignments, projects, users};

/// User row as selected from `users`, without password material.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub skills: Vec<String>,
    pub seniority: Option<String>,
    pub max_capacity: i32,
    pub department: String,
}

/// User row including the stored credential, selected only by the login
/// adapter.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CredentialRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub skills: Vec<String>,
    pub seniority: Option<String>,
    pub max_capacity: i32,
    pub department: String,
}

impl From<CredentialRow> for UserRow {
    fn from(row: CredentialRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            skills: row.skills,
            seniority: row.seniority,
            max_capacity: row.max_capacity,
            department: row.department,
        }
    }
}

/// Profile changes applied to a `users` row.
///
/// `None` seniority writes NULL rather than skipping the column so a profile
/// edit can clear the band.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct UserProfileChanges {
    pub name: String,
    pub skills: Vec<String>,
    pub seniority: Option<String>,
    pub max_capacity: i32,
    pub department: String,
}

/// Project row as selected from `projects`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub required_skills: Vec<String>,
    pub team_size: i32,
    pub status: String,
    pub manager_id: Uuid,
}

/// Insertable project row; timestamps come from column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub required_skills: Vec<String>,
    pub team_size: i32,
    pub status: String,
    pub manager_id: Uuid,
}

/// Replacement values applied to a `projects` row.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = projects)]
pub struct ProjectChanges {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub required_skills: Vec<String>,
    pub team_size: i32,
    pub status: String,
}

/// Assignment row as selected from `assignments`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssignmentRow {
    pub id: Uuid,
    pub engineer_id: Uuid,
    pub project_id: Uuid,
    pub allocation_percentage: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub role: String,
}

/// Insertable assignment row; timestamps come from column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = assignments)]
pub struct NewAssignmentRow {
    pub id: Uuid,
    pub engineer_id: Uuid,
    pub project_id: Uuid,
    pub allocation_percentage: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub role: String,
}

/// Replacement values applied to an `assignments` row.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = assignments)]
pub struct AssignmentChanges {
    pub allocation_percentage: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub role: String,
}
