use crate::api::dtos::todo::TodoPayload;
use crate::schema::*;
use chrono::{NaiveDateTime, SubsecRound};
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// `todos` row as read back; the table allows NULL in these columns for rows
/// written outside the API.
#[derive(Debug, Clone, Queryable)]
pub struct TodoRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        // a missing timestamp borrows the other one so created_at <= updated_at holds
        let created_at = row.created_at.or(row.updated_at).unwrap_or_default();
        let updated_at = row.updated_at.unwrap_or(created_at);

        Todo {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed.unwrap_or(false),
            created_at,
            updated_at,
        }
    }
}

/// Row written by the create operation; the id comes back from the insert.
#[derive(Debug, Clone, Insertable)]
#[table_name = "todos"]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Columns rewritten by the update operation
#[derive(Debug, Clone, AsChangeset)]
#[table_name = "todos"]
pub struct TodoChanges {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub updated_at: NaiveDateTime,
}

/// Current UTC time at the precision PostgreSQL keeps for `timestamp`
/// columns, so the value echoed to clients matches the stored one.
pub fn current_timestamp() -> NaiveDateTime {
    chrono::Utc::now().naive_utc().trunc_subsecs(6)
}

impl NewTodo {
    pub fn from_payload(payload: TodoPayload, timestamp: NaiveDateTime) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            completed: payload.completed,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    pub fn into_todo(self, id: i32) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl TodoChanges {
    pub fn from_payload(payload: TodoPayload, timestamp: NaiveDateTime) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            completed: payload.completed,
            updated_at: timestamp,
        }
    }

    pub fn into_todo(self, id: i32, created_at: NaiveDateTime) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at,
            updated_at: self.updated_at,
        }
    }
}
