use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::todo_model::{NewTodo, Todo, TodoChanges, TodoRow};
use super::Pool;
use crate::api::errors::TodoApiError;
use crate::schema::todos;

/// Persistence for todo records.
///
/// Calls block on the database, handlers run them through `web::block`.
pub trait TodoStore: Send + Sync {
    /// Inserts a row and returns its generated id
    fn insert(&self, new_todo: &NewTodo) -> Result<i32, TodoApiError>;

    /// All rows, ordered by id
    fn select_all(&self) -> Result<Vec<Todo>, TodoApiError>;

    fn select_by_id(&self, todo_id: i32) -> Result<Option<Todo>, TodoApiError>;

    /// Rewrites the mutable columns and returns the untouched `created_at`,
    /// `None` when no row has that id.
    fn update_by_id(
        &self,
        todo_id: i32,
        changes: &TodoChanges,
    ) -> Result<Option<NaiveDateTime>, TodoApiError>;

    /// Returns the number of deleted rows
    fn delete_by_id(&self, todo_id: i32) -> Result<usize, TodoApiError>;
}

/// PostgreSQL backed store
pub struct PgTodoStore {
    pool: Pool,
}

impl PgTodoStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl TodoStore for PgTodoStore {
    fn insert(&self, new_todo: &NewTodo) -> Result<i32, TodoApiError> {
        let conn = self.pool.get()?;

        let inserted_id = diesel::insert_into(todos::table)
            .values(new_todo)
            .returning(todos::id)
            .get_result::<i32>(&conn)?;

        Ok(inserted_id)
    }

    fn select_all(&self) -> Result<Vec<Todo>, TodoApiError> {
        let conn = self.pool.get()?;

        let rows = todos::table
            .order(todos::id.asc())
            .load::<TodoRow>(&conn)?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    fn select_by_id(&self, todo_id: i32) -> Result<Option<Todo>, TodoApiError> {
        let conn = self.pool.get()?;

        let row = todos::table
            .find(todo_id)
            .first::<TodoRow>(&conn)
            .optional()?;

        Ok(row.map(Todo::from))
    }

    fn update_by_id(
        &self,
        todo_id: i32,
        changes: &TodoChanges,
    ) -> Result<Option<NaiveDateTime>, TodoApiError> {
        let conn = self.pool.get()?;

        let created_at = diesel::update(todos::table.find(todo_id))
            .set(changes)
            .returning(todos::created_at)
            .get_result::<Option<NaiveDateTime>>(&conn)
            .optional()?;

        // a NULL creation time reads as the update time, like select does
        Ok(created_at.map(|created| created.unwrap_or(changes.updated_at)))
    }

    fn delete_by_id(&self, todo_id: i32) -> Result<usize, TodoApiError> {
        let conn = self.pool.get()?;

        let delete_count = diesel::delete(todos::table.find(todo_id)).execute(&conn)?;

        Ok(delete_count)
    }
}
