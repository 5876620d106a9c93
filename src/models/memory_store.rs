//! Stores used by the handler tests in place of PostgreSQL.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDateTime;

use super::todo_model::{NewTodo, Todo, TodoChanges};
use super::todo_store::TodoStore;
use crate::api::errors::TodoApiError;

#[derive(Default)]
struct Rows {
    last_id: i32,
    todos: BTreeMap<i32, Todo>,
}

/// Keeps rows in a map and hands out ids the way a `serial` column does
#[derive(Default)]
pub struct InMemoryTodoStore {
    rows: Mutex<Rows>,
}

impl InMemoryTodoStore {
    fn rows(&self) -> Result<MutexGuard<'_, Rows>, TodoApiError> {
        self.rows
            .lock()
            .map_err(|e| TodoApiError::Storage(e.to_string()))
    }
}

impl TodoStore for InMemoryTodoStore {
    fn insert(&self, new_todo: &NewTodo) -> Result<i32, TodoApiError> {
        let mut rows = self.rows()?;
        rows.last_id += 1;
        let todo_id = rows.last_id;
        rows.todos
            .insert(todo_id, new_todo.clone().into_todo(todo_id));
        Ok(todo_id)
    }

    fn select_all(&self) -> Result<Vec<Todo>, TodoApiError> {
        Ok(self.rows()?.todos.values().cloned().collect())
    }

    fn select_by_id(&self, todo_id: i32) -> Result<Option<Todo>, TodoApiError> {
        Ok(self.rows()?.todos.get(&todo_id).cloned())
    }

    fn update_by_id(
        &self,
        todo_id: i32,
        changes: &TodoChanges,
    ) -> Result<Option<NaiveDateTime>, TodoApiError> {
        let mut rows = self.rows()?;
        let row = match rows.todos.get_mut(&todo_id) {
            Some(row) => row,
            None => return Ok(None),
        };

        row.title = changes.title.clone();
        row.description = changes.description.clone();
        row.completed = changes.completed;
        row.updated_at = changes.updated_at;

        Ok(Some(row.created_at))
    }

    fn delete_by_id(&self, todo_id: i32) -> Result<usize, TodoApiError> {
        let removed = self.rows()?.todos.remove(&todo_id);
        Ok(removed.map_or(0, |_| 1))
    }
}

/// Every call fails like a lost database connection
pub struct FailingTodoStore;

impl FailingTodoStore {
    fn unavailable<T>() -> Result<T, TodoApiError> {
        Err(TodoApiError::Storage("connection refused".to_string()))
    }
}

impl TodoStore for FailingTodoStore {
    fn insert(&self, _: &NewTodo) -> Result<i32, TodoApiError> {
        Self::unavailable()
    }

    fn select_all(&self) -> Result<Vec<Todo>, TodoApiError> {
        Self::unavailable()
    }

    fn select_by_id(&self, _: i32) -> Result<Option<Todo>, TodoApiError> {
        Self::unavailable()
    }

    fn update_by_id(
        &self,
        _: i32,
        _: &TodoChanges,
    ) -> Result<Option<NaiveDateTime>, TodoApiError> {
        Self::unavailable()
    }

    fn delete_by_id(&self, _: i32) -> Result<usize, TodoApiError> {
        Self::unavailable()
    }
}
