use actix_web::{web, HttpResponse};

use super::dtos::todo::TodoPayload;
use super::errors::{ErrorResponse, TodoApiError};
use crate::models::todo_model::{current_timestamp, NewTodo, Todo, TodoChanges};
use crate::models::todo_store::TodoStore;

/// Store shared by every worker
pub type Store = web::Data<dyn TodoStore>;

/// Create a new todo
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = TodoPayload,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn create_todo(
    request_data: web::Json<TodoPayload>,
    store: Store,
) -> Result<HttpResponse, TodoApiError> {
    let payload = request_data.into_inner();
    payload.validate()?;

    let new_todo = NewTodo::from_payload(payload, current_timestamp());

    let inserted = web::block(move || insert_new_todo(store, new_todo)).await??;

    Ok(HttpResponse::Created().json(&inserted))
}

/// Api handler for getting all todos
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    responses(
        (status = 200, description = "Every todo, ordered by id", body = Vec<Todo>),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn get_todos(store: Store) -> Result<HttpResponse, TodoApiError> {
    let list = web::block(move || store.select_all()).await??;

    Ok(HttpResponse::Ok().json(&list))
}

/// Get a todo by its id
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i32, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo", body = Todo),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "No todo with that id", body = ErrorResponse),
    )
)]
pub async fn get_todo(
    params: web::Path<String>,
    store: Store,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = parse_todo_id(&params)?;

    let todo = web::block(move || store.select_by_id(todo_id))
        .await??
        .ok_or_else(TodoApiError::todo_not_found)?;

    Ok(HttpResponse::Ok().json(&todo))
}

/// Replace a todo's title, description and completeness
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i32, Path, description = "Todo id")),
    request_body = TodoPayload,
    responses(
        (status = 200, description = "The updated todo", body = Todo),
        (status = 400, description = "Bad id or body", body = ErrorResponse),
        (status = 404, description = "No todo with that id", body = ErrorResponse),
    )
)]
pub async fn update_todo(
    params: web::Path<String>,
    body: web::Bytes,
    store: Store,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = parse_todo_id(&params)?;

    // decoded here rather than by an extractor so a bad id is reported first
    let payload: TodoPayload = serde_json::from_slice(&body)
        .map_err(|e| TodoApiError::Validation(format!("Json deserialize error: {}", e)))?;
    payload.validate()?;

    let changes = TodoChanges::from_payload(payload, current_timestamp());

    let updated = web::block(move || update_existing_todo(store, todo_id, changes)).await??;

    Ok(HttpResponse::Ok().json(&updated))
}

/// Api to Delete a TODO
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i32, Path, description = "Todo id")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "No todo with that id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn delete_todo(
    params: web::Path<String>,
    store: Store,
) -> Result<HttpResponse, TodoApiError> {
    let todo_id = parse_todo_id(&params)?;

    web::block(move || remove_todo(store, todo_id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// Ids past the `serial` range are valid integers that match no row
fn parse_todo_id(raw: &str) -> Result<i32, TodoApiError> {
    let wide = raw.parse::<i64>().map_err(|_| TodoApiError::invalid_id())?;

    i32::try_from(wide).map_err(|_| TodoApiError::todo_not_found())
}

fn insert_new_todo(store: Store, new_todo: NewTodo) -> Result<Todo, TodoApiError> {
    let todo_id = store.insert(&new_todo)?;

    Ok(new_todo.into_todo(todo_id))
}

fn update_existing_todo(
    store: Store,
    todo_id: i32,
    changes: TodoChanges,
) -> Result<Todo, TodoApiError> {
    match store.update_by_id(todo_id, &changes)? {
        Some(created_at) => Ok(changes.into_todo(todo_id, created_at)),
        None => Err(TodoApiError::todo_not_found()),
    }
}

/// Remove a todo
fn remove_todo(store: Store, todo_id: i32) -> Result<(), TodoApiError> {
    let delete_count = store.delete_by_id(todo_id)?;

    if delete_count > 0 {
        Ok(())
    } else {
        Err(TodoApiError::todo_not_found())
    }
}
