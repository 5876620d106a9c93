use std::sync::Arc;

use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use log::info;

use super::{docs, errors::TodoApiError, todos_handler};
use crate::config::Config;
use crate::models::{
    self,
    todo_store::{PgTodoStore, TodoStore},
};

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = String, content_type = "text/plain"))
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

/// Body extractor settings: decode failures answer with the JSON error envelope
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| TodoApiError::Validation(err.to_string()).into())
}

/// Route table, shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health))
        .route("/api-docs/openapi.json", web::get().to(docs::openapi_json))
        .service(
            web::resource("/todos")
                .route(web::get().to(todos_handler::get_todos))
                .route(web::post().to(todos_handler::create_todo)),
        )
        .service(
            web::resource("/todos/{id}")
                .route(web::get().to(todos_handler::get_todo))
                .route(web::put().to(todos_handler::update_todo))
                .route(web::delete().to(todos_handler::delete_todo)),
        );
}

/// Opens the database, makes sure the table exists and serves until the
/// process is told to stop. The pool is dropped on return.
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let pool = models::connect(&config)?;
    info!("Successfully connected to database");

    models::bootstrap_schema(&pool)?;
    info!("todos table is ready");

    let store: todos_handler::Store =
        web::Data::from(Arc::new(PgTodoStore::new(pool)) as Arc<dyn TodoStore>);

    let (host, port) = config.bind_address();

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(configure)
    });

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    info!("Server starting on {}:{}", host, port);

    server
        .bind((host.as_str(), port))
        .with_context(|| format!("Failed to bind {}:{}", host, port))?
        .run()
        .await
        .context("Server error")?;

    info!("Server stopped");

    Ok(())
}
