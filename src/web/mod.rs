mod handlers;
mod state;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::models::ProjectionConfig;
use state::AppState;

pub async fn start_server(port: u16, config: ProjectionConfig) -> std::io::Result<()> {
    let data = web::Data::new(AppState::new(config));

    tracing::info!(port, "starting battery cost projection server");
    println!("Starting battery cost projection server on http://localhost:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .route("/api/projection", web::get().to(handlers::projection))
            .route("/api/summary", web::get().to(handlers::summary))
            .route("/api/ledger/{technology}", web::get().to(handlers::ledger))
            .route("/api/export", web::get().to(handlers::export))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
