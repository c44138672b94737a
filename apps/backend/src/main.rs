use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use kadi_backend::routes;
use kadi_backend::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables are set by the runtime environment; defaults
    // suit local development.
    let host = std::env::var("KADI_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("KADI_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("KADI_PORT must be a valid port number");
            std::process::exit(1);
        });

    tracing::info!(%host, port, "starting kadi backend");

    let data = web::Data::new(AppState::new());

    HttpServer::new(move || {
        App::new()
            // Clients are static pages served from anywhere; mirror the
            // original relay's open CORS policy.
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
