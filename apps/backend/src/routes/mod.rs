pub mod health;
pub mod realtime;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health))
        .route("/ws", web::get().to(realtime::upgrade));
}
