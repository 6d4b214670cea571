use actix_web::web::ServiceConfig;

mod health;
mod status;

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(health::health_route)
        .service(status::status_report)
        .service(status::upsert_endpoint)
        .service(status::remove_endpoint);
}
