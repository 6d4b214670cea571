use actix_web::{HttpResponse, Responder, get};

/// Liveness route for the heartbeat server itself.
/// This route returns no content, the response status is enough.
#[get("/health")]
pub async fn health_route() -> impl Responder {
    HttpResponse::Ok()
}
