use actix_web::{HttpResponse, Responder, delete, get, post, web};
use heartbeat::{RegisterOutcome, RemoveOutcome, SharedTracker, TrackerError, UpdateOutcome};
use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /`: a server name, optionally with a new ping interval.
/// `interval` is taken as raw JSON because callers send numbers and
/// numeric strings alike; coercion happens in [`parse_interval`].
#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    server: Option<String>,
    interval: Option<Value>,
}

/// Body of `DELETE /`.
#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    server: String,
}

/// Status of every tracked endpoint, as the dump-format table.
#[get("/")]
pub async fn status_report(tracker: web::Data<SharedTracker>) -> impl Responder {
    let tracker = tracker.lock().await;

    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(tracker.status_report())
}

/// Track a new server, or change how often a server is pinged.
#[post("/")]
pub async fn upsert_endpoint(
    tracker: web::Data<SharedTracker>,
    request: web::Json<UpsertRequest>,
) -> actix_web::Result<HttpResponse> {
    let UpsertRequest { server, interval } = request.into_inner();

    let Some(server) = server else {
        return Ok(HttpResponse::BadRequest().body("Invalid request. Must contain a server name"));
    };

    let response = match interval {
        Some(raw) => {
            let Some(interval) = parse_interval(&raw) else {
                return Ok(HttpResponse::BadRequest().body("Ping interval invalid"));
            };

            let mut tracker = tracker.lock().await;
            match tracker.set_interval(&server, interval).await {
                Ok(UpdateOutcome::Updated { interval }) => {
                    HttpResponse::Ok().body(format!("{server} updated with interval {interval}"))
                }
                Ok(UpdateOutcome::Created { interval }) => {
                    HttpResponse::Ok().body(format!("{server} added with interval {interval}"))
                }
                Err(err) => error_response(err)?,
            }
        }
        None => {
            let mut tracker = tracker.lock().await;
            match tracker.register(&server, None).await {
                Ok(RegisterOutcome::Added { interval }) => {
                    HttpResponse::Ok().body(format!("{server} added with interval {interval}"))
                }
                Ok(RegisterOutcome::AlreadyTracked) => {
                    HttpResponse::Ok().body(format!("{server} is already being tracked"))
                }
                Err(err) => error_response(err)?,
            }
        }
    };

    Ok(response)
}

/// Stop tracking a server.
#[delete("/")]
pub async fn remove_endpoint(
    tracker: web::Data<SharedTracker>,
    request: web::Json<RemoveRequest>,
) -> actix_web::Result<HttpResponse> {
    let server = &request.server;
    let mut tracker = tracker.lock().await;

    let response = match tracker.unregister(server) {
        Ok(RemoveOutcome::Removed) => {
            HttpResponse::Ok().body(format!("{server} removed from tracking"))
        }
        Ok(RemoveOutcome::NotTracked) => {
            HttpResponse::Ok().body(format!("{server} is not currently tracked"))
        }
        Err(err) => error_response(err)?,
    };

    Ok(response)
}

/// Callers send `28`, `"28"`, or even `28.7`; anything that does not
/// truncate to a positive integer is refused before the tracker is
/// touched.
fn parse_interval(raw: &Value) -> Option<u64> {
    let numeric = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    let truncated = numeric.trunc();
    (truncated >= 1.0 && truncated <= u64::MAX as f64).then_some(truncated as u64)
}

/// Validation failures surface as plain messages; only a failed dump
/// write escapes as a server error.
fn error_response(err: TrackerError) -> actix_web::Result<HttpResponse> {
    match err {
        TrackerError::InvalidInterval | TrackerError::InvalidName(_) => {
            Ok(HttpResponse::BadRequest().body(err.to_string()))
        }
        TrackerError::Dump(err) => Err(actix_web::error::ErrorInternalServerError(err)),
    }
}
