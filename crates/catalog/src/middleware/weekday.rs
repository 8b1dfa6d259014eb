use axum::{
    body::Body,
    extract::Extension,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Datelike, Utc};
use shared::abstract_trait::DynClock;
use shared::errors::HttpError;
use tracing::warn;

/// Mutating catalog operations are only accepted Monday through Friday;
/// reads are never gated.
pub async fn weekday_gate_middleware(
    Extension(clock): Extension<DynClock>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    if is_mutating(req.method()) && !is_weekday(clock.now()) {
        warn!("❌ Weekend mutation attempt rejected: {}", req.uri().path());
        return Err(HttpError::Forbidden(
            "The API only accepts changes Monday through Friday.".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Monday is 0, Friday is 4.
fn is_weekday(now: DateTime<Utc>) -> bool {
    now.weekday().num_days_from_monday() <= 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn weekdays_pass_weekends_do_not() {
        // 2025-08-06 is a Wednesday, 2025-08-02 a Saturday, 2025-08-03 a Sunday
        let wednesday = Utc.with_ymd_and_hms(2025, 8, 6, 10, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2025, 8, 2, 10, 0, 0).unwrap();
        let sunday = Utc.with_ymd_and_hms(2025, 8, 3, 10, 0, 0).unwrap();

        assert!(is_weekday(wednesday));
        assert!(!is_weekday(saturday));
        assert!(!is_weekday(sunday));
    }

    #[test]
    fn only_writes_are_gated() {
        assert!(is_mutating(&Method::POST));
        assert!(is_mutating(&Method::PUT));
        assert!(is_mutating(&Method::DELETE));
        assert!(!is_mutating(&Method::GET));
        assert!(!is_mutating(&Method::HEAD));
    }
}
