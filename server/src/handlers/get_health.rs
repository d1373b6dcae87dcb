use ::warp::http::StatusCode;

/// Reports whether the Board Store answers within two seconds.
/// Returns 200 when it does, otherwise 503.
pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    use ::tokio::time::{timeout, Duration};

    let db_ok = timeout(Duration::from_secs(2), state.store.ping())
        .await
        .unwrap_or(false);

    let body = ::serde_json::json!({
        "db": db_ok,
        "status": if db_ok { "ok" } else { "degraded" }
    });

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok(crate::handlers::util::json_reply(&body, status))
}
