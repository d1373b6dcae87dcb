use ::board_protocol::model::ErrorResponse;
use ::warp::http::StatusCode;

pub(crate) fn json_reply<T: ::serde::Serialize>(
    value: &T,
    status: StatusCode,
) -> Box<dyn ::warp::Reply> {
    Box::new(::warp::reply::with_status(::warp::reply::json(value), status))
}

pub(crate) fn error_reply(
    message: &str,
    status: StatusCode,
) -> Box<dyn ::warp::Reply> {
    json_reply(&ErrorResponse::new(message), status)
}

pub(crate) fn success_reply() -> Box<dyn ::warp::Reply> {
    json_reply(
        &::board_protocol::model::snapshot::SyncResponse::ok(),
        StatusCode::OK,
    )
}

pub(crate) fn board_not_found() -> Box<dyn ::warp::Reply> {
    error_reply("Board not found", StatusCode::NOT_FOUND)
}

pub(crate) fn node_not_found() -> Box<dyn ::warp::Reply> {
    error_reply("Node not found", StatusCode::NOT_FOUND)
}

/// `None` for missing or whitespace-only input.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub mod tests {
    #[test]
    fn test_non_blank() {
        assert_eq!(super::non_blank(None), None);
        assert_eq!(super::non_blank(Some("   ")), None);
        assert_eq!(super::non_blank(Some(" Plans ")), Some("Plans".to_string()));
    }
}
