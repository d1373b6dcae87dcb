use ::warp::http::StatusCode;

pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    Ok(crate::warp_try_err_500!(handler_inner(state, board_id).await))
}

async fn handler_inner(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
) -> ::anyhow::Result<Box<dyn ::warp::Reply>> {
    match state.store.get_board(&board_id).await? {
        Some(graph) => {
            Ok(crate::handlers::util::json_reply(&graph, StatusCode::OK))
        }
        None => Ok(crate::handlers::util::board_not_found()),
    }
}
