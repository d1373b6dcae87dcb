use ::board_protocol::model::requests::UpdateNodeRequest;
use ::warp::http::StatusCode;

pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    node_id: String,
    request: UpdateNodeRequest,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    Ok(crate::warp_try_err_500!(
        handler_inner(state, board_id, node_id, request).await
    ))
}

async fn handler_inner(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    node_id: String,
    request: UpdateNodeRequest,
) -> ::anyhow::Result<Box<dyn ::warp::Reply>> {
    match state
        .store
        .update_node(&board_id, &node_id, &request)
        .await?
    {
        Some(node) => {
            Ok(crate::handlers::util::json_reply(&node, StatusCode::OK))
        }
        None => Ok(crate::handlers::util::node_not_found()),
    }
}
