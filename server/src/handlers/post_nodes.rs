use ::board_protocol::model::node_defaults;
use ::board_protocol::model::node_type::NodeType;
use ::board_protocol::model::requests::CreateNodeRequest;
use ::warp::http::StatusCode;

use crate::handlers::util::{board_not_found, error_reply, json_reply};
use crate::store::interface::NewNode;

pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    request: CreateNodeRequest,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    Ok(crate::warp_try_err_500!(
        handler_inner(state, board_id, request).await
    ))
}

async fn handler_inner(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    request: CreateNodeRequest,
) -> ::anyhow::Result<Box<dyn ::warp::Reply>> {
    let Some(node_type) = request
        .node_type
        .as_deref()
        .and_then(|node_type| node_type.parse::<NodeType>().ok())
    else {
        return Ok(error_reply("Node type is required", StatusCode::BAD_REQUEST));
    };

    let node = NewNode {
        id: ::uuid::Uuid::new_v4().to_string(),
        node_type,
        position_x: request.position_x.unwrap_or(node_defaults::POSITION_X),
        position_y: request.position_y.unwrap_or(node_defaults::POSITION_Y),
        width: request.width.unwrap_or(node_defaults::WIDTH),
        height: request.height.unwrap_or(node_defaults::HEIGHT),
        content: request.content.unwrap_or_else(node_defaults::content),
    };

    match state.store.create_node(&board_id, node).await? {
        Some(node) => Ok(json_reply(&node, StatusCode::CREATED)),
        None => Ok(board_not_found()),
    }
}
