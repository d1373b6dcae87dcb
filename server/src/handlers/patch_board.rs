use ::board_protocol::model::requests::UpdateBoardRequest;
use ::warp::http::StatusCode;

use crate::handlers::util::{board_not_found, error_reply, json_reply, non_blank};

pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    request: UpdateBoardRequest,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    Ok(crate::warp_try_err_500!(
        handler_inner(state, board_id, request).await
    ))
}

async fn handler_inner(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    mut request: UpdateBoardRequest,
) -> ::anyhow::Result<Box<dyn ::warp::Reply>> {
    if request.name.is_some() {
        request.name = non_blank(request.name.as_deref());

        if request.name.is_none() {
            return Ok(error_reply(
                "Board name cannot be blank",
                StatusCode::BAD_REQUEST,
            ));
        }
    }

    match state.store.update_board(&board_id, &request).await? {
        Some(board) => Ok(json_reply(&board, StatusCode::OK)),
        None => Ok(board_not_found()),
    }
}
