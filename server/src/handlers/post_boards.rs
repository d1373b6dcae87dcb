use ::board_protocol::model::requests::CreateBoardRequest;
use ::warp::http::StatusCode;

use crate::handlers::util::{error_reply, json_reply, non_blank};
use crate::store::interface::NewBoard;

pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
    request: CreateBoardRequest,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    Ok(crate::warp_try_err_500!(handler_inner(state, request).await))
}

async fn handler_inner(
    state: ::std::sync::Arc<crate::State>,
    request: CreateBoardRequest,
) -> ::anyhow::Result<Box<dyn ::warp::Reply>> {
    let Some(name) = non_blank(request.name.as_deref()) else {
        return Ok(error_reply("Board name is required", StatusCode::BAD_REQUEST));
    };

    let owner_id = match request.owner_id {
        Some(owner_id) => match state.store.get_user(&owner_id).await? {
            Some(owner) => owner.id,
            None => {
                return Ok(error_reply(
                    "Owner does not exist",
                    StatusCode::BAD_REQUEST,
                ));
            }
        },
        None => crate::user::require_user(&state).await?.id,
    };

    let board = state
        .store
        .create_board(NewBoard {
            id: ::uuid::Uuid::new_v4().to_string(),
            name,
            description: request.description,
            owner_id,
        })
        .await?;

    ::log::info!("created board {}", board.id);

    Ok(json_reply(&board, StatusCode::CREATED))
}
