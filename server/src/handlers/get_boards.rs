use ::warp::http::StatusCode;

pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    Ok(crate::warp_try_err_500!(handler_inner(state).await))
}

async fn handler_inner(
    state: ::std::sync::Arc<crate::State>,
) -> ::anyhow::Result<Box<dyn ::warp::Reply>> {
    let boards = state.store.list_boards().await?;

    Ok(crate::handlers::util::json_reply(&boards, StatusCode::OK))
}
