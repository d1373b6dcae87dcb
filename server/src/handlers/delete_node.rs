pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    node_id: String,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    Ok(crate::warp_try_err_500!(
        handler_inner(state, board_id, node_id).await
    ))
}

async fn handler_inner(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    node_id: String,
) -> ::anyhow::Result<Box<dyn ::warp::Reply>> {
    if !state.store.delete_node(&board_id, &node_id).await? {
        return Ok(crate::handlers::util::node_not_found());
    }

    Ok(crate::handlers::util::success_reply())
}
