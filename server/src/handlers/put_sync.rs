use ::board_protocol::model::snapshot::SyncRequest;
use ::log::*;

use crate::sync::{ReplaceOutcome, ReplacePlan};

/// Replaces the board's entire persisted graph with the posted snapshot.
pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    snapshot: SyncRequest,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    Ok(crate::warp_try_err_500!(
        handler_inner(state, board_id, snapshot).await
    ))
}

async fn handler_inner(
    state: ::std::sync::Arc<crate::State>,
    board_id: String,
    snapshot: SyncRequest,
) -> ::anyhow::Result<Box<dyn ::warp::Reply>> {
    let plan = ReplacePlan::from_snapshot(&board_id, snapshot);

    debug!(
        "sync board {}: {} nodes, {} connections, {} dangling edges, {} duplicate nodes",
        board_id,
        plan.nodes.len(),
        plan.connections.len(),
        plan.dropped_edges,
        plan.duplicate_nodes,
    );

    match state.store.replace_graph(&plan).await? {
        ReplaceOutcome::Replaced => Ok(crate::handlers::util::success_reply()),
        ReplaceOutcome::BoardNotFound => {
            Ok(crate::handlers::util::board_not_found())
        }
    }
}
