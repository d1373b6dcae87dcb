use ::envconfig::Envconfig;
use ::log::*;
use ::warp::Filter;

mod config;
mod handlers;
mod postgres;
mod queries;
mod store;
mod sync;
mod user;
mod version;

pub(crate) struct State {
    store: Box<dyn store::interface::BoardStore>,
    demo_identity: user::DemoIdentity,
}

#[macro_export]
macro_rules! warp_try_err_500 {
    ($expr:expr) => {
        match $expr {
            Ok(x) => x,
            Err(err) => {
                ::log::error!("{:?}", err);

                return Ok($crate::handlers::util::error_reply(
                    "Internal server error",
                    ::warp::http::StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
        }
    };
}

async fn handle_rejection(
    err: ::warp::Rejection,
) -> Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible> {
    use ::warp::http::StatusCode;

    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err
        .find::<::warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        (StatusCode::BAD_REQUEST, "Malformed request body")
    } else if err.find::<::warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<::warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required")
    } else if err.find::<::warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected a JSON body")
    } else if err.find::<::warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        warn!("unhandled rejection {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(handlers::util::error_reply(message, status))
}

fn json_body<T>(
    max_bytes: u64,
) -> impl Filter<Extract = (T,), Error = ::warp::Rejection> + Clone
where
    T: ::serde::de::DeserializeOwned + Send,
{
    ::warp::body::content_length_limit(max_bytes).and(::warp::body::json())
}

fn make_routes(
    state: ::std::sync::Arc<State>,
    max_body_bytes: u64,
) -> impl Filter<Extract = (impl ::warp::Reply,), Error = ::std::convert::Infallible>
       + Clone {
    let cors = ::warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(&[
            ::warp::http::Method::GET,
            ::warp::http::Method::POST,
            ::warp::http::Method::PUT,
            ::warp::http::Method::PATCH,
            ::warp::http::Method::DELETE,
        ]);

    let state_filter = ::warp::any().map(move || state.clone());

    let health_route = ::warp::path!("health")
        .and(::warp::get())
        .and(state_filter.clone())
        .and_then(handlers::get_health::handler);

    let version_route = ::warp::path!("version")
        .and(::warp::get())
        .and_then(handlers::get_version::handler);

    let get_boards_route = ::warp::path!("boards")
        .and(::warp::get())
        .and(state_filter.clone())
        .and_then(handlers::get_boards::handler);

    let post_boards_route = ::warp::path!("boards")
        .and(::warp::post())
        .and(state_filter.clone())
        .and(json_body(max_body_bytes))
        .and_then(handlers::post_boards::handler);

    let get_board_route = state_filter
        .clone()
        .and(::warp::path!("boards" / String))
        .and(::warp::get())
        .and_then(handlers::get_board::handler);

    let patch_board_route = state_filter
        .clone()
        .and(::warp::path!("boards" / String))
        .and(::warp::patch())
        .and(json_body(max_body_bytes))
        .and_then(handlers::patch_board::handler);

    let delete_board_route = state_filter
        .clone()
        .and(::warp::path!("boards" / String))
        .and(::warp::delete())
        .and_then(handlers::delete_board::handler);

    let put_sync_route = state_filter
        .clone()
        .and(::warp::path!("boards" / String / "sync"))
        .and(::warp::put())
        .and(json_body(max_body_bytes))
        .and_then(handlers::put_sync::handler);

    let post_nodes_route = state_filter
        .clone()
        .and(::warp::path!("boards" / String / "nodes"))
        .and(::warp::post())
        .and(json_body(max_body_bytes))
        .and_then(handlers::post_nodes::handler);

    let patch_node_route = state_filter
        .clone()
        .and(::warp::path!("boards" / String / "nodes" / String))
        .and(::warp::patch())
        .and(json_body(max_body_bytes))
        .and_then(handlers::patch_node::handler);

    let delete_node_route = state_filter
        .clone()
        .and(::warp::path!("boards" / String / "nodes" / String))
        .and(::warp::delete())
        .and_then(handlers::delete_node::handler);

    health_route
        .or(version_route)
        .or(get_boards_route)
        .or(post_boards_route)
        .or(get_board_route)
        .or(patch_board_route)
        .or(delete_board_route)
        .or(put_sync_route)
        .or(post_nodes_route)
        .or(patch_node_route)
        .or(delete_node_route)
        .with(cors)
        .recover(handle_rejection)
}

#[tokio::main]
async fn main() -> ::anyhow::Result<()> {
    ::env_logger::init();

    let config = config::Config::init_from_env()?;

    let store = store::make_store(&config).await?;

    if config.mode == config::Mode::PrepareDatabase {
        info!("Database prepared");

        return Ok(());
    }

    let state = ::std::sync::Arc::new(State {
        store,
        demo_identity: user::DemoIdentity::new(
            config.demo_user_id.clone(),
            config.demo_user_email.clone(),
        ),
    });

    let routes = make_routes(state, config.max_snapshot_bytes);

    info!("Listening on {}", config.http_port_api);

    ::warp::serve(routes)
        .run(([0, 0, 0, 0], config.http_port_api))
        .await;

    Ok(())
}

#[cfg(test)]
pub mod tests {
    use ::board_protocol::model::board::{Board, BoardGraph, BoardListItem, BoardNode};
    use ::board_protocol::model::node_type::NodeType;
    use ::board_protocol::model::snapshot::SyncRequest;
    use ::board_protocol::model::ErrorResponse;
    use ::board_protocol::test_utils::*;
    use ::warp::http::StatusCode;

    use crate::store::interface::{BoardStore, NewBoard};

    const MAX_BODY_BYTES: u64 = 64 * 1024;

    fn make_test_state() -> ::std::sync::Arc<super::State> {
        ::std::sync::Arc::new(super::State {
            store: Box::new(crate::store::memory::MemoryStore::new()),
            demo_identity: crate::user::DemoIdentity::new(
                "demo-user".to_string(),
                "demo@example.com".to_string(),
            ),
        })
    }

    async fn make_test_board(state: &super::State, board_id: &str) {
        let owner = crate::user::require_user(state).await.unwrap();

        state
            .store
            .create_board(NewBoard {
                id: board_id.to_string(),
                name: "Board".to_string(),
                description: None,
                owner_id: owner.id,
            })
            .await
            .unwrap();
    }

    async fn sync(
        state: &::std::sync::Arc<super::State>,
        board_id: &str,
        snapshot: &SyncRequest,
    ) -> ::warp::http::Response<::warp::hyper::body::Bytes> {
        ::warp::test::request()
            .method("PUT")
            .path(&format!("/boards/{}/sync", board_id))
            .json(snapshot)
            .reply(&super::make_routes(state.clone(), MAX_BODY_BYTES))
            .await
    }

    async fn load(
        state: &::std::sync::Arc<super::State>,
        board_id: &str,
    ) -> BoardGraph {
        let response = ::warp::test::request()
            .method("GET")
            .path(&format!("/boards/{}", board_id))
            .reply(&super::make_routes(state.clone(), MAX_BODY_BYTES))
            .await;

        assert_eq!(response.status(), StatusCode::OK);

        ::serde_json::from_slice(response.body()).unwrap()
    }

    #[tokio::test]
    async fn test_sync_single_text_node() {
        let state = make_test_state();
        make_test_board(&state, "b1").await;

        let snapshot = SyncRequest::new(
            vec![make_test_node_with_content(
                "n1",
                "textNode",
                (10.0, 20.0),
                ::serde_json::json!({ "text": "hi" }),
            )],
            vec![],
        );

        let response = sync(&state, "b1", &snapshot).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            ::serde_json::from_slice::<::serde_json::Value>(response.body())
                .unwrap(),
            ::serde_json::json!({ "success": true })
        );

        let graph = load(&state, "b1").await;

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, "n1");
        assert_eq!(graph.nodes[0].node_type, NodeType::Text);
        assert_eq!(graph.nodes[0].position_x, 10.0);
        assert_eq!(graph.nodes[0].position_y, 20.0);
        assert_eq!(graph.nodes[0].content, ::serde_json::json!({ "text": "hi" }));
        assert!(graph.connections.is_empty());
    }

    #[tokio::test]
    async fn test_sync_persists_exactly_snapshot() {
        let state = make_test_state();
        make_test_board(&state, "b1").await;

        sync(&state, "b1", &make_test_chain(5)).await;

        let snapshot = SyncRequest::new(
            vec![
                make_test_node_with_content("a", "imageNode", (1.0, 2.0), ::serde_json::json!({ "src": "x.png" })),
                make_test_node_with_content("b", "mysteryNode", (3.0, 4.0), ::serde_json::json!({})),
            ],
            vec![
                make_test_labeled_edge("a", "b", "shows"),
                make_test_edge("a", "n0"),
                make_test_edge("ghost", "b"),
            ],
        );

        assert_eq!(sync(&state, "b1", &snapshot).await.status(), StatusCode::OK);

        let graph = load(&state, "b1").await;

        let mut ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        ids.sort();

        assert_eq!(ids, vec!["a", "b"]);

        let a = graph.nodes.iter().find(|n| n.id == "a").unwrap();
        let b = graph.nodes.iter().find(|n| n.id == "b").unwrap();

        assert_eq!(a.node_type, NodeType::Image);
        assert_eq!(b.node_type, NodeType::Text);
        assert_eq!(graph.connections.len(), 1);
        assert_eq!(graph.connections[0].source_id, "a");
        assert_eq!(graph.connections[0].target_id, "b");
        assert_eq!(graph.connections[0].label.as_deref(), Some("shows"));
    }

    #[tokio::test]
    async fn test_sync_drops_edge_to_removed_node() {
        let state = make_test_state();
        make_test_board(&state, "b1").await;

        sync(
            &state,
            "b1",
            &SyncRequest::new(
                vec![make_test_node("n1", 0.0, 0.0), make_test_node("n2", 5.0, 5.0)],
                vec![make_test_edge("n1", "n2")],
            ),
        )
        .await;

        let response = sync(
            &state,
            "b1",
            &SyncRequest::new(
                vec![make_test_node("n1", 0.0, 0.0)],
                vec![make_test_edge("n1", "n2")],
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let graph = load(&state, "b1").await;

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, "n1");
        assert!(graph.connections.is_empty());
    }

    #[tokio::test]
    async fn test_sync_missing_board_is_not_found() {
        let state = make_test_state();
        make_test_board(&state, "b1").await;

        let response =
            sync(&state, &make_test_id("missing"), &make_test_chain(2)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let error: ErrorResponse =
            ::serde_json::from_slice(response.body()).unwrap();

        assert_eq!(error.error, "Board not found");
        assert!(load(&state, "b1").await.nodes.is_empty());
        assert_eq!(state.store.list_boards().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sync_accepts_sparse_snapshot() {
        let state = make_test_state();
        make_test_board(&state, "b1").await;

        let response = ::warp::test::request()
            .method("PUT")
            .path("/boards/b1/sync")
            .header("content-type", "application/json")
            .body(r#"{"nodes":[{"id":"n1","type":null,"positionX":null}]}"#)
            .reply(&super::make_routes(state.clone(), MAX_BODY_BYTES))
            .await;

        assert_eq!(response.status(), StatusCode::OK);

        let graph = load(&state, "b1").await;

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].node_type, NodeType::Text);
        assert_eq!(graph.nodes[0].position_x, 0.0);
        assert_eq!(graph.nodes[0].content, ::serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_sync_rejects_malformed_body() {
        let state = make_test_state();
        make_test_board(&state, "b1").await;

        let response = ::warp::test::request()
            .method("PUT")
            .path("/boards/b1/sync")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&super::make_routes(state.clone(), MAX_BODY_BYTES))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sync_rejects_oversized_body() {
        let state = make_test_state();
        make_test_board(&state, "b1").await;

        let response = ::warp::test::request()
            .method("PUT")
            .path("/boards/b1/sync")
            .json(&make_test_chain(50))
            .reply(&super::make_routes(state.clone(), 64))
            .await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_board_lifecycle() {
        let state = make_test_state();
        let routes = super::make_routes(state.clone(), MAX_BODY_BYTES);

        let response = ::warp::test::request()
            .method("POST")
            .path("/boards")
            .json(&::serde_json::json!({ "name": "Research", "description": "notes" }))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::CREATED);

        let board: Board = ::serde_json::from_slice(response.body()).unwrap();

        assert_eq!(board.name, "Research");
        assert_eq!(board.owner_id, "demo-user");

        sync(&state, &board.id, &make_test_chain(3)).await;

        let response = ::warp::test::request()
            .method("GET")
            .path("/boards")
            .reply(&routes)
            .await;

        let boards: Vec<BoardListItem> =
            ::serde_json::from_slice(response.body()).unwrap();

        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].count.nodes, 3);

        let response = ::warp::test::request()
            .method("PATCH")
            .path(&format!("/boards/{}", board.id))
            .json(&::serde_json::json!({ "name": "Renamed" }))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(load(&state, &board.id).await.board.name, "Renamed");

        let response = ::warp::test::request()
            .method("DELETE")
            .path(&format!("/boards/{}", board.id))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);

        let response = ::warp::test::request()
            .method("GET")
            .path(&format!("/boards/{}", board.id))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_board_validation() {
        let state = make_test_state();
        let routes = super::make_routes(state.clone(), MAX_BODY_BYTES);

        let response = ::warp::test::request()
            .method("POST")
            .path("/boards")
            .json(&::serde_json::json!({ "name": "   " }))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ::warp::test::request()
            .method("POST")
            .path("/boards")
            .json(&::serde_json::json!({ "name": "Board", "ownerId": "nobody" }))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_node_endpoints() {
        let state = make_test_state();
        make_test_board(&state, "b1").await;
        let routes = super::make_routes(state.clone(), MAX_BODY_BYTES);

        let response = ::warp::test::request()
            .method("POST")
            .path("/boards/b1/nodes")
            .json(&::serde_json::json!({ "positionX": 4.0 }))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ::warp::test::request()
            .method("POST")
            .path("/boards/b1/nodes")
            .json(&::serde_json::json!({ "type": "LINK", "positionX": 4.0 }))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::CREATED);

        let node: BoardNode = ::serde_json::from_slice(response.body()).unwrap();

        assert_eq!(node.node_type, NodeType::Link);
        assert_eq!(node.position_x, 4.0);
        assert_eq!(node.width, 250.0);

        let response = ::warp::test::request()
            .method("PATCH")
            .path(&format!("/boards/b1/nodes/{}", node.id))
            .json(&::serde_json::json!({ "positionY": 8.0 }))
            .reply(&routes)
            .await;

        let patched: BoardNode = ::serde_json::from_slice(response.body()).unwrap();

        assert_eq!(patched.position_x, 4.0);
        assert_eq!(patched.position_y, 8.0);

        let response = ::warp::test::request()
            .method("DELETE")
            .path(&format!("/boards/b1/nodes/{}", node.id))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);

        let response = ::warp::test::request()
            .method("DELETE")
            .path(&format!("/boards/b1/nodes/{}", node.id))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ::warp::test::request()
            .method("POST")
            .path("/boards/missing/nodes")
            .json(&::serde_json::json!({ "type": "TEXT" }))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_and_version() {
        let state = make_test_state();
        let routes = super::make_routes(state, MAX_BODY_BYTES);

        let response = ::warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            ::serde_json::from_slice::<::serde_json::Value>(response.body())
                .unwrap(),
            ::serde_json::json!({ "db": true, "status": "ok" })
        );

        let response = ::warp::test::request()
            .method("GET")
            .path("/version")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_and_method() {
        let state = make_test_state();
        let routes = super::make_routes(state, MAX_BODY_BYTES);

        let response = ::warp::test::request()
            .method("GET")
            .path("/nope")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ::warp::test::request()
            .method("GET")
            .path("/boards/b1/sync")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
