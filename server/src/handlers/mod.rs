pub(crate) mod delete_board;
pub(crate) mod delete_node;
pub(crate) mod get_board;
pub(crate) mod get_boards;
pub(crate) mod get_health;
pub(crate) mod get_version;
pub(crate) mod patch_board;
pub(crate) mod patch_node;
pub(crate) mod post_boards;
pub(crate) mod post_nodes;
pub(crate) mod put_sync;
pub(crate) mod util;
