pub mod client_node_types {
    pub const TEXT_NODE: &str = "textNode";
    pub const YOUTUBE_NODE: &str = "youtubeNode";
    pub const IMAGE_NODE: &str = "imageNode";
}

pub mod node_defaults {
    pub const POSITION_X: f64 = 0.0;
    pub const POSITION_Y: f64 = 0.0;
    pub const WIDTH: f64 = 250.0;
    pub const HEIGHT: f64 = 150.0;

    pub fn content() -> ::serde_json::Value {
        ::serde_json::Value::Object(::serde_json::Map::new())
    }
}

pub mod node_type {
    use super::client_node_types;

    /// Canonical node type as persisted by the Board Store.
    #[derive(
        Clone,
        Copy,
        Debug,
        PartialEq,
        Eq,
        Hash,
        ::serde::Serialize,
        ::serde::Deserialize,
    )]
    #[cfg_attr(feature = "sqlx", derive(::sqlx::Type))]
    #[cfg_attr(
        feature = "sqlx",
        sqlx(type_name = "node_type", rename_all = "UPPERCASE")
    )]
    #[serde(rename_all = "UPPERCASE")]
    pub enum NodeType {
        Text,
        Youtube,
        Pdf,
        Image,
        Audio,
        Link,
    }

    impl NodeType {
        /// Maps an editor type tag onto the canonical type. Tags outside
        /// the lookup table fall back to `Text`.
        pub fn from_client_tag(tag: &str) -> NodeType {
            match tag {
                client_node_types::TEXT_NODE => NodeType::Text,
                client_node_types::YOUTUBE_NODE => NodeType::Youtube,
                client_node_types::IMAGE_NODE => NodeType::Image,
                _ => NodeType::Text,
            }
        }

        /// Editor type tag used to render a persisted node. Types the
        /// editor has no dedicated component for render as text.
        pub fn client_tag(&self) -> &'static str {
            match self {
                NodeType::Youtube => client_node_types::YOUTUBE_NODE,
                NodeType::Image => client_node_types::IMAGE_NODE,
                _ => client_node_types::TEXT_NODE,
            }
        }

        pub fn as_str(&self) -> &'static str {
            match self {
                NodeType::Text => "TEXT",
                NodeType::Youtube => "YOUTUBE",
                NodeType::Pdf => "PDF",
                NodeType::Image => "IMAGE",
                NodeType::Audio => "AUDIO",
                NodeType::Link => "LINK",
            }
        }
    }

    impl Default for NodeType {
        fn default() -> Self {
            NodeType::Text
        }
    }

    impl ::std::fmt::Display for NodeType {
        fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl ::std::str::FromStr for NodeType {
        type Err = ::anyhow::Error;

        fn from_str(s: &str) -> ::anyhow::Result<Self> {
            match s {
                "TEXT" => Ok(NodeType::Text),
                "YOUTUBE" => Ok(NodeType::Youtube),
                "PDF" => Ok(NodeType::Pdf),
                "IMAGE" => Ok(NodeType::Image),
                "AUDIO" => Ok(NodeType::Audio),
                "LINK" => Ok(NodeType::Link),
                _ => ::anyhow::bail!("unknown node type: {}", s),
            }
        }
    }
}

pub mod snapshot {
    use ::serde::Deserialize;

    fn default_client_tag() -> String {
        super::client_node_types::TEXT_NODE.to_string()
    }

    fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: ::serde::Deserializer<'de>,
        T: ::serde::Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    fn null_as_empty_content<'de, D>(
        deserializer: D,
    ) -> Result<::serde_json::Value, D::Error>
    where
        D: ::serde::Deserializer<'de>,
    {
        match ::serde_json::Value::deserialize(deserializer)? {
            ::serde_json::Value::Null => Ok(super::node_defaults::content()),
            value => Ok(value),
        }
    }

    /// One node of a board snapshot as sent by the editor. `node_type` is
    /// the editor's tag, canonicalized by the server.
    #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct NodeSnapshot {
        pub id: String,
        #[serde(
            rename = "type",
            default = "default_client_tag",
            deserialize_with = "null_as_default_tag"
        )]
        pub node_type: String,
        #[serde(default, deserialize_with = "null_as_default")]
        pub position_x: f64,
        #[serde(default, deserialize_with = "null_as_default")]
        pub position_y: f64,
        #[serde(
            default = "super::node_defaults::content",
            deserialize_with = "null_as_empty_content"
        )]
        pub content: ::serde_json::Value,
    }

    fn null_as_default_tag<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: ::serde::Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?
            .unwrap_or_else(default_client_tag))
    }

    #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
    pub struct EdgeSnapshot {
        pub source: String,
        pub target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub label: Option<String>,
    }

    /// Complete node and edge state of one board at one instant.
    #[derive(
        Clone, Debug, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize,
    )]
    pub struct SyncRequest {
        #[serde(default)]
        pub nodes: Vec<NodeSnapshot>,
        #[serde(default)]
        pub edges: Vec<EdgeSnapshot>,
    }

    impl SyncRequest {
        pub fn new(nodes: Vec<NodeSnapshot>, edges: Vec<EdgeSnapshot>) -> Self {
            Self { nodes, edges }
        }

        pub fn is_empty(&self) -> bool {
            self.nodes.is_empty() && self.edges.is_empty()
        }
    }

    #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
    pub struct SyncResponse {
        pub success: bool,
    }

    impl SyncResponse {
        pub fn ok() -> Self {
            Self { success: true }
        }
    }
}

pub mod board {
    use ::chrono::{DateTime, Utc};

    use super::node_type::NodeType;

    #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Board {
        pub id: String,
        pub name: String,
        pub description: Option<String>,
        pub owner_id: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
    pub struct NodeCount {
        pub nodes: i64,
    }

    #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BoardListItem {
        pub id: String,
        pub name: String,
        pub description: Option<String>,
        pub updated_at: DateTime<Utc>,
        #[serde(rename = "_count")]
        pub count: NodeCount,
    }

    #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BoardNode {
        pub id: String,
        pub board_id: String,
        #[serde(rename = "type")]
        pub node_type: NodeType,
        pub position_x: f64,
        pub position_y: f64,
        pub width: f64,
        pub height: f64,
        pub content: ::serde_json::Value,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BoardConnection {
        pub id: String,
        pub source_id: String,
        pub target_id: String,
        pub label: Option<String>,
    }

    /// A board together with its persisted graph.
    #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
    pub struct BoardGraph {
        #[serde(flatten)]
        pub board: Board,
        pub nodes: Vec<BoardNode>,
        pub connections: Vec<BoardConnection>,
    }

    /// Keeps the first connection seen for every (source, target) pair.
    pub fn dedupe_connections(
        connections: Vec<BoardConnection>,
    ) -> Vec<BoardConnection> {
        let mut seen = ::std::collections::HashSet::new();

        connections
            .into_iter()
            .filter(|connection| {
                seen.insert((
                    connection.source_id.clone(),
                    connection.target_id.clone(),
                ))
            })
            .collect()
    }
}

pub mod requests {
    use super::node_type::NodeType;

    #[derive(Clone, Debug, Default, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateBoardRequest {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub owner_id: Option<String>,
    }

    #[derive(Clone, Debug, Default, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateBoardRequest {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
    }

    #[derive(Clone, Debug, Default, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateNodeRequest {
        #[serde(rename = "type", default)]
        pub node_type: Option<String>,
        #[serde(default)]
        pub position_x: Option<f64>,
        #[serde(default)]
        pub position_y: Option<f64>,
        #[serde(default)]
        pub width: Option<f64>,
        #[serde(default)]
        pub height: Option<f64>,
        #[serde(default)]
        pub content: Option<::serde_json::Value>,
    }

    #[derive(Clone, Debug, Default, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateNodeRequest {
        #[serde(rename = "type", default)]
        pub node_type: Option<NodeType>,
        #[serde(default)]
        pub position_x: Option<f64>,
        #[serde(default)]
        pub position_y: Option<f64>,
        #[serde(default)]
        pub width: Option<f64>,
        #[serde(default)]
        pub height: Option<f64>,
        #[serde(default)]
        pub content: Option<::serde_json::Value>,
    }
}

#[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::node_type::NodeType;
    use ::std::str::FromStr;

    #[test]
    fn client_tags_canonicalize_through_lookup_table() {
        assert_eq!(NodeType::from_client_tag("textNode"), NodeType::Text);
        assert_eq!(NodeType::from_client_tag("youtubeNode"), NodeType::Youtube);
        assert_eq!(NodeType::from_client_tag("imageNode"), NodeType::Image);
    }

    #[test]
    fn unknown_client_tags_fall_back_to_text() {
        for tag in ["chatNode", "pdfNode", "TEXT", "IMAGE", "", "textnode"] {
            assert_eq!(NodeType::from_client_tag(tag), NodeType::Text);
        }
    }

    #[test]
    fn client_tag_inverts_the_lookup_table() {
        for tag in ["textNode", "youtubeNode", "imageNode"] {
            assert_eq!(NodeType::from_client_tag(tag).client_tag(), tag);
        }

        assert_eq!(NodeType::Pdf.client_tag(), "textNode");
        assert_eq!(NodeType::Link.client_tag(), "textNode");
    }

    #[test]
    fn canonical_names_parse_and_serialize() -> ::anyhow::Result<()> {
        for node_type in [
            NodeType::Text,
            NodeType::Youtube,
            NodeType::Pdf,
            NodeType::Image,
            NodeType::Audio,
            NodeType::Link,
        ] {
            assert_eq!(NodeType::from_str(node_type.as_str())?, node_type);
            assert_eq!(
                ::serde_json::to_value(node_type)?,
                ::serde_json::json!(node_type.as_str())
            );
        }

        assert!(NodeType::from_str("VIDEO").is_err());

        Ok(())
    }

    #[test]
    fn node_snapshot_defaults_missing_fields() -> ::anyhow::Result<()> {
        let node: super::snapshot::NodeSnapshot =
            ::serde_json::from_value(::serde_json::json!({ "id": "n1" }))?;

        assert_eq!(node.node_type, "textNode");
        assert_eq!(node.position_x, 0.0);
        assert_eq!(node.position_y, 0.0);
        assert_eq!(node.content, ::serde_json::json!({}));

        Ok(())
    }

    #[test]
    fn node_snapshot_treats_null_as_absent() -> ::anyhow::Result<()> {
        let node: super::snapshot::NodeSnapshot =
            ::serde_json::from_value(::serde_json::json!({
                "id": "n1",
                "type": null,
                "positionX": null,
                "positionY": 7.5,
                "content": null,
            }))?;

        assert_eq!(node.node_type, "textNode");
        assert_eq!(node.position_x, 0.0);
        assert_eq!(node.position_y, 7.5);
        assert_eq!(node.content, ::serde_json::json!({}));

        Ok(())
    }

    #[test]
    fn node_snapshot_uses_wire_field_names() -> ::anyhow::Result<()> {
        let node = super::snapshot::NodeSnapshot {
            id: "n1".to_string(),
            node_type: "youtubeNode".to_string(),
            position_x: 1.0,
            position_y: 2.0,
            content: ::serde_json::json!({ "url": "https://youtu.be/x" }),
        };

        assert_eq!(
            ::serde_json::to_value(&node)?,
            ::serde_json::json!({
                "id": "n1",
                "type": "youtubeNode",
                "positionX": 1.0,
                "positionY": 2.0,
                "content": { "url": "https://youtu.be/x" },
            })
        );

        Ok(())
    }

    #[test]
    fn edge_snapshot_omits_absent_label() -> ::anyhow::Result<()> {
        let edge = super::snapshot::EdgeSnapshot {
            source: "a".to_string(),
            target: "b".to_string(),
            label: None,
        };

        assert_eq!(
            ::serde_json::to_value(&edge)?,
            ::serde_json::json!({ "source": "a", "target": "b" })
        );

        Ok(())
    }

    #[test]
    fn sync_request_tolerates_missing_collections() -> ::anyhow::Result<()> {
        let request: super::snapshot::SyncRequest =
            ::serde_json::from_str("{}")?;

        assert!(request.is_empty());

        Ok(())
    }

    #[test]
    fn dedupe_connections_keeps_first_per_pair() {
        let connection = |id: &str, source: &str, target: &str| {
            super::board::BoardConnection {
                id: id.to_string(),
                source_id: source.to_string(),
                target_id: target.to_string(),
                label: None,
            }
        };

        let deduped = super::board::dedupe_connections(vec![
            connection("c1", "a", "b"),
            connection("c2", "a", "b"),
            connection("c3", "b", "a"),
            connection("c4", "a", "c"),
        ]);

        let ids: Vec<&str> = deduped.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, vec!["c1", "c3", "c4"]);
    }

    #[test]
    fn board_list_item_serializes_node_count() -> ::anyhow::Result<()> {
        let item = super::board::BoardListItem {
            id: "b1".to_string(),
            name: "Research".to_string(),
            description: None,
            updated_at: ::chrono::DateTime::from_timestamp(0, 0)
                .ok_or_else(|| ::anyhow::anyhow!("timestamp"))?,
            count: super::board::NodeCount { nodes: 3 },
        };

        let value = ::serde_json::to_value(&item)?;

        assert_eq!(value["_count"]["nodes"], 3);
        assert!(value.get("updatedAt").is_some());

        Ok(())
    }
}
