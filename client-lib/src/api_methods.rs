use anyhow::{anyhow, Result};
use reqwest::{Client, Method, RequestBuilder, Url};

use board_protocol::model::board::{Board, BoardGraph, BoardListItem};
use board_protocol::model::requests::CreateBoardRequest;
use board_protocol::model::snapshot::SyncRequest;

pub struct ApiMethods {
    user_agent: String,
    client: Client,
    server: String,
}

impl ApiMethods {
    pub fn new(server: &str) -> Self {
        ApiMethods {
            user_agent: format!("board-client-{}", env!("CARGO_PKG_VERSION")),
            client: Client::new(),
            server: server.to_string(),
        }
    }

    /// Joins path segments onto the server url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.server)?;

        url.path_segments_mut()
            .map_err(|_| anyhow!("{} cannot be a base url", self.server))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn request_builder(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder> {
        Ok(self
            .client
            .request(method, self.endpoint(segments)?)
            .header("x-board-user-agent", &self.user_agent))
    }

    async fn check_response(
        name: &str,
        response: &reqwest::Response,
    ) -> Result<()> {
        if !response.status().is_success() {
            let status = response.status();
            let url = response.url().clone();
            return Err(anyhow!(
                "{} to {} failed with status code {}.",
                name,
                url,
                status
            ));
        }
        Ok(())
    }

    pub async fn list_boards(&self) -> Result<Vec<BoardListItem>> {
        let response = self
            .request_builder(Method::GET, &["boards"])?
            .send()
            .await?;

        Self::check_response("listBoards", &response).await?;

        Ok(response.json().await?)
    }

    pub async fn get_board(&self, board_id: &str) -> Result<BoardGraph> {
        let response = self
            .request_builder(Method::GET, &["boards", board_id])?
            .send()
            .await?;

        Self::check_response("getBoard", &response).await?;

        Ok(response.json().await?)
    }

    pub async fn create_board(
        &self,
        request: &CreateBoardRequest,
    ) -> Result<Board> {
        let response = self
            .request_builder(Method::POST, &["boards"])?
            .json(request)
            .send()
            .await?;

        Self::check_response("createBoard", &response).await?;

        Ok(response.json().await?)
    }

    pub async fn delete_board(&self, board_id: &str) -> Result<()> {
        let response = self
            .request_builder(Method::DELETE, &["boards", board_id])?
            .send()
            .await?;

        Self::check_response("deleteBoard", &response).await
    }

    pub async fn sync_board(
        &self,
        board_id: &str,
        snapshot: &SyncRequest,
    ) -> Result<()> {
        let response = self
            .request_builder(Method::PUT, &["boards", board_id, "sync"])?
            .json(snapshot)
            .send()
            .await?;

        Self::check_response("syncBoard", &response).await
    }
}

#[async_trait::async_trait]
impl crate::scheduler::SyncTransport for ApiMethods {
    async fn sync_board(
        &self,
        board_id: &str,
        snapshot: &SyncRequest,
    ) -> Result<()> {
        ApiMethods::sync_board(self, board_id, snapshot).await
    }
}
