use super::actor::{SearchActor, SearchActorHandle};
use super::request::SearchRequest;
use super::response::SearchResponse;
use super::service::SearchService;
use crate::error::SearchResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the search actor
#[derive(Clone)]
pub struct SearchHandle {
    actor_handle: SearchActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl SearchHandle {
    /// Create a new SearchHandle and spawn the actor
    pub fn new(service: SearchService) -> Self {
        let (mut actor, handle) = SearchActor::new(service);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Run a federated search
    pub async fn search(&self, request: SearchRequest) -> SearchResult<SearchResponse> {
        self.actor_handle.search(request).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> SearchResult<()> {
        self.actor_handle.shutdown().await
    }
}
