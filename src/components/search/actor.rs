use super::request::SearchRequest;
use super::response::SearchResponse;
use super::service::SearchService;
use crate::error::{Error, SearchResult};
use tokio::sync::mpsc;
use tracing::info;

/// The search actor that processes messages
pub struct SearchActor {
    service: SearchService,
    command_rx: mpsc::Receiver<SearchCommand>,
}

/// Commands that can be sent to the search actor
pub enum SearchCommand {
    Search(SearchRequest, mpsc::Sender<SearchResult<SearchResponse>>),
    Shutdown,
}

/// Handle for communicating with the search actor
#[derive(Clone)]
pub struct SearchActorHandle {
    command_tx: mpsc::Sender<SearchCommand>,
}

impl SearchActorHandle {
    /// Run a search and wait for its response
    pub async fn search(&self, request: SearchRequest) -> SearchResult<SearchResponse> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(SearchCommand::Search(request, response_tx))
            .await
            .map_err(|e| Error::Other(format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| Error::Other("Response channel closed".to_string()))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> SearchResult<()> {
        let _ = self.command_tx.send(SearchCommand::Shutdown).await;
        Ok(())
    }
}

impl SearchActor {
    /// Create a new actor and return its handle
    pub fn new(service: SearchService) -> (Self, SearchActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            service,
            command_rx,
        };

        (actor, SearchActorHandle { command_tx })
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Search actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                SearchCommand::Search(request, response_tx) => {
                    // Each search runs on its own task so a slow calendar does not stall the mailbox
                    let service = self.service.clone();
                    tokio::spawn(async move {
                        let result = service.search(request).await;
                        let _ = response_tx.send(result).await;
                    });
                }
                SearchCommand::Shutdown => {
                    info!("Search actor shutting down");
                    break;
                }
            }
        }

        info!("Search actor shut down");
    }
}
