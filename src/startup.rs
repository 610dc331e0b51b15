use crate::components::google_calendar::{
    GoogleCalendarClient, RedisTokenProvider, StaticTokenProvider, TokenProvider,
};
use crate::components::search::{
    SearchHandle, SearchRequest, SearchService, SearchSettings, ToolResponse,
};
use crate::config::Config;
use crate::error::{Error, SearchResult};
use crate::shutdown;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::oneshot;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration.
///
/// Logs go to stderr; stdout carries responses.
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire the search service to the Calendar API and the configured credential store
pub fn build_service(config: &Config) -> SearchResult<SearchService> {
    let client = Arc::new(GoogleCalendarClient::new(config)?);

    let tokens: Arc<dyn TokenProvider> = match &config.access_token {
        Some(token) => {
            info!("Using access token from environment");
            Arc::new(StaticTokenProvider::new(Some(token.clone())))
        }
        None => {
            info!("Using access token stored in Redis");
            Arc::new(RedisTokenProvider::new(
                &config.redis_url,
                &config.token_redis_key,
            )?)
        }
    };

    Ok(SearchService::new(
        client.clone(),
        client,
        tokens,
        SearchSettings::from_config(config),
    ))
}

/// Answer one request line
pub async fn handle_line(handle: &SearchHandle, line: &str) -> ToolResponse {
    match serde_json::from_str::<SearchRequest>(line) {
        Ok(request) => {
            debug!("Received search request: {:?}", request);
            handle.search(request).await.into()
        }
        Err(e) => ToolResponse::failure(&Error::from(e)),
    }
}

/// Serve JSON search requests from stdin, one per line, until EOF or a signal
pub async fn serve(config: Config) -> miette::Result<()> {
    let service = build_service(&config)?;
    let handle = SearchHandle::new(service);

    let (shutdown_send, mut shutdown_recv) = oneshot::channel();
    let signal_handle = handle.clone();
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, signal_handle).await;
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("Ready for search requests on stdin");

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.map_err(Error::from)?,
            _ = &mut shutdown_recv => {
                info!("Received shutdown signal, stopping");
                return Ok(());
            }
        };

        let Some(line) = line else {
            info!("Input closed, shutting down");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&handle, &line).await;
        let mut out = serde_json::to_string(&response).map_err(Error::from)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await.map_err(Error::from)?;
        stdout.flush().await.map_err(Error::from)?;
    }

    handle.shutdown().await?;
    Ok(())
}
