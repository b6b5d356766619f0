//! Result panel with a generation guard
//!
//! Each request bumps the panel's generation and receives a token for it.
//! Only the holder of the latest token may write the final content, so a
//! slow earlier request can never overwrite a newer one.

use tokio::sync::Mutex;
use tracing::debug;

pub const LOADING: &str = "Loading...";

/// Proof of having started the request for one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
struct PanelState {
    generation: u64,
    content: String,
}

/// Content of one flow's result container
#[derive(Debug, Default)]
pub struct Panel {
    state: Mutex<PanelState>,
}

impl Panel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request: show the loading text and hand out the new token
    pub async fn begin(&self) -> RequestToken {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.content = LOADING.to_string();
        RequestToken(state.generation)
    }

    /// Write `html` if `token` is still current. Returns whether it was written.
    pub async fn complete(&self, token: RequestToken, html: String) -> bool {
        let mut state = self.state.lock().await;
        if token.0 != state.generation {
            debug!(
                token = token.0,
                latest = state.generation,
                "Discarding stale panel update"
            );
            return false;
        }
        state.content = html;
        true
    }

    pub async fn content(&self) -> String {
        self.state.lock().await.content.clone()
    }
}
