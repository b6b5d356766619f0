use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::error;

use crate::{
    dashboard::Dashboard,
    flow::{FlowDescriptor, FlowId},
};

#[derive(Debug, Default, Deserialize)]
pub struct PanelForm {
    #[serde(default)]
    pub query: String,
}

pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/flows", get(get_flows))
        .route("/panels/{flow}", get(get_panel).post(run_flow))
        .with_state(dashboard)
}

fn flow_id(dashboard: &Dashboard, raw: &str) -> Result<FlowId, StatusCode> {
    raw.parse::<FlowId>()
        .ok()
        .filter(|id| dashboard.contains(*id))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_flows(State(dashboard): State<Arc<Dashboard>>) -> Json<Vec<FlowDescriptor>> {
    Json(dashboard.flows().copied().collect())
}

async fn get_panel(
    State(dashboard): State<Arc<Dashboard>>,
    Path(flow): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let id = flow_id(&dashboard, &flow)?;
    let panel = dashboard.panel(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(panel.content().await))
}

async fn run_flow(
    State(dashboard): State<Arc<Dashboard>>,
    Path(flow): Path<String>,
    Form(form): Form<PanelForm>,
) -> Result<Response, StatusCode> {
    let id = flow_id(&dashboard, &flow)?;

    // detached so the panel still completes if the client goes away
    let task = tokio::spawn(async move { dashboard.trigger(id, &form.query).await });
    match task.await {
        Ok(Some(html)) => Ok(Html(html).into_response()),
        Ok(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => {
            error!(flow = %id, error = %err, "Flow task failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
