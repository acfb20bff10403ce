//! Payload fetching

use bench_trends_core::{
    normalize, DashboardPayload, GraphsSelector, RawDashboardPayload, SummaryPayload,
};
use gloo_net::http::Request;

/// Fetch the grid payload for `selector` and normalize it
pub async fn load_graphs(
    endpoint: &str,
    selector: &GraphsSelector,
) -> Result<DashboardPayload, String> {
    let url = format!("{endpoint}?{}", selector.to_query());
    let text = fetch_text(&url).await?;

    let raw = RawDashboardPayload::from_response_str(&text)
        .map_err(|e| format!("Failed to parse graphs payload: {}", e))?;
    tracing::debug!(
        commits = raw.commits.len(),
        benchmarks = raw.benchmarks.len(),
        "loaded graphs payload"
    );
    Ok(normalize(raw))
}

pub async fn load_summary(endpoint: &str) -> Result<SummaryPayload, String> {
    let text = fetch_text(endpoint).await?;
    let payload = SummaryPayload::from_response_str(&text)
        .map_err(|e| format!("Failed to parse summary payload: {}", e))?;
    tracing::debug!(versions = payload.versions.len(), "loaded summary payload");
    Ok(payload)
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch {}: {}", url, e))?;

    if !response.ok() {
        return Err(format!(
            "HTTP error: {} {}",
            response.status(),
            response.status_text()
        ));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))
}
