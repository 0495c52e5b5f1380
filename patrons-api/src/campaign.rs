//! Campaign id discovery.

use serde::Deserialize;

use crate::error::ApiError;
use crate::transport::Transport;

#[derive(Debug, Deserialize)]
struct CampaignList {
    #[serde(default)]
    data: Option<Vec<CampaignRecord>>,
}

#[derive(Debug, Deserialize)]
struct CampaignRecord {
    id: String,
}

/// Return the first campaign owned by the token's account.
pub fn resolve_campaign_id(
    transport: &dyn Transport,
    api_base: &str,
    token: &str,
) -> Result<String, ApiError> {
    let url = format!("{}/campaigns", api_base.trim_end_matches('/'));
    let value = transport.get_json(&url, token)?;
    let list: CampaignList =
        serde_json::from_value(value).map_err(|source| ApiError::Json { url, source })?;

    let id = list
        .data
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|c| c.id)
        .ok_or(ApiError::NoCampaigns)?;
    tracing::info!("found campaign ID: {id}");
    Ok(id)
}
