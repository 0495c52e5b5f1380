//! Paginated campaign member fetch.
//!
//! Follows `links.next` until it disappears, the page cap is hit, or the API
//! hands back the URL it just served (a malformed cursor that would otherwise
//! loop forever). Any request or decoding failure aborts the whole fetch.

use serde::Deserialize;

use patrons_core::{Member, PatronStatus, PLACEHOLDER_NAME};

use crate::error::ApiError;
use crate::transport::Transport;

/// Member attributes requested from the API.
pub const MEMBER_FIELDS: &str = "full_name,patron_status,currently_entitled_amount_cents,email";

/// What to fetch and how far to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery<'a> {
    pub api_base: &'a str,
    pub campaign_id: &'a str,
    pub page_size: u32,
    pub max_pages: usize,
}

impl MemberQuery<'_> {
    /// First page URL; later pages come from the API's `next` links.
    pub fn first_page_url(&self) -> String {
        format!(
            "{}/campaigns/{}/members?fields[member]={}&page[count]={}",
            self.api_base.trim_end_matches('/'),
            self.campaign_id,
            MEMBER_FIELDS,
            self.page_size
        )
    }
}

/// Why pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No `next` link on the last page.
    Exhausted,
    /// `max_pages` pages were fetched and more were offered.
    PageCap,
    /// `next` pointed at the page just fetched.
    RepeatedLink,
}

/// Result of a complete member fetch.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub members: Vec<Member>,
    pub pages: usize,
    pub stop: StopReason,
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MembersPage {
    #[serde(default)]
    data: Option<Vec<MemberRecord>>,
    #[serde(default)]
    links: Option<PageLinks>,
}

#[derive(Debug, Deserialize)]
struct PageLinks {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    #[serde(default)]
    attributes: Option<MemberAttributes>,
}

#[derive(Debug, Default, Deserialize)]
struct MemberAttributes {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    patron_status: Option<String>,
    #[serde(default)]
    currently_entitled_amount_cents: Option<i64>,
}

impl From<MemberAttributes> for Member {
    fn from(attrs: MemberAttributes) -> Self {
        Member {
            name: attrs
                .full_name
                .unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            status: PatronStatus::from_wire(attrs.patron_status.as_deref()),
            amount_cents: attrs.currently_entitled_amount_cents.unwrap_or(0).max(0) as u64,
        }
    }
}

// ---------------------------------------------------------------------------
// fetch_all_members
// ---------------------------------------------------------------------------

/// Fetch every member of the campaign.
pub fn fetch_all_members(
    transport: &dyn Transport,
    token: &str,
    query: &MemberQuery<'_>,
) -> Result<FetchReport, ApiError> {
    let mut members = Vec::new();
    let mut pages = 0usize;
    let mut previous: Option<String> = None;
    let mut next = Some(query.first_page_url());
    let mut stop = StopReason::Exhausted;

    while let Some(url) = next.take() {
        if previous.as_deref() == Some(url.as_str()) {
            tracing::warn!("pagination returned the same URL twice, stopping");
            stop = StopReason::RepeatedLink;
            break;
        }
        if pages >= query.max_pages {
            tracing::warn!("reached maximum page limit ({})", query.max_pages);
            stop = StopReason::PageCap;
            break;
        }

        pages += 1;
        tracing::info!("fetching members page {pages}...");
        let value = transport.get_json(&url, token)?;
        let page: MembersPage = serde_json::from_value(value).map_err(|source| ApiError::Json {
            url: url.clone(),
            source,
        })?;

        let before = members.len();
        members.extend(
            page.data
                .unwrap_or_default()
                .into_iter()
                .map(|record| Member::from(record.attributes.unwrap_or_default())),
        );
        tracing::debug!("page {pages}: {} members", members.len() - before);

        next = page
            .links
            .and_then(|links| links.next)
            .filter(|link| !link.is_empty());
        previous = Some(url);
    }

    tracing::info!("found {} total members across {pages} pages", members.len());
    Ok(FetchReport {
        members,
        pages,
        stop,
    })
}
