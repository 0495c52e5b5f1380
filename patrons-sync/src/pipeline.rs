//! Shared sync pipeline entrypoint used by the CLI.
//!
//! fetch → classify → render → compare/publish → report → announce.

use std::collections::BTreeSet;
use std::path::PathBuf;

use patrons_api::{
    fetch_all_members, resolve_campaign_id, Announcement, MemberQuery, Notifier, Transport,
};
use patrons_core::{classify, Config, Member, Roster};
use patrons_renderer::{extract_names, Renderer};

use crate::diff::{documents_match, unified_diff};
use crate::error::{io_err, json_err, SyncError};
use crate::notify::{announce, new_names};
use crate::output::append_outputs;
use crate::writer::{publish, read_existing, WriteResult};

/// Where the member list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSource {
    /// The upstream API, using the configured token and campaign.
    Api,
    /// A local JSON array of members (`[{"name", "status", "amount_cents"}]`).
    File(PathBuf),
}

/// Switches for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Compare only: write nothing, report nothing, send nothing.
    pub dry_run: bool,
    /// Send announcements for new names.
    pub notify: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            notify: true,
        }
    }
}

/// Outcome of a sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub roster: Roster,
    pub write: WriteResult,
    /// New names per tier. Empty on the first run and when nothing changed.
    pub announcements: Vec<Announcement>,
    /// Announcements actually delivered.
    pub notified: usize,
}

/// What `sync` would change, without changing it.
#[derive(Debug, Clone)]
pub struct DiffPreview {
    pub roster: Roster,
    /// `false` when no document exists yet.
    pub existing: bool,
    /// Whether `sync` would rewrite the document. Comment-only edits do not count.
    pub changed: bool,
    /// Unified diff of on-disk → rendered; `None` when identical.
    pub diff: Option<String>,
}

// ---------------------------------------------------------------------------
// Member loading
// ---------------------------------------------------------------------------

/// Obtain the member list from `source`.
///
/// For [`MemberSource::Api`] this resolves the campaign id first when the
/// config does not name one.
pub fn load_members(
    config: &Config,
    source: &MemberSource,
    transport: &dyn Transport,
) -> Result<Vec<Member>, SyncError> {
    match source {
        MemberSource::Api => {
            let token = config.access_token()?;
            let campaign_id = match &config.campaign_id {
                Some(id) => id.clone(),
                None => resolve_campaign_id(transport, &config.api_base, token)?,
            };
            tracing::info!("fetching members for campaign {campaign_id}...");

            let query = MemberQuery {
                api_base: &config.api_base,
                campaign_id: &campaign_id,
                page_size: config.page_size,
                max_pages: config.max_pages,
            };
            let report = fetch_all_members(transport, token, &query)?;
            Ok(report.members)
        }
        MemberSource::File(path) => {
            let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
            let members: Vec<Member> =
                serde_json::from_str(&contents).map_err(|e| json_err(path, e))?;
            tracing::info!("loaded {} members from {}", members.len(), path.display());
            Ok(members)
        }
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Classify `members`, render, publish if changed, report, and announce.
///
/// `notifier` is `None` when no webhook is configured.
pub fn run(
    config: &Config,
    members: &[Member],
    notifier: Option<&dyn Notifier>,
    options: SyncOptions,
) -> Result<SyncReport, SyncError> {
    let roster = classify(members);
    tracing::info!("paying patrons: {}", roster.gold.len());
    tracing::info!("free followers: {}", roster.silver.len());

    let renderer = Renderer::new()?;
    let document = renderer.render(&roster, &config.registry)?;

    let existing = read_existing(&config.output_path)?;
    let write = publish(
        &config.output_path,
        &document,
        existing.as_deref(),
        options.dry_run,
    )?;

    if !write.changed() {
        tracing::info!("no changes detected in patron list");
        if !options.dry_run {
            append_outputs(config.github_output.as_deref(), false, &roster)?;
        }
        return Ok(SyncReport {
            roster,
            write,
            announcements: Vec::new(),
            notified: 0,
        });
    }

    let announcements = match existing.as_deref() {
        Some(previous) => {
            let previous: BTreeSet<String> = extract_names(previous).into_iter().collect();
            new_names(&roster, &previous)
        }
        None => {
            tracing::info!("no previous patron file; skipping new-supporter notifications");
            Vec::new()
        }
    };

    if options.dry_run {
        return Ok(SyncReport {
            roster,
            write,
            announcements,
            notified: 0,
        });
    }

    append_outputs(config.github_output.as_deref(), true, &roster)?;

    let notified = match notifier {
        Some(notifier) if options.notify => announce(notifier, &announcements),
        Some(_) => {
            if !announcements.is_empty() {
                tracing::info!("notifications disabled for this run");
            }
            0
        }
        None => {
            if !announcements.is_empty() {
                tracing::info!("no webhook configured; skipping notifications");
            }
            0
        }
    };

    Ok(SyncReport {
        roster,
        write,
        announcements,
        notified,
    })
}

// ---------------------------------------------------------------------------
// preview
// ---------------------------------------------------------------------------

/// Render `members` and diff against the on-disk document. Writes nothing.
pub fn preview(config: &Config, members: &[Member]) -> Result<DiffPreview, SyncError> {
    let roster = classify(members);
    let document = Renderer::new()?.render(&roster, &config.registry)?;
    let existing = read_existing(&config.output_path)?;

    let label = config
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| config.output_path.display().to_string());
    let diff = unified_diff(existing.as_deref().unwrap_or(""), &document, &label);
    let changed = match existing.as_deref() {
        Some(existing) => !documents_match(existing, &document),
        None => true,
    };

    Ok(DiffPreview {
        roster,
        existing: existing.is_some(),
        changed,
        diff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use patrons_api::ApiError;
    use patrons_core::PatronStatus;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    struct Canned;

    impl Transport for Canned {
        fn get_json(&self, url: &str, _bearer: &str) -> Result<Value, ApiError> {
            if url.ends_with("/campaigns") {
                Ok(json!({"data": [{"id": "99"}]}))
            } else {
                assert!(url.contains("/campaigns/99/members"), "url: {url}");
                Ok(json!({"data": [
                    {"attributes": {"full_name": "Amy", "patron_status": "active_patron", "currently_entitled_amount_cents": 500}}
                ]}))
            }
        }

        fn post_json(&self, _url: &str, _body: &Value) -> Result<(), ApiError> {
            unreachable!()
        }
    }

    #[test]
    fn api_source_resolves_campaign_when_missing() {
        let config = Config {
            access_token: Some("tok".into()),
            ..Config::default()
        };
        let members = load_members(&config, &MemberSource::Api, &Canned).unwrap();
        assert_eq!(members, vec![Member::new("Amy", PatronStatus::Active, 500)]);
    }

    #[test]
    fn api_source_requires_token() {
        let err = load_members(&Config::default(), &MemberSource::Api, &Canned).unwrap_err();
        assert!(matches!(err, SyncError::Config(_)), "got: {err}");
    }

    #[test]
    fn file_source_reads_members() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("members.json");
        std::fs::write(
            &path,
            r#"[{"name":"Amy","status":"active_patron","amount_cents":500},{"name":"Bo"}]"#,
        )
        .unwrap();
        let members =
            load_members(&Config::default(), &MemberSource::File(path), &Canned).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].status, PatronStatus::None);
    }

    #[test]
    fn preview_against_missing_document_shows_whole_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config {
            output_path: tmp.path().join("PatronsInit.lua"),
            ..Config::default()
        };
        let preview = preview(&config, &[Member::new("Amy", PatronStatus::Active, 5)]).unwrap();
        assert!(!preview.existing);
        assert!(preview.changed);
        let diff = preview.diff.expect("diff");
        assert!(diff.contains("+        { name = \"Amy\", tier = \"gold\" },"));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn preview_ignores_comment_only_edits() {
        let tmp = TempDir::new().unwrap();
        let config = Config {
            output_path: tmp.path().join("PatronsInit.lua"),
            ..Config::default()
        };
        let members = [Member::new("Amy", PatronStatus::Active, 5)];
        run(&config, &members, None, SyncOptions::default()).unwrap();

        let edited = std::fs::read_to_string(&config.output_path)
            .unwrap()
            .replacen("-- ", "-- edited by hand: ", 1);
        std::fs::write(&config.output_path, edited).unwrap();

        let preview = preview(&config, &members).unwrap();
        assert!(!preview.changed);
        assert!(preview.diff.is_some(), "full-text diff still sees the edit");
    }
}
