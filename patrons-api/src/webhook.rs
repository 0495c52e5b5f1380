//! Chat webhook announcements (Discord-style embeds).

use serde::Serialize;
use serde_json::Value;

use patrons_core::Tier;

use crate::error::ApiError;
use crate::transport::Transport;

const GOLD_COLOR: u32 = 0xFF_D7_00;
const SILVER_COLOR: u32 = 0xC0_C0_C0;

/// Names that newly appeared in one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub tier: Tier,
    pub names: Vec<String>,
}

/// Something that can deliver an [`Announcement`].
pub trait Notifier {
    fn notify(&self, announcement: &Announcement) -> Result<(), ApiError>;
}

#[derive(Debug, Serialize)]
struct WebhookBody {
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    color: u32,
    footer: Footer,
}

#[derive(Debug, Serialize)]
struct Footer {
    text: String,
}

impl Announcement {
    pub fn title(&self) -> String {
        match (self.tier, self.names.len()) {
            (Tier::Gold, 1) => "New Gold Patron!".to_string(),
            (Tier::Silver, 1) => "New Silver Supporter!".to_string(),
            (Tier::Gold, n) => format!("{n} New Gold Patrons!"),
            (Tier::Silver, n) => format!("{n} New Silver Supporters!"),
        }
    }

    pub fn description(&self) -> String {
        match self.names.as_slice() {
            [only] => match self.tier {
                Tier::Gold => format!("**{only}** just became a gold patron!"),
                Tier::Silver => format!("**{only}** joined as a silver supporter!"),
            },
            many => many
                .iter()
                .map(|name| format!("• {name}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn color(&self) -> u32 {
        match self.tier {
            Tier::Gold => GOLD_COLOR,
            Tier::Silver => SILVER_COLOR,
        }
    }

    /// JSON body posted to the webhook.
    pub fn payload(&self, footer: &str) -> Result<Value, serde_json::Error> {
        let body = WebhookBody {
            embeds: vec![Embed {
                title: self.title(),
                description: self.description(),
                color: self.color(),
                footer: Footer {
                    text: footer.to_string(),
                },
            }],
        };
        serde_json::to_value(body)
    }
}

/// Posts announcements to a configured webhook URL.
pub struct WebhookNotifier<T: Transport> {
    transport: T,
    url: String,
    footer: String,
}

impl<T: Transport> WebhookNotifier<T> {
    pub fn new(transport: T, url: impl Into<String>, footer: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
            footer: footer.into(),
        }
    }
}

impl<T: Transport> Notifier for WebhookNotifier<T> {
    fn notify(&self, announcement: &Announcement) -> Result<(), ApiError> {
        let body = announcement
            .payload(&self.footer)
            .map_err(|source| ApiError::Encode {
                url: self.url.clone(),
                source,
            })?;
        self.transport.post_json(&self.url, &body)?;
        tracing::info!(
            "sent {} notification for {} name(s)",
            announcement.tier,
            announcement.names.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn ann(tier: Tier, names: &[&str]) -> Announcement {
        Announcement {
            tier,
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    #[test]
    fn single_name_uses_singular_phrasing() {
        let a = ann(Tier::Gold, &["Cy"]);
        assert_eq!(a.title(), "New Gold Patron!");
        assert_eq!(a.description(), "**Cy** just became a gold patron!");

        let s = ann(Tier::Silver, &["Di"]);
        assert_eq!(s.title(), "New Silver Supporter!");
        assert_eq!(s.description(), "**Di** joined as a silver supporter!");
    }

    #[test]
    fn many_names_render_as_bullets() {
        let a = ann(Tier::Silver, &["Ann", "Ben"]);
        assert_eq!(a.title(), "2 New Silver Supporters!");
        assert_eq!(a.description(), "• Ann\n• Ben");
    }

    #[test]
    fn payload_has_embed_shape() {
        let body = ann(Tier::Gold, &["Cy"])
            .payload("Patreon Supporters")
            .expect("payload encodes");
        assert!(body.is_object());
        let embed = &body["embeds"][0];
        assert_eq!(embed["title"], "New Gold Patron!");
        assert_eq!(embed["color"], 0xFFD700);
        assert_eq!(embed["footer"]["text"], "Patreon Supporters");
    }

    struct Recording {
        posts: RefCell<Vec<(String, Value)>>,
    }

    impl Transport for &Recording {
        fn get_json(&self, _url: &str, _bearer: &str) -> Result<Value, ApiError> {
            unreachable!()
        }

        fn post_json(&self, url: &str, body: &Value) -> Result<(), ApiError> {
            self.posts.borrow_mut().push((url.to_string(), body.clone()));
            Ok(())
        }
    }

    #[test]
    fn webhook_notifier_posts_to_configured_url() {
        let rec = Recording {
            posts: RefCell::new(Vec::new()),
        };
        let notifier = WebhookNotifier::new(&rec, "https://hooks.example/x", "footer");
        notifier.notify(&ann(Tier::Silver, &["Ann"])).unwrap();

        let posts = rec.posts.borrow();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "https://hooks.example/x");
        assert!(posts[0].1.is_object(), "body must be the encoded embed");
        assert_eq!(posts[0].1["embeds"][0]["footer"]["text"], "footer");
    }
}
