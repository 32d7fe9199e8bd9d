//! Hook entry points wired to an explicitly constructed extension instance.

use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

use report_config::{ConfigResult, ExtensionConfig};
use report_config::schema::FETCH_ERROR;
use report_primitives::{SiteDescriptor, SiteId};
use report_render::{UserRecord, UserRenderer};
use report_tokens::{ParsedTokens, TokenCatalog, TokenSection, UserTokens, register_tokens};
use tracing::{debug, info, warn};

use crate::decode::decode_users;
use crate::source::{SourceResult, UserSource};

/// Host capability check used to decide whether the extension should attach.
pub trait ReportsHost {
    /// Returns `true` when the host's reporting add-on is installed and active.
    fn reports_extension_active(&self) -> bool;
}

/// Rendered values of both tokens for one site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedUsers {
    list: String,
    table: String,
}

impl RenderedUsers {
    /// Creates a value pair.
    #[must_use]
    pub fn new(list: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            table: table.into(),
        }
    }

    /// Same placeholder text for both tokens.
    #[must_use]
    pub fn placeholder(text: &str) -> Self {
        Self::new(text, text)
    }

    /// Value of the list token.
    #[must_use]
    pub fn list(&self) -> &str {
        &self.list
    }

    /// Value of the table token.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}

/// The user listing extension: token registration and token resolution.
pub struct AllUsersExtension {
    tokens: UserTokens,
    renderer: UserRenderer,
    fetch_error: String,
    source: Arc<dyn UserSource>,
}

impl fmt::Debug for AllUsersExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllUsersExtension")
            .field("tokens", &self.tokens)
            .field("renderer", &self.renderer)
            .field("fetch_error", &self.fetch_error)
            .field("source", &"dyn UserSource")
            .finish()
    }
}

impl AllUsersExtension {
    /// Creates an extension with the default tokens and texts.
    #[must_use]
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        Self {
            tokens: UserTokens::default(),
            renderer: UserRenderer::default(),
            fetch_error: FETCH_ERROR.to_owned(),
            source,
        }
    }

    /// Creates an extension driven by `config`.
    ///
    /// # Errors
    ///
    /// Returns any error reported by [`ExtensionConfig::validate`].
    pub fn with_config(config: &ExtensionConfig, source: Arc<dyn UserSource>) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            tokens: config.user_tokens()?,
            renderer: config.renderer(),
            fetch_error: config.messages.fetch_error.clone(),
            source,
        })
    }

    /// Builds the extension only when the host's reporting add-on is active.
    ///
    /// # Errors
    ///
    /// Returns any error reported by [`ExtensionConfig::validate`].
    pub fn activate<H>(
        host: &H,
        config: &ExtensionConfig,
        source: Arc<dyn UserSource>,
    ) -> ConfigResult<Option<Self>>
    where
        H: ReportsHost + ?Sized,
    {
        if !host.reports_extension_active() {
            debug!("reports add-on inactive; user tokens not attached");
            return Ok(None);
        }
        let extension = Self::with_config(config, source)?;
        info!(
            list = %extension.tokens.list(),
            table = %extension.tokens.table(),
            "user listing tokens attached"
        );
        Ok(Some(extension))
    }

    /// Tokens handled by this instance.
    #[must_use]
    pub fn tokens(&self) -> &UserTokens {
        &self.tokens
    }

    /// Token catalog hook: returns `catalog` with both tokens added.
    #[must_use]
    pub fn register_tokens(&self, catalog: Option<TokenCatalog>) -> TokenCatalog {
        register_tokens(catalog, &self.tokens)
    }

    /// Looks up, decodes, and renders the users of `site`.
    ///
    /// Never fails: a lookup error yields the fetch error text for both
    /// tokens and an empty list yields the no-users text.
    pub async fn resolve(&self, site: SiteDescriptor) -> RenderedUsers {
        let users = match self.load_users(site.id()).await {
            Ok(users) => users,
            Err(err) => {
                warn!(site_id = ?site.id().map(SiteId::get), error = %err, "fetching users failed");
                return RenderedUsers::placeholder(&self.fetch_error);
            }
        };

        if users.is_empty() {
            return RenderedUsers::placeholder(self.renderer.no_users());
        }

        debug!(site_id = ?site.id().map(SiteId::get), records = users.len(), "rendering users");
        RenderedUsers::new(
            self.renderer.render_list(&users),
            self.renderer.render_table(&users),
        )
    }

    /// Parsed-tokens hook: advertises both tokens in every section and
    /// provides their values for `site`.
    pub async fn contribute_parsed_tokens(
        &self,
        mut parsed: ParsedTokens,
        site: SiteDescriptor,
    ) -> ParsedTokens {
        parsed.ensure_sections();
        let rendered = self.resolve(site).await;

        for section in TokenSection::ALL {
            parsed.advertise(section, self.tokens.list());
            parsed.advertise(section, self.tokens.table());
            parsed.provide(section, self.tokens.list(), rendered.list());
            parsed.provide(section, self.tokens.table(), rendered.table());
        }
        parsed
    }

    /// Replaces both tokens inside a body or header text.
    ///
    /// Text without either token is returned unchanged and the data source is
    /// not consulted.
    pub async fn substitute(&self, text: &str, site: SiteDescriptor) -> String {
        let list = self.tokens.list().as_str();
        let table = self.tokens.table().as_str();
        if !text.contains(list) && !text.contains(table) {
            return text.to_owned();
        }

        let rendered = self.resolve(site).await;
        replace_tokens(text, &[(list, rendered.list()), (table, rendered.table())])
    }

    async fn load_users(&self, site: Option<SiteId>) -> SourceResult<Vec<UserRecord>> {
        let Some(site) = site else {
            debug!("site descriptor has no id; treating as no users");
            return Ok(Vec::new());
        };
        let blob = self.source.fetch_users_json(site).await?;
        Ok(decode_users(blob.as_deref()))
    }
}

/// Single left-to-right pass so rendered values are never rescanned for
/// tokens. At equal positions the longer token wins.
fn replace_tokens(text: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let next = replacements
            .iter()
            .filter_map(|&(token, value)| rest.find(token).map(|at| (at, token, value)))
            .min_by_key(|&(at, token, _)| (at, Reverse(token.len())));
        let Some((at, token, value)) = next else {
            break;
        };
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + token.len()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use report_primitives::Token;
    use report_render::render::NO_USERS;
    use serde_json::json;

    use super::*;
    use crate::source::{FnUserSource, InMemoryUserSource, SourceError};

    const ALICE: &str = r#"[{"login":"alice","email":"a@x.com","roles":["editor","author"]}]"#;

    fn site(raw: u64) -> SiteDescriptor {
        SiteDescriptor::new(SiteId::new(raw).expect("site id"))
    }

    fn extension_with(site_id: u64, blob: &str) -> AllUsersExtension {
        let source = InMemoryUserSource::new();
        source.insert(SiteId::new(site_id).expect("site id"), blob);
        AllUsersExtension::new(Arc::new(source))
    }

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl UserSource for CountingSource {
        async fn fetch_users_json(&self, _site: SiteId) -> SourceResult<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(ALICE.to_owned()))
        }
    }

    struct Host(bool);

    impl ReportsHost for Host {
        fn reports_extension_active(&self) -> bool {
            self.0
        }
    }

    #[tokio::test]
    async fn resolves_list_and_table() {
        let extension = extension_with(4, ALICE);
        let rendered = extension.resolve(site(4)).await;
        assert_eq!(rendered.list(), "alice (a@x.com) - editor, author");
        assert!(rendered.table().contains(">editor, author</td>"));
    }

    #[tokio::test]
    async fn missing_or_invalid_blob_yields_no_users() {
        let extension = extension_with(4, "not json");
        assert_eq!(extension.resolve(site(4)).await, RenderedUsers::placeholder(NO_USERS));
        assert_eq!(extension.resolve(site(5)).await, RenderedUsers::placeholder(NO_USERS));
        assert_eq!(
            extension.resolve(SiteDescriptor::unknown()).await,
            RenderedUsers::placeholder(NO_USERS)
        );
    }

    #[tokio::test]
    async fn source_failure_yields_fetch_error() {
        let source = FnUserSource::new(|_| Err(SourceError::unavailable("db down")));
        let extension = AllUsersExtension::new(Arc::new(source));
        assert_eq!(
            extension.resolve(site(1)).await,
            RenderedUsers::placeholder(FETCH_ERROR)
        );
    }

    #[tokio::test]
    async fn substitute_replaces_both_tokens() {
        let extension = extension_with(2, ALICE);
        let text = "Users:\n[allusers]\n\n[allusers.table]";
        let out = extension.substitute(text, site(2)).await;
        assert!(out.starts_with("Users:\nalice (a@x.com) - editor, author\n\n<table"));
        assert!(!out.contains("[allusers"));
    }

    #[tokio::test]
    async fn substitute_without_tokens_skips_lookup() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let extension = AllUsersExtension::new(Arc::clone(&source) as Arc<dyn UserSource>);

        let text = "Monthly report for [client.name]";
        assert_eq!(extension.substitute(text, site(1)).await, text);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);

        extension.substitute("[allusers]", site(1)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rendered_values_are_not_rescanned() {
        let extension = extension_with(6, r#"[{"login":"[allusers.table]","email":"e@x.com"}]"#);
        let out = extension.substitute("[allusers]", site(6)).await;
        assert_eq!(out, "[allusers.table] (e@x.com) - No role");
    }

    #[test]
    fn replace_tokens_prefers_longest_match() {
        let out = replace_tokens("[a] [a.b] [a]", &[("[a]", "x"), ("[a.b]", "y")]);
        assert_eq!(out, "x y x");
    }

    #[tokio::test]
    async fn parsed_tokens_cover_body_and_header() {
        let extension = extension_with(3, ALICE);
        let existing: ParsedTokens = serde_json::from_value(json!({
            "other_tokens": { "body": ["[client.name]"] },
            "other_tokens_data": { "body": { "[client.name]": "Acme" } },
        }))
        .expect("parsed");

        let parsed = extension.contribute_parsed_tokens(existing, site(3)).await;

        assert_eq!(
            parsed.tokens(TokenSection::Body),
            ["[client.name]", "[allusers]", "[allusers.table]"]
        );
        assert_eq!(parsed.tokens(TokenSection::Header), ["[allusers]", "[allusers.table]"]);
        for section in TokenSection::ALL {
            assert_eq!(
                parsed.value(section, "[allusers]"),
                Some("alice (a@x.com) - editor, author")
            );
            assert!(
                parsed
                    .value(section, "[allusers.table]")
                    .is_some_and(|html| html.starts_with("<table"))
            );
        }
        assert_eq!(parsed.value(TokenSection::Body, "[client.name]"), Some("Acme"));
    }

    #[tokio::test]
    async fn configured_texts_and_tokens_are_used() {
        let config = ExtensionConfig::from_json_str(
            r#"{
                "tokens": { "list": "[members]", "table": "[members.table]" },
                "messages": { "fetch_error": "Users unavailable" }
            }"#,
        )
        .expect("config");
        let source = FnUserSource::new(|_| Err(SourceError::query("boom")));
        let extension = AllUsersExtension::with_config(&config, Arc::new(source)).expect("extension");

        assert_eq!(extension.tokens().list(), &Token::new("[members]").expect("token"));
        let out = extension.substitute("[members] / [allusers]", site(1)).await;
        assert_eq!(out, "Users unavailable / [allusers]");

        let catalog = extension.register_tokens(None);
        assert!(catalog.contains("[members]"));
        assert!(catalog.contains("[members.table]"));
    }

    #[test]
    fn activation_requires_active_host() {
        let config = ExtensionConfig::default();
        let source: Arc<dyn UserSource> = Arc::new(InMemoryUserSource::new());

        let inactive = AllUsersExtension::activate(&Host(false), &config, Arc::clone(&source))
            .expect("valid config");
        assert!(inactive.is_none());

        let active = AllUsersExtension::activate(&Host(true), &config, source).expect("valid config");
        assert!(active.is_some());
    }
}
