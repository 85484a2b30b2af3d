use crate::util::from_lsp_range;
use dashmap::DashMap;
use galah_core::{Settings, TextDocument};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};

/// Open galah documents, the active settings, and cancellation for
/// requests that are still running.
pub struct Session {
    documents: DashMap<Url, Arc<TextDocument>>,
    settings: RwLock<Settings>,
    inflight: DashMap<Url, CancellationToken>,
    cancel_token: CancellationToken,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            documents: DashMap::new(),
            settings: RwLock::new(settings),
            inflight: DashMap::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Merges `overrides` into the current settings. On error the current
    /// settings are kept.
    pub async fn update_settings(&self, overrides: &serde_json::Value) -> galah_core::Result<()> {
        let mut guard = self.settings.write().await;
        let next = guard.merged(overrides)?;
        *guard = next;
        Ok(())
    }

    /// Applies a `workspace/didChangeConfiguration` payload. The `galah`
    /// section is used when present, otherwise the whole payload.
    pub async fn apply_configuration(&self, payload: &serde_json::Value) -> galah_core::Result<()> {
        let section = payload.get("galah").unwrap_or(payload);
        self.update_settings(section).await
    }

    /// Stores the document if it is a galah document. Returns whether it was
    /// accepted.
    pub async fn open(&self, uri: Url, language_id: &str, text: String, version: i32) -> bool {
        if !self.settings.read().await.accepts(language_id, uri.as_str()) {
            return false;
        }
        self.documents
            .insert(uri, Arc::new(TextDocument::new(text, version)));
        true
    }

    /// Applies content changes in order. Unknown documents are ignored.
    pub fn change(&self, uri: &Url, version: i32, changes: &[TextDocumentContentChangeEvent]) {
        if let Some(mut entry) = self.documents.get_mut(uri) {
            let mut next = (**entry).clone();
            for change in changes {
                next.apply_change(change.range.map(from_lsp_range), &change.text);
            }
            next.version = version;
            *entry = Arc::new(next);
        }
    }

    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
        if let Some((_, token)) = self.inflight.remove(uri) {
            token.cancel();
        }
    }

    /// The text as it is right now. Later edits do not affect the snapshot.
    pub fn document(&self, uri: &Url) -> Option<Arc<TextDocument>> {
        self.documents.get(uri).map(|d| Arc::clone(d.value()))
    }

    /// Starts a request on `uri`, cancelling the previous one on the same
    /// document.
    pub fn begin_request(&self, uri: &Url) -> CancellationToken {
        let token = self.cancel_token.child_token();
        if let Some(previous) = self.inflight.insert(uri.clone(), token.clone()) {
            previous.cancel();
        }
        token
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galah_core::settings::DeclarationsPerLine;
    use tower_lsp::lsp_types::{Position, Range};

    fn uri(name: &str) -> Url {
        Url::parse(&format!("file:///work/{}", name)).unwrap()
    }

    #[tokio::test]
    async fn open_accepts_only_galah_documents() {
        let session = Session::new(Settings::default());
        assert!(session.open(uri("a.txt"), "galah", String::new(), 1).await);
        assert!(session.open(uri("b.galah"), "plaintext", String::new(), 1).await);
        assert!(!session.open(uri("c.rs"), "rust", String::new(), 1).await);
        assert!(session.document(&uri("c.rs")).is_none());
    }

    #[tokio::test]
    async fn changes_replace_the_snapshot() {
        let session = Session::new(Settings::default());
        let u = uri("a.galah");
        session.open(u.clone(), "galah", "enum \"Foo\"".into(), 1).await;
        let before = session.document(&u).unwrap();

        session.change(
            &u,
            2,
            &[
                TextDocumentContentChangeEvent {
                    range: Some(Range {
                        start: Position::new(0, 6),
                        end: Position::new(0, 9),
                    }),
                    range_length: None,
                    text: "Bar".into(),
                },
                TextDocumentContentChangeEvent {
                    range: None,
                    range_length: None,
                    text: "struct \"Baz\"\nclass \"Qux\"".into(),
                },
            ],
        );

        let after = session.document(&u).unwrap();
        assert_eq!(before.content(), "enum \"Foo\"");
        assert_eq!(after.content(), "struct \"Baz\"\nclass \"Qux\"");
        assert_eq!(after.version, 2);
    }

    #[tokio::test]
    async fn newer_request_cancels_older_one() {
        let session = Session::new(Settings::default());
        let u = uri("a.galah");
        let first = session.begin_request(&u);
        let second = session.begin_request(&u);
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        let other = session.begin_request(&uri("b.galah"));
        session.close(&u);
        assert!(second.is_cancelled());
        assert!(!other.is_cancelled());

        session.shutdown();
        assert!(other.is_cancelled());
    }

    #[tokio::test]
    async fn bad_settings_update_keeps_previous_settings() {
        let session = Session::new(Settings::default());
        session
            .update_settings(&serde_json::json!({ "languageId": "gal" }))
            .await
            .unwrap();
        assert!(session
            .update_settings(&serde_json::json!({ "keywords": [] }))
            .await
            .is_err());
        assert_eq!(session.settings().await.language_id, "gal");
    }

    #[tokio::test]
    async fn configuration_prefers_the_galah_section() {
        let session = Session::new(Settings::default());
        session
            .apply_configuration(&serde_json::json!({
                "galah": { "keywords": ["union"] },
                "editor": { "tabSize": 4 }
            }))
            .await
            .unwrap();
        assert_eq!(session.settings().await.keywords, vec!["union"]);

        session
            .apply_configuration(&serde_json::json!({ "declarationsPerLine": "all" }))
            .await
            .unwrap();
        let settings = session.settings().await;
        assert_eq!(settings.declarations_per_line, DeclarationsPerLine::All);
        assert_eq!(settings.keywords, vec!["union"]);

        assert!(session
            .apply_configuration(&serde_json::json!({ "editor": { "tabSize": 4 } }))
            .await
            .is_err());
    }
}
