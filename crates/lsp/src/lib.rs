pub mod capabilities;
pub mod goto;
pub mod hover;
pub mod session;
pub mod util;

use crate::session::Session;
use galah_core::Settings;
use std::sync::Arc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct LspServer {
    client: Client,
    pub session: Arc<Session>,
}

impl LspServer {
    pub fn new(client: Client, settings: Settings) -> Self {
        Self {
            client,
            session: Arc::new(Session::new(settings)),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options {
            if let Err(e) = self.session.update_settings(&options).await {
                tracing::warn!("ignoring initializationOptions: {}", e);
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Ignoring invalid initializationOptions: {}", e),
                    )
                    .await;
            }
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "galah-nav".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let settings = self.session.settings().await;
        tracing::info!("server initialized with {:?}", settings);
        self.client
            .log_message(
                MessageType::INFO,
                format!(
                    "galah-nav ready for language '{}'",
                    settings.language_id
                ),
            )
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.session.shutdown();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.clone();
        let accepted = self
            .session
            .open(doc.uri, &doc.language_id, doc.text, doc.version)
            .await;
        if !accepted {
            tracing::debug!("ignoring {} with language '{}'", uri, doc.language_id);
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        self.session.change(
            &params.text_document.uri,
            params.text_document.version,
            &params.content_changes,
        );
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.client
            .log_message(
                MessageType::LOG,
                format!("LSP Event: did_close uri={}", params.text_document.uri),
            )
            .await;
        self.session.close(&params.text_document.uri);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        match self.session.apply_configuration(&params.settings).await {
            Ok(()) => tracing::info!("settings updated"),
            Err(e) => {
                tracing::warn!("rejected settings update: {}", e);
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Rejected galah settings: {}", e),
                    )
                    .await;
            }
        }
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/hover uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let result = hover::hover(&self.session, params).await;
        match &result {
            Ok(Some(_)) => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: found hover content")
                    .await
            }
            Ok(None) => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: no hover content")
                    .await
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/definition uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let result = goto::definition(&self.session, params).await;
        match &result {
            Ok(Some(GotoDefinitionResponse::Scalar(location))) => {
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!(
                            "LSP Response: definition at {}:{}",
                            location.range.start.line, location.range.start.character
                        ),
                    )
                    .await
            }
            Ok(_) => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: no definition found")
                    .await
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }
}

pub async fn run_server(settings: Settings) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        tower_lsp::LspService::new(move |client| LspServer::new(client, settings));
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
