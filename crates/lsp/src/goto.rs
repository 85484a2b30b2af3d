use crate::session::Session;
use crate::util::{from_lsp_position, to_lsp_range};
use galah_core::extract::paths_at;
use galah_core::resolve::resolve;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

/// Resolves the reference under the cursor to a declaration in the same
/// document. When several tokens contain the cursor they are tried in order
/// and the first one that resolves wins.
///
/// The scan runs on the blocking pool against a snapshot of the text. It
/// stops at the next line boundary when the request is dropped, a newer
/// request arrives for the same document, or the server shuts down.
pub async fn definition(
    session: &Session,
    params: GotoDefinitionParams,
) -> Result<Option<GotoDefinitionResponse>> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = from_lsp_position(params.text_document_position_params.position);

    let doc = match session.document(&uri) {
        Some(d) => d,
        None => return Ok(None),
    };
    let settings = session.settings().await;

    let candidates = paths_at(doc.as_ref(), position, &settings);
    if candidates.is_empty() {
        return Ok(None);
    }

    let token = session.begin_request(&uri);
    let _guard = token.clone().drop_guard();

    let scan = tokio::task::spawn_blocking(move || {
        for path in &candidates {
            if token.is_cancelled() {
                return None;
            }
            if let Some(span) = resolve(doc.as_ref(), &path.text, &token, &settings) {
                return Some(span);
            }
            tracing::debug!("`{}` did not resolve, trying the next token", path.text);
        }
        None
    });

    match scan.await {
        Ok(Some(span)) => Ok(Some(GotoDefinitionResponse::Scalar(Location {
            uri,
            range: to_lsp_range(span),
        }))),
        Ok(None) => Ok(None),
        Err(e) => {
            tracing::warn!("definition scan failed for {}: {}", uri, e);
            Ok(None)
        }
    }
}
