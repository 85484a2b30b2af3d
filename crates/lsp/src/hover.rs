use crate::session::Session;
use crate::util::{from_lsp_position, to_lsp_range};
use galah_core::PathRef;
use galah_core::extract::path_at;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

/// Shows the reference under the cursor verbatim. Nothing is resolved.
pub async fn hover(session: &Session, params: HoverParams) -> Result<Option<Hover>> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = from_lsp_position(params.text_document_position_params.position);

    let doc = match session.document(&uri) {
        Some(d) => d,
        None => return Ok(None),
    };
    let settings = session.settings().await;

    Ok(path_at(doc.as_ref(), position, &settings).map(build_hover))
}

fn build_hover(path: PathRef) -> Hover {
    Hover {
        contents: HoverContents::Scalar(MarkedString::String(path.text)),
        range: Some(to_lsp_range(path.span)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galah_core::Settings;

    async fn session_with(text: &str) -> (Session, Url) {
        let session = Session::new(Settings::default());
        let uri = Url::parse("file:///work/shapes.galah").unwrap();
        session.open(uri.clone(), "galah", text.to_string(), 1).await;
        (session, uri)
    }

    fn params(uri: &Url, line: u32, character: u32) -> HoverParams {
        HoverParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: Position::new(line, character),
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
        }
    }

    #[tokio::test]
    async fn hover_shows_second_token_text_and_range() {
        let (session, uri) = session_with("field: <a/b> and <c/d>").await;
        let hover = hover(&session, params(&uri, 0, 19)).await.unwrap().unwrap();

        match hover.contents {
            HoverContents::Scalar(MarkedString::String(text)) => assert_eq!(text, "c/d"),
            other => panic!("unexpected hover contents: {:?}", other),
        }
        assert_eq!(
            hover.range,
            Some(Range {
                start: Position::new(0, 18),
                end: Position::new(0, 21),
            })
        );
    }

    #[tokio::test]
    async fn hover_outside_tokens_is_empty() {
        let (session, uri) = session_with("field: <a/b> and <c/d>").await;
        assert!(hover(&session, params(&uri, 0, 14)).await.unwrap().is_none());
        assert!(hover(&session, params(&uri, 3, 0)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn hover_on_unknown_document_is_empty() {
        let (session, _) = session_with("<a>").await;
        let other = Url::parse("file:///work/other.galah").unwrap();
        assert!(hover(&session, params(&other, 0, 1)).await.unwrap().is_none());
    }
}
