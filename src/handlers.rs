use axum::{
    body::Body,
    extract::{Form, Path as AxumPath, State},
    http::{Method, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use log::{debug, info, warn};
use serde::Deserialize;

use crate::errors::WikiError;
use crate::links::rewrite_wiki_links;
use crate::render::render_body;
use crate::route::{Action, parse_action_path};
use crate::types::{AppState, Page, Title};
use crate::utils::{content_type_for, ensure_safe_path, last_modified_html, normalize_request_path};

/// Form payload for the save operation. An absent `body` field means an
/// empty page, not an error.
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: Option<String>,
}

/// Redirect the bare root to the front page.
pub async fn handle_root() -> Redirect {
    Redirect::to("/view/FrontPage")
}

/// Dispatch a page request: validate the path, then run the matched
/// operation. Requests are independent; there is no state carried between
/// them beyond the read-only `AppState`.
pub async fn handle_action(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    form: Option<Form<SaveForm>>,
) -> Result<Response, WikiError> {
    let (action, title) = parse_action_path(uri.path()).map_err(|e| {
        debug!("rejected path {:?}", uri.path());
        e
    })?;
    match action {
        Action::View if method == Method::GET || method == Method::POST => {
            view_page(&state, &title)
        }
        Action::Edit if method == Method::GET => edit_page(&state, &title),
        Action::Save if method == Method::POST => {
            let form = form.map(|Form(f)| f).unwrap_or_default();
            save_page(&state, &title, form)
        }
        _ => {
            warn!("method {} not allowed for {:?} on '{}'", method, action, title);
            Err(WikiError::NotFound)
        }
    }
}

fn view_page(state: &AppState, title: &Title) -> Result<Response, WikiError> {
    let page = match state.store.load(title) {
        Ok(page) => page,
        Err(WikiError::NotFound) => {
            // Missing page: send the visitor to the editor. This is how
            // new pages get created.
            info!("page '{}' not found, redirecting to editor", title);
            return Ok(Redirect::to(&format!("/edit/{}", title)).into_response());
        }
        Err(e) => return Err(e),
    };

    let rendered = rewrite_wiki_links(render_body(&page.body, state.policy));
    let meta = last_modified_html(&state.store.page_path(title));
    let html = state.templates.view_page(title.as_str(), &meta.concat(rendered));
    info!("serving page '{}'", title);
    Ok(Html(html).into_response())
}

fn edit_page(state: &AppState, title: &Title) -> Result<Response, WikiError> {
    let page = state
        .store
        .load(title)
        .unwrap_or_else(|_| Page::empty(title.clone()));
    let html = state.templates.edit_page(&page);
    info!("serving editor for '{}'", title);
    Ok(Html(html).into_response())
}

fn save_page(state: &AppState, title: &Title, form: SaveForm) -> Result<Response, WikiError> {
    let body = form.body.unwrap_or_default();
    let page = Page::new(title.clone(), body.into_bytes());
    state.store.save(&page)?;
    Ok(Redirect::to(&format!("/view/{}", title)).into_response())
}

/// Serve static assets read-only from the assets directory.
pub async fn handle_assets(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response, WikiError> {
    let normalized = normalize_request_path(&path);
    ensure_safe_path(&normalized)?;

    let requested = state.assets_dir.join(&normalized);
    if !requested.is_file() {
        return Err(WikiError::NotFound);
    }

    let bytes = std::fs::read(&requested)?;
    let mut resp = Response::new(Body::from(bytes));
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static(content_type_for(&requested)),
    );
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use tempfile::TempDir;

    use crate::render::RenderPolicy;
    use crate::store::PageStore;
    use crate::templates::TemplateSet;

    fn test_state(tmp: &TempDir, policy: RenderPolicy) -> AppState {
        AppState {
            store: PageStore::new(tmp.path().join("data")),
            assets_dir: Arc::new(tmp.path().join("assets")),
            templates: Arc::new(TemplateSet::load(&tmp.path().join("templates"))),
            policy,
        }
    }

    async fn dispatch(
        state: &AppState,
        method: Method,
        path: &str,
        form: Option<SaveForm>,
    ) -> Result<Response, WikiError> {
        let uri: Uri = path.parse().unwrap();
        handle_action(State(state.clone()), method, uri, form.map(Form)).await
    }

    async fn body_string(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(resp: &Response) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("no Location header")
    }

    #[tokio::test]
    async fn view_of_missing_page_redirects_to_editor() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp, RenderPolicy::Markdown);

        let resp = dispatch(&state, Method::GET, "/view/Missing", None)
            .await
            .unwrap();
        assert!(resp.status().is_redirection());
        assert_eq!(location(&resp), "/edit/Missing");
        // the write path must stay untouched
        assert!(!tmp.path().join("data").exists());
    }

    #[tokio::test]
    async fn save_then_view_renders_wiki_link_in_paragraph() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp, RenderPolicy::Markdown);

        let form = SaveForm { body: Some("hello [Test]".to_string()) };
        let resp = dispatch(&state, Method::POST, "/save/FrontPage", Some(form))
            .await
            .unwrap();
        assert!(resp.status().is_redirection());
        assert_eq!(location(&resp), "/view/FrontPage");

        let resp = dispatch(&state, Method::GET, "/view/FrontPage", None)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("<a href=\"/view/Test\">Test</a>"), "got {:?}", body);
        assert!(body.contains("<p>hello"), "got {:?}", body);
    }

    #[tokio::test]
    async fn unknown_paths_are_rejected_without_io() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp, RenderPolicy::Markdown);

        for path in ["/frob/Thing", "/view/../etc", "/view/Bad.Title", "/view"] {
            let result = dispatch(&state, Method::GET, path, None).await;
            assert!(
                matches!(result, Err(WikiError::InvalidPath)),
                "accepted {:?}",
                path
            );
        }
        assert!(!tmp.path().join("data").exists());
    }

    #[tokio::test]
    async fn edit_of_missing_page_serves_empty_form() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp, RenderPolicy::Markdown);

        let resp = dispatch(&state, Method::GET, "/edit/NewPage", None)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("<textarea"));
        assert!(body.contains("/save/NewPage"));
    }

    #[tokio::test]
    async fn save_without_body_field_stores_empty_page() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp, RenderPolicy::Markdown);

        dispatch(&state, Method::POST, "/save/Blank", None)
            .await
            .unwrap();
        let stored = std::fs::read(tmp.path().join("data/Blank.txt")).unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn save_rejects_get_requests() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp, RenderPolicy::Markdown);

        let result = dispatch(&state, Method::GET, "/save/Foo", None).await;
        assert!(matches!(result, Err(WikiError::NotFound)));
        assert!(!tmp.path().join("data").exists());
    }

    #[tokio::test]
    async fn escape_policy_shows_markup_verbatim() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp, RenderPolicy::EscapeOnly);

        let form = SaveForm { body: Some("<script>alert(1)</script>".to_string()) };
        dispatch(&state, Method::POST, "/save/Unsafe", Some(form))
            .await
            .unwrap();

        let resp = dispatch(&state, Method::GET, "/view/Unsafe", None)
            .await
            .unwrap();
        let body = body_string(resp).await;
        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>alert"));
    }

    #[tokio::test]
    async fn root_redirects_to_front_page() {
        let resp = handle_root().await.into_response();
        assert!(resp.status().is_redirection());
        assert_eq!(location(&resp), "/view/FrontPage");
    }

    #[tokio::test]
    async fn assets_are_served_with_content_type() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp, RenderPolicy::Markdown);
        std::fs::create_dir_all(tmp.path().join("assets/css")).unwrap();
        std::fs::write(tmp.path().join("assets/css/wiki.css"), "body{}").unwrap();

        let resp = handle_assets(State(state.clone()), AxumPath("css/wiki.css".to_string()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css; charset=utf-8"
        );
        assert_eq!(body_string(resp).await, "body{}");
    }

    #[tokio::test]
    async fn assets_reject_traversal_and_missing_files() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp, RenderPolicy::Markdown);
        std::fs::create_dir_all(tmp.path().join("assets")).unwrap();

        let result = handle_assets(State(state.clone()), AxumPath("../Cargo.toml".to_string())).await;
        assert!(matches!(result, Err(WikiError::InvalidPath)));

        let result = handle_assets(State(state.clone()), AxumPath("nope.css".to_string())).await;
        assert!(matches!(result, Err(WikiError::NotFound)));
    }
}
