pub mod views;

use async_trait::async_trait;
use axum::{
    extract::{Path, Query},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use wrp_http::Site;
use wrp_kernel::{InitCtx, Module, PageId};

use views::{render, PageView, RenderOptions};

/// Renders site pages from the current content snapshot
pub struct SiteModule;

impl SiteModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SiteModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for SiteModule {
    fn name(&self) -> &'static str {
        "site"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            page = %ctx.site.navigator().current(),
            "site module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/pages", get(list_pages))
            .route("/pages/{page}", get(render_page))
            .route("/view", get(render_fragment))
            .route("/current", get(render_current))
            .route("/navigate", post(navigate))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let page_view = json!({
            "description": "Page view model",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/PageView" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/pages": {
                    "get": {
                        "summary": "List page identifiers",
                        "tags": ["Site"],
                        "responses": { "200": { "description": "Page identifiers" } }
                    }
                },
                "/pages/{page}": {
                    "get": {
                        "summary": "Render a page; unknown identifiers render the home page",
                        "tags": ["Site"],
                        "parameters": [
                            { "name": "page", "in": "path", "required": true, "schema": { "type": "string" } },
                            { "name": "genre", "in": "query", "required": false, "schema": { "type": "string" } }
                        ],
                        "responses": { "200": page_view.clone() }
                    }
                },
                "/view": {
                    "get": {
                        "summary": "Render the page a navigation fragment points at",
                        "tags": ["Site"],
                        "parameters": [
                            { "name": "fragment", "in": "query", "required": false, "schema": { "type": "string" } }
                        ],
                        "responses": { "200": page_view.clone() }
                    }
                },
                "/current": {
                    "get": {
                        "summary": "Render the navigator's current page",
                        "tags": ["Site"],
                        "responses": { "200": page_view }
                    }
                },
                "/navigate": {
                    "post": {
                        "summary": "Set the navigation fragment to #/{page}",
                        "tags": ["Site"],
                        "responses": {
                            "200": {
                                "description": "Navigation state",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Navigation" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "PageView": {
                        "type": "object",
                        "properties": {
                            "page": { "type": "string" }
                        },
                        "required": ["page"]
                    },
                    "Navigation": {
                        "type": "object",
                        "properties": {
                            "fragment": { "type": "string" },
                            "page": { "type": "string" }
                        },
                        "required": ["fragment", "page"]
                    }
                }
            }
        }))
    }
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    genre: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FragmentQuery {
    #[serde(default)]
    fragment: String,
    genre: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NavigateRequest {
    /// Page identifier; unknown identifiers are accepted and read as home.
    page: Option<String>,
    /// Raw fragment, for changes that did not come from a page link.
    fragment: Option<String>,
}

#[derive(Debug, Serialize)]
struct Navigation {
    fragment: String,
    page: PageId,
}

fn options(site: &wrp_kernel::SiteContext, genre: Option<String>) -> RenderOptions {
    RenderOptions {
        genre,
        can_edit: site.can_edit(),
    }
}

async fn list_pages() -> Json<Vec<PageId>> {
    Json(PageId::ALL.to_vec())
}

async fn render_page(
    Site(site): Site,
    Path(page): Path<String>,
    Query(query): Query<PageQuery>,
) -> Json<PageView> {
    let page = PageId::from_id(&page);
    Json(render(page, &site.snapshot(), &options(&site, query.genre)))
}

async fn render_fragment(Site(site): Site, Query(query): Query<FragmentQuery>) -> Json<PageView> {
    let page = PageId::from_fragment(&query.fragment);
    Json(render(page, &site.snapshot(), &options(&site, query.genre)))
}

async fn render_current(Site(site): Site) -> Json<PageView> {
    let page = site.navigator().current();
    Json(render(page, &site.snapshot(), &options(&site, None)))
}

async fn navigate(Site(site): Site, Json(request): Json<NavigateRequest>) -> Json<Navigation> {
    let navigator = site.navigator();
    match (request.page, request.fragment) {
        (Some(page), _) => navigator.navigate_to(&page),
        (None, Some(fragment)) => navigator.set_fragment(fragment),
        (None, None) => navigator.navigate(PageId::Home),
    }

    Json(Navigation {
        fragment: navigator.fragment(),
        page: navigator.current(),
    })
}

/// Create a new instance of the site module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(SiteModule::new())
}
