use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wrp_http::{AppError, Site};
use wrp_kernel::content::SiteSettings;
use wrp_kernel::{InitCtx, Module, PageId, SiteContext, Snapshot};

/// Content editing for the admin dashboard
pub struct CmsModule;

impl CmsModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CmsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for CmsModule {
    fn name(&self) -> &'static str {
        "cms"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let issues = ctx.site.snapshot().validate();
        if !issues.is_empty() {
            tracing::warn!(
                module = self.name(),
                issues = issues.len(),
                "loaded content has validation issues"
            );
        }
        tracing::info!(
            module = self.name(),
            key = ctx.site.store().key(),
            admin_mode = ?ctx.settings.admin.mode,
            "cms module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/content", get(get_content).put(replace_content))
            .route("/settings", patch(update_settings))
            .route("/reset", post(reset_content))
            .route("/admin", get(admin_state))
            .route("/admin/toggle", post(toggle_admin))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let forbidden = json!({
            "description": "Admin mode is off",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let snapshot = json!({
            "description": "Content snapshot",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Snapshot" }
                }
            }
        });
        let admin_state = json!({
            "description": "Admin mode",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/AdminState" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/content": {
                    "get": {
                        "summary": "Current content snapshot",
                        "tags": ["CMS"],
                        "responses": { "200": snapshot.clone() }
                    },
                    "put": {
                        "summary": "Replace the content snapshot",
                        "tags": ["CMS"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Snapshot" }
                                }
                            }
                        },
                        "responses": {
                            "200": snapshot.clone(),
                            "403": forbidden.clone(),
                            "422": {
                                "description": "Snapshot failed validation",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/settings": {
                    "patch": {
                        "summary": "Update site settings fields",
                        "tags": ["CMS"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/SettingsPatch" }
                                }
                            }
                        },
                        "responses": {
                            "200": snapshot,
                            "400": {
                                "description": "Patch names no settings field",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "403": forbidden.clone()
                        }
                    }
                },
                "/reset": {
                    "post": {
                        "summary": "Discard edits and restore the bundled content",
                        "tags": ["CMS"],
                        "responses": {
                            "200": {
                                "description": "Where the client should go next",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ResetOutcome" }
                                    }
                                }
                            },
                            "403": forbidden
                        }
                    }
                },
                "/admin": {
                    "get": {
                        "summary": "Admin mode state",
                        "tags": ["CMS"],
                        "responses": { "200": admin_state.clone() }
                    }
                },
                "/admin/toggle": {
                    "post": {
                        "summary": "Flip admin mode",
                        "tags": ["CMS"],
                        "responses": { "200": admin_state }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Snapshot": {
                        "type": "object",
                        "properties": {
                            "settings": { "type": "object" },
                            "authors": { "type": "array", "items": { "type": "object" } },
                            "books": { "type": "array", "items": { "type": "object" } },
                            "blogPosts": { "type": "array", "items": { "type": "object" } },
                            "products": { "type": "array", "items": { "type": "object" } },
                            "events": { "type": "array", "items": { "type": "object" } },
                            "resources": { "type": "array", "items": { "type": "object" } },
                            "testimonials": { "type": "array", "items": { "type": "object" } }
                        },
                        "required": ["settings", "authors", "books"]
                    },
                    "SettingsPatch": {
                        "type": "object",
                        "properties": {
                            "siteName": { "type": "string" },
                            "tagline": { "type": "string" },
                            "seoDescription": { "type": "string" },
                            "contactEmail": { "type": "string" }
                        }
                    },
                    "ResetOutcome": {
                        "type": "object",
                        "properties": {
                            "fragment": { "type": "string" },
                            "reload": { "type": "boolean" }
                        },
                        "required": ["fragment", "reload"]
                    },
                    "AdminState": {
                        "type": "object",
                        "properties": {
                            "admin": { "type": "boolean" }
                        },
                        "required": ["admin"]
                    }
                }
            }
        }))
    }
}

/// Settings fields the dashboard edits; absent fields are left alone.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SettingsPatch {
    site_name: Option<String>,
    tagline: Option<String>,
    seo_description: Option<String>,
    contact_email: Option<String>,
}

impl SettingsPatch {
    fn is_empty(&self) -> bool {
        self.site_name.is_none()
            && self.tagline.is_none()
            && self.seo_description.is_none()
            && self.contact_email.is_none()
    }

    fn apply(self, settings: &mut SiteSettings) {
        if let Some(site_name) = self.site_name {
            settings.site_name = site_name;
        }
        if let Some(tagline) = self.tagline {
            settings.tagline = tagline;
        }
        if let Some(seo_description) = self.seo_description {
            settings.seo_description = seo_description;
        }
        if let Some(contact_email) = self.contact_email {
            settings.contact_email = contact_email;
        }
    }
}

#[derive(Debug, Serialize)]
struct ResetOutcome {
    fragment: String,
    reload: bool,
}

#[derive(Debug, Serialize)]
struct AdminState {
    admin: bool,
}

fn require_admin(site: &SiteContext) -> Result<(), AppError> {
    if site.can_edit() {
        Ok(())
    } else {
        Err(AppError::forbidden("admin mode is required to edit content"))
    }
}

async fn get_content(Site(site): Site) -> Json<Arc<Snapshot>> {
    Json(site.snapshot())
}

async fn replace_content(
    Site(site): Site,
    Json(snapshot): Json<Snapshot>,
) -> Result<Json<Arc<Snapshot>>, AppError> {
    require_admin(&site)?;

    let issues = snapshot.validate();
    if !issues.is_empty() {
        return Err(AppError::invalid_content(&issues));
    }

    site.update(snapshot)?;
    tracing::info!(revision = site.revision().number, "content replaced");
    Ok(Json(site.snapshot()))
}

async fn update_settings(
    Site(site): Site,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<Arc<Snapshot>>, AppError> {
    require_admin(&site)?;
    if patch.is_empty() {
        return Err(AppError::bad_request("no settings fields to update"));
    }
    let snapshot = site.edit(|snapshot| patch.apply(&mut snapshot.settings))?;
    tracing::info!(site_name = %snapshot.settings.site_name, "site settings updated");
    Ok(Json(snapshot))
}

async fn reset_content(Site(site): Site) -> Result<Json<ResetOutcome>, AppError> {
    require_admin(&site)?;
    site.reset()?;
    tracing::info!("content reset to bundled default");
    Ok(Json(ResetOutcome {
        fragment: PageId::Home.fragment(),
        reload: true,
    }))
}

async fn admin_state(Site(site): Site) -> Json<AdminState> {
    Json(AdminState {
        admin: site.can_edit(),
    })
}

async fn toggle_admin(Site(site): Site) -> Json<AdminState> {
    Json(AdminState {
        admin: site.toggle_admin(),
    })
}

/// Create a new instance of the cms module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(CmsModule::new())
}
