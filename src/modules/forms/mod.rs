pub mod models;
pub mod transport;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use serde_json::json;
use wrp_http::AppError;
use wrp_kernel::settings::FormsSettings;
use wrp_kernel::{InitCtx, Module};

pub use models::{FieldSpec, FormKind, FormSession, FormStatus};
pub use transport::{FormTransport, HttpTransport, TransportError};

struct FormsState {
    settings: FormsSettings,
    transport: Arc<dyn FormTransport>,
}

/// Relays visitor-facing forms to their configured endpoints
pub struct FormsModule {
    state: Arc<FormsState>,
}

impl FormsModule {
    pub fn new(settings: FormsSettings, transport: Arc<dyn FormTransport>) -> Self {
        Self {
            state: Arc::new(FormsState {
                settings,
                transport,
            }),
        }
    }
}

#[async_trait]
impl Module for FormsModule {
    fn name(&self) -> &'static str {
        "forms"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for kind in FormKind::ALL {
            match kind.endpoint(&self.state.settings) {
                Some(endpoint) => {
                    tracing::info!(module = self.name(), form = %kind, %endpoint, "form relay configured")
                }
                None => {
                    tracing::warn!(module = self.name(), form = %kind, "no endpoint configured; submissions will fail")
                }
            }
        }
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_forms))
            .route("/{kind}", post(submit_form))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List relayed forms and their fields",
                        "tags": ["Forms"],
                        "responses": {
                            "200": { "description": "Form descriptors" }
                        }
                    }
                },
                "/{kind}": {
                    "post": {
                        "summary": "Submit a form",
                        "tags": ["Forms"],
                        "parameters": [{
                            "name": "kind",
                            "in": "path",
                            "required": true,
                            "schema": {
                                "type": "string",
                                "enum": ["contact", "submissions", "press", "bookings", "newsletter"]
                            }
                        }],
                        "requestBody": {
                            "content": {
                                "application/x-www-form-urlencoded": {
                                    "schema": { "type": "object", "additionalProperties": { "type": "string" } }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Submission accepted by the endpoint",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/FormSubmission" }
                                    }
                                }
                            },
                            "502": {
                                "description": "Endpoint rejected the submission or was unreachable",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/FormSubmission" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Unknown form",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "422": {
                                "description": "Required fields missing",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "FormSubmission": {
                        "type": "object",
                        "properties": {
                            "form": { "type": "string" },
                            "status": {
                                "type": "string",
                                "enum": ["idle", "loading", "success", "error"]
                            },
                            "fields": {
                                "type": "object",
                                "additionalProperties": { "type": "string" }
                            }
                        },
                        "required": ["form", "status", "fields"]
                    }
                }
            }
        }))
    }
}

#[derive(Debug, Serialize)]
struct FormDescriptor {
    form: FormKind,
    fields: &'static [FieldSpec],
    configured: bool,
}

#[derive(Debug, Serialize)]
struct SubmissionResponse {
    form: FormKind,
    status: FormStatus,
    fields: BTreeMap<String, String>,
}

async fn list_forms(State(state): State<Arc<FormsState>>) -> Json<Vec<FormDescriptor>> {
    let forms = FormKind::ALL
        .into_iter()
        .map(|form| FormDescriptor {
            form,
            fields: form.fields(),
            configured: form.endpoint(&state.settings).is_some(),
        })
        .collect();
    Json(forms)
}

async fn submit_form(
    State(state): State<Arc<FormsState>>,
    Path(kind): Path<String>,
    Form(values): Form<BTreeMap<String, String>>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let kind = FormKind::parse(&kind)
        .ok_or_else(|| AppError::not_found(format!("no form named '{kind}'")))?;
    let mut session = FormSession::with_values(kind, values);

    let missing = session.missing_required();
    if !missing.is_empty() {
        let details = missing
            .iter()
            .map(|field| json!({"field": field, "error": "required"}))
            .collect();
        return Err(AppError::validation(details, "required fields are missing"));
    }

    let status = session
        .submit(state.transport.as_ref(), kind.endpoint(&state.settings))
        .await;
    tracing::info!(form = %kind, status = ?status, "form submission settled");

    let code = match status {
        FormStatus::Success => StatusCode::OK,
        _ => StatusCode::BAD_GATEWAY,
    };

    Ok((
        code,
        Json(SubmissionResponse {
            form: kind,
            status,
            fields: session.fields().clone(),
        }),
    ))
}

/// Create the forms module with the production HTTP transport
pub fn create_module(settings: &FormsSettings) -> anyhow::Result<Arc<dyn Module>> {
    let transport = HttpTransport::new(std::time::Duration::from_millis(settings.timeout_ms))
        .context("failed to build form transport")?;
    Ok(Arc::new(FormsModule::new(settings.clone(), Arc::new(transport))))
}
