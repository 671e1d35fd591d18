pub mod models;
pub mod service;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use bookshelf_http::error::AppError;
use bookshelf_kernel::{InitCtx, Module};
use bookshelf_store::StoreError;

use models::{BookPatch, BookRecord, NewBookRecord};
use service::BookRecordService;
use store::DocumentStore;

/// Books module: the validated CRUD surface over the document store
pub struct BooksModule {
    service: Arc<BookRecordService>,
}

impl BooksModule {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            service: Arc::new(BookRecordService::new(store)),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books).post(create_book))
            .route("/health", get(health_check))
            .route(
                "/{id}",
                get(get_book).patch(update_book).delete(delete_book),
            )
            .with_state(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List book records",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All book records, order unspecified",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/BookRecord"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book record",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/NewBookRecord"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created record with its assigned id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookRecord"
                                        }
                                    }
                                }
                            },
                            "422": {
                                "description": "Candidate has no non-empty title",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Fetch a book record by id",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The matching record",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookRecord"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No record under this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "patch": {
                        "summary": "Merge a partial patch into a book record",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/BookPatch"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "The updated record",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookRecord"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No record under this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book record by id",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The deleted record",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookRecord"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No record under this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BookRecord": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Store-assigned opaque identifier"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book, never empty"
                            },
                            "description": {
                                "type": ["string", "null"]
                            },
                            "author": {
                                "type": ["string", "null"]
                            },
                            "price": {
                                "type": ["number", "null"]
                            },
                            "category": {
                                "type": ["string", "null"],
                                "enum": [
                                    "FANTASY", "ADVENTURE", "CLASSICS", "CRIME",
                                    "MYSTERY", "ROMANCE", "SCI_FI", null
                                ]
                            }
                        },
                        "required": ["id", "title"]
                    },
                    "NewBookRecord": {
                        "type": "object",
                        "properties": {
                            "title": {
                                "type": ["string", "null"],
                                "description": "Required for the record to be persisted"
                            },
                            "description": { "type": ["string", "null"] },
                            "author": { "type": ["string", "null"] },
                            "price": { "type": ["number", "null"] },
                            "category": { "type": ["string", "null"] }
                        }
                    },
                    "BookPatch": {
                        "type": "object",
                        "description": "Partial update; absent fields are left unchanged",
                        "properties": {
                            "title": { "type": ["string", "null"] },
                            "description": { "type": ["string", "null"] },
                            "author": { "type": ["string", "null"] },
                            "price": { "type": ["number", "null"] },
                            "category": { "type": ["string", "null"] }
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Store faults reach the HTTP edge untranslated, as internal errors
fn store_fault(error: StoreError) -> AppError {
    AppError::Internal(error.into())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(
    State(service): State<Arc<BookRecordService>>,
) -> Result<Json<Vec<BookRecord>>, AppError> {
    let books = service.find_all().await.map_err(store_fault)?;
    Ok(Json(books))
}

async fn create_book(
    State(service): State<Arc<BookRecordService>>,
    Json(candidate): Json<NewBookRecord>,
) -> Result<impl IntoResponse, AppError> {
    match service.create(candidate).await.map_err(store_fault)? {
        Some(record) => Ok((StatusCode::CREATED, Json(record))),
        None => Err(AppError::validation(
            vec![json!({"field": "title", "error": "required"})],
            "a book record requires a non-empty title",
        )),
    }
}

async fn get_book(
    State(service): State<Arc<BookRecordService>>,
    Path(id): Path<String>,
) -> Result<Json<BookRecord>, AppError> {
    service
        .find_by_id(&id)
        .await
        .map_err(store_fault)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("book '{}' not found", id)))
}

async fn update_book(
    State(service): State<Arc<BookRecordService>>,
    Path(id): Path<String>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<BookRecord>, AppError> {
    service
        .update_by_id(&id, patch)
        .await
        .map_err(store_fault)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("book '{}' not found", id)))
}

async fn delete_book(
    State(service): State<Arc<BookRecordService>>,
    Path(id): Path<String>,
) -> Result<Json<BookRecord>, AppError> {
    service
        .delete_by_id(&id)
        .await
        .map_err(store_fault)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("book '{}' not found", id)))
}

/// Create a new instance of the books module backed by the given store
pub fn create_module(store: Arc<dyn DocumentStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
