use actix_web::{get, web, HttpResponse};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::routes::system::SERVICE_NAME;
use crate::state::AppState;
use crate::types::{MAX_TOP_K, MIN_TOP_K};

/// `content` object referencing a component schema
fn json_body(schema: &str) -> Value {
    json!({
        "application/json": {
            "schema": { "$ref": format!("#/components/schemas/{}", schema) }
        }
    })
}

fn health_path() -> Value {
    json!({
        "get": {
            "operationId": "health_check",
            "summary": "Health Check",
            "description": "Health check endpoint to verify service status.",
            "responses": {
                "200": { "description": "Service is running", "content": json_body("HealthResponse") }
            }
        }
    })
}

fn search_path() -> Value {
    json!({
        "post": {
            "operationId": "search_employees",
            "summary": "Search for Employees",
            "description": "Search for employees matching a natural language job description or query. Returns the top matching candidates ordered by distance (lower score is a closer match).",
            "requestBody": { "required": true, "content": json_body("SearchRequest") },
            "responses": {
                "200": { "description": "Ranked matches", "content": json_body("SearchResponse") },
                "400": { "description": "Invalid request", "content": json_body("ErrorResponse") },
                "500": { "description": "Search failed", "content": json_body("ErrorResponse") },
                "502": { "description": "Embedding provider unavailable", "content": json_body("ErrorResponse") },
                "503": { "description": "Upstream service unavailable", "content": json_body("ErrorResponse") }
            }
        }
    })
}

fn stats_path() -> Value {
    json!({
        "get": {
            "operationId": "index_stats",
            "summary": "Index Statistics",
            "description": "Number of indexed employees and vectors, embedding model and dimension, and when the index was built.",
            "responses": {
                "200": { "description": "Index statistics", "content": json_body("IndexStats") }
            }
        }
    })
}

fn profile_path() -> Value {
    json!({
        "get": {
            "operationId": "get_employee_profile",
            "summary": "Get Employee Profile",
            "description": "Fetch detailed profile information for a specific employee by their ID. Includes skills, contribution summary, and raw record data.",
            "parameters": [{
                "name": "employee_id",
                "in": "path",
                "required": true,
                "schema": { "type": "string" }
            }],
            "responses": {
                "200": { "description": "Employee profile", "content": json_body("ProfileResponse") },
                "404": { "description": "Employee not found", "content": json_body("ErrorResponse") }
            }
        }
    })
}

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn schemas() -> Value {
    let match_item = json!({
        "type": "object",
        "properties": {
            "employee_id": { "type": "string" },
            "score": { "type": "number" },
            "skills": string_array()
        }
    });

    json!({
        "HealthResponse": {
            "type": "object",
            "properties": {
                "service": { "type": "string" },
                "status": { "type": "string" },
                "indexed_employees": { "type": "integer" }
            }
        },
        "SearchRequest": {
            "type": "object",
            "properties": {
                "role_description": {
                    "type": "string",
                    "description": "Job description to search for matching employees"
                },
                "top_k": {
                    "type": "integer",
                    "default": 5,
                    "minimum": MIN_TOP_K,
                    "maximum": MAX_TOP_K,
                    "description": "Number of top matches to return"
                }
            },
            "required": ["role_description"]
        },
        "SearchResponse": {
            "type": "object",
            "properties": { "matches": { "type": "array", "items": match_item } },
            "required": ["matches"]
        },
        "ProfileResponse": {
            "type": "object",
            "properties": {
                "employee_id": { "type": "string" },
                "summary": { "type": "string" },
                "skills": string_array(),
                "raw_doc": { "type": "object", "nullable": true, "additionalProperties": true }
            },
            "required": ["employee_id", "summary", "skills"]
        },
        "IndexStats": {
            "type": "object",
            "properties": {
                "indexed_employees": { "type": "integer" },
                "indexed_vectors": { "type": "integer" },
                "dimension": { "type": "integer" },
                "embedding_model": { "type": "string" },
                "indexed_at": { "type": "string", "format": "date-time" }
            },
            "required": ["indexed_employees", "indexed_vectors", "dimension", "embedding_model", "indexed_at"]
        },
        "ErrorResponse": {
            "type": "object",
            "properties": { "error": { "type": "string" } },
            "required": ["error"]
        }
    })
}

/// OpenAPI 3.0.1 description of the public API
///
/// Kept to plain `type`/`nullable` schemas (no `anyOf`) so agent platforms
/// that import OpenAPI tools can consume it as-is.
pub fn openapi_document(server_url: &str) -> Value {
    json!({
        "openapi": "3.0.1",
        "info": {
            "title": SERVICE_NAME,
            "description": "Vector search microservice for employee intelligence.",
            "version": env!("CARGO_PKG_VERSION")
        },
        "servers": [{ "url": server_url }],
        "paths": {
            "/": health_path(),
            "/search": search_path(),
            "/profile/{employee_id}": profile_path(),
            "/stats": stats_path()
        },
        "components": { "schemas": schemas() }
    })
}

/// Serve the OpenAPI document
#[get("/openapi.json")]
pub async fn openapi(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(openapi_document(&state.config.advertised_url()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use actix_web::ResponseError;
    use staffsearch_common::StaffSearchError;

    #[test]
    fn test_document_shape() {
        let doc = openapi_document("https://search.example.com");
        assert_eq!(doc["openapi"], "3.0.1");
        assert_eq!(doc["servers"].as_array().unwrap().len(), 1);
        assert_eq!(doc["servers"][0]["url"], "https://search.example.com");
        assert_eq!(doc["paths"]["/search"]["post"]["operationId"], "search_employees");
        assert_eq!(doc["paths"]["/profile/{employee_id}"]["get"]["operationId"], "get_employee_profile");
        assert_eq!(doc["components"]["schemas"]["SearchRequest"]["properties"]["top_k"]["maximum"], 50);
        assert!(!doc.to_string().contains("anyOf"));
    }

    #[test]
    fn test_stats_path_documented() {
        let doc = openapi_document("http://localhost:8000");
        let stats = &doc["paths"]["/stats"]["get"];
        assert_eq!(stats["operationId"], "index_stats");
        assert_eq!(
            stats["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/IndexStats"
        );
        assert!(doc["components"]["schemas"]["IndexStats"]["properties"]["indexed_at"].is_object());
    }

    #[test]
    fn test_search_failure_statuses_declared() {
        let doc = openapi_document("http://localhost:8000");
        let declared = &doc["paths"]["/search"]["post"]["responses"];

        let parse_error = serde_json::from_str::<Value>("{").unwrap_err();
        let failures = vec![
            StaffSearchError::invalid_input("k must be positive"),
            StaffSearchError::config("bad"),
            StaffSearchError::dimension_mismatch(3, 2),
            StaffSearchError::embedding("provider down"),
            StaffSearchError::source("store down"),
            StaffSearchError::network("reset"),
            StaffSearchError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")),
            StaffSearchError::Json(parse_error),
        ];

        for err in failures {
            let label = err.to_string();
            let status = ApiError::search_failed(err).status_code();
            assert!(
                declared[status.as_str()].is_object(),
                "{} for '{}' is not declared",
                status,
                label
            );
        }
    }
}
