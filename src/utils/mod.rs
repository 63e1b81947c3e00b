//! Project-specific utilities live here.

use serde_json::{json, Value};

/// Formats a shared log prefix for project logs.
pub fn log_prefix(module: &str) -> String {
    format!("catalog::{module}")
}

/// Render a utoipa schema as a JSON fragment for module OpenAPI specs.
pub fn schema_json<T: utoipa::PartialSchema>() -> Value {
    serde_json::to_value(T::schema()).unwrap_or_default()
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn error_response(description: &str) -> Value {
    json_response(description, schema_ref("ErrorResponse"))
}

/// OpenAPI paths for the list/create/get/update/delete operations every
/// catalog module exposes, relative to the module's mount point.
pub fn crud_paths(tag: &str, entity: &str, schema: &str, input_schema: &str) -> Value {
    let request_body = json!({
        "required": true,
        "content": { "application/json": { "schema": schema_ref(input_schema) } }
    });
    let lowercase = entity.to_lowercase();

    json!({
        "/": {
            "get": {
                "summary": format!("List {lowercase} records"),
                "tags": [tag],
                "responses": {
                    "200": json_response(
                        &format!("All {lowercase} records in insertion order"),
                        json!({ "type": "array", "items": schema_ref(schema) })
                    )
                }
            },
            "post": {
                "summary": format!("Create a {lowercase}"),
                "tags": [tag],
                "requestBody": request_body.clone(),
                "responses": {
                    "201": json_response(&format!("{entity} created"), schema_ref(schema)),
                    "400": error_response("Validation failed")
                }
            }
        },
        "/{id}": {
            "parameters": [{
                "name": "id",
                "in": "path",
                "required": true,
                "schema": { "type": "string" }
            }],
            "get": {
                "summary": format!("Get a {lowercase} by id"),
                "tags": [tag],
                "responses": {
                    "200": json_response(&format!("The {lowercase}"), schema_ref(schema)),
                    "404": error_response(&format!("{entity} not found"))
                }
            },
            "put": {
                "summary": format!("Update a {lowercase}"),
                "description": "Only the fields present in the body are changed.",
                "tags": [tag],
                "requestBody": request_body,
                "responses": {
                    "200": json_response(&format!("{entity} updated"), schema_ref(schema)),
                    "400": error_response("Validation failed"),
                    "404": error_response(&format!("{entity} not found"))
                }
            },
            "delete": {
                "summary": format!("Delete a {lowercase}"),
                "tags": [tag],
                "responses": {
                    "204": { "description": format!("{entity} deleted") },
                    "404": error_response(&format!("{entity} not found"))
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_paths_cover_both_routes() {
        let paths = crud_paths("Genres", "Genre", "Genre", "GenreInput");

        assert!(paths["/"]["get"].is_object());
        assert_eq!(
            paths["/"]["post"]["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/GenreInput"
        );
        for method in ["get", "put", "delete"] {
            assert!(paths["/{id}"][method]["responses"]["404"].is_object());
        }
    }

    #[test]
    fn log_prefix_is_namespaced() {
        assert_eq!(log_prefix("books"), "catalog::books");
    }
}
