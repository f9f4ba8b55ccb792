//! # API Document
//!
//! OpenAPI description generated from the registry: one tagged operation per
//! resource, with the help text of every query parameter.

use serde_json::{json, Map, Value};

use crate::query::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

use super::{registry, FieldKind, Resource};

pub const API_TITLE: &str = "Banco de Tierras";
pub const API_VERSION: &str = "1.0";
pub const API_DESCRIPTION: &str =
    "API para obtener todos los datos de la base de datos de Banco de Tierras";

/// Full OpenAPI 3 document for every served route
pub fn api_document() -> Value {
    let mut paths = Map::new();
    for resource in registry() {
        paths.insert(
            format!("/{}/", resource.name),
            json!({ "get": operation(resource) }),
        );
    }

    paths.insert(
        "/test-db".to_string(),
        json!({
            "get": {
                "summary": "Prueba de conexión a la base de datos",
                "operationId": "test_db",
                "responses": {
                    "200": message_response("Conexión exitosa"),
                    "500": message_response("Conexión fallida")
                }
            }
        }),
    );
    paths.insert(
        "/health".to_string(),
        json!({
            "get": {
                "summary": "Estado del servicio",
                "operationId": "health",
                "responses": {"200": {"description": "ok"}}
            }
        }),
    );

    let tags: Vec<Value> = registry()
        .iter()
        .map(|r| json!({"name": r.name, "description": r.description}))
        .collect();

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": API_TITLE,
            "version": API_VERSION,
            "description": API_DESCRIPTION
        },
        "tags": tags,
        "paths": paths,
        "components": {
            "schemas": {
                "Message": {
                    "type": "object",
                    "properties": {"message": {"type": "string"}}
                }
            }
        }
    })
}

fn operation(resource: &Resource) -> Value {
    let mut parameters = vec![
        parameter(
            "page",
            FieldKind::Integer,
            "Opcional: Número de página",
            Some(DEFAULT_PAGE),
        ),
        parameter(
            "page_size",
            FieldKind::Integer,
            "Opcional: Cantidad de registros por página",
            Some(DEFAULT_PAGE_SIZE),
        ),
    ];
    parameters.extend(
        resource
            .filters
            .iter()
            .map(|f| parameter(f.param, f.kind, f.help, None)),
    );
    parameters.extend(
        resource
            .modes
            .iter()
            .map(|m| parameter(m.flag(), FieldKind::Boolean, m.help(), None)),
    );

    let properties: Map<String, Value> = resource
        .columns
        .iter()
        .map(|c| (c.name.to_string(), json!({})))
        .collect();

    json!({
        "tags": [resource.name],
        "summary": resource.description,
        "operationId": format!("get_{}", resource.name),
        "parameters": parameters,
        "responses": {
            "200": {
                "description": "Registros; {\"message\"} cuando la consulta falla",
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "array",
                            "items": {"type": "object", "properties": properties}
                        }
                    }
                }
            },
            "400": message_response("Parámetro inválido")
        }
    })
}

fn parameter(name: &str, kind: FieldKind, help: &str, default: Option<i64>) -> Value {
    let mut schema = json!({ "type": kind.schema_type() });
    if let Some(default) = default {
        schema["default"] = json!(default);
    }

    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": help,
        "schema": schema
    })
}

fn message_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {"schema": {"$ref": "#/components/schemas/Message"}}
        }
    })
}
