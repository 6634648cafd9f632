//! Tests de integración del CRUD de vehículos
//!
//! Cubren autenticación, validación, colisiones de campos únicos,
//! búsqueda, ordenación y paginación contra la app completa.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, vehicle_body, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "vehicle-inventory");
}

#[tokio::test]
async fn test_list_requires_authentication() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/api/vehicles/", None, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Authentication credentials were not provided.");
}

#[tokio::test]
async fn test_unknown_token_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::GET, "/api/vehicles/", None, Some("deadbeef"))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid token.");
}

#[tokio::test]
async fn test_malformed_authorization_headers() {
    let app = TestApp::new().await;

    // Esquema distinto de Token: como si no hubiera credenciales
    let response = app
        .request_with_auth_header(Method::GET, "/api/vehicles/", "Bearer abc123")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Authentication credentials were not provided.");

    let response = app
        .request_with_auth_header(Method::GET, "/api/vehicles/", "Token")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid token header. No credentials provided.");

    let response = app
        .request_with_auth_header(Method::GET, "/api/vehicles/", "Token abc 123")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Invalid token header. Token string should not contain spaces."
    );
}

#[tokio::test]
async fn test_non_staff_account_forbidden() {
    let app = TestApp::new().await;
    let token = app.seed_account("viewer", "viewer-pass", false, true).await;

    let response = app
        .request(Method::GET, "/api/vehicles/", None, Some(&token))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "You do not have permission to perform this action."
    );
}

#[tokio::test]
async fn test_inactive_account_unauthorized() {
    let app = TestApp::new().await;
    let token = app.seed_account("ghost", "ghost-pass", true, false).await;

    let response = app
        .request(Method::GET, "/api/vehicles/", None, Some(&token))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User inactive or deleted.");
}

#[tokio::test]
async fn test_create_and_retrieve_vehicle() {
    let app = TestApp::new().await;

    let response = app
        .api(Method::POST, "/api/vehicles/", Some(vehicle_body("001")))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["id"].as_i64().expect("created vehicle has an id");
    assert_eq!(created["brand_name"], "Toyota");
    assert_eq!(created["vehicle_type"], "car");
    assert_eq!(created["vehicle_subtype"], "Sedan");
    assert!(created["created_at"]
        .as_str()
        .expect("created_at is a string")
        .ends_with('Z'));
    assert_eq!(created["created_at"], created["updated_at"]);

    let response = app
        .api(Method::GET, &format!("/api/vehicles/{}/", id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["registration_number"], "REG-001");
    assert_eq!(fetched["id"], id);
}

#[tokio::test]
async fn test_create_collects_field_errors() {
    let app = TestApp::new().await;

    let response = app
        .api(
            Method::POST,
            "/api/vehicles/",
            Some(json!({ "brand_name": "", "vehicle_type": "plane" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Cuerpo plano por campo, todos los errores de una vez
    let body = body_json(response).await;
    assert_eq!(body["brand_name"][0], "This field may not be blank.");
    assert_eq!(body["vehicle_type"][0], "\"plane\" is not a valid choice.");
    assert_eq!(body["vehicle_name"][0], "This field is required.");
    assert_eq!(body["chassis_number"][0], "This field is required.");
    assert!(body.get("description").is_none());
}

#[tokio::test]
async fn test_create_enforces_max_lengths() {
    let app = TestApp::new().await;

    let mut body = vehicle_body("len");
    body["model_number"] = json!("X".repeat(51));
    let response = app.api(Method::POST, "/api/vehicles/", Some(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors = body_json(response).await;
    assert_eq!(
        errors["model_number"][0],
        "Ensure this field has no more than 50 characters."
    );
}

#[tokio::test]
async fn test_create_unique_conflicts_accumulate() {
    let app = TestApp::new().await;

    let response = app
        .api(Method::POST, "/api/vehicles/", Some(vehicle_body("dup")))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Mismo registration/chassis/engine: los tres chocan en un solo 400
    let response = app
        .api(Method::POST, "/api/vehicles/", Some(vehicle_body("dup")))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["registration_number"][0],
        "vehicle with this registration number already exists."
    );
    assert_eq!(
        body["chassis_number"][0],
        "vehicle with this chassis number already exists."
    );
    assert_eq!(
        body["engine_number"][0],
        "vehicle with this engine number already exists."
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let response = app.post_raw_json("/api/vehicles/", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_retrieve_missing_vehicle() {
    let app = TestApp::new().await;

    let response = app.api(Method::GET, "/api/vehicles/999/", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "vehicle with id '999' not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = TestApp::new().await;
    app.seed_vehicle("Honda", "City", "nn1").await;

    // Un id que no parsea responde igual que un id sin fila, con el
    // cuerpo JSON de la aplicación y no el rechazo plano del framework
    for method in [Method::GET, Method::DELETE] {
        let response = app.api(method, "/api/vehicles/abc/", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "vehicle with id 'abc' not found");
    }

    let response = app
        .api(
            Method::PATCH,
            "/api/vehicles/7abc/",
            Some(json!({ "brand_name": "Tata" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "vehicle with id '7abc' not found");
}

#[tokio::test]
async fn test_put_replaces_and_clears_optionals() {
    let app = TestApp::new().await;

    let response = app
        .api(Method::POST, "/api/vehicles/", Some(vehicle_body("put1")))
        .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    // PUT sin subtype ni description: el reemplazo completo los limpia
    let mut replacement = vehicle_body("put1");
    replacement["vehicle_name"] = json!("Corolla Altis");
    replacement.as_object_mut().unwrap().remove("vehicle_subtype");
    replacement.as_object_mut().unwrap().remove("description");

    let response = app
        .api(
            Method::PUT,
            &format!("/api/vehicles/{}/", id),
            Some(replacement),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["vehicle_name"], "Corolla Altis");
    assert!(body["vehicle_subtype"].is_null());
    assert!(body["description"].is_null());
}

#[tokio::test]
async fn test_put_missing_vehicle_wins_over_validation() {
    let app = TestApp::new().await;

    // El body está vacío, pero el 404 llega antes que el 400
    let response = app
        .api(Method::PUT, "/api/vehicles/424242/", Some(json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "vehicle with id '424242' not found");
}

#[tokio::test]
async fn test_patch_updates_single_field() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("Honda", "Civic", "pat1").await;

    let response = app
        .api(
            Method::PATCH,
            &format!("/api/vehicles/{}/", vehicle.id),
            Some(json!({ "transmission": "automatic" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["transmission"], "automatic");
    assert_eq!(body["brand_name"], "Honda");
    assert_eq!(body["registration_number"], "REG-pat1");
}

#[tokio::test]
async fn test_patch_null_clears_optional_field() {
    let app = TestApp::new().await;

    let response = app
        .api(Method::POST, "/api/vehicles/", Some(vehicle_body("pat2")))
        .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .api(
            Method::PATCH,
            &format!("/api/vehicles/{}/", id),
            Some(json!({ "description": null })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["description"].is_null());
    // Un campo ausente en el PATCH no se toca
    assert_eq!(body["vehicle_subtype"], "Sedan");
}

#[tokio::test]
async fn test_patch_rejects_invalid_choice() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("Honda", "City", "pat3").await;

    let response = app
        .api(
            Method::PATCH,
            &format!("/api/vehicles/{}/", vehicle.id),
            Some(json!({ "variant": "edition" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["variant"][0], "\"edition\" is not a valid choice.");

    // El registro queda como estaba
    let response = app
        .api(Method::GET, &format!("/api/vehicles/{}/", vehicle.id), None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["variant"], "standard");
}

#[tokio::test]
async fn test_patch_unique_check_excludes_self() {
    let app = TestApp::new().await;
    let first = app.seed_vehicle("Tata", "Nexon", "uniq1").await;
    let second = app.seed_vehicle("Tata", "Punch", "uniq2").await;

    // Repetir la matrícula propia no es conflicto
    let response = app
        .api(
            Method::PATCH,
            &format!("/api/vehicles/{}/", first.id),
            Some(json!({ "registration_number": "REG-uniq1" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // La de otro registro sí
    let response = app
        .api(
            Method::PATCH,
            &format!("/api/vehicles/{}/", second.id),
            Some(json!({ "registration_number": "REG-uniq1" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["registration_number"][0],
        "vehicle with this registration number already exists."
    );
}

#[tokio::test]
async fn test_delete_vehicle() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("Ford", "Figo", "del1").await;

    let response = app
        .api(Method::DELETE, &format!("/api/vehicles/{}/", vehicle.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .api(Method::GET, &format!("/api/vehicles/{}/", vehicle.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Borrar dos veces también es 404
    let response = app
        .api(Method::DELETE, &format!("/api/vehicles/{}/", vehicle.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_empty_store() {
    let app = TestApp::new().await;

    let response = app.api(Method::GET, "/api/vehicles/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["count"], 0);
    assert!(body["next"].is_null());
    assert!(body["previous"].is_null());
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_trailing_slash_optional() {
    let app = TestApp::new().await;
    app.seed_vehicle("Kia", "Seltos", "slash").await;

    for uri in ["/api/vehicles", "/api/vehicles/"] {
        let response = app.api(Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], 1);
    }
}

#[tokio::test]
async fn test_list_paginates_with_links() {
    let app = TestApp::new().await;
    for i in 0..25 {
        app.seed_vehicle("Brand", &format!("V{}", i), &format!("p{:02}", i))
            .await;
    }

    let response = app.api(Method::GET, "/api/vehicles/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 25);
    assert_eq!(body["results"].as_array().unwrap().len(), 10);
    assert_eq!(body["next"], "/api/vehicles?page=2");
    assert!(body["previous"].is_null());

    let response = app.api(Method::GET, "/api/vehicles/?page=2", None).await;
    let body = body_json(response).await;
    assert_eq!(body["next"], "/api/vehicles?page=3");
    // El enlace a la primera página no lleva parámetro page
    assert_eq!(body["previous"], "/api/vehicles");

    let response = app.api(Method::GET, "/api/vehicles/?page=3", None).await;
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 5);
    assert!(body["next"].is_null());
    assert_eq!(body["previous"], "/api/vehicles?page=2");
}

#[tokio::test]
async fn test_list_page_size_respected_and_clamped() {
    let app = TestApp::new().await;
    for i in 0..12 {
        app.seed_vehicle("Brand", &format!("V{}", i), &format!("s{:02}", i))
            .await;
    }

    let response = app
        .api(Method::GET, "/api/vehicles/?page_size=5&page=2", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 5);
    assert_eq!(body["next"], "/api/vehicles?page_size=5&page=3");
    assert_eq!(body["previous"], "/api/vehicles?page_size=5");

    // Por encima del máximo se recorta a 100; con 12 registros cabe todo
    let response = app
        .api(Method::GET, "/api/vehicles/?page_size=500", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 12);
    assert!(body["next"].is_null());

    // Ilegible: cae al tamaño por defecto
    let response = app
        .api(Method::GET, "/api/vehicles/?page_size=abc", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_list_invalid_page_is_not_found() {
    let app = TestApp::new().await;
    app.seed_vehicle("Solo", "Uno", "pg1").await;

    for uri in [
        "/api/vehicles/?page=0",
        "/api/vehicles/?page=-1",
        "/api/vehicles/?page=abc",
        "/api/vehicles/?page=",
        "/api/vehicles/?page=2",
        // Páginas tan grandes que el offset no cabe en un i64
        "/api/vehicles/?page=9223372036854775807",
        "/api/vehicles/?page=92233720368547760&page_size=100",
    ] {
        let response = app.api(Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {}", uri);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid page.");
    }
}

#[tokio::test]
async fn test_list_search_is_case_insensitive_substring() {
    let app = TestApp::new().await;
    app.seed_vehicle("Toyota", "Corolla", "se1").await;
    app.seed_vehicle("Honda", "Civic", "se2").await;

    let response = app
        .api(Method::GET, "/api/vehicles/?search=toyo", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["brand_name"], "Toyota");

    // También sobre vehicle_name y registration_number
    let response = app
        .api(Method::GET, "/api/vehicles/?search=CIVIC", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["vehicle_name"], "Civic");

    let response = app
        .api(Method::GET, "/api/vehicles/?search=REG-se1", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);

    let response = app
        .api(Method::GET, "/api/vehicles/?search=nomatch", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_list_search_ignores_chassis_and_engine() {
    let app = TestApp::new().await;

    let mut body = vehicle_body("scope");
    body["chassis_number"] = json!("ZZINTERNALZZ");
    let response = app.api(Method::POST, "/api/vehicles/", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .api(Method::GET, "/api/vehicles/?search=zzinternal", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_list_ordering_whitelist() {
    let app = TestApp::new().await;
    app.seed_vehicle("Zeta", "Uno", "o1").await;
    app.seed_vehicle("Alpha", "Dos", "o2").await;
    app.seed_vehicle("Mid", "Tres", "o3").await;

    let brands = |body: &serde_json::Value| -> Vec<String> {
        body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["brand_name"].as_str().unwrap().to_string())
            .collect()
    };

    let response = app
        .api(Method::GET, "/api/vehicles/?ordering=brand_name", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(brands(&body), vec!["Alpha", "Mid", "Zeta"]);

    let response = app
        .api(Method::GET, "/api/vehicles/?ordering=-brand_name", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(brands(&body), vec!["Zeta", "Mid", "Alpha"]);

    let response = app
        .api(Method::GET, "/api/vehicles/?ordering=created_at", None)
        .await;
    let body = body_json(response).await;
    assert_eq!(brands(&body), vec!["Zeta", "Alpha", "Mid"]);

    // Por defecto: más recientes primero
    let response = app.api(Method::GET, "/api/vehicles/", None).await;
    let body = body_json(response).await;
    assert_eq!(brands(&body), vec!["Mid", "Alpha", "Zeta"]);

    // Un campo fuera de la lista blanca se ignora sin error
    let response = app
        .api(
            Method::GET,
            "/api/vehicles/?ordering=registration_number",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(brands(&body), vec!["Mid", "Alpha", "Zeta"]);
}

#[tokio::test]
async fn test_list_links_preserve_search_params() {
    let app = TestApp::new().await;
    for i in 0..15 {
        app.seed_vehicle("Toyota", &format!("V{}", i), &format!("q{:02}", i))
            .await;
    }

    let response = app
        .api(
            Method::GET,
            "/api/vehicles/?search=toyota&ordering=brand_name",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["count"], 15);
    assert_eq!(
        body["next"],
        "/api/vehicles?search=toyota&ordering=brand_name&page=2"
    );
}
