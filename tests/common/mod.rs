//! Harness compartido de los tests de integración
//!
//! Levanta la aplicación completa sobre los stores en memoria, con el
//! mismo recorte de barras finales que aplica el binario, y ofrece
//! helpers para mandar requests con `Authorization: Token <key>`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;
use tower::{Layer, ServiceExt};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use vehicle_inventory::config::environment::EnvironmentConfig;
use vehicle_inventory::models::user::NewAccount;
use vehicle_inventory::models::vehicle::{
    NewVehicle, Transmission, Variant, Vehicle, VehicleType,
};
use vehicle_inventory::routes::create_app_router;
use vehicle_inventory::state::AppState;

/// Contraseña en claro de la cuenta staff que siembra `TestApp::new`
pub const ADMIN_PASSWORD: &str = "integration-secret";

// Coste mínimo de bcrypt: los tests hashean muchas contraseñas
const TEST_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    router: NormalizePath<axum::Router>,
    pub state: AppState,
    token: String,
}

impl TestApp {
    /// App completa con una cuenta staff "admin" ya creada y con token
    pub async fn new() -> Self {
        let state = AppState::in_memory(EnvironmentConfig::for_tests());
        let router =
            NormalizePathLayer::trim_trailing_slash().layer(create_app_router(state.clone()));

        let mut app = Self {
            router,
            state,
            token: String::new(),
        };
        app.token = app
            .seed_account("admin", ADMIN_PASSWORD, true, true)
            .await;
        app
    }

    /// Token de la cuenta staff por defecto
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Crea una cuenta con su token y devuelve la clave del token
    pub async fn seed_account(
        &self,
        username: &str,
        password: &str,
        is_staff: bool,
        is_active: bool,
    ) -> String {
        let password_hash =
            bcrypt::hash(password, TEST_BCRYPT_COST).expect("failed to hash test password");
        let account = self
            .state
            .auth
            .create_account(NewAccount {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password_hash,
                is_staff,
                is_superuser: is_staff,
                is_active,
            })
            .await
            .expect("failed to seed account");

        self.state
            .auth
            .get_or_create_token(account.id)
            .await
            .expect("failed to issue test token")
            .key
    }

    /// Inserta un vehículo directamente en el store. `tag` distingue los
    /// campos únicos entre registros sembrados.
    pub async fn seed_vehicle(&self, brand: &str, name: &str, tag: &str) -> Vehicle {
        self.state
            .vehicles
            .create(NewVehicle {
                brand_name: brand.to_string(),
                vehicle_name: name.to_string(),
                model_number: format!("M-{}", tag),
                registration_number: format!("REG-{}", tag),
                vehicle_type: VehicleType::Car,
                vehicle_subtype: None,
                variant: Variant::Standard,
                transmission: Transmission::Manual,
                chassis_number: format!("CH-{}", tag),
                engine_number: format!("EN-{}", tag),
                description: None,
            })
            .await
            .expect("failed to seed vehicle")
    }

    /// Request arbitraria, con body JSON y token opcionales
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(key) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {}", key));
        }

        let body = if let Some(json) = body {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Request autenticada con la cuenta staff por defecto
    pub async fn api(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let token = self.token.clone();
        self.request(method, uri, body, Some(&token)).await
    }

    /// Request con el header Authorization tal cual, sin formatear
    pub async fn request_with_auth_header(
        &self,
        method: Method,
        uri: &str,
        auth_value: &str,
    ) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, auth_value)
            .body(Body::empty())
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// POST autenticado con un payload crudo que dice ser JSON
    pub async fn post_raw_json(&self, uri: &str, payload: &str) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Token {}", self.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// POST de formulario al estilo navegador (urlencoded)
    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        token: Option<&str>,
    ) -> Response {
        let encoded = fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(key) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {}", key));
        }
        builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

        let request = builder
            .body(Body::from(encoded))
            .expect("failed to build form request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }
}

/// Lee el body completo y lo interpreta como JSON
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}

/// Lee el body completo como texto (páginas HTML de la consola)
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not valid UTF-8")
}

/// Cuerpo JSON válido para crear un vehículo por la API
pub fn vehicle_body(tag: &str) -> Value {
    serde_json::json!({
        "brand_name": "Toyota",
        "vehicle_name": "Corolla",
        "model_number": format!("M-{}", tag),
        "registration_number": format!("REG-{}", tag),
        "vehicle_type": "car",
        "vehicle_subtype": "Sedan",
        "variant": "standard",
        "transmission": "manual",
        "chassis_number": format!("CH-{}", tag),
        "engine_number": format!("EN-{}", tag),
        "description": "Seeded from the API"
    })
}
