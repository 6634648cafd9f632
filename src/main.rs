use anyhow::Result;
use axum::extract::Request;
use axum::ServiceExt;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use vehicle_inventory::config::environment::EnvironmentConfig;
use vehicle_inventory::database;
use vehicle_inventory::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use vehicle_inventory::models::user::NewAccount;
use vehicle_inventory::routes::create_app_router;
use vehicle_inventory::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Smart Vehicle Management System");
    info!("==================================");

    let config = EnvironmentConfig::from_env()?;

    // Inicializar base de datos
    let pool = match database::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };
    info!("✅ Conexión a PostgreSQL establecida");

    database::run_migrations(&pool).await?;
    info!("✅ Migraciones aplicadas");

    let state = AppState::new(pool, config.clone());

    bootstrap_admin(&state, &config).await?;

    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&config.cors_origins)
    };

    let app = create_app_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Los trailing slashes se normalizan antes de entrar al router
    let app = NormalizePathLayer::trim_trailing_slash().layer(app);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("🚙 API de vehículos (requiere token de cuenta staff):");
    info!("   GET    /api/vehicles/ - Listar vehículos");
    info!("   POST   /api/vehicles/ - Crear vehículo");
    info!("   GET    /api/vehicles/:id/ - Obtener vehículo");
    info!("   PUT    /api/vehicles/:id/ - Reemplazar vehículo");
    info!("   PATCH  /api/vehicles/:id/ - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id/ - Eliminar vehículo");
    info!("🔑 Autenticación administrativa:");
    info!("   POST   /api/admin/login/ - Login");
    info!("   POST   /api/admin/logout/ - Logout");
    info!("   GET    /api/admin/profile/ - Perfil");
    info!("🖥️  Consola: http://{}/admin/vehicles", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Crea la cuenta staff inicial si las variables ADMIN_* están definidas
async fn bootstrap_admin(state: &AppState, config: &EnvironmentConfig) -> Result<()> {
    let (username, email, password) = match (
        config.admin_username.as_deref(),
        config.admin_email.as_deref(),
        config.admin_password.as_deref(),
    ) {
        (Some(username), Some(email), Some(password)) => (username, email, password),
        _ => return Ok(()),
    };

    if state
        .auth
        .find_account_by_username(username)
        .await?
        .is_some()
    {
        info!("👤 La cuenta staff '{}' ya existe", username);
        return Ok(());
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| anyhow::anyhow!("error hasheando la contraseña inicial: {}", e))?;

    state
        .auth
        .create_account(NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            is_staff: true,
            is_superuser: true,
            is_active: true,
        })
        .await?;

    info!("👤 Cuenta staff '{}' creada", username);
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
