//! Humo contra PostgreSQL real
//!
//! Corre solo cuando DATABASE_URL apunta a una base alcanzable; sin
//! ella el test termina sin hacer nada. Cubre el camino SQL de los
//! almacenes, que la suite en memoria no toca.

use vehicle_inventory::database::connection::{create_pool, run_migrations};
use vehicle_inventory::models::{
    NewAccount, NewVehicle, Transmission, Variant, VehicleChanges, VehicleQuery, VehicleType,
};
use vehicle_inventory::repositories::{AuthStore, PgAuthStore, PgVehicleStore, VehicleStore};
use vehicle_inventory::utils::errors::AppError;
use vehicle_inventory::utils::token::generate_token_key;

fn smoke_vehicle(tag: &str) -> NewVehicle {
    NewVehicle {
        brand_name: "Smoke".to_string(),
        vehicle_name: format!("Smoke {}", tag),
        model_number: format!("SMK-{}", tag),
        registration_number: format!("REG-SMK-{}", tag),
        vehicle_type: VehicleType::Car,
        vehicle_subtype: None,
        variant: Variant::Standard,
        transmission: Transmission::Manual,
        chassis_number: format!("CH-SMK-{}", tag),
        engine_number: format!("EN-SMK-{}", tag),
        description: None,
    }
}

#[tokio::test]
async fn test_postgres_stores_end_to_end() {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => return, // sin base de datos configurada el humo no corre
    };
    let pool = match create_pool(&database_url).await {
        Ok(pool) => pool,
        Err(_) => return, // configurada pero no alcanzable
    };
    run_migrations(&pool).await.expect("migrations");

    let store = PgVehicleStore::new(pool.clone());
    // Sufijo único por ejecución para no chocar con restos de corridas
    // anteriores en la misma base
    let tag = generate_token_key()[..8].to_string();

    let created = store.create(smoke_vehicle(&tag)).await.expect("create");
    assert!(created.id > 0);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = store.find_by_id(created.id).await.expect("find");
    assert_eq!(
        fetched.map(|vehicle| vehicle.registration_number),
        Some(format!("REG-SMK-{}", tag))
    );

    // La colisión de único llega desde el índice (23505), no del
    // pre-chequeo de los controladores
    let mut duplicate = smoke_vehicle(&format!("{}b", tag));
    duplicate.registration_number = format!("REG-SMK-{}", tag);
    match store.create(duplicate).await {
        Err(AppError::Fields(_)) => {}
        other => panic!("expected unique violation, got {:?}", other),
    }

    let changes = VehicleChanges {
        vehicle_name: Some(format!("Smoke {} v2", tag)),
        ..VehicleChanges::default()
    };
    let updated = store.update(created.id, changes).await.expect("update");
    assert_eq!(updated.vehicle_name, format!("Smoke {} v2", tag));
    assert!(updated.updated_at >= updated.created_at);

    let query = VehicleQuery {
        search: Some(format!("reg-smk-{}", tag)),
        limit: 10,
        ..VehicleQuery::default()
    };
    let (rows, total) = store.list(&query).await.expect("list");
    assert_eq!(total, 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, created.id);

    let conflicts = store
        .unique_conflicts(
            Some(&format!("REG-SMK-{}", tag)),
            None,
            None,
            Some(created.id),
        )
        .await
        .expect("conflicts");
    assert!(conflicts.is_empty());

    let auth = PgAuthStore::new(pool.clone());
    let account = auth
        .create_account(NewAccount {
            username: format!("smoke_{}", tag),
            email: format!("smoke_{}@example.com", tag),
            password_hash: "not-a-real-hash".to_string(),
            is_staff: true,
            is_superuser: false,
            is_active: true,
        })
        .await
        .expect("account");

    let token = auth.get_or_create_token(account.id).await.expect("token");
    let again = auth
        .get_or_create_token(account.id)
        .await
        .expect("token again");
    assert_eq!(token.key, again.key);

    let owner = auth.account_for_token(&token.key).await.expect("lookup");
    assert_eq!(owner.map(|owner| owner.id), Some(account.id));

    assert!(auth.delete_token(&token.key).await.expect("logout"));
    assert!(!auth.delete_token(&token.key).await.expect("second logout"));

    store.delete(created.id).await.expect("cleanup vehicle");
    match store.delete(created.id).await {
        Err(AppError::NotFound(_)) => {}
        other => panic!("expected not found after delete, got {:?}", other),
    }
    sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(account.id)
        .execute(&pool)
        .await
        .expect("cleanup account");
}
