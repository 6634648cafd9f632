//! Repositorio de Vehicles
//!
//! Define el contrato `VehicleStore` y sus dos implementaciones: la de
//! PostgreSQL para producción y una en memoria que usa la suite de tests
//! para ejercitar el router completo sin base de datos.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{
    NewVehicle, SearchScope, Vehicle, VehicleChanges, VehicleOrdering, VehicleQuery,
};
use crate::utils::errors::{not_found_error, unique_violation_error, AppError, AppResult};

/// Contrato del almacén de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Inserta un registro nuevo; created_at == updated_at en el alta
    async fn create(&self, fields: NewVehicle) -> AppResult<Vehicle>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;

    /// Aplica cambios parciales y refresca updated_at
    async fn update(&self, id: i64, changes: VehicleChanges) -> AppResult<Vehicle>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Devuelve una página de resultados y el total de coincidencias
    async fn list(&self, query: &VehicleQuery) -> AppResult<(Vec<Vehicle>, i64)>;

    /// Qué campos únicos colisionan con registros existentes, en el orden
    /// registration_number, chassis_number, engine_number. `exclude_id`
    /// deja fuera al propio registro en las actualizaciones.
    async fn unique_conflicts(
        &self,
        registration_number: Option<&str>,
        chassis_number: Option<&str>,
        engine_number: Option<&str>,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<&'static str>>;
}

/// Escapa los comodines de LIKE para que la búsqueda sea literal
pub fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Traduce una violación de índice único (23505) al error por campo
/// correspondiente; cualquier otro error de base de datos se propaga.
fn map_unique_violation(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = error {
        if db.code().as_deref() == Some("23505") {
            let field = match db.constraint() {
                Some("vehicles_registration_number_key") => Some("registration_number"),
                Some("vehicles_chassis_number_key") => Some("chassis_number"),
                Some("vehicles_engine_number_key") => Some("engine_number"),
                _ => None,
            };
            if let Some(field) = field {
                return unique_violation_error(field);
            }
        }
    }
    AppError::Database(error)
}

fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &'a VehicleQuery) {
    let mut first = true;
    let mut separator = |builder: &mut QueryBuilder<'a, Postgres>| {
        if first {
            builder.push(" WHERE ");
            first = false;
        } else {
            builder.push(" AND ");
        }
    };

    if let Some(needle) = &query.search {
        let pattern = format!("%{}%", escape_like(needle));
        separator(builder);
        builder.push("(");
        for (i, column) in query.search_scope.columns().iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder.push(*column);
            builder.push(" ILIKE ");
            builder.push_bind(pattern.clone());
        }
        builder.push(")");
    }

    if let Some(vehicle_type) = query.vehicle_type {
        separator(builder);
        builder.push("vehicle_type = ");
        builder.push_bind(vehicle_type);
    }

    if let Some(variant) = query.variant {
        separator(builder);
        builder.push("variant = ");
        builder.push_bind(variant);
    }

    if let Some(transmission) = query.transmission {
        separator(builder);
        builder.push("transmission = ");
        builder.push_bind(transmission);
    }

    if let Some(after) = query.created_after {
        separator(builder);
        builder.push("created_at >= ");
        builder.push_bind(after);
    }

    if let Some(before) = query.created_before {
        separator(builder);
        builder.push("created_at <= ");
        builder.push_bind(before);
    }
}

/// Implementación sobre PostgreSQL
pub struct PgVehicleStore {
    pool: PgPool,
}

impl PgVehicleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn create(&self, fields: NewVehicle) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                brand_name, vehicle_name, model_number, registration_number,
                vehicle_type, vehicle_subtype, variant, transmission,
                chassis_number, engine_number, description, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&fields.brand_name)
        .bind(&fields.vehicle_name)
        .bind(&fields.model_number)
        .bind(&fields.registration_number)
        .bind(fields.vehicle_type)
        .bind(&fields.vehicle_subtype)
        .bind(fields.variant)
        .bind(fields.transmission)
        .bind(&fields.chassis_number)
        .bind(&fields.engine_number)
        .bind(&fields.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn update(&self, id: i64, changes: VehicleChanges) -> AppResult<Vehicle> {
        // Leer-modificar-escribir: los campos no tocados conservan su valor
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("vehicle", id))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand_name = $2, vehicle_name = $3, model_number = $4,
                registration_number = $5, vehicle_type = $6, vehicle_subtype = $7,
                variant = $8, transmission = $9, chassis_number = $10,
                engine_number = $11, description = $12, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.brand_name.unwrap_or(current.brand_name))
        .bind(changes.vehicle_name.unwrap_or(current.vehicle_name))
        .bind(changes.model_number.unwrap_or(current.model_number))
        .bind(
            changes
                .registration_number
                .unwrap_or(current.registration_number),
        )
        .bind(changes.vehicle_type.unwrap_or(current.vehicle_type))
        .bind(changes.vehicle_subtype.unwrap_or(current.vehicle_subtype))
        .bind(changes.variant.unwrap_or(current.variant))
        .bind(changes.transmission.unwrap_or(current.transmission))
        .bind(changes.chassis_number.unwrap_or(current.chassis_number))
        .bind(changes.engine_number.unwrap_or(current.engine_number))
        .bind(changes.description.unwrap_or(current.description))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => not_found_error("vehicle", id),
            other => map_unique_violation(other),
        })?;

        Ok(vehicle)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("vehicle", id));
        }

        Ok(())
    }

    async fn list(&self, query: &VehicleQuery) -> AppResult<(Vec<Vehicle>, i64)> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM vehicles");
        push_filters(&mut count_builder, query);
        let count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut builder = QueryBuilder::new("SELECT * FROM vehicles");
        push_filters(&mut builder, query);
        builder.push(" ORDER BY ");
        builder.push(query.ordering.sql());
        builder.push(" LIMIT ");
        builder.push_bind(query.limit);
        builder.push(" OFFSET ");
        builder.push_bind(query.offset);

        let rows = builder
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, count))
    }

    async fn unique_conflicts(
        &self,
        registration_number: Option<&str>,
        chassis_number: Option<&str>,
        engine_number: Option<&str>,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<&'static str>> {
        let (registration, chassis, engine): (bool, bool, bool) = sqlx::query_as(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM vehicles
                       WHERE registration_number = $1 AND id IS DISTINCT FROM $4),
                EXISTS(SELECT 1 FROM vehicles
                       WHERE chassis_number = $2 AND id IS DISTINCT FROM $4),
                EXISTS(SELECT 1 FROM vehicles
                       WHERE engine_number = $3 AND id IS DISTINCT FROM $4)
            "#,
        )
        .bind(registration_number)
        .bind(chassis_number)
        .bind(engine_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        let mut conflicts = Vec::new();
        if registration {
            conflicts.push("registration_number");
        }
        if chassis {
            conflicts.push("chassis_number");
        }
        if engine {
            conflicts.push("engine_number");
        }
        Ok(conflicts)
    }
}

/// Implementación en memoria para tests
#[derive(Debug, Default)]
pub struct MemoryVehicleStore {
    inner: std::sync::RwLock<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    rows: Vec<Vehicle>,
    next_id: i64,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned() -> AppError {
    AppError::Internal("Lock poisoned".to_string())
}

fn conflicting_fields(
    rows: &[Vehicle],
    registration_number: Option<&str>,
    chassis_number: Option<&str>,
    engine_number: Option<&str>,
    exclude_id: Option<i64>,
) -> Vec<&'static str> {
    let others = || rows.iter().filter(move |row| Some(row.id) != exclude_id);

    let mut conflicts = Vec::new();
    if let Some(needle) = registration_number {
        if others().any(|row| row.registration_number == needle) {
            conflicts.push("registration_number");
        }
    }
    if let Some(needle) = chassis_number {
        if others().any(|row| row.chassis_number == needle) {
            conflicts.push("chassis_number");
        }
    }
    if let Some(needle) = engine_number {
        if others().any(|row| row.engine_number == needle) {
            conflicts.push("engine_number");
        }
    }
    conflicts
}

fn matches_query(vehicle: &Vehicle, query: &VehicleQuery) -> bool {
    if let Some(needle) = &query.search {
        let needle = needle.to_lowercase();
        let mut haystacks = vec![
            &vehicle.brand_name,
            &vehicle.vehicle_name,
            &vehicle.registration_number,
        ];
        if query.search_scope == SearchScope::Admin {
            haystacks.push(&vehicle.chassis_number);
            haystacks.push(&vehicle.engine_number);
        }
        if !haystacks
            .iter()
            .any(|value| value.to_lowercase().contains(&needle))
        {
            return false;
        }
    }

    if let Some(vehicle_type) = query.vehicle_type {
        if vehicle.vehicle_type != vehicle_type {
            return false;
        }
    }
    if let Some(variant) = query.variant {
        if vehicle.variant != variant {
            return false;
        }
    }
    if let Some(transmission) = query.transmission {
        if vehicle.transmission != transmission {
            return false;
        }
    }
    if let Some(after) = query.created_after {
        if vehicle.created_at < after {
            return false;
        }
    }
    if let Some(before) = query.created_before {
        if vehicle.created_at > before {
            return false;
        }
    }
    true
}

fn sort_rows(rows: &mut [Vehicle], ordering: VehicleOrdering) {
    match ordering {
        VehicleOrdering::BrandNameAsc => {
            rows.sort_by(|a, b| a.brand_name.cmp(&b.brand_name).then(a.id.cmp(&b.id)))
        }
        VehicleOrdering::BrandNameDesc => {
            rows.sort_by(|a, b| b.brand_name.cmp(&a.brand_name).then(b.id.cmp(&a.id)))
        }
        VehicleOrdering::CreatedAtAsc => {
            rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
        }
        VehicleOrdering::CreatedAtDesc => {
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
        }
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn create(&self, fields: NewVehicle) -> AppResult<Vehicle> {
        // Chequeo e inserción bajo el mismo write lock: ante dos altas en
        // carrera sobre el mismo valor único, exactamente una gana
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;

        if let Some(field) = conflicting_fields(
            &inner.rows,
            Some(&fields.registration_number),
            Some(&fields.chassis_number),
            Some(&fields.engine_number),
            None,
        )
        .into_iter()
        .next()
        {
            return Err(unique_violation_error(field));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let vehicle = Vehicle {
            id: inner.next_id,
            brand_name: fields.brand_name,
            vehicle_name: fields.vehicle_name,
            model_number: fields.model_number,
            registration_number: fields.registration_number,
            vehicle_type: fields.vehicle_type,
            vehicle_subtype: fields.vehicle_subtype,
            variant: fields.variant,
            transmission: fields.transmission,
            chassis_number: fields.chassis_number,
            engine_number: fields.engine_number,
            description: fields.description,
            created_at: now,
            updated_at: now,
        };
        inner.rows.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.rows.iter().find(|v| v.id == id).cloned())
    }

    async fn update(&self, id: i64, changes: VehicleChanges) -> AppResult<Vehicle> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;

        let position = inner
            .rows
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| not_found_error("vehicle", id))?;

        let mut updated = inner.rows[position].clone();
        if let Some(value) = changes.brand_name {
            updated.brand_name = value;
        }
        if let Some(value) = changes.vehicle_name {
            updated.vehicle_name = value;
        }
        if let Some(value) = changes.model_number {
            updated.model_number = value;
        }
        if let Some(value) = changes.registration_number {
            updated.registration_number = value;
        }
        if let Some(value) = changes.vehicle_type {
            updated.vehicle_type = value;
        }
        if let Some(value) = changes.vehicle_subtype {
            updated.vehicle_subtype = value;
        }
        if let Some(value) = changes.variant {
            updated.variant = value;
        }
        if let Some(value) = changes.transmission {
            updated.transmission = value;
        }
        if let Some(value) = changes.chassis_number {
            updated.chassis_number = value;
        }
        if let Some(value) = changes.engine_number {
            updated.engine_number = value;
        }
        if let Some(value) = changes.description {
            updated.description = value;
        }

        if let Some(field) = conflicting_fields(
            &inner.rows,
            Some(&updated.registration_number),
            Some(&updated.chassis_number),
            Some(&updated.engine_number),
            Some(id),
        )
        .into_iter()
        .next()
        {
            return Err(unique_violation_error(field));
        }

        updated.updated_at = Utc::now();
        inner.rows[position] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        let before = inner.rows.len();
        inner.rows.retain(|v| v.id != id);
        if inner.rows.len() == before {
            return Err(not_found_error("vehicle", id));
        }
        Ok(())
    }

    async fn list(&self, query: &VehicleQuery) -> AppResult<(Vec<Vehicle>, i64)> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;

        let mut rows: Vec<Vehicle> = inner
            .rows
            .iter()
            .filter(|v| matches_query(v, query))
            .cloned()
            .collect();
        sort_rows(&mut rows, query.ordering);

        let count = rows.len() as i64;
        let start = query.offset.max(0).min(count) as usize;
        let end = query
            .offset
            .max(0)
            .saturating_add(query.limit.max(0))
            .min(count) as usize;
        Ok((rows[start..end].to_vec(), count))
    }

    async fn unique_conflicts(
        &self,
        registration_number: Option<&str>,
        chassis_number: Option<&str>,
        engine_number: Option<&str>,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<&'static str>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(conflicting_fields(
            &inner.rows,
            registration_number,
            chassis_number,
            engine_number,
            exclude_id,
        ))
    }
}
