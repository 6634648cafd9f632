use std::sync::Arc;

use crate::dto::vehicle_dto::{
    ListVehiclesParams, Paginated, VehicleCreateRequest, VehiclePatchRequest, VehicleResponse,
};
use crate::models::vehicle::{VehicleOrdering, VehicleQuery};
use crate::repositories::VehicleStore;
use crate::utils::errors::{not_found_error, AppResult, FieldErrors};
use crate::utils::pagination;

pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: VehicleCreateRequest) -> AppResult<VehicleResponse> {
        let fields = request.validated()?;

        self.ensure_unique(
            Some(&fields.registration_number),
            Some(&fields.chassis_number),
            Some(&fields.engine_number),
            None,
        )
        .await?;

        let vehicle = self.store.create(fields).await?;
        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn retrieve(&self, id: i64) -> AppResult<VehicleResponse> {
        let vehicle = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("vehicle", id))?;

        Ok(VehicleResponse::from(vehicle))
    }

    /// Listado paginado con búsqueda y ordenación.
    /// `path` es la ruta de la request, para construir los enlaces
    /// next/previous relativos.
    pub async fn list(
        &self,
        path: &str,
        params: ListVehiclesParams,
    ) -> AppResult<Paginated<VehicleResponse>> {
        let page_size = pagination::resolve_page_size(params.page_size.as_deref());
        let page = pagination::parse_page(params.page.as_deref())?;
        let offset = pagination::page_offset(page, page_size)?;

        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(ToString::to_string);

        let ordering = params
            .ordering
            .as_deref()
            .and_then(VehicleOrdering::parse)
            .unwrap_or_default();

        let query = VehicleQuery {
            search,
            ordering,
            limit: page_size,
            offset,
            ..VehicleQuery::default()
        };

        let (rows, count) = self.store.list(&query).await?;

        if page > pagination::total_pages(count, page_size) {
            return Err(pagination::invalid_page());
        }

        // Los enlaces repiten los parámetros tal como llegaron
        let mut link_params: Vec<(&str, String)> = Vec::new();
        if let Some(value) = params.search.as_ref() {
            link_params.push(("search", value.clone()));
        }
        if let Some(value) = params.ordering.as_ref() {
            link_params.push(("ordering", value.clone()));
        }
        if let Some(value) = params.page_size.as_ref() {
            link_params.push(("page_size", value.clone()));
        }
        let links = pagination::page_links(path, &link_params, page, count, page_size);

        Ok(Paginated {
            count,
            next: links.next,
            previous: links.previous,
            results: rows.into_iter().map(VehicleResponse::from).collect(),
        })
    }

    /// PUT: reemplazo completo; los opcionales ausentes quedan en NULL
    pub async fn replace(
        &self,
        id: i64,
        request: VehicleCreateRequest,
    ) -> AppResult<VehicleResponse> {
        // El 404 tiene prioridad sobre los errores de validación
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("vehicle", id))?;

        let changes = request.full_changes()?;

        self.ensure_unique(
            changes.registration_number.as_deref(),
            changes.chassis_number.as_deref(),
            changes.engine_number.as_deref(),
            Some(id),
        )
        .await?;

        let vehicle = self.store.update(id, changes).await?;
        Ok(VehicleResponse::from(vehicle))
    }

    /// PATCH: solo cambia los campos presentes en el body
    pub async fn patch(
        &self,
        id: i64,
        request: VehiclePatchRequest,
    ) -> AppResult<VehicleResponse> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("vehicle", id))?;

        let changes = request.changes()?;

        self.ensure_unique(
            changes.registration_number.as_deref(),
            changes.chassis_number.as_deref(),
            changes.engine_number.as_deref(),
            Some(id),
        )
        .await?;

        let vehicle = self.store.update(id, changes).await?;
        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.store.delete(id).await
    }

    /// Acumula en un solo 400 todas las colisiones de campos únicos
    async fn ensure_unique(
        &self,
        registration_number: Option<&str>,
        chassis_number: Option<&str>,
        engine_number: Option<&str>,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let conflicts = self
            .store
            .unique_conflicts(registration_number, chassis_number, engine_number, exclude_id)
            .await?;

        if conflicts.is_empty() {
            return Ok(());
        }

        let mut errors = FieldErrors::new();
        for field in conflicts {
            errors.add(
                field,
                format!("vehicle with this {} already exists.", field.replace('_', " ")),
            );
        }
        Err(errors.into())
    }
}
