//! Páginas CRUD de vehículos de la consola
//!
//! Listado con filtros laterales, búsqueda y paginación, formularios de
//! alta/edición agrupados en fieldsets y borrado por POST. Todas las
//! rutas pasan por el middleware de token y el de staff.

use axum::{
    extract::{OriginalUri, Query, State},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Deserialize;

use crate::admin::colors::{transmission_color, variant_color, vehicle_type_color};
use crate::admin::site::{escape_html, page, INDEX_TITLE};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::VehicleCreateRequest;
use crate::middleware::auth::{require_staff, require_token};
use crate::models::vehicle::{
    SearchScope, Transmission, Variant, Vehicle, VehicleQuery, VehicleType,
};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, FieldErrors};
use crate::utils::extract::PathId;
use crate::utils::pagination;

const ADMIN_PAGE_SIZE: i64 = 100;

const DATE_WINDOWS: [(&str, &str); 4] = [
    ("today", "Today"),
    ("past_7_days", "Past 7 days"),
    ("this_month", "This month"),
    ("this_year", "This year"),
];

/// Router de la consola; `/admin` redirige al listado de vehículos
pub fn create_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(console_index))
        .route("/vehicles", get(changelist))
        .route("/vehicles/add", get(add_form).post(create_from_form))
        .route("/vehicles/:id", get(edit_form).post(update_from_form))
        .route("/vehicles/:id/delete", post(delete_from_form))
        .layer(middleware::from_fn(require_staff))
        .layer(middleware::from_fn_with_state(state, require_token))
}

async fn console_index() -> Redirect {
    Redirect::to("/admin/vehicles")
}

/// Parámetros del listado: búsqueda, filtros exactos, ventana de fechas
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AdminListParams {
    pub q: Option<String>,
    pub vehicle_type: Option<String>,
    pub variant: Option<String>,
    pub transmission: Option<String>,
    pub created_at: Option<String>,
    pub page: Option<String>,
}

async fn changelist(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<AdminListParams>,
) -> Result<Html<String>, AppError> {
    let page_number = pagination::parse_page(params.page.as_deref())?;
    let offset = pagination::page_offset(page_number, ADMIN_PAGE_SIZE)?;
    let query = build_admin_query(&params, offset, Utc::now());
    let (rows, count) = state.vehicles.list(&query).await?;

    if page_number > pagination::total_pages(count, ADMIN_PAGE_SIZE) {
        return Err(pagination::invalid_page());
    }

    Ok(Html(render_changelist(
        uri.path(),
        &params,
        &rows,
        count,
        page_number,
    )))
}

async fn add_form() -> Html<String> {
    Html(render_form_page(
        "Add vehicle",
        "/admin/vehicles/add",
        &VehicleForm::default(),
        &FieldErrors::new(),
        None,
    ))
}

async fn create_from_form(
    State(state): State<AppState>,
    Form(form): Form<VehicleForm>,
) -> Result<Response, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());

    match controller.create(form.clone().into_request()).await {
        Ok(_) => Ok(Redirect::to("/admin/vehicles").into_response()),
        Err(AppError::Fields(errors)) => Ok(Html(render_form_page(
            "Add vehicle",
            "/admin/vehicles/add",
            &form,
            &errors,
            None,
        ))
        .into_response()),
        Err(other) => Err(other),
    }
}

async fn edit_form(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Html<String>, AppError> {
    let vehicle = state
        .vehicles
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("vehicle", id))?;

    let form = VehicleForm::from_vehicle(&vehicle);
    Ok(Html(render_form_page(
        "Change vehicle",
        &format!("/admin/vehicles/{}", id),
        &form,
        &FieldErrors::new(),
        Some(&vehicle),
    )))
}

async fn update_from_form(
    State(state): State<AppState>,
    PathId(id): PathId,
    Form(form): Form<VehicleForm>,
) -> Result<Response, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());

    match controller.replace(id, form.clone().into_request()).await {
        Ok(_) => Ok(Redirect::to("/admin/vehicles").into_response()),
        Err(AppError::Fields(errors)) => {
            let vehicle = state
                .vehicles
                .find_by_id(id)
                .await?
                .ok_or_else(|| not_found_error("vehicle", id))?;
            Ok(Html(render_form_page(
                "Change vehicle",
                &format!("/admin/vehicles/{}", id),
                &form,
                &errors,
                Some(&vehicle),
            ))
            .into_response())
        }
        Err(other) => Err(other),
    }
}

async fn delete_from_form(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Redirect, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    controller.delete(id).await?;
    Ok(Redirect::to("/admin/vehicles"))
}

/// Campos del formulario tal como llegan del navegador
#[derive(Debug, Default, Clone, Deserialize)]
pub struct VehicleForm {
    pub brand_name: Option<String>,
    pub vehicle_name: Option<String>,
    pub model_number: Option<String>,
    pub registration_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_subtype: Option<String>,
    pub variant: Option<String>,
    pub transmission: Option<String>,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    pub description: Option<String>,
}

impl VehicleForm {
    fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            brand_name: Some(vehicle.brand_name.clone()),
            vehicle_name: Some(vehicle.vehicle_name.clone()),
            model_number: Some(vehicle.model_number.clone()),
            registration_number: Some(vehicle.registration_number.clone()),
            vehicle_type: Some(vehicle.vehicle_type.as_str().to_string()),
            vehicle_subtype: vehicle.vehicle_subtype.clone(),
            variant: Some(vehicle.variant.as_str().to_string()),
            transmission: Some(vehicle.transmission.as_str().to_string()),
            chassis_number: Some(vehicle.chassis_number.clone()),
            engine_number: Some(vehicle.engine_number.clone()),
            description: vehicle.description.clone(),
        }
    }

    /// Los inputs vacíos del formulario cuentan como ausentes
    fn into_request(self) -> VehicleCreateRequest {
        let clean = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        VehicleCreateRequest {
            brand_name: clean(self.brand_name),
            vehicle_name: clean(self.vehicle_name),
            model_number: clean(self.model_number),
            registration_number: clean(self.registration_number),
            vehicle_type: clean(self.vehicle_type),
            vehicle_subtype: clean(self.vehicle_subtype),
            variant: clean(self.variant),
            transmission: clean(self.transmission),
            chassis_number: clean(self.chassis_number),
            engine_number: clean(self.engine_number),
            description: clean(self.description),
        }
    }
}

fn build_admin_query(params: &AdminListParams, offset: i64, now: DateTime<Utc>) -> VehicleQuery {
    let window = params
        .created_at
        .as_deref()
        .and_then(|key| created_at_window(key, now));

    VehicleQuery {
        search: params
            .q
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(ToString::to_string),
        search_scope: SearchScope::Admin,
        vehicle_type: params.vehicle_type.as_deref().and_then(VehicleType::parse),
        variant: params.variant.as_deref().and_then(Variant::parse),
        transmission: params.transmission.as_deref().and_then(Transmission::parse),
        created_after: window.map(|(from, _)| from),
        created_before: window.map(|(_, until)| until),
        limit: ADMIN_PAGE_SIZE,
        offset,
        ..VehicleQuery::default()
    }
}

/// Ventana [inicio, fin] para el filtro de fecha de alta. Claves fuera
/// de la lista devuelven None y el filtro se ignora.
fn created_at_window(key: &str, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let today = now.date_naive();
    let start_of = |date: NaiveDate| Some(date.and_hms_opt(0, 0, 0)?.and_utc());

    let (from, next_start) = match key {
        "today" => (start_of(today)?, start_of(today.succ_opt()?)?),
        "past_7_days" => (
            start_of(today - Duration::days(7))?,
            start_of(today.succ_opt()?)?,
        ),
        "this_month" => {
            let next = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
            };
            (start_of(today.with_day(1)?)?, start_of(next)?)
        }
        "this_year" => (
            start_of(NaiveDate::from_ymd_opt(today.year(), 1, 1)?)?,
            start_of(NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?)?,
        ),
        _ => return None,
    };

    // El límite superior es inclusivo en la query, de ahí el microsegundo
    Some((from, next_start - Duration::microseconds(1)))
}

fn render_changelist(
    path: &str,
    params: &AdminListParams,
    rows: &[Vehicle],
    count: i64,
    page_number: i64,
) -> String {
    let mut body = String::with_capacity(16384);
    body.push_str("<h1>");
    body.push_str(&INDEX_TITLE);
    body.push_str("</h1>\n");

    body.push_str(
        "<div class=\"object-tools\"><a href=\"/admin/vehicles/add\">Add vehicle</a></div>\n",
    );

    // La búsqueda conserva los filtros activos como campos ocultos
    body.push_str("<form id=\"changelist-search\" method=\"get\" action=\"/admin/vehicles\">");
    body.push_str("<input type=\"text\" name=\"q\" value=\"");
    if let Some(q) = &params.q {
        body.push_str(&escape_html(q));
    }
    body.push_str("\" placeholder=\"Search vehicles\"/> ");
    for (name, value) in [
        ("vehicle_type", &params.vehicle_type),
        ("variant", &params.variant),
        ("transmission", &params.transmission),
        ("created_at", &params.created_at),
    ] {
        if let Some(value) = value {
            body.push_str("<input type=\"hidden\" name=\"");
            body.push_str(name);
            body.push_str("\" value=\"");
            body.push_str(&escape_html(value));
            body.push_str("\"/>");
        }
    }
    body.push_str("<button type=\"submit\">Search</button></form>\n");

    body.push_str("<div class=\"changelist\">\n<div class=\"results\">\n<table>\n<thead><tr>");
    for header in [
        "Brand Name",
        "Vehicle Name",
        "Registration Number",
        "Vehicle Type",
        "Variant",
        "Transmission",
        "Created At",
    ] {
        body.push_str("<th>");
        body.push_str(header);
        body.push_str("</th>");
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    for vehicle in rows {
        body.push_str(&render_row(vehicle));
    }
    if rows.is_empty() {
        body.push_str("<tr><td colspan=\"7\">No vehicles found.</td></tr>\n");
    }
    body.push_str("</tbody>\n</table>\n</div>\n");

    body.push_str(&render_filter_sidebar(params));
    body.push_str("</div>\n");

    body.push_str(&render_paginator(path, params, count, page_number));

    page("Vehicles", &body)
}

fn render_row(vehicle: &Vehicle) -> String {
    let mut row = String::with_capacity(512);
    row.push_str("<tr><td><a href=\"/admin/vehicles/");
    row.push_str(&vehicle.id.to_string());
    row.push_str("\">");
    row.push_str(&escape_html(&vehicle.brand_name));
    row.push_str("</a></td><td>");
    row.push_str(&escape_html(&vehicle.vehicle_name));
    row.push_str("</td><td>");
    row.push_str(&escape_html(&vehicle.registration_number));
    row.push_str("</td><td>");
    row.push_str(&badge(
        vehicle_type_color(vehicle.vehicle_type.as_str()),
        vehicle.vehicle_type.label(),
    ));
    row.push_str("</td><td>");
    row.push_str(&badge(
        variant_color(vehicle.variant.as_str()),
        vehicle.variant.label(),
    ));
    row.push_str("</td><td>");
    row.push_str(&badge(
        transmission_color(vehicle.transmission.as_str()),
        vehicle.transmission.label(),
    ));
    row.push_str("</td><td>");
    row.push_str(&vehicle.created_at.format("%Y-%m-%d %H:%M").to_string());
    row.push_str("</td></tr>\n");
    row
}

/// Insignia coloreada de las columnas de enum
fn badge(color: &str, label: &str) -> String {
    format!(
        "<span style=\"background-color:{}; color:white; padding:3px 8px; border-radius:6px;\">{}</span>",
        color,
        escape_html(label)
    )
}

fn render_filter_sidebar(params: &AdminListParams) -> String {
    let type_choices: Vec<(&str, &str)> = VehicleType::ALL
        .iter()
        .map(|value| (value.as_str(), value.label()))
        .collect();
    let variant_choices: Vec<(&str, &str)> = Variant::ALL
        .iter()
        .map(|value| (value.as_str(), value.label()))
        .collect();
    let transmission_choices: Vec<(&str, &str)> = Transmission::ALL
        .iter()
        .map(|value| (value.as_str(), value.label()))
        .collect();

    let mut sidebar = String::with_capacity(4096);
    sidebar.push_str("<aside id=\"changelist-filter\">\n");
    sidebar.push_str(&filter_section("By vehicle type", "vehicle_type", &type_choices, params));
    sidebar.push_str(&filter_section("By variant", "variant", &variant_choices, params));
    sidebar.push_str(&filter_section(
        "By transmission",
        "transmission",
        &transmission_choices,
        params,
    ));
    sidebar.push_str(&filter_section("By created at", "created_at", &DATE_WINDOWS, params));
    sidebar.push_str("</aside>\n");
    sidebar
}

fn filter_section(
    title: &str,
    key: &str,
    choices: &[(&str, &str)],
    params: &AdminListParams,
) -> String {
    let current = match key {
        "vehicle_type" => params.vehicle_type.as_deref(),
        "variant" => params.variant.as_deref(),
        "transmission" => params.transmission.as_deref(),
        "created_at" => params.created_at.as_deref(),
        _ => None,
    };

    let mut section = String::with_capacity(1024);
    section.push_str("<h3>");
    section.push_str(title);
    section.push_str("</h3>\n<ul>\n");

    let all_class = if current.is_none() {
        " class=\"selected\""
    } else {
        ""
    };
    section.push_str(&format!(
        "<li{}><a href=\"{}\">All</a></li>\n",
        all_class,
        escape_html(&filter_url(params, key, None))
    ));

    for (value, label) in choices {
        let class = if current == Some(*value) {
            " class=\"selected\""
        } else {
            ""
        };
        section.push_str(&format!(
            "<li{}><a href=\"{}\">{}</a></li>\n",
            class,
            escape_html(&filter_url(params, key, Some(value))),
            escape_html(label)
        ));
    }

    section.push_str("</ul>\n");
    section
}

/// URL del listado con un filtro cambiado; None quita ese filtro.
/// La página vuelve siempre a la primera.
fn filter_url(params: &AdminListParams, key: &str, value: Option<&str>) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if let Some(q) = &params.q {
        pairs.push(("q", q.clone()));
    }
    for (name, current) in [
        ("vehicle_type", &params.vehicle_type),
        ("variant", &params.variant),
        ("transmission", &params.transmission),
        ("created_at", &params.created_at),
    ] {
        if name == key {
            if let Some(value) = value {
                pairs.push((name, value.to_string()));
            }
        } else if let Some(current) = current {
            pairs.push((name, current.clone()));
        }
    }
    pagination::page_link("/admin/vehicles", &pairs, 1)
}

fn render_paginator(
    path: &str,
    params: &AdminListParams,
    count: i64,
    page_number: i64,
) -> String {
    let mut link_params: Vec<(&str, String)> = Vec::new();
    if let Some(q) = &params.q {
        link_params.push(("q", q.clone()));
    }
    for (name, value) in [
        ("vehicle_type", &params.vehicle_type),
        ("variant", &params.variant),
        ("transmission", &params.transmission),
        ("created_at", &params.created_at),
    ] {
        if let Some(value) = value {
            link_params.push((name, value.clone()));
        }
    }
    let links = pagination::page_links(path, &link_params, page_number, count, ADMIN_PAGE_SIZE);

    let mut paginator = String::with_capacity(256);
    paginator.push_str("<div class=\"paginator\">");
    if let Some(previous) = links.previous {
        paginator.push_str("<a href=\"");
        paginator.push_str(&escape_html(&previous));
        paginator.push_str("\">previous</a> ");
    }
    if count == 1 {
        paginator.push_str("1 vehicle");
    } else {
        paginator.push_str(&format!("{} vehicles", count));
    }
    if let Some(next) = links.next {
        paginator.push_str(" <a href=\"");
        paginator.push_str(&escape_html(&next));
        paginator.push_str("\">next</a>");
    }
    paginator.push_str("</div>\n");
    paginator
}

fn render_form_page(
    title: &str,
    action: &str,
    form: &VehicleForm,
    errors: &FieldErrors,
    existing: Option<&Vehicle>,
) -> String {
    let type_choices: Vec<(&str, &str)> = VehicleType::ALL
        .iter()
        .map(|value| (value.as_str(), value.label()))
        .collect();
    let variant_choices: Vec<(&str, &str)> = Variant::ALL
        .iter()
        .map(|value| (value.as_str(), value.label()))
        .collect();
    let transmission_choices: Vec<(&str, &str)> = Transmission::ALL
        .iter()
        .map(|value| (value.as_str(), value.label()))
        .collect();

    let mut body = String::with_capacity(8192);
    body.push_str("<h1>");
    body.push_str(title);
    body.push_str("</h1>\n");
    if let Some(vehicle) = existing {
        body.push_str("<h2>");
        body.push_str(&escape_html(&vehicle.display_title()));
        body.push_str("</h2>\n");
    }
    body.push_str("<form method=\"post\" action=\"");
    body.push_str(&escape_html(action));
    body.push_str("\">\n");

    body.push_str("<fieldset><legend>🚘 Basic Information</legend>\n");
    body.push_str(&text_row(
        "brand_name",
        "Brand Name",
        form.brand_name.as_deref(),
        Some("Enter the brand of the vehicle (e.g., Toyota, Honda)"),
        errors,
    ));
    body.push_str(&text_row(
        "vehicle_name",
        "Vehicle Name",
        form.vehicle_name.as_deref(),
        Some("Enter the vehicle model name (e.g., Corolla, Civic)"),
        errors,
    ));
    body.push_str(&text_row(
        "model_number",
        "Model Number",
        form.model_number.as_deref(),
        Some("Enter the model or series number"),
        errors,
    ));
    body.push_str(&text_row(
        "registration_number",
        "Registration Number",
        form.registration_number.as_deref(),
        Some("Unique registration number of the vehicle"),
        errors,
    ));
    body.push_str("</fieldset>\n");

    body.push_str("<fieldset><legend>⚙️ Specifications</legend>\n");
    body.push_str(&select_row(
        "vehicle_type",
        "Vehicle Type",
        form.vehicle_type.as_deref(),
        &type_choices,
        None,
        errors,
    ));
    body.push_str(&text_row(
        "vehicle_subtype",
        "Vehicle Subtype",
        form.vehicle_subtype.as_deref(),
        Some("Enter subtype such as Sedan, SUV, or Hatchback"),
        errors,
    ));
    body.push_str(&select_row(
        "variant",
        "Variant",
        form.variant.as_deref(),
        &variant_choices,
        Some("Select the variant or trim level of the vehicle"),
        errors,
    ));
    body.push_str(&select_row(
        "transmission",
        "Transmission Type",
        form.transmission.as_deref(),
        &transmission_choices,
        None,
        errors,
    ));
    body.push_str("</fieldset>\n");

    body.push_str("<fieldset><legend>🔢 Identification Numbers</legend>\n");
    body.push_str(&text_row(
        "chassis_number",
        "Chassis Number",
        form.chassis_number.as_deref(),
        None,
        errors,
    ));
    body.push_str(&text_row(
        "engine_number",
        "Engine Number",
        form.engine_number.as_deref(),
        None,
        errors,
    ));
    body.push_str("</fieldset>\n");

    body.push_str("<fieldset><legend>📝 Additional Info</legend>\n");
    body.push_str(&textarea_row(
        "description",
        "Description",
        form.description.as_deref(),
        Some("Optional: provide details about the vehicle"),
        errors,
    ));
    if let Some(vehicle) = existing {
        body.push_str(&readonly_row(
            "Created At",
            &vehicle.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ));
        body.push_str(&readonly_row(
            "Updated At",
            &vehicle.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ));
    }
    body.push_str("</fieldset>\n");

    body.push_str("<div class=\"submit-row\"><button type=\"submit\">Save</button>");
    body.push_str("<a href=\"/admin/vehicles\">Cancel</a></div>\n</form>\n");

    if let Some(vehicle) = existing {
        body.push_str(&format!(
            "<form method=\"post\" action=\"/admin/vehicles/{}/delete\" class=\"submit-row\"><button type=\"submit\" class=\"deletelink\">Delete</button></form>\n",
            vehicle.id
        ));
    }

    page(title, &body)
}

fn field_errors_html(field: &str, errors: &FieldErrors) -> String {
    match errors.messages(field) {
        Some(messages) => {
            let mut list = String::from("<ul class=\"errorlist\">");
            for message in messages {
                list.push_str("<li>");
                list.push_str(&escape_html(message));
                list.push_str("</li>");
            }
            list.push_str("</ul>");
            list
        }
        None => String::new(),
    }
}

fn text_row(
    name: &str,
    label: &str,
    value: Option<&str>,
    help: Option<&str>,
    errors: &FieldErrors,
) -> String {
    let mut row = String::with_capacity(320);
    row.push_str("<div class=\"form-row\">");
    row.push_str(&field_errors_html(name, errors));
    row.push_str("<label for=\"id_");
    row.push_str(name);
    row.push_str("\">");
    row.push_str(label);
    row.push_str("</label><input type=\"text\" id=\"id_");
    row.push_str(name);
    row.push_str("\" name=\"");
    row.push_str(name);
    row.push_str("\" value=\"");
    if let Some(value) = value {
        row.push_str(&escape_html(value));
    }
    row.push_str("\"/>");
    if let Some(help) = help {
        row.push_str("<span class=\"helptext\">");
        row.push_str(&escape_html(help));
        row.push_str("</span>");
    }
    row.push_str("</div>\n");
    row
}

fn select_row(
    name: &str,
    label: &str,
    current: Option<&str>,
    choices: &[(&str, &str)],
    help: Option<&str>,
    errors: &FieldErrors,
) -> String {
    let mut row = String::with_capacity(512);
    row.push_str("<div class=\"form-row\">");
    row.push_str(&field_errors_html(name, errors));
    row.push_str("<label for=\"id_");
    row.push_str(name);
    row.push_str("\">");
    row.push_str(label);
    row.push_str("</label><select id=\"id_");
    row.push_str(name);
    row.push_str("\" name=\"");
    row.push_str(name);
    row.push_str("\">");
    row.push_str("<option value=\"\">---------</option>");
    for (value, choice_label) in choices {
        row.push_str("<option value=\"");
        row.push_str(value);
        row.push_str("\"");
        if current == Some(*value) {
            row.push_str(" selected");
        }
        row.push_str(">");
        row.push_str(&escape_html(choice_label));
        row.push_str("</option>");
    }
    row.push_str("</select>");
    if let Some(help) = help {
        row.push_str("<span class=\"helptext\">");
        row.push_str(&escape_html(help));
        row.push_str("</span>");
    }
    row.push_str("</div>\n");
    row
}

fn textarea_row(
    name: &str,
    label: &str,
    value: Option<&str>,
    help: Option<&str>,
    errors: &FieldErrors,
) -> String {
    let mut row = String::with_capacity(320);
    row.push_str("<div class=\"form-row\">");
    row.push_str(&field_errors_html(name, errors));
    row.push_str("<label for=\"id_");
    row.push_str(name);
    row.push_str("\">");
    row.push_str(label);
    row.push_str("</label><textarea id=\"id_");
    row.push_str(name);
    row.push_str("\" name=\"");
    row.push_str(name);
    row.push_str("\" rows=\"4\">");
    if let Some(value) = value {
        row.push_str(&escape_html(value));
    }
    row.push_str("</textarea>");
    if let Some(help) = help {
        row.push_str("<span class=\"helptext\">");
        row.push_str(&escape_html(help));
        row.push_str("</span>");
    }
    row.push_str("</div>\n");
    row
}

fn readonly_row(label: &str, value: &str) -> String {
    format!(
        "<div class=\"form-row\"><label>{}</label><div class=\"readonly\">{}</div></div>\n",
        label,
        escape_html(value)
    )
}
