//! Paginación por número de página
//!
//! Reglas del listado: tamaño por defecto 10, máximo 100, y enlaces
//! next/previous relativos que conservan el resto de parámetros de la
//! query. Una página fuera de rango es 404 "Invalid page.".

use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

pub fn invalid_page() -> AppError {
    AppError::NotFound("Invalid page.".to_string())
}

/// Un page_size ilegible o fuera de rango cae al valor por defecto;
/// por encima del máximo se recorta.
pub fn resolve_page_size(raw: Option<&str>) -> i64 {
    match raw.and_then(|value| value.parse::<i64>().ok()) {
        Some(n) if n >= 1 => n.min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// El número de página debe ser un entero >= 1; ausente vale 1
pub fn parse_page(raw: Option<&str>) -> AppResult<i64> {
    match raw {
        None => Ok(1),
        Some(value) => match value.trim().parse::<i64>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(invalid_page()),
        },
    }
}

/// Offset de la página pedida. Si el producto no cabe en un i64 la
/// página queda fuera de rango para cualquier tabla y es 404, nunca
/// un desbordamiento.
pub fn page_offset(page: i64, page_size: i64) -> AppResult<i64> {
    page.checked_sub(1)
        .and_then(|prior| prior.checked_mul(page_size))
        .ok_or_else(invalid_page)
}

/// Número de páginas; una colección vacía tiene una página (vacía)
pub fn total_pages(count: i64, page_size: i64) -> i64 {
    if count <= 0 {
        1
    } else {
        (count + page_size - 1) / page_size
    }
}

/// Enlace relativo a una página. La página 1 se expresa sin `page`.
pub fn page_link(path: &str, params: &[(&str, String)], page: i64) -> String {
    let mut pairs: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();
    if page > 1 {
        pairs.push(format!("page={}", page));
    }
    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}

#[derive(Debug, PartialEq)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

pub fn page_links(
    path: &str,
    params: &[(&str, String)],
    page: i64,
    count: i64,
    page_size: i64,
) -> PageLinks {
    let pages = total_pages(count, page_size);
    PageLinks {
        next: (page < pages).then(|| page_link(path, params, page + 1)),
        previous: (page > 1).then(|| page_link(path, params, page - 1)),
    }
}
