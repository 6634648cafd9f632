//! Armazón HTML de la consola administrativa
//!
//! Branding del sitio, shell de página y escape de datos. Las páginas
//! se generan en el servidor como strings de HTML, sin plantillas.

use lazy_static::lazy_static;

lazy_static! {
    /// Branding del sitio, fijado una vez por proceso
    pub static ref SITE_HEADER: String = "🚗 Smart Vehicle Management System".to_string();
    pub static ref SITE_TITLE: String = "Smart Vehicle Admin".to_string();
    pub static ref INDEX_TITLE: String = "Welcome to the Vehicle Management Dashboard".to_string();
}

/// Escapa datos de registros antes de interpolarlos en el HTML
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Envuelve el contenido de una página con el shell común de la consola
pub fn page(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"/>");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\"/>");
    html.push_str("<title>");
    html.push_str(&escape_html(title));
    html.push_str(" | ");
    html.push_str(&SITE_TITLE);
    html.push_str("</title>");
    html.push_str(ADMIN_CSS);
    html.push_str("</head>\n<body>\n");
    html.push_str("<header id=\"branding\"><a href=\"/admin/vehicles\">");
    html.push_str(&SITE_HEADER);
    html.push_str("</a></header>\n<main>\n");
    html.push_str(body);
    html.push_str("\n</main>\n</body>\n</html>");
    html
}

const ADMIN_CSS: &str = r#"<style>
* { box-sizing: border-box; }
body { margin: 0; font-family: "Segoe UI", Roboto, Helvetica, Arial, sans-serif; background: #f8f9fa; color: #212529; }
#branding { background: #417690; padding: 14px 24px; }
#branding a { color: #fff; font-size: 19px; font-weight: 600; text-decoration: none; }
main { padding: 20px 24px; }
h1 { font-size: 22px; font-weight: 600; margin: 0 0 16px; }
h2 { font-size: 15px; font-weight: 500; margin: -10px 0 16px; color: #6c757d; }
.object-tools { margin-bottom: 14px; }
.object-tools a { background: #417690; color: #fff; padding: 7px 14px; border-radius: 4px; text-decoration: none; font-size: 13px; }
.changelist { display: flex; gap: 24px; align-items: flex-start; }
.results { flex: 1; background: #fff; border: 1px solid #dee2e6; border-radius: 4px; overflow: hidden; }
table { border-collapse: collapse; width: 100%; font-size: 13px; }
th { text-align: left; background: #f1f3f5; padding: 8px 12px; border-bottom: 2px solid #dee2e6; }
td { padding: 8px 12px; border-bottom: 1px solid #e9ecef; }
tr:nth-child(even) td { background: #fbfcfd; }
td a { color: #417690; font-weight: 600; text-decoration: none; }
#changelist-filter { width: 220px; background: #fff; border: 1px solid #dee2e6; border-radius: 4px; padding: 12px 16px; font-size: 13px; }
#changelist-filter h3 { margin: 10px 0 4px; font-size: 13px; text-transform: uppercase; color: #6c757d; }
#changelist-filter ul { list-style: none; margin: 0 0 8px; padding: 0; }
#changelist-filter li { padding: 2px 0; }
#changelist-filter li a { color: #417690; text-decoration: none; }
#changelist-filter li.selected a { font-weight: 700; color: #212529; }
#changelist-search { margin-bottom: 14px; }
#changelist-search input[type="text"] { padding: 6px 10px; border: 1px solid #ced4da; border-radius: 4px; width: 260px; }
#changelist-search button { padding: 6px 14px; border: 0; border-radius: 4px; background: #417690; color: #fff; cursor: pointer; }
.paginator { margin-top: 14px; font-size: 13px; }
.paginator a { color: #417690; margin-right: 10px; }
fieldset { border: 1px solid #dee2e6; border-radius: 4px; background: #fff; margin: 0 0 18px; padding: 14px 18px; max-width: 720px; }
legend { font-weight: 600; padding: 0 6px; }
.form-row { margin-bottom: 12px; }
.form-row label { display: block; font-weight: 600; margin-bottom: 4px; font-size: 13px; }
.form-row input[type="text"], .form-row textarea, .form-row select { width: 100%; max-width: 460px; padding: 6px 10px; border: 1px solid #ced4da; border-radius: 4px; font-size: 13px; }
.helptext { display: block; color: #6c757d; font-size: 12px; margin-top: 3px; }
.readonly { color: #495057; font-size: 13px; }
ul.errorlist { color: #dc3545; list-style: none; margin: 0 0 4px; padding: 0; font-size: 12px; }
.submit-row { margin-top: 16px; display: flex; gap: 10px; align-items: center; }
.submit-row button { padding: 8px 18px; border: 0; border-radius: 4px; background: #417690; color: #fff; cursor: pointer; font-size: 13px; }
.submit-row button.deletelink { background: #dc3545; }
.submit-row a { color: #6c757d; font-size: 13px; }
</style>"#;
