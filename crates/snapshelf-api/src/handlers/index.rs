use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Landing page with the upload form and the gallery.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
