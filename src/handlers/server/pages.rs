use axum::{Extension, response::Html};

use crate::{
    routers::middleware::is_logged_in::AuthStatus,
    views::{layout::render_page, pages::render_about_us},
};

pub async fn about_us_page(Extension(auth): Extension<AuthStatus>) -> Html<String> {
    Html(render_page(
        "About Us",
        auth.is_logged_in(),
        &render_about_us(),
    ))
}
