use crate::util::string::escape_html::escape_html;

pub fn render_login_form(username: &str, error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    format!(
        r#"<h1>Log in</h1>
{error}
<form method="post" action="/login" class="login-form">
<label>Username <input type="text" name="username" value="{username}" autocomplete="username" required></label>
<label>Password <input type="password" name="password" autocomplete="current-password" required></label>
<button type="submit">Log in</button>
</form>"#,
        username = escape_html(username),
    )
}
