use crate::util::string::escape_html::escape_html;

pub const SITE_NAME: &str = "Golden Ramen Bowl";

/// Wraps `content` in the shared shell: head, navigation and footer.
pub fn render_page(title: &str, logged_in: bool, content: &str) -> String {
    let session_links = if logged_in {
        concat!(
            r#"<li><a href="/admin">Admin</a></li>"#,
            r#"<li><form method="post" action="/logout" class="inline">"#,
            r#"<button type="submit" class="link">Log out</button></form></li>"#
        )
    } else {
        r#"<li><a href="/login">Log in</a></li>"#
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{site} | {title}</title>
<link rel="stylesheet" href="/static/styles.css">
</head>
<body>
<header>
<nav>
<a class="brand" href="/">{site}</a>
<ul>
<li><a href="/posts">Posts</a></li>
<li><a href="/about-us">About Us</a></li>
{session_links}
</ul>
</nav>
</header>
<main>
{content}
</main>
<footer><p>&copy; {site}</p></footer>
</body>
</html>
"#,
        site = SITE_NAME,
        title = escape_html(title),
    )
}
