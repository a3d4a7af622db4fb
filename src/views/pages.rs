use crate::{domain::blog::post::Post, util::string::escape_html::escape_html};

use super::posts::render_post_cards;

const SUBSCRIBE_FORM: &str = r#"<section class="subscribe">
<h2>Get new posts by email</h2>
<form method="post" action="/subscribe">
<input type="text" name="name" placeholder="Your name" required>
<input type="email" name="email" placeholder="you@example.com" required>
<button type="submit">Subscribe</button>
</form>
</section>"#;

pub fn render_home(latest: &[Post]) -> String {
    let latest = if latest.is_empty() {
        String::new()
    } else {
        format!(
            "<section class=\"latest\">\n<h2>Latest posts</h2>\n{}\n<p><a href=\"/posts\">All posts</a></p>\n</section>",
            render_post_cards(latest)
        )
    };

    format!(
        r#"<section class="hero">
<h1>Golden Ramen Bowl</h1>
<p>Notes from a never-ending search for the perfect bowl.</p>
</section>
{latest}
{SUBSCRIBE_FORM}"#
    )
}

pub fn render_about_us() -> String {
    r#"<h1>About Us</h1>
<p>We eat ramen, we cook ramen, and we write about both. Every post here is a
bowl we tried, a broth we simmered for too long, or a noodle we could not stop
thinking about.</p>"#
        .to_string()
}

pub fn render_subscribed(email: &str) -> String {
    format!(
        "<h1>Thanks for subscribing!</h1>\n<p>New posts will be sent to <strong>{}</strong>.</p>\n<p><a href=\"/posts\">Read the latest posts</a></p>",
        escape_html(email)
    )
}

pub fn render_not_found() -> String {
    r#"<h1>404</h1>
<p>Oops, that bowl is empty. The page you are looking for does not exist.</p>
<p><a href="/">Back to the homepage</a></p>"#
        .to_string()
}

pub fn render_error(status: u16, message: &str) -> String {
    format!(
        "<h1>{status}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to the homepage</a></p>",
        escape_html(message)
    )
}
