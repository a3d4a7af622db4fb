use crate::{
    domain::blog::{paginator::PageResult, post::PublishingStatus},
    dto::requests::blog::submit_post_request::SubmitPostRequest,
    util::string::escape_html::escape_html,
};

use super::posts::render_page_nav;

const DELETE_SCRIPT: &str = r#"<script>
document.querySelectorAll("button[data-delete]").forEach(function (btn) {
  btn.addEventListener("click", function () {
    if (!confirm("Delete this post?")) { return; }
    fetch("/admin/posts/" + btn.dataset.delete, { method: "DELETE" })
      .then(function (resp) { return resp.json(); })
      .then(function (data) { window.location.href = data.data.redirect; })
      .catch(function (err) { console.error(err); });
  });
});
</script>"#;

pub fn render_admin_console(result: &PageResult, user_name: &str) -> String {
    let rows: String = result
        .posts
        .iter()
        .map(|post| {
            format!(
                r#"<tr>
<td>{title}</td>
<td class="status {status}">{status}</td>
<td>{created}</td>
<td>{updated}</td>
<td><a href="/admin/edit/{id}">Edit</a> <button type="button" data-delete="{id}">Delete</button></td>
</tr>"#,
                title = escape_html(&post.post_title),
                status = post.post_status,
                created = post.post_created_at.format("%Y-%m-%d %H:%M"),
                updated = post.post_updated_at.format("%Y-%m-%d %H:%M"),
                id = post.post_id,
            )
        })
        .collect();

    format!(
        r#"<h1>Admin Console</h1>
<p>Signed in as <strong>{user}</strong>. {total} post(s) in total.</p>
<p><a class="button" href="/admin/create">New post</a> <a class="button" href="/admin/upload">Upload image</a></p>
<table class="admin-posts">
<thead><tr><th>Title</th><th>Status</th><th>Created</th><th>Updated</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>
{nav}
{script}"#,
        user = escape_html(user_name),
        total = result.total,
        nav = render_page_nav("/admin", &result.next, &result.previous),
        script = DELETE_SCRIPT,
    )
}

fn status_option(value: PublishingStatus, selected: PublishingStatus) -> String {
    format!(
        r#"<option value="{value}"{sel}>{value}</option>"#,
        sel = if value == selected { " selected" } else { "" }
    )
}

/// Create and edit share this form; `action` decides where it posts.
pub fn render_post_form(
    heading: &str,
    action: &str,
    form: &SubmitPostRequest,
    error: Option<&str>,
) -> String {
    let selected = form
        .post_status
        .as_deref()
        .and_then(|s| s.parse::<PublishingStatus>().ok())
        .unwrap_or_default();
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    format!(
        r#"<h1>{heading}</h1>
{error}
<form method="post" action="{action}" class="post-form">
<label>Title <input type="text" name="title" value="{title}" required></label>
<label>Snippet <input type="text" name="snippet" value="{snippet}" required></label>
<label>Body (Markdown) <textarea name="body" rows="16" required>{body}</textarea></label>
<label>Author <input type="text" name="author" value="{author}"></label>
<label>Featured image <input type="text" name="featured_image" value="{image}" placeholder="/uploads/..."></label>
<label>Tags <input type="text" name="tags" value="{tags}" placeholder="ramen, broth"></label>
<label>Status <select name="post_status">{draft}{published}</select></label>
<button type="submit">Save</button>
</form>
<p><a href="/admin">Back to console</a></p>"#,
        heading = escape_html(heading),
        action = escape_html(action),
        title = escape_html(&form.title),
        snippet = escape_html(&form.snippet),
        body = escape_html(&form.body),
        author = escape_html(form.author.as_deref().unwrap_or_default()),
        image = escape_html(form.featured_image.as_deref().unwrap_or_default()),
        tags = escape_html(form.tags.as_deref().unwrap_or_default()),
        draft = status_option(PublishingStatus::Draft, selected),
        published = status_option(PublishingStatus::Published, selected),
    )
}

pub fn render_upload_form() -> String {
    r#"<h1>File Upload</h1>
<form id="upload-form" method="post" action="/admin/upload" enctype="multipart/form-data">
<input type="file" name="image" accept="image/*" required>
<button type="submit">Upload</button>
</form>
<p id="upload-result"></p>
<script>
document.getElementById("upload-form").addEventListener("submit", function (e) {
  e.preventDefault();
  fetch("/admin/upload", { method: "POST", body: new FormData(e.target) })
    .then(function (resp) { return resp.json(); })
    .then(function (data) {
      document.getElementById("upload-result").textContent =
        data.success ? data.data.image_path : data.message;
    });
});
</script>
<p><a href="/admin">Back to console</a></p>"#
        .to_string()
}
