use comrak::{Options, markdown_to_html};

use crate::{
    domain::blog::{
        paginator::{PageLink, PageResult},
        post::Post,
    },
    util::string::escape_html::escape_html,
};

fn page_href(base: &str, link: &PageLink) -> Option<String> {
    let page = link.page.filter(|_| link.has_next)?;
    Some(format!("{base}?page={page}&amp;limit={}", link.limit))
}

/// "Newer Posts" points at `previous`, "Older Posts" at `next`; when both
/// exist Newer comes first. No links renders nothing at all.
pub fn render_page_nav(base: &str, next: &PageLink, previous: &PageLink) -> String {
    let newer = page_href(base, previous)
        .map(|href| format!(r#"<a class="newer" href="{href}">Newer Posts</a>"#));
    let older = page_href(base, next)
        .map(|href| format!(r#"<a class="older" href="{href}">Older Posts</a>"#));

    let links: Vec<String> = [newer, older].into_iter().flatten().collect();
    if links.is_empty() {
        return String::new();
    }
    format!(r#"<nav class="pagination">{}</nav>"#, links.join(""))
}

pub fn render_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let items: String = tags
        .iter()
        .map(|tag| format!(r#"<li class="tag">{}</li>"#, escape_html(tag)))
        .collect();
    format!(r#"<ul class="tags">{items}</ul>"#)
}

fn render_post_card(post: &Post) -> String {
    let author = post
        .post_author
        .as_deref()
        .map(|a| format!(" by {}", escape_html(a)))
        .unwrap_or_default();

    format!(
        r#"<article class="post-card">
<h2><a href="/posts/{id}">{title}</a></h2>
<p class="meta">{date}{author}</p>
<p>{snippet}</p>
{tags}
</article>"#,
        id = post.post_id,
        title = escape_html(&post.post_title),
        date = post.post_created_at.format("%B %-d, %Y"),
        snippet = escape_html(&post.post_snippet),
        tags = render_tags(&post.post_tags),
    )
}

pub fn render_post_cards(posts: &[Post]) -> String {
    posts.iter().map(render_post_card).collect::<Vec<_>>().join("\n")
}

pub fn render_posts_index(result: &PageResult) -> String {
    let body = if result.posts.is_empty() {
        r#"<p class="empty">There are no posts to display.</p>"#.to_string()
    } else {
        render_post_cards(&result.posts)
    };

    format!(
        "<h1>All Posts</h1>\n{body}\n{nav}",
        nav = render_page_nav("/posts", &result.next, &result.previous)
    )
}

pub fn render_markdown(body: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.shortcodes = true;
    markdown_to_html(body, &options)
}

pub fn render_post_details(post: &Post) -> String {
    let image = post
        .post_featured_image
        .as_deref()
        .map(|src| {
            format!(
                r#"<img class="featured" src="{}" alt="{}">"#,
                escape_html(src),
                escape_html(&post.post_title)
            )
        })
        .unwrap_or_default();
    let author = post
        .post_author
        .as_deref()
        .map(|a| format!(" by {}", escape_html(a)))
        .unwrap_or_default();

    format!(
        r#"<article class="post">
<h1>{title}</h1>
<p class="meta">{date}{author}</p>
{image}
<div class="post-body">{body}</div>
{tags}
</article>
<p><a href="/posts">Back to all posts</a></p>"#,
        title = escape_html(&post.post_title),
        date = post.post_created_at.format("%B %-d, %Y"),
        body = render_markdown(&post.post_body),
        tags = render_tags(&post.post_tags),
    )
}
