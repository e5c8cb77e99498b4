use std::fmt::Write;

use axum::http::StatusCode;

use crate::domain::comment::Comment;
use crate::domain::post::Post;
use crate::domain::user::User;
use crate::presentation::flash::Flash;

/// Escapes text for use in element content and quoted attribute values.
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, viewer: Option<&User>, flash: Option<Flash>, content: &str) -> String {
    let mut nav =
        String::from(r#"<a href="/">Home</a> <a href="/about">About</a> <a href="/contact">Contact</a>"#);
    match viewer {
        None => nav.push_str(r#" <a href="/login">Login</a> <a href="/register">Register</a>"#),
        Some(user) => {
            if user.is_admin() {
                nav.push_str(r#" <a href="/new-post">New Post</a>"#);
            }
            let _ = write!(
                nav,
                r#" <span class="viewer">{}</span> <a href="/logout">Log Out</a>"#,
                escape(&user.name)
            );
        }
    }

    let flash = flash
        .map(|flash| format!(r#"<p class="flash">{}</p>"#, escape(flash.message())))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<nav>{nav}</nav>\n{flash}\n<main>\n{content}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub(crate) fn index(posts: &[Post], viewer: Option<&User>, flash: Option<Flash>) -> String {
    let mut content = String::from("<h1>Blog</h1>\n");
    if posts.is_empty() {
        content.push_str("<p>No posts yet.</p>\n");
    }
    let is_admin = viewer.is_some_and(User::is_admin);
    for post in posts {
        let _ = write!(
            content,
            r#"<article class="post-preview"><a href="/post/{id}"><h2>{title}</h2><h3>{subtitle}</h3></a><p class="meta">Posted by {author} on {date}</p>"#,
            id = post.id,
            title = escape(&post.title),
            subtitle = escape(&post.subtitle),
            author = escape(&post.author_name),
            date = escape(&post.date),
        );
        if is_admin {
            let _ = write!(content, r#" <a href="/delete/{}">✘</a>"#, post.id);
        }
        content.push_str("</article>\n");
    }
    layout("Blog", viewer, flash, &content)
}

pub(crate) fn register_form(flash: Option<Flash>) -> String {
    let content = r#"<h1>Register</h1>
<form method="post" action="/register">
<label>Name <input name="name" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Sign me up!</button>
</form>"#;
    layout("Register", None, flash, content)
}

pub(crate) fn login_form(flash: Option<Flash>) -> String {
    let content = r#"<h1>Log In</h1>
<form method="post" action="/login">
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Let me in!</button>
</form>"#;
    layout("Log In", None, flash, content)
}

pub(crate) fn post_page(
    post: &Post,
    comments: &[Comment],
    viewer: &User,
    flash: Option<Flash>,
) -> String {
    let mut content = format!(
        r#"<header><img src="{img}" alt=""><h1>{title}</h1><h2>{subtitle}</h2><p class="meta">Posted by {author} on {date}</p></header>
<article>{body}</article>
"#,
        img = escape(&post.img_url),
        title = escape(&post.title),
        subtitle = escape(&post.subtitle),
        author = escape(&post.author_name),
        date = escape(&post.date),
        body = escape(&post.body),
    );

    if viewer.is_admin() {
        let _ = writeln!(
            content,
            r#"<p><a href="/edit-post/{id}">Edit Post</a> <a href="/delete/{id}">Delete Post</a></p>"#,
            id = post.id
        );
    }

    let _ = writeln!(
        content,
        r#"<form method="post" action="/post/{}">
<label>Comment <textarea name="comment_text"></textarea></label>
<button type="submit">Submit Comment</button>
</form>"#,
        post.id
    );

    content.push_str("<ul class=\"comments\">\n");
    for comment in comments {
        let _ = writeln!(
            content,
            r#"<li><p>{text}</p><span class="author">{author}</span></li>"#,
            text = escape(&comment.text),
            author = escape(&comment.author_name),
        );
    }
    content.push_str("</ul>");

    layout(&post.title, Some(viewer), flash, &content)
}

/// Shared create/edit form. `existing` prefills the fields and switches the target.
pub(crate) fn post_form(existing: Option<&Post>, viewer: &User, flash: Option<Flash>) -> String {
    let (heading, action) = match existing {
        Some(post) => ("Edit Post", format!("/edit-post/{}", post.id)),
        None => ("New Post", "/new-post".to_string()),
    };
    let prefill = |value: Option<&String>| value.map(|v| escape(v)).unwrap_or_default();

    let mut content = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}">
<label>Blog Post Title <input name="title" value="{title}" required></label>
<label>Subtitle <input name="subtitle" value="{subtitle}" required></label>
<label>Blog Image URL <input name="img_url" value="{img_url}" required></label>
<label>Blog Content <textarea name="body" required>{body}</textarea></label>
"#,
        title = prefill(existing.map(|post| &post.title)),
        subtitle = prefill(existing.map(|post| &post.subtitle)),
        img_url = prefill(existing.map(|post| &post.img_url)),
        body = prefill(existing.map(|post| &post.body)),
    );
    if let Some(post) = existing {
        let _ = writeln!(
            content,
            r#"<label>Author ID <input name="author_id" type="number" min="1" value="{}" required></label>"#,
            post.author_id
        );
    }
    content.push_str(r#"<button type="submit">Submit Post</button></form>"#);

    layout(heading, Some(viewer), flash, &content)
}

pub(crate) fn about(viewer: Option<&User>) -> String {
    let content = "<h1>About Me</h1>\n<p>A small blog about whatever is on my mind.</p>";
    layout("About", viewer, None, content)
}

pub(crate) fn contact(viewer: Option<&User>) -> String {
    let content = "<h1>Contact Me</h1>\n<p>Have questions? I have answers.</p>";
    layout("Contact", viewer, None, content)
}

pub(crate) fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        "<h1>{}</h1>\n<p>{}</p>",
        status.as_u16(),
        escape(message)
    );
    layout(
        status.canonical_reason().unwrap_or("Error"),
        None,
        None,
        &content,
    )
}

#[cfg(test)]
mod tests {
    use super::{escape, index, post_form, post_page};
    use crate::domain::comment::Comment;
    use crate::domain::post::{Post, PostDraft};
    use crate::domain::user::{Role, User};

    fn post() -> Post {
        let draft = PostDraft {
            title: "Hello <world>".to_string(),
            subtitle: "sub".to_string(),
            body: "<script>alert(1)</script>".to_string(),
            img_url: "https://example.com/a.png".to_string(),
        };
        Post::new(1, draft, "October 18, 2026", 1, "Ada").expect("valid post")
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn post_page_escapes_body_and_hides_admin_links_from_members() {
        let member = User::new(2, "Bob", "bob@example.com", Role::Member).expect("valid user");
        let comments = vec![Comment {
            id: 1,
            text: "nice".to_string(),
            author_id: 2,
            author_name: "Bob".to_string(),
            post_id: 1,
        }];

        let html = post_page(&post(), &comments, &member, None);

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("nice"));
        assert!(!html.contains("/edit-post/1"));
    }

    #[test]
    fn index_shows_new_post_link_only_to_admin() {
        let admin = User::new(1, "Ada", "ada@example.com", Role::Admin).expect("valid user");
        let posts = vec![post()];

        assert!(index(&posts, Some(&admin), None).contains("/new-post"));
        assert!(!index(&posts, None, None).contains("/new-post"));
    }

    #[test]
    fn edit_form_lets_admin_reassign_the_author() {
        let admin = User::new(1, "Ada", "ada@example.com", Role::Admin).expect("valid user");

        let html = post_form(Some(&post()), &admin, None);

        assert!(html.contains(r#"name="author_id" type="number" min="1" value="1""#));
        assert!(!html.contains(r#"type="hidden""#));
        assert!(!post_form(None, &admin, None).contains("author_id"));
    }
}
