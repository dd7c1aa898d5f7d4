use super::{Viewer, escape};

/// 页面外壳：标题、导航栏和内容区域
pub fn page(title: &str, viewer: Option<Viewer<'_>>, body: &str) -> String {
    let nav = match viewer {
        Some(viewer) => {
            let role = viewer
                .active_role
                .map(|r| format!(r#"<span class="muted">{}</span>"#, r.label()))
                .unwrap_or_default();
            format!(
                r#"<nav><a href="/dashboard">Dashboard</a><a href="/profile">Profile</a></nav>
<div>{role} {name}
<form method="post" action="/switch-role"><button type="submit">Switch role</button></form>
<form method="post" action="/logout"><button type="submit">Sign out</button></form></div>"#,
                name = escape(viewer.user.display_name()),
            )
        }
        None => r#"<nav><a href="/">Grader Drills</a></nav>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Grader Drills</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header class="site">{nav}</header>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}
