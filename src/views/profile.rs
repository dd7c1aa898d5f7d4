use super::{Viewer, escape, layout};

/// 个人资料页：显示邮箱、姓名、角色，并提供更新表单
pub fn profile(viewer: Viewer<'_>, message: Option<&str>, error: Option<&str>) -> String {
    let user = viewer.user;
    let roles = user
        .roles()
        .iter()
        .map(|r| r.label())
        .collect::<Vec<_>>()
        .join(", ");
    let last_login = user
        .last_login
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "Never".to_string());

    let notice = match (message, error) {
        (_, Some(error)) => format!(r#"<p class="error">{}</p>"#, escape(error)),
        (Some(message), None) => format!(r#"<p>{}</p>"#, escape(message)),
        (None, None) => String::new(),
    };

    let body = format!(
        r#"<section class="card">
<h1>Profile</h1>
<table>
<tr><th>Email</th><td>{email}</td></tr>
<tr><th>Name</th><td>{name}</td></tr>
<tr><th>Roles</th><td>{roles}</td></tr>
<tr><th>Last login</th><td>{last_login}</td></tr>
</table>
</section>
<section class="card">
<h2>Update profile</h2>
{notice}
<form method="post" action="/profile">
<label for="name">Name</label>
<input id="name" name="name" type="text" value="{name_value}">
<label for="email">Email</label>
<input id="email" name="email" type="email" value="{email}">
<label for="password">New password</label>
<input id="password" name="password" type="password" placeholder="Leave blank to keep">
<p><button type="submit">Save</button></p>
</form>
</section>"#,
        email = escape(&user.email),
        name = escape(user.name.as_deref().unwrap_or("-")),
        name_value = escape(user.name.as_deref().unwrap_or("")),
    );

    layout::page("Profile", Some(viewer), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::sample_user;

    #[test]
    fn test_profile_lists_roles_and_escapes_name() {
        let mut user = sample_user(true, true);
        user.name = Some("<b>Sam</b>".to_string());
        let viewer = Viewer {
            user: &user,
            active_role: None,
        };
        let html = profile(viewer, Some("Saved"), None);
        assert!(html.contains("Trainee, Assessor"));
        assert!(html.contains("&lt;b&gt;Sam"));
        assert!(!html.contains("<b>Sam"));
        assert!(html.contains("<p>Saved</p>"));
        assert!(html.contains("Never"));
    }
}
