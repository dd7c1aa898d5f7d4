use super::{Rendered, Viewer, layout};
use crate::models::users::entities::{Role, User};

/// 根据会话中选择的角色和用户拥有的角色确定当前角色
///
/// 会话里的角色必须是用户实际拥有的；只有一个角色时直接使用该角色。
pub fn resolve_active_role(user: &User, chosen: Option<&str>) -> Option<Role> {
    if let Some(role) = chosen.and_then(|c| c.parse::<Role>().ok())
        && user.has_role(role)
    {
        return Some(role);
    }

    match user.roles().as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// 选择角色页面
///
/// 已选定角色或只有一个角色时跳转到 `/dashboard`，否则每个角色渲染一个按钮。
pub fn choose_role(viewer: Viewer<'_>) -> Rendered {
    if viewer.active_role.is_some() {
        return Rendered::Redirect("/dashboard");
    }

    let buttons = viewer
        .user
        .roles()
        .iter()
        .map(|role| {
            format!(
                r#"<form method="post" action="/choose-role">
<input type="hidden" name="role" value="{role}">
<button type="submit">{label}</button>
</form>"#,
                label = role.label(),
            )
        })
        .collect::<String>();

    let body = format!(
        r#"<section class="card">
<h1>Choose a role</h1>
<p class="muted">You hold more than one role. Pick the one to use for this session.</p>
<div class="role-choices">{buttons}</div>
</section>"#
    );

    Rendered::Page(layout::page("Choose Role", Some(viewer), &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::sample_user;

    #[test]
    fn test_single_role_resolves_without_choice() {
        let user = sample_user(true, false);
        assert_eq!(resolve_active_role(&user, None), Some(Role::Trainee));
        // 没有的角色会被忽略
        assert_eq!(
            resolve_active_role(&user, Some("assessor")),
            Some(Role::Trainee)
        );
    }

    #[test]
    fn test_dual_role_needs_choice() {
        let user = sample_user(true, true);
        assert_eq!(resolve_active_role(&user, None), None);
        assert_eq!(resolve_active_role(&user, Some("bogus")), None);
        assert_eq!(
            resolve_active_role(&user, Some("assessor")),
            Some(Role::Assessor)
        );
    }

    #[test]
    fn test_redirects_once_role_is_known() {
        let user = sample_user(false, true);
        let viewer = Viewer {
            user: &user,
            active_role: resolve_active_role(&user, None),
        };
        assert_eq!(choose_role(viewer), Rendered::Redirect("/dashboard"));

        let user = sample_user(true, true);
        let viewer = Viewer {
            user: &user,
            active_role: resolve_active_role(&user, Some("trainee")),
        };
        assert_eq!(choose_role(viewer), Rendered::Redirect("/dashboard"));
    }

    #[test]
    fn test_renders_one_button_per_role() {
        let user = sample_user(true, true);
        let viewer = Viewer {
            user: &user,
            active_role: None,
        };
        let Rendered::Page(html) = choose_role(viewer) else {
            panic!("expected a page");
        };
        assert!(html.contains(r#"value="trainee""#));
        assert!(html.contains(r#"value="assessor""#));
        assert_eq!(html.matches(r#"<button type="submit">"#).count(), 3); // 两个角色 + 登出
    }
}
