use super::{Viewer, layout};
use crate::models::users::entities::Role;

/// 角色不符时显示的页面，注明所需角色
pub fn access_denied(viewer: Option<Viewer<'_>>, required: Role) -> String {
    let body = format!(
        r#"<section class="card">
<h1>Access Denied</h1>
<p>You must be signed in as {label} to view this page.</p>
<form method="post" action="/switch-role"><button type="submit">Switch role</button></form>
<p><a href="/dashboard">Dashboard</a></p>
</section>"#,
        label = required.label(),
    );
    layout::page("Access Denied", viewer, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_names_required_role() {
        let html = access_denied(None, Role::Assessor);
        assert!(html.contains("Access Denied"));
        assert!(html.contains("signed in as Assessor"));

        let html = access_denied(None, Role::Trainee);
        assert!(html.contains("signed in as Trainee"));
        assert!(html.contains(r#"action="/switch-role""#));
    }
}
