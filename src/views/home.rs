use super::{Viewer, escape, layout};

/// 首页：已登录时显示问候和入口，否则显示登录表单
pub fn home(viewer: Option<Viewer<'_>>, error: Option<&str>) -> String {
    let body = match viewer {
        Some(viewer) => format!(
            r#"<section class="card">
<h1>Welcome back, {name}</h1>
<p><a class="button" href="/dashboard">Go to dashboard</a></p>
<p class="muted"><a href="/dashboard">Dashboard</a> · <a href="/profile">Profile</a></p>
</section>"#,
            name = escape(viewer.user.display_name()),
        ),
        None => {
            let error = error
                .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
                .unwrap_or_default();
            format!(
                r#"<section class="card">
<h1>Grader Drills</h1>
<p class="muted">Sign in to answer drills or grade trainees.</p>
{error}
<form method="post" action="/login">
<label for="email">Email</label>
<input id="email" name="email" type="email" required>
<label for="password">Password</label>
<input id="password" name="password" type="password" required>
<label><input name="remember_me" type="checkbox" value="true"> Remember me</label>
<p><button type="submit">Sign in</button></p>
</form>
</section>"#
            )
        }
    };

    layout::page("Home", viewer, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::sample_user;

    #[test]
    fn test_home_shows_sign_in_form_when_anonymous() {
        let html = home(None, Some("Unauthorized"));
        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"<p class="error">Unauthorized</p>"#));
    }

    #[test]
    fn test_home_greets_signed_in_user() {
        let user = sample_user(true, false);
        let viewer = Viewer {
            user: &user,
            active_role: None,
        };
        let html = home(Some(viewer), None);
        assert!(html.contains("Welcome back, Sam"));
        assert!(!html.contains(r#"action="/login""#));
    }
}
