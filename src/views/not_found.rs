use super::{Viewer, layout};

pub fn not_found(viewer: Option<Viewer<'_>>) -> String {
    layout::page(
        "Not Found",
        viewer,
        r#"<section class="card">
<h1>Page Not Found</h1>
<p>The page you are looking for does not exist.</p>
<p><a href="/">Back to home</a></p>
</section>"#,
    )
}
