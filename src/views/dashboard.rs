use super::{Viewer, escape, layout};
use crate::models::drills::entities::Drill;
use crate::models::trainee_drills::responses::TraineeDrillItem;

/// 按当前角色区分的仪表盘数据
pub enum DashboardProps<'a> {
    Trainee {
        items: &'a [TraineeDrillItem],
    },
    Assessor {
        drills: &'a [Drill],
        ungraded: usize,
    },
}

pub fn dashboard(viewer: Viewer<'_>, props: DashboardProps<'_>) -> String {
    let body = match props {
        DashboardProps::Trainee { items } => trainee_dashboard(items),
        DashboardProps::Assessor { drills, ungraded } => assessor_dashboard(drills, ungraded),
    };
    layout::page("Dashboard", Some(viewer), &body)
}

fn trainee_dashboard(items: &[TraineeDrillItem]) -> String {
    if items.is_empty() {
        return r#"<section class="card"><h1>My drills</h1><p class="muted">No drills assigned yet.</p></section>"#
            .to_string();
    }

    let rows = items
        .iter()
        .map(|item| {
            let td = &item.trainee_drill;
            format!(
                r#"<tr><td><a href="/drills/{id}">{name}</a></td><td>{progress} / {total}</td><td>{due}</td><td>{completed}</td></tr>"#,
                id = td.id,
                name = escape(&item.drill_name),
                progress = td.progress,
                total = item.num_questions,
                due = item
                    .due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                completed = td.completed_date,
            )
        })
        .collect::<String>();

    format!(
        r#"<section class="card">
<h1>My drills</h1>
<table>
<thead><tr><th>Drill</th><th>Progress</th><th>Due</th><th>Completed</th></tr></thead>
<tbody>{rows}</tbody>
</table>
</section>"#
    )
}

fn assessor_dashboard(drills: &[Drill], ungraded: usize) -> String {
    let rows = drills
        .iter()
        .map(|drill| {
            format!(
                r#"<tr><td>{name}</td><td><code>{code}</code></td><td>{n}</td><td>{due}</td><td>{tags}</td></tr>"#,
                name = escape(&drill.name),
                code = escape(&drill.code),
                n = drill.num_questions,
                due = drill.due_date_label().unwrap_or_else(|| "-".to_string()),
                tags = escape(&drill.tags.join(", ")),
            )
        })
        .collect::<String>();

    format!(
        r#"<section class="card">
<h1>Grading</h1>
<p><a class="button" href="/assess">{ungraded} answer(s) awaiting grading</a></p>
</section>
<section class="card">
<h2>Drills</h2>
<table>
<thead><tr><th>Name</th><th>Code</th><th>Questions</th><th>Due</th><th>Tags</th></tr></thead>
<tbody>{rows}</tbody>
</table>
</section>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trainee_drills::entities::{TraineeDrill, format_completed_date};
    use crate::models::users::entities::{Role, sample_user};

    fn item(progress: i32, completed: bool) -> TraineeDrillItem {
        let now = chrono::Utc::now();
        let completed_at = completed.then_some(now);
        TraineeDrillItem {
            trainee_drill: TraineeDrill {
                id: 11,
                drill_id: 2,
                trainee_id: 7,
                progress,
                completed_at,
                completed_date: format_completed_date(completed_at),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
            drill_name: "Ownership basics".to_string(),
            drill_code: "ABCD1234".to_string(),
            num_questions: 3,
            due_date: None,
        }
    }

    #[test]
    fn test_trainee_dashboard_shows_progress_and_completion() {
        let user = sample_user(true, false);
        let viewer = Viewer {
            user: &user,
            active_role: Some(Role::Trainee),
        };
        let items = vec![item(1, false)];
        let html = dashboard(viewer, DashboardProps::Trainee { items: &items });
        assert!(html.contains(r#"href="/drills/11""#));
        assert!(html.contains("1 / 3"));
        assert!(html.contains("N/A"));
    }

    #[test]
    fn test_assessor_dashboard_shows_ungraded_count() {
        let user = sample_user(false, true);
        let viewer = Viewer {
            user: &user,
            active_role: Some(Role::Assessor),
        };
        let html = dashboard(
            viewer,
            DashboardProps::Assessor {
                drills: &[],
                ungraded: 4,
            },
        );
        assert!(html.contains("4 answer(s) awaiting grading"));
    }
}
