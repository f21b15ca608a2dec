//! HTML rendering for the goal list page.

use std::fmt::Write;

use goaltrack_core::goal::Goal;

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page: the add form followed by one row per goal, each with its own
/// remove form.
pub fn render_index(goals: &[Goal]) -> String {
    let mut rows = String::new();
    for goal in goals {
        let _ = write!(
            rows,
            r#"
      <li class="goal" data-goal-id="{id}">
        <span class="goal-name">{name}</span>
        <form action="/remove_goal" method="post">
          <input type="hidden" name="goal_id" value="{id}">
          <button type="submit">Remove</button>
        </form>
      </li>"#,
            id = goal.id,
            name = escape_html(&goal.goal_name),
        );
    }
    if goals.is_empty() {
        rows.push_str("\n      <li class=\"empty\">No goals yet.</li>");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Goals</title>
  </head>
  <body>
    <h1>Goals</h1>
    <form action="/add_goal" method="post">
      <input type="text" name="goal_name" placeholder="New goal" required>
      <button type="submit">Add</button>
    </form>
    <ul class="goals">{rows}
    </ul>
  </body>
</html>
"#
    )
}
