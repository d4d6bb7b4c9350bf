use crate::{RenderableImpact, RenderableUser};

pub fn render_markdown(report: &RenderableImpact) -> String {
    let mut out = String::new();

    out.push_str("## 📜 Policy Impact Analysis\n\n");

    if !report.lost_access.is_empty() {
        out.push_str("### ❌ Users Who Will Lose Access\n");
        for user in &report.lost_access {
            push_user(&mut out, user);
            for c in &user.changes {
                out.push_str(&format!(
                    "  - For `{}` on `{}`, will be **{}**. *Reason: {}*\n",
                    c.action, c.resource, c.outcome, c.why
                ));
            }
        }
    }

    if !report.gained_access.is_empty() {
        out.push_str("\n### ✅ Users Who Will Gain Access\n");
        for user in &report.gained_access {
            push_user(&mut out, user);
            for c in &user.changes {
                out.push_str(&format!(
                    "  - For `{}` on `{}`, will now be **{}**.\n",
                    c.action, c.resource, c.outcome
                ));
            }
        }
    }

    if !report.has_changes() {
        out.push_str(
            "✅ **No access changes detected for any user based on the historical logs.**\n",
        );
    }

    out
}

fn push_user(out: &mut String, user: &RenderableUser) {
    out.push_str(&format!("- **User `{}`**:\n", user.user_id));
}
