/// Page renderer for the walkthrough studio.
///
/// A single HTML template (`studio/assets/walkthrough.html`) with `{{TOKEN}}`
/// placeholders is embedded at compile time. Step-independent placeholders
/// are resolved here; the caller's closure fills the rest, and anything it
/// missed is blanked so raw tokens never reach the browser.

const TEMPLATE: &str = include_str!("assets/walkthrough.html");

/// Renders the full page.
///
/// # Arguments
/// - `index`      : 0-based index of the displayed step
/// - `total_steps`: catalog length
/// - `fill`       : closure that fills step-specific placeholders
pub fn render_page<F>(index: usize, total_steps: usize, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = TEMPLATE.to_owned();

    html = html.replace("{{STEP_NUMBER}}", &(index + 1).to_string());
    html = html.replace("{{TOTAL_STEPS}}", &total_steps.to_string());
    html = html.replace("{{PREV_DISABLED}}", if index == 0 { "disabled" } else { "" });
    html = html.replace("{{NEXT_DISABLED}}", if index + 1 >= total_steps { "disabled" } else { "" });

    html = fill(html);

    blank_remaining(html)
}

/// Replaces any `{{TOKEN}}` that wasn't already substituted with an empty
/// string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}
