//! HTML views.

use std::fmt::Write;

use rota_core::ShiftResults;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:44rem;margin:3rem auto;padding:0 1rem}\
table{border-collapse:collapse;width:100%}td,th{border-bottom:1px solid #ddd;padding:.4rem;text-align:left}\
.error{color:#b00020}";

const LOADING_SCRIPT: &str = r"
fetch('/start-setup');
const poll = setInterval(async () => {
  try {
    const status = await (await fetch('/check-status')).json();
    if (status.ready) { clearInterval(poll); window.location.replace('/'); }
  } catch (_) {}
}, 1000);
";

/// Shown until the engine is ready. Triggers setup and polls for readiness.
#[must_use]
pub fn loading_page() -> String {
    page(
        "Rota - loading",
        &format!(
            "<main id=\"loading\"><h1>Preparing the analyzer</h1>\
             <p>Downloading and loading the model. The first run can take several minutes.</p>\
             </main><script>{LOADING_SCRIPT}</script>"
        ),
    )
}

/// What the main page shows below the form.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormView<'a> {
    pub error: Option<&'a str>,
    pub results: Option<&'a ShiftResults>,
}

impl<'a> FormView<'a> {
    #[must_use]
    pub const fn with_error(error: &'a str) -> Self {
        Self {
            error: Some(error),
            results: None,
        }
    }

    #[must_use]
    pub const fn with_results(results: &'a ShiftResults) -> Self {
        Self {
            error: None,
            results: Some(results),
        }
    }
}

/// The upload form, plus an error or results when present.
#[must_use]
pub fn main_page(view: FormView<'_>) -> String {
    let mut body = String::from(
        "<main><h1>Shift analysis</h1>\
         <form id=\"analyze-form\" method=\"post\" action=\"/analyze\" enctype=\"multipart/form-data\">\
         <p><label>Roster <input type=\"file\" name=\"file\" accept=\".csv,text/csv\"></label></p>\
         <p><label>Date <input type=\"date\" name=\"date\" required></label></p>\
         <p><label>Shift <input type=\"text\" name=\"shift\" list=\"shifts\" required></label>\
         <datalist id=\"shifts\"><option value=\"morning\"><option value=\"afternoon\"><option value=\"night\"></datalist></p>\
         <p><button type=\"submit\">Analyze</button></p></form>",
    );

    if let Some(error) = view.error {
        let _ = write!(body, "<p class=\"error\" id=\"error\">{}</p>", escape(error));
    }
    if let Some(results) = view.results {
        render_results(&mut body, results);
    }
    body.push_str("</main>");
    page("Rota", &body)
}

fn render_results(out: &mut String, results: &ShiftResults) {
    let _ = write!(
        out,
        "<section id=\"results\"><h2>{} &middot; {}</h2><p>{} on shift</p>",
        escape(&results.date),
        escape(&results.shift),
        results.headcount()
    );
    if results.is_empty() {
        out.push_str("<p>Nobody is rostered on this shift.</p></section>");
        return;
    }

    out.push_str("<table><thead><tr><th>Name</th><th>Role</th></tr></thead><tbody>");
    for assignment in &results.assignments {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(&assignment.name),
            escape(assignment.role.as_deref().unwrap_or("")),
        );
    }
    out.push_str("</tbody></table><ul>");
    for role in &results.roles {
        let _ = write!(out, "<li>{}: {}</li>", escape(&role.role), role.count);
    }
    out.push_str("</ul></section>");
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{STYLE}</style></head><body>{body}</body></html>"
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
