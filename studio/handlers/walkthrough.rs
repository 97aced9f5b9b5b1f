use std::io::Cursor;

use serde::Serialize;
use tiny_http::{Request, Response};

use backprop_walkthrough::network::topology::EDGES;
use backprop_walkthrough::{
    ErrorSummary, PreviousMode, Sequencer, Snapshot, StepDefinition, WeightId, CATALOG,
};

use crate::render::{html_escape, render_page};
use crate::state::{FlashKind, FlashMessage, SharedState};
use crate::util::form::{form_get, parse_form};

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let flash = st.take_flash();
    let page  = build_page(&st.sequencer, flash.as_ref());
    drop(st);
    crate::routes::html_response(page)
}

// ---------------------------------------------------------------------------
// POST /next, /previous, /reset, /jump
// ---------------------------------------------------------------------------

/// Which navigation a POST asked for.
pub enum Move {
    Next,
    Previous,
    Reset,
    Jump,
}

pub fn handle_move(mv: Move, request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);

    let mut st = state.lock().unwrap();
    let outcome = match mv {
        Move::Next     => st.sequencer.next(),
        Move::Previous => st.sequencer.previous(),
        Move::Reset    => st.sequencer.reset(),
        Move::Jump     => match form_get(&pairs, "step").map(|s| s.trim().parse::<usize>()) {
            Some(Ok(index)) => st.sequencer.jump_to(index),
            _ => {
                st.flash = Some(FlashMessage::error("Pick a step to jump to."));
                return crate::routes::redirect("/");
            }
        },
    };

    match outcome {
        Ok(snapshot) => {
            if matches!(mv, Move::Reset) {
                st.flash = Some(FlashMessage::info("Back to the initial weights."));
            }
            log::debug!("now at step {}", snapshot.index);
        }
        Err(e) => {
            log::warn!("navigation failed: {e}");
            st.flash = Some(FlashMessage::error(e.to_string()));
        }
    }
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// GET /state.json, /catalog.json
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct StateView<'a> {
    #[serde(flatten)]
    snapshot: Snapshot,
    step:     &'a StepDefinition,
    result:   &'a str,
    summary:  ErrorSummary,
}

pub fn handle_state_json(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let st  = state.lock().unwrap();
    let seq = &st.sequencer;
    let view = StateView {
        snapshot: seq.snapshot(),
        step:     seq.current_step(),
        result:   seq.current_result(),
        summary:  seq.error_summary(),
    };
    json_or_500(serde_json::to_string_pretty(&view))
}

pub fn handle_catalog_json() -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({
        "steps": CATALOG.steps(),
        "edges": EDGES,
    });
    json_or_500(serde_json::to_string_pretty(&body))
}

fn json_or_500(body: serde_json::Result<String>) -> Response<Cursor<Vec<u8>>> {
    match body {
        Ok(body) => crate::routes::json_response(body),
        Err(e) => {
            log::error!("failed to serialize response: {e}");
            crate::routes::server_error()
        }
    }
}

// ---------------------------------------------------------------------------
// Page assembly
// ---------------------------------------------------------------------------

fn build_page(seq: &Sequencer<'_>, flash: Option<&FlashMessage>) -> String {
    let step  = seq.current_step();
    let state = seq.current_state();

    let highlighted = |id: WeightId| step.highlight.weights.contains(&id);

    let weight_rows: String = WeightId::ALL.iter().map(|&id| {
        format!(
            r#"<tr class="{cls}"><td>{id}</td><td>{value:.9}</td></tr>"#,
            cls   = if highlighted(id) { "hl" } else { "" },
            value = state.weights.get(id),
        )
    }).collect();

    let derived_rows: String = if state.derived.is_empty() {
        r#"<tr><td colspan="2" class="hint">Nothing computed yet.</td></tr>"#.into()
    } else {
        state.derived.iter().map(|(key, value)| {
            format!("<tr><td>{}</td><td>{value:.9}</td></tr>", html_escape(key.key()))
        }).collect()
    };

    let jump_options: String = CATALOG.steps().iter().enumerate().map(|(i, s)| {
        format!(
            r#"<option value="{i}"{sel}>{n}. {title}</option>"#,
            sel   = if i == seq.current_index() { " selected" } else { "" },
            n     = i + 1,
            title = html_escape(s.title),
        )
    }).collect();

    let highlight = {
        let nodes: Vec<&str> = step.highlight.nodes.iter().map(|n| n.as_str()).collect();
        let weights: Vec<&str> = step.highlight.weights.iter().map(|w| w.as_str()).collect();
        match (nodes.is_empty(), weights.is_empty()) {
            (true, true)  => String::new(),
            (false, true) => format!("Focus: {}", nodes.join(", ")),
            (true, false) => format!("Focus: {}", weights.join(", ")),
            (false, false) => format!("Focus: {} via {}", nodes.join(", "), weights.join(", ")),
        }
    };

    let previous_mode = match seq.previous_mode() {
        PreviousMode::Recompute => "recomputes from the start",
        PreviousMode::ViewOnly  => "view only (weights are not rolled back)",
    };

    render_page(seq.current_index(), seq.total_steps(), |tmpl| {
        tmpl
            .replace("{{FLASH}}", &render_flash_html(flash))
            .replace("{{STEP_KIND}}", &format!("{:?}", step.kind))
            .replace("{{STEP_TITLE}}", &html_escape(step.title))
            .replace("{{STEP_EXPLANATION}}", &html_escape(step.explanation))
            .replace("{{STEP_FORMULA}}", &render_formula(step.formula))
            .replace("{{STEP_RESULT}}", &html_escape(seq.current_result()))
            .replace("{{HIGHLIGHT}}", &html_escape(&highlight))
            .replace("{{WEIGHT_ROWS}}", &weight_rows)
            .replace("{{DERIVED_ROWS}}", &derived_rows)
            .replace("{{ERROR_SUMMARY}}", &render_error_summary(&seq.error_summary()))
            .replace("{{JUMP_OPTIONS}}", &jump_options)
            .replace("{{PREVIOUS_MODE}}", previous_mode)
    })
}

/// Formula markup is shown as escaped source; a client-side TeX renderer may
/// pick it up, and if it cannot the reader still sees the raw formula.
fn render_formula(formula: Option<&str>) -> String {
    match formula {
        None    => String::new(),
        Some(f) => format!(r#"<code class="formula">{}</code>"#, html_escape(f)),
    }
}

fn render_error_summary(summary: &ErrorSummary) -> String {
    let (Some(initial), current) = (summary.initial_error, summary.current_error) else {
        return r#"<p class="hint">The error is computed after the forward pass.</p>"#.into();
    };
    let current = current.unwrap_or(initial);
    let scale = initial.max(current).max(f64::EPSILON);
    let bar = |cls: &str, label: &str, value: f64| {
        format!(
            r#"<div>{label}: {value:.9}</div><div class="bar {cls}" style="width:{pct:.1}%"></div>"#,
            pct = value / scale * 100.0,
        )
    };
    let mut html = bar("bar-initial", "Initial total error", initial);
    html.push_str(&bar("bar-current", "Current total error", current));
    html
}

pub fn render_flash_html(flash: Option<&FlashMessage>) -> String {
    match flash {
        None    => String::new(),
        Some(f) => {
            let cls = match f.kind {
                FlashKind::Info  => "flash-info",
                FlashKind::Error => "flash-error",
            };
            format!(r#"<div class="flash {}">{}</div>"#, cls, html_escape(&f.text))
        }
    }
}
