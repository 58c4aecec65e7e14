//! Handlebars templates for every generated HTML document and email body.
//!
//! Templates live under `templates/` and are compiled into the binary. Page
//! templates wrap their content in the `layout` partial, which carries the
//! inline styles and the optional preview banner. Expressions are HTML-escaped
//! by the engine; `{{json value}}` prints pretty JSON escaped for a `<pre>`.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;

pub const LAYOUT: &str = "layout";
pub const TRIAL_CREDIT: &str = "trial_credit";
pub const DEVELOPER_GUIDE: &str = "developer_guide";
pub const OPS_WELCOME_GUIDE: &str = "ops_welcome_guide";
pub const QUICK_START_CHECKLIST: &str = "quick_start_checklist";
pub const SERVICE_REPORT: &str = "service_report";
pub const RUN_SUMMARY_EMAIL: &str = "run_summary_email";
pub const RUN_FAILURE_EMAIL: &str = "run_failure_email";
pub const DEVELOPER_PACKET_EMAIL: &str = "developer_packet_email";
pub const OPS_PACKET_EMAIL: &str = "ops_packet_email";
pub const REPORT_EMAIL: &str = "report_email";

const SOURCES: [(&str, &str); 11] = [
    (LAYOUT, include_str!("../../templates/layout.hbs")),
    (TRIAL_CREDIT, include_str!("../../templates/trial_credit.hbs")),
    (DEVELOPER_GUIDE, include_str!("../../templates/developer_guide.hbs")),
    (OPS_WELCOME_GUIDE, include_str!("../../templates/ops_welcome_guide.hbs")),
    (QUICK_START_CHECKLIST, include_str!("../../templates/quick_start_checklist.hbs")),
    (SERVICE_REPORT, include_str!("../../templates/service_report.hbs")),
    (RUN_SUMMARY_EMAIL, include_str!("../../templates/run_summary_email.hbs")),
    (RUN_FAILURE_EMAIL, include_str!("../../templates/run_failure_email.hbs")),
    (DEVELOPER_PACKET_EMAIL, include_str!("../../templates/developer_packet_email.hbs")),
    (OPS_PACKET_EMAIL, include_str!("../../templates/ops_packet_email.hbs")),
    (REPORT_EMAIL, include_str!("../../templates/report_email.hbs")),
];

static REGISTRY: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("json", Box::new(json_helper));

    for (name, source) in SOURCES {
        if let Err(e) = handlebars.register_template_string(name, source) {
            tracing::error!(template = name, error = %e, "failed to register template");
        }
    }
    handlebars
});

/// Renders the named template against `data`.
///
/// Templates are fixed at build time, so a failure here is a template bug;
/// it is logged and yields an empty string.
pub fn render<T: Serialize>(name: &str, data: &T) -> String {
    REGISTRY.render(name, data).unwrap_or_else(|e| {
        tracing::error!(template = name, error = %e, "template render failed");
        String::new()
    })
}

/// Pretty-printed JSON, two-space indented.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn json_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if let Some(v) = h.param(0) {
        out.write(&handlebars::html_escape(&pretty(v.value())))?;
    }
    Ok(())
}
