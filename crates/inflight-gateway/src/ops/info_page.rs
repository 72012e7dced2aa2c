//! HTML rendering of a tracker snapshot.

use std::fmt::Write;

use time::format_description::well_known::Rfc3339;

use inflight_core::TrackerSnapshot;

fn escape_html(v: &str) -> String {
    v.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render(snap: &TrackerSnapshot, runtime: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head><title>Instance info</title></head>\n<body>\n");

    let _ = writeln!(
        out,
        "<p>Runtime: {}</p>",
        runtime.map(escape_html).unwrap_or_else(|| "unknown".into())
    );

    let _ = writeln!(out, "<h2>Current requests: {}</h2>", snap.current.len());
    if !snap.current.is_empty() {
        out.push_str("<ul>\n");
        for id in &snap.current {
            let _ = writeln!(out, "<li><code>{}</code></li>", escape_html(id.as_str()));
        }
        out.push_str("</ul>\n");
    }

    let _ = writeln!(
        out,
        "<h2>Top {} concurrent request peaks</h2>",
        snap.capacity
    );
    if snap.history.is_empty() {
        out.push_str("<p>No concurrent requests seen yet.</p>\n");
    } else {
        out.push_str("<table>\n<tr><th>Count</th><th>When (UTC)</th></tr>\n");
        for s in snap.history_by_count() {
            let when = s.when.format(&Rfc3339).unwrap_or_else(|_| "-".into());
            let _ = writeln!(out, "<tr><td>{}</td><td>{}</td></tr>", s.count, when);
        }
        out.push_str("</table>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}
