//! The `laborcheck result` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use laborcheck_core::profile::load_profile;
use laborcheck_core::report::DiagnosisReport;
use laborcheck_report::html::{generate_html, write_html_report};

use super::Session;

const INCOMPLETE_GUIDANCE: &str = "진단 결과가 없습니다. 진단을 먼저 완료해 주세요.";

pub fn execute(
    session: &Session,
    format: &str,
    output: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<()> {
    let nav = session.navigator();
    let evaluation = match nav.finish() {
        Ok(evaluation) => evaluation,
        Err(e) if e.is_incomplete() => {
            eprintln!("{INCOMPLETE_GUIDANCE}");
            eprintln!("Run `laborcheck status` to see which categories are unfinished.");
            return Err(e.into());
        }
        Err(e) => return Err(e).context("failed to score the diagnosis"),
    };

    let report = DiagnosisReport::build(
        nav.schema(),
        nav.answers(),
        &evaluation,
        load_profile(&session.storage),
    );
    let limit = limit.unwrap_or(session.config.action_plan_limit);
    tracing::debug!(
        total = report.total_score,
        grade = %report.grade,
        non_compliant = report.non_compliant.len(),
        "diagnosis scored"
    );

    let output = output.map(|p| resolve_output(&session.config.output_dir, p));

    match (format, output) {
        ("text", None) => print_summary(&report, limit),
        ("text", Some(path)) => write_file(&path, &render_text(&report, limit))?,
        ("json", None) => println!("{}", serde_json::to_string_pretty(&report)?),
        ("json", Some(path)) => {
            report.save_json(&path)?;
            eprintln!("Results saved to: {}", path.display());
        }
        ("markdown", None) => print!("{}", report.to_markdown(limit)),
        ("markdown", Some(path)) => write_file(&path, &report.to_markdown(limit))?,
        ("html", None) => println!("{}", generate_html(&report, limit)),
        ("html", Some(path)) => {
            write_html_report(&report, limit, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("HTML report: {}", path.display());
        }
        (other, _) => anyhow::bail!("unknown format: {other} (expected text, json, markdown or html)"),
    }

    Ok(())
}

/// Bare file names land in the configured output directory.
fn resolve_output(output_dir: &Path, path: PathBuf) -> PathBuf {
    let bare = path
        .parent()
        .map_or(true, |parent| parent.as_os_str().is_empty());
    if bare && !path.is_absolute() {
        output_dir.join(path)
    } else {
        path
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("Report written to: {}", path.display());
    Ok(())
}

fn render_text(report: &DiagnosisReport, limit: usize) -> String {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Category", "Weight", "Score", "Grade", "Scored"]);
    for c in &report.categories {
        table.add_row(vec![
            Cell::new(&c.name),
            Cell::new(c.weight),
            Cell::new(c.score),
            Cell::new(c.grade.label()),
            Cell::new(format!("{}/{}", c.scored, c.total)),
        ]);
    }

    let mut out = String::new();
    if let Some(business) = &report.business {
        out.push_str(&format!("사업장: {}\n", business.name));
    }
    out.push_str(&format!("{table}\n\n"));
    out.push_str(&format!(
        "종합 점수: {}점  등급: {} ({})\n{}\n",
        report.total_score,
        report.grade.label(),
        report.grade,
        report.grade.message()
    ));

    let (shown, rest) = report.action_plan(limit);
    if !shown.is_empty() {
        out.push_str("\n개선이 필요한 항목:\n");
        for (n, item) in shown.iter().enumerate() {
            out.push_str(&format!(
                "  {:>2}. [{}] {} ({})\n",
                n + 1,
                item.category,
                item.text,
                item.answer
            ));
        }
        if rest > 0 {
            out.push_str(&format!("  외 {rest}개 항목\n"));
        }
    }
    out
}

fn print_summary(report: &DiagnosisReport, limit: usize) {
    print!("{}", render_text(report, limit));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_go_to_output_dir() {
        let dir = Path::new("./laborcheck-results");
        assert_eq!(
            resolve_output(dir, PathBuf::from("report.html")),
            dir.join("report.html")
        );
        assert_eq!(
            resolve_output(dir, PathBuf::from("out/report.html")),
            PathBuf::from("out/report.html")
        );
        assert_eq!(
            resolve_output(dir, PathBuf::from("/tmp/report.html")),
            PathBuf::from("/tmp/report.html")
        );
    }
}
