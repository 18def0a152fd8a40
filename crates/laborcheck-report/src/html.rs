//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use laborcheck_core::grade::Grade;
use laborcheck_core::report::{CategoryResult, DiagnosisReport};

const REMEDIATION_HINT: &str = "→ 해당 항목 개선이 필요합니다. 관련 법령 및 취업규칙을 확인하세요.";

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report, listing at most `limit` action plan items.
pub fn generate_html(report: &DiagnosisReport, limit: usize) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let title = report
        .business
        .as_ref()
        .map(|b| format!("노무 진단 결과 · {}", b.name))
        .unwrap_or_else(|| "노무 진단 결과".to_string());
    html.push_str(&format!("<title>{}</title>\n", html_escape(&title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&title)));
    let mut meta = format!(
        "{}/{} 문항 응답 | {}",
        report.answered,
        report.question_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(business) = &report.business {
        if let Some(industry) = business.industry {
            meta.push_str(&format!(" | {industry}"));
        }
        if let Some(n) = business.employee_count {
            meta.push_str(&format!(" | 상시근로자 {n}명"));
        }
    }
    html.push_str(&format!("<p class=\"meta\">{}</p>\n", html_escape(&meta)));
    html.push_str("</header>\n");

    // Total score
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>종합 점수</h2>\n");
    html.push_str(&generate_gauge(report.total_score, report.grade));
    html.push_str(&format!(
        "<p class=\"grade\" style=\"color: {}\"><strong>{}</strong> ({})</p>\n",
        report.grade.color(),
        report.grade.label(),
        report.grade
    ));
    html.push_str(&format!(
        "<p>{}</p>\n",
        html_escape(report.grade.message())
    ));
    html.push_str("</section>\n");

    // Category bars
    html.push_str("<section class=\"categories\">\n");
    html.push_str("<h2>카테고리별 점수</h2>\n");
    if !report.categories.is_empty() {
        html.push_str(&generate_bar_chart(&report.categories));
    }
    html.push_str("<table class=\"summary\" id=\"categories\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">카테고리</th><th onclick=\"sortTable(1)\">가중치</th><th onclick=\"sortTable(2)\">점수</th><th onclick=\"sortTable(3)\">등급</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for c in &report.categories {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td style=\"color: {}\">{}</td></tr>\n",
            html_escape(&c.name),
            c.weight,
            c.score,
            c.grade.color(),
            c.grade.label()
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-category detail
    html.push_str("<section class=\"details\">\n");
    html.push_str("<h2>항목별 상세</h2>\n");
    for c in &report.categories {
        html.push_str(&format!(
            "<details>\n<summary>{} ({}점, {}/{} 반영)</summary>\n<ol>\n",
            html_escape(&c.name),
            c.score,
            c.scored,
            c.total
        ));
        for q in report.questions.iter().filter(|q| q.category_id == c.id) {
            let answer = q
                .answer
                .map(|a| a.code().to_string())
                .unwrap_or_else(|| "-".to_string());
            if q.is_non_compliant() {
                html.push_str(&format!(
                    "<li class=\"fail\">{} <span class=\"answer\">{}</span><br><small>{}</small></li>\n",
                    html_escape(&q.text),
                    html_escape(&answer),
                    REMEDIATION_HINT
                ));
            } else {
                html.push_str(&format!(
                    "<li>{} <span class=\"answer\">{}</span></li>\n",
                    html_escape(&q.text),
                    html_escape(&answer)
                ));
            }
        }
        html.push_str("</ol>\n</details>\n");
    }
    html.push_str("</section>\n");

    // Action plan
    let (shown, rest) = report.action_plan(limit);
    html.push_str("<section class=\"action-plan\">\n");
    html.push_str("<h2>개선 실행 계획</h2>\n");
    if shown.is_empty() {
        html.push_str("<p>개선이 필요한 항목이 없습니다.</p>\n");
    } else {
        html.push_str("<ol>\n");
        for item in shown {
            html.push_str(&format!(
                "<li><span class=\"tag\">{}</span> {} <span class=\"answer\">{}</span></li>\n",
                html_escape(&item.category),
                html_escape(&item.text),
                item.answer
            ));
        }
        html.push_str("</ol>\n");
        if rest > 0 {
            html.push_str(&format!("<p class=\"meta\">외 {rest}개 항목</p>\n"));
        }
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &DiagnosisReport, limit: usize, path: &Path) -> Result<()> {
    let html = generate_html(report, limit);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_gauge(score: u8, grade: Grade) -> String {
    let radius = 54.0_f64;
    let circumference = 2.0 * std::f64::consts::PI * radius;
    let filled = circumference * f64::from(score) / 100.0;

    let mut svg = String::from(
        "<svg class=\"gauge\" width=\"140\" height=\"140\" viewBox=\"0 0 140 140\" xmlns=\"http://www.w3.org/2000/svg\">\n",
    );
    svg.push_str(&format!(
        "  <circle cx=\"70\" cy=\"70\" r=\"{radius}\" fill=\"none\" stroke=\"#e5e7eb\" stroke-width=\"12\"/>\n"
    ));
    svg.push_str(&format!(
        "  <circle cx=\"70\" cy=\"70\" r=\"{radius}\" fill=\"none\" stroke=\"{}\" stroke-width=\"12\" stroke-linecap=\"round\" stroke-dasharray=\"{filled:.2} {circumference:.2}\" transform=\"rotate(-90 70 70)\"/>\n",
        grade.color()
    ));
    svg.push_str(&format!(
        "  <text x=\"70\" y=\"70\" font-size=\"28\" font-weight=\"bold\" fill=\"currentColor\" text-anchor=\"middle\" dominant-baseline=\"middle\">{score}</text>\n"
    ));
    svg.push_str("</svg>\n");
    svg
}

fn generate_bar_chart(categories: &[CategoryResult]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 10;
    let label_width = 220;

    let total_height = categories.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, c) in categories.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = usize::from(c.score) * max_width / 100;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&c.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width,
            y,
            width,
            bar_height,
            c.grade.color()
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}점</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            c.score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --fail: #7f1d1d; }
}
body { font-family: 'Pretendard', 'Noto Sans KR', -apple-system, sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.grade { font-size: 1.5rem; margin: 0.5rem 0; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
li { margin: 0.4rem 0; }
li.fail { background: var(--fail); border-radius: 4px; padding: 0.25rem 0.5rem; }
.answer { font-weight: bold; margin-left: 0.5rem; }
.tag { display: inline-block; padding: 0 0.5rem; border: 1px solid var(--border); border-radius: 999px; font-size: 0.8rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('categories');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = isNaN(na) || isNaN(nb) ? va.localeCompare(vb) : na - nb;
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use laborcheck_core::model::AnswerValue;
    use laborcheck_core::profile::{BusinessProfile, EmploymentType, Industry};
    use laborcheck_core::report::{NonCompliantEntry, QuestionResult};

    fn category(id: usize, name: &str, score: u8) -> CategoryResult {
        CategoryResult {
            id,
            name: name.into(),
            weight: 10.0,
            score,
            grade: Grade::from_score(score),
            scored: 2,
            total: 2,
        }
    }

    fn make_test_report(non_compliant: usize) -> DiagnosisReport {
        DiagnosisReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            business: Some(BusinessProfile {
                name: "<한빛> 정밀".into(),
                industry: Some(Industry::Manufacturing),
                employee_count: Some(12),
                established_date: None,
                employment_types: vec![EmploymentType::Permanent],
                email: None,
            }),
            total_score: 63,
            grade: Grade::Warning,
            categories: vec![category(0, "근로계약", 100), category(1, "임금", 25)],
            questions: vec![
                QuestionResult {
                    index: 0,
                    category_id: 0,
                    text: "근로계약서를 서면으로 작성·교부하고 있습니까?".into(),
                    answer: Some(AnswerValue::Yes),
                },
                QuestionResult {
                    index: 1,
                    category_id: 1,
                    text: "최저임금 이상을 지급하고 있습니까?".into(),
                    answer: Some(AnswerValue::No),
                },
            ],
            non_compliant: (0..non_compliant)
                .map(|i| NonCompliantEntry {
                    index: i,
                    category: "임금".into(),
                    text: format!("문항 {i}"),
                    answer: AnswerValue::No,
                })
                .collect(),
            answered: 2,
            question_count: 2,
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_test_report(1), 15);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("근로계약"));
        assert!(html.contains("경고"));
        assert!(html.contains(Grade::Warning.color()));
        assert!(html.contains(REMEDIATION_HINT));
        assert!(!html.contains("외 "));
    }

    #[test]
    fn html_escapes_business_name() {
        let html = generate_html(&make_test_report(0), 15);
        assert!(html.contains("&lt;한빛&gt; 정밀"));
        assert!(!html.contains("<한빛>"));
        assert!(html.contains("개선이 필요한 항목이 없습니다"));
    }

    #[test]
    fn action_plan_is_truncated() {
        let html = generate_html(&make_test_report(18), 15);
        assert!(html.contains("</span> 문항 14 <span"));
        assert!(!html.contains("</span> 문항 15 <span"));
        assert!(html.contains("외 3개 항목"));
    }

    #[test]
    fn bars_use_category_band_colors() {
        let svg = generate_bar_chart(&[category(0, "a", 95), category(1, "b", 40)]);
        assert!(svg.contains(Grade::Safe.color()));
        assert!(svg.contains(Grade::Danger.color()));
        assert!(svg.contains("width=\"380\""));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report(2);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.html");

        write_html_report(&report, 15, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
