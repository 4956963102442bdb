//! HTML table rendering and the three document builders
//!
//! Documents are Markdown files containing plain HTML tables so that
//! image embeds, links, and collapsible answer reveals survive rendering
//! on hosting frontends. Every cell and attribute passes through the
//! escaping helpers; completions and filenames are model- and
//! user-sourced text and must never reach the output raw.

use std::cmp::Ordering;
use std::path::{Component, Path};
use std::sync::OnceLock;

use regex::Regex;

use super::ReportError;
use crate::analysis::{ModelSummary, SampleResult};

/// Escape text content for use inside an HTML element.
///
/// Quotes are left alone (they are harmless in text position), and
/// intentional line breaks inside table cells are preserved as `<br>`.
pub fn escape_text(value: &str) -> String {
    let escaped = value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    escaped.replace('\n', "<br>").trim().to_string()
}

/// Escape a value for use inside a double- or single-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render a generic HTML table.
///
/// `column_widths`, when given, must have exactly one entry per header.
/// Header cells are escaped here; row cells are taken verbatim because
/// builders put pre-escaped markup (links, images) in them.
pub fn render_table(
    headers: &[&str],
    rows: &[Vec<String>],
    column_widths: Option<&[&str]>,
) -> Result<String, ReportError> {
    if let Some(widths) = column_widths {
        if widths.len() != headers.len() {
            return Err(ReportError::ColumnWidthMismatch {
                headers: headers.len(),
                widths: widths.len(),
            });
        }
    }

    let header_cells: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape_text(h)))
        .collect();

    let colgroup = match column_widths {
        Some(widths) => {
            let cols: String = widths
                .iter()
                .map(|w| format!("    <col width=\"{}\">\n", escape_attr(w)))
                .collect();
            format!("<colgroup>\n{}</colgroup>\n", cols)
        }
        None => String::new(),
    };

    let mut out = String::from("<table width=\"100%\">\n");
    out.push_str(&colgroup);
    out.push_str("  <thead>\n");
    out.push_str(&format!("    <tr>{}</tr>\n", header_cells));
    out.push_str("  </thead>\n");
    out.push_str("  <tbody>\n");
    for row in rows {
        let cells: String = row.iter().map(|cell| format!("<td>{}</td>", cell)).collect();
        out.push_str(&format!("    <tr>{}</tr>\n", cells));
    }
    out.push_str("  </tbody>\n");
    out.push_str("</table>");
    Ok(out)
}

/// Derive a document file stem from a model name: lowercase, every
/// non-alphanumeric run becomes a single `-`, with a fixed fallback when
/// nothing survives.
pub fn slugify(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                '-'
            }
        })
        .collect();

    let condensed: Vec<&str> = sanitized.split('-').filter(|p| !p.is_empty()).collect();
    if condensed.is_empty() {
        "model".to_string()
    } else {
        condensed.join("-")
    }
}

/// One token of a natural-sort key.
///
/// A digit run is stored as its zero-trimmed digits plus their count, so
/// the derived tuple ordering compares numerically at any magnitude
/// (shorter run < longer run, equal lengths lexicographic) without an
/// integer parse that could overflow.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortPart {
    // Number before Text so a digit run always sorts ahead of letters,
    // which keeps the comparison total across mismatched filenames.
    Number(usize, String),
    Text(String),
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+|\D+").unwrap())
}

fn natural_key(filename: &str) -> Vec<SortPart> {
    let lowered = filename.to_lowercase();
    token_re()
        .find_iter(&lowered)
        .map(|m| {
            let part = m.as_str();
            if part.bytes().all(|b| b.is_ascii_digit()) {
                let mut digits = part.trim_start_matches('0');
                if digits.is_empty() {
                    digits = "0";
                }
                SortPart::Number(digits.len(), digits.to_string())
            } else {
                SortPart::Text(part.to_string())
            }
        })
        .collect()
}

/// Compare filenames so that embedded digit runs order numerically
/// (`sample_9` before `sample_10`).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// Forward-slash relative path from `start` (a directory) to `path`.
pub fn relative_path(path: &Path, start: &Path) -> String {
    // Leading `./` would defeat the common-prefix comparison below.
    fn strip_cur_dir(p: &Path) -> Vec<Component<'_>> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
    let path_parts = strip_cur_dir(path);
    let start_parts = strip_cur_dir(start);

    let common = path_parts
        .iter()
        .zip(start_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..start_parts.len() {
        parts.push("..".to_string());
    }
    for comp in &path_parts[common..] {
        parts.push(comp.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Model name as shown on the scoreboard, without the routing prefix.
fn display_model_name(name: &str) -> &str {
    name.strip_prefix("openrouter/").unwrap_or(name)
}

/// Build the scoreboard document: one row per model, ranked by
/// (accuracy desc, num_correct desc, name asc).
pub fn build_scoreboard(summaries: &[ModelSummary]) -> Result<String, ReportError> {
    let mut ordered: Vec<&ModelSummary> = summaries.iter().collect();
    ordered.sort_by(|a, b| {
        b.accuracy()
            .total_cmp(&a.accuracy())
            .then_with(|| b.num_correct.cmp(&a.num_correct))
            .then_with(|| a.name.cmp(&b.name))
    });

    let rows: Vec<Vec<String>> = ordered
        .iter()
        .map(|summary| {
            vec![
                escape_text(display_model_name(&summary.name)),
                escape_text(&format!(
                    "{}/{}",
                    summary.num_correct, summary.total_samples
                )),
            ]
        })
        .collect();

    let table = render_table(&["Model", "Accuracy"], &rows, Some(&["70%", "30%"]))?;
    Ok(format!("# Model Accuracy\n\n{}\n", table))
}

/// Build one model's document: one row per sample in natural filename
/// order, each linking back to its source image.
pub fn build_model_table(
    model_name: &str,
    samples: &[SampleResult],
    images_dir: &Path,
    output_dir: &Path,
) -> Result<String, ReportError> {
    let mut ordered: Vec<&SampleResult> = samples.iter().collect();
    ordered.sort_by(|a, b| natural_cmp(&a.filename, &b.filename));

    let rows: Vec<Vec<String>> = ordered
        .iter()
        .map(|sample| {
            let image_link = relative_path(&images_dir.join(&sample.filename), output_dir);
            let filename_cell = format!(
                "<a href=\"{}\">{}</a>",
                escape_attr(&image_link),
                escape_text(&sample.filename)
            );
            let answer_cell = escape_text(&sample.completion);
            let correctness_cell = if sample.correct { "✅" } else { "❌" };
            vec![filename_cell, answer_cell, correctness_cell.to_string()]
        })
        .collect();

    let table = render_table(
        &["Filename", "Answer", "Correct?"],
        &rows,
        Some(&["35%", "45%", "20%"]),
    )?;
    Ok(format!("# {}\n\n{}\n", model_name, table))
}

fn format_targets(targets: &[String]) -> String {
    let targets_text = escape_text(&targets.join(", "));
    format!(
        "<details>\
         <summary>Show answer</summary>\
         <div><strong>{}</strong></div>\
         </details>",
        targets_text
    )
}

/// Build the answer-key document: one row per study-set entry in
/// case-insensitive filename order, showing the image and a collapsible
/// reveal of its target labels.
pub fn build_answer_key(
    samples: &[SampleResult],
    images_dir: &Path,
    output_dir: &Path,
) -> Result<String, ReportError> {
    let mut ordered: Vec<&SampleResult> = samples.iter().collect();
    ordered.sort_by_key(|sample| sample.filename.to_lowercase());

    let rows: Vec<Vec<String>> = ordered
        .iter()
        .map(|sample| {
            let image_src = escape_attr(&relative_path(
                &images_dir.join(&sample.filename),
                output_dir,
            ));
            let image_cell = format!(
                "<img src=\"{}\" alt=\"{}\" width=\"500\">",
                image_src,
                escape_attr(&sample.filename)
            );
            vec![image_cell, format_targets(&sample.targets)]
        })
        .collect();

    let table = render_table(&["Image", "Targets"], &rows, Some(&["45%", "55%"]))?;
    Ok(format!("# Answers\n\n{}\n", table))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, num_correct: usize, total_samples: usize) -> ModelSummary {
        ModelSummary {
            name: name.to_string(),
            num_correct,
            total_samples,
        }
    }

    fn sample(filename: &str, completion: &str, correct: bool) -> SampleResult {
        SampleResult {
            filename: filename.to_string(),
            completion: completion.to_string(),
            correct,
            targets: vec!["somewhere".to_string()],
        }
    }

    #[test]
    fn test_escape_text_preserves_line_breaks() {
        assert_eq!(escape_text("a <b> &\nc "), "a &lt;b&gt; &amp;<br>c");
        assert_eq!(escape_text("\"quoted\""), "\"quoted\"");
    }

    #[test]
    fn test_escape_attr_escapes_quotes() {
        assert_eq!(escape_attr(r#"a"b'c<d"#), "a&quot;b&#x27;c&lt;d");
    }

    #[test]
    fn test_render_table_structure() {
        let rows = vec![vec!["x".to_string(), "y".to_string()]];
        let table = render_table(&["A", "B"], &rows, Some(&["70%", "30%"])).unwrap();

        assert!(table.starts_with("<table width=\"100%\">\n"));
        assert!(table.contains("<col width=\"70%\">"));
        assert!(table.contains("<tr><th>A</th><th>B</th></tr>"));
        assert!(table.contains("<tr><td>x</td><td>y</td></tr>"));
        assert!(table.ends_with("</table>"));
    }

    #[test]
    fn test_render_table_width_mismatch() {
        assert!(matches!(
            render_table(&["A", "B"], &[], Some(&["100%"])),
            Err(ReportError::ColumnWidthMismatch {
                headers: 2,
                widths: 1
            })
        ));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("openrouter/openai/gpt-5.2"), "openrouter-openai-gpt-5-2");
        assert_eq!(slugify("Claude Opus 4.5"), "claude-opus-4-5");
        assert_eq!(slugify("___"), "model");
        assert_eq!(slugify(""), "model");
    }

    #[test]
    fn test_natural_sort() {
        let mut names = vec!["img_2.png", "img_10.png", "img_1.png"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, ["img_1.png", "img_2.png", "img_10.png"]);
    }

    #[test]
    fn test_natural_sort_case_insensitive() {
        assert_eq!(natural_cmp("IMG_9.png", "img_10.png"), Ordering::Less);
    }

    #[test]
    fn test_natural_sort_beyond_u64() {
        // Digit runs longer than any machine integer still compare
        // numerically.
        assert_eq!(
            natural_cmp(
                "img_99999999999999999999999999.png",
                "img_100000000000000000000000000.png"
            ),
            Ordering::Less
        );
        assert_eq!(
            natural_cmp("img_18446744073709551616.png", "img_7.png"),
            Ordering::Greater
        );
    }

    #[test]
    fn test_natural_sort_leading_zeros() {
        assert_eq!(natural_cmp("img_007.png", "img_7.png"), Ordering::Equal);
        assert_eq!(natural_cmp("img_000.png", "img_1.png"), Ordering::Less);
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("images/1_a.png"), Path::new("tables")),
            "../images/1_a.png"
        );
        assert_eq!(
            relative_path(Path::new("out/images/a.png"), Path::new("out")),
            "images/a.png"
        );
        assert_eq!(relative_path(Path::new("out"), Path::new("out")), ".");
    }

    #[test]
    fn test_relative_path_ignores_cur_dir() {
        assert_eq!(
            relative_path(Path::new("images/a.png"), Path::new("./tables")),
            "../images/a.png"
        );
        assert_eq!(
            relative_path(Path::new("./images/a.png"), Path::new("tables")),
            "../images/a.png"
        );
        assert_eq!(relative_path(Path::new("./out"), Path::new("out")), ".");
    }

    #[test]
    fn test_scoreboard_tie_break() {
        let summaries = vec![
            summary("m1", 8, 10),
            summary("m2", 9, 10),
            summary("m3", 8, 10),
        ];

        let doc = build_scoreboard(&summaries).unwrap();
        let m1 = doc.find("<td>m1</td>").unwrap();
        let m2 = doc.find("<td>m2</td>").unwrap();
        let m3 = doc.find("<td>m3</td>").unwrap();
        assert!(m2 < m1 && m1 < m3);
        assert!(doc.contains("<td>9/10</td>"));
    }

    #[test]
    fn test_scoreboard_strips_router_prefix() {
        let doc = build_scoreboard(&[summary("openrouter/openai/gpt-5.2", 1, 2)]).unwrap();
        assert!(doc.contains("<td>openai/gpt-5.2</td>"));
        assert!(!doc.contains("openrouter/"));
    }

    #[test]
    fn test_model_table_rows_naturally_sorted() {
        let samples = vec![
            sample("7_paris.jpg", "Paris", true),
            sample("2_tokyo.jpg", "<Tokyo>", false),
        ];

        let doc =
            build_model_table("x", &samples, Path::new("images"), Path::new("tables")).unwrap();
        let tokyo = doc.find("2_tokyo.jpg").unwrap();
        let paris = doc.find("7_paris.jpg").unwrap();
        assert!(tokyo < paris);
        assert!(doc.contains("&lt;Tokyo&gt;"));
        assert!(doc.contains("<a href=\"../images/7_paris.jpg\">"));
        assert!(doc.contains("✅") && doc.contains("❌"));
    }

    #[test]
    fn test_answer_key_has_collapsible_targets() {
        let mut entry = sample("1_oslo.jpg", "Oslo", true);
        entry.targets = vec!["oslo".to_string(), "norway".to_string()];

        let doc = build_answer_key(&[entry], Path::new("images"), Path::new("tables")).unwrap();
        assert!(doc.contains("<img src=\"../images/1_oslo.jpg\" alt=\"1_oslo.jpg\" width=\"500\">"));
        assert!(doc.contains("<summary>Show answer</summary>"));
        assert!(doc.contains("<strong>oslo, norway</strong>"));
    }
}
