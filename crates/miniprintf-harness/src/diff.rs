//! Diff rendering for fixture comparison.

/// Render a diff between expected and actual formatter output.
///
/// Outputs are usually a single line, so besides the line view the first
/// differing byte offset is reported.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");

    let offset = expected
        .bytes()
        .zip(actual.bytes())
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    out.push_str(&format!(
        "@@ first difference at byte {offset} (lengths {} vs {}) @@\n",
        expected.len(),
        actual.len()
    ));

    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let e = expected_lines.get(i);
        let a = actual_lines.get(i);
        if e != a {
            out.push_str(&format!("@@ line {} @@\n", i + 1));
            if let Some(e) = e {
                out.push_str(&format!("-{e:?}\n"));
            }
            if let Some(a) = a {
                out.push_str(&format!("+{a:?}\n"));
            }
        }
    }
    out
}

/// Diff line for a return-value mismatch.
#[must_use]
pub fn render_return_mismatch(expected: usize, actual: usize) -> String {
    format!("return value: expected {expected}, got {actual}")
}
