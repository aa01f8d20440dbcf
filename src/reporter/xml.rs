//! XML rendering for audit reports

use crate::audit::CheckResult;

/// Render the result list as an XML document.
pub fn render(results: &[CheckResult], generated: &str) -> String {
    let passed = results
        .iter()
        .filter(|r| r.status == crate::audit::CheckStatus::Pass)
        .count();

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "<audit checks=\"{}\" passed=\"{}\" generated=\"{}\">\n",
        results.len(),
        passed,
        escape_xml(generated)
    ));

    for result in results {
        if result.output.is_empty() {
            xml.push_str(&format!(
                "  <result name=\"{}\" status=\"{}\"/>\n",
                escape_xml(&result.name),
                result.status.as_str().to_lowercase()
            ));
        } else {
            xml.push_str(&format!(
                "  <result name=\"{}\" status=\"{}\">{}</result>\n",
                escape_xml(&result.name),
                result.status.as_str().to_lowercase(),
                escape_xml(&result.output)
            ));
        }
    }

    xml.push_str("</audit>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::CheckResult;

    #[test]
    fn renders_document_with_counts() {
        let results = vec![
            CheckResult::pass("check_icc"),
            CheckResult::fail("check_bridge", "Containers attached: web"),
        ];
        let xml = render(&results, "2026-01-01T00:00:00Z");

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("checks=\"2\""));
        assert!(xml.contains("passed=\"1\""));
        assert!(xml.contains("<result name=\"check_icc\" status=\"pass\"/>"));
        assert!(xml.contains("status=\"fail\">Containers attached: web</result>"));
        assert!(xml.ends_with("</audit>\n"));
    }

    #[test]
    fn escapes_entities_in_output() {
        let results = vec![CheckResult::fail("check", "a <b> & \"c\"")];
        let xml = render(&results, "now");
        assert!(xml.contains("a &lt;b&gt; &amp; &quot;c&quot;"));
    }
}
