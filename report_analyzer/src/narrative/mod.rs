//!
//! Narrative text reports aggregating statistics across a results table.
//!

/// The header underline width.
const RULE_WIDTH: usize = 50;

///
/// A narrative report under construction: a titled, timestamped sequence of
/// sections and statistic lines, rendered to plain text for console echo or
/// file persistence.
///
pub struct Narrative {
    /// The report title.
    title: String,
    /// The report creation time.
    created: chrono::DateTime<chrono::Utc>,
    /// The accumulated body lines.
    lines: Vec<String>,
}

impl Narrative {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            created: chrono::Utc::now(),
            lines: Vec::new(),
        }
    }

    ///
    /// Appends a body line.
    ///
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    ///
    /// Appends an empty line.
    ///
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    ///
    /// Appends a section header.
    ///
    pub fn section(&mut self, title: &str) -> &mut Self {
        if !self.lines.is_empty() {
            self.blank();
        }
        self.lines.push(format!("{title}:"));
        self
    }

    ///
    /// Appends a labeled statistic, or a placeholder when it is unavailable.
    ///
    pub fn statistic(&mut self, label: &str, value: Option<f64>, unit: &str) -> &mut Self {
        match value {
            Some(value) => self.line(format!("{label}: {value:.2}{unit}")),
            None => self.line(format!("{label}: n/a")),
        }
    }

    ///
    /// Renders the report to plain text.
    ///
    pub fn render(&self) -> String {
        let mut text = String::new();
        text.push_str(self.title.as_str());
        text.push('\n');
        text.push_str("=".repeat(RULE_WIDTH).as_str());
        text.push('\n');
        text.push_str(
            format!(
                "Generated: {}\n",
                self.created.format("%Y-%m-%d %H:%M:%S UTC")
            )
            .as_str(),
        );
        text.push('\n');
        for line in self.lines.iter() {
            text.push_str(line.as_str());
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::Narrative;

    #[test]
    fn renders_title_sections_and_statistics() {
        let mut narrative = Narrative::new("SAXPY ANALYSIS REPORT");
        narrative
            .section("MAIN RESULTS")
            .statistic("Mean SIMD speedup", Some(2.345), "x")
            .statistic("Mean threaded speedup", None, "x");
        let text = narrative.render();

        assert!(text.starts_with("SAXPY ANALYSIS REPORT\n"));
        assert!(text.contains("MAIN RESULTS:"));
        assert!(text.contains("Mean SIMD speedup: 2.35x"));
        assert!(text.contains("Mean threaded speedup: n/a"));
    }
}
