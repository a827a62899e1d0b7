/// Sink for the human-readable progress report of a conformance run.
///
/// The layout is not a stable contract; implementations decide how each kind of
/// line is rendered.
pub trait Reporter {
    fn banner(&mut self, title: &str);
    fn section(&mut self, title: &str);
    fn heading(&mut self, text: &str);
    fn pass(&mut self, message: &str);
    fn fail(&mut self, message: &str);
    fn note(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Banner(String),
    Section(String),
    Heading(String),
    Pass(String),
    Fail(String),
    Note(String),
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub lines: Vec<ReportLine>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passes(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                ReportLine::Pass(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                ReportLine::Fail(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn headings(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                ReportLine::Heading(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| match l {
            ReportLine::Banner(m)
            | ReportLine::Section(m)
            | ReportLine::Heading(m)
            | ReportLine::Pass(m)
            | ReportLine::Fail(m)
            | ReportLine::Note(m) => m.contains(needle),
        })
    }
}

impl Reporter for RecordingReporter {
    fn banner(&mut self, title: &str) {
        self.lines.push(ReportLine::Banner(title.to_string()));
    }

    fn section(&mut self, title: &str) {
        self.lines.push(ReportLine::Section(title.to_string()));
    }

    fn heading(&mut self, text: &str) {
        self.lines.push(ReportLine::Heading(text.to_string()));
    }

    fn pass(&mut self, message: &str) {
        self.lines.push(ReportLine::Pass(message.to_string()));
    }

    fn fail(&mut self, message: &str) {
        self.lines.push(ReportLine::Fail(message.to_string()));
    }

    fn note(&mut self, message: &str) {
        self.lines.push(ReportLine::Note(message.to_string()));
    }
}
