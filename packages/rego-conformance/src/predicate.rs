/// A boolean function over a document's text, built from substring memberships.
///
/// Matching is case-sensitive and performs no normalization. Predicates are plain
/// data so the artifact and feature tables can be declared as constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The token must appear somewhere in the text.
    Contains(&'static str),
    /// Every sub-predicate must hold.
    All(&'static [Predicate]),
    /// At least one sub-predicate must hold.
    Any(&'static [Predicate]),
}

impl Predicate {
    pub fn evaluate(&self, content: &str) -> bool {
        match self {
            Predicate::Contains(token) => content.contains(token),
            Predicate::All(parts) => parts.iter().all(|p| p.evaluate(content)),
            Predicate::Any(parts) => parts.iter().any(|p| p.evaluate(content)),
        }
    }

    /// Describes each unmet requirement, one entry per failing branch of the
    /// outermost conjunction. Empty when the predicate holds.
    pub fn unmet(&self, content: &str) -> Vec<String> {
        match self {
            Predicate::All(parts) => parts
                .iter()
                .filter(|p| !p.evaluate(content))
                .map(|p| p.describe())
                .collect(),
            other if other.evaluate(content) => Vec::new(),
            other => vec![other.describe()],
        }
    }

    /// Every token mentioned anywhere in the predicate, in declaration order.
    pub fn tokens(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens(&self, out: &mut Vec<&'static str>) {
        match self {
            Predicate::Contains(token) => out.push(*token),
            Predicate::All(parts) | Predicate::Any(parts) => {
                for part in parts.iter() {
                    part.collect_tokens(out);
                }
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Predicate::Contains(token) => format!("`{}`", token),
            Predicate::All(parts) => join(parts, " and "),
            Predicate::Any(parts) => format!("one of {}", join(parts, " or ")),
        }
    }
}

fn join(parts: &[Predicate], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.describe())
        .collect::<Vec<_>>()
        .join(sep)
}
