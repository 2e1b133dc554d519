use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability a prompt is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Content,
    Math,
    Image,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Content => "content",
            TaskKind::Math => "math",
            TaskKind::Image => "image",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Valid regex pattern"))
        .collect()
}

static MATH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\d+\s*[+\-*/^]\s*\d+",
        r"\d+(\.\d+)?\s*%",
        r"\bsolve\b",
        r"\bcalculate\b",
        r"\bcompute\b",
        r"\bequations?\b",
        r"\bwhat\s+is\s+-?\d",
        r"\bsquare\s+root\b",
        r"\bderivative\b",
        r"\bintegral\b",
        r"\bx\s*=",
    ])
});

static IMAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(generate|create|make|draw|show)\b.*\b(image|picture|illustration|diagram|drawing)\b",
        r"\bdraw\b",
        r"\bsketch\b",
        r"\bvisuali[sz]e\b",
        r"\billustrate\b",
    ])
});

/// Map a prompt to its task kind. Math patterns win over image patterns;
/// anything matching neither list is content.
pub fn classify(prompt: &str) -> TaskKind {
    let text = prompt.to_lowercase();
    if MATH_PATTERNS.iter().any(|re| re.is_match(&text)) {
        TaskKind::Math
    } else if IMAGE_PATTERNS.iter().any(|re| re.is_match(&text)) {
        TaskKind::Image
    } else {
        TaskKind::Content
    }
}
