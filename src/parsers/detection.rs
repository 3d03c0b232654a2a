//! Plan layout detection.

/// Which of the two plan layouts a text uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    /// `# address will be ...` headers with HCL bodies
    Modern,
    /// Single-line `+ address` headers with `name: value` attributes
    Legacy,
}

impl PlanFormat {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Legacy => "legacy",
        }
    }
}

const HEADER_PHRASES: [&str; 4] = [" will be ", " must be ", " has been ", " is tainted"];

/// Detect the layout: modern if any line carries a `# ` comment marker
/// together with one of the header phrases, legacy otherwise.
#[must_use]
pub fn detect_format(lines: &[&str]) -> PlanFormat {
    let modern = lines
        .iter()
        .any(|line| line.contains("# ") && HEADER_PHRASES.iter().any(|p| line.contains(p)));
    if modern {
        PlanFormat::Modern
    } else {
        PlanFormat::Legacy
    }
}
