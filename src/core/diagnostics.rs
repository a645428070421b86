use crate::domain::model::{Diagnostic, DiagnosticCategory, DiagnosticLevel};

/// Collects the notes of one run and mirrors each to the log as it arrives.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Info => tracing::info!("{}", diagnostic.message),
            DiagnosticLevel::Warning => tracing::warn!("⚠️ {}", diagnostic.message),
            DiagnosticLevel::Error => tracing::error!("❌ {}", diagnostic.message),
        }
        self.entries.push(diagnostic);
    }

    pub fn info(&mut self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::info(category, message));
    }

    pub fn warning(&mut self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::warning(category, message));
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
