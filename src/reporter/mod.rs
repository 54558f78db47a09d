pub mod cli;
pub mod json;

use crate::comparison::ComparisonResult;
use crate::diagnostic::{DiagnosticResult, Severity};
use crate::history::History;
use crate::i18n::{Language, Text};
use crate::insight::Insight;

pub trait Reporter {
    fn format(
        &self,
        record: &DiagnosticResult,
        comparison: Option<&ComparisonResult>,
        lang: Language,
    ) -> String;

    /// `monthly` is the number of scans made this calendar month.
    fn format_history(&self, history: &History, monthly: usize, lang: Language) -> String;

    fn format_insights(&self, insights: &[(String, Insight)], lang: Language) -> String;
}

pub fn score_only(record: &DiagnosticResult) -> String {
    format!("{}\n", record.health_score())
}

/// Plain-text summary suitable for pasting into a message.
pub fn share_text(record: &DiagnosticResult, lang: Language) -> String {
    let record = record.relocalized(lang);
    let error_text = if record.errors().is_empty() {
        Text::NoErrors.get(lang).to_string()
    } else {
        record
            .errors()
            .iter()
            .map(|e| {
                let tag = if e.severity == Severity::High {
                    Text::Critical
                } else {
                    Text::Warning
                };
                format!("{}: {} ({})", e.code, e.description, tag.get(lang))
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let rule = "--------------------------";
    format!(
        "OBD Doctor - {header}\n{rule}\n{vehicle}: {name}\nVIN: {vin}\n{health}: {score}%\n{rule}\n{codes}:\n{errors}\n{rule}\n{date}: {stamp}",
        header = Text::ReportHeader.get(lang),
        vehicle = Text::Vehicle.get(lang),
        name = record.vehicle_name(),
        vin = record.vin(),
        health = Text::Health.get(lang),
        score = record.health_score(),
        codes = Text::ErrorCodes.get(lang).to_uppercase(),
        errors = error_text,
        date = Text::Date.get(lang),
        stamp = record.timestamp().format("%Y-%m-%d %H:%M"),
    )
}
