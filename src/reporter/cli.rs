use owo_colors::OwoColorize;

use crate::comparison::ComparisonResult;
use crate::diagnostic::{DiagnosticResult, Severity};
use crate::history::History;
use crate::i18n::{Language, Text};
use crate::insight::Insight;
use crate::scoring::HealthBand;

use super::Reporter;

pub struct CliReporter;

fn colored_score(score: u32) -> String {
    match HealthBand::of(score) {
        HealthBand::Good => format!("{score}%").green().to_string(),
        HealthBand::Fair => format!("{score}%").yellow().to_string(),
        HealthBand::Poor => format!("{score}%").red().to_string(),
    }
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!(
        "\n  {} {} {}\n",
        "──".dimmed(),
        title,
        "─".repeat(50 - title.chars().count().min(49)).dimmed()
    ));
}

fn code_list(codes: &[String]) -> String {
    if codes.is_empty() {
        "-".to_string()
    } else {
        codes.join(", ")
    }
}

impl Reporter for CliReporter {
    fn format(
        &self,
        record: &DiagnosticResult,
        comparison: Option<&ComparisonResult>,
        lang: Language,
    ) -> String {
        let record = record.relocalized(lang);
        let mut out = String::new();
        out.push_str(&format!(
            "\n  {} v{}\n\n",
            "obd-doctor".bold(),
            env!("CARGO_PKG_VERSION")
        ));
        out.push_str(&format!(
            "  {}: {} ({})\n",
            Text::Vehicle.get(lang),
            record.vehicle_name(),
            record.year()
        ));
        out.push_str(&format!("  VIN: {}\n", record.vin()));
        out.push_str(&format!(
            "  {}: {} ({})\n",
            Text::Date.get(lang),
            record.timestamp().format("%Y-%m-%d %H:%M"),
            record.scan_type().dimmed()
        ));

        let band = HealthBand::of(record.health_score());
        out.push_str(&format!(
            "\n  {}: {} — {}\n",
            Text::Health.get(lang),
            colored_score(record.health_score()),
            band.label(lang)
        ));

        section(&mut out, Text::ErrorCodes.get(lang));
        if record.errors().is_empty() {
            out.push_str(&format!("  {}\n", Text::NoErrors.get(lang).green()));
        }
        for e in record.errors() {
            let severity_str = match e.severity {
                Severity::High => " HIGH".red().bold().to_string(),
                Severity::Medium => "  MED".yellow().to_string(),
                Severity::Low => "  LOW".blue().to_string(),
            };
            out.push_str(&format!(
                "  {}  {}  {}\n",
                severity_str,
                e.code.bold(),
                e.system.dimmed()
            ));
            out.push_str(&format!("         {}\n", e.description));
        }

        if let Some(cmp) = comparison {
            section(&mut out, Text::Improvement.get(lang));
            out.push_str(&format!(
                "  {} → {}  ({:+})\n",
                colored_score(cmp.before.health_score()),
                colored_score(cmp.after.health_score()),
                cmp.health_improvement
            ));
            out.push_str(&format!(
                "  {}: {}\n",
                Text::Resolved.get(lang).green(),
                code_list(&cmp.resolved_codes)
            ));
            out.push_str(&format!(
                "  {}: {}\n",
                Text::Persisting.get(lang).yellow(),
                code_list(&cmp.persisting_codes)
            ));
            out.push_str(&format!(
                "  {}: {}\n",
                Text::New.get(lang).red(),
                code_list(&cmp.new_codes)
            ));
        }
        out.push('\n');
        out
    }

    fn format_history(&self, history: &History, monthly: usize, lang: Language) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "\n  {}: {}\n",
            Text::MonthlyTotal.get(lang),
            monthly.to_string().bold()
        ));
        section(&mut out, &format!("{}/{}", history.len(), history.max_entries()));
        for r in history.iter() {
            out.push_str(&format!(
                "  {}  {}  {:<24} {:>5}  {}\n",
                r.id().dimmed(),
                r.timestamp().format("%Y-%m-%d %H:%M"),
                r.vehicle_name(),
                colored_score(r.health_score()),
                r.scan_type()
            ));
        }
        out.push('\n');
        out
    }

    fn format_insights(&self, insights: &[(String, Insight)], _lang: Language) -> String {
        let mut out = String::new();
        for (code, insight) in insights {
            section(&mut out, code);
            out.push_str(&format!("  {}\n", insight.explanation));
            for cause in &insight.possible_causes {
                out.push_str(&format!("    • {cause}\n"));
            }
            out.push_str(&format!("  {}\n", insight.estimated_repair_cost.cyan()));
            out.push_str(&format!("  {}\n", insight.severity_advice));
        }
        out.push('\n');
        out
    }
}
