use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{EntitySpan, ReportAnalysis};

const MEDICINE_CATEGORIES: [&str; 2] = ["DRUG", "CHEMICAL"];
const SUBWORD_MARKER: &str = "##";

fn alarm_words() -> &'static Regex {
    static ALARM: OnceLock<Regex> = OnceLock::new();
    ALARM.get_or_init(|| {
        Regex::new(r"(?i)warning|danger|urgent|alert|low|high|abnormal")
            .expect("alarm word pattern is valid")
    })
}

/// Raw lexical hits of the alarm-word set, benign uses included.
pub fn warning_count(text: &str) -> usize {
    alarm_words().find_iter(text).count()
}

/// Drug and chemical names from per-segment entity lists, marker-stripped and de-duplicated.
pub fn medicines(segments: Vec<Vec<EntitySpan>>) -> Vec<String> {
    let mut seen = HashSet::new();
    segments
        .into_iter()
        .flatten()
        .filter(|span| {
            MEDICINE_CATEGORIES
                .iter()
                .any(|c| span.category.eq_ignore_ascii_case(c))
        })
        .map(|span| span.text.replace(SUBWORD_MARKER, "").trim().to_string())
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect()
}

pub fn normalize(summary: String, entities: Vec<Vec<EntitySpan>>, original: &str) -> ReportAnalysis {
    ReportAnalysis {
        summary,
        medicines: medicines(entities),
        warning_count: warning_count(original),
        char_count: original.chars().count(),
        degraded: false,
    }
}

/// Result used when the upstream calls failed after text extraction succeeded.
pub fn degraded(reason: &str, original: &str) -> ReportAnalysis {
    ReportAnalysis {
        summary: reason.to_string(),
        medicines: Vec::new(),
        warning_count: warning_count(original),
        char_count: original.chars().count(),
        degraded: true,
    }
}
