use crate::models::{ChatAnswer, Urgency, UrgencyLevel};

pub const CAUSES_HEADER: &str = "🔍 Possible Causes:";
pub const URGENCY_HEADER: &str = "⚠️ Urgency Level:";
pub const REMEDIES_HEADER: &str = "🏠 Home Remedies or Tips:";
pub const DOCTOR_HEADER: &str = "🏥 When to See a Doctor:";

const DEFAULT_CAUSES: [&str; 2] = ["Common cold or flu", "Stress-related symptoms"];
const DEFAULT_URGENCY: &str = "Symptoms appear to be manageable at home.";
const DEFAULT_REMEDIES: [&str; 3] = ["Get adequate rest", "Stay hydrated", "Monitor symptoms"];
const DEFAULT_DOCTOR: &str =
    "If symptoms persist for more than a week or worsen, consult a healthcare provider.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Causes,
    Urgency,
    Remedies,
    Doctor,
}

// A closing note belongs to no section.
const NOTE_PREFIX: &str = "Note:";

// Tested in order; the first marker found on a line switches the section.
const MARKERS: [(Section, &str); 7] = [
    (Section::Causes, CAUSES_HEADER),
    (Section::Urgency, URGENCY_HEADER),
    (Section::Urgency, "⚠ Urgency Level:"),
    (Section::Remedies, "🏠 Home Remedies"),
    (Section::Doctor, DOCTOR_HEADER),
    (Section::Doctor, "🏥 When to Visit a Doctor:"),
    (Section::Doctor, "🏥 When to See a Doctor"),
];

/// Returns the section a header line opens and any content written after the header.
fn match_header(line: &str) -> Option<(Section, &str)> {
    MARKERS.iter().find_map(|(section, marker)| {
        let at = line.find(marker)?;
        let rest = &line[at + marker.len()..];
        let rest = if marker.ends_with(':') {
            rest
        } else {
            // "🏠 Home Remedies or Tips: ..." - content starts after the label's colon
            rest.split_once(':').map(|(_, after)| after).unwrap_or("")
        };
        Some((*section, rest.trim()))
    })
}

fn classify_urgency(line: &str) -> Option<UrgencyLevel> {
    if line.contains("Critical") {
        Some(UrgencyLevel::Critical)
    } else if line.contains("Moderate") || line.contains("See Doctor Soon") {
        Some(UrgencyLevel::Moderate)
    } else if line.contains("Mild") || line.contains("Self-Care") {
        Some(UrgencyLevel::Mild)
    } else {
        None
    }
}

fn list_item(line: &str) -> Option<String> {
    let item = line.strip_prefix('-')?.trim();
    (!item.is_empty()).then(|| item.to_string())
}

/// Parses sectioned answer text. Total: absent sections fall back to defaults.
pub fn parse(raw: &str) -> ChatAnswer {
    let mut causes: Vec<String> = Vec::new();
    let mut remedies: Vec<String> = Vec::new();
    let mut level = UrgencyLevel::Mild;
    let mut urgency_description = String::new();
    let mut doctor: Vec<String> = Vec::new();

    let mut current = Section::None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let content = match match_header(line) {
            Some((section, rest)) => {
                current = section;
                if rest.is_empty() {
                    continue;
                }
                rest
            }
            None if line.starts_with(NOTE_PREFIX) => {
                current = Section::None;
                continue;
            }
            None => line,
        };

        match current {
            Section::Causes => causes.extend(list_item(content)),
            Section::Remedies => remedies.extend(list_item(content)),
            Section::Urgency => {
                if let Some(found) = classify_urgency(content) {
                    level = found;
                }
                urgency_description = content.to_string();
            }
            Section::Doctor => doctor.push(content.to_string()),
            Section::None => {}
        }
    }

    ChatAnswer {
        possible_causes: or_defaults(causes, &DEFAULT_CAUSES),
        urgency: Urgency {
            level,
            description: if urgency_description.is_empty() {
                DEFAULT_URGENCY.to_string()
            } else {
                urgency_description
            },
        },
        home_remedies: or_defaults(remedies, &DEFAULT_REMEDIES),
        when_to_visit_doctor: if doctor.is_empty() {
            DEFAULT_DOCTOR.to_string()
        } else {
            doctor.join(" ")
        },
    }
}

fn or_defaults(items: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if items.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

/// True when every one of the four section headers is present.
pub fn is_sectioned(raw: &str) -> bool {
    let mut seen = [false; 4];
    for line in raw.lines() {
        if let Some((section, _)) = match_header(line.trim()) {
            let slot = match section {
                Section::Causes => 0,
                Section::Urgency => 1,
                Section::Remedies => 2,
                Section::Doctor => 3,
                Section::None => continue,
            };
            seen[slot] = true;
        }
    }
    seen.iter().all(|s| *s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Here is my analysis.

1. 🔍 Possible Causes:
- Tension headache
- Dehydration

2. ⚠️ Urgency Level:
See Doctor Soon if it lasts more than two days

3. 🏠 Home Remedies or Tips:
- Drink water
- Rest in a dark room
4. 🏥 When to See a Doctor:
If you get a stiff neck or confusion.";

    #[test]
    fn test_parse_sections_on_separate_lines() {
        let answer = parse(SAMPLE);
        assert_eq!(answer.possible_causes, vec!["Tension headache", "Dehydration"]);
        assert_eq!(answer.urgency.level, UrgencyLevel::Moderate);
        assert_eq!(
            answer.urgency.description,
            "See Doctor Soon if it lasts more than two days"
        );
        assert_eq!(answer.home_remedies, vec!["Drink water", "Rest in a dark room"]);
        assert_eq!(answer.when_to_visit_doctor, "If you get a stiff neck or confusion.");
        assert!(is_sectioned(SAMPLE));
    }

    #[test]
    fn test_parse_inline_header_content() {
        let raw = "2. ⚠️ Urgency Level: Critical\n4. 🏥 When to See a Doctor: Right now.";
        let answer = parse(raw);
        assert_eq!(answer.urgency.level, UrgencyLevel::Critical);
        assert_eq!(answer.urgency.description, "Critical");
        assert_eq!(answer.when_to_visit_doctor, "Right now.");
    }

    #[test]
    fn test_critical_outranks_other_levels() {
        let raw = "⚠️ Urgency Level: Critical, not Mild";
        assert_eq!(parse(raw).urgency.level, UrgencyLevel::Critical);
        let raw = "⚠️ Urgency Level: Moderate - Self-Care may help";
        assert_eq!(parse(raw).urgency.level, UrgencyLevel::Moderate);
    }

    #[test]
    fn test_parse_is_total() {
        for raw in ["", "   \n\n", "no headers at all", "- a stray item", "🔍 Possible Causes:"] {
            let answer = parse(raw);
            assert!(!answer.possible_causes.is_empty());
            assert!(!answer.urgency.description.is_empty());
            assert!(!answer.home_remedies.is_empty());
            assert!(!answer.when_to_visit_doctor.is_empty());
            assert_eq!(answer.urgency.level, UrgencyLevel::Mild);
        }
        assert!(!is_sectioned("no headers at all"));
    }

    #[test]
    fn test_items_outside_list_sections_are_ignored() {
        let raw = "- ignored\n🔍 Possible Causes:\nnot a list item\n- Allergy\n-   ";
        assert_eq!(parse(raw).possible_causes, vec!["Allergy"]);
    }

    #[test]
    fn test_remedies_header_without_tips_suffix() {
        let raw = "🏠 Home Remedies:\n- Warm tea";
        assert_eq!(parse(raw).home_remedies, vec!["Warm tea"]);
    }

    #[test]
    fn test_closing_note_is_not_doctor_text() {
        let raw = "🔍 Possible Causes:\n- Allergy\n⚠️ Urgency Level: Mild\n🏠 Home Remedies or Tips:\n- Rest\n🏥 When to See a Doctor: If it spreads.\n\nNote: This is general information.";
        let answer = parse(raw);
        assert_eq!(answer.when_to_visit_doctor, "If it spreads.");
        assert_eq!(answer.home_remedies, vec!["Rest"]);
    }
}
