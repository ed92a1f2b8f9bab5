//! Deterministic answers used whenever the inference gateway cannot produce one.
//! No I/O; every output is non-empty.

use super::parser::{CAUSES_HEADER, DOCTOR_HEADER, REMEDIES_HEADER, URGENCY_HEADER};
use crate::models::{Intent, UrgencyLevel};

pub const MEDICAL_DISCLAIMER: &str =
    "I can't provide a diagnosis; please consult a healthcare professional for proper evaluation.";
pub const EMERGENCY_DISCLAIMER: &str =
    "If this is an emergency, call your local emergency services immediately. Don't wait for an online response.";

struct Topic {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const EMERGENCY_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["chest pain", "heart attack", "can't breathe", "not breathing", "stroke"],
        reply: "These can be signs of a heart, lung or brain emergency. Stop what you are doing, sit or lie down, and make sure someone stays with you.",
    },
    Topic {
        keywords: &["bleeding"],
        reply: "Apply firm, steady pressure to the wound with a clean cloth and keep the injured area raised if you can.",
    },
    Topic {
        keywords: &["burn"],
        reply: "Cool the burn under cool running water for at least 20 minutes and remove tight items near the area. Do not apply ice or creams.",
    },
];
const EMERGENCY_DEFAULT: &str =
    "Based on what you've said, this could be a medical emergency and needs in-person help.";

const SYMPTOM_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["cold", "fever", "flu"],
        reply: "I understand you're experiencing cold or fever symptoms. Rest, stay hydrated, and monitor your temperature. If symptoms persist or worsen, seek care promptly.",
    },
    Topic {
        keywords: &["headache", "pain"],
        reply: "I hear you're experiencing pain. Rest, hydration, and over-the-counter pain relief may help if appropriate. Severe or persistent pain needs medical attention.",
    },
    Topic {
        keywords: &["stomach", "nausea", "vomit"],
        reply: "I understand you're having stomach issues. Sip clear fluids, rest, and avoid heavy food for a while. Get help if symptoms are severe or don't settle.",
    },
];
const SYMPTOM_DEFAULT: &str =
    "I understand you're experiencing symptoms. If they are severe, please seek immediate medical attention.";

const NUTRITION_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["protein", "meat", "vegetarian", "vegan"],
        reply: "Protein is essential for health. Good sources include lean meats, fish, eggs, legumes, nuts, and dairy.",
    },
    Topic {
        keywords: &["vitamin", "supplement", "mineral"],
        reply: "Supplements can help in some cases, but it's best to get nutrients from whole foods. Check with a healthcare provider or dietitian before starting any supplement.",
    },
    Topic {
        keywords: &["water", "hydrat", "drink"],
        reply: "Most adults do well with around 2 litres of fluid a day, more in hot weather or during exercise. Water, milk, and unsweetened drinks are the best choices.",
    },
];
const NUTRITION_DEFAULT: &str =
    "Focus on a balanced diet with plenty of fruits, vegetables, and whole grains. For a personalised plan, consult a registered dietitian.";

const WELLNESS_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["eat", "food", "diet"],
        reply: "Focus on a balanced diet with plenty of fruits, vegetables, whole grains, and lean proteins.",
    },
    Topic {
        keywords: &["sleep", "tired", "rest"],
        reply: "Good sleep is essential for wellness! Aim for 7-9 hours per night, keep a consistent schedule, and limit screen time before bed.",
    },
    Topic {
        keywords: &["stress", "anxiety", "worried"],
        reply: "Managing stress matters. Try deep breathing, meditation, regular physical activity, and staying connected with people you trust. A mental health professional can help too.",
    },
];
const WELLNESS_DEFAULT: &str =
    "I'm here to support your wellness journey! Take a moment to breathe deeply, stay hydrated, and get adequate rest. Small daily habits add up.";

fn topics_for(intent: Intent) -> (&'static [Topic], &'static str) {
    match intent {
        Intent::Emergency => (EMERGENCY_TOPICS, EMERGENCY_DEFAULT),
        Intent::Symptom => (SYMPTOM_TOPICS, SYMPTOM_DEFAULT),
        Intent::Nutrition => (NUTRITION_TOPICS, NUTRITION_DEFAULT),
        Intent::Wellness => (WELLNESS_TOPICS, WELLNESS_DEFAULT),
    }
}

/// Free-text reply for the chat flow, without the agent label.
pub fn chat_reply(intent: Intent, text: &str) -> String {
    let lowered = text.to_lowercase();
    let (topics, default) = topics_for(intent);
    let body = topics
        .iter()
        .find(|t| t.keywords.iter().any(|k| lowered.contains(k)))
        .map(|t| t.reply)
        .unwrap_or(default);

    match intent {
        Intent::Emergency => format!("{body} {EMERGENCY_DISCLAIMER}"),
        Intent::Symptom => format!("{body} {MEDICAL_DISCLAIMER}"),
        Intent::Nutrition | Intent::Wellness => body.to_string(),
    }
}

struct SymptomGuidance {
    level: UrgencyLevel,
    label: &'static str,
    causes: &'static [&'static str],
    remedies: &'static [&'static str],
    doctor: &'static str,
}

fn symptom_guidance(input: &str) -> SymptomGuidance {
    let has = |k: &str| input.contains(k);

    if has("chest pain") || has("heart") || has("breathing") {
        SymptomGuidance {
            level: UrgencyLevel::Critical,
            label: "Critical",
            causes: &["Could be related to cardiovascular or respiratory issues"],
            remedies: &[
                "Stop any activity and sit upright",
                "Call emergency services or have someone take you to an emergency department",
            ],
            doctor: "Seek immediate medical attention for chest pain or breathing difficulties.",
        }
    } else if has("fever") && has("high") {
        SymptomGuidance {
            level: UrgencyLevel::Moderate,
            label: "See Doctor Soon",
            causes: &["Possible infection or inflammatory condition"],
            remedies: &["Rest", "Stay hydrated", "Monitor your temperature"],
            doctor: "See a doctor within a day, sooner if the fever passes 39.5°C or comes with a rash or stiff neck.",
        }
    } else if has("headache") && has("severe") {
        SymptomGuidance {
            level: UrgencyLevel::Moderate,
            label: "See Doctor Soon",
            causes: &["Could be migraine, tension headache, or another neurological issue"],
            remedies: &["Rest in a quiet, dark room", "Stay hydrated", "Avoid bright lights"],
            doctor: "See a doctor soon; go now if it is the worst headache of your life or comes with confusion or weakness.",
        }
    } else if has("dizzy") || has("lightheaded") {
        SymptomGuidance {
            level: UrgencyLevel::Mild,
            label: "Mild - Self-Care",
            causes: &["Dehydration, low blood sugar, or inner ear issues"],
            remedies: &["Sit or lie down", "Stay hydrated", "Eat something if hungry"],
            doctor: "See a doctor if you faint, or if dizziness keeps coming back.",
        }
    } else if has("nausea") || has("vomiting") {
        SymptomGuidance {
            level: UrgencyLevel::Mild,
            label: "Mild - Self-Care",
            causes: &["Stomach virus, food poisoning, or motion sickness"],
            remedies: &["Stay hydrated with small sips", "Rest", "Avoid solid foods initially"],
            doctor: "See a doctor if you can't keep fluids down for a day or notice blood.",
        }
    } else {
        SymptomGuidance {
            level: UrgencyLevel::Mild,
            label: "Mild - Self-Care",
            causes: &["General symptoms that may have various causes"],
            remedies: &["Rest", "Stay hydrated", "Monitor your symptoms"],
            doctor: "Monitor your symptoms and consult a doctor if they persist or worsen.",
        }
    }
}

fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sectioned analysis in the same four-header layout the model is asked for.
pub fn symptom_analysis(input: &str) -> String {
    let guidance = symptom_guidance(&input.to_lowercase());
    format!(
        "1. {CAUSES_HEADER}\n{causes}\n\n2. {URGENCY_HEADER} {label}\n\n3. {REMEDIES_HEADER}\n{remedies}\n\n4. {DOCTOR_HEADER} {doctor}\n\nNote: This is a basic analysis. {MEDICAL_DISCLAIMER}",
        causes = bullet_list(guidance.causes),
        label = guidance.label,
        remedies = bullet_list(guidance.remedies),
        doctor = guidance.doctor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai::parser;

    fn symptom_urgency(input: &str) -> UrgencyLevel {
        symptom_guidance(&input.to_lowercase()).level
    }

    const INPUTS: [&str; 8] = [
        "",
        "I have chest pain",
        "high fever since yesterday",
        "severe headache",
        "feeling dizzy",
        "nausea after lunch",
        "my knee clicks",
        "HEART racing",
    ];

    #[test]
    fn test_chat_reply_matches_first_topic() {
        let reply = chat_reply(Intent::Symptom, "I have a FEVER and a headache");
        assert!(reply.starts_with("I understand you're experiencing cold or fever"));
        let reply = chat_reply(Intent::Wellness, "I can't sleep");
        assert!(reply.starts_with("Good sleep"));
        assert_eq!(chat_reply(Intent::Nutrition, "hmm"), NUTRITION_DEFAULT);
    }

    #[test]
    fn test_chat_reply_always_non_empty_with_disclaimers() {
        for intent in Intent::ALL {
            for input in INPUTS {
                let reply = chat_reply(intent, input);
                assert!(!reply.trim().is_empty());
                match intent {
                    Intent::Emergency => assert!(reply.contains("emergency services")),
                    Intent::Symptom => assert!(reply.contains("healthcare professional")),
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_symptom_analysis_satisfies_sectioned_contract() {
        for input in INPUTS {
            let text = symptom_analysis(input);
            assert!(parser::is_sectioned(&text), "not sectioned for {input:?}");
            assert!(text.contains(MEDICAL_DISCLAIMER));
        }
    }

    #[test]
    fn test_symptom_analysis_round_trips_urgency() {
        for input in INPUTS {
            let answer = parser::parse(&symptom_analysis(input));
            assert_eq!(answer.urgency.level, symptom_urgency(input), "input {input:?}");
            assert!(!answer.possible_causes.is_empty());
            assert!(!answer.home_remedies.is_empty());
            assert!(!answer.when_to_visit_doctor.contains("Note:"), "input {input:?}");
        }

        let answer = parser::parse(&symptom_analysis("crushing chest pain"));
        assert_eq!(answer.urgency.level, UrgencyLevel::Critical);
        assert_eq!(answer.urgency.description, "Critical");
        assert_eq!(
            answer.when_to_visit_doctor,
            "Seek immediate medical attention for chest pain or breathing difficulties."
        );
    }
}
