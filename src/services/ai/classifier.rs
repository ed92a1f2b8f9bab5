use crate::models::Intent;

/// Keyword table in priority order. The first intent with any substring hit wins,
/// so emergency phrasing is never masked by a co-occurring symptom or food word.
const KEYWORD_TABLE: [(Intent, &[&str]); 3] = [
    (
        Intent::Emergency,
        &[
            "chest pain", "heart attack", "stroke", "unconscious", "not breathing",
            "severe bleeding", "broken bone", "head injury", "seizure", "overdose",
            "poisoning", "choking", "drowning", "burn", "emergency", "urgent",
            "critical", "severe pain", "can't breathe", "dizzy", "fainting",
        ],
    ),
    (
        Intent::Symptom,
        &[
            "fever", "headache", "pain", "ache", "sore", "swelling", "rash", "cough",
            "cold", "flu", "nausea", "vomiting", "diarrhea", "constipation", "fatigue",
            "tired", "weak", "lightheaded", "shortness of breath", "wheezing", "symptom",
            "condition", "diagnosis", "treatment", "feeling sick", "not feeling well",
            "sick",
        ],
    ),
    (
        Intent::Nutrition,
        &[
            "diet", "nutrition", "food", "meal", "eating", "calories", "protein",
            "vitamins", "supplements", "weight", "obese", "overweight", "underweight",
            "vegetarian", "vegan", "gluten", "allergy", "intolerance", "dairy", "sugar",
            "fat", "carbohydrates", "fiber", "antioxidants", "minerals", "breakfast",
            "lunch", "dinner", "snack", "recipe", "cooking",
        ],
    ),
];

pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Wellness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_wins_over_other_keywords() {
        assert_eq!(classify("chest pain and I haven't eaten"), Intent::Emergency);
        assert_eq!(classify("I feel DIZZY after my meal"), Intent::Emergency);
        assert_eq!(classify("Severe bleeding and a fever"), Intent::Emergency);
    }

    #[test]
    fn test_symptom_before_nutrition() {
        assert_eq!(classify("I have a headache"), Intent::Symptom);
        assert_eq!(classify("sore throat, what food helps?"), Intent::Symptom);
    }

    #[test]
    fn test_nutrition() {
        assert_eq!(classify("How much protein do I need?"), Intent::Nutrition);
        assert_eq!(classify("Is a vegan diet healthy"), Intent::Nutrition);
    }

    #[test]
    fn test_no_match_is_wellness() {
        assert_eq!(classify("how do I meditate"), Intent::Wellness);
        assert_eq!(classify(""), Intent::Wellness);
    }

    #[test]
    fn test_every_emergency_keyword_classifies_as_emergency() {
        let (_, keywords) = KEYWORD_TABLE[0];
        for keyword in keywords {
            let text = format!("my friend has {keyword} and wants a protein snack");
            assert_eq!(classify(&text), Intent::Emergency, "keyword: {keyword}");
        }
    }
}
