use std::env;
use std::time::Duration;

const TOKEN_PLACEHOLDER: &str = "YOUR_HUGGINGFACE_TOKEN";
const CONTACT_PLACEHOLDER: &str = "your_phone_number_here";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub app_env: String,
    pub huggingface_token: String,
    pub generation_url: String,
    pub summarization_url: String,
    pub ner_url: String,
    pub generation_timeout_secs: u64,
    pub analysis_timeout_secs: u64,
    pub emergency_contacts: Vec<String>,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
    pub rate_limit_per_minute: u32,
    pub tesseract_path: String,
    pub ocr_language: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut emergency_contacts: Vec<String> = ["EMERGENCY_CONTACT_1", "EMERGENCY_CONTACT_2"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .collect();
        if let Ok(list) = env::var("EMERGENCY_CONTACTS") {
            emergency_contacts.extend(list.split(',').map(|s| s.to_string()));
        }

        Self {
            port: parse_var("PORT", 5001),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            huggingface_token: env::var("HUGGINGFACE_TOKEN").unwrap_or_default(),
            generation_url: env::var("GENERATION_URL").unwrap_or_else(|_| {
                "https://api-inference.huggingface.co/models/gpt2".to_string()
            }),
            summarization_url: env::var("SUMMARIZATION_URL").unwrap_or_else(|_| {
                "https://api-inference.huggingface.co/models/facebook/bart-large-cnn".to_string()
            }),
            ner_url: env::var("NER_URL").unwrap_or_else(|_| {
                "https://api-inference.huggingface.co/models/d4data/biomedical-ner-all".to_string()
            }),
            generation_timeout_secs: parse_var("GENERATION_TIMEOUT_SECS", 10),
            analysis_timeout_secs: parse_var("ANALYSIS_TIMEOUT_SECS", 30),
            emergency_contacts: clean_contacts(emergency_contacts),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            twilio_phone_number: env::var("TWILIO_PHONE_NUMBER").unwrap_or_default(),
            rate_limit_per_minute: parse_var("RATE_LIMIT_PER_MINUTE", 1000),
            tesseract_path: env::var("TESSERACT_PATH").unwrap_or_else(|_| "tesseract".to_string()),
            ocr_language: env::var("OCR_LANGUAGE").unwrap_or_else(|_| "eng".to_string()),
        }
    }

    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }

    /// A blank or placeholder token counts as absent.
    pub fn has_inference_credential(&self) -> bool {
        let token = self.huggingface_token.trim();
        !token.is_empty() && token != TOKEN_PLACEHOLDER
    }

    pub fn has_twilio(&self) -> bool {
        !self.twilio_account_sid.is_empty()
            && !self.twilio_auth_token.is_empty()
            && !self.twilio_phone_number.is_empty()
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub fn clean_contacts(raw: Vec<String>) -> Vec<String> {
    let mut contacts: Vec<String> = Vec::new();
    for contact in raw {
        let contact = contact.trim();
        if contact.is_empty() || contact == CONTACT_PLACEHOLDER {
            continue;
        }
        if !contacts.iter().any(|c| c == contact) {
            contacts.push(contact.to_string());
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_contacts_drops_placeholders_and_duplicates() {
        let raw = vec![
            " +15550000001 ".to_string(),
            "your_phone_number_here".to_string(),
            "".to_string(),
            "+15550000001".to_string(),
            "+15550000002".to_string(),
        ];
        assert_eq!(clean_contacts(raw), vec!["+15550000001", "+15550000002"]);
    }
}
