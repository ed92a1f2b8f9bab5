use futures::future::join_all;

use crate::errors::AppError;
use crate::models::{EmergencyAlert, Location};
use crate::services::messaging::MessagingProvider;

pub fn alert_message(user: &str, location: &Location) -> String {
    format!(
        "{user} triggered an emergency!\nLocation: {}",
        location.maps_link()
    )
}

/// Texts every contact concurrently. Succeeds if at least one delivery went through.
pub async fn trigger(
    messaging: &dyn MessagingProvider,
    contacts: &[String],
    user: &str,
    location: Location,
) -> Result<EmergencyAlert, AppError> {
    if contacts.is_empty() {
        return Err(AppError::Validation(
            "No emergency contacts configured".to_string(),
        ));
    }

    tracing::warn!(user, lat = location.lat, lng = location.lng, "emergency triggered");

    let message = alert_message(user, &location);
    let results = join_all(
        contacts
            .iter()
            .map(|contact| messaging.send_message(contact, &message)),
    )
    .await;

    let mut notified = 0;
    for (contact, result) in contacts.iter().zip(results) {
        match result {
            Ok(id) => {
                notified += 1;
                tracing::info!(contact = %contact, id = %id, "emergency alert sent");
            }
            Err(e) => tracing::error!(contact = %contact, error = %e, "emergency alert failed"),
        }
    }

    if notified == 0 {
        return Err(AppError::Messaging("Failed to send alerts".to_string()));
    }

    Ok(EmergencyAlert {
        triggering_user: user.to_string(),
        location,
        contacts_notified: notified,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct FlakyMessaging {
        failing: &'static [&'static str],
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessagingProvider for FlakyMessaging {
        async fn send_message(&self, to: &str, _body: &str) -> anyhow::Result<String> {
            if self.failing.contains(&to) {
                anyhow::bail!("carrier rejected {to}");
            }
            self.sent.lock().unwrap().push(to.to_string());
            Ok(format!("id-{to}"))
        }
    }

    const HERE: Location = Location {
        lat: 40.7128,
        lng: -74.006,
    };

    fn contacts() -> Vec<String> {
        vec!["+1".to_string(), "+2".to_string()]
    }

    #[test]
    fn test_alert_message_links_location() {
        let msg = alert_message("Ana", &HERE);
        assert_eq!(
            msg,
            "Ana triggered an emergency!\nLocation: https://www.google.com/maps?q=40.7128,-74.006"
        );
    }

    #[tokio::test]
    async fn test_partial_failure_counts_successes() {
        let messaging = FlakyMessaging {
            failing: &["+2"],
            sent: Mutex::new(vec![]),
        };
        let alert = trigger(&messaging, &contacts(), "Ana", HERE).await.unwrap();
        assert_eq!(alert.contacts_notified, 1);
        assert_eq!(*messaging.sent.lock().unwrap(), vec!["+1".to_string()]);
    }

    #[tokio::test]
    async fn test_all_failed_is_messaging_error() {
        let messaging = FlakyMessaging {
            failing: &["+1", "+2"],
            sent: Mutex::new(vec![]),
        };
        let err = trigger(&messaging, &contacts(), "Ana", HERE).await.unwrap_err();
        assert!(matches!(err, AppError::Messaging(_)));
    }

    #[tokio::test]
    async fn test_no_contacts_is_validation_error() {
        let messaging = FlakyMessaging {
            failing: &[],
            sent: Mutex::new(vec![]),
        };
        let err = trigger(&messaging, &[], "Ana", HERE).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
