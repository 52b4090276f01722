use serde::Serialize;

use super::i18n::MessageKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub severity: Severity,
    #[serde(skip)]
    pub key: MessageKey,
    pub message: String,
}

/// Ordered, individually dismissible notifications.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct AlertList {
    alerts: Vec<Alert>,
}

impl AlertList {
    pub fn push(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    /// Remove the alert at `index`, shifting later ones down. Out-of-range
    /// indexes remove nothing.
    pub fn close(&mut self, index: usize) -> Option<Alert> {
        (index < self.alerts.len()).then(|| self.alerts.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(message: &str) -> Alert {
        Alert {
            severity: Severity::Danger,
            key: MessageKey::ServerError,
            message: message.into(),
        }
    }

    #[test]
    fn test_close_removes_only_that_entry() {
        let mut list = AlertList::default();
        for m in ["a", "b", "c", "d"] {
            list.push(alert(m));
        }

        let removed = list.close(1).unwrap();
        assert_eq!(removed.message, "b");
        let left: Vec<_> = list.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(left, ["a", "c", "d"]);

        // Indexes shift after removal.
        list.close(1);
        let left: Vec<_> = list.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(left, ["a", "d"]);
    }

    #[test]
    fn test_close_out_of_range_is_noop() {
        let mut list = AlertList::default();
        list.push(alert("a"));
        assert!(list.close(3).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_serializes_severity_lowercase() {
        let mut list = AlertList::default();
        list.push(Alert {
            severity: Severity::Warning,
            key: MessageKey::PendingExists,
            message: "wait".into(),
        });
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["severity"], "warning");
        assert_eq!(json[0]["message"], "wait");
    }
}
