use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::errors::PreferenceError;

/// The four independent consent flags of one user
///
/// Deserialization requires every flag to be present as a boolean and rejects
/// unknown fields, which is what makes a full replace well defined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NotificationPreferences {
    /// Master switch for all email
    pub email_notifications: bool,
    pub weekly_digest: bool,
    pub new_skill_alerts: bool,
    pub pack_alerts: bool,
}

impl Default for NotificationPreferences {
    /// Everyone is opted in until they say otherwise
    fn default() -> Self {
        Self {
            email_notifications: true,
            weekly_digest: true,
            new_skill_alerts: true,
            pack_alerts: true,
        }
    }
}

impl NotificationPreferences {
    pub fn get(&self, flag: NotificationFlag) -> bool {
        match flag {
            NotificationFlag::EmailNotifications => self.email_notifications,
            NotificationFlag::WeeklyDigest => self.weekly_digest,
            NotificationFlag::NewSkillAlerts => self.new_skill_alerts,
            NotificationFlag::PackAlerts => self.pack_alerts,
        }
    }

    /// Copy of `self` with one flag changed
    pub fn with(mut self, flag: NotificationFlag, value: bool) -> Self {
        match flag {
            NotificationFlag::EmailNotifications => self.email_notifications = value,
            NotificationFlag::WeeklyDigest => self.weekly_digest = value,
            NotificationFlag::NewSkillAlerts => self.new_skill_alerts = value,
            NotificationFlag::PackAlerts => self.pack_alerts = value,
        }
        self
    }

    /// Parse a full-replace payload; every flag must be a present boolean
    ///
    /// Only a JSON object is accepted. Serde would otherwise fill the struct
    /// from a four-element array by position.
    pub fn from_json(value: serde_json::Value) -> Result<Self, PreferenceError> {
        if !value.is_object() {
            return Err(PreferenceError::InvalidData(
                "Preferences must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(PreferenceError::from)
    }
}

/// A user's persisted preference row
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    pub user_id: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub preferences: NotificationPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One column of the preference record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationFlag {
    EmailNotifications,
    WeeklyDigest,
    NewSkillAlerts,
    PackAlerts,
}

impl NotificationFlag {
    pub const ALL: [NotificationFlag; 4] = [
        NotificationFlag::EmailNotifications,
        NotificationFlag::WeeklyDigest,
        NotificationFlag::NewSkillAlerts,
        NotificationFlag::PackAlerts,
    ];

    /// Column name in the preference table
    pub(crate) fn column(self) -> &'static str {
        match self {
            NotificationFlag::EmailNotifications => "email_notifications",
            NotificationFlag::WeeklyDigest => "weekly_digest",
            NotificationFlag::NewSkillAlerts => "new_skill_alerts",
            NotificationFlag::PackAlerts => "pack_alerts",
        }
    }
}

/// Which category an unsubscribe link revokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Every email; the widest revocation
    #[default]
    All,
    /// The weekly digest
    Weekly,
    /// New-skill alerts
    Alerts,
}

impl Scope {
    /// Normalize the `type` value of an unsubscribe request
    ///
    /// Missing or unrecognized values resolve to [`Scope::All`], never to a no-op.
    pub fn from_request(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("all") => Scope::All,
            Some("weekly") => Scope::Weekly,
            Some("alerts") => Scope::Alerts,
            _ => Scope::All,
        }
    }

    /// The single flag this scope turns off
    pub fn flag(self) -> NotificationFlag {
        match self {
            Scope::All => NotificationFlag::EmailNotifications,
            Scope::Weekly => NotificationFlag::WeeklyDigest,
            Scope::Alerts => NotificationFlag::NewSkillAlerts,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::All => "all",
            Scope::Weekly => "weekly",
            Scope::Alerts => "alerts",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
