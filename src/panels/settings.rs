use log::{info, warn};

use crate::PrepVistaError;
use crate::devices::{MediaConstraints, MediaDevices};
use crate::panels::CommitOutcome;
use crate::session::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Account,
    Notifications,
    Privacy,
    Appearance,
    Devices,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 5] = [
        SettingsTab::Account,
        SettingsTab::Notifications,
        SettingsTab::Privacy,
        SettingsTab::Appearance,
        SettingsTab::Devices,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsTab::Account => "Account",
            SettingsTab::Notifications => "Notifications",
            SettingsTab::Privacy => "Privacy & Security",
            SettingsTab::Appearance => "Appearance",
            SettingsTab::Devices => "Devices",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileVisibility {
    Public,
    Private,
    FriendsOnly,
}

impl ProfileVisibility {
    pub const ALL: [ProfileVisibility; 3] = [
        ProfileVisibility::Public,
        ProfileVisibility::Private,
        ProfileVisibility::FriendsOnly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileVisibility::Public => "Public",
            ProfileVisibility::Private => "Private",
            ProfileVisibility::FriendsOnly => "Friends Only",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRecord {
    pub name: String,
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,

    pub email_notifications: bool,
    pub practice_reminders: bool,
    pub weekly_reports: bool,
    pub marketing_emails: bool,

    pub profile_visibility: ProfileVisibility,
    pub data_sharing: bool,
    pub analytics_tracking: bool,

    pub theme: Theme,
    pub language: Language,

    pub camera_permission: bool,
    pub microphone_permission: bool,
    pub auto_record: bool,
}

impl SettingsRecord {
    pub fn for_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            current_password: String::new(),
            new_password: String::new(),
            confirm_password: String::new(),
            email_notifications: true,
            practice_reminders: true,
            weekly_reports: true,
            marketing_emails: false,
            profile_visibility: ProfileVisibility::Private,
            data_sharing: false,
            analytics_tracking: true,
            theme: Theme::Light,
            language: Language::English,
            camera_permission: true,
            microphone_permission: true,
            auto_record: false,
        }
    }
}

/// Settings form. `draft` is edited directly by the view; `save` and
/// `discard` move it against the last saved copy.
pub struct SettingsPanel {
    pub tab: SettingsTab,
    pub draft: SettingsRecord,
    saved: SettingsRecord,
    password_status: Option<Result<(), String>>,
    device_check: Option<Result<(), String>>,
}

impl SettingsPanel {
    pub fn new(user: &User) -> Self {
        let record = SettingsRecord::for_user(user);
        Self {
            tab: SettingsTab::Account,
            draft: record.clone(),
            saved: record,
            password_status: None,
            device_check: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    pub fn saved(&self) -> &SettingsRecord {
        &self.saved
    }

    pub fn save(&mut self) -> CommitOutcome {
        self.saved = self.draft.clone();
        warn!("Settings kept for this session only, they are not persisted");
        CommitOutcome::NotPersisted
    }

    pub fn discard(&mut self) {
        self.draft = self.saved.clone();
    }

    /// Validates the password fields and clears them. Nothing is sent
    /// anywhere.
    pub fn update_password(&mut self) -> Result<CommitOutcome, PrepVistaError> {
        let result = self.check_password();
        self.password_status = Some(match &result {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("Password change rejected: {e}");
                Err(e.to_string())
            }
        });
        result
    }

    pub fn password_status(&self) -> Option<&Result<(), String>> {
        self.password_status.as_ref()
    }

    fn check_password(&mut self) -> Result<CommitOutcome, PrepVistaError> {
        if self.draft.current_password.is_empty() {
            return Err(PrepVistaError::InvalidInput {
                field: "current password".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.draft.new_password.is_empty() {
            return Err(PrepVistaError::InvalidInput {
                field: "new password".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.draft.new_password != self.draft.confirm_password {
            return Err(PrepVistaError::InvalidInput {
                field: "confirm password".to_string(),
                reason: "does not match the new password".to_string(),
            });
        }
        for field in [
            &mut self.draft.current_password,
            &mut self.draft.new_password,
            &mut self.draft.confirm_password,
        ] {
            field.clear();
        }
        warn!("Password change accepted but not persisted");
        Ok(CommitOutcome::NotPersisted)
    }

    pub fn download_data(&self) -> CommitOutcome {
        warn!("Data download requested, there is no stored data to download");
        CommitOutcome::NotPersisted
    }

    pub fn clear_data(&self) -> CommitOutcome {
        warn!("Clear data requested, nothing is stored");
        CommitOutcome::NotPersisted
    }

    pub fn delete_account(&self) -> CommitOutcome {
        warn!("Account deletion requested, nothing is stored");
        CommitOutcome::NotPersisted
    }

    /// Opens and immediately releases a capture stream.
    pub fn test_devices(&mut self, devices: &mut dyn MediaDevices) -> Result<(), PrepVistaError> {
        let outcome = devices.acquire_stream(MediaConstraints::AUDIO_VIDEO);
        let result = match outcome {
            Ok(stream) => {
                info!("Device check passed");
                devices.release(stream);
                Ok(())
            }
            Err(e) => Err(e),
        };
        self.device_check = Some(match &result {
            Ok(()) => Ok(()),
            Err(e) => Err(e.to_string()),
        });
        result
    }

    pub fn device_check(&self) -> Option<&Result<(), String>> {
        self.device_check.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{DevicePermissions, SimulatedDevices};

    fn panel() -> SettingsPanel {
        SettingsPanel::new(&User::demo())
    }

    #[test]
    fn test_defaults() {
        let panel = panel();
        assert_eq!(panel.draft.name, "Alex Johnson");
        assert!(panel.draft.email_notifications);
        assert!(!panel.draft.marketing_emails);
        assert_eq!(panel.draft.profile_visibility, ProfileVisibility::Private);
        assert_eq!(panel.draft.theme, Theme::Light);
        assert!(!panel.is_dirty());
    }

    #[test]
    fn test_save_and_discard() {
        let mut panel = panel();
        panel.draft.theme = Theme::Dark;
        assert!(panel.is_dirty());
        assert_eq!(panel.save(), CommitOutcome::NotPersisted);
        assert_eq!(panel.saved().theme, Theme::Dark);

        panel.draft.language = Language::German;
        panel.discard();
        assert_eq!(panel.draft.language, Language::English);
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let mut panel = panel();
        panel.draft.current_password = "old".to_string();
        panel.draft.new_password = "new-secret".to_string();
        panel.draft.confirm_password = "new-secrte".to_string();
        let result = panel.update_password();
        assert!(matches!(
            result,
            Err(PrepVistaError::InvalidInput { ref field, .. }) if field == "confirm password"
        ));
        assert_eq!(panel.draft.new_password, "new-secret");
        assert!(matches!(panel.password_status(), Some(Err(_))));

        panel.draft.confirm_password = "new-secret".to_string();
        assert_eq!(panel.update_password().unwrap(), CommitOutcome::NotPersisted);
        assert!(panel.draft.new_password.is_empty());
        assert_eq!(panel.password_status(), Some(&Ok(())));
    }

    #[test]
    fn test_account_actions_are_no_ops() {
        let panel = panel();
        assert_eq!(panel.download_data(), CommitOutcome::NotPersisted);
        assert_eq!(panel.clear_data(), CommitOutcome::NotPersisted);
        assert_eq!(panel.delete_account(), CommitOutcome::NotPersisted);
    }

    #[test]
    fn test_device_check_releases_stream() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut panel = panel();
        panel.test_devices(&mut devices).unwrap();
        assert_eq!(devices.open_streams(), 0);
        assert_eq!(panel.device_check(), Some(&Ok(())));

        let mut denied = SimulatedDevices::new(DevicePermissions {
            camera: false,
            microphone: true,
        });
        assert!(panel.test_devices(&mut denied).is_err());
        assert!(matches!(panel.device_check(), Some(Err(_))));
    }
}
