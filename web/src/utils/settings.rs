//! Notification channel toggles shared across the bookings screens.
//!
//! One [`ChannelSettingsStore`] is provided at the page root; readers take it
//! from context. Every change is written back to `localStorage`.

use booking_types::{ChannelSettings, NotificationChannel, CHANNEL_SETTINGS_STORAGE_KEY};
use leptos::prelude::*;

use crate::utils::storage;

#[derive(Clone, Copy)]
pub struct ChannelSettingsStore {
    settings: RwSignal<ChannelSettings>,
}

impl ChannelSettingsStore {
    pub fn get(&self) -> ChannelSettings {
        self.settings.get()
    }

    pub fn is_enabled(&self, channel: NotificationChannel) -> bool {
        self.settings.with(|s| s.is_enabled(channel))
    }

    pub fn set(&self, channel: NotificationChannel, enabled: bool) {
        self.settings.update(|s| s.set(channel, enabled));
        self.settings.with_untracked(|s| write_stored(&s.to_stored()));
    }
}

/// Loads the persisted toggles once hydrated and puts the store in context.
pub fn provide_channel_settings() -> ChannelSettingsStore {
    let store = ChannelSettingsStore {
        settings: RwSignal::new(ChannelSettings::default()),
    };

    Effect::new(move |_| {
        let stored = read_stored();
        store
            .settings
            .set(ChannelSettings::from_stored(stored.as_deref()));
    });

    provide_context(store);
    store
}

pub fn use_channel_settings() -> ChannelSettingsStore {
    use_context::<ChannelSettingsStore>().unwrap_or_else(provide_channel_settings)
}

fn read_stored() -> Option<String> {
    storage::read(CHANNEL_SETTINGS_STORAGE_KEY)
}

fn write_stored(json: &str) {
    storage::write(CHANNEL_SETTINGS_STORAGE_KEY, json)
}
