//! The recording preferences facade.
//!
//! [`PreferencesService`] ties together the store, the key table, the device and the
//! configured capture candidates. It exposes typed accessors, derived values, encoder
//! selection and the change streams consumers subscribe to.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use parking_lot::Mutex;
use screenrec_core::config::CaptureConfig;
use tracing::debug;

use super::accessors::{self, SettingsAccess};
use super::derivation;
use super::device_iface::DeviceInfo;
use super::encoders::{self, AudioEncoder, VideoEncoder};
use super::errors::PreferenceError;
use super::filename;
use super::hub::{ChangeHub, Subscription};
use super::keys::{KeyResolver, SettingKey, StaticKeyResolver};
use super::library;
use super::persistence_iface::{PreferenceStore, PrefValue};
use super::types::{NightMode, OrderBy, OrientationMode, Resolution, SaveLocation, SortBy, SortOrderOptions};

/// Lazily created single-key hubs. Once `closed` is set no new hub is created.
#[derive(Default)]
struct KeyHubs {
    hubs: HashMap<SettingKey, ChangeHub<Option<PrefValue>>>,
    closed: bool,
}

pub struct PreferencesService {
    access: SettingsAccess,
    device: Arc<dyn DeviceInfo>,
    candidate_widths: Vec<u32>,
    save_location_hub: ChangeHub<Option<SaveLocation>>,
    sort_order_hub: ChangeHub<SortOrderOptions>,
    key_hubs: Mutex<KeyHubs>,
}

impl PreferencesService {
    /// # Arguments
    ///
    /// * `store`: the persistent key-value store.
    /// * `keys`: symbolic key to store key mapping.
    /// * `device`: live display and platform queries.
    /// * `capture`: candidate widths used by [`Self::initialize_on_first_run`].
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        keys: Arc<dyn KeyResolver>,
        device: Arc<dyn DeviceInfo>,
        capture: &CaptureConfig,
    ) -> Self {
        let access = SettingsAccess::new(store.clone(), keys);

        let location_access = access.clone();
        let save_location_hub = ChangeHub::new(
            "save_location",
            store.clone(),
            Box::new(move || library::read_save_location(&location_access)),
        );

        let sort_access = access.clone();
        let sort_order_hub =
            ChangeHub::new("sort_order", store, Box::new(move || Ok(library::read_sort_order(&sort_access))));

        Self {
            access,
            device,
            candidate_widths: capture.candidate_widths.clone(),
            save_location_hub,
            sort_order_hub,
            key_hubs: Mutex::new(KeyHubs::default()),
        }
    }

    /// Uses the static key table and the default capture candidates.
    pub fn with_defaults(store: Arc<dyn PreferenceStore>, device: Arc<dyn DeviceInfo>) -> Self {
        Self::new(store, Arc::new(StaticKeyResolver::new()), device, &CaptureConfig::default())
    }

    pub fn access(&self) -> &SettingsAccess {
        &self.access
    }

    // --- Typed accessors ---

    pub fn video_bitrate(&self) -> u32 {
        accessors::VIDEO_BITRATE.read(&self.access)
    }

    pub fn set_video_bitrate(&self, bitrate: u32) {
        accessors::VIDEO_BITRATE.write(&self.access, bitrate)
    }

    pub fn fps(&self) -> u32 {
        accessors::FPS.read(&self.access)
    }

    pub fn set_fps(&self, fps: u32) {
        accessors::FPS.write(&self.access, fps)
    }

    pub fn audio_bitrate(&self) -> u32 {
        accessors::AUDIO_BITRATE.read(&self.access)
    }

    pub fn set_audio_bitrate(&self, bitrate: u32) {
        accessors::AUDIO_BITRATE.write(&self.access, bitrate)
    }

    pub fn audio_sampling_rate(&self) -> u32 {
        accessors::AUDIO_SAMPLING_RATE.read(&self.access)
    }

    pub fn set_audio_sampling_rate(&self, rate: u32) {
        accessors::AUDIO_SAMPLING_RATE.write(&self.access, rate)
    }

    pub fn filename_format(&self) -> String {
        accessors::FILENAME_FORMAT.read(&self.access)
    }

    pub fn set_filename_format(&self, pattern: impl Into<String>) {
        accessors::FILENAME_FORMAT.write(&self.access, pattern.into())
    }

    pub fn filename_prefix(&self) -> String {
        accessors::FILENAME_PREFIX.read(&self.access)
    }

    pub fn set_filename_prefix(&self, prefix: impl Into<String>) {
        accessors::FILENAME_PREFIX.write(&self.access, prefix.into())
    }

    pub fn night_mode(&self) -> NightMode {
        accessors::NIGHT_MODE.read(&self.access)
    }

    pub fn set_night_mode(&self, mode: NightMode) {
        accessors::NIGHT_MODE.write(&self.access, mode)
    }

    pub fn record_audio(&self) -> bool {
        accessors::RECORD_AUDIO.read(&self.access)
    }

    pub fn set_record_audio(&self, enabled: bool) {
        accessors::RECORD_AUDIO.write(&self.access, enabled)
    }

    pub fn show_touches(&self) -> bool {
        accessors::SHOW_TOUCHES.read(&self.access)
    }

    pub fn set_show_touches(&self, enabled: bool) {
        accessors::SHOW_TOUCHES.write(&self.access, enabled)
    }

    pub fn floating_controls(&self) -> bool {
        accessors::FLOATING_CONTROLS.read(&self.access)
    }

    pub fn set_floating_controls(&self, enabled: bool) {
        accessors::FLOATING_CONTROLS.write(&self.access, enabled)
    }

    pub fn is_first_run(&self) -> bool {
        accessors::FIRST_RUN.read(&self.access)
    }

    pub fn orientation(&self) -> OrientationMode {
        accessors::ORIENTATION.read(&self.access)
    }

    pub fn set_orientation(&self, mode: OrientationMode) {
        accessors::ORIENTATION.write(&self.access, mode)
    }

    // --- Derived values ---

    pub fn video_width(&self) -> u32 {
        derivation::video_width(&self.access, self.device.as_ref())
    }

    pub fn set_video_width(&self, width: u32) {
        accessors::RESOLUTION_WIDTH.write(&self.access, width)
    }

    pub fn aspect_ratio(&self) -> f64 {
        derivation::aspect_ratio(self.device.as_ref())
    }

    pub fn resolution(&self) -> Resolution {
        derivation::resolution(&self.access, self.device.as_ref())
    }

    /// File name for a recording started now, in local time.
    pub fn filename(&self) -> String {
        filename::filename(&self.access)
    }

    pub fn filename_at<Tz>(&self, timestamp: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        filename::filename_at(&self.access, timestamp)
    }

    /// Runs first-run width selection once. Returns whether it ran.
    pub fn initialize_on_first_run(&self) -> bool {
        derivation::initialize_on_first_run(&self.access, self.device.as_ref(), &self.candidate_widths)
    }

    // --- Encoders ---

    /// # Errors
    ///
    /// [`PreferenceError::Capability`] if the stored encoder is unavailable on this device;
    /// the stored value is reset to `default` first.
    pub fn video_encoder(&self) -> Result<VideoEncoder, PreferenceError> {
        encoders::read_encoder(&self.access, self.device.as_ref())
    }

    pub fn set_video_encoder(&self, encoder: VideoEncoder) {
        encoders::write_encoder(&self.access, encoder)
    }

    /// # Errors
    ///
    /// [`PreferenceError::Capability`] if the stored encoder is unavailable on this device;
    /// the stored value is reset to `default` first.
    pub fn audio_encoder(&self) -> Result<AudioEncoder, PreferenceError> {
        encoders::read_encoder(&self.access, self.device.as_ref())
    }

    pub fn set_audio_encoder(&self, encoder: AudioEncoder) {
        encoders::write_encoder(&self.access, encoder)
    }

    // --- Library view ---

    /// # Errors
    ///
    /// [`PreferenceError::UnrecognizedLocationKind`] for an unknown stored kind.
    pub fn save_location(&self) -> Result<Option<SaveLocation>, PreferenceError> {
        library::read_save_location(&self.access)
    }

    pub fn set_save_location(&self, location: &SaveLocation) {
        library::write_save_location(&self.access, location)
    }

    pub fn clear_save_location(&self) {
        library::clear_save_location(&self.access)
    }

    pub fn sort_order(&self) -> SortOrderOptions {
        library::read_sort_order(&self.access)
    }

    pub fn set_sort_order(&self, options: SortOrderOptions) {
        library::write_sort_order(&self.access, options)
    }

    pub fn set_sort_by(&self, sort_by: SortBy) {
        accessors::SORT_BY.write(&self.access, sort_by)
    }

    pub fn set_order_by(&self, order_by: OrderBy) {
        accessors::ORDER_BY.write(&self.access, order_by)
    }

    // --- Change streams ---

    /// Stream of save-location snapshots. Changes whose new value cannot be read are skipped.
    pub fn subscribe_save_location(&self) -> Result<Subscription<Option<SaveLocation>>, PreferenceError> {
        self.save_location_hub.subscribe()
    }

    pub fn subscribe_sort_order(&self) -> Result<Subscription<SortOrderOptions>, PreferenceError> {
        self.sort_order_hub.subscribe()
    }

    /// Stream of raw values for one key. The hub for `key` is created on first use.
    pub fn subscribe_key(&self, key: SettingKey) -> Result<Subscription<Option<PrefValue>>, PreferenceError> {
        let mut key_hubs = self.key_hubs.lock();
        if key_hubs.closed {
            return Err(PreferenceError::HubClosed { stream: format!("key:{}", self.access.store_key(key)) });
        }
        let hub = key_hubs.hubs.entry(key).or_insert_with(|| {
            let store_key = self.access.store_key(key);
            debug!("Creating change stream for {} ('{}')", key, store_key);
            let access = self.access.clone();
            ChangeHub::filtered(
                format!("key:{}", store_key),
                self.access.store().clone(),
                Box::new(move || Ok(access.get_raw(key))),
                Box::new(move |changed: &str| changed == store_key),
            )
        });
        hub.subscribe()
    }

    /// Closes every change stream. Later subscriptions fail with [`PreferenceError::HubClosed`].
    pub fn close(&self) {
        self.save_location_hub.close();
        self.sort_order_hub.close();
        let mut key_hubs = self.key_hubs.lock();
        key_hubs.closed = true;
        for hub in key_hubs.hubs.values() {
            hub.close();
        }
    }
}
