// screenrec-domain/src/recording_settings/service_tests.rs
#![cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use rstest::rstest;
use screenrec_core::config::CaptureConfig;
use screenrec_core::types::{DisplayMetrics, PlatformVersion, Rotation};

use super::encoders::{AudioEncoder, VideoEncoder};
use super::errors::PreferenceError;
use super::keys::{SettingKey, StaticKeyResolver};
use super::memory_store::MemoryPreferenceStore;
use super::persistence_iface::{ChangeCallback, ListenerHandle, PreferenceStore, PrefValue};
use super::service::PreferencesService;
use super::test_support::{CountingStore, FixedDevice};
use super::types::{OrderBy, OrientationMode, Resolution, SaveLocation, SaveLocationKind, SortBy, SortOrderOptions};

fn phone() -> FixedDevice {
    FixedDevice::new(DisplayMetrics::new(1080, 1920))
}

fn create_test_service(device: FixedDevice) -> (PreferencesService, Arc<CountingStore>, Arc<FixedDevice>) {
    let store = Arc::new(CountingStore::new());
    let device = Arc::new(device);
    let service = PreferencesService::with_defaults(store.clone(), device.clone());
    (service, store, device)
}

#[test]
fn fresh_store_reads_defaults() {
    let (service, _, _) = create_test_service(phone());

    assert_eq!(service.video_bitrate(), 8_388_608);
    assert_eq!(service.fps(), 30);
    assert_eq!(service.audio_bitrate(), 1_280_000);
    assert_eq!(service.audio_sampling_rate(), 44_100);
    assert_eq!(service.filename_prefix(), "REC");
    assert_eq!(service.orientation(), OrientationMode::Auto);
    assert!(service.is_first_run());
    assert!(!service.record_audio());
    assert_eq!(service.video_width(), 1080);
    assert_eq!(service.save_location().unwrap(), None);
    assert_eq!(service.sort_order(), SortOrderOptions::new(SortBy::Date, OrderBy::Descending));
}

#[test]
fn setters_persist_through_the_store() {
    let (service, store, _) = create_test_service(phone());

    service.set_fps(60);
    service.set_record_audio(true);

    assert_eq!(store.get_raw("fps"), Some(PrefValue::from("60")));
    assert_eq!(store.get_raw("audio"), Some(PrefValue::Bool(true)));
    assert_eq!(service.fps(), 60);
    assert!(service.record_audio());
}

#[test]
fn key_overrides_redirect_storage() {
    let store = Arc::new(CountingStore::new());
    let keys = StaticKeyResolver::new().with_override(SettingKey::Fps, "pref_fps");
    let service =
        PreferencesService::new(store.clone(), Arc::new(keys), Arc::new(phone()), &CaptureConfig::default());

    service.set_fps(24);

    assert_eq!(store.get_raw("pref_fps"), Some(PrefValue::from("24")));
    assert_eq!(store.get_raw("fps"), None);
}

#[rstest]
#[case(Rotation::Rotation0, Resolution::new(1080, 1920))]
#[case(Rotation::Rotation90, Resolution::new(1920, 1080))]
fn resolution_tracks_live_rotation(#[case] rotation: Rotation, #[case] expected: Resolution) {
    let (service, _, device) = create_test_service(phone());
    service.set_video_width(1080);

    device.set_rotation(rotation);

    assert_eq!(service.resolution(), expected);
}

#[test]
fn first_run_picks_width_once() {
    let (service, _, _) =
        create_test_service(phone().with_real_metrics(DisplayMetrics::new(1200, 1920)));

    assert!(service.initialize_on_first_run());
    assert_eq!(service.video_width(), 1080);
    assert!(!service.is_first_run());

    service.set_video_width(720);
    assert!(!service.initialize_on_first_run());
    assert_eq!(service.video_width(), 720);
}

#[test]
fn configured_candidates_drive_first_run() {
    let store = Arc::new(CountingStore::new());
    let capture = CaptureConfig { candidate_widths: vec![900, 600] };
    let service =
        PreferencesService::new(store, Arc::new(StaticKeyResolver::new()), Arc::new(phone()), &capture);

    service.initialize_on_first_run();

    assert_eq!(service.video_width(), 900);
}

#[test]
fn hevc_on_old_platform_is_reset_and_reported() {
    let (service, store, _) = create_test_service(phone().with_platform(PlatformVersion(23)));
    service.set_video_encoder(VideoEncoder::Hevc);

    match service.video_encoder() {
        Err(PreferenceError::Capability { encoder, required, actual }) => {
            assert_eq!(encoder, "HEVC");
            assert_eq!(required, PlatformVersion::N);
            assert_eq!(actual, PlatformVersion(23));
        }
        other => panic!("Expected Capability error, got {:?}", other),
    }
    assert_eq!(store.get_raw("video_encoder"), Some(PrefValue::from("default")));
    assert_eq!(service.video_encoder().unwrap(), VideoEncoder::Default);
}

#[rstest]
#[case(28, true)]
#[case(29, false)]
fn opus_is_gated_at_q(#[case] level: u32, #[case] rejected: bool) {
    let (service, _, _) = create_test_service(phone().with_platform(PlatformVersion(level)));
    service.set_audio_encoder(AudioEncoder::Opus);

    assert_eq!(service.audio_encoder().is_err(), rejected);
}

#[test]
fn filename_uses_prefix_and_pattern() {
    let (service, _, _) = create_test_service(phone());
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();

    assert_eq!(service.filename_at(&timestamp), "REC_20240305_020709");

    service.set_filename_prefix("  ");
    service.set_filename_format("yyyy-MM-dd HH.mm");
    assert_eq!(service.filename_at(&timestamp), "2024-03-05 14.07");
}

#[test]
fn sort_order_stream_replays_then_follows_changes() {
    let (service, _, _) = create_test_service(phone());
    let mut stream = service.subscribe_sort_order().unwrap();

    assert_eq!(stream.try_next(), Some(SortOrderOptions::new(SortBy::Date, OrderBy::Descending)));

    service.set_sort_by(SortBy::Size);
    assert_eq!(stream.try_next(), Some(SortOrderOptions::new(SortBy::Size, OrderBy::Descending)));

    service.set_sort_order(SortOrderOptions::new(SortBy::Name, OrderBy::Ascending));
    assert_eq!(stream.try_next(), Some(SortOrderOptions::new(SortBy::Name, OrderBy::Ascending)));
    assert_eq!(stream.try_next(), None);
}

/// Memory store that, on the first read of `trigger_key` once armed, has another thread
/// commit `late_value` before returning the value it read.
struct InterleavingStore {
    inner: Arc<MemoryPreferenceStore>,
    trigger_key: &'static str,
    late_value: PrefValue,
    armed: AtomicBool,
    writer: Mutex<Option<thread::JoinHandle<()>>>,
}

impl InterleavingStore {
    fn new(trigger_key: &'static str, late_value: PrefValue) -> Self {
        Self {
            inner: Arc::new(MemoryPreferenceStore::new()),
            trigger_key,
            late_value,
            armed: AtomicBool::new(false),
            writer: Mutex::new(None),
        }
    }

    fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    fn join_writer(&self) {
        if let Some(handle) = self.writer.lock().take() {
            handle.join().unwrap();
        }
    }
}

impl PreferenceStore for InterleavingStore {
    fn get_raw(&self, key: &str) -> Option<PrefValue> {
        let value = self.inner.get_raw(key);
        if key == self.trigger_key && self.armed.swap(false, Ordering::SeqCst) {
            let (inner, late, key_owned) = (self.inner.clone(), self.late_value.clone(), key.to_string());
            let handle = thread::spawn(move || inner.set_raw(&key_owned, late));
            // Wait for the commit only; its notification may still be pending.
            while self.inner.get_raw(key).as_ref() != Some(&self.late_value) {
                thread::yield_now();
            }
            *self.writer.lock() = Some(handle);
        }
        value
    }

    fn set_raw(&self, key: &str, value: PrefValue) {
        self.inner.set_raw(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key)
    }

    fn on_change(&self, callback: ChangeCallback) -> ListenerHandle {
        self.inner.on_change(callback)
    }

    fn off_change(&self, handle: ListenerHandle) {
        self.inner.off_change(handle)
    }
}

#[test]
fn write_racing_first_subscribe_reaches_subscriber() {
    let store = Arc::new(InterleavingStore::new("sort_by", PrefValue::from("name")));
    let service = PreferencesService::with_defaults(store.clone(), Arc::new(phone()));
    store.arm();

    let mut stream = service.subscribe_sort_order().unwrap();
    store.join_writer();

    assert_eq!(store.get_raw("sort_by"), Some(PrefValue::from("name")));
    assert_eq!(service.sort_order(), SortOrderOptions::new(SortBy::Name, OrderBy::Descending));
    assert_eq!(stream.latest(), service.sort_order());
    assert_eq!(stream.try_next(), Some(SortOrderOptions::new(SortBy::Name, OrderBy::Descending)));
}

#[test]
fn save_location_stream_skips_unrecognized_kind() {
    let (service, store, _) = create_test_service(phone());
    let location = SaveLocation::new("content://tree/recordings", SaveLocationKind::UserPickedLocation);
    let mut stream = service.subscribe_save_location().unwrap();
    assert_eq!(stream.try_next(), Some(None));

    service.set_save_location(&location);
    assert_eq!(stream.try_next(), Some(Some(location.clone())));

    store.set_raw("save_location_kind", PrefValue::from("CloudLocation"));
    assert_eq!(stream.try_next(), None);
    assert!(matches!(
        service.save_location(),
        Err(PreferenceError::UnrecognizedLocationKind { kind }) if kind == "CloudLocation"
    ));

    service.clear_save_location();
    assert_eq!(stream.try_next(), Some(None));
}

#[test]
fn key_stream_ignores_other_keys() {
    let (service, store, _) = create_test_service(phone());
    let mut fps = service.subscribe_key(SettingKey::Fps).unwrap();
    assert_eq!(fps.try_next(), Some(None));

    service.set_video_bitrate(4_000_000);
    assert_eq!(fps.try_next(), None);

    service.set_fps(48);
    assert_eq!(fps.try_next(), Some(Some(PrefValue::from("48"))));

    // A second subscriber shares the hub and its single listener.
    let before = store.registered();
    let mut again = service.subscribe_key(SettingKey::Fps).unwrap();
    assert_eq!(again.try_next(), Some(Some(PrefValue::from("48"))));
    assert_eq!(store.registered(), before);
}

#[tokio::test]
async fn streams_end_when_service_closes() {
    let (service, store, _) = create_test_service(phone());
    let mut sort_order = service.subscribe_sort_order().unwrap();
    let mut fps = service.subscribe_key(SettingKey::Fps).unwrap();
    sort_order.next().await;
    fps.next().await;

    service.close();

    assert_eq!(tokio::time::timeout(Duration::from_secs(5), sort_order.next()).await.unwrap(), None);
    assert_eq!(tokio::time::timeout(Duration::from_secs(5), fps.next()).await.unwrap(), None);
    assert!(matches!(service.subscribe_sort_order(), Err(PreferenceError::HubClosed { .. })));
    assert!(matches!(service.subscribe_save_location(), Err(PreferenceError::HubClosed { .. })));
    assert!(matches!(service.subscribe_key(SettingKey::Fps), Err(PreferenceError::HubClosed { .. })));
    assert!(matches!(service.subscribe_key(SettingKey::NightMode), Err(PreferenceError::HubClosed { .. })));
    assert_eq!(store.active_listeners(), 0);
}

#[test]
fn dropping_service_releases_listeners() {
    let (service, store, _) = create_test_service(phone());
    let _sort_order = service.subscribe_sort_order().unwrap();
    let _location = service.subscribe_save_location().unwrap();
    assert_eq!(store.active_listeners(), 2);

    drop(service);

    assert_eq!(store.active_listeners(), 0);
    assert_eq!(store.unregistered(), 2);
}

#[test]
fn closed_service_refuses_new_key_streams() {
    let (service, store, _) = create_test_service(phone());

    service.close();

    match service.subscribe_key(SettingKey::Fps) {
        Err(PreferenceError::HubClosed { stream }) => assert_eq!(stream, "key:fps"),
        other => panic!("Expected HubClosed, got {:?}", other.map(|_| ())),
    }
    assert_eq!(store.registered(), 0);
}
