//! Capture time extraction against real files on disk.

mod common;

use chrono::{DateTime, Local, NaiveDate};
use common::{write_jpeg_with_exif, write_plain_jpeg};
use photo_event_namer::core::metadata::{
    extract_capture_time, read_exif_capture_time, CaptureTime, FallbackReason,
};
use photo_event_namer::events::{null_sender, Event, EventChannel, ExtractEvent};
use tempfile::TempDir;

#[test]
fn exif_date_is_preferred() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("IMG_0001.jpg");
    write_jpeg_with_exif(&path, "2019:03:02 10:00:00");

    let capture = extract_capture_time(&path, &null_sender()).unwrap();

    let expected = NaiveDate::from_ymd_opt(2019, 3, 2)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    assert_eq!(capture, CaptureTime::Metadata(expected));
}

#[test]
fn missing_metadata_falls_back_to_modification_time() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scan.jpg");
    let mtime = write_plain_jpeg(&path, 1_594_814_400);

    let (sender, receiver) = EventChannel::new();
    let capture = extract_capture_time(&path, &sender).unwrap();

    let expected: DateTime<Local> = mtime.into();
    assert!(capture.is_fallback());
    assert_eq!(capture.timestamp(), expected.naive_local());

    match receiver.try_recv() {
        Some(Event::Extract(ExtractEvent::MetadataFallback { path: reported, .. })) => {
            assert_eq!(reported, path);
        }
        other => panic!("expected a fallback event, got {:?}", other),
    }
}

#[test]
fn malformed_date_is_reported_and_recovered() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("odd.jpg");
    write_jpeg_with_exif(&path, "2019-03-02 10:00:00");

    let reason = read_exif_capture_time(&path).unwrap_err();
    assert_eq!(reason, FallbackReason::Malformed("2019-03-02 10:00:00".to_string()));

    let capture = extract_capture_time(&path, &null_sender()).unwrap();
    assert!(capture.is_fallback());
}

#[test]
fn file_without_exif_block_reports_no_exif() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("plain.jpg");
    write_plain_jpeg(&path, 1_600_000_000);

    let reason = read_exif_capture_time(&path).unwrap_err();
    assert!(matches!(reason, FallbackReason::NoExif(_)));
}
