use media_squeeze::classify::{classify, MediaKind};
use media_squeeze::results::{format_record, parse_line, CompressionOutcome};
use proptest::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

fn outcome_strategy() -> impl Strategy<Value = CompressionOutcome> {
    (
        0u64..1_000_000_000_000,
        0u64..1_000_000_000_000,
        0.0f64..10_000.0,
    )
        .prop_map(|(before, after, secs)| CompressionOutcome {
            before_bytes: before,
            after_bytes: after,
            elapsed: Duration::from_secs_f64(secs),
        })
}

proptest! {
    // Every path lands in exactly one bucket, and repeatably so.
    #[test]
    fn prop_classifier_is_total_and_deterministic(path in "[a-zA-Z0-9._/-]{1,40}") {
        let path = PathBuf::from(path);
        let kind = classify(&path);
        prop_assert!(matches!(
            kind,
            MediaKind::Image | MediaKind::Video | MediaKind::Other
        ));
        prop_assert_eq!(kind, classify(&path));
    }

    #[test]
    fn prop_known_image_extensions_route_to_image(
        stem in "[a-zA-Z0-9_-]{1,20}",
        ext in prop::sample::select(vec!["png", "jpg", "jpeg", "tiff", "PNG", "JpG"]),
    ) {
        let path = PathBuf::from(format!("{}.{}", stem, ext));
        prop_assert_eq!(classify(&path), MediaKind::Image);
    }

    #[test]
    fn prop_known_video_extensions_route_to_video(
        stem in "[a-zA-Z0-9_-]{1,20}",
        ext in prop::sample::select(vec!["mp4", "avi", "mov", "mkv", "MP4", "MkV"]),
    ) {
        let path = PathBuf::from(format!("{}.{}", stem, ext));
        prop_assert_eq!(classify(&path), MediaKind::Video);
    }

    // A shrink never reports more than 100%, and an empty original is 0%.
    #[test]
    fn prop_percent_reduction_bounded_for_shrinks(
        before in 1u64..1_000_000_000_000,
        after_fraction in 0.0f64..=1.0,
    ) {
        let after = (before as f64 * after_fraction) as u64;
        let outcome = CompressionOutcome {
            before_bytes: before,
            after_bytes: after.min(before),
            elapsed: Duration::ZERO,
        };
        let pct = outcome.percent_reduction();
        prop_assert!((0.0..=100.0).contains(&pct), "percent {} out of range", pct);
    }

    #[test]
    fn prop_percent_reduction_never_panics(outcome in outcome_strategy()) {
        let pct = outcome.percent_reduction();
        prop_assert!(pct.is_finite());
    }

    // Everything the logger writes, the viewer's loader can read back.
    #[test]
    fn prop_log_lines_roundtrip(
        filename in "[a-zA-Z0-9._-]{1,24}",
        outcome in outcome_strategy(),
    ) {
        let line = format_record(&filename, &outcome);
        let (parsed_name, fields) = parse_line(&line).expect("written line must parse");
        prop_assert_eq!(parsed_name, filename);
        prop_assert_eq!(fields.len(), 4);
        prop_assert!(fields[0].starts_with("Time: ") && fields[0].ends_with('s'));
        prop_assert!(fields[1].starts_with("Before: ") && fields[1].ends_with(" MB"));
        prop_assert!(fields[2].starts_with("After: ") && fields[2].ends_with(" MB"));
        prop_assert!(fields[3].starts_with("Compression: ") && fields[3].ends_with('%'));
    }
}
