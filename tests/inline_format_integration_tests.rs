use chrono::{DateTime, FixedOffset, TimeZone};
use display_format_rs::{
    DisabledTrack, InlineContext, SubtitleState, render_inline, render_inline_at,
    template::format_timestamp,
};

fn fixed_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 7, 4, 9, 30, 15)
        .single()
        .unwrap()
}

#[test_log::test]
fn test_file_and_time_example() {
    let context = InlineContext::new("/x/song.mp3")
        .disabled(DisabledTrack::None)
        .subtitles(SubtitleState::Present)
        .times(0.0, 65.4, 125.0);

    insta::assert_snapshot!(
        render_inline("%F - %ap to %bp", &context),
        @"song - 00:01:05 to 00:02:05"
    );
}

#[test_log::test]
fn test_plain_text_is_unchanged() {
    let context = InlineContext::new("/x/song.mp3").times(1.0, 2.0, 3.0);
    for format in ["", "plain", "braces {a}{b}", "unicode 歌名 ♪"] {
        assert_eq!(render_inline(format, &context), format);
    }
}

#[test_log::test]
fn test_double_percent_is_single_literal() {
    let context = InlineContext::new("f");
    for (format, expected) in [
        ("%%", "%"),
        ("a%%b", "a%b"),
        ("%%%%", "%%"),
        ("%%f", "%f"),
        ("{%%}", "{%}"),
    ] {
        assert_eq!(render_inline(format, &context), expected, "格式 {format:?}");
    }
}

#[test_log::test]
fn test_screenshot_name() {
    let context = InlineContext::new("C:/Videos/movie.final.mkv").times(3725.5, 0.0, 7200.0);
    insta::assert_snapshot!(
        render_inline_at("%F %t{yyyy-MM-dd HH-mm-ss} %wP", &context, &fixed_now()),
        @"movie.final 2025-07-04 09-30-15 01:02:05.500"
    );
}

#[test_log::test]
fn test_osd_with_track_and_subtitle_states() {
    let format = "%wp / %bp%d{ (no audio)}{ (no video)}%s{}{ [subs off]}";
    let base = InlineContext::new("a.mkv").times(30.0, 0.0, 90.0);

    assert_eq!(render_inline(format, &base), "00:00:30 / 00:01:30");
    assert_eq!(
        render_inline(
            format,
            &base
                .clone()
                .disabled(DisabledTrack::Video)
                .subtitles(SubtitleState::Disabled)
        ),
        "00:00:30 / 00:01:30 (no video) [subs off]"
    );
}

#[test_log::test]
fn test_precise_time_reconstructs_millis() {
    for seconds in [0.0, 0.001, 1.9995, 59.999, 61.25, 3599.9994, 45296.789] {
        let context = InlineContext::new("a").times(0.0, seconds, 0.0);
        let text = render_inline("%aH %aM %aS %aT", &context);
        let fields: Vec<u64> = text.split(' ').map(|f| f.parse().unwrap()).collect();
        let total = ((fields[0] * 60 + fields[1]) * 60 + fields[2]) * 1000 + fields[3];
        assert_eq!(total, (seconds * 1000.0 + 0.5) as u64, "秒数 {seconds}");
        assert_eq!(text, {
            let p = render_inline("%aP", &context);
            p.replace([':', '.'], " ")
        });
    }
}

#[test_log::test]
fn test_negative_times_clamp_to_zero() {
    let context = InlineContext::new("a").times(-5.0, -0.4, -100.0);
    assert_eq!(
        render_inline("%wP %ah %bs %bf", &context),
        "00:00:00.000 0 0 0.000000"
    );
}

#[test_log::test]
fn test_format_timestamp_helper() {
    assert_eq!(format_timestamp(45296.789), "12:34:56.789");
}
