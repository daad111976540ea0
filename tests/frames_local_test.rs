use memeshot::mp4::write_box_header;
use memeshot::{CaptureConfig, FrameExtractor, MemeshotError, SubtitleIndex};
use std::io::Write;

/// IDR slice and P-slice of a small H.264 stream, with its parameter sets
const IDR: [u8; 89] = [
    0x65, 0x88, 0x84, 0x00, 0x2b, 0xff, 0xfe, 0xf5, 0x27, 0xf8, 0x14, 0xd5, 0x08, 0x44, 0x4b,
    0xe1, 0x6b, 0x61, 0xed, 0xd4, 0xb7, 0x49, 0x30, 0xd1, 0x70, 0xb1, 0x2d, 0xb3, 0xd0, 0x00,
    0x00, 0x03, 0x00, 0x00, 0x03, 0x00, 0x00, 0x18, 0xee, 0xec, 0x61, 0x1a, 0x66, 0xb1, 0x3e,
    0x51, 0xb0, 0xa0, 0x00, 0x00, 0x03, 0x00, 0x5e, 0x40, 0x17, 0xe0, 0x9a, 0x85, 0xa4, 0x3e,
    0x43, 0xb0, 0x35, 0x43, 0xc0, 0x50, 0xc7, 0x58, 0xa7, 0x10, 0x02, 0x04, 0x00, 0x00, 0x03,
    0x00, 0x00, 0x03, 0x00, 0x00, 0x03, 0x00, 0x00, 0x03, 0x00, 0x00, 0x03, 0x02, 0xdf,
];
const P_SLICE: [u8; 17] = [
    0x41, 0x9a, 0x24, 0x6c, 0x42, 0xbf, 0xfd, 0xe1, 0x00, 0x00, 0x03, 0x00, 0x00, 0x03, 0x00,
    0x6a, 0x40,
];
const SPS: [u8; 28] = [
    0x67, 0x4d, 0x40, 0x1e, 0xec, 0xc0, 0x50, 0x17, 0xfc, 0xb8, 0x0b, 0x50, 0x10, 0x10, 0x14,
    0x00, 0x00, 0x03, 0x01, 0xf4, 0x00, 0x00, 0x5d, 0xa8, 0x3c, 0x58, 0xb6, 0x68,
];
const PPS: [u8; 5] = [0x68, 0xe9, 0x79, 0xcb, 0x20];

fn make_box(name: &str, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_box_header(&mut buf, name, (payload.len() + 8) as u32);
    buf.extend_from_slice(payload);
    buf
}

fn full_box(name: &str, entries: &[u32]) -> Vec<u8> {
    let mut payload = vec![0u8; 4];
    for value in entries {
        payload.extend_from_slice(&value.to_be_bytes());
    }
    make_box(name, &payload)
}

fn length_prefixed(nalu: &[u8]) -> Vec<u8> {
    [&(nalu.len() as u32).to_be_bytes()[..], nalu].concat()
}

/// Video track with timescale 1: the IDR lasts one second, the P-frame a hundred.
fn moov(sizes: [u32; 2], mdat_offset: u32) -> Vec<u8> {
    let mut mdhd = vec![0u8; 24];
    mdhd[12..16].copy_from_slice(&1u32.to_be_bytes());
    mdhd[16..20].copy_from_slice(&101u32.to_be_bytes());
    let mut hdlr = vec![0u8; 8];
    hdlr.extend_from_slice(b"vide\0\0\0\0\0\0\0\0\0\0\0\0\0");

    let mut avcc = vec![0x01, 0x4d, 0x40, 0x1e, 0xff, 0xe1, 0x00, SPS.len() as u8];
    avcc.extend_from_slice(&SPS);
    avcc.extend_from_slice(&[0x01, 0x00, PPS.len() as u8]);
    avcc.extend_from_slice(&PPS);
    let mut visual = vec![0u8; 78];
    visual[7] = 1;
    visual.extend(make_box("avcC", &avcc));
    let mut stsd = vec![0, 0, 0, 0, 0, 0, 0, 1];
    stsd.extend(make_box("avc1", &visual));

    let stbl = [
        make_box("stsd", &stsd),
        full_box("stts", &[2, 1, 1, 1, 100]),
        full_box("stss", &[1, 1]),
        full_box("stsc", &[1, 1, 2, 1]),
        full_box("stsz", &[0, 2, sizes[0], sizes[1]]),
        full_box("stco", &[1, mdat_offset]),
    ]
    .concat();
    let minf = make_box("minf", &make_box("stbl", &stbl));
    let mdia = make_box(
        "mdia",
        &[make_box("mdhd", &mdhd), make_box("hdlr", &hdlr), minf].concat(),
    );
    make_box("moov", &make_box("trak", &mdia))
}

fn two_frame_mp4() -> Vec<u8> {
    let samples = [length_prefixed(&IDR), length_prefixed(&P_SLICE)];
    let sizes = [samples[0].len() as u32, samples[1].len() as u32];
    let ftyp = make_box("ftyp", b"isom\0\0\x02\0isomavc1");
    let mdat_offset = (ftyp.len() + moov(sizes, 0).len() + 8) as u32;
    [ftyp, moov(sizes, mdat_offset), make_box("mdat", &samples.concat())].concat()
}

fn temp_video(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file
}

const SUBTITLES: &str = "1
00:00:00,000 --> 00:00:02,000
Say cheese!

2
00:00:10,000 --> 00:00:12,000
No.

3
00:00:30,000 --> 00:00:33,000
Cheese, please. I said cheese

4
00:01:40,000 --> 00:01:45,000
The end. cheese
";

#[test]
fn test_grab_word_from_local_video() {
    let video = temp_video(&two_frame_mp4());
    let output = tempfile::tempdir().unwrap();

    let index = SubtitleIndex::from_text(SUBTITLES).unwrap();
    let timestamps = index.timestamps_for("cheese");
    assert_eq!(timestamps, ["00:00:30", "00:01:40"]);

    let mut extractor =
        FrameExtractor::open(video.path(), CaptureConfig::new(output.path())).unwrap();
    let report = extractor
        .capture_all(&["00:00:00", "00:00:30", "00:01:40"])
        .unwrap();

    // 5s and 35s fall on the P-frame, 105s is past the end of the video
    assert_eq!(report.requested, 3);
    assert_eq!(report.captured, 2);
    assert_eq!(report.failed, vec![105]);
    assert!(report.aborted.is_none());
    assert_eq!(report.summary(), "2 screenshots obtained");

    for name in ["memeshot_5secs.jpg", "memeshot_35secs.jpg"] {
        let shot = image::open(output.path().join(name)).unwrap();
        assert!(shot.width() > 0);
    }
    assert!(!output.path().join("memeshot_105secs.jpg").exists());
}

#[test]
fn test_truncated_video_keeps_the_batch_going() {
    let mut mp4 = two_frame_mp4();
    mp4.truncate(mp4.len() - 10);
    let video = temp_video(&mp4);
    let output = tempfile::tempdir().unwrap();

    let mut extractor =
        FrameExtractor::open(video.path(), CaptureConfig::new(output.path())).unwrap();
    let report = extractor.capture_all(&["00:00:30", "00:01:40"]).unwrap();

    assert_eq!(report.requested, 2);
    assert_eq!(report.captured, 0);
    assert_eq!(report.failed, vec![35, 105]);
    assert!(report.aborted.is_none());
    assert!(extractor.screenshots().is_empty());
}

#[test]
fn test_text_file_posing_as_video_yields_nothing() {
    let video = temp_video(b"this is not a video at all");
    let output = tempfile::tempdir().unwrap();

    let mut extractor =
        FrameExtractor::open(video.path(), CaptureConfig::new(output.path())).unwrap();
    let report = extractor.capture_all(&["00:00:01", "00:00:02"]).unwrap();

    assert_eq!(report.captured, 0);
    assert_eq!(report.failed, vec![6, 7]);
    assert!(report.aborted.is_none());
    assert_eq!(report.summary(), "no screenshots obtained");
}

#[test]
fn test_missing_video_is_not_found() {
    let err = FrameExtractor::open("/no/such/video.mp4", CaptureConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, MemeshotError::VideoNotFound(_)));
    assert!(err.is_not_found());
}
