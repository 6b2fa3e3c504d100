mod common;

use common::{SmfBuilder, TrackBuilder, encode_vlq};
use pretty_assertions::assert_eq;
use smf_score::prelude::*;

#[test]
fn vlq_lengths() {
    let cases = [
        (0, 1),
        (0x7F, 1),
        (0x80, 2),
        (0x3FFF, 2),
        (0x4000, 3),
        (0x1F_FFFF, 3),
        (0x20_0000, 4),
        (0x0FFF_FFFF, 4),
    ];
    for (value, len) in cases {
        let bytes = encode_vlq(value);
        assert_eq!(bytes.len(), len);
        assert_eq!(decode_vlq(&bytes, 0).unwrap(), (value, len as u32));
    }
}

#[test]
fn header_fields() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(TrackBuilder::new().end_of_track(0))
        .track(TrackBuilder::new().end_of_track(0))
        .build();
    assert_eq!(
        &bytes[..14],
        &[
            b'M', b'T', b'h', b'd', 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x01, 0xE0
        ]
    );

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.header(), &Header::new(1, 2, 480));
    assert_eq!(decoded.header().format(), Some(FormatType::Simultaneous));
    assert_eq!(decoded.number_of_tracks(), 2);
    assert_eq!(decoded.division(), 480);
}

#[test]
fn note_pairing() {
    let bytes = SmfBuilder::new(0, 1, 480)
        .track(
            TrackBuilder::new()
                .note_on(0, 60, 100)
                .event(480, &[0x80, 60, 0])
                .end_of_track(0),
        )
        .build();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(
        decoded.score().to_vec(),
        vec![ScoreEvent::new(0, 0, 60, 100, 480)]
    );
    assert_eq!(decoded.end_of_track(), 480);
    assert_eq!(decoded.unreleased_notes(), 0);
}

#[test]
fn note_on_with_zero_velocity_releases() {
    let bytes = SmfBuilder::new(0, 1, 96)
        .track(
            TrackBuilder::new()
                .note_on(10, 64, 90)
                .note_on(96, 64, 0)
                .end_of_track(0),
        )
        .build();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(
        decoded.score().to_vec(),
        vec![ScoreEvent::new(0, 10, 64, 90, 96)]
    );
}

#[test]
fn overlapping_presses_of_one_key_release_oldest_first() {
    let bytes = SmfBuilder::new(0, 1, 480)
        .track(
            TrackBuilder::new()
                .note_on(0, 60, 100)
                .note_on(120, 60, 50)
                .note_on(0, 67, 70)
                .note_off(120, 60)
                .note_off(240, 67)
                .note_off(0, 60)
                .end_of_track(0),
        )
        .build();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(
        decoded.score().to_vec(),
        vec![
            ScoreEvent::new(0, 0, 60, 100, 240),
            ScoreEvent::new(0, 120, 67, 70, 360),
            ScoreEvent::new(0, 120, 60, 50, 360),
        ]
    );
}

#[test]
fn score_follows_release_order_across_tracks() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(
            TrackBuilder::new()
                .note_on(0, 60, 100)
                .note_on(0, 64, 100)
                .note_off(240, 64)
                .note_off(240, 60)
                .end_of_track(0),
        )
        .track(
            TrackBuilder::new()
                .note_on(0, 48, 80)
                .note_off(960, 48)
                .end_of_track(0),
        )
        .build();

    let decoded = decode(&bytes).unwrap();
    let score = decoded.score();
    assert_eq!(
        score.to_vec(),
        vec![
            ScoreEvent::new(0, 0, 64, 100, 240),
            ScoreEvent::new(0, 0, 60, 100, 480),
            ScoreEvent::new(1, 0, 48, 80, 960),
        ]
    );
    assert_eq!(score.track(1).count(), 1);

    let sorted = score.sorted_by_onset();
    assert_eq!(sorted[0].note_number(), 64);
    assert_eq!(sorted[2].track(), 1);
}

#[test]
fn last_tempo_wins() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(
            TrackBuilder::new()
                .tempo(0, 500_000)
                .end_of_track(0),
        )
        .track(
            TrackBuilder::new()
                .tempo(480, 600_000)
                .end_of_track(0),
        )
        .build();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.tempo(), Tempo::new(600_000));
    assert_eq!(decoded.tempo().micros_per_quarter_note(), 600_000);
}

#[test]
fn tempo_defaults_to_120_bpm() {
    let bytes = SmfBuilder::new(0, 1, 480)
        .track(TrackBuilder::new().end_of_track(960))
        .build();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.tempo(), Tempo::DEFAULT);
    assert_eq!(decoded.duration(), Some(UMicros::from_secs(1)));
}

#[test]
fn end_of_track_is_latest_across_tracks() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(TrackBuilder::new().end_of_track(960))
        .track(TrackBuilder::new().note_on(1000, 60, 1).end_of_track(920))
        .build();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.end_of_track(), 1920);
    assert_eq!(decoded.unreleased_notes(), 1);
    assert!(decoded.score().is_empty());
}

#[test]
fn unmatched_release_is_ignored() {
    let bytes = SmfBuilder::new(0, 1, 480)
        .track(TrackBuilder::new().note_off(0, 70).note_off(10, 0).end_of_track(0))
        .build();

    let decoded = decode(&bytes).unwrap();
    assert!(decoded.score().is_empty());
    assert_eq!(decoded.end_of_track(), 10);
}

#[test]
fn other_events_are_skipped() {
    let bytes = SmfBuilder::new(0, 1, 480)
        .track(
            TrackBuilder::new()
                .event(0, &[0xFF, 0x03, 0x04, b'L', b'e', b'a', b'd'])
                .event(0, &[0xC0, 0x05])
                .event(0, &[0xB0, 0x07, 0x64])
                .note_on(0, 60, 100)
                .event(10, &[0xA0, 60, 0x20])
                .event(10, &[0xD0, 0x30])
                .event(10, &[0xE0, 0x00, 0x40])
                .event(10, &[0xF0, 0x03, 0x7E, 0x09, 0xF7])
                .note_off(20, 60)
                .end_of_track(0),
        )
        .build();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(
        decoded.score().to_vec(),
        vec![ScoreEvent::new(0, 0, 60, 100, 60)]
    );
}

#[test]
fn unknown_chunks_do_not_count_as_tracks() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(TrackBuilder::new().note_on(0, 60, 100).note_off(10, 60))
        .chunk(b"XFIH", &[0x01, 0x02, 0x03])
        .track(TrackBuilder::new().note_on(0, 62, 100).note_off(10, 62))
        .build();

    let decoded = decode(&bytes).unwrap();
    let tracks: Vec<u32> = decoded.score().iter().map(ScoreEvent::track).collect();
    assert_eq!(tracks, [0, 1]);
}

#[test]
fn timed_notes_use_file_tempo() {
    let bytes = SmfBuilder::new(0, 1, 480)
        .track(
            TrackBuilder::new()
                .tempo(0, 600_000)
                .note_on(480, 69, 100)
                .note_off(240, 69)
                .end_of_track(0),
        )
        .build();

    let decoded = decode(&bytes).unwrap();
    let timed: Vec<TimedNote> = decoded.timed_notes().collect();
    assert_eq!(timed.len(), 1);
    assert_eq!(timed[0].onset, UMicros::new(600_000));
    assert_eq!(timed[0].duration, UMicros::new(300_000));

    let note = timed[0].event.note().unwrap();
    assert_eq!(note.key(), Key::A);
    assert!((note.frequency() - 440.).abs() < 1e-9);
}

#[test]
fn truncated_delta_time_is_out_of_bounds() {
    // the file ends inside a delta time
    let bytes = SmfBuilder::new(0, 1, 480)
        .chunk(b"MTrk", &[0x00, 0x90, 60, 100, 0x81, 0x80])
        .build();

    let err = decode(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds(), "{err:?}");
    assert_eq!(err.position(), bytes.len());
}

#[test]
fn missing_track_is_out_of_bounds() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(TrackBuilder::new().end_of_track(0))
        .build();

    let err = decode(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn bad_header_is_invalid_header() {
    let mut bytes = SmfBuilder::new(0, 1, 480)
        .track(TrackBuilder::new().end_of_track(0))
        .build();
    bytes[7] = 7;

    let err = decode(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidHeader(HeaderError::InvalidLength(7))
    );

    let err = decode(b"RIFF").unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidHeader(HeaderError::InvalidTag(*b"RIFF"))
    );
}

#[test]
fn running_status_is_unknown_event() {
    let bytes = SmfBuilder::new(0, 1, 480)
        .track(
            TrackBuilder::new()
                .note_on(0, 60, 100)
                // running status note on
                .event(0, &[64, 100])
                .end_of_track(0),
        )
        .build();

    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::UnknownEventType(64));
    // header (14) + track header (8) + first event (4) + delta (1)
    assert_eq!(err.position(), 27);
}

#[test]
fn meta_length_crossing_chunk_end_is_malformed() {
    let next_track = TrackBuilder::new().end_of_track(0);
    let bytes = SmfBuilder::new(1, 2, 480)
        // text event claims 10 bytes, the chunk holds 2
        .chunk(b"MTrk", &[0x00, 0xFF, 0x01, 0x0A, b'h', b'i'])
        .track(next_track)
        .build();

    let err = decode(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::MalformedFile(TrackError::Overrun {
            chunk_end: 28,
            required: 36
        })
    );
}

#[test]
fn malformed_track_fails_the_whole_decode() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(
            TrackBuilder::new()
                .note_on(0, 60, 100)
                .note_off(480, 60)
                .end_of_track(0),
        )
        .chunk(b"MTrk", &[0x00, 0xFF, 0x51, 0x02, 0x07, 0xA1])
        .build();

    let err = decode(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::MalformedFile(TrackError::InvalidTempoLength(2))
    );
}

#[test]
fn release_in_later_track_pairs_with_earlier_press() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(TrackBuilder::new().note_on(240, 60, 100).end_of_track(0))
        .track(TrackBuilder::new().note_off(720, 60).end_of_track(0))
        .build();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(
        decoded.score().to_vec(),
        vec![ScoreEvent::new(1, 240, 60, 100, 480)]
    );
    assert_eq!(decoded.unreleased_notes(), 0);
}

#[test]
fn release_before_pending_onset_is_ignored() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(TrackBuilder::new().note_on(1000, 60, 100))
        .track(TrackBuilder::new().note_off(10, 60).note_off(990, 60))
        .build();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(
        decoded.score().to_vec(),
        vec![ScoreEvent::new(1, 1000, 60, 100, 0)]
    );
    assert_eq!(decoded.unreleased_notes(), 0);
}

#[test]
fn early_release_leaves_press_pending() {
    let bytes = SmfBuilder::new(1, 2, 480)
        .track(TrackBuilder::new().note_on(1000, 60, 100))
        .track(TrackBuilder::new().note_off(10, 60).end_of_track(0))
        .build();

    let decoded = decode(&bytes).unwrap();
    assert!(decoded.score().is_empty());
    assert_eq!(decoded.unreleased_notes(), 1);
}
