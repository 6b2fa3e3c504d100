use pretty_assertions::assert_eq;
use smf_score::prelude::*;

#[test]
fn read_two_voices() {
    let decoded = decode(include_bytes!("./test-asset/TwoVoices.mid")).unwrap();

    assert_eq!(decoded.header().format(), Some(FormatType::Simultaneous));
    assert_eq!(decoded.number_of_tracks(), 2);
    assert_eq!(decoded.division(), 480);
    assert_eq!(decoded.tempo(), Tempo::new(500_000));
    assert_eq!(decoded.end_of_track(), 1920);
    assert_eq!(decoded.unreleased_notes(), 0);

    assert_eq!(
        decoded.score().to_vec(),
        vec![
            ScoreEvent::new(0, 0, 76, 100, 480),
            ScoreEvent::new(0, 480, 74, 100, 480),
            ScoreEvent::new(0, 960, 72, 100, 480),
            ScoreEvent::new(1, 0, 60, 80, 960),
            ScoreEvent::new(1, 960, 55, 70, 960),
        ]
    );
}

#[test]
fn two_voices_in_seconds() {
    let decoded = decode(include_bytes!("./test-asset/TwoVoices.mid")).unwrap();
    assert_eq!(decoded.duration(), Some(UMicros::from_secs(2)));

    let timed: Vec<(u64, u64)> = decoded
        .timed_notes()
        .map(|note| (note.onset.us(), note.duration.us()))
        .collect();
    assert_eq!(
        timed,
        [
            (0, 500_000),
            (500_000, 500_000),
            (1_000_000, 500_000),
            (0, 1_000_000),
            (1_000_000, 1_000_000),
        ]
    );
}

#[test]
fn read_two_voices_damaged() {
    let mut bytes = include_bytes!("./test-asset/TwoVoices.mid").to_vec();
    // cut the file inside the second track
    bytes.truncate(100);

    let err = decode(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds(), "{err}");
}
