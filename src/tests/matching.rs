use crate::{
    prelude::{
        Constellation, Duration, EphemerisEntry, EphemerisEpoch, EphemerisFile, Error,
        Matcher, MatchingOpts, ObservationEpoch, ObservationFile, Timestamp, TieBreak, SV,
    },
    tests::{init_logger, EPHEMERIS, OBSERVATION},
};

use rstest::*;
use std::str::FromStr;

fn ephemeris_file(minutes: &[u8]) -> EphemerisFile {
    EphemerisFile {
        epochs: minutes
            .iter()
            .map(|minute| EphemerisEpoch::new(Timestamp::new(2022, 1, 5, 10, *minute)))
            .collect(),
        diagnostics: Vec::new(),
    }
}

fn observation_epoch(minute: u8) -> ObservationEpoch {
    ObservationEpoch::new(Timestamp::new(2022, 1, 5, 10, minute))
}

#[rstest]
#[case(30, 30, Some(0.0))]
#[case(30, 15, Some(900.0))]
#[case(30, 14, None)]
#[case(30, 31, None)]
#[case(0, 0, Some(0.0))]
#[case(59, 45, Some(840.0))]
fn ephemeris_age(#[case] observation: u8, #[case] ephemeris: u8, #[case] age_s: Option<f64>) {
    let matcher = Matcher::default();
    let obs_t = Timestamp::new(2022, 1, 5, 10, observation).with_second(42.0);
    let eph_t = Timestamp::new(2022, 1, 5, 10, ephemeris);
    assert_eq!(
        matcher.qualifies(&obs_t, &eph_t),
        age_s.map(Duration::from_seconds)
    );
}

#[rstest]
#[case(Timestamp::new(2022, 1, 5, 9, 55))]
#[case(Timestamp::new(2022, 1, 4, 10, 0))]
#[case(Timestamp::new(2021, 1, 5, 10, 0))]
fn different_hour(#[case] ephemeris: Timestamp) {
    let matcher = Matcher::default();
    let observation = Timestamp::new(2022, 1, 5, 10, 5);
    assert!(matcher.qualifies(&observation, &ephemeris).is_none());
}

#[test]
fn custom_window() {
    let matcher = Matcher::new(&MatchingOpts {
        window: Duration::from_seconds(300.0),
        tie_break: TieBreak::default(),
    });
    let observation = Timestamp::new(2022, 1, 5, 10, 30);
    assert!(matcher
        .qualifies(&observation, &Timestamp::new(2022, 1, 5, 10, 25))
        .is_some());
    assert!(matcher
        .qualifies(&observation, &Timestamp::new(2022, 1, 5, 10, 24))
        .is_none());
}

#[rstest]
#[case(TieBreak::ClosestInTime, 25)]
#[case(TieBreak::FirstEncountered, 18)]
fn tie_break_policy(#[case] tie_break: TieBreak, #[case] expected: u8) {
    let matcher = Matcher::new(&MatchingOpts {
        tie_break,
        ..Default::default()
    });

    let files = [ephemeris_file(&[0, 18, 25]), ephemeris_file(&[20, 31])];
    let selected = matcher.select(&observation_epoch(30), &files).unwrap();
    assert_eq!(selected.timestamp.minute, expected);
}

#[test]
fn equally_aged_epochs() {
    let matcher = Matcher::default();

    let mut first = ephemeris_file(&[15]);
    first.epochs[0]
        .entries
        .push(EphemerisEntry::new(SV::new(Constellation::GPS, 1), (1.0, 2.0, 3.0), 0.0));
    let files = [first, ephemeris_file(&[15])];

    let selected = matcher.select(&observation_epoch(20), &files).unwrap();
    assert_eq!(selected.len(), 1, "first of equally aged epochs should be retained");
}

#[test]
fn no_qualifying_epoch() {
    let matcher = Matcher::default();
    let files = [ephemeris_file(&[45, 50])];
    assert!(matcher.select(&observation_epoch(30), &files).is_none());
    assert!(matcher.select(&observation_epoch(30), &[]).is_none());
}

#[rstest]
#[case("closest", TieBreak::ClosestInTime)]
#[case("Closest-In-Time", TieBreak::ClosestInTime)]
#[case("first", TieBreak::FirstEncountered)]
#[case(" first-encountered ", TieBreak::FirstEncountered)]
fn tie_break_parsing(#[case] content: &str, #[case] expected: TieBreak) {
    assert_eq!(TieBreak::from_str(content).unwrap(), expected);
    assert_eq!(TieBreak::from_str(&expected.to_string()).unwrap(), expected);
}

#[test]
fn tie_break_parsing_error() {
    assert_eq!(
        TieBreak::from_str(" Latest "),
        Err(Error::UnknownTieBreak("latest".to_string()))
    );
}

#[test]
fn matched_pairs() {
    init_logger();

    let observations = ObservationFile::from_str(OBSERVATION).unwrap();
    let ephemeris = EphemerisFile::from_str(EPHEMERIS).unwrap();

    let pairs = Matcher::default().pairs(&observations, &[ephemeris]);

    // 01:05:15 has no ephemeris within the same hour
    assert_eq!(pairs.len(), 2);

    assert_eq!(
        pairs[0].observation.timestamp,
        Timestamp::new(2022, 1, 5, 0, 14).with_second(30.0)
    );
    assert_eq!(pairs[0].ephemeris.timestamp, Timestamp::new(2022, 1, 5, 0, 0));

    // 00:00 is 30' old, only 00:15 qualifies
    assert_eq!(pairs[1].observation.timestamp, Timestamp::new(2022, 1, 5, 0, 30));
    assert_eq!(pairs[1].ephemeris.timestamp, Timestamp::new(2022, 1, 5, 0, 15));
    assert_eq!(pairs[1].ephemeris.len(), 3);
}
