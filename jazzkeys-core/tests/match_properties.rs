use jazzkeys_core::{classify, required_played, Chord, ChordCatalog, MatchStatus, Note, PlayedSet};

fn chord(notes: &[&str]) -> Chord {
    Chord::from_note_strings("target", notes, vec![]).unwrap()
}

fn played(notes: &[&str]) -> PlayedSet {
    notes.iter().map(|s| s.parse::<Note>().unwrap()).collect()
}

fn names(notes: &[Note]) -> Vec<&'static str> {
    notes.iter().map(|n| n.name()).collect()
}

/// Every subset of the keyboard, toggled in chromatic order
fn all_played_sets() -> impl Iterator<Item = PlayedSet> {
    (0u16..4096).map(|mask| {
        Note::ALL
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, n)| *n)
            .collect()
    })
}

#[test]
fn scenario_a_empty_played_awaits_input() {
    let result = classify(&chord(&["C", "E", "G", "B"]), &played(&[]));
    assert_eq!(result.status, MatchStatus::AwaitingInput);
}

#[test]
fn scenario_b_one_missing_is_close() {
    let result = classify(&chord(&["C", "E", "G", "B"]), &played(&["C", "E", "G"]));
    assert_eq!(names(&result.missing), vec!["B"]);
    assert!(result.extra.is_empty());
    assert_eq!(result.status, MatchStatus::Close);
}

#[test]
fn scenario_c_all_notes_is_exact() {
    let result = classify(&chord(&["C", "E", "G", "B"]), &played(&["C", "E", "G", "B"]));
    assert_eq!(result.status, MatchStatus::ExactMatch);
}

#[test]
fn scenario_d_extra_note_overrides_closeness() {
    let result = classify(
        &chord(&["C", "E", "G", "B"]),
        &played(&["C", "E", "G", "B", "D"]),
    );
    assert_eq!(names(&result.extra), vec!["D"]);
    assert_eq!(result.status, MatchStatus::Mismatch);
}

#[test]
fn scenario_e_three_missing_is_mismatch() {
    let result = classify(&chord(&["D", "F", "A", "C", "E"]), &played(&["D", "F"]));
    assert_eq!(names(&result.missing), vec!["A", "C", "E"]);
    assert_eq!(result.status, MatchStatus::Mismatch);
}

#[test]
fn playing_the_chord_notes_is_always_exact() {
    for target in ChordCatalog::builtin().chords() {
        let p: PlayedSet = target.notes().iter().rev().copied().collect();
        let result = classify(target, &p);
        assert_eq!(result.status, MatchStatus::ExactMatch, "{}", target);
        assert!(result.missing.is_empty() && result.extra.is_empty());
    }
}

#[test]
fn empty_played_always_awaits_input() {
    for target in ChordCatalog::builtin().chords() {
        assert_eq!(
            classify(target, &PlayedSet::new()).status,
            MatchStatus::AwaitingInput
        );
    }
}

#[test]
fn double_toggle_is_idempotent() {
    let target = chord(&["C", "E", "G", "B"]);
    let mut p = played(&["C", "G"]);
    let before = classify(&target, &p);

    for note in Note::ALL {
        p.toggle(note);
        p.toggle(note);
        assert_eq!(classify(&target, &p), before);
    }
}

#[test]
fn adding_a_wrong_note_to_an_exact_match_degrades_to_mismatch() {
    for target in ChordCatalog::builtin().chords() {
        for wrong in Note::ALL.iter().filter(|n| !target.contains(n)) {
            let mut p: PlayedSet = target.notes().iter().copied().collect();
            assert!(classify(target, &p).is_exact());
            p.toggle(*wrong);
            assert_eq!(classify(target, &p).status, MatchStatus::Mismatch);
        }
    }
}

#[test]
fn missing_and_extra_partition_the_inputs() {
    let catalog = ChordCatalog::builtin();
    for target in catalog.chords() {
        for p in all_played_sets() {
            let result = classify(target, &p);
            let hit = required_played(target, &p);

            let mut required: Vec<Note> = result.missing.iter().chain(&hit).copied().collect();
            required.sort();
            let mut expected_required = target.notes().to_vec();
            expected_required.sort();
            assert_eq!(required, expected_required);

            let mut held: Vec<Note> = result.extra.iter().chain(&hit).copied().collect();
            held.sort();
            let mut expected_held = p.as_slice().to_vec();
            expected_held.sort();
            assert_eq!(held, expected_held);
        }
    }
}

#[test]
fn status_follows_precedence_rules() {
    let target = chord(&["D", "F", "A", "C", "E"]);
    for p in all_played_sets() {
        let result = classify(&target, &p);
        let expected = if p.is_empty() {
            MatchStatus::AwaitingInput
        } else if result.missing.is_empty() && result.extra.is_empty() {
            MatchStatus::ExactMatch
        } else if result.extra.is_empty() && result.missing.len() <= 2 {
            MatchStatus::Close
        } else {
            MatchStatus::Mismatch
        };
        assert_eq!(result.status, expected, "played {}", p);
    }
}
