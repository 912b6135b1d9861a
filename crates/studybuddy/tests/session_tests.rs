//! Tests for classmate search and the session proposal workflow.

use availability_engine::{AvailabilityError, Day};
use studybuddy::{
    Proposal, SessionAction, SessionStatus, StoreConfig, StudyBuddy, StudyBuddyError,
};
use tempfile::TempDir;

const ALICE: &str = "alice@clemson.edu";
const BOB: &str = "bob@clemson.edu";
const CAROL: &str = "carol@clemson.edu";
const DAN: &str = "dan@clemson.edu";

/// Alice, Bob and Carol take CPSC 3720; Dan takes MATH 1060 only.
fn classroom() -> (TempDir, StudyBuddy) {
    let dir = TempDir::new().unwrap();
    let app = StudyBuddy::open(&StoreConfig::in_dir(dir.path()));

    for (name, email) in [("Alice", ALICE), ("Bob", BOB), ("Carol", CAROL), ("Dan", DAN)] {
        app.profiles.create_profile(name, email).unwrap();
    }
    for email in [ALICE, BOB, CAROL] {
        app.profiles.add_course(email, "CPSC 3720").unwrap();
    }
    app.profiles.add_course(DAN, "MATH 1060").unwrap();

    app.availability.add_slot(ALICE, "Mon", "09:00", "11:00").unwrap();
    app.availability.add_slot(ALICE, "Wed", "13:00", "17:00").unwrap();
    app.availability.add_slot(BOB, "Mon", "10:00", "12:00").unwrap();
    app.availability.add_slot(CAROL, "Wed", "12:00", "16:00").unwrap();

    (dir, app)
}

fn proposal<'a>(day: &'a str, start: &'a str, end: &'a str) -> Proposal<'a> {
    Proposal {
        requester: ALICE,
        invitee: BOB,
        course: "cpsc3720",
        day,
        start,
        end,
        message: None,
    }
}

// ── Search ──────────────────────────────────────────────────────────────────

#[test]
fn classmates_exclude_requester_and_other_courses() {
    let (_dir, app) = classroom();
    let mates = app.search.classmates_in_course(ALICE, "CPSC3720").unwrap();
    let emails: Vec<&str> = mates.iter().map(|m| m.email.as_str()).collect();
    assert_eq!(emails, vec![BOB, CAROL]);
}

#[test]
fn classmate_search_requires_requester_profile() {
    let (_dir, app) = classroom();
    let err = app
        .search
        .classmates_in_course("ghost@clemson.edu", "CPSC 3720")
        .unwrap_err();
    assert!(matches!(err, StudyBuddyError::NotFound(_)));
}

#[test]
fn classmates_with_availability_include_weekly_view() {
    let (_dir, app) = classroom();
    let mates = app.search.classmates_with_availability(ALICE, "CPSC 3720").unwrap();
    assert_eq!(mates[0].name, "Bob");
    assert_eq!(mates[0].availability.len(), 7);
    assert_eq!(
        mates[0].availability[&Day::Mon],
        vec![("10:00 AM".to_string(), "12:00 PM".to_string())]
    );
}

#[test]
fn overlap_ranks_classmates_by_shared_minutes() {
    let (_dir, app) = classroom();
    let overlaps = app.search.overlap_with_classmates(ALICE, "CPSC 3720").unwrap();

    // Carol shares Wed 13:00-16:00 (180), Bob shares Mon 10:00-11:00 (60).
    assert_eq!(overlaps.len(), 2);
    assert_eq!(overlaps[0].email, CAROL);
    assert_eq!(overlaps[0].total_minutes, 180);
    assert_eq!(overlaps[1].email, BOB);
    assert_eq!(overlaps[1].total_minutes, 60);

    let bob_mon = &overlaps[1].overlaps[&Day::Mon];
    assert_eq!(bob_mon.len(), 1);
    assert_eq!(bob_mon[0].start, "10:00 AM");
    assert_eq!(bob_mon[0].end, "11:00 AM");
    assert_eq!(bob_mon[0].minutes, 60);
    assert!(!overlaps[1].overlaps.contains_key(&Day::Wed));
}

#[test]
fn classmate_without_overlap_is_listed_with_zero() {
    let (_dir, app) = classroom();
    app.profiles.create_profile("Erin", "erin@clemson.edu").unwrap();
    app.profiles.add_course("erin@clemson.edu", "CPSC 3720").unwrap();

    let overlaps = app.search.overlap_with_classmates(ALICE, "CPSC 3720").unwrap();
    let erin = overlaps.last().unwrap();
    assert_eq!(erin.email, "erin@clemson.edu");
    assert_eq!(erin.total_minutes, 0);
    assert!(erin.overlaps.is_empty());
}

// ── Propose ─────────────────────────────────────────────────────────────────

#[test]
fn propose_inside_both_windows_creates_pending_session() {
    let (_dir, app) = classroom();
    let session = app
        .sessions
        .propose(&Proposal {
            message: Some("Exam review"),
            ..proposal("monday", "10am", "10:45")
        })
        .unwrap();

    assert_eq!(session.id, 1);
    assert_eq!(session.course, "CPSC 3720");
    assert_eq!(session.day, Day::Mon);
    assert_eq!(session.start.to_string(), "10:00");
    assert_eq!(session.end.to_string(), "10:45");
    assert_eq!(session.status, SessionStatus::Pending);
    assert_eq!(session.message.as_deref(), Some("Exam review"));
    assert!(session.created_at.is_some());

    let second = app.sessions.propose(&proposal("Mon", "10:00", "11:00")).unwrap();
    assert_eq!(second.id, 2);
}

#[test]
fn propose_rejects_window_outside_invitee_availability() {
    let (_dir, app) = classroom();
    let err = app.sessions.propose(&proposal("Mon", "09:00", "10:00")).unwrap_err();
    assert_eq!(err.to_string(), "Invitee not available for entire window");
    assert!(matches!(
        err,
        StudyBuddyError::Availability(AvailabilityError::Range(_))
    ));
}

#[test]
fn propose_rejects_window_outside_requester_availability() {
    let (_dir, app) = classroom();
    let err = app.sessions.propose(&proposal("Mon", "10:30", "11:30")).unwrap_err();
    assert_eq!(err.to_string(), "Requester not available for entire window");
}

#[test]
fn propose_rejects_window_straddling_a_gap() {
    let (_dir, app) = classroom();
    app.availability.add_slot(ALICE, "Fri", "09:00", "10:00").unwrap();
    app.availability.add_slot(ALICE, "Fri", "10:30", "12:00").unwrap();
    app.availability.add_slot(BOB, "Fri", "08:00", "12:00").unwrap();

    let err = app.sessions.propose(&proposal("Fri", "09:30", "11:00")).unwrap_err();
    assert_eq!(err.to_string(), "Requester not available for entire window");
}

#[test]
fn propose_identity_and_enrollment_checks() {
    let (_dir, app) = classroom();

    let err = app
        .sessions
        .propose(&Proposal { invitee: "ALICE@clemson.edu", ..proposal("Mon", "10:00", "11:00") })
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot invite yourself");

    let err = app
        .sessions
        .propose(&Proposal { invitee: "ghost@clemson.edu", ..proposal("Mon", "10:00", "11:00") })
        .unwrap_err();
    assert!(matches!(err, StudyBuddyError::NotFound(_)));

    let err = app
        .sessions
        .propose(&Proposal { invitee: DAN, ..proposal("Mon", "10:00", "11:00") })
        .unwrap_err();
    assert_eq!(err.to_string(), "Both users must be enrolled in the course");
}

#[test]
fn propose_rejects_bad_times() {
    let (_dir, app) = classroom();
    let err = app.sessions.propose(&proposal("Mon", "11:00", "10:00")).unwrap_err();
    assert!(matches!(
        err,
        StudyBuddyError::Availability(AvailabilityError::Range(_))
    ));
    let err = app.sessions.propose(&proposal("Mon", "10", "11pmx")).unwrap_err();
    assert!(matches!(
        err,
        StudyBuddyError::Availability(AvailabilityError::Format(_))
    ));
}

// ── Respond and list ────────────────────────────────────────────────────────

#[test]
fn invitee_accepts_and_session_is_confirmed_for_both() {
    let (_dir, app) = classroom();
    let session = app.sessions.propose(&proposal("Mon", "10:00", "11:00")).unwrap();

    assert_eq!(app.sessions.incoming_requests(BOB).unwrap().len(), 1);
    assert_eq!(app.sessions.outgoing_requests(ALICE).unwrap().len(), 1);
    assert!(app.sessions.incoming_requests(ALICE).unwrap().is_empty());

    let accepted = app
        .sessions
        .respond(session.id, "BOB@clemson.edu", SessionAction::Accept)
        .unwrap();
    assert_eq!(accepted.status, SessionStatus::Accepted);

    assert!(app.sessions.incoming_requests(BOB).unwrap().is_empty());
    assert_eq!(app.sessions.confirmed_sessions(ALICE).unwrap().len(), 1);
    assert_eq!(app.sessions.confirmed_sessions(BOB).unwrap().len(), 1);
    assert!(app.sessions.confirmed_sessions(CAROL).unwrap().is_empty());
}

#[test]
fn padded_addresses_find_the_same_sessions() {
    let (_dir, app) = classroom();
    let session = app
        .sessions
        .propose(&Proposal { invitee: " BOB@clemson.edu ", ..proposal("Mon", "10:00", "11:00") })
        .unwrap();
    assert_eq!(session.invitee, BOB);

    assert_eq!(app.sessions.incoming_requests(" bob@clemson.edu ").unwrap().len(), 1);
    assert_eq!(app.sessions.outgoing_requests(" Alice@clemson.edu").unwrap().len(), 1);

    app.sessions
        .respond(session.id, " bob@clemson.edu ", SessionAction::Accept)
        .unwrap();
    assert!(app.sessions.incoming_requests(" bob@clemson.edu ").unwrap().is_empty());
    assert_eq!(app.sessions.confirmed_sessions(" BOB@clemson.edu ").unwrap().len(), 1);
    assert_eq!(app.sessions.confirmed_sessions("alice@clemson.edu\t").unwrap().len(), 1);
}

#[test]
fn declined_session_is_not_confirmed() {
    let (_dir, app) = classroom();
    let session = app.sessions.propose(&proposal("Mon", "10:00", "11:00")).unwrap();
    let declined = app
        .sessions
        .respond(session.id, BOB, "DECLINE".parse().unwrap())
        .unwrap();
    assert_eq!(declined.status, SessionStatus::Declined);
    assert!(app.sessions.confirmed_sessions(ALICE).unwrap().is_empty());
}

#[test]
fn only_invitee_can_respond_and_only_once() {
    let (_dir, app) = classroom();
    let session = app.sessions.propose(&proposal("Mon", "10:00", "11:00")).unwrap();

    let err = app.sessions.respond(session.id, ALICE, SessionAction::Accept).unwrap_err();
    assert_eq!(err.to_string(), "Only invitee can respond");

    app.sessions.respond(session.id, BOB, SessionAction::Accept).unwrap();
    let err = app.sessions.respond(session.id, BOB, SessionAction::Decline).unwrap_err();
    assert_eq!(err.to_string(), "Session already finalized");

    let err = app.sessions.respond(99, BOB, SessionAction::Accept).unwrap_err();
    assert!(matches!(err, StudyBuddyError::NotFound(_)));
}

#[test]
fn acceptance_is_not_rechecked_against_availability() {
    let (_dir, app) = classroom();
    let session = app.sessions.propose(&proposal("Mon", "10:00", "11:00")).unwrap();

    // Bob's Monday block goes away after the proposal.
    app.availability.remove_slot(BOB, 1).unwrap();

    let accepted = app.sessions.respond(session.id, BOB, SessionAction::Accept).unwrap();
    assert_eq!(accepted.status, SessionStatus::Accepted);
}

#[test]
fn unknown_action_is_rejected() {
    assert!("maybe".parse::<SessionAction>().is_err());
    assert_eq!(" Accept ".parse::<SessionAction>().unwrap(), SessionAction::Accept);
}
