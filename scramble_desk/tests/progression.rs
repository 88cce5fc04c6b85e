mod common;

use common::*;
use scramble_desk::*;

#[tokio::test]
async fn starts_first_group() {
    let desk = desk(&[true], at(9, 0), FakeResults::default());
    let mut comp = competition();

    let outcome = desk.start_next_group(&mut comp).await.unwrap();
    assert_eq!(outcome, StartOutcome::Started { activity_code: "333-r1-g1".into() });

    let group = &comp.rounds[0].groups[0];
    assert_eq!(group.state(), GroupState::Finished);
    assert!(group.opened);
    assert_eq!(group.opened_timestamps, vec![at(9, 0)]);
    assert!(!comp.rounds[0].finished);
    assert_eq!(desk.operator.prompts.borrow().len(), 1);
    assert_eq!(desk.publisher.calls(), vec![
        "round 333-r1-g1 [Hedda, Gustav, Frida, Erik]".to_string(),
        "scrambles Fixture 2024/333 Round 1 Scramble Set A (333-r1-secret-1)".to_string(),
    ]);
}

#[tokio::test]
async fn declining_changes_nothing() {
    let desk = desk(&[false], at(9, 0), FakeResults::default());
    let mut comp = competition();
    let before = comp.clone();

    assert_eq!(desk.start_next_group(&mut comp).await.unwrap(), StartOutcome::Declined);
    assert_eq!(comp, before);
    assert!(desk.publisher.calls().is_empty());
}

#[tokio::test]
async fn early_start_needs_second_confirmation() {
    let declined = desk(&[true, false], at(8, 0), FakeResults::default());
    let mut comp = competition();
    let before = comp.clone();
    assert_eq!(declined.start_next_group(&mut comp).await.unwrap(), StartOutcome::Declined);
    assert_eq!(comp, before);
    let prompts = declined.operator.prompts.borrow();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("1h 0m"), "{}", prompts[1]);

    let accepted = desk(&[true, true], at(8, 0), FakeResults::default());
    let outcome = accepted.start_next_group(&mut comp).await.unwrap();
    assert_eq!(outcome, StartOutcome::Started { activity_code: "333-r1-g1".into() });
}

#[tokio::test]
async fn slightly_early_start_asks_once() {
    let desk = desk(&[true], at(8, 50), FakeResults::default());
    let mut comp = competition();
    assert!(matches!(desk.start_next_group(&mut comp).await.unwrap(), StartOutcome::Started { .. }));
    assert_eq!(desk.operator.prompts.borrow().len(), 1);
}

#[tokio::test]
async fn last_group_finishes_round() {
    let desk = desk(&[true, true], at(12, 0), FakeResults::default());
    let mut comp = competition();
    desk.start_next_group(&mut comp).await.unwrap();
    assert!(!comp.rounds[0].finished);
    let outcome = desk.start_next_group(&mut comp).await.unwrap();
    assert_eq!(outcome, StartOutcome::Started { activity_code: "333-r1-g2".into() });
    assert!(comp.rounds[0].finished);
    assert_eq!(comp.next_group().unwrap().activity_code, "222-r1-g1");
}

#[tokio::test]
async fn second_round_is_filled_from_results() {
    let desk = desk(&[true], at(11, 0), first_round_results());
    let mut comp = competition();
    comp.start_from("333-r2-g1").unwrap();

    let outcome = desk.start_next_group(&mut comp).await.unwrap();
    assert_eq!(outcome, StartOutcome::Started { activity_code: "333-r2-g1".into() });

    let names = |g: &Group| g.competitors.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
    let groups = &comp.rounds[2].groups;
    assert_eq!(names(&groups[0]), vec!["Carl", "Dina", "Erik"]);
    assert_eq!(names(&groups[1]), vec!["Frida", "Gustav", "Hedda"]);
    assert_eq!(groups[0].staff, groups[1].competitors);
    assert_eq!(groups[1].staff, groups[0].competitors);
    assert!(groups[0].competitors.iter().all(|p| p.assignments.is_empty()));
    assert_eq!(comp.rounds[0].results.len(), 8);
    assert_eq!(desk.publisher.calls()[0], "round 333-r2-g1 [Carl, Dina, Erik]");
}

#[tokio::test]
async fn registry_failure_aborts() {
    let results = FakeResults { unreachable: true, ..FakeResults::default() };
    let desk = desk(&[true], at(11, 0), results);
    let mut comp = competition();
    comp.start_from("333-r2-g1").unwrap();

    assert!(matches!(desk.start_next_group(&mut comp).await, Err(DeskError::ExternalFailure(_))));
    assert!(desk.publisher.calls().is_empty());
}

#[tokio::test]
async fn upload_failure_aborts() {
    let mut desk = desk(&[true], at(9, 0), FakeResults::default());
    desk.publisher.fail_uploads = true;
    let mut comp = competition();
    assert!(matches!(desk.start_next_group(&mut comp).await, Err(DeskError::ExternalFailure(_))));
    assert!(!comp.rounds[0].groups[0].opened);
}

#[tokio::test]
async fn nothing_left_to_start() {
    let desk = desk(&[true], at(9, 0), FakeResults::default());
    let mut comp = competition();
    finish_all(&mut comp);
    let before = comp.clone();

    assert_eq!(desk.start_next_group(&mut comp).await.unwrap(), StartOutcome::NoNewRounds);
    assert_eq!(comp, before);
    assert!(desk.operator.prompts.borrow().is_empty());
    assert!(desk.publisher.calls().is_empty());
}

#[tokio::test]
async fn open_scramble_set_out_of_order() {
    let desk = desk(&[], at(10, 15), FakeResults::default());
    let mut comp = competition();

    desk.open_scramble_set(&mut comp, "222-r1-g1").await.unwrap();
    let group = comp.find_group("222-r1-g1").unwrap();
    assert_eq!(group.state(), GroupState::Open);
    assert_eq!(group.opened_timestamps, vec![at(10, 15)]);
    assert_eq!(comp.next_group().unwrap().activity_code, "333-r1-g1");

    desk.open_scramble_set(&mut comp, "222-r1-g1").await.unwrap();
    assert_eq!(comp.find_group("222-r1-g1").unwrap().opened_timestamps.len(), 2);

    assert!(matches!(desk.open_scramble_set(&mut comp, "444-r1-g1").await, Err(DeskError::NotFound(_))));
}

#[tokio::test]
async fn close_calls_up_next_group() {
    let desk = desk(&[true], at(9, 25), FakeResults::default());
    let mut comp = competition();
    desk.start_next_group(&mut comp).await.unwrap();
    desk.publisher.calls.lock().unwrap().clear();

    let outcome = desk.close_active(&mut comp).await.unwrap();
    assert_eq!(outcome, CloseOutcome::HandIn { activity_code: "333-r1-g2".into() });
    assert_eq!(desk.publisher.calls(), vec!["intermission".to_string(), "hand-in 333-r1-g2".to_string()]);
    let upcoming = &comp.rounds[0].groups[1];
    assert_eq!(upcoming.closed_timestamps, vec![at(9, 25)]);
    assert!(!upcoming.finished);
}

#[tokio::test]
async fn close_before_second_round_assigns_competitors() {
    let desk = desk(&[], at(10, 50), first_round_results());
    let mut comp = competition();
    comp.start_from("333-r2-g1").unwrap();

    desk.close_active(&mut comp).await.unwrap();
    assert_eq!(comp.rounds[2].groups[0].competitors.len(), 3);
    assert!(!comp.rounds[2].groups[0].finished);
}

#[tokio::test]
async fn close_with_nothing_upcoming() {
    let desk = desk(&[], at(15, 0), FakeResults::default());
    let mut comp = competition();
    finish_all(&mut comp);
    assert_eq!(desk.close_active(&mut comp).await.unwrap(), CloseOutcome::Intermission);
    assert_eq!(desk.publisher.calls(), vec!["intermission".to_string()]);
}

#[tokio::test]
async fn runs_through_whole_competition_with_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("competition.json"));
    store.save(&competition()).unwrap();

    let mut started = vec![];
    loop {
        let desk = desk(&[true], at(12, 0), first_round_results());
        let mut comp = store.load().unwrap();
        match desk.start_next_group(&mut comp).await.unwrap() {
            StartOutcome::Started { activity_code } => started.push(activity_code),
            StartOutcome::NoNewRounds => break,
            StartOutcome::Declined => unreachable!(),
        }
        store.save(&comp).unwrap();
    }
    assert_eq!(started, vec!["333-r1-g1", "333-r1-g2", "222-r1-g1", "333-r2-g1", "333-r2-g2"]);

    let comp = store.load().unwrap();
    assert!(comp.rounds.iter().all(|r| r.finished));
    assert!(comp.next_group().is_none());
}
