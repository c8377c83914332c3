//! Behavioural tests for the story-lifecycle translator.
//!
//! Each test replays the event stream a runner would emit for one story
//! fixture and asserts on the records the sink received.

#![expect(
    clippy::indexing_slicing,
    reason = "tests index into collections they just sized"
)]

use casefile::test_support::{RunReport, observe};
use casefile_model::{Stage, Status, StatusDetails, StepRecord, TestRecord};
use casefile_stories::{StepFailure, StoryEvent, StoryTranslator};
use chrono::Utc;
use rstest::rstest;

fn story_started(name: &str) -> StoryEvent {
    StoryEvent::StoryStarted {
        name: name.to_owned(),
        description: None,
        given_story: false,
    }
}

fn scenario_started(title: &str) -> StoryEvent {
    StoryEvent::ScenarioStarted {
        title: title.to_owned(),
        example_count: 0,
    }
}

fn passed_step(translator: &mut StoryTranslator, text: &str) {
    translator.handle(StoryEvent::StepStarted {
        text: text.to_owned(),
    });
    translator.handle(StoryEvent::StepSucceeded {
        text: text.to_owned(),
    });
}

fn failed_step(translator: &mut StoryTranslator, text: &str, failure: StepFailure) {
    translator.handle(StoryEvent::StepStarted {
        text: text.to_owned(),
    });
    translator.handle(StoryEvent::StepFailed {
        text: text.to_owned(),
        failure,
    });
}

/// `simple.story`: one scenario, three passing steps.
fn run_simple_story(translator: &mut StoryTranslator) {
    translator.handle(story_started("simple.story"));
    translator.handle(scenario_started("Add a to b"));
    passed_step(translator, "Given a is 5");
    passed_step(translator, "When I add a to b");
    passed_step(translator, "Then result is 15");
    translator.handle(StoryEvent::ScenarioFinished);
    translator.handle(StoryEvent::StoryFinished { given_story: false });
}

fn simple_story_report() -> RunReport {
    observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        run_simple_story(&mut translator);
    })
}

#[test]
fn sets_scenario_name() {
    let report = simple_story_report();
    let names: Vec<&str> = report.test_records().iter().map(TestRecord::name).collect();
    assert_eq!(names, vec!["Add a to b"]);
}

#[test]
fn sets_full_name_from_story_and_scenario() {
    let report = simple_story_report();
    assert_eq!(
        report.test_records()[0].full_name(),
        "simple.story: Add a to b"
    );
}

#[test]
fn sets_passed_status() {
    let report = simple_story_report();
    assert_eq!(report.test_records()[0].status(), Some(Status::Passed));
}

#[test]
fn sets_finished_stage() {
    let report = simple_story_report();
    assert_eq!(report.test_records()[0].stage(), Stage::Finished);
}

#[test]
fn stamps_start_and_stop_within_the_run_window() {
    let before = Utc::now().timestamp_millis();
    let report = simple_story_report();
    let after = Utc::now().timestamp_millis();

    let record = &report.test_records()[0];
    assert!(record.start().is_some_and(|v| v >= before && v <= after));
    assert!(record.stop().is_some_and(|v| v >= before && v <= after));
    assert!(record.start() <= record.stop());
}

/// `long.story`: step seven fails, the rest of the scenario never runs.
#[test]
fn keeps_not_performed_steps_unset_in_declared_order() {
    let report = observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        translator.handle(story_started("long.story"));
        translator.handle(scenario_started("Add a to b twice"));
        passed_step(&mut translator, "Given a is 5");
        passed_step(&mut translator, "And b is 10");
        passed_step(&mut translator, "When I add a to b");
        passed_step(&mut translator, "Then result is 15");
        passed_step(&mut translator, "Then result is 15");
        passed_step(&mut translator, "When I add a to b");
        failed_step(
            &mut translator,
            "Then result is 20",
            StepFailure::assertion("expected: <20> but was: <25>"),
        );
        for text in [
            "Then result is 21",
            "Then result is 22",
            "Then result is 23",
            "When I add a to b",
            "Then result is 25",
        ] {
            translator.handle(StoryEvent::StepNotPerformed {
                text: text.to_owned(),
            });
        }
        translator.handle(StoryEvent::ScenarioFinished);
        translator.handle(StoryEvent::StoryFinished { given_story: false });
    });

    let steps: Vec<(&str, Option<Status>)> = report.test_records()[0]
        .steps()
        .iter()
        .map(|step| (step.name(), step.status()))
        .collect();
    assert_eq!(
        steps,
        vec![
            ("Given a is 5", Some(Status::Passed)),
            ("And b is 10", Some(Status::Passed)),
            ("When I add a to b", Some(Status::Passed)),
            ("Then result is 15", Some(Status::Passed)),
            ("Then result is 15", Some(Status::Passed)),
            ("When I add a to b", Some(Status::Passed)),
            ("Then result is 20", Some(Status::Failed)),
            ("Then result is 21", None),
            ("Then result is 22", None),
            ("Then result is 23", None),
            ("When I add a to b", None),
            ("Then result is 25", None),
        ]
    );
}

/// `failed.story`: an assertion mismatch fails the scenario.
#[test]
fn failed_assertion_sets_failed_status_with_details() {
    let report = observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        translator.handle(story_started("failed.story"));
        translator.handle(scenario_started("Add a to b"));
        passed_step(&mut translator, "Given a is 5");
        passed_step(&mut translator, "When I add a to b");
        failed_step(
            &mut translator,
            "Then result is 15",
            StepFailure::assertion("expected: <15> but was: <123>"),
        );
        translator.handle(StoryEvent::ScenarioFinished);
        translator.handle(StoryEvent::StoryFinished { given_story: false });
    });

    let record = &report.test_records()[0];
    assert_eq!(record.status(), Some(Status::Failed));
    assert_eq!(
        record.status_details().and_then(StatusDetails::message),
        Some("expected: <15> but was: <123>")
    );
}

/// `broken.story`: an unexpected error breaks the scenario.
#[test]
fn unexpected_error_sets_broken_status() {
    let report = observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        translator.handle(story_started("broken.story"));
        translator.handle(scenario_started("Divide a by zero"));
        passed_step(&mut translator, "Given a is 5");
        failed_step(
            &mut translator,
            "When I divide a by zero",
            StepFailure::error("ArithmeticException: / by zero"),
        );
        translator.handle(StoryEvent::ScenarioFinished);
        translator.handle(StoryEvent::StoryFinished { given_story: false });
    });

    let record = &report.test_records()[0];
    assert_eq!(record.status(), Some(Status::Broken));
    assert_eq!(
        record.status_details().and_then(StatusDetails::message),
        Some("ArithmeticException: / by zero")
    );
}

/// `description.story`: the story narrative lands on every scenario.
#[test]
fn story_description_is_copied_to_each_scenario() {
    let description =
        "This is description for current story.\nIt should appear on each scenario in report";
    let report = observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        translator.handle(StoryEvent::StoryStarted {
            name: "description.story".to_owned(),
            description: Some(description.to_owned()),
            given_story: false,
        });
        for title in ["First", "Second"] {
            translator.handle(scenario_started(title));
            passed_step(&mut translator, "Given a is 5");
            translator.handle(StoryEvent::ScenarioFinished);
        }
        translator.handle(StoryEvent::StoryFinished { given_story: false });
    });

    let descriptions: Vec<Option<&str>> = report
        .test_records()
        .iter()
        .map(TestRecord::description)
        .collect();
    assert_eq!(descriptions, vec![Some(description), Some(description)]);
}

/// `comment.story`: comment lines surface as no step and no failure.
#[test]
fn comment_lines_are_ignored() {
    let report = observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        translator.handle(story_started("comment.story"));
        translator.handle(scenario_started("Add a to b"));
        translator.handle(StoryEvent::Comment {
            text: "!-- Just a comment".to_owned(),
        });
        passed_step(&mut translator, "Given a is 5");
        translator.handle(StoryEvent::Comment {
            text: "!-- Another comment".to_owned(),
        });
        passed_step(&mut translator, "When I add a to b");
        passed_step(&mut translator, "Then result is 15");
        translator.handle(StoryEvent::ScenarioFinished);
        translator.handle(StoryEvent::StoryFinished { given_story: false });
    });

    let record = &report.test_records()[0];
    assert_eq!(record.name(), "Add a to b");
    assert_eq!(record.status(), Some(Status::Passed));
    assert_eq!(record.steps().len(), 3);
}

/// `undefined.story`: a step with no definition leaves the verdict unset.
#[test]
fn undefined_step_leaves_status_unset() {
    let report = observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        translator.handle(story_started("undefined.story"));
        translator.handle(scenario_started("Step is not implemented"));
        translator.handle(StoryEvent::StepPending {
            text: "Given some undefined step".to_owned(),
        });
        translator.handle(StoryEvent::ScenarioFinished);
        translator.handle(StoryEvent::StoryFinished { given_story: false });
    });

    let record = &report.test_records()[0];
    assert_eq!(record.name(), "Step is not implemented");
    assert_eq!(record.status(), None);
    assert_eq!(record.steps()[0].status(), None);
}

/// `examples.story`: one record per example row, each with its own
/// parameters.
#[test]
fn example_rows_become_independent_records() {
    let rows = [
        [("a", "1"), ("b", "3"), ("result", "4")],
        [("a", "2"), ("b", "4"), ("result", "6")],
    ];
    let report = observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        translator.handle(story_started("examples.story"));
        translator.handle(StoryEvent::ScenarioStarted {
            title: "Add a to b".to_owned(),
            example_count: rows.len(),
        });
        for (index, row) in rows.iter().enumerate() {
            translator.handle(StoryEvent::ExampleStarted {
                index,
                row: row
                    .iter()
                    .map(|&(name, value)| (name.to_owned(), value.to_owned()))
                    .collect(),
            });
            passed_step(&mut translator, "Given a is <a>");
            passed_step(&mut translator, "When I add b <b>");
            passed_step(&mut translator, "Then result is <result>");
        }
        translator.handle(StoryEvent::ScenarioFinished);
        translator.handle(StoryEvent::StoryFinished { given_story: false });
    });

    assert_eq!(report.test_records().len(), 2);
    for (record, row) in report.test_records().iter().zip(rows) {
        let parameters: Vec<(&str, &str)> = record
            .parameters()
            .iter()
            .map(|parameter| (parameter.name(), parameter.value()))
            .collect();
        assert_eq!(parameters, row);
        assert_eq!(record.full_name(), "examples.story: Add a to b");
        assert_eq!(record.status(), Some(Status::Passed));
    }
    assert_eq!(report.test_records()[0].name(), "Add a to b #1");
    assert_eq!(report.test_records()[1].name(), "Add a to b #2");
}

/// A plain scenario records no parameters even when its steps use
/// placeholder-style text.
#[test]
fn scenario_outside_example_rows_records_no_parameters() {
    let report = simple_story_report();
    assert!(report.test_records()[0].parameters().is_empty());
}

/// `multiply.story`: several scenarios in one story each get a record.
#[rstest]
#[case(&["First"])]
#[case(&["First", "Second", "Third"])]
fn each_scenario_gets_its_own_record(#[case] titles: &[&str]) {
    let report = observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        translator.handle(story_started("multiply.story"));
        for &title in titles {
            translator.handle(scenario_started(title));
            passed_step(&mut translator, "Given a is 5");
            translator.handle(StoryEvent::ScenarioFinished);
        }
        translator.handle(StoryEvent::StoryFinished { given_story: false });
    });

    let summaries: Vec<(&str, String, Option<Status>)> = report
        .test_records()
        .iter()
        .map(|record| (record.name(), record.full_name().to_owned(), record.status()))
        .collect();
    let expected: Vec<(&str, String, Option<Status>)> = titles
        .iter()
        .map(|&title| {
            (
                title,
                format!("multiply.story: {title}"),
                Some(Status::Passed),
            )
        })
        .collect();
    assert_eq!(summaries, expected);
}

/// `given.story`: steps from the included story precede the importing
/// scenario's own steps inside one record.
#[test]
fn given_story_steps_merge_into_the_importing_record() {
    let report = observe(|recorder| {
        let mut translator = StoryTranslator::new(recorder.clone());
        translator.handle(story_started("given.story"));
        translator.handle(scenario_started("Add a to b"));

        // The runner executes the given story before the scenario's own
        // steps, wrapped in its own story and scenario boundaries.
        translator.handle(StoryEvent::StoryStarted {
            name: "precondition.story".to_owned(),
            description: None,
            given_story: true,
        });
        translator.handle(scenario_started("Set up operands"));
        passed_step(&mut translator, "Given a is 5");
        passed_step(&mut translator, "Given b is 10");
        translator.handle(StoryEvent::ScenarioFinished);
        translator.handle(StoryEvent::StoryFinished { given_story: true });

        passed_step(&mut translator, "When I add a to b");
        passed_step(&mut translator, "Then result is 15");
        translator.handle(StoryEvent::ScenarioFinished);
        translator.handle(StoryEvent::StoryFinished { given_story: false });
    });

    let records = report.test_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "Add a to b");
    assert_eq!(records[0].status(), Some(Status::Passed));

    let steps: Vec<&str> = records[0].steps().iter().map(StepRecord::name).collect();
    assert_eq!(
        steps,
        vec![
            "Given a is 5",
            "Given b is 10",
            "When I add a to b",
            "Then result is 15",
        ]
    );
}
