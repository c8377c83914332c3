//! Folds a story's event stream into test records.

use casefile::{Recorder, RecorderError};
use casefile_model::{Parameter, Status, StatusDetails, StepRecord, TestRecord};

use crate::event::{StepFailure, StoryEvent};

struct StoryContext {
    name: String,
    description: Option<String>,
}

struct ScenarioContext {
    title: String,
}

/// Translates story runner events into test records on a [`Recorder`].
///
/// One translator follows one execution context: stories arrive
/// sequentially, and within a story each scenario's events arrive between
/// its `ScenarioStarted` and `ScenarioFinished`. Given-story inclusions are
/// transparent — their step events land in the importing scenario's record,
/// while their story and scenario boundaries are ignored.
///
/// # Examples
///
/// ```
/// use casefile::test_support::observe;
/// use casefile_stories::{StoryEvent, StoryTranslator};
///
/// let report = observe(|recorder| {
///     let mut translator = StoryTranslator::new(recorder.clone());
///     translator.handle(StoryEvent::StoryStarted {
///         name: "simple.story".to_owned(),
///         description: None,
///         given_story: false,
///     });
///     translator.handle(StoryEvent::ScenarioStarted {
///         title: "Add a to b".to_owned(),
///         example_count: 0,
///     });
///     translator.handle(StoryEvent::StepStarted { text: "Given a is 5".to_owned() });
///     translator.handle(StoryEvent::StepSucceeded { text: "Given a is 5".to_owned() });
///     translator.handle(StoryEvent::ScenarioFinished);
///     translator.handle(StoryEvent::StoryFinished { given_story: false });
/// });
/// assert_eq!(report.test_records().len(), 1);
/// assert_eq!(report.test_records()[0].full_name(), "simple.story: Add a to b");
/// ```
pub struct StoryTranslator {
    recorder: Recorder,
    story: Option<StoryContext>,
    scenario: Option<ScenarioContext>,
    given_depth: usize,
}

impl StoryTranslator {
    /// Create a translator recording through the given handle.
    #[must_use]
    pub fn new(recorder: Recorder) -> Self {
        Self {
            recorder,
            story: None,
            scenario: None,
            given_depth: 0,
        }
    }

    /// Apply one runner event to the report.
    ///
    /// Never panics and never surfaces an error: a reporting hiccup must
    /// not abort the story run, so out-of-protocol events and recorder
    /// failures are logged and swallowed.
    pub fn handle(&mut self, event: StoryEvent) {
        match event {
            StoryEvent::StoryStarted {
                name,
                description,
                given_story,
            } => self.on_story_started(name, description, given_story),
            StoryEvent::StoryFinished { given_story } => self.on_story_finished(given_story),
            StoryEvent::ScenarioStarted {
                title,
                example_count,
            } => self.on_scenario_started(title, example_count),
            StoryEvent::ExampleStarted { index, row } => self.on_example_started(index, row),
            StoryEvent::ScenarioFinished => self.on_scenario_finished(),
            StoryEvent::StepStarted { text } => self.on_step_started(text),
            StoryEvent::StepSucceeded { text } => self.on_step_succeeded(&text),
            StoryEvent::StepFailed { text, failure } => self.on_step_failed(&text, failure),
            StoryEvent::StepPending { text } | StoryEvent::StepNotPerformed { text } => {
                self.on_step_unevaluated(text);
            }
            // Lines matching no step signature carry no report content.
            StoryEvent::Comment { .. } => {}
        }
    }

    fn on_story_started(
        &mut self,
        name: String,
        description: Option<String>,
        given_story: bool,
    ) {
        if given_story {
            self.given_depth += 1;
            return;
        }
        self.story = Some(StoryContext { name, description });
    }

    fn on_story_finished(&mut self, given_story: bool) {
        if given_story {
            self.given_depth = self.given_depth.saturating_sub(1);
            return;
        }
        if self.recorder.has_active_test() {
            log::warn!("story finished with an open test record; finishing it");
            self.finish_open_record();
        }
        self.story = None;
        self.scenario = None;
    }

    fn on_scenario_started(&mut self, title: String, example_count: usize) {
        if self.given_depth > 0 {
            return;
        }
        if self.recorder.has_active_test() {
            log::warn!("scenario started before the previous one finished");
            self.finish_open_record();
        }
        // Parameterised scenarios defer to their example rows: each row
        // opens its own record carrying that row's parameters.
        if example_count == 0 {
            self.open_record(&title, &[]);
        }
        self.scenario = Some(ScenarioContext { title });
    }

    fn on_example_started(&mut self, index: usize, row: Vec<(String, String)>) {
        if self.given_depth > 0 {
            return;
        }
        let Some(title) = self.scenario.as_ref().map(|scenario| scenario.title.clone()) else {
            log::warn!("example row {index} started outside a scenario; ignoring");
            return;
        };
        if self.recorder.has_active_test() {
            self.finish_open_record();
        }
        let parameters: Vec<Parameter> = row
            .into_iter()
            .map(|(name, value)| Parameter::new(name, value))
            .collect();
        let label = format!("{title} #{}", index.saturating_add(1));
        self.open_record_named(&label, &title, &parameters);
    }

    fn on_scenario_finished(&mut self) {
        if self.given_depth > 0 {
            return;
        }
        if self.recorder.has_active_test() {
            self.finish_open_record();
        }
        self.scenario = None;
    }

    fn on_step_started(&mut self, text: String) {
        self.report(self.recorder.start_step(StepRecord::new(text)));
    }

    fn on_step_succeeded(&mut self, text: &str) {
        if let Err(error) = self.recorder.resolve_step(Status::Passed, None) {
            log::warn!("could not mark step {text:?} passed: {error}");
        }
    }

    fn on_step_failed(&mut self, text: &str, failure: StepFailure) {
        let status = match failure {
            StepFailure::Assertion { .. } => Status::Failed,
            StepFailure::Error { .. } => Status::Broken,
        };
        let details = StatusDetails::from_message(failure.message());
        if let Err(error) = self.recorder.resolve_step(status, Some(details)) {
            log::warn!("could not mark step {text:?} {status}: {error}");
        }
    }

    // Pending and not-performed steps never started; append them with no
    // verdict so the report keeps the declared order and the meaningful
    // absence of a result.
    fn on_step_unevaluated(&mut self, text: String) {
        self.report(self.recorder.start_step(StepRecord::new(text)));
    }

    fn open_record(&mut self, title: &str, parameters: &[Parameter]) {
        self.open_record_named(title, title, parameters);
    }

    fn open_record_named(&mut self, name: &str, title: &str, parameters: &[Parameter]) {
        let (full_name, description) = self.story.as_ref().map_or_else(
            || {
                log::warn!("scenario {title:?} started outside a story");
                (title.to_owned(), None)
            },
            |story| {
                (
                    format!("{}: {title}", story.name),
                    story.description.clone(),
                )
            },
        );
        let mut record = TestRecord::new(name, full_name);
        if let Some(description) = description {
            record.set_description(description);
        }
        for parameter in parameters {
            record.add_parameter(parameter.clone());
        }
        self.recorder.start_test(record);
    }

    // Scenario verdict: the most severe evaluated step wins, details taken
    // from the first step bearing that verdict. Unevaluated steps carry no
    // verdict and a scenario with none keeps its status unset.
    fn finish_open_record(&mut self) {
        let verdict = self
            .recorder
            .with_current_test(|record| {
                let aggregate = record
                    .steps()
                    .iter()
                    .filter_map(StepRecord::status)
                    .max_by_key(|status| status.severity())?;
                let details = record
                    .steps()
                    .iter()
                    .find(|step| step.status() == Some(aggregate))
                    .and_then(|step| step.status_details().cloned());
                Some((aggregate, details))
            })
            .flatten();
        if let Some((status, details)) = verdict {
            self.report(
                self.recorder
                    .update_test(|record| record.resolve(status, details)),
            );
        }
        self.report(self.recorder.finish_test());
    }

    fn report(&self, result: Result<(), RecorderError>) {
        if let Err(error) = result {
            log::warn!("story translator could not update the report: {error}");
        }
    }
}
