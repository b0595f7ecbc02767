use std::sync::Arc;

use vrinput_core::{
    catalog::{Catalog, InputSources},
    manifest::ActionManifest,
    scheduler::{ActiveSetScheduler, UpdateOutcome},
    types::{
        action_set::Slot,
        boundary::InputBoundary,
        input_source::InputSource,
        record::{ActiveRecord, RECORD_SIZE},
        ActionSetHandle, InputError, InputSourceHandle,
    },
};

#[derive(Debug, Default)]
struct Recorder(Vec<Vec<ActiveRecord>>);

impl InputBoundary for Recorder {
    fn update_action_state(
        &mut self,
        records: &[ActiveRecord],
        record_size: u32,
    ) -> Result<(), InputError> {
        assert_eq!(record_size, RECORD_SIZE);
        assert!(records
            .windows(2)
            .all(|pair| pair[0].priority <= pair[1].priority));
        self.0.push(records.to_vec());
        Ok(())
    }
}

fn record(set: u64, priority: i32, source: u64) -> ActiveRecord {
    ActiveRecord::new(ActionSetHandle(set), priority, InputSourceHandle(source))
}

#[test]
fn default_and_combat() {
    let manifest = ActionManifest::from_json(
        r#"{
            "action_sets": [
                { "name": "/actions/default", "usage": "leftright" },
                { "name": "/actions/combat", "usage": "single" }
            ],
            "actions": []
        }"#,
    )
    .unwrap();
    let sources = InputSources::new(|path| match path {
        "/user/hand/left" => Ok(InputSourceHandle(1)),
        "/user/hand/right" => Ok(InputSourceHandle(2)),
        _ => Err(InputError::NameNotFound),
    })
    .unwrap();
    let catalog = Catalog::from_manifest(&manifest, sources, |path| match path {
        "/actions/default" => Ok(ActionSetHandle(10)),
        "/actions/combat" => Ok(ActionSetHandle(20)),
        _ => Err(InputError::NameNotFound),
    })
    .unwrap();

    let default = catalog.find("default").unwrap();
    let combat = catalog.find("/actions/combat").unwrap();

    let mut scheduler = ActiveSetScheduler::new(Arc::new(catalog), Recorder::default());

    scheduler.activate(default, InputSource::Any, 0, Slot::Primary, false);
    assert_eq!(scheduler.update(1, false), UpdateOutcome::Submitted { count: 1 });
    assert_eq!(scheduler.submission_buffer(), [record(10, 0, 0)]);
    assert_eq!(scheduler.boundary().0.len(), 1);

    scheduler.activate(combat, InputSource::LeftHand, 5, Slot::Primary, false);
    assert_eq!(scheduler.update(1, false), UpdateOutcome::SkippedSameFrame);
    assert_eq!(scheduler.boundary().0.len(), 1);

    assert_eq!(scheduler.update(1, true), UpdateOutcome::Submitted { count: 2 });
    assert_eq!(
        scheduler.submission_buffer(),
        [record(10, 0, 0), record(20, 5, 1)]
    );
    assert_eq!(scheduler.boundary().0.len(), 2);
    assert_eq!(scheduler.debug_text(), "0\tAny\tdefault\n5\tLeftHand\tcombat");
}

#[test]
fn through_a_borrowed_boundary() {
    let mut builder = Catalog::builder(
        InputSources::from_handles(InputSourceHandle(1), InputSourceHandle(2)).unwrap(),
    );
    let a = builder
        .add("/actions/a", Default::default(), ActionSetHandle(5))
        .unwrap();
    let b = builder
        .add("/actions/b", Default::default(), ActionSetHandle(6))
        .unwrap();

    let mut recorder = Recorder::default();
    {
        let mut scheduler = ActiveSetScheduler::new(Arc::new(builder.build()), &mut recorder);
        scheduler.activate(a, InputSource::RightHand, 5, Slot::Primary, false);
        scheduler.activate(b, InputSource::Any, 1, Slot::Secondary, false);
        scheduler.update(0, false);
        scheduler.activate(a, InputSource::Any, 1, Slot::Primary, true);
        scheduler.update(1, false);
    }

    assert_eq!(
        recorder.0,
        [
            vec![record(6, 1, 0), record(5, 5, 2)],
            vec![record(5, 1, 0)]
        ]
    );
}
