use nostalgia_core::content::{meme_sources, timeline_2011};
use nostalgia_core::{
    Edge, ItemKind, MemeSource, Point, RecordingStage, ScriptedRandom, Spawner, SpawnerConfig,
    Stage, StageEvent, TimelineItem, Viewport, Visual,
};

const VIEW: Viewport = Viewport {
    width: 1024.0,
    height: 768.0,
};

fn item(id: u32, title: &str) -> TimelineItem {
    TimelineItem {
        id,
        date: None,
        title: title.to_string(),
        text: None,
        kind: ItemKind::Event,
        mood: None,
        source: None,
        location: None,
        act: None,
    }
}

fn zero_spawner(
    timeline: Vec<TimelineItem>,
    memes: Vec<MemeSource>,
) -> Spawner<ScriptedRandom> {
    Spawner::new(
        SpawnerConfig::default(),
        timeline,
        memes,
        ScriptedRandom::constant(0.0),
    )
}

fn mounted_titles(stage: &RecordingStage) -> Vec<String> {
    stage
        .mounted()
        .map(|(_, visual)| match visual {
            Visual::Event { title, .. } | Visual::Headline { title, .. } => title.clone(),
            Visual::Quote { line, .. } => line.clone(),
            Visual::Meme { alt, .. } => format!("meme:{alt}"),
        })
        .collect()
}

fn run(
    spawner: &mut Spawner<ScriptedRandom>,
    stage: &mut RecordingStage,
    from_ms: f64,
    until_ms: f64,
) {
    let mut now = from_ms;
    while now <= until_ms {
        spawner.tick(now, stage);
        now += 100.0;
    }
}

#[test]
fn four_spawns_over_three_items_wrap_to_the_first() {
    let mut spawner = zero_spawner(vec![item(1, "A"), item(2, "B"), item(3, "C")], Vec::new());
    let mut stage = RecordingStage::new(VIEW);

    for step in 0..4 {
        assert!(spawner.spawn_next(step as f64, &mut stage).is_some());
    }

    assert_eq!(mounted_titles(&stage), ["A", "B", "C", "A"]);
    assert_eq!(spawner.cursor().index(), 1);
}

#[test]
fn n_plus_one_spawns_return_to_the_first_item() {
    let timeline = timeline_2011();
    let first = timeline[0].title.clone();
    let len = timeline.len();
    let mut spawner = zero_spawner(timeline, Vec::new());
    let mut stage = RecordingStage::new(VIEW);

    for step in 0..=len {
        spawner.spawn_next(step as f64, &mut stage);
    }

    let titles = mounted_titles(&stage);
    assert_eq!(titles.len(), len + 1);
    assert_eq!(titles[len], first);
}

#[test]
fn zero_random_source_pins_path_and_duration() {
    let mut spawner = zero_spawner(vec![item(1, "A")], Vec::new());
    let mut stage = RecordingStage::new(VIEW);

    spawner.spawn_next(0.0, &mut stage);

    let element = &spawner.live()[0];
    assert_eq!(element.duration_ms, 15000.0);
    assert_eq!(element.path.edge, Edge::Top);
    assert_eq!(element.path.start, Point::new(0.0, -100.0));
    assert_eq!(element.path.end, Point::new(0.0, VIEW.height + 100.0));

    match &stage.events()[0] {
        StageEvent::Mount { frame, .. } => {
            assert_eq!((frame.x, frame.y, frame.opacity), (0.0, -100.0, 0.0));
        }
        other => panic!("expected a mount, got {other:?}"),
    }
}

#[test]
fn empty_timeline_neither_spawns_nor_schedules() {
    let mut spawner = zero_spawner(Vec::new(), Vec::new());
    let mut stage = RecordingStage::new(VIEW);

    assert!(spawner.spawn_next(0.0, &mut stage).is_none());
    spawner.start(0.0);
    run(&mut spawner, &mut stage, 0.0, 20_000.0);

    assert!(stage.events().is_empty());
    assert_eq!(spawner.stats().timeline_spawned, 0);
}

#[test]
fn empty_meme_set_leaves_the_stage_alone() {
    let mut spawner = zero_spawner(Vec::new(), Vec::new());
    let mut stage = RecordingStage::new(VIEW);

    assert!(spawner.spawn_meme(0.0, &mut stage).is_none());
    assert!(stage.events().is_empty());
    assert_eq!(spawner.meme_period(), None);
}

#[test]
fn nothing_spawns_before_the_start_delay() {
    let mut spawner = zero_spawner(vec![item(1, "A")], meme_sources());
    let mut stage = RecordingStage::new(VIEW);

    spawner.tick(0.0, &mut stage);
    spawner.start(0.0);
    run(&mut spawner, &mut stage, 0.0, 900.0);

    assert!(stage.events().is_empty());
    assert!(!spawner.is_running());
}

#[test]
fn activation_spawns_timeline_and_meme_burst() {
    let memes = meme_sources();
    let first_meme = memes[0].name.clone();
    let mut spawner = zero_spawner(vec![item(1, "A"), item(2, "B")], memes);
    let mut stage = RecordingStage::new(VIEW);

    spawner.start(0.0);
    run(&mut spawner, &mut stage, 0.0, 3000.0);

    // Activation at 1000 ms: timeline now, burst at 1000..=3000, interval of 2000 ms.
    assert_eq!(spawner.meme_period(), Some(2000.0));
    let stats = spawner.stats();
    assert_eq!(stats.timeline_spawned, 1);
    assert_eq!(stats.memes_spawned, 6);

    let titles = mounted_titles(&stage);
    assert_eq!(titles[0], "A");
    assert!(titles[1..].iter().all(|title| *title == format!("meme:{first_meme}")));

    run(&mut spawner, &mut stage, 3100.0, 4000.0);
    assert_eq!(spawner.stats().timeline_spawned, 2);
}

#[test]
fn finished_elements_are_removed_once() {
    let mut spawner = zero_spawner(vec![item(1, "A")], Vec::new());
    let mut stage = RecordingStage::new(VIEW);

    spawner.start(-1000.0);
    spawner.tick(0.0, &mut stage);
    let id = stage.mounted().next().map(|(id, _)| id).expect("timeline item mounted");
    stage.drain();

    let mut now = 250.0;
    while now <= 20_000.0 {
        spawner.tick(now, &mut stage);
        now += 250.0;
    }

    let events: Vec<&StageEvent> = stage
        .events()
        .iter()
        .filter(|event| match event {
            StageEvent::Update { id: other, .. } | StageEvent::Unmount { id: other } => *other == id,
            StageEvent::Mount { .. } => false,
        })
        .collect();

    let unmounts = events
        .iter()
        .filter(|event| matches!(event, StageEvent::Unmount { .. }))
        .count();
    assert_eq!(unmounts, 1);
    assert!(matches!(events.last(), Some(StageEvent::Unmount { .. })));
    assert!(spawner.live().iter().all(|element| element.id != id));
}

#[test]
fn frames_follow_the_opacity_envelope() {
    let mut spawner = zero_spawner(vec![item(1, "A")], Vec::new());
    let mut stage = RecordingStage::new(VIEW);
    spawner.spawn_next(0.0, &mut stage);

    let element = spawner.live()[0].clone();
    let config = spawner.config().clone();

    let mid = element.frame_at(7500.0, &config);
    assert!((mid.opacity - 0.8).abs() < 1e-9);
    assert!((mid.y - (-100.0 + (VIEW.height + 200.0) / 2.0)).abs() < 1e-9);
    assert!(element.frame_at(750.0, &config).opacity < 0.8);
    assert_eq!(element.frame_at(15000.0, &config).opacity, 0.0);
}

#[test]
fn stop_cancels_every_line_and_clears_the_stage() {
    let mut spawner = zero_spawner(vec![item(1, "A"), item(2, "B")], meme_sources());
    let mut stage = RecordingStage::new(VIEW);

    spawner.start(0.0);
    run(&mut spawner, &mut stage, 0.0, 2000.0);
    let live: Vec<u64> = spawner.live().iter().map(|element| element.id).collect();
    assert!(!live.is_empty());
    stage.drain();

    spawner.stop(&mut stage);
    assert!(spawner.is_stopped());
    assert_eq!(spawner.live_count(), 0);
    let unmounted: Vec<u64> = stage
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            StageEvent::Unmount { id } => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(unmounted, live);

    run(&mut spawner, &mut stage, 2100.0, 60_000.0);
    assert!(spawner.spawn_next(60_000.0, &mut stage).is_none());
    assert!(spawner.spawn_meme(60_000.0, &mut stage).is_none());
    assert!(stage.events().is_empty());
}

#[test]
fn spawned_paths_start_and_end_off_screen() {
    let mut spawner = Spawner::new(
        SpawnerConfig::default(),
        timeline_2011(),
        meme_sources(),
        nostalgia_core::FastRandom::with_seed(17),
    );
    let mut stage = RecordingStage::new(VIEW);

    for step in 0..200 {
        spawner.spawn_next(step as f64, &mut stage);
    }

    for element in spawner.live() {
        assert!(element.path.edge.is_beyond(stage.viewport(), element.path.start));
        assert!(element
            .path
            .edge
            .opposite()
            .is_beyond(stage.viewport(), element.path.end));
        assert!(SpawnerConfig::default()
            .flight_duration
            .contains(element.duration_ms));
    }
}
