//! Floating element spawner and animator.
//!
//! Three independent timer lines feed one shared [`Stage`]:
//! - the timeline cursor, a timeout that re-arms itself after every spawn;
//! - the meme line, a start-up burst followed by a fixed-period interval;
//! - one frame update per live element on every tick.
//!
//! Each line only touches the elements it created. Time is supplied by the host through
//! [`Spawner::tick`]; every frame is recomputed from absolute elapsed time, so dropped
//! frames only mean fewer visible updates.

use std::collections::VecDeque;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::motion::{self, FloatPath, Frame, Viewport};
use crate::random::RandomSource;
use crate::schedule::RepeatingTask;
use crate::{ItemKind, MemeSource, Mood, SpawnerConfig, TimelineItem};

pub type ElementId = u64;

/// Rendering surface the spawner draws on.
pub trait Stage {
    fn viewport(&self) -> Viewport;
    fn mount(&mut self, id: ElementId, visual: &Visual, frame: Frame);
    fn update(&mut self, id: ElementId, frame: Frame);
    fn unmount(&mut self, id: ElementId);
}

/// What a floating element shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visual {
    Headline {
        date_label: Option<String>,
        title: String,
        subtext: Option<String>,
        mood: Option<Mood>,
    },
    Quote {
        line: String,
        context: Option<String>,
        source: Option<String>,
        mood: Option<Mood>,
    },
    Meme {
        url: String,
        alt: String,
        size: u32,
        is_gif: bool,
    },
    Event {
        title: String,
        mood: Option<Mood>,
    },
}

impl Visual {
    /// Timeline memes carry no image, so they fall back to the event pill.
    pub fn from_item(item: &TimelineItem) -> Self {
        match item.kind {
            ItemKind::Headline => Visual::Headline {
                date_label: item.date_label(),
                title: item.title.clone(),
                subtext: item.text.clone(),
                mood: item.mood,
            },
            ItemKind::Quote => Visual::Quote {
                line: item.title.clone(),
                context: item.text.clone(),
                source: item.source.clone(),
                mood: item.mood,
            },
            ItemKind::Meme | ItemKind::Event => Visual::Event {
                title: item.title.clone(),
                mood: item.mood,
            },
        }
    }

    /// `None` when the meme has no usable image URL.
    pub fn from_meme(meme: &MemeSource) -> Option<Self> {
        let url = meme.url.trim();
        if url.is_empty() {
            return None;
        }
        Some(Visual::Meme {
            url: url.to_string(),
            alt: if meme.name.is_empty() {
                "meme".to_string()
            } else {
                meme.name.clone()
            },
            size: meme.size,
            is_gif: meme.is_gif,
        })
    }

    /// Quoted line of a quote card; lines that already carry quote marks are kept as-is.
    pub fn quote_text(&self) -> Option<String> {
        let Visual::Quote { line, .. } = self else {
            return None;
        };
        let line = line.trim();
        let quoted = line.len() >= 2
            && (line.starts_with('"') || line.starts_with('\u{201c}'))
            && (line.ends_with('"') || line.ends_with('\u{201d}'));
        Some(if quoted {
            line.to_string()
        } else {
            format!("\"{line}\"")
        })
    }

    /// CSS classes of the inner card, e.g. `floating-headline hope`.
    pub fn css_class(&self) -> String {
        let (base, mood) = match self {
            Visual::Headline { mood, .. } => ("floating-headline", *mood),
            Visual::Quote { mood, .. } => ("floating-quote", *mood),
            Visual::Meme { .. } => ("floating-meme-img", None),
            Visual::Event { mood, .. } => ("floating-event", *mood),
        };
        match mood {
            Some(mood) => format!("{base} {}", mood.as_class()),
            None => base.to_string(),
        }
    }
}

/// Lifecycle of one floating element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Created,
    Animating,
    Removed,
}

/// Content an element was spawned from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Timeline(TimelineItem),
    Meme(MemeSource),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingElement {
    pub id: ElementId,
    pub origin: Origin,
    pub visual: Visual,
    pub path: FloatPath,
    pub started_at: f64,
    pub duration_ms: f64,
    phase: Phase,
}

impl FloatingElement {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress_at(&self, now_ms: f64) -> f64 {
        motion::progress(now_ms - self.started_at, self.duration_ms)
    }

    pub fn frame_at(&self, now_ms: f64, config: &SpawnerConfig) -> Frame {
        let progress = self.progress_at(now_ms);
        let position = self.path.position_at(progress);
        Frame {
            x: position.x,
            y: position.y,
            opacity: motion::opacity_at(progress, config.peak_opacity, config.fade_fraction),
        }
    }

    /// Pushes one frame to the stage; returns `false` once the element is gone.
    ///
    /// A removed element never touches the stage again.
    pub fn advance(&mut self, now_ms: f64, config: &SpawnerConfig, stage: &mut impl Stage) -> bool {
        match self.phase {
            Phase::Removed => return false,
            Phase::Created => self.phase = Phase::Animating,
            Phase::Animating => {}
        }

        if self.progress_at(now_ms) >= 1.0 {
            stage.unmount(self.id);
            self.phase = Phase::Removed;
            return false;
        }

        stage.update(self.id, self.frame_at(now_ms, config));
        true
    }

    fn remove(&mut self, stage: &mut impl Stage) {
        if self.phase != Phase::Removed {
            stage.unmount(self.id);
            self.phase = Phase::Removed;
        }
    }
}

/// Cyclic cursor over the timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineCursor {
    index: usize,
}

impl TimelineCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the item under the cursor and advances, wrapping to 0 past the end.
    pub fn spawn_next<'a>(&mut self, sequence: &'a [TimelineItem]) -> Option<&'a TimelineItem> {
        if sequence.is_empty() {
            return None;
        }
        let index = self.index % sequence.len();
        self.index = (index + 1) % sequence.len();
        sequence.get(index)
    }
}

/// Uniform pick; `None` for an empty set or an entry without an image.
pub fn pick_meme<'a>(memes: &'a [MemeSource], rng: &mut impl RandomSource) -> Option<&'a MemeSource> {
    if memes.is_empty() {
        return None;
    }
    let meme = &memes[rng.below(memes.len())];
    if meme.url.trim().is_empty() {
        None
    } else {
        Some(meme)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpawnStats {
    pub timeline_spawned: u64,
    pub memes_spawned: u64,
    pub memes_skipped: u64,
    pub removed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Pending,
    Running,
    Stopped,
}

/// Owns every floating element and the timer lines that create them.
#[derive(Debug)]
pub struct Spawner<R> {
    config: SpawnerConfig,
    timeline: Vec<TimelineItem>,
    memes: Vec<MemeSource>,
    rng: R,
    cursor: TimelineCursor,
    activation: RepeatingTask,
    timeline_task: RepeatingTask,
    meme_task: RepeatingTask,
    meme_period: Option<f64>,
    burst: VecDeque<f64>,
    live: Vec<FloatingElement>,
    next_id: ElementId,
    run_state: RunState,
    stats: SpawnStats,
}

impl<R: RandomSource> Spawner<R> {
    pub fn new(
        config: SpawnerConfig,
        timeline: Vec<TimelineItem>,
        memes: Vec<MemeSource>,
        rng: R,
    ) -> Self {
        Self {
            config,
            timeline,
            memes,
            rng,
            cursor: TimelineCursor::new(),
            activation: RepeatingTask::new(),
            timeline_task: RepeatingTask::new(),
            meme_task: RepeatingTask::new(),
            meme_period: None,
            burst: VecDeque::new(),
            live: Vec::new(),
            next_id: 1,
            run_state: RunState::Idle,
            stats: SpawnStats::default(),
        }
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    pub fn cursor(&self) -> &TimelineCursor {
        &self.cursor
    }

    pub fn stats(&self) -> SpawnStats {
        self.stats
    }

    pub fn live(&self) -> &[FloatingElement] {
        &self.live
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Period of the meme interval, once the meme line is active.
    pub fn meme_period(&self) -> Option<f64> {
        self.meme_period
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.run_state == RunState::Stopped
    }

    /// Schedules activation `start_delay_ms` after `now_ms`. Only the first call counts.
    pub fn start(&mut self, now_ms: f64) {
        if self.run_state != RunState::Idle {
            return;
        }
        self.run_state = RunState::Pending;
        self.activation.arm_at(now_ms + self.config.start_delay_ms);
        info!(
            "floating layer starts in {} ms ({} timeline items, {} memes)",
            self.config.start_delay_ms,
            self.timeline.len(),
            self.memes.len()
        );
    }

    /// Runs every due timer line, then advances all live elements by one frame.
    pub fn tick(&mut self, now_ms: f64, stage: &mut impl Stage) {
        match self.run_state {
            RunState::Idle | RunState::Stopped => return,
            RunState::Pending => {
                // Elements spawned directly before activation keep flying.
                if self.activation.take_due(now_ms).is_none() {
                    self.animate(now_ms, stage);
                    return;
                }
                self.activate(now_ms);
            }
            RunState::Running => {}
        }

        if self.timeline_task.take_due(now_ms).is_some() {
            self.spawn_next(now_ms, stage);
        }

        while self.burst.front().is_some_and(|&at| at <= now_ms) {
            self.burst.pop_front();
            self.spawn_meme(now_ms, stage);
        }

        if let Some(due) = self.meme_task.take_due(now_ms) {
            self.spawn_meme(now_ms, stage);
            if let Some(period) = self.meme_period {
                let next = due + period;
                self.meme_task.arm_at(if next > now_ms { next } else { now_ms + period });
            }
        }

        self.animate(now_ms, stage);
    }

    /// Spawns the item under the cursor and re-arms the timeline line.
    ///
    /// With an empty timeline nothing is mounted and nothing is scheduled.
    pub fn spawn_next(&mut self, now_ms: f64, stage: &mut impl Stage) -> Option<ElementId> {
        if self.run_state == RunState::Stopped {
            return None;
        }
        let item = self.cursor.spawn_next(&self.timeline)?.clone();
        debug!("timeline spawn #{} {:?}", item.id, item.title);

        let visual = Visual::from_item(&item);
        let id = self.launch(now_ms, Origin::Timeline(item), visual, stage);
        self.stats.timeline_spawned += 1;

        let delay = self.config.timeline_delay.sample(&mut self.rng);
        self.timeline_task.arm_at(now_ms + delay);
        Some(id)
    }

    /// Spawns one randomly chosen meme, skipping empty sets and entries without an image.
    pub fn spawn_meme(&mut self, now_ms: f64, stage: &mut impl Stage) -> Option<ElementId> {
        if self.run_state == RunState::Stopped {
            return None;
        }
        let Some(meme) = pick_meme(&self.memes, &mut self.rng).cloned() else {
            self.stats.memes_skipped += 1;
            return None;
        };
        let visual = Visual::from_meme(&meme)?;
        debug!("meme spawn {:?}", meme.name);

        let id = self.launch(now_ms, Origin::Meme(meme), visual, stage);
        self.stats.memes_spawned += 1;
        Some(id)
    }

    /// Cancels every timer line and removes all live elements. Later ticks do nothing.
    pub fn stop(&mut self, stage: &mut impl Stage) {
        if self.run_state == RunState::Stopped {
            return;
        }
        self.activation.cancel();
        self.timeline_task.cancel();
        self.meme_task.cancel();
        self.burst.clear();
        for element in &mut self.live {
            element.remove(stage);
        }
        self.stats.removed += self.live.len() as u64;
        self.live.clear();
        self.run_state = RunState::Stopped;
        info!(
            "floating layer stopped after {} timeline and {} meme spawns",
            self.stats.timeline_spawned, self.stats.memes_spawned
        );
    }

    fn activate(&mut self, now_ms: f64) {
        self.run_state = RunState::Running;

        if self.timeline.is_empty() {
            warn!("no timeline data available, timeline line stays idle");
        } else {
            self.timeline_task.arm_at(now_ms);
        }

        if self.memes.is_empty() {
            return;
        }
        let stagger = self.config.meme_burst_stagger_ms;
        self.burst = (0..self.config.meme_burst)
            .map(|step| now_ms + step as f64 * stagger)
            .collect();
        let period = self.config.meme_interval.sample(&mut self.rng);
        self.meme_period = Some(period);
        self.meme_task.arm_at(now_ms + period);
    }

    /// Plans a path and duration, then mounts the element invisible at its start point.
    fn launch(
        &mut self,
        now_ms: f64,
        origin: Origin,
        visual: Visual,
        stage: &mut impl Stage,
    ) -> ElementId {
        let path = FloatPath::plan(
            stage.viewport(),
            self.config.edge_margin,
            self.config.wide_margin,
            &mut self.rng,
        );
        let duration_ms = self.config.flight_duration.sample(&mut self.rng);

        let id = self.next_id;
        self.next_id += 1;

        stage.mount(
            id,
            &visual,
            Frame {
                x: path.start.x,
                y: path.start.y,
                opacity: 0.0,
            },
        );
        self.live.push(FloatingElement {
            id,
            origin,
            visual,
            path,
            started_at: now_ms,
            duration_ms,
            phase: Phase::Created,
        });
        id
    }

    fn animate(&mut self, now_ms: f64, stage: &mut impl Stage) {
        let config = &self.config;
        let before = self.live.len();
        self.live
            .retain_mut(|element| element.advance(now_ms, config, stage));
        self.stats.removed += (before - self.live.len()) as u64;
    }
}

/// One call made on a [`RecordingStage`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StageEvent {
    Mount {
        id: ElementId,
        visual: Visual,
        frame: Frame,
    },
    Update {
        id: ElementId,
        frame: Frame,
    },
    Unmount {
        id: ElementId,
    },
}

/// Stage that keeps every call, for headless hosts and tests.
#[derive(Debug, Clone)]
pub struct RecordingStage {
    pub viewport: Viewport,
    events: Vec<StageEvent>,
}

impl RecordingStage {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    /// Hands over the calls recorded since the last drain.
    pub fn drain(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn mounted(&self) -> impl Iterator<Item = (ElementId, &Visual)> + '_ {
        self.events.iter().filter_map(|event| match event {
            StageEvent::Mount { id, visual, .. } => Some((*id, visual)),
            _ => None,
        })
    }
}

impl Stage for RecordingStage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn mount(&mut self, id: ElementId, visual: &Visual, frame: Frame) {
        self.events.push(StageEvent::Mount {
            id,
            visual: visual.clone(),
            frame,
        });
    }

    fn update(&mut self, id: ElementId, frame: Frame) {
        self.events.push(StageEvent::Update { id, frame });
    }

    fn unmount(&mut self, id: ElementId) {
        self.events.push(StageEvent::Unmount { id });
    }
}
