//! Recording fakes shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

use scroll_scenes::core::effect::EffectSpec;
use scroll_scenes::{
    AnimationBackend, ElementId, Scene, SceneAnimation, SceneList, ScrollContainer,
    ScrollTimeline, TickReport, TimelineConfig,
};

// ───────────────────────────────────────── container ─────────

#[derive(Debug, Clone)]
pub struct FakeContainer {
    pub top: f64,
    pub height: f64,
    pub client: f64,
}

impl FakeContainer {
    /// A container whose max scroll is exactly `max_scroll`.
    pub fn with_max_scroll(max_scroll: f64) -> Self {
        Self {
            top: 0.0,
            height: max_scroll + 100.0,
            client: 100.0,
        }
    }
}

impl ScrollContainer for FakeContainer {
    fn scroll_top(&self) -> f64 {
        self.top
    }
    fn scroll_height(&self) -> f64 {
        self.height
    }
    fn client_height(&self) -> f64 {
        self.client
    }
}

// ───────────────────────────────────────── backend ───────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { anim: u32, scene: usize },
    Seek { anim: u32, position: f64 },
    Pause { anim: u32 },
    Hint { id: ElementId, enabled: bool },
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct RecordingBackend {
    pub log: CallLog,
    pub rendered: HashSet<ElementId>,
    /// When set, `present` renders nothing (simulates a broken view).
    pub render_disabled: bool,
    next_anim: u32,
}

impl RecordingBackend {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            rendered: HashSet::new(),
            render_disabled: false,
            next_anim: 0,
        }
    }

    /// What a presentation layer does on draw: render the active scene.
    pub fn present(&mut self, scene: usize) {
        self.rendered.clear();
        if !self.render_disabled {
            self.rendered.extend(ElementId::targets_of(scene));
        }
    }
}

pub struct RecordingAnimation {
    pub anim: u32,
    pub scene: usize,
    log: CallLog,
}

impl SceneAnimation for RecordingAnimation {
    fn duration(&self) -> f64 {
        DURATION
    }
    fn seek(&mut self, position: f64) {
        self.log.borrow_mut().push(Call::Seek {
            anim: self.anim,
            position,
        });
    }
    fn pause(&mut self) {
        self.log.borrow_mut().push(Call::Pause { anim: self.anim });
    }
}

pub const DURATION: f64 = 10.0;

impl AnimationBackend for RecordingBackend {
    type Target = ElementId;
    type Animation = RecordingAnimation;

    fn resolve(&mut self, id: ElementId) -> Option<ElementId> {
        self.rendered.contains(&id).then_some(id)
    }

    fn create(&mut self, targets: Vec<ElementId>, _effect: &EffectSpec) -> RecordingAnimation {
        self.next_anim += 1;
        let scene = targets[0].scene;
        self.log.borrow_mut().push(Call::Create {
            anim: self.next_anim,
            scene,
        });
        RecordingAnimation {
            anim: self.next_anim,
            scene,
            log: Rc::clone(&self.log),
        }
    }

    fn set_hint(&mut self, id: ElementId, enabled: bool) {
        self.log.borrow_mut().push(Call::Hint { id, enabled });
    }
}

// ───────────────────────────────────────── harness ───────────

pub type TestTimeline = ScrollTimeline<FakeContainer, RecordingBackend>;

pub fn scenes(n: usize) -> SceneList {
    SceneList::new(
        (0..n)
            .map(|i| Scene::new(format!("Header {i}"), format!("Paragraph {i}")))
            .collect(),
    )
    .unwrap()
}

/// Unthrottled config; everything else at defaults.
pub fn config() -> TimelineConfig {
    TimelineConfig {
        throttle_ms: 0,
        ..TimelineConfig::default()
    }
}

pub fn timeline(n: usize, config: TimelineConfig, max_scroll: f64) -> (TestTimeline, CallLog) {
    let log = CallLog::default();
    let timeline = ScrollTimeline::activate(
        scenes(n),
        config,
        Some(FakeContainer::with_max_scroll(max_scroll)),
        RecordingBackend::new(Rc::clone(&log)),
    )
    .unwrap();
    (timeline, log)
}

/// Simulated host: fixed 16 ms frames, draw (present) then settle.
pub struct Host {
    pub now: Instant,
}

impl Host {
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
        }
    }

    pub fn scroll_to(&mut self, timeline: &mut TestTimeline, top: f64) {
        if let Some(container) = timeline.container_mut() {
            container.top = top;
        }
        timeline.notify_scroll(self.now);
    }

    pub fn draw_and_settle(&mut self, timeline: &mut TestTimeline) {
        let index = timeline.active_index();
        timeline.backend_mut().present(index);
        timeline.settle();
    }

    /// One full frame: draw/settle, then tick.
    pub fn frame(&mut self, timeline: &mut TestTimeline) -> TickReport {
        self.draw_and_settle(timeline);
        self.now += Duration::from_millis(16);
        timeline.tick(self.now)
    }

    pub fn frames(&mut self, timeline: &mut TestTimeline, count: usize) {
        for _ in 0..count {
            self.frame(timeline);
        }
    }
}

pub fn calls(log: &CallLog) -> Vec<Call> {
    log.borrow().clone()
}
