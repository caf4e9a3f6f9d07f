//! The single-consumer state machine.
//!
//! One task pops events off the queue and owns all controller state. Timed
//! transitions come back to it as [`Deferred`] messages, so the consumer is
//! the only writer even though most of the waiting happens elsewhere.

use crate::continuation::{Continuation, Deferred, Scheduler};
use crate::performer::Performer;
use crate::state::ControllerState;
use chrono::Timelike;
use critter_core::config::{DriveConfig, TimingConfig};
use critter_core::{
    Appetite, Body, CritterConfig, Event, EventKind, EventQueue, IntentClassifier, Mood, Running,
    SharedHunger, Snapshot, State,
};
use critter_expression::sounds::SNORING;
use critter_expression::{
    choose_idle_behavior, greeting, AfterPerformance, IdleBehavior, IntentContext,
    IntentDispatcher, Performance, SoundLibrary,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

const IDLE_ACT: Duration = Duration::from_secs(3);
const EAT_FOR: Duration = Duration::from_secs(2);
const DANCE_FOR: Duration = Duration::from_secs(10);

/// The outside world as the controller sees it.
#[derive(Clone)]
pub struct Collaborators {
    pub body: Arc<dyn Body>,
    pub classifier: Arc<dyn IntentClassifier>,
    pub library: Arc<SoundLibrary>,
}

pub struct Controller {
    state: ControllerState,
    queue: Arc<EventQueue>,
    hunger: SharedHunger,
    classifier: Arc<dyn IntentClassifier>,
    library: Arc<SoundLibrary>,
    dispatcher: IntentDispatcher,
    performer: Performer,
    scheduler: Scheduler,
    deferred_rx: mpsc::Receiver<Deferred>,
    snapshot_tx: watch::Sender<Snapshot>,
    timing: TimingConfig,
    drives: DriveConfig,
    running: Running,
    rng: StdRng,
}

impl Controller {
    /// Build the controller and spawn its performer task.
    pub fn new(
        config: &CritterConfig,
        queue: Arc<EventQueue>,
        hunger: SharedHunger,
        collaborators: Collaborators,
        running: Running,
    ) -> Self {
        let Collaborators {
            body,
            classifier,
            library,
        } = collaborators;

        let state = ControllerState::new(Instant::now());
        let (snapshot_tx, _) = watch::channel(state.snapshot());
        let (deferred_tx, deferred_rx) = mpsc::channel(32);
        let (performer, _) = Performer::spawn(body, running.clone());
        let dispatcher = IntentDispatcher::new(Arc::clone(&library), config.timing.normal_lock());

        Self {
            state,
            queue,
            hunger,
            classifier,
            library,
            dispatcher,
            performer,
            scheduler: Scheduler::new(deferred_tx, running.clone()),
            deferred_rx,
            snapshot_tx,
            timing: config.timing.clone(),
            drives: config.drives.clone(),
            running,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seed the random picks, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// A receiver for the snapshots published after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn queue(&self) -> &Arc<EventQueue> {
        &self.queue
    }

    /// Consume events until shutdown. Posts `start` first.
    ///
    /// Continuations win over queued events when both are ready.
    pub async fn run(mut self) -> ControllerState {
        self.queue.post_or_log(EventKind::Start.event());
        let pop_timeout = self.timing.pop_timeout();
        let mut running = self.running.clone();

        tracing::info!("Controller running");
        while running.is_running() {
            tokio::select! {
                biased;
                _ = running.stopped() => break,
                Some(deferred) = self.deferred_rx.recv() => self.resume(deferred).await,
                popped = self.queue.pop(pop_timeout) => {
                    if let Ok(entry) = popped {
                        self.handle(entry.event).await;
                    }
                }
            }
        }
        tracing::info!("Controller stopped");
        self.state
    }

    /// Handle one popped event: drop it while locked, otherwise route it.
    pub async fn handle(&mut self, event: Event) {
        let now = Instant::now();
        if self.state.is_locked(now) {
            tracing::debug!("[IGNORE] event {} (locked)", event.name());
            return;
        }
        let Some(kind) = EventKind::from_name(event.name()) else {
            tracing::warn!("No handler for event {}", event.name());
            return;
        };

        match kind {
            EventKind::Start => self.on_start(now),
            EventKind::IdleTimeout => self.on_idle_timeout(now),
            EventKind::Random => self.on_random().await,
            EventKind::Listening => self.on_listening(now),
            EventKind::Wake => self.on_wake(now),
            EventKind::TouchHead => self.on_touch(now, Mood::Happy, "purr", Duration::from_secs(3)),
            EventKind::TouchBelly => {
                self.on_touch(now, Mood::Happy, "giggle", Duration::from_secs(1))
            }
            EventKind::Tilt => self.on_touch(now, Mood::Sad, "tilt", Duration::from_secs(1)),
            EventKind::Shake => self.on_touch(now, Mood::Angry, "shake", Duration::from_secs(1)),
            EventKind::Feed => self.on_feed(now).await,
            EventKind::Dance => self.on_dance(now),
        }
        self.publish();
    }

    /// Wait for the next continuation and apply it. Returns `false` once
    /// no more can arrive.
    pub async fn process_deferred(&mut self) -> bool {
        match self.deferred_rx.recv().await {
            Some(deferred) => {
                self.resume(deferred).await;
                true
            }
            None => false,
        }
    }

    async fn resume(&mut self, deferred: Deferred) {
        if !self.running.is_running() {
            return;
        }
        if deferred.epoch != self.state.epoch() {
            tracing::debug!(
                "Stale continuation {:?} (epoch {} != {})",
                deferred.continuation,
                deferred.epoch,
                self.state.epoch()
            );
            return;
        }

        let now = Instant::now();
        match deferred.continuation {
            Continuation::Awake => {
                self.state.enter(State::Idle);
                self.state.stamp(now);
            }
            Continuation::Asleep => {
                self.state.enter(State::Sleeping);
            }
            Continuation::Heard(Some(intent)) => {
                let epoch = self.state.enter(State::Busy);
                self.state.stamp(now);

                let ctx = IntentContext::now(self.appetite().await);
                let response = self.dispatcher.dispatch_with(&intent, &ctx, &mut self.rng);
                let duration = response.duration();
                let after = response.after;
                self.performer.perform(response.performance);
                self.scheduler
                    .after(duration, epoch, Continuation::Performed(after));
            }
            Continuation::Heard(None) => {
                self.state.enter(State::Idle);
                self.state.stamp(now);
            }
            Continuation::Performed(AfterPerformance::Idle) => {
                self.state.enter(State::Idle);
                self.state.stamp(now);
            }
            Continuation::Performed(AfterPerformance::Sleep) => {
                self.state.stamp(now);
                self.snore(now);
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.state.snapshot());
    }

    async fn appetite(&self) -> Appetite {
        self.hunger
            .read()
            .await
            .appetite(self.drives.starving_below, self.drives.hungry_below)
    }

    // ---- handlers ----

    fn on_start(&mut self, now: Instant) {
        let lock = self.timing.wakeup_lock();
        let epoch = self.state.enter(State::WakeUp);
        self.state.lock_for(now, lock);

        let hello = greeting(&self.library, chrono::Local::now().hour(), &mut self.rng);
        self.performer.perform(
            Performance::new()
                .act("yawn", lock)
                .act(&hello, self.timing.normal_lock()),
        );
        self.scheduler.after(lock, epoch, Continuation::Awake);
    }

    fn on_idle_timeout(&mut self, now: Instant) {
        if self.state.state() != State::Idle {
            tracing::debug!("Idle timeout ignored in {} state", self.state.state());
            return;
        }
        self.snore(now);
    }

    fn snore(&mut self, now: Instant) {
        let lock = self.timing.snore_lock();
        let epoch = self.state.enter(State::Snoring);
        self.state.lock_for(now, lock);

        let sound = self.library.pick(SNORING, &mut self.rng);
        self.performer.perform(Performance::new().act(&sound, lock));
        self.scheduler.after(lock, epoch, Continuation::Asleep);
    }

    async fn on_random(&mut self) {
        if self.state.state() != State::Idle {
            return;
        }
        let appetite = self.appetite().await;
        let behavior =
            choose_idle_behavior(appetite, self.state.mood(), &self.library, &mut self.rng);
        match &behavior {
            IdleBehavior::Starving(sound) => tracing::info!("[STARVING ACTION] {}", sound),
            IdleBehavior::Hungry(sound) => tracing::info!("[HUNGRY ACTION] {}", sound),
            IdleBehavior::Mood(mood, sound) => tracing::info!("[RANDOM] ({}) {}", mood, sound),
        }
        self.performer
            .perform(Performance::new().act(behavior.sound(), IDLE_ACT));
    }

    fn on_listening(&mut self, now: Instant) {
        if self.state.state() != State::Idle {
            tracing::info!("Cannot listen in {} state", self.state.state());
            return;
        }
        let lock = self.timing.listening_lock();
        let epoch = self.state.enter(State::Listening);
        self.state.lock_for(now, lock);

        self.performer
            .perform(Performance::new().act("listening", lock));
        self.scheduler
            .listen(lock, epoch, Arc::clone(&self.classifier));
    }

    fn on_wake(&mut self, now: Instant) {
        if self.state.state() == State::Sleeping {
            tracing::info!("[FSM] Waking from sleep");
            self.on_start(now);
        } else {
            tracing::info!("Already awake");
        }
    }

    fn on_touch(&mut self, now: Instant, mood: Mood, reaction: &str, duration: Duration) {
        tracing::info!("[EVENT] {}", reaction);
        self.state.set_mood(mood);

        match self.state.state() {
            State::Sleeping => self.on_wake(now),
            State::Idle => {
                self.state.stamp(now);
                self.performer
                    .perform(Performance::new().act(reaction, duration));
            }
            _ => {}
        }
    }

    async fn on_feed(&mut self, now: Instant) {
        let level = self.hunger.write().await.feed(self.drives.feed_amount);
        tracing::info!("[HUNGER] restored → {}", level);

        if self.state.state() == State::Idle {
            self.state.stamp(now);
            self.performer.perform(Performance::new().act("eat", EAT_FOR));
        }
    }

    fn on_dance(&mut self, now: Instant) {
        tracing::info!("[EVENT] dance mode!");
        self.state.enter(State::Idle);
        self.state.stamp(now);
        self.performer
            .perform(Performance::new().act("dance", DANCE_FOR));
    }
}
