use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::engine::{Carousel, CarouselOptions, Transition};

/// Commands accepted by a running [`CarouselService`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Move(i64),
    Jump(i64),
    Pause,
    Resume,
    Dispose,
}

/// Events emitted by the service to notify listeners of changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselEvent {
    /// A transition was accepted
    SlideChanged(Transition),
    /// Autoplay was suspended
    Paused,
    /// Autoplay was restarted
    Resumed,
    /// The service stopped and its carousel was disposed
    Disposed,
}

/// Latest observable state of a service's carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselSnapshot {
    pub current: Option<usize>,
    pub transitioning: bool,
    pub autoplay: bool,
}

impl CarouselSnapshot {
    fn of(carousel: &Carousel) -> Self {
        Self {
            current: carousel.current(),
            transitioning: carousel.is_transitioning(),
            autoplay: carousel.is_autoplaying(),
        }
    }
}

/// Cloneable command surface for a running carousel
///
/// Sending to a stopped service is logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    tx: mpsc::UnboundedSender<CarouselCommand>,
}

impl CarouselHandle {
    fn send(&self, command: CarouselCommand) {
        if self.tx.send(command).is_err() {
            warn!("Carousel command {:?} ignored: service stopped", command);
        }
    }

    /// Move by `delta` slides (arrow keys, swipes)
    pub fn move_by(&self, delta: i64) {
        self.send(CarouselCommand::Move(delta));
    }

    /// Jump to a slide (indicator clicks)
    pub fn jump(&self, index: i64) {
        self.send(CarouselCommand::Jump(index));
    }

    pub fn pause(&self) {
        self.send(CarouselCommand::Pause);
    }

    pub fn resume(&self) {
        self.send(CarouselCommand::Resume);
    }

    /// Stop the service and cancel its timers
    pub fn dispose(&self) {
        self.send(CarouselCommand::Dispose);
    }

    /// Whether the service has stopped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Tokio task that owns a carousel and drives its timers
pub struct CarouselService {
    engine: Carousel,
    commands: mpsc::UnboundedReceiver<CarouselCommand>,
    event_tx: Option<mpsc::UnboundedSender<CarouselEvent>>,
    snapshot_tx: watch::Sender<CarouselSnapshot>,
}

impl CarouselService {
    /// Create a service and the handle that controls it
    ///
    /// The carousel is initialized immediately; its timers start counting
    /// from this call.
    pub fn new(options: CarouselOptions) -> (Self, CarouselHandle) {
        let engine = Carousel::init(options, Instant::now().into_std());
        let (tx, commands) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(CarouselSnapshot::of(&engine));

        let service = Self {
            engine,
            commands,
            event_tx: None,
            snapshot_tx,
        };
        (service, CarouselHandle { tx })
    }

    /// Set the event sender for listeners
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<CarouselEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Watch the carousel state
    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn send_event(&self, event: CarouselEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send carousel event: receiver dropped");
            }
        }
    }

    fn publish(&mut self) {
        for transition in self.engine.take_transitions() {
            self.send_event(CarouselEvent::SlideChanged(transition));
        }
        self.snapshot_tx.send_replace(CarouselSnapshot::of(&self.engine));
    }

    fn apply(&mut self, command: CarouselCommand) {
        let now = Instant::now().into_std();
        debug!("Carousel command: {:?}", command);

        match command {
            CarouselCommand::Move(delta) => {
                self.engine.move_by(delta, now);
            }
            CarouselCommand::Jump(index) => {
                self.engine.jump(index, now);
            }
            CarouselCommand::Pause => {
                self.engine.pause(now);
                self.send_event(CarouselEvent::Paused);
            }
            CarouselCommand::Resume => {
                self.engine.resume(now);
                self.send_event(CarouselEvent::Resumed);
            }
            // handled by the run loop
            CarouselCommand::Dispose => {}
        }
    }

    /// Run until shutdown, `dispose`, or every handle is dropped
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        if self.engine.is_inert() {
            info!("Carousel has no slides, service idle until stopped");
        } else {
            info!(
                "Carousel started: slides={}, interval={}ms, lock={}ms",
                self.engine.len(),
                self.engine.options().interval.as_millis(),
                self.engine.options().transition_lock.as_millis()
            );
        }

        self.publish();

        loop {
            let deadline = self.engine.next_deadline().map(Instant::from_std);

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Carousel received shutdown signal");
                        break;
                    }
                }

                command = self.commands.recv() => {
                    match command {
                        Some(CarouselCommand::Dispose) => {
                            info!("Carousel disposed by handle");
                            break;
                        }
                        Some(command) => self.apply(command),
                        None => {
                            debug!("All carousel handles dropped");
                            break;
                        }
                    }
                }

                _ = sleep_until_deadline(deadline) => {
                    self.engine.advance(Instant::now().into_std());
                }
            }

            self.publish();
        }

        self.engine.dispose();
        self.publish();
        self.send_event(CarouselEvent::Disposed);
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::carousel::Origin;

    struct Running {
        handle: CarouselHandle,
        events: mpsc::UnboundedReceiver<CarouselEvent>,
        snapshot: watch::Receiver<CarouselSnapshot>,
        shutdown: watch::Sender<bool>,
        task: tokio::task::JoinHandle<()>,
    }

    fn spawn(options: CarouselOptions) -> Running {
        let (service, handle) = CarouselService::new(options);
        let (event_tx, events) = mpsc::unbounded_channel();
        let service = service.with_event_sender(event_tx);
        let snapshot = service.subscribe();
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(service.run(shutdown_rx));

        Running {
            handle,
            events,
            snapshot,
            shutdown,
            task,
        }
    }

    async fn next_change(events: &mut mpsc::UnboundedReceiver<CarouselEvent>) -> Transition {
        loop {
            match events.recv().await {
                Some(CarouselEvent::SlideChanged(transition)) => return transition,
                Some(_) => continue,
                None => panic!("service stopped"),
            }
        }
    }

    /// Let the service task drain its queue without moving the clock
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn elapsed(transition: &Transition, start: Instant) -> Duration {
        transition.at.duration_since(start.into_std())
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_ticks_on_interval() {
        let start = Instant::now();
        let mut running = spawn(CarouselOptions::new(3));

        let init = next_change(&mut running.events).await;
        assert_eq!((init.to, init.origin), (0, Origin::Init));

        let tick = next_change(&mut running.events).await;
        assert_eq!((tick.from, tick.to, tick.origin), (0, 1, Origin::Autoplay));
        assert_eq!(elapsed(&tick, start), Duration::from_millis(5000));

        let tick = next_change(&mut running.events).await;
        assert_eq!(tick.to, 2);
        assert_eq!(elapsed(&tick, start), Duration::from_millis(10_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scenario_through_handle() {
        let mut running = spawn(CarouselOptions::new(3).with_indicators(3));

        next_change(&mut running.events).await;
        let tick = next_change(&mut running.events).await;
        assert_eq!(tick.to, 1);

        running.handle.jump(0);
        let jump = next_change(&mut running.events).await;
        assert_eq!((jump.from, jump.to, jump.origin), (1, 0, Origin::Manual));

        tokio::time::sleep(Duration::from_millis(500)).await;
        running.handle.jump(2);
        settle().await;

        assert_eq!(running.snapshot.borrow().current, Some(0));
        assert!(running.snapshot.borrow().transitioning);
        assert!(running.events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_holds_until_resume() {
        let start = Instant::now();
        let mut running = spawn(CarouselOptions::new(3));
        next_change(&mut running.events).await;

        running.handle.pause();
        tokio::time::sleep(Duration::from_millis(6000)).await;

        let snapshot = *running.snapshot.borrow();
        assert_eq!(snapshot.current, Some(0));
        assert!(!snapshot.autoplay);
        assert_eq!(running.events.try_recv(), Ok(CarouselEvent::Paused));
        assert!(running.events.try_recv().is_err());

        running.handle.resume();
        let tick = next_change(&mut running.events).await;
        assert_eq!(tick.to, 1);
        assert!(elapsed(&tick, start) >= Duration::from_millis(11_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_stops_service() {
        let mut running = spawn(CarouselOptions::new(3));
        next_change(&mut running.events).await;

        running.handle.dispose();
        running.task.await.unwrap();

        assert_eq!(running.events.recv().await, Some(CarouselEvent::Disposed));
        assert!(running.handle.is_closed());
        assert!(!running.snapshot.borrow().autoplay);

        // no panic, only a warning
        running.handle.move_by(1);
        tokio::time::sleep(Duration::from_millis(20_000)).await;
        assert_eq!(running.snapshot.borrow().current, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_signal() {
        let running = spawn(CarouselOptions::new(2));
        running.shutdown.send(true).unwrap();
        running.task.await.unwrap();
        assert!(running.handle.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_services_are_independent() {
        let mut first = spawn(CarouselOptions::new(3));
        let mut second = spawn(CarouselOptions::new(3));
        next_change(&mut first.events).await;
        next_change(&mut second.events).await;

        first.handle.pause();
        let tick = next_change(&mut second.events).await;
        assert_eq!(tick.to, 1);
        settle().await;

        assert_eq!(first.snapshot.borrow().current, Some(0));
        assert_eq!(second.snapshot.borrow().current, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_inert_service_waits_for_stop() {
        let running = spawn(CarouselOptions::new(0));
        settle().await;
        assert_eq!(running.snapshot.borrow().current, None);

        drop(running.handle);
        running.task.await.unwrap();
    }
}
