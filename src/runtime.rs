use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the chart loop reacts to.
#[derive(Clone, Debug)]
pub enum ChartEvent {
    Key(KeyEvent),
    /// The terminal changed size; the chart is redrawn to fill it.
    Resize,
    /// Nothing arrived within the tick interval.
    Tick,
}

impl ChartEvent {
    /// Map a terminal event onto the chart's events.
    ///
    /// Only key presses count: Windows also reports releases and repeats,
    /// which would pan or zoom twice per keystroke. Mouse, focus and paste
    /// events are ignored.
    pub fn from_terminal(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CtEvent::Resize(_, _) => Some(Self::Resize),
            _ => None,
        }
    }
}

pub trait ChartEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<ChartEvent, RecvTimeoutError>;
}

/// Reads the terminal on a background thread.
pub struct CrosstermEventSource {
    rx: Receiver<ChartEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if let Some(ev) = ChartEvent::from_terminal(ev) {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<ChartEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Feeds prepared events, for driving the loop without a terminal.
pub struct TestEventSource {
    rx: Receiver<ChartEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<ChartEvent>) -> Self {
        Self { rx }
    }
}

impl ChartEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<ChartEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub struct Runner<E: ChartEventSource> {
    event_source: E,
    tick: Duration,
}

impl<E: ChartEventSource> Runner<E> {
    pub fn new(event_source: E, tick: Duration) -> Self {
        Self { event_source, tick }
    }

    /// Next event, or `Tick` once the interval passes with nothing to read.
    pub fn step(&self) -> ChartEvent {
        self.event_source
            .recv_timeout(self.tick)
            .unwrap_or(ChartEvent::Tick)
    }
}

/// Run `body` between `enter` and `leave`.
///
/// `leave` runs whenever `enter` succeeded, including when `body` fails, so a
/// failed terminal setup never leaves the shell in raw mode. The first error
/// wins.
pub fn with_restore<T, Err>(
    enter: impl FnOnce() -> Result<(), Err>,
    body: impl FnOnce() -> Result<T, Err>,
    leave: impl FnOnce() -> Result<(), Err>,
) -> Result<T, Err> {
    enter()?;
    let result = body();
    let left = leave();
    let value = result?;
    left?;
    Ok(value)
}
