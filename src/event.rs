use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind};

pub enum Event {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Spawns the input thread. Ticks are paced against a deadline so a
    /// stream of key repeats cannot starve the simulation.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut next_tick = Instant::now() + tick_rate;
            loop {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(crossterm::event::Event::Key(key)) = event::read() {
                            if key.kind != KeyEventKind::Release && tx.send(Event::Key(key)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        log::error!("input poll failed: {}", err);
                        return;
                    }
                }
                if Instant::now() >= next_tick {
                    next_tick += tick_rate;
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}
