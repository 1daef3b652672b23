use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::collision::{is_drained, resolve_bumper, resolve_flipper, resolve_wall};
use super::config::TableConfig;
use super::entities::{boundary_walls, Ball, Bumper, Flipper, FlipperSide, Wall};
use super::physics::{integrate_ball, update_flipper};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    User,
    Auto,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::User => "USER",
            Mode::Auto => "AUTO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    LaunchPrompt,
    Playing,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Idle => "READY",
            Status::LaunchPrompt => "LAUNCH!",
            Status::Playing => "PLAYING",
        }
    }
}

/// Held-key snapshot sampled once per step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PinballKeys {
    pub left_flipper: bool,
    pub right_flipper: bool,
    pub launch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinballEvent {
    Launched { vx: f32, vy: f32 },
    BumperHit { index: usize, points: u32 },
    FlipperHit { side: FlipperSide, points: u32 },
    Drained,
}

impl PinballEvent {
    pub fn points(&self) -> u32 {
        match self {
            PinballEvent::BumperHit { points, .. } | PinballEvent::FlipperHit { points, .. } => {
                *points
            }
            _ => 0,
        }
    }
}

/// One pinball session: table, ball, flippers and the run flags.
pub struct PinballState {
    pub table: TableConfig,
    pub ball: Ball,
    pub left: Flipper,
    pub right: Flipper,
    pub bumpers: Vec<Bumper>,
    pub walls: Vec<Wall>,
    pub running: bool,
    pub mode: Mode,
    pub score: u32,
    pub ball_launched: bool,
    pub ball_in_play: bool,
    bumper_contacts: Vec<bool>,
    flipper_contacts: [bool; 2],
    rng: StdRng,
}

impl PinballState {
    pub fn new(table: TableConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            ball: Ball::new(&table),
            left: Flipper::new(FlipperSide::Left, &table),
            right: Flipper::new(FlipperSide::Right, &table),
            bumpers: table.bumpers.iter().map(Bumper::from).collect(),
            walls: boundary_walls(table.width, table.height),
            bumper_contacts: vec![false; table.bumpers.len()],
            flipper_contacts: [false; 2],
            table,
            running: false,
            mode: Mode::User,
            score: 0,
            ball_launched: false,
            ball_in_play: false,
            rng,
        }
    }

    pub fn status(&self) -> Status {
        if !self.running {
            Status::Idle
        } else if self.ball_in_play {
            Status::Playing
        } else {
            Status::LaunchPrompt
        }
    }

    pub fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    /// Begins a session. Ignored while one is already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.restore();
        self.running = true;
        log::info!("pinball started ({} mode)", self.mode.label());
        true
    }

    /// Stops the session and puts everything back at its starting point.
    pub fn reset(&mut self) {
        self.restore();
        self.running = false;
        log::info!("pinball reset");
    }

    /// Switches between player and automatic flippers. Only allowed while
    /// stopped.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.running {
            return false;
        }
        if self.mode != mode {
            log::info!("pinball mode: {}", mode.label());
        }
        self.mode = mode;
        true
    }

    /// Fires the waiting ball. Does nothing once the ball is launched.
    pub fn launch(&mut self) -> Option<PinballEvent> {
        if self.ball_launched {
            return None;
        }
        let jitter = self.table.launch_jitter;
        self.ball.vx = if jitter > 0.0 {
            self.rng.gen_range(-jitter..=jitter)
        } else {
            0.0
        };
        self.ball.vy = self.table.launch_speed;
        self.ball_launched = true;
        self.ball_in_play = true;
        Some(PinballEvent::Launched {
            vx: self.ball.vx,
            vy: self.ball.vy,
        })
    }

    /// Advances the session by one fixed step.
    pub fn step(&mut self, keys: PinballKeys) -> Vec<PinballEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }

        let wants_launch = match self.mode {
            Mode::User => {
                self.left.active = keys.left_flipper;
                self.right.active = keys.right_flipper;
                keys.launch
            }
            Mode::Auto => {
                let ball_on_left = self.ball.x < self.table.width / 2.0;
                self.left.active = ball_on_left;
                self.right.active = !ball_on_left;
                true
            }
        };
        if wants_launch && !self.ball_in_play {
            events.extend(self.launch());
        }

        update_flipper(&mut self.left);
        update_flipper(&mut self.right);

        if self.ball_in_play {
            integrate_ball(&mut self.ball);
            self.resolve_contacts(&mut events);
            if is_drained(&self.ball, self.table.height) {
                self.drain();
                events.push(PinballEvent::Drained);
            }
        }

        for event in &events {
            self.score = self.score.saturating_add(event.points());
        }
        events
    }

    fn resolve_contacts(&mut self, events: &mut Vec<PinballEvent>) {
        let restitution = self.table.restitution;
        for wall in &self.walls {
            resolve_wall(&mut self.ball, wall, restitution);
        }

        for (index, bumper) in self.bumpers.iter().enumerate() {
            let touching = resolve_bumper(&mut self.ball, bumper, self.table.bumper_speed);
            if touching && self.awards(self.bumper_contacts[index]) {
                log::trace!("bumper {} hit", index);
                events.push(PinballEvent::BumperHit {
                    index,
                    points: self.table.bumper_points,
                });
            }
            self.bumper_contacts[index] = touching;
        }

        for (slot, flipper) in [&self.left, &self.right].into_iter().enumerate() {
            let touching = resolve_flipper(&mut self.ball, flipper, self.table.flipper_speed);
            if touching && self.awards(self.flipper_contacts[slot]) {
                log::trace!("{:?} flipper hit", flipper.side);
                events.push(PinballEvent::FlipperHit {
                    side: flipper.side,
                    points: self.table.flipper_points,
                });
            }
            self.flipper_contacts[slot] = touching;
        }
    }

    /// Whether a contact scores, given if it was already touching last step.
    fn awards(&self, was_touching: bool) -> bool {
        !(self.table.debounce_contacts && was_touching)
    }

    fn drain(&mut self) {
        self.ball_in_play = false;
        self.ball_launched = false;
        self.ball.park(self.table.launch_x, self.table.launch_y);
        self.clear_contacts();
        log::debug!("ball drained, score {}", self.score);
    }

    fn restore(&mut self) {
        self.score = 0;
        self.ball_in_play = false;
        self.ball_launched = false;
        self.ball.park(self.table.launch_x, self.table.launch_y);
        self.left.reset();
        self.right.reset();
        self.clear_contacts();
    }

    fn clear_contacts(&mut self) {
        self.bumper_contacts.iter_mut().for_each(|c| *c = false);
        self.flipper_contacts = [false; 2];
    }
}
