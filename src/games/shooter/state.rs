use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 500.0;

const START_LIVES: u32 = 3;
const PLAYER_SIZE: f32 = 30.0;
const PLAYER_SPEED: f32 = 5.0;
const FIRE_COOLDOWN: i32 = 5;
const BULLET_WIDTH: f32 = 5.0;
const BULLET_HEIGHT: f32 = 10.0;
const PLAYER_BULLET_SPEED: f32 = 6.0;
const ENEMY_BULLET_SPEED: f32 = 3.0;
/// Bullets are culled this far outside the canvas.
const BULLET_MARGIN: f32 = 10.0;
const ENEMY_SIZE: f32 = 20.0;
const ENEMY_SHOOT_CHANCE: f32 = 0.02;
const ENEMY_DRIFT: f32 = 0.5;
const KILL_POINTS: u32 = 100;
const EXPLOSION_LIFE: u32 = 15;
/// Simulated milliseconds per step, for the enemy drift clock.
const MS_PER_STEP: f64 = 1000.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Strict overlap: touching edges do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub shoot_cooldown: i32,
}

impl Player {
    fn new() -> Self {
        Self {
            x: CANVAS_WIDTH / 2.0,
            y: CANVAS_HEIGHT - 50.0,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            shoot_cooldown: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.width, h: self.height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub from_player: bool,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: BULLET_WIDTH, h: BULLET_HEIGHT }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Top-left corner of the hitbox. The sprite is drawn centred here.
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub shoot_chance: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.size, h: self.size }
    }

    /// Where the enemy is drawn, offset from its hitbox.
    pub fn sprite_rect(&self) -> Rect {
        let half = self.size / 2.0;
        Rect { x: self.x - half, y: self.y - half, w: self.size, h: self.size }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub life: u32,
}

impl Explosion {
    /// Remaining intensity in (0, 1].
    pub fn fade(&self) -> f32 {
        self.life as f32 / EXPLOSION_LIFE as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Playing,
    Paused,
    Wave(u32),
    GameOver,
}

impl Status {
    pub fn label(&self) -> String {
        match self {
            Status::Ready => "READY".to_string(),
            Status::Playing => "PLAYING".to_string(),
            Status::Paused => "PAUSED".to_string(),
            Status::Wave(n) => format!("WAVE {}", n),
            Status::GameOver => "GAME OVER".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShooterKeys {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShooterEvent {
    EnemyDestroyed { points: u32 },
    PlayerHit { lives_left: u32 },
    WaveCleared { next_wave: u32 },
    GameOver { score: u32 },
}

pub struct ShooterState {
    pub phase: Phase,
    pub status: Status,
    pub score: u32,
    pub wave: u32,
    pub lives: u32,
    pub wave_kills: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    steps: u64,
    rng: StdRng,
}

impl ShooterState {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            phase: Phase::Ready,
            status: Status::Ready,
            score: 0,
            wave: 1,
            lives: START_LIVES,
            wave_kills: 0,
            player: Player::new(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            steps: 0,
            rng,
        }
    }

    /// Starts a fresh run from Ready or GameOver.
    pub fn start(&mut self) -> bool {
        if matches!(self.phase, Phase::Running | Phase::Paused) {
            return false;
        }
        self.clear();
        self.phase = Phase::Running;
        self.status = Status::Playing;
        self.spawn_wave();
        log::info!("shooter started");
        true
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.status = Status::Paused;
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.status = Status::Playing;
            }
            Phase::Ready | Phase::GameOver => {}
        }
    }

    pub fn reset(&mut self) {
        self.clear();
        self.player = Player::new();
        self.phase = Phase::Ready;
        self.status = Status::Ready;
        log::info!("shooter reset");
    }

    /// Clears the run. The ship keeps its position and cooldown.
    fn clear(&mut self) {
        self.score = 0;
        self.wave = 1;
        self.lives = START_LIVES;
        self.wave_kills = 0;
        self.bullets.clear();
        self.enemies.clear();
        self.explosions.clear();
    }

    fn spawn_wave(&mut self) {
        let count = 3 + self.wave;
        let spacing = CANVAS_WIDTH / (count + 1) as f32;
        self.enemies = (0..count)
            .map(|i| Enemy {
                x: spacing * (i + 1) as f32,
                y: 30.0 + self.rng.gen::<f32>() * 50.0,
                size: ENEMY_SIZE,
                shoot_chance: ENEMY_SHOOT_CHANCE,
            })
            .collect();
        self.wave_kills = 0;
    }

    pub fn step(&mut self, keys: ShooterKeys) -> Vec<ShooterEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }
        self.steps += 1;

        self.update_player(keys);
        self.update_enemies();
        self.update_bullets();
        self.check_collisions(&mut events);
        self.explosions.retain_mut(|e| {
            e.life = e.life.saturating_sub(1);
            e.life > 0
        });
        self.check_wave_complete(&mut events);
        events
    }

    fn update_player(&mut self, keys: ShooterKeys) {
        let player = &mut self.player;
        if keys.left {
            player.x = (player.x - PLAYER_SPEED).max(0.0);
        }
        if keys.right {
            player.x = (player.x + PLAYER_SPEED).min(CANVAS_WIDTH - player.width);
        }

        player.shoot_cooldown = player.shoot_cooldown.saturating_sub(1);
        if keys.fire && player.shoot_cooldown <= 0 {
            self.bullets.push(Bullet {
                x: player.x + player.width / 2.0 - BULLET_WIDTH / 2.0,
                y: player.y,
                speed: PLAYER_BULLET_SPEED,
                from_player: true,
            });
            player.shoot_cooldown = FIRE_COOLDOWN;
        }
    }

    fn update_enemies(&mut self) {
        let clock = self.steps as f64 * MS_PER_STEP;
        for idx in 0..self.enemies.len() {
            let phase = (clock / 2000.0 + idx as f64).sin() as f32;
            self.enemies[idx].x += phase * ENEMY_DRIFT;

            // One enemy's roll triggers a volley in which every enemy rolls again.
            if self.rng.gen::<f32>() < self.enemies[idx].shoot_chance {
                self.enemy_volley();
            }
        }
    }

    fn enemy_volley(&mut self) {
        for enemy in &self.enemies {
            if self.rng.gen::<f32>() < enemy.shoot_chance {
                self.bullets.push(Bullet {
                    x: enemy.x,
                    y: enemy.y + enemy.size,
                    speed: ENEMY_BULLET_SPEED,
                    from_player: false,
                });
            }
        }
    }

    fn update_bullets(&mut self) {
        self.bullets.retain_mut(|b| {
            if b.from_player {
                b.y -= b.speed;
            } else {
                b.y += b.speed;
            }
            b.y > -BULLET_MARGIN && b.y < CANVAS_HEIGHT + BULLET_MARGIN
        });
    }

    fn check_collisions(&mut self, events: &mut Vec<ShooterEvent>) {
        for i in (0..self.bullets.len()).rev() {
            if !self.bullets[i].from_player {
                continue;
            }
            let shot = self.bullets[i].rect();
            if let Some(j) = self.enemies.iter().rposition(|e| shot.overlaps(&e.rect())) {
                let enemy = self.enemies.remove(j);
                self.bullets.remove(i);
                self.explosions.push(Explosion {
                    x: enemy.x,
                    y: enemy.y,
                    radius: 15.0,
                    life: EXPLOSION_LIFE,
                });
                self.score += KILL_POINTS;
                self.wave_kills += 1;
                events.push(ShooterEvent::EnemyDestroyed { points: KILL_POINTS });
            }
        }

        let target = self.player.rect();
        let hit = self
            .bullets
            .iter()
            .rposition(|b| !b.from_player && b.rect().overlaps(&target));
        if let Some(i) = hit {
            self.bullets.remove(i);
            self.lives = self.lives.saturating_sub(1);
            self.explosions.push(Explosion {
                x: self.player.x + self.player.width / 2.0,
                y: self.player.y,
                radius: 20.0,
                life: EXPLOSION_LIFE,
            });
            events.push(ShooterEvent::PlayerHit { lives_left: self.lives });
            if self.lives == 0 {
                self.phase = Phase::GameOver;
                self.status = Status::GameOver;
                log::info!("shooter game over at wave {} with {} points", self.wave, self.score);
                events.push(ShooterEvent::GameOver { score: self.score });
            }
        }
    }

    fn check_wave_complete(&mut self, events: &mut Vec<ShooterEvent>) {
        if self.enemies.is_empty() && self.wave_kills > 0 {
            self.wave += 1;
            self.spawn_wave();
            self.status = Status::Wave(self.wave);
            log::info!("shooter wave {}", self.wave);
            events.push(ShooterEvent::WaveCleared { next_wave: self.wave });
        }
    }
}
