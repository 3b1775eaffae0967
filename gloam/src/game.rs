//! Core game state and the turn scheduler.

use gloam_core::Point;
use gloam_rl::{EventQueue, Fov, Grid};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::command::{self, Command};
use crate::config::{GameConfig, MapConfig};
use crate::entity::Player;
use crate::error::GenError;
use crate::gamemap::{self, Map};
use crate::message::MessageSink;
use crate::visibility;
use crate::world::{self, CellView};

/// Where the scheduler is within [`GameState::advance_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Waiting for the next tick.
    #[default]
    Idle,
    /// Executing queued commands.
    Draining,
}

/// Notified whenever the game state changes in a way a renderer should
/// show.
pub trait StateObserver {
    fn on_state_changed(&mut self, state: &GameState);
}

/// Ignores every notification.
impl StateObserver for () {
    fn on_state_changed(&mut self, _state: &GameState) {}
}

impl<F> StateObserver for F
where
    F: FnMut(&GameState),
{
    fn on_state_changed(&mut self, state: &GameState) {
        self(state)
    }
}

/// Core game state: one map, the player, and the pending commands.
pub struct GameState {
    pub map: Map,
    pub player: Player,
    config: GameConfig,
    commands: EventQueue<Command>,
    rng: StdRng,
    fov: Fov,
    /// Cells seen by the last [`update_visibility`](Self::update_visibility).
    visible: Vec<Point>,
    in_view: Grid<bool>,
    scheduler: SchedulerState,
    tick: u64,
}

impl GameState {
    /// Start a game: seed the RNG and generate the first map.
    pub fn new(config: GameConfig) -> Result<Self, GenError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random::<u64>()),
        };
        let (map, player) = gamemap::generate(&mut rng, &config.map)?;
        Ok(Self::with_rng(config, map, player, rng))
    }

    /// A game on a prepared map, with the RNG seeded from `config`.
    pub fn with_map(config: GameConfig, map: Map, player: Player) -> Self {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_default());
        Self::with_rng(config, map, player, rng)
    }

    fn with_rng(config: GameConfig, map: Map, player: Player, rng: StdRng) -> Self {
        let mut state = Self {
            fov: Fov::new(map.bounds()),
            in_view: Grid::new(map.width(), map.height(), false),
            map,
            player,
            config,
            commands: EventQueue::new(),
            rng,
            visible: Vec::new(),
            scheduler: SchedulerState::Idle,
            tick: 0,
        };
        state.update_visibility();
        state
    }

    /// Replace the current floor with a freshly generated one.
    ///
    /// On error the current map, player and queue are left untouched.
    pub fn generate_map(&mut self, config: MapConfig) -> Result<(), GenError> {
        let (map, player) = gamemap::generate(&mut self.rng, &config)?;
        self.fov.set_range(map.bounds());
        self.in_view = Grid::new(map.width(), map.height(), false);
        self.map = map;
        self.player = player;
        self.config.map = config;
        self.commands.clear();
        self.update_visibility();
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// ASCII picture of the current map with the player on it.
    pub fn render_ascii(&self) -> String {
        self.map.render_ascii(self.player.pos)
    }

    // -------------------------------------------------------------------
    // Command queue
    // -------------------------------------------------------------------

    pub fn enqueue(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// Queue the command named by an input identifier. Unknown ids are
    /// dropped; returns whether something was queued.
    pub fn enqueue_id(&mut self, id: &str) -> bool {
        match Command::from_id(id) {
            Some(cmd) => {
                self.enqueue(cmd);
                true
            }
            None => {
                log::debug!("ignoring unknown command id {id:?}");
                false
            }
        }
    }

    /// Drop every pending command.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Pending commands, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Command> + '_ {
        self.commands.iter()
    }

    /// Run one tick.
    ///
    /// Commands are executed in arrival order while the player has at least
    /// 1.0 energy; the sink receives each command's messages and the
    /// observer is notified after each one. The sink is then told the tick
    /// is over, energy below 1.0 regenerates by 1.0, and the observer is
    /// notified a final time.
    /// Returns the number of commands executed.
    pub fn advance_tick<S, O>(&mut self, sink: &mut S, observer: &mut O) -> usize
    where
        S: MessageSink + ?Sized,
        O: StateObserver + ?Sized,
    {
        let mut executed = 0;
        while self.player.energy >= 1.0 {
            let Some(cmd) = self.commands.pop() else {
                break;
            };
            self.scheduler = SchedulerState::Draining;
            log::trace!("tick {}: executing {cmd}", self.tick);
            for m in command::execute(self, cmd) {
                sink.emit(&m.text, m.channel);
            }
            observer.on_state_changed(self);
            executed += 1;
        }
        self.scheduler = SchedulerState::Idle;
        sink.end_tick();

        if self.player.energy < 1.0 {
            self.player.energy += 1.0;
        }
        self.tick += 1;
        log::debug!(
            "tick {} done: {executed} commands, {} pending, energy {}",
            self.tick,
            self.commands.len(),
            self.player.energy
        );
        observer.on_state_changed(self);
        executed
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    pub fn query_cell(&self, p: Point) -> CellView {
        world::query_cell(&self.map, &self.player, p)
    }

    /// Sweep sight from `origin`, refreshing memory of every visible cell
    /// and passing each to `on_visible`. Does not change the cached
    /// [`visible`](Self::visible) set.
    pub fn compute_visible(
        &mut self,
        origin: Point,
        radius: i32,
        on_visible: impl FnMut(Point, &CellView),
    ) -> Vec<Point> {
        visibility::compute_visible(
            &mut self.fov,
            &mut self.map,
            &self.player,
            origin,
            radius,
            self.config.fov_shape,
            on_visible,
        )
    }

    /// Recompute what the player sees from where they stand.
    pub fn update_visibility(&mut self) -> &[Point] {
        let visible = self.compute_visible(self.player.pos, self.config.fov_radius, |_, _| {});
        self.in_view.fill(false);
        for &p in &visible {
            self.in_view.set(p, true);
        }
        self.visible = visible;
        &self.visible
    }

    /// Cells the player currently sees.
    pub fn visible(&self) -> &[Point] {
        &self.visible
    }

    pub fn is_visible(&self, p: Point) -> bool {
        self.in_view.at(p).unwrap_or(false)
    }
}
