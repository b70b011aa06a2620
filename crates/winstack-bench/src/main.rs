use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use ratatui::{buffer::Buffer, layout::Rect};

use winstack::render::{CellGrid, OpenStepDecorator, render_desktop};
use winstack::{
    DragHandle, HeadlessBackend, Placement, RegistryConfig, ResizeEdge, Vec2, WindowCatalog,
    WindowFlags, WindowKind, WindowRegistry, WindowTemplate,
};

const POOLED_KINDS: [&str; 4] = ["Menu", "Settings", "Inspector", "Console"];
const MULTI_KIND: &str = "Sample";

#[derive(Parser, Debug)]
#[command(
    name = "winstack-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create/focus/drag/close churn against a headless window registry"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 3.0
    )]
    duration_seconds: f64,

    /// Soft cap on simultaneously open windows.
    #[arg(short = 'w', long = "windows", default_value_t = 64)]
    max_windows: usize,

    /// Render the desktop into an off-screen buffer every N operations (0 = never).
    #[arg(short = 'r', long = "render-every", default_value_t = 256)]
    render_every: u64,

    /// Fixed seed for a repeatable operation mix.
    #[arg(long)]
    seed: Option<u64>,
}

struct BenchConfig {
    duration: Duration,
    max_windows: usize,
    render_every: u64,
    seed: u64,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.1..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.1 and 600 seconds".to_string());
        }
        if !(1..=10_000).contains(&cli.max_windows) {
            return Err("windows must be between 1 and 10000".to_string());
        }
        let seed = cli.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
                ^ 0xA5A5_A5A5_1234_5678
        });
        Ok(Self {
            duration: Duration::from_secs_f64(cli.duration_seconds),
            max_windows: cli.max_windows,
            render_every: cli.render_every,
            seed,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let mut registry = build_registry();
    registry.init().map_err(io::Error::other)?;
    let stats = run_benchmark(&mut registry, &config);
    registry.shutdown();

    println!("{}", stats.final_report(&config));
    Ok(())
}

fn build_registry() -> WindowRegistry<HeadlessBackend> {
    let mut catalog = WindowCatalog::new().with(
        MULTI_KIND,
        WindowKind::new(WindowTemplate::default().with_flags(WindowFlags {
            allow_multiple_instance: true,
            ..WindowFlags::default()
        })),
    );
    for key in POOLED_KINDS {
        catalog.register(key, WindowKind::new(WindowTemplate::default()));
    }
    WindowRegistry::new(catalog, HeadlessBackend::new())
        .with_config(RegistryConfig::default().with_fallback_kind(POOLED_KINDS[0]))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Create,
    Reuse,
    Focus,
    Drag,
    Minimize,
    Restore,
    Maximize,
    Close,
    Trim,
}

impl Op {
    const ALL: [Op; 9] = [
        Op::Create,
        Op::Reuse,
        Op::Focus,
        Op::Drag,
        Op::Minimize,
        Op::Restore,
        Op::Maximize,
        Op::Close,
        Op::Trim,
    ];

    fn pick(roll: u32) -> Op {
        // weights favour the hot paths: focus and drag
        match roll % 32 {
            0..=3 => Op::Create,
            4..=6 => Op::Reuse,
            7..=14 => Op::Focus,
            15..=22 => Op::Drag,
            23..=24 => Op::Minimize,
            25..=26 => Op::Restore,
            27 => Op::Maximize,
            28..=30 => Op::Close,
            _ => Op::Trim,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Op::Create => "create",
            Op::Reuse => "reuse",
            Op::Focus => "focus",
            Op::Drag => "drag",
            Op::Minimize => "minimize",
            Op::Restore => "restore",
            Op::Maximize => "maximize",
            Op::Close => "close",
            Op::Trim => "trim",
        }
    }
}

fn run_benchmark(registry: &mut WindowRegistry<HeadlessBackend>, config: &BenchConfig) -> BenchStats {
    let mut stats = BenchStats::new();
    let mut rng = Lcg::new(config.seed);
    let area = Rect::new(0, 0, 160, 48);
    let grid = CellGrid::new(area, Vec2::new(12.0, 22.5));
    let mut buffer = Buffer::empty(area);

    while stats.elapsed() < config.duration {
        let op = Op::pick(rng.next());
        let ok = apply_op(registry, op, &mut rng, config.max_windows);
        stats.record_op(op, ok);

        if config.render_every > 0 && stats.total_ops % config.render_every == 0 {
            let started = Instant::now();
            buffer.reset();
            render_desktop(&mut buffer, &grid, registry, &OpenStepDecorator);
            stats.record_frame(started.elapsed());
        }
    }
    stats.live_at_end = registry.backend().live_count();
    stats.instantiated = registry.backend().instantiated_count();
    stats.destroyed = registry.backend().destroyed_count();
    stats.mark_completed();
    stats
}

fn apply_op(
    registry: &mut WindowRegistry<HeadlessBackend>,
    op: Op,
    rng: &mut Lcg,
    max_windows: usize,
) -> bool {
    let open = registry.z_order().snapshot();
    let pick_open = |rng: &mut Lcg| -> Option<winstack::WindowId> {
        if open.is_empty() {
            None
        } else {
            Some(open[rng.next() as usize % open.len()])
        }
    };
    match op {
        Op::Create => {
            if open.len() >= max_windows {
                return registry.close_topmost().is_ok();
            }
            let x = (rng.next() % 400) as f32 - 200.0;
            let y = (rng.next() % 240) as f32 - 120.0;
            registry
                .create_with_placement(MULTI_KIND, None, Placement::new(x, y, 180.0, 140.0))
                .is_ok()
        }
        Op::Reuse => {
            let key = POOLED_KINDS[rng.next() as usize % POOLED_KINDS.len()];
            registry.create(key, None).is_ok()
        }
        Op::Focus => pick_open(rng).is_some_and(|id| registry.focus(id).is_ok()),
        Op::Drag => {
            let Some(id) = pick_open(rng) else {
                return false;
            };
            let handle = match rng.next() % 5 {
                0 => DragHandle::Border(ResizeEdge::North),
                1 => DragHandle::Border(ResizeEdge::South),
                2 => DragHandle::Border(ResizeEdge::East),
                3 => DragHandle::Border(ResizeEdge::West),
                _ => DragHandle::Header,
            };
            if registry.begin_drag(id, handle).is_err() {
                return false;
            }
            let mut moved = false;
            for _ in 0..4 {
                let dx = (rng.next() % 41) as f32 - 20.0;
                let dy = (rng.next() % 41) as f32 - 20.0;
                moved |= registry.drag_by(id, Vec2::new(dx, dy));
            }
            registry.end_drag(id);
            moved
        }
        Op::Minimize => registry
            .topmost()
            .is_some_and(|id| registry.minimize(id).is_ok()),
        Op::Restore => registry
            .minimized_windows()
            .first()
            .copied()
            .is_some_and(|id| registry.restore_minimized(id).is_ok()),
        Op::Maximize => registry
            .topmost()
            .is_some_and(|id| registry.toggle_maximize(id).is_ok()),
        Op::Close => registry.close_topmost().is_ok(),
        Op::Trim => {
            registry.trim_pool();
            true
        }
    }
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    total_ops: u64,
    rejected_ops: u64,
    per_op: [u64; Op::ALL.len()],
    frame_count: u64,
    total_render_time: Duration,
    slowest_frame: Duration,
    live_at_end: usize,
    instantiated: usize,
    destroyed: usize,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            total_ops: 0,
            rejected_ops: 0,
            per_op: [0; Op::ALL.len()],
            frame_count: 0,
            total_render_time: Duration::ZERO,
            slowest_frame: Duration::ZERO,
            live_at_end: 0,
            instantiated: 0,
            destroyed: 0,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_op(&mut self, op: Op, ok: bool) {
        self.total_ops = self.total_ops.saturating_add(1);
        self.per_op[op.index()] = self.per_op[op.index()].saturating_add(1);
        if !ok {
            self.rejected_ops = self.rejected_ops.saturating_add(1);
        }
    }

    fn record_frame(&mut self, render_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.total_render_time += render_time;
        if render_time > self.slowest_frame {
            self.slowest_frame = render_time;
        }
    }

    fn average_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (self.total_render_time.as_secs_f64() / self.frame_count as f64) * 1_000.0
    }

    fn op_breakdown(&self) -> String {
        Op::ALL
            .iter()
            .map(|op| format!("{} {}", op.name(), self.per_op[op.index()]))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let ops_per_second = if elapsed > 0.0 {
            self.total_ops as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Window churn bench completed (seed {seed}).
            Duration: {elapsed:.2}s (target {target:.2}s)
            Operations: {ops} total (~{ops_per_sec:.0}/s), {rejected} rejected or no-op
            Mix: {mix}
            Widgets: {instantiated} instantiated, {destroyed} destroyed, {live} live at end
            Renders: {frames} | Avg: {avg:.3} ms | Worst: {worst:.3} ms
            "#,
            seed = config.seed,
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            ops = self.total_ops,
            ops_per_sec = ops_per_second,
            rejected = self.rejected_ops,
            mix = self.op_breakdown(),
            instantiated = self.instantiated,
            destroyed = self.destroyed,
            live = self.live_at_end,
            frames = self.frame_count,
            avg = self.average_frame_ms(),
            worst = self.slowest_frame.as_secs_f64() * 1_000.0,
        )
    }
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
}
