use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEvent};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use winstack::desktop::{Desktop, DesktopIcon};
use winstack::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use winstack::drivers::pointer::PointerTracker;
use winstack::drivers::{InputDriver, OutputDriver};
use winstack::log_buffer::{LogBufferHandle, set_global_log_buffer};
use winstack::prefs::JsonFilePreferences;
use winstack::render::{CellGrid, OpenStepDecorator, render_desktop, render_icons};
use winstack::settings::DisplaySettings;
use winstack::tracing_sub::{self, LogProfile};
use winstack::{
    CommandQueue, DragHandle, HeadlessBackend, Placement, PointerEvent, RegistryCommand,
    RegistryConfig, Vec2, Window, WindowBehavior, WindowCatalog, WindowEvent, WindowFlags,
    WindowId, WindowKind, WindowRegistry, WindowTemplate,
};

const MENU: &str = "Menu";
const SETTINGS: &str = "Settings";
const SAMPLE: &str = "Sample";
const MULTI: &str = "MultipleInstanceSample";
const WALLPAPER: &str = "Wallpaper";

const KEY_HELP: &str = indoc! {"
    Keys:
      esc      close the topmost window
      n        open another sample window
      o        open the pooled sample window
      s        open settings
      m / x    minimize / toggle maximize the topmost window
      r        restore the last minimized window
      t        trim the reuse pool
      + / -    step the DPI
      q        quit

    Drag a header to move a window, a border to resize it.
    Double-click a header to toggle maximize, a desktop icon to open it.
"};

/// Terminal desktop driving a window registry with the mouse and keyboard.
#[derive(Debug, Parser)]
#[command(version, about, after_help = KEY_HELP)]
struct Args {
    /// DPI to start with; overrides the stored preference.
    #[arg(long)]
    dpi: Option<f32>,
    /// JSON file for persisted preferences.
    #[arg(long)]
    prefs: Option<PathBuf>,
    /// release, development, editor or trace.
    #[arg(long, default_value = "development")]
    log_profile: LogProfile,
    /// Raw pixels per terminal column.
    #[arg(long, default_value_t = 8.0)]
    cell_width: f32,
    /// Raw pixels per terminal row.
    #[arg(long, default_value_t = 16.0)]
    cell_height: f32,
}

/// Closing the settings window returns to the menu.
struct SettingsBehavior;

impl WindowBehavior for SettingsBehavior {
    fn on_event(&self, _window: &Window, event: &WindowEvent, commands: &mut CommandQueue) {
        if let WindowEvent::Closed(_) = event {
            commands.push(RegistryCommand::Create {
                key: MENU.into(),
                title: None,
            });
        }
    }
}

fn demo_catalog() -> WindowCatalog {
    let fixed = WindowFlags {
        is_resizable: false,
        ..WindowFlags::default()
    };
    WindowCatalog::new()
        .with(
            MENU,
            WindowKind::new(
                WindowTemplate::default()
                    .with_flags(fixed)
                    .with_geometry(winstack::Geometry::centered(Vec2::ZERO, Vec2::new(160.0, 120.0)))
                    .with_default_title("Menu"),
            ),
        )
        .with(
            SETTINGS,
            WindowKind::new(
                WindowTemplate::default()
                    .with_flags(fixed)
                    .with_geometry(winstack::Geometry::centered(Vec2::ZERO, Vec2::new(240.0, 160.0)))
                    .with_default_title("Settings"),
            )
            .with_behavior(SettingsBehavior),
        )
        .with(SAMPLE, WindowKind::new(WindowTemplate::default()))
        .with(
            WALLPAPER,
            WindowKind::new(
                WindowTemplate::default()
                    .with_flags(WindowFlags {
                        has_header: false,
                        is_movable: false,
                        is_resizable: false,
                        ..WindowFlags::default()
                    })
                    .with_geometry(winstack::Geometry::centered(Vec2::ZERO, Vec2::new(200.0, 80.0))),
            ),
        )
        .with(
            MULTI,
            WindowKind::new(WindowTemplate::default().with_flags(WindowFlags {
                allow_multiple_instance: true,
                ..WindowFlags::default()
            })),
        )
}

struct App {
    registry: WindowRegistry<HeadlessBackend>,
    tracker: PointerTracker,
    display: DisplaySettings,
    desktop: Desktop,
    log: LogBufferHandle,
    target: Option<(WindowId, Option<DragHandle>)>,
    spawned: usize,
    status: String,
}

impl App {
    fn desktop_area(size: Rect) -> Rect {
        Rect::new(size.x, size.y, size.width, size.height.saturating_sub(1))
    }

    fn report<T>(&mut self, result: winstack::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.status = err.to_string();
                None
            }
        }
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        self.tracker
            .set_area(Self::desktop_area(Rect::new(0, 0, columns, rows)));
        let (width, height) = self.tracker.screen_pixels();
        let dpi = self.registry.scaler().dpi();
        let result = self.registry.set_dpi(width, height, dpi);
        self.report(result);
    }

    fn step_dpi(&mut self, forward: bool) {
        let current = self.registry.scaler().dpi();
        let options = &self.display.supported_dpi;
        let next = if forward {
            options.iter().copied().find(|d| *d > current)
        } else {
            options.iter().rev().copied().find(|d| *d < current)
        };
        let Some(dpi) = next else {
            return;
        };
        let (width, height) = self.tracker.screen_pixels();
        let result = self.display.apply(&mut self.registry, width, height, dpi);
        if self.report(result).is_some() {
            self.status = format!("dpi {}", DisplaySettings::dpi_label(dpi));
        }
    }

    fn spawn_sample(&mut self) {
        self.spawned += 1;
        let offset = (self.spawned % 6) as f32 * 12.0;
        let title = format!("Sample {}", self.spawned);
        let result = self.registry.create_with_placement(
            MULTI,
            Some(&title),
            Placement::new(offset - 40.0, 30.0 - offset, 180.0, 120.0),
        );
        self.report(result);
    }

    fn open_settings(&mut self) {
        let menu = self
            .registry
            .topmost()
            .filter(|id| {
                self.registry
                    .window(*id)
                    .is_some_and(|w| w.type_key().as_str() == MENU)
            });
        let result = self.registry.create(SETTINGS, None);
        self.report(result);
        if let Some(menu) = menu {
            let result = self.registry.close(menu);
            self.report(result);
        }
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let topmost = self.registry.topmost();
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Esc => {
                let result = self.registry.close_topmost();
                self.report(result);
            }
            KeyCode::Char('m') => {
                if let Some(id) = topmost {
                    let result = self.registry.minimize(id);
                    self.report(result);
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = topmost {
                    let result = self.registry.toggle_maximize(id);
                    self.report(result);
                }
            }
            KeyCode::Char('r') => {
                if let Some(id) = self.registry.minimized_windows().last().copied() {
                    let result = self.registry.restore_minimized(id);
                    self.report(result);
                }
            }
            KeyCode::Char('n') => self.spawn_sample(),
            KeyCode::Char('o') => {
                let result = self.registry.create(SAMPLE, None);
                self.report(result);
            }
            KeyCode::Char('s') => self.open_settings(),
            KeyCode::Char('t') => {
                let trimmed = self.registry.on_low_memory();
                self.status = format!("trimmed {trimmed} pooled window(s)");
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.step_dpi(true),
            KeyCode::Char('-') => self.step_dpi(false),
            _ => {}
        }
        false
    }

    fn click_desktop(&mut self, column: u16, row: u16) {
        let area = self.tracker.area();
        match self.desktop.icon_at(area, column, row) {
            Some(index) => {
                let result = self.desktop.launch(&mut self.registry, index, Instant::now());
                self.report(result);
            }
            None => self.desktop.click_background(),
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        for tracked in self.tracker.track(mouse) {
            match tracked.event {
                PointerEvent::Down => {
                    let point = self.registry.scaler().scale_point(tracked.position);
                    self.target = self
                        .registry
                        .hit_test(point)
                        .map(|hit| (hit.id, hit.region.drag_handle()));
                    match self.target {
                        Some((id, handle)) => {
                            let result = self.registry.pointer_down_at(id, handle, Instant::now());
                            self.report(result);
                        }
                        None => self.click_desktop(mouse.column, mouse.row),
                    }
                }
                event => {
                    let Some((id, handle)) = self.target else {
                        continue;
                    };
                    let result = self.registry.handle_pointer(id, handle, event);
                    self.report(result);
                    if event == PointerEvent::DragEnd {
                        self.target = None;
                    }
                }
            }
        }
    }

    fn status_line(&self) -> String {
        let last_log = self.log.tail(1).pop().unwrap_or_default();
        format!(
            " dpi {} | open {} | pooled {} | {} | {}",
            DisplaySettings::dpi_label(self.registry.scaler().dpi()),
            self.registry.open_count(),
            self.registry.pool_len(),
            self.status,
            last_log
        )
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let log = LogBufferHandle::default();
    set_global_log_buffer(log.clone());
    tracing_sub::init(args.log_profile);

    let mut output = ConsoleOutputDriver::new()?;
    let mut input = ConsoleInputDriver::new();
    let size = output.size()?;
    let area = App::desktop_area(Rect::new(0, 0, size.width, size.height));
    let tracker = PointerTracker::new(area, Vec2::new(args.cell_width, args.cell_height));
    let (width, height) = tracker.screen_pixels();

    let config = RegistryConfig::default()
        .with_screen(width.max(1), height.max(1))
        .with_fallback_kind(MENU);
    let mut registry = WindowRegistry::new(demo_catalog(), HeadlessBackend::new()).with_config(config);
    if let Some(path) = &args.prefs {
        let prefs = JsonFilePreferences::open(path).map_err(io::Error::other)?;
        registry = registry.with_preferences(prefs);
    }
    registry.init().map_err(io::Error::other)?;
    if let Some(dpi) = args.dpi {
        registry
            .set_dpi(width.max(1), height.max(1), dpi)
            .map_err(io::Error::other)?;
    }
    registry.create(MENU, None).map_err(io::Error::other)?;
    registry
        .open_in_background(WALLPAPER, Some("winstack"))
        .map_err(io::Error::other)?;

    let mut app = App {
        registry,
        tracker,
        display: DisplaySettings {
            // a terminal desktop is far smaller than a monitor
            minimum_resolution: (1, 1),
            ..DisplaySettings::default()
        },
        desktop: Desktop::new(vec![
            DesktopIcon::new("Menu", MENU),
            DesktopIcon::new("Settings", SETTINGS),
            DesktopIcon::new("Sample", SAMPLE),
            DesktopIcon::new("Multi", MULTI),
        ]),
        log,
        target: None,
        spawned: 0,
        status: String::from("esc close | n/o/s open | m min | x max | r restore | t trim | +/- dpi | q quit"),
    };

    output.enter()?;
    input.set_mouse_capture(true)?;
    let result = run(&mut app, &mut input, &mut output);
    input.set_mouse_capture(false)?;
    output.exit()?;
    app.registry.shutdown();
    result
}

fn run(
    app: &mut App,
    input: &mut impl InputDriver,
    output: &mut ConsoleOutputDriver,
) -> io::Result<()> {
    let decorator = OpenStepDecorator;
    loop {
        output.draw(|frame| {
            let full = frame.area();
            let grid = CellGrid::new(App::desktop_area(full), app.tracker.cell_size());
            let status = app.status_line();
            let buffer = frame.buffer_mut();
            render_icons(buffer, grid.area, &app.desktop);
            render_desktop(buffer, &grid, &app.registry, &decorator);
            if full.height > 0 {
                let style = Style::default().bg(Color::Gray).fg(Color::Black);
                let line: String = status.chars().take(full.width as usize).collect();
                buffer.set_string(full.x, full.bottom() - 1, line, style);
            }
        })?;

        if !input.poll(Duration::from_millis(50))? {
            continue;
        }
        match input.read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key.code, key.modifiers) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(&mouse),
            Event::Resize(columns, rows) => app.resize(columns, rows),
            _ => {}
        }
    }
}
