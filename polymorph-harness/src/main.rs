mod logging;

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use polymorph::kurbo::Size;
use polymorph::{
    BlurStyle, ButtonCanvas, ButtonConfig, ButtonEvent, PolymorphButton, StyleAlias, Timeline,
};
use polymorph::Style as Shape;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::logging::LoggingConfig;

struct HarnessConfig {
    fps: u32,
    morph: Duration,
    /// How long a tap holds the button down.
    press: Duration,
    samples: usize,
    margin_step: f64,
    logging: LoggingConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            morph: Duration::from_millis(300),
            press: Duration::from_millis(120),
            samples: 160,
            margin_step: 2.0,
            logging: LoggingConfig::default(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = HarnessConfig::default();
    logging::init_logging(&config.logging)?;

    enable_raw_mode()?;
    crossterm::execute!(io::stdout(), EnterAlternateScreen, EnableFocusChange)?;

    let result = run(&config);

    disable_raw_mode()?;
    crossterm::execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen)?;

    result
}

struct App {
    button: PolymorphButton<Timeline>,
    epoch: Instant,
    release_at: Option<Duration>,
    taps: Rc<Cell<u32>>,
    filled: bool,
    gradient: bool,
}

enum Control {
    Continue,
    Quit,
}

fn run(config: &HarnessConfig) -> anyhow::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let area = terminal.size()?;

    let button = PolymorphButton::new(
        Timeline::new(config.samples),
        canvas_bounds(area.width, area.height),
        ButtonConfig {
            stroke_color: Color::Rgb(240, 240, 240),
            highlighted_fill_color: Some(Color::Rgb(255, 90, 120)),
            ..ButtonConfig::default()
        },
    )?;

    let mut app = App {
        button,
        epoch: Instant::now(),
        release_at: None,
        taps: Rc::new(Cell::new(0)),
        filled: false,
        gradient: false,
    };

    let taps = Rc::clone(&app.taps);
    app.button.add_action(move |event| {
        let ButtonEvent::TouchUpInside { style } = event;
        taps.set(taps.get() + 1);
        log::info!("tap #{} on {style:?}", taps.get());
    });

    let frame_interval = Duration::from_secs(1) / config.fps;

    loop {
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(frame_interval)? {
            if let Control::Quit = handle(&mut app, config, event::read()?)? {
                break;
            }
        }

        advance(&mut app);
    }

    Ok(())
}

fn advance(app: &mut App) {
    let now = app.epoch.elapsed();

    for id in app.button.driver_mut().tick(now) {
        app.button.on_animation_complete(id);
    }

    if app.release_at.is_some_and(|at| now >= at) {
        app.release_at = None;
        app.button.touch_up();
    }
}

fn handle(app: &mut App, config: &HarnessConfig, event: Event) -> anyhow::Result<Control> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => on_key(app, config, key),
        Event::FocusLost => {
            app.button.suspend();
            Ok(Control::Continue)
        }
        Event::FocusGained => {
            app.button.resume();
            Ok(Control::Continue)
        }
        Event::Resize(width, height) => {
            app.button.set_bounds(canvas_bounds(width, height))?;
            Ok(Control::Continue)
        }
        _ => Ok(Control::Continue),
    }
}

fn on_key(app: &mut App, config: &HarnessConfig, key: KeyEvent) -> anyhow::Result<Control> {
    let button = &mut app.button;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),

        KeyCode::Char('c') => {
            button.set_style(Shape::Circle, config.morph);
        }
        KeyCode::Char('h') => {
            button.set_style(Shape::Heart, config.morph);
        }
        KeyCode::Char('s') => {
            button.set_style(Shape::Star, config.morph);
        }
        KeyCode::Char(digit @ '1'..='7') => {
            let index = digit as usize - '1' as usize;
            button.set_alias(StyleAlias::ALL[index], config.morph);
        }

        KeyCode::Char(' ') | KeyCode::Enter => {
            if button.touch_down() {
                app.release_at = Some(app.epoch.elapsed() + config.press);
            }
        }

        KeyCode::Char('+') | KeyCode::Char('=') => {
            let margins = button.config().margins + config.margin_step;
            button.set_margins(margins)?;
        }
        KeyCode::Char('-') => {
            let margins = (button.config().margins - config.margin_step).max(0.0);
            button.set_margins(margins)?;
        }

        KeyCode::Char('f') => {
            app.filled = !app.filled;
            button.set_fill_color(app.filled.then_some(Color::Rgb(90, 140, 255)));
        }
        KeyCode::Char('g') => {
            app.gradient = !app.gradient;
            let colors = vec![Color::Rgb(255, 200, 60), Color::Rgb(255, 60, 160)];
            button.set_gradient_colors(app.gradient.then_some(colors))?;
        }
        KeyCode::Char('v') => {
            let next = match button.config().vibrancy {
                None => Some(BlurStyle::ExtraLight),
                Some(BlurStyle::ExtraLight) => Some(BlurStyle::Light),
                Some(BlurStyle::Light) => Some(BlurStyle::Dark),
                Some(BlurStyle::Dark) => None,
            };
            button.set_vibrancy(next);
        }

        _ => {}
    }

    Ok(Control::Continue)
}

/// Control size in braille dots, so one unit is one dot on screen.
fn canvas_bounds(width: u16, height: u16) -> Size {
    let rows = height.saturating_sub(1);
    Size::new(width as f64 * 2.0, rows as f64 * 4.0)
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(f.area());

    f.render_widget(
        Paragraph::new(status(app)).style(Style::new().fg(Color::DarkGray)),
        chunks[0],
    );

    let presentation = app.button.driver().sample();
    f.render_widget(
        ButtonCanvas::new(&presentation, app.button.bounds()),
        chunks[1],
    );
}

fn status(app: &App) -> String {
    let button = &app.button;
    let mut flags = Vec::new();

    if button.is_animating() {
        flags.push("animating");
    }
    if button.is_highlighted() {
        flags.push("highlighted");
    }
    if button.is_suspended() {
        flags.push("suspended");
    }

    format!(
        "polymorph  {:?}  margins {}  taps {}  {}  [c/h/s 1-7 style] [space tap] [+/- margins] [f g v] [q quit]",
        button.current_style(),
        button.config().margins,
        app.taps.get(),
        flags.join(" "),
    )
}
