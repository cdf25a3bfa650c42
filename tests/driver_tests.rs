//! Headless tests for the sketch lifecycle, driven through `Driver` without a
//! window or GPU.

use avour::{Avour, AvourError, Color, Config, Coord, DrawCommand, Driver, ShapeStyle, Sketch};
use std::time::Instant;

/// Records every hook call as a string.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    exit_on_key: Option<&'static str>,
}

impl Sketch for Recorder {
    fn setup(&mut self, _app: &mut Avour) -> anyhow::Result<()> {
        self.events.push("setup".to_string());
        Ok(())
    }

    fn draw(&mut self, _app: &mut Avour) -> anyhow::Result<()> {
        self.events.push("draw".to_string());
        Ok(())
    }

    fn update(&mut self, _app: &mut Avour, _dt: f32) -> anyhow::Result<()> {
        self.events.push("update".to_string());
        Ok(())
    }

    fn on_keydown(&mut self, app: &mut Avour, key: &str) -> anyhow::Result<()> {
        self.events.push(format!("keydown {key}"));
        if self.exit_on_key == Some(key) {
            app.exit();
        }
        Ok(())
    }

    fn on_keyup(&mut self, _app: &mut Avour, key: &str) -> anyhow::Result<()> {
        self.events.push(format!("keyup {key}"));
        Ok(())
    }

    fn on_mousemove(&mut self, _app: &mut Avour, pos: Coord) -> anyhow::Result<()> {
        self.events.push(format!("move {} {}", pos.0, pos.1));
        Ok(())
    }

    fn on_mousedrag(&mut self, _app: &mut Avour, pos: Coord, button: &str) -> anyhow::Result<()> {
        self.events.push(format!("drag {} {} {button}", pos.0, pos.1));
        Ok(())
    }

    fn on_mousedown(&mut self, _app: &mut Avour, _pos: Coord, button: &str) -> anyhow::Result<()> {
        self.events.push(format!("down {button}"));
        Ok(())
    }

    fn on_mouseup(&mut self, _app: &mut Avour, _pos: Coord, button: &str) -> anyhow::Result<()> {
        self.events.push(format!("up {button}"));
        Ok(())
    }

    fn on_deactivate(&mut self, _app: &mut Avour) -> anyhow::Result<()> {
        self.events.push("deactivate".to_string());
        Ok(())
    }
}

/// Draws whatever the closure draws, after an optional setup translate.
struct Painter<F> {
    offset: Option<Coord>,
    paint: F,
}

impl<F> Sketch for Painter<F>
where
    F: FnMut(&mut Avour) -> anyhow::Result<()>,
{
    fn setup(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        if let Some(offset) = self.offset {
            app.translate(offset);
        }
        Ok(())
    }

    fn draw(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        (self.paint)(app)
    }
}

fn driver<S: Sketch>(config: Config, sketch: S) -> Driver<S> {
    let mut driver = Driver::new(Avour::new(config).unwrap(), sketch);
    driver.attach((800, 600)).unwrap();
    driver
}

fn painter<F>(offset: Option<Coord>, paint: F) -> Driver<Painter<F>>
where
    F: FnMut(&mut Avour) -> anyhow::Result<()>,
{
    painter_with(Config::default(), offset, paint)
}

fn painter_with<F>(config: Config, offset: Option<Coord>, paint: F) -> Driver<Painter<F>>
where
    F: FnMut(&mut Avour) -> anyhow::Result<()>,
{
    driver(config, Painter { offset, paint })
}

fn inner_error(err: &AvourError) -> Option<&AvourError> {
    match err {
        AvourError::Sketch(e) => e.downcast_ref::<AvourError>(),
        _ => None,
    }
}

#[test]
fn test_setup_runs_once_on_attach() {
    let driver = driver(Config::default(), Recorder::default());
    assert_eq!(driver.sketch().events, vec!["setup"]);
    assert_eq!(driver.avour().get_screen_size(), (800, 600));
}

#[test]
fn test_grayscale_background_matches_rgb() {
    let mut driver = painter(None, |app: &mut Avour| {
        app.background(128)?;
        app.background((128, 128, 128))?;
        Ok(())
    });
    assert!(driver.frame(Instant::now()).unwrap());
    assert_eq!(
        driver.commands(),
        &[
            DrawCommand::Background(Color::gray(128)),
            DrawCommand::Background(Color::gray(128)),
        ]
    );
}

#[test]
fn test_translate_moves_origin_and_persists() {
    let mut driver = painter(Some((400.0, 300.0)), |app: &mut Avour| {
        app.color((255, 0, 0));
        app.circle((0.0, 0.0), 10.0)?;
        Ok(())
    });
    let expected = DrawCommand::Circle {
        center: (400.0, 300.0),
        radius: 10.0,
        style: ShapeStyle::Fill(Color::rgb(255, 0, 0)),
    };

    driver.frame(Instant::now()).unwrap();
    assert_eq!(driver.commands(), &[expected.clone()]);
    // the display list is rebuilt, not appended to
    driver.frame(Instant::now()).unwrap();
    assert_eq!(driver.commands(), &[expected]);
}

#[test]
fn test_translate_replaces_previous_offset() {
    let mut driver = painter(None, |app: &mut Avour| {
        app.translate((50.0, 50.0));
        app.translate((50.0, 50.0));
        app.line((0.0, 0.0), (10.0, 0.0))?;
        Ok(())
    });
    driver.frame(Instant::now()).unwrap();
    match driver.commands() {
        [DrawCommand::Line { start, end, .. }] => {
            assert_eq!(*start, (50.0, 50.0));
            assert_eq!(*end, (60.0, 50.0));
        }
        other => panic!("unexpected commands {other:?}"),
    }
}

#[test]
fn test_draw_before_window_is_not_ready() {
    let mut app = Avour::new(Config::default()).unwrap();
    assert!(matches!(app.circle((0.0, 0.0), 5.0), Err(AvourError::NotReady)));
}

#[test]
fn test_draw_outside_frame_rejected() {
    let mut driver = driver(Config::default(), Recorder::default());
    assert!(matches!(
        driver.avour_mut().background(0),
        Err(AvourError::OutsideFrame)
    ));
}

#[test]
fn test_draw_inside_physics_rejected() {
    struct DrawsInUpdate;
    impl Sketch for DrawsInUpdate {
        fn update(&mut self, app: &mut Avour, _dt: f32) -> anyhow::Result<()> {
            app.circle((0.0, 0.0), 1.0)?;
            Ok(())
        }
    }

    let mut driver = driver(Config::default(), DrawsInUpdate);
    let err = driver.physics_tick(1.0 / 120.0).unwrap_err();
    assert!(matches!(inner_error(&err), Some(AvourError::DrawInsidePhysics)));
    assert!(format!("{err:#}").contains("update() failed"));

    // the phase is restored after the failing hook
    assert!(matches!(
        driver.avour_mut().circle((0.0, 0.0), 1.0),
        Err(AvourError::OutsideFrame)
    ));
}

#[test]
fn test_hook_error_surfaces_as_sketch_error() {
    struct FailsSetup;
    impl Sketch for FailsSetup {
        fn setup(&mut self, _app: &mut Avour) -> anyhow::Result<()> {
            anyhow::bail!("no assets")
        }
    }

    let mut driver = Driver::new(Avour::new(Config::default()).unwrap(), FailsSetup);
    let err = driver.attach((800, 600)).unwrap_err();
    assert!(matches!(err, AvourError::Sketch(_)));
    let message = format!("{err:#}");
    assert!(message.contains("setup() failed"));
    assert!(message.contains("no assets"));
}

#[test]
fn test_exit_stops_further_hooks() {
    let sketch = Recorder {
        exit_on_key: Some("Q"),
        ..Default::default()
    };
    let mut driver = driver(Config::default(), sketch);
    driver.key_down("Q").unwrap();
    assert!(driver.is_exiting());

    assert!(!driver.frame(Instant::now()).unwrap());
    driver.physics_tick(0.01).unwrap();
    driver.key_up("Q").unwrap();
    driver.mouse_moved((1.0, 1.0)).unwrap();
    assert_eq!(driver.sketch().events, vec!["setup", "keydown Q"]);
}

#[test]
fn test_exit_in_draw_keeps_final_frame() {
    let mut driver = painter(None, |app: &mut Avour| {
        app.background(40)?;
        app.exit();
        Ok(())
    });
    assert!(driver.frame(Instant::now()).unwrap());
    assert!(driver.is_exiting());
    assert_eq!(driver.commands(), &[DrawCommand::Background(Color::gray(40))]);

    // later frames leave the final display list in place
    assert!(!driver.frame(Instant::now()).unwrap());
    assert_eq!(driver.commands().len(), 1);
}

#[test]
fn test_close_request_exits() {
    let mut driver = driver(Config::default(), Recorder::default());
    driver.close_requested();
    assert!(!driver.frame(Instant::now()).unwrap());
}

#[test]
fn test_keys_active_counts_physics_ticks() {
    let mut driver = driver(Config::default(), Recorder::default());
    driver.key_down("A").unwrap();
    assert_eq!(driver.avour().key_hold_ticks("A"), Some(0));
    for _ in 0..3 {
        driver.physics_tick(0.01).unwrap();
    }
    assert_eq!(driver.avour().key_hold_ticks("A"), Some(3));

    driver.key_up("A").unwrap();
    assert!(driver.avour().keys_active().is_empty());
    assert_eq!(
        driver.sketch().events,
        vec!["setup", "keydown A", "update", "update", "update", "keyup A"]
    );
}

#[test]
fn test_drag_only_while_button_held() {
    let sketch = Recorder::default();
    let mut driver = driver(Config::default(), sketch);
    driver.avour_mut().translate((100.0, 100.0));

    driver.mouse_moved((110.0, 120.0)).unwrap();
    driver.mouse_down("LEFT").unwrap();
    driver.mouse_moved((130.0, 140.0)).unwrap();
    driver.mouse_up("LEFT").unwrap();
    driver.mouse_moved((100.0, 100.0)).unwrap();

    assert_eq!(
        driver.sketch().events,
        vec![
            "setup",
            "move 10 20",
            "down LEFT",
            "drag 30 40 LEFT",
            "up LEFT",
            "move 0 0",
        ]
    );
}

#[test]
fn test_deactivate_releases_buttons() {
    let mut driver = driver(Config::default(), Recorder::default());
    driver.mouse_down("RIGHT").unwrap();
    driver.focus(false).unwrap();
    driver.mouse_moved((5.0, 5.0)).unwrap();
    assert_eq!(
        driver.sketch().events,
        vec!["setup", "down RIGHT", "deactivate", "move 5 5"]
    );
}

#[test]
fn test_resize_updates_screen_size() {
    let mut driver = driver(Config::default(), Recorder::default());
    driver.resized((1024, 768));
    assert_eq!(driver.avour().get_screen_size(), (1024, 768));
}

#[test]
fn test_fps_overlay_appended_when_enabled() {
    let mut plain = painter(None, |app: &mut Avour| {
        app.background(0)?;
        Ok(())
    });
    plain.frame(Instant::now()).unwrap();
    assert_eq!(plain.commands().len(), 1);

    let config = Config::new().with_show_fps(true);
    let mut with_fps = painter_with(config, None, |app: &mut Avour| {
        app.background(0)?;
        Ok(())
    });
    with_fps.frame(Instant::now()).unwrap();
    assert_eq!(with_fps.commands().len(), 2);
    assert!(matches!(
        with_fps.commands().last(),
        Some(DrawCommand::Text(text)) if text.pos == (10.0, 10.0)
    ));
}

#[test]
fn test_invalid_rate_from_hook() {
    struct ZeroRate;
    impl Sketch for ZeroRate {
        fn setup(&mut self, app: &mut Avour) -> anyhow::Result<()> {
            app.set_physics_rate(0)?;
            Ok(())
        }
    }

    let mut driver = Driver::new(Avour::new(Config::default()).unwrap(), ZeroRate);
    let err = driver.attach((800, 600)).unwrap_err();
    assert!(matches!(
        inner_error(&err),
        Some(AvourError::InvalidRate { what: "physics", value: 0 })
    ));
}
