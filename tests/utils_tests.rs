//! Utility modules used the way sketches use them: through the facade.

use avour::utils::math::{cubic_bezier, smoothen_tuples};
use avour::utils::{ConstrainedBody, SpriteBody, TimeLogger, Vector2D};
use avour::{Avour, Color, Config, DrawCommand, Driver, ShapeStyle, Sketch};
use std::f32::consts::PI;
use std::time::Instant;

struct SpriteSketch {
    sprite: SpriteBody,
    show_mesh: bool,
}

impl Sketch for SpriteSketch {
    fn draw(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        app.color(7);
        app.thickness(9.0);
        self.sprite.draw(app, self.show_mesh, true)?;
        // the sprite restores the pen it found
        anyhow::ensure!(app.draw_state().color == Color::gray(7));
        anyhow::ensure!(app.draw_state().thickness == 9.0);
        Ok(())
    }
}

fn square_sprite(at: (f32, f32)) -> SpriteBody {
    let mut sprite = SpriteBody::new();
    sprite.add_rect((0.0, 0.0), 10.0, 10.0, true, (10, 20, 30));
    sprite.position = Vector2D::from(at);
    sprite
}

#[test]
fn test_sprite_draws_through_facade() {
    let sketch = SpriteSketch {
        sprite: square_sprite((100.0, 100.0)),
        show_mesh: true,
    };
    let mut driver = Driver::new(Avour::new(Config::default()).unwrap(), sketch);
    driver.attach((800, 600)).unwrap();
    driver.frame(Instant::now()).unwrap();

    let commands = driver.commands();
    assert_eq!(commands.len(), 2);
    match &commands[0] {
        DrawCommand::Polygon { points, style } => {
            assert_eq!(points.len(), 4);
            assert_eq!(*style, ShapeStyle::Fill(Color::rgb(10, 20, 30)));
            for (x, y) in points {
                assert!((95.0..=105.0).contains(x) && (95.0..=105.0).contains(y));
            }
        }
        other => panic!("expected a filled polygon, got {other:?}"),
    }
    // collision mesh outline
    assert!(matches!(commands[1], DrawCommand::Polyline { closed: true, .. }));
}

#[test]
fn test_sprite_collision_follows_position() {
    let a = square_sprite((0.0, 0.0));
    let mut b = square_sprite((8.0, 0.0));
    assert!(a.collides_with(&b));

    b.position = Vector2D::new(30.0, 0.0);
    assert!(!a.collides_with(&b));

    // rotating by 45 degrees widens the bounding box enough to touch again
    b.position = Vector2D::new(11.5, 0.0);
    assert!(!a.collides_with(&b));
    b.angle = PI / 4.0;
    assert!(a.collides_with(&b));
}

#[test]
fn test_smoothing_a_bezier_keeps_endpoints() {
    let curve = cubic_bezier((0.0, 0.0), (10.0, 30.0), (30.0, -30.0), (40.0, 0.0), 10);
    let smooth = smoothen_tuples(&curve, 3.0);
    assert_eq!(smooth.len(), curve.len() * 3);

    let first = smooth[0];
    let last = smooth[smooth.len() - 1];
    assert!((first.0 - 0.0).abs() < 1e-3 && (first.1 - 0.0).abs() < 1e-3);
    assert!((last.0 - 40.0).abs() < 1e-3 && (last.1 - 0.0).abs() < 1e-3);
}

#[test]
fn test_chain_trails_behind_moving_root() {
    let mut body = ConstrainedBody::unconstrained(Vector2D::origin(), "head");
    for i in 1..10 {
        let parent = if i == 1 { "head".to_string() } else { (i - 1).to_string() };
        body.add_node_to_parent(Vector2D::new(i as f32 * 10.0, 0.0), &i.to_string(), &parent)
            .unwrap();
    }

    for step in 1..=20 {
        body.move_root(Vector2D::new(0.0, step as f32 * 5.0));
    }

    let positions = body.positions();
    assert_eq!(positions[0], Vector2D::new(0.0, 100.0));
    for pair in positions.windows(2) {
        assert!((pair[0].dist(pair[1]) - 10.0).abs() < 1e-3);
    }
    // the tail was dragged up towards the head's path
    let tail = positions[positions.len() - 1];
    assert!(tail.y > 0.0 && tail.x < 90.0, "tail at {tail}");
}

#[test]
fn test_time_logger_tracks_closures() {
    let mut logger = TimeLogger::new();
    let sum: u32 = logger.track("sum", || (1..=10).sum());
    assert_eq!(sum, 55);
    logger.track("sum", || ());
    assert_eq!(logger.times("sum").map(<[_]>::len), Some(2));
    assert!(logger.describe().contains("sum"));
    assert!(logger.times("missing").is_none());
}
