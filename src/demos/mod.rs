//! Bundled demo sketches launched by the `avour` binary.

pub mod shapes;
pub mod snake;
pub mod tester;

use crate::app::Avour;
use crate::error::AvourError;
use avour_config::Config;

pub use shapes::Shapes;
pub use snake::{Snake, SnakeSketch};
pub use tester::Tester;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Snake,
    Tester,
    Shapes,
}

impl Demo {
    /// Window title used when the config leaves it empty.
    pub fn title(self) -> &'static str {
        match self {
            Demo::Snake => "procedural snake",
            Demo::Tester => "game tester",
            Demo::Shapes => "avour shapes",
        }
    }

    /// Open a window and run the demo until it exits.
    pub fn run(self, mut config: Config) -> Result<(), AvourError> {
        if config.screen_title.is_empty() {
            config.screen_title = self.title().to_string();
        }
        let avour = Avour::new(config)?;
        match self {
            Demo::Snake => avour.run(SnakeSketch::default()),
            Demo::Tester => avour.run(Tester::new()),
            Demo::Shapes => avour.run(Shapes::new()),
        }
    }
}
