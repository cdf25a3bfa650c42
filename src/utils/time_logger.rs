//! Named timing spans with a min/max/avg summary.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct TimeLogger {
    /// Completed spans per tag, in first-seen order
    tags: Vec<(String, Vec<Duration>)>,
    started: HashMap<String, Instant>,
}

impl TimeLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the span for `tag`.
    pub fn start(&mut self, tag: &str) {
        self.started.insert(tag.to_string(), Instant::now());
    }

    /// Close the span for `tag`. Ignored if it was never started.
    pub fn end(&mut self, tag: &str) {
        let Some(start) = self.started.remove(tag) else {
            return;
        };
        self.record(tag, start.elapsed());
    }

    fn record(&mut self, tag: &str, elapsed: Duration) {
        match self.tags.iter_mut().find(|(t, _)| t == tag) {
            Some((_, times)) => times.push(elapsed),
            None => self.tags.push((tag.to_string(), vec![elapsed])),
        }
    }

    /// Time `f` under `tag` and pass its result through.
    pub fn track<T>(&mut self, tag: &str, f: impl FnOnce() -> T) -> T {
        self.start(tag);
        let result = f();
        self.end(tag);
        result
    }

    pub fn times(&self, tag: &str) -> Option<&[Duration]> {
        self.tags
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, times)| times.as_slice())
    }

    /// Summary of every tag: call count plus min, max and average seconds.
    pub fn describe(&self) -> String {
        let mut out = format!("{:=^30}\n", " TimeLogger ");
        for (i, (tag, times)) in self.tags.iter().enumerate() {
            let secs = times.iter().map(Duration::as_secs_f64);
            let min = secs.clone().fold(f64::INFINITY, f64::min);
            let max = secs.clone().fold(0.0, f64::max);
            let avg = secs.sum::<f64>() / times.len() as f64;
            let _ = writeln!(out, "{}) {} [count={}]", i + 1, tag, times.len());
            let _ = writeln!(out, "min: {min:.3} s, max: {max:.3} s, avg: {avg:.3} s");
        }
        out
    }
}
