use crate::frame::{DrawKind, Frame};
use std::collections::BTreeMap;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer consumes a [`Frame`] built from simulation state. It never
/// sees the simulation itself.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    fn render(&mut self, frame: &Frame) -> Self::Output;
}

/// Text renderer for CLI output, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also list every draw item, not just the counts.
    pub verbose: bool,
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self {
            verbose: true,
            frames: 0,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &Frame) -> String {
        self.frames += 1;
        let mut out = String::new();
        let v = &frame.view;
        out.push_str(&format!("=== Frame {} ===\n", self.frames));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            v.eye.x, v.eye.y, v.eye.z, v.target.x, v.target.y, v.target.z, v.fov_degrees
        ));

        let mut counts: BTreeMap<DrawKind, usize> = BTreeMap::new();
        for item in &frame.items {
            *counts.entry(item.kind).or_default() += 1;
        }
        let summary: Vec<String> = counts
            .iter()
            .map(|(kind, n)| format!("{}={n}", kind.as_str()))
            .collect();
        out.push_str(&format!(
            "Items: {} [{}]\n",
            frame.items.len(),
            summary.join(" ")
        ));

        if let Some(field) = &frame.field {
            out.push_str(&format!(
                "Field: {}x{} instances, time={:.2}\n",
                field.grid, field.grid, field.time
            ));
        }
        if frame.grid.is_some() {
            out.push_str("Grid: on\n");
        }
        if frame.sky.is_some() {
            out.push_str("Sky: on\n");
        }
        out.push_str(&format!(
            "Lights: {} point, spot={}\n",
            frame.lighting.points.len(),
            if frame.lighting.spot.is_some() { "on" } else { "off" }
        ));
        for light in &frame.lighting.points {
            let p = light.position;
            out.push_str(&format!(
                "  light pos=({:.2}, {:.2}, {:.2})\n",
                p.x, p.y, p.z
            ));
        }

        if self.verbose {
            for item in &frame.items {
                let p = item.position();
                out.push_str(&format!(
                    "  {} pos=({:.2}, {:.2}, {:.2})\n",
                    item.kind.as_str(),
                    p.x,
                    p.y,
                    p.z
                ));
            }
        }
        out
    }
}
