use image::RgbaImage;
use log::debug;

use crate::canvas::Canvas;
use crate::color::{ColorConfig, ColorPair};
use crate::config::EditorConfig;
use crate::event::{EditorEvent, EventBus};
use crate::tools::Toolbox;
use crate::util::time::current_time_secs;

/// Work postponed until the canvas has settled
#[derive(Debug, Clone)]
pub enum DeferredTask {
    /// Overwrite the canvas raster, size included
    ReloadRaster(RgbaImage),
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: f64,
    task: DeferredTask,
}

/// Queue of deferred tasks, kept in scheduling order
#[derive(Debug, Default, Clone)]
pub struct Deferred {
    queue: Vec<Scheduled>,
}

impl Deferred {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: f64, task: DeferredTask) {
        self.queue.push(Scheduled { due, task });
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Earliest due time of any pending task
    pub fn next_due(&self) -> Option<f64> {
        self.queue.iter().map(|s| s.due).reduce(f64::min)
    }

    /// Remove and return the tasks due at `now`, oldest first
    pub fn take_due(&mut self, now: f64) -> Vec<DeferredTask> {
        let (due, pending): (Vec<_>, Vec<_>) = self.queue.drain(..).partition(|s| s.due <= now);
        self.queue = pending;
        due.into_iter().map(|s| s.task).collect()
    }

    pub fn take_all(&mut self) -> Vec<DeferredTask> {
        self.queue.drain(..).map(|s| s.task).collect()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Everything a command touches while it executes: the canvas, the shared
/// color pair, the live tools and the event bus.
#[derive(Debug)]
pub struct EditorContext {
    pub canvas: Canvas,
    pub colors: ColorConfig,
    pub tools: Toolbox,
    pub events: EventBus,
    deferred: Deferred,
    resize_settle_secs: f64,
}

impl EditorContext {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            canvas: Canvas::new(config.canvas_width, config.canvas_height, config.background),
            colors: ColorConfig::new(ColorPair::new(config.primary, config.secondary)),
            tools: Toolbox::new(config),
            events: EventBus::new(),
            deferred: Deferred::new(),
            resize_settle_secs: config.resize_settle_secs(),
        }
    }

    /// Set both active colors and notify listeners
    pub fn assign_colors(&mut self, pair: ColorPair) {
        self.colors.set_pair(pair);
        self.events.emit(EditorEvent::ColorsChanged {
            primary: pair.primary,
            secondary: pair.secondary,
        });
    }

    pub fn swap_colors(&mut self) {
        self.assign_colors(self.colors.pair().swapped());
    }

    /// Checkpoint the canvas raster
    pub fn save_canvas(&mut self) -> u64 {
        let checkpoint = self.canvas.save();
        self.events.emit(EditorEvent::CanvasSaved { checkpoint });
        checkpoint
    }

    pub fn resize_settle_secs(&self) -> f64 {
        self.resize_settle_secs
    }

    /// Run `task` once `delay_secs` have passed
    pub fn schedule(&mut self, delay_secs: f64, task: DeferredTask) {
        self.deferred.schedule(current_time_secs() + delay_secs, task);
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.deferred.is_empty()
    }

    pub fn next_task_due(&self) -> Option<f64> {
        self.deferred.next_due()
    }

    /// Run the tasks that are due at `now`. Returns how many ran.
    pub fn run_due_tasks(&mut self, now: f64) -> usize {
        let tasks = self.deferred.take_due(now);
        let count = tasks.len();
        for task in tasks {
            self.run_task(task);
        }
        count
    }

    /// Run every pending task regardless of its due time
    pub fn flush_deferred(&mut self) -> usize {
        let tasks = self.deferred.take_all();
        let count = tasks.len();
        for task in tasks {
            self.run_task(task);
        }
        count
    }

    /// Drop every pending task without running it
    pub fn cancel_deferred(&mut self) {
        if !self.deferred.is_empty() {
            debug!("Cancelling {} deferred tasks", self.deferred.len());
            self.deferred.clear();
        }
    }

    fn run_task(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::ReloadRaster(image) => {
                let (width, height) = image.dimensions();
                debug!("Reloading {}x{} raster", width, height);
                self.canvas.replace_image(image);
                self.events.emit(EditorEvent::CanvasResized { width, height });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_due_keeps_later_tasks() {
        let mut deferred = Deferred::new();
        deferred.schedule(1.0, DeferredTask::ReloadRaster(RgbaImage::new(1, 1)));
        deferred.schedule(5.0, DeferredTask::ReloadRaster(RgbaImage::new(2, 2)));
        assert_eq!(deferred.next_due(), Some(1.0));

        assert_eq!(deferred.take_due(2.0).len(), 1);
        assert_eq!(deferred.len(), 1);
        assert_eq!(deferred.next_due(), Some(5.0));
        assert!(deferred.take_due(2.0).is_empty());
        assert_eq!(deferred.take_all().len(), 1);
        assert!(deferred.is_empty());
    }

    #[test]
    fn flush_runs_reload_immediately() {
        let mut ctx = EditorContext::new(&EditorConfig::default());
        ctx.schedule(60.0, DeferredTask::ReloadRaster(RgbaImage::new(3, 2)));
        assert_eq!(ctx.run_due_tasks(current_time_secs()), 0);
        assert_eq!(ctx.flush_deferred(), 1);
        assert_eq!(ctx.canvas.size(), crate::canvas::CanvasSize::new(3, 2));
        assert!(!ctx.has_pending_tasks());
    }
}
