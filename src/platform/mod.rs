//! Platform layer: window events and the framework loop
//!
//! The framework owns a `GameClient` and calls back into it. It polls an
//! `EventSource` for window messages and, whenever the queue is empty, runs
//! one update + render pair. Everything happens on the calling thread.

use std::collections::VecDeque;

use glam::Vec2;

use crate::renderer::Renderer;

/// Window messages the game cares about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    LeftButtonDown(Vec2),
    LeftButtonUp(Vec2),
    KeyDown(char),
    KeyUp(char),
    Close,
}

/// Result of polling the event source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poll {
    Event(WindowEvent),
    /// No pending messages; time for a frame
    Idle,
    /// The window is gone
    Closed,
}

/// Source of window messages
pub trait EventSource {
    fn poll(&mut self) -> Poll;
}

/// Callbacks the framework drives
pub trait GameClient {
    /// Advance the game by `dt` seconds
    fn on_update(&mut self, dt: f32);
    /// Draw the current frame
    fn on_render(&mut self, renderer: &mut dyn Renderer);
    /// React to a window message
    fn on_message(&mut self, event: &WindowEvent);
}

/// Highest accepted vsync interval
pub const MAX_PRESENT_INTERVAL: u32 = 4;

/// Drives a client with events and frames
pub struct Framework<C, R> {
    client: C,
    renderer: R,
    present_interval: u32,
    frames: u64,
    running: bool,
}

impl<C: GameClient, R: Renderer> Framework<C, R> {
    pub fn new(client: C, renderer: R, present_interval: u32) -> Self {
        Self {
            client,
            renderer,
            present_interval: present_interval.min(MAX_PRESENT_INTERVAL),
            frames: 0,
            running: true,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn present_interval(&self) -> u32 {
        self.present_interval
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn into_parts(self) -> (C, R) {
        (self.client, self.renderer)
    }

    /// Pass a message to the client, then apply framework-level handling
    pub fn dispatch(&mut self, event: WindowEvent) {
        self.client.on_message(&event);

        match event {
            WindowEvent::KeyUp(key) => {
                if let Some(interval) = key.to_digit(10).filter(|d| *d <= MAX_PRESENT_INTERVAL) {
                    self.present_interval = interval;
                    log::info!("Present interval set to {}", interval);
                }
            }
            WindowEvent::Close => {
                self.running = false;
            }
            _ => {}
        }
    }

    /// One update + render pair
    pub fn frame(&mut self, dt: f32) {
        self.client.on_update(dt);
        self.renderer.begin_frame();
        self.client.on_render(&mut self.renderer);
        self.renderer.end_frame();
        self.frames += 1;
    }

    /// Pump `source` until it closes, running a frame of `dt` seconds
    /// whenever it has nothing queued
    pub fn run(&mut self, source: &mut dyn EventSource, dt: f32) {
        log::info!("Framework loop starting");
        while self.running {
            match source.poll() {
                Poll::Event(event) => self.dispatch(event),
                Poll::Idle => self.frame(dt),
                Poll::Closed => self.running = false,
            }
        }
        log::info!("Framework loop stopped after {} frames", self.frames);
    }
}

/// Event source replaying a fixed script
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<Poll>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, poll: Poll) -> &mut Self {
        self.queue.push_back(poll);
        self
    }

    /// Queue a full left click (down then up) at `point`
    pub fn click(&mut self, point: Vec2) -> &mut Self {
        self.push(Poll::Event(WindowEvent::LeftButtonDown(point)))
            .push(Poll::Event(WindowEvent::LeftButtonUp(point)))
    }

    /// Queue `count` idle polls, i.e. `count` frames
    pub fn frames(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.queue.push_back(Poll::Idle);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self) -> Poll {
        self.queue.pop_front().unwrap_or(Poll::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandRecorder;
    use crate::sim::Color;

    #[derive(Default)]
    struct Probe {
        updates: Vec<f32>,
        renders: usize,
        messages: Vec<WindowEvent>,
    }

    impl GameClient for Probe {
        fn on_update(&mut self, dt: f32) {
            self.updates.push(dt);
        }

        fn on_render(&mut self, renderer: &mut dyn Renderer) {
            self.renders += 1;
            renderer.print(0.0, 0.0, "frame", Color::WHITE);
        }

        fn on_message(&mut self, event: &WindowEvent) {
            self.messages.push(*event);
        }
    }

    #[test]
    fn test_run_dispatches_then_frames() {
        let mut framework = Framework::new(Probe::default(), CommandRecorder::new(), 1);
        let mut script = ScriptedEvents::new();
        script.click(Vec2::new(10.0, 20.0)).frames(3);

        framework.run(&mut script, 0.25);

        let probe = framework.client();
        assert_eq!(probe.messages.len(), 2);
        assert_eq!(
            probe.messages[1],
            WindowEvent::LeftButtonUp(Vec2::new(10.0, 20.0))
        );
        assert_eq!(probe.updates, vec![0.25; 3]);
        assert_eq!(probe.renders, 3);
        assert_eq!(framework.frames(), 3);
        assert_eq!(framework.renderer().frames(), 3);
        // Only the last frame's commands are kept
        assert_eq!(framework.renderer().texts().count(), 1);
        assert!(!framework.is_running());
    }

    #[test]
    fn test_digit_keys_set_present_interval() {
        let mut framework = Framework::new(Probe::default(), CommandRecorder::new(), 9);
        assert_eq!(framework.present_interval(), MAX_PRESENT_INTERVAL);

        framework.dispatch(WindowEvent::KeyUp('0'));
        assert_eq!(framework.present_interval(), 0);
        framework.dispatch(WindowEvent::KeyUp('3'));
        assert_eq!(framework.present_interval(), 3);
        // Out of range digits and other keys are ignored
        framework.dispatch(WindowEvent::KeyUp('7'));
        framework.dispatch(WindowEvent::KeyUp('x'));
        assert_eq!(framework.present_interval(), 3);
        // Key-down never changes it
        framework.dispatch(WindowEvent::KeyDown('1'));
        assert_eq!(framework.present_interval(), 3);
    }

    #[test]
    fn test_close_stops_loop() {
        let mut framework = Framework::new(Probe::default(), CommandRecorder::new(), 1);
        let mut script = ScriptedEvents::new();
        script
            .frames(2)
            .push(Poll::Event(WindowEvent::Close))
            .frames(5);

        framework.run(&mut script, 0.1);
        assert_eq!(framework.frames(), 2);
        assert_eq!(script.len(), 5);
    }
}
