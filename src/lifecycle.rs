use winit::event::WindowEvent;

use crate::{EXIT_MAP_FAILED, EXIT_OK};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Initializing,
    Running,
    Closed,
    FailedToLoadTexture,
}

impl Lifecycle {
    pub fn map_loaded(&mut self) {
        self.advance(Lifecycle::Initializing, Lifecycle::Running);
    }

    pub fn map_failed(&mut self) {
        self.advance(Lifecycle::Initializing, Lifecycle::FailedToLoadTexture);
    }

    /// Returns `true` once the event loop should stop.
    pub fn window_event(&mut self, event: &WindowEvent<'_>) -> bool {
        if let WindowEvent::CloseRequested = event {
            self.advance(Lifecycle::Running, Lifecycle::Closed);
        }

        *self == Lifecycle::Closed
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Lifecycle::Closed | Lifecycle::FailedToLoadTexture)
    }

    pub fn exit_code(&self) -> Option<u8> {
        match self {
            Lifecycle::Closed => Some(EXIT_OK),
            Lifecycle::FailedToLoadTexture => Some(EXIT_MAP_FAILED),
            Lifecycle::Initializing | Lifecycle::Running => None,
        }
    }

    fn advance(&mut self, from: Lifecycle, to: Lifecycle) {
        if *self == from {
            log::debug!("{from:?} -> {to:?}");
            *self = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};

    fn running() -> Lifecycle {
        let mut state = Lifecycle::default();
        state.map_loaded();
        state
    }

    #[test]
    fn load_then_close() {
        let mut state = Lifecycle::default();
        assert_eq!(state, Lifecycle::Initializing);
        assert_eq!(state.exit_code(), None);

        state.map_loaded();
        assert_eq!(state, Lifecycle::Running);
        assert!(!state.is_terminal());

        assert!(state.window_event(&WindowEvent::CloseRequested));
        assert_eq!(state, Lifecycle::Closed);
        assert_eq!(state.exit_code(), Some(0));
    }

    #[test]
    fn failed_load_is_terminal() {
        let mut state = Lifecycle::default();
        state.map_failed();

        assert!(state.is_terminal());
        assert_eq!(state.exit_code(), Some(1));

        state.map_loaded();
        assert_eq!(state, Lifecycle::FailedToLoadTexture);
        assert!(!state.window_event(&WindowEvent::CloseRequested));
    }

    #[test]
    fn only_close_stops() {
        let mut state = running();

        let events = [
            WindowEvent::Focused(false),
            WindowEvent::Resized(PhysicalSize::new(100, 100)),
            WindowEvent::Moved(PhysicalPosition::new(5, 5)),
            WindowEvent::ReceivedCharacter('\u{1b}'),
            WindowEvent::ReceivedCharacter('q'),
            WindowEvent::Destroyed,
        ];

        for event in &events {
            assert!(!state.window_event(event));
            assert_eq!(state, Lifecycle::Running);
        }
    }

    #[test]
    fn close_before_running_ignored() {
        let mut state = Lifecycle::default();

        assert!(!state.window_event(&WindowEvent::CloseRequested));
        assert_eq!(state, Lifecycle::Initializing);
    }

    #[test]
    fn closed_stays_closed() {
        let mut state = running();
        state.window_event(&WindowEvent::CloseRequested);
        state.map_failed();

        assert_eq!(state, Lifecycle::Closed);
        assert!(state.window_event(&WindowEvent::Focused(true)));
    }
}
