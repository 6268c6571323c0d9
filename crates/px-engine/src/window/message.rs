use winit::event::WindowEvent;

/// Lifecycle messages a [`Window`](super::Window) reacts to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WindowMessage {
    /// The native window now exists.
    Create,
    /// The user asked to close the window.
    Close,
    /// The native window is being destroyed.
    Destroy,
    /// Anything else; left to default handling.
    Other,
}

impl From<&WindowEvent> for WindowMessage {
    fn from(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested => WindowMessage::Close,
            WindowEvent::Destroyed => WindowMessage::Destroy,
            _ => WindowMessage::Other,
        }
    }
}

/// Result of dispatching a message.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dispatch {
    Handled,
    /// Not consumed; the host applies its default behavior.
    Default,
}

/// Handle to the running message loop.
pub trait LoopControl {
    /// Asks the loop to stop after the current message.
    fn post_quit(&self);
}

impl LoopControl for winit::event_loop::ActiveEventLoop {
    fn post_quit(&self) {
        self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winit_events_map_to_messages() {
        assert_eq!(WindowMessage::from(&WindowEvent::CloseRequested), WindowMessage::Close);
        assert_eq!(WindowMessage::from(&WindowEvent::Destroyed), WindowMessage::Destroy);
        assert_eq!(WindowMessage::from(&WindowEvent::RedrawRequested), WindowMessage::Other);
        assert_eq!(WindowMessage::from(&WindowEvent::Focused(true)), WindowMessage::Other);
    }
}
