/// Notifies the application that the state of the map has changed and it should be redrawn.
pub trait Messenger: Send + Sync {
    /// Called when a layer or the map itself decides the displayed image is out of date.
    fn request_redraw(&self);
}

/// Messenger that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
