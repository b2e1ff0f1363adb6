use crate::shared::frame::Frame;

/// Receives what a run produces while it is in flight.
///
/// The desktop forwards both calls over a channel to the UI thread; headless
/// callers apply them directly to [`crate::app::app_state::AppState`].
pub trait RunObserver {
    /// An annotated frame is ready to be shown.
    fn frame(&mut self, frame: &Frame);

    /// Replaces the status text.
    fn status(&mut self, message: &str);
}
