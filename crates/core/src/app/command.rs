use std::path::PathBuf;

/// User intents coming from the window, already stripped of toolkit types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Result of the video picker; `None` when the dialog was dismissed.
    BrowseVideo(Option<PathBuf>),
    /// Result of the image picker; `None` when the dialog was dismissed.
    BrowseImage(Option<PathBuf>),
    /// Paths dropped onto the window, in drop order.
    Drop(Vec<PathBuf>),
    Run,
}
