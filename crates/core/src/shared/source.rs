use std::path::{Path, PathBuf};

use super::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

/// Which pipeline a source path feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Video,
    Image,
}

impl SourceKind {
    /// Classifies a path by its extension, ignoring case.
    ///
    /// Returns `None` for anything that is neither a known video nor a known
    /// image extension; callers drop such paths without feedback.
    pub fn classify(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Video)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Image)
        } else {
            None
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            SourceKind::Video => "video",
            SourceKind::Image => "image",
        }
    }
}

/// The branch a run request resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunTarget {
    Video(PathBuf),
    Image(PathBuf),
    None,
}

/// Last selected video and last selected image.
///
/// The two slots are independent: choosing an image never clears a video
/// chosen earlier, and the other way round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceSelection {
    video: Option<PathBuf>,
    image: Option<PathBuf>,
}

impl SourceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: SourceKind, path: PathBuf) {
        match kind {
            SourceKind::Video => self.video = Some(path),
            SourceKind::Image => self.image = Some(path),
        }
    }

    pub fn video(&self) -> Option<&Path> {
        self.video.as_deref()
    }

    pub fn image(&self) -> Option<&Path> {
        self.image.as_deref()
    }

    /// Video wins over image whenever both are set.
    pub fn run_target(&self) -> RunTarget {
        if let Some(video) = &self.video {
            RunTarget::Video(video.clone())
        } else if let Some(image) = &self.image {
            RunTarget::Image(image.clone())
        } else {
            RunTarget::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("clip.mp4", Some(SourceKind::Video))]
    #[case("clip.AVI", Some(SourceKind::Video))]
    #[case("/tmp/a/b.Mov", Some(SourceKind::Video))]
    #[case("road.mkv", Some(SourceKind::Video))]
    #[case("road.jpg", Some(SourceKind::Image))]
    #[case("road.JPEG", Some(SourceKind::Image))]
    #[case("road.png", Some(SourceKind::Image))]
    #[case("road.bmp", Some(SourceKind::Image))]
    #[case("notes.txt", None)]
    #[case("archive.tar.gz", None)]
    #[case("no_extension", None)]
    #[case("mp4", None)]
    fn test_classify(#[case] path: &str, #[case] expected: Option<SourceKind>) {
        assert_eq!(SourceKind::classify(Path::new(path)), expected);
    }

    #[test]
    fn test_empty_selection_has_no_target() {
        assert_eq!(SourceSelection::new().run_target(), RunTarget::None);
    }

    #[test]
    fn test_video_takes_precedence_over_image() {
        let mut sel = SourceSelection::new();
        sel.set(SourceKind::Video, PathBuf::from("a.mp4"));
        sel.set(SourceKind::Image, PathBuf::from("b.jpg"));
        assert_eq!(sel.run_target(), RunTarget::Video(PathBuf::from("a.mp4")));
    }

    #[test]
    fn test_image_only_runs_image() {
        let mut sel = SourceSelection::new();
        sel.set(SourceKind::Image, PathBuf::from("b.jpg"));
        assert_eq!(sel.run_target(), RunTarget::Image(PathBuf::from("b.jpg")));
    }

    #[test]
    fn test_selecting_one_kind_keeps_the_other() {
        let mut sel = SourceSelection::new();
        sel.set(SourceKind::Image, PathBuf::from("b.jpg"));
        sel.set(SourceKind::Video, PathBuf::from("a.mp4"));
        sel.set(SourceKind::Video, PathBuf::from("c.mp4"));
        assert_eq!(sel.image(), Some(Path::new("b.jpg")));
        assert_eq!(sel.video(), Some(Path::new("c.mp4")));
    }
}
