// src/types.rs

use std::fmt;

/// What each lecture turns into inside the output tree.
///
/// - `Link`: a symlink to the markdown source (handy with `marp --server`).
/// - `Html`: a page rendered by the external renderer.
/// - `Pdf`: a PDF rendered by the external renderer; this is also the only
///   kind that produces the merged deck and the archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Link,
    Html,
    Pdf,
}

impl OutputKind {
    /// File extension given to every lecture destination.
    pub fn extension(self) -> &'static str {
        match self {
            OutputKind::Link => "md",
            OutputKind::Html => "html",
            OutputKind::Pdf => "pdf",
        }
    }

    /// Whether this run packages the course (merged deck + archives).
    pub fn packages_material(self) -> bool {
        matches!(self, OutputKind::Pdf)
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputKind::Link => "link",
            OutputKind::Html => "html",
            OutputKind::Pdf => "pdf",
        };
        f.write_str(name)
    }
}
