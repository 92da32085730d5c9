// src/tree/toc.rs

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// One rendered lecture: its title and where its artifact lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureEntry {
    pub title: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    pub title: String,
    pub lectures: Vec<LectureEntry>,
}

/// Chapters and lectures in declaration order.
///
/// The order drives both index numbering and merged-deck page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOfContents {
    chapters: Vec<ChapterEntry>,
}

impl TableOfContents {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_chapter(&mut self, chapter: ChapterEntry) {
        self.chapters.push(chapter);
    }

    pub fn chapters(&self) -> impl Iterator<Item = &ChapterEntry> {
        self.chapters.iter()
    }

    pub fn chapter_titles(&self) -> impl Iterator<Item = &str> {
        self.chapters.iter().map(|c| c.title.as_str())
    }

    pub fn chapter(&self, title: &str) -> Option<&ChapterEntry> {
        self.chapters.iter().find(|c| c.title == title)
    }

    /// Every lecture artifact, chapter by chapter.
    pub fn lecture_paths(&self) -> impl Iterator<Item = &Path> {
        self.chapters
            .iter()
            .flat_map(|c| c.lectures.iter().map(|l| l.path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn lecture_count(&self) -> usize {
        self.chapters.iter().map(|c| c.lectures.len()).sum()
    }
}

/// Extras of one chapter, with the root they were resolved against.
///
/// The root is what archive paths are made relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterExtras {
    pub root: PathBuf,
    pub extras: Vec<PathBuf>,
}

/// Chapter title -> extras, only for chapters that declare any.
pub type ExtrasRegistry = IndexMap<String, ChapterExtras>;

#[cfg(test)]
mod tests {
    use super::*;

    fn lecture(title: &str, path: &str) -> LectureEntry {
        LectureEntry {
            title: title.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn lecture_paths_follow_chapter_then_lecture_order() {
        let mut toc = TableOfContents::new();
        toc.push_chapter(ChapterEntry {
            title: "B".to_string(),
            lectures: vec![lecture("b0", "B/000-b0.pdf"), lecture("b1", "B/001-b1.pdf")],
        });
        toc.push_chapter(ChapterEntry {
            title: "A".to_string(),
            lectures: vec![lecture("a0", "A/000-a0.pdf")],
        });

        let paths: Vec<&Path> = toc.lecture_paths().collect();
        assert_eq!(
            paths,
            vec![
                Path::new("B/000-b0.pdf"),
                Path::new("B/001-b1.pdf"),
                Path::new("A/000-a0.pdf")
            ]
        );
        assert_eq!(toc.chapter_titles().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(toc.lecture_count(), 3);
        assert_eq!(toc.chapter("A").unwrap().lectures.len(), 1);
        assert!(toc.chapter("C").is_none());
    }
}
