use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::Lesson;

#[derive(Debug, thiserror::Error)]
pub enum LessonDataError {
    #[error("could not read lesson catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed lesson catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no lesson with id {0}")]
    UnknownLesson(u32),
}

/// Either a bare array of lessons or `{ "lessons": [...] }`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Bare(Vec<Lesson>),
    Wrapped { lessons: Vec<Lesson> },
}

/// The ordered set of lessons available to the tutor.
///
/// Lessons are immutable once loaded and are handed out as `Arc`s, so sessions
/// and decks reference them without copying.
#[derive(Clone, Debug, Default)]
pub struct LessonCatalog {
    lessons: Vec<Arc<Lesson>>,
}

impl LessonCatalog {
    pub fn new(lessons: Vec<Lesson>) -> Self {
        let mut ids = HashSet::new();
        for lesson in &lessons {
            if !ids.insert(lesson.id) {
                log::warn!(
                    "Duplicate lesson id {}; lookups by id return the first one",
                    lesson.id
                );
            }
            if lesson.is_empty() {
                log::warn!("Lesson {} ({}) has no words", lesson.id, lesson.title);
            }
        }
        Self {
            lessons: lessons.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LessonDataError> {
        let lessons = match serde_json::from_str::<CatalogFile>(json)? {
            CatalogFile::Bare(lessons) | CatalogFile::Wrapped { lessons } => lessons,
        };
        Ok(Self::new(lessons))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LessonDataError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} lessons from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn get(&self, id: u32) -> Result<Arc<Lesson>, LessonDataError> {
        self.lessons
            .iter()
            .find(|lesson| lesson.id == id)
            .cloned()
            .ok_or(LessonDataError::UnknownLesson(id))
    }

    pub fn by_position(&self, index: usize) -> Option<Arc<Lesson>> {
        self.lessons.get(index).cloned()
    }

    pub fn first(&self) -> Option<Arc<Lesson>> {
        self.by_position(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Lesson>> {
        self.lessons.iter()
    }
}
