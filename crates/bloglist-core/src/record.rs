use serde::{Deserialize, Serialize};

/// The fields of a blog post that aggregation looks at.
///
/// Anything with a title, an author and a like count can be aggregated,
/// so persisted rows are passed in directly instead of being copied.
pub trait BlogRecord {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn likes(&self) -> u64;
}

impl<T: BlogRecord + ?Sized> BlogRecord for &T {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn author(&self) -> &str {
        (**self).author()
    }

    fn likes(&self) -> u64 {
        (**self).likes()
    }
}

/// Plain owned record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub likes: u64,
}

impl Record {
    pub fn new(title: impl Into<String>, author: impl Into<String>, likes: u64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            likes,
        }
    }
}

impl BlogRecord for Record {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}
