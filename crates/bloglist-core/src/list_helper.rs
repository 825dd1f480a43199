//! List aggregation helpers
//!
//! Every function here is a pure fold over an ordered slice. Ties are
//! resolved in favour of the earliest candidate: a later record or author
//! only takes over when it is strictly greater. Callers should not build
//! on that ordering.
//!
//! Sums saturate at `u64::MAX` instead of wrapping.

use crate::record::BlogRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The most liked blog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: String,
    pub likes: u64,
}

/// The author with the most blogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: u64,
}

/// The author whose blogs have the most likes in total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// All four aggregates over the same list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_likes: u64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

/// Running per-author totals, kept in order of first appearance.
#[derive(Debug)]
struct AuthorTally<'a> {
    author: &'a str,
    blogs: u64,
    likes: u64,
}

fn tally<R: BlogRecord>(list: &[R]) -> Vec<AuthorTally<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<AuthorTally<'_>> = Vec::new();

    for record in list {
        let author = record.author();
        match index.get(author) {
            Some(&i) => {
                tallies[i].blogs = tallies[i].blogs.saturating_add(1);
                tallies[i].likes = tallies[i].likes.saturating_add(record.likes());
            }
            None => {
                index.insert(author, tallies.len());
                tallies.push(AuthorTally {
                    author,
                    blogs: 1,
                    likes: record.likes(),
                });
            }
        }
    }

    tallies
}

/// Keeps the current best unless the next item is strictly greater.
fn first_max_by_key<T, K: Ord>(
    items: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Option<T> {
    items
        .into_iter()
        .reduce(|best, item| if key(&item) > key(&best) { item } else { best })
}

/// Sum of likes across all records. Zero for an empty list.
pub fn total_likes<R: BlogRecord>(list: &[R]) -> u64 {
    list.iter()
        .fold(0u64, |acc, record| acc.saturating_add(record.likes()))
}

/// The record with the greatest number of likes.
pub fn favorite_blog<R: BlogRecord>(list: &[R]) -> Option<FavoriteBlog> {
    first_max_by_key(list, |record| record.likes()).map(|record| FavoriteBlog {
        title: record.title().to_string(),
        author: record.author().to_string(),
        likes: record.likes(),
    })
}

/// The author with the highest number of records.
pub fn most_blogs<R: BlogRecord>(list: &[R]) -> Option<AuthorBlogs> {
    first_max_by_key(tally(list), |t| t.blogs).map(|t| AuthorBlogs {
        author: t.author.to_string(),
        blogs: t.blogs,
    })
}

/// The author with the highest total of likes.
pub fn most_likes<R: BlogRecord>(list: &[R]) -> Option<AuthorLikes> {
    first_max_by_key(tally(list), |t| t.likes).map(|t| AuthorLikes {
        author: t.author.to_string(),
        likes: t.likes,
    })
}

pub fn summarize<R: BlogRecord>(list: &[R]) -> Summary {
    Summary {
        total_likes: total_likes(list),
        favorite_blog: favorite_blog(list),
        most_blogs: most_blogs(list),
        most_likes: most_likes(list),
    }
}
