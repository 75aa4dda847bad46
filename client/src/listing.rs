//! Client-side ordering and filtering of comment and project lists.

use std::cmp::Reverse;
use std::str::FromStr;

use shared::{Comment, Project};

/// How a comment thread is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentOrder {
    #[default]
    Newest,
    Oldest,
    /// Most likes first; ties go to the newer comment.
    MostLiked,
}

impl FromStr for CommentOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "new" => Ok(CommentOrder::Newest),
            "oldest" | "old" => Ok(CommentOrder::Oldest),
            "most-liked" | "top" => Ok(CommentOrder::MostLiked),
            other => Err(format!("Unknown comment order: {}", other)),
        }
    }
}

/// Sort comments in place. Ties on the primary key fall back to id so the
/// result is deterministic.
pub fn sort_comments(comments: &mut [Comment], order: CommentOrder) {
    match order {
        CommentOrder::Newest => {
            comments.sort_by_key(|c| (Reverse(c.created_at), Reverse(c.id)));
        }
        CommentOrder::Oldest => {
            comments.sort_by_key(|c| (c.created_at, c.id));
        }
        CommentOrder::MostLiked => {
            comments.sort_by_key(|c| (Reverse(c.likes), Reverse(c.created_at), Reverse(c.id)));
        }
    }
}

/// Projects whose name or token symbol contains `query`, case-insensitively.
///
/// A blank query matches everything.
pub fn filter_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return projects.iter().collect();
    }

    projects
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.token_symbol.to_lowercase().contains(&needle)
        })
        .collect()
}
