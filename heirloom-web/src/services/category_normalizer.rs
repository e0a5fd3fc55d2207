//! Content category normalization
//!
//! Maps every accepted input spelling (plural browse labels, singular URL
//! values, legacy write-form spellings) to exactly one canonical stored
//! category. Unknown inputs pass through unchanged: the canonical
//! enumeration may grow independently of this table, and the database CHECK
//! constraint is the enforcement point for values that are genuinely
//! invalid.

/// Canonical categories, matching the content_items CHECK constraint
pub const CANONICAL_CATEGORIES: [&str; 10] = [
    "letter",
    "diary_entry",
    "photo",
    "audio_recording",
    "video",
    "news_clipping",
    "anecdote",
    "interview",
    "document",
    "transcript",
];

/// Resolve a raw category to its canonical form
///
/// Exact-match lookup, case-sensitive (the UI emits these spellings
/// verbatim). Total function: a miss returns the input unchanged.
pub fn normalize(raw: &str) -> &str {
    match raw {
        // Plural labels from browse links
        "letters" => "letter",
        "diaries" => "diary_entry",
        "photos" => "photo",
        "recordings" => "audio_recording",
        "videos" => "video",
        "stories" => "anecdote",
        "interviews" => "interview",
        "documents" => "document",
        "transcripts" => "transcript",
        "news" => "news_clipping",

        // Singular short forms from browse URLs and the recorder
        "diary" => "diary_entry",
        "recording" => "audio_recording",
        "story" => "anecdote",

        // Legacy write-form spellings archived as documents
        "tribute" => "document",
        "recipe" => "document",
        "poem" => "document",

        // Already canonical, or unknown: pass through unchanged
        other => other,
    }
}

/// Whether `category` is one of the canonical stored values
pub fn is_canonical(category: &str) -> bool {
    CANONICAL_CATEGORIES.contains(&category)
}

/// Placeholder title for records submitted without one
pub fn default_title(canonical_category: &str) -> &'static str {
    match canonical_category {
        "letter" => "Letter",
        "diary_entry" => "Diary Entry",
        "photo" => "Photo",
        "audio_recording" => "Audio Recording",
        "video" => "Video",
        "news_clipping" => "News Clipping",
        "anecdote" => "Family Story",
        "interview" => "Interview",
        "document" => "Document",
        "transcript" => "Transcript",
        _ => "Untitled",
    }
}
