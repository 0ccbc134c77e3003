use sublens_core::DomainCategory;

// Fixed bucket lists; first matching rule wins, so a reddit.com URL
// containing an academic substring still classifies as a self post.
const ACADEMIC_DOMAINS: &[&str] = &["ncbi.nlm.nih.gov", ".edu", "scholar", "science", "apa.org"];
const SOCIAL_DOMAINS: &[&str] = &[
    "tiktok.com",
    "youtube.com",
    "instagram.com",
    "twitter.com",
    "x.com",
];

/// Buckets a post's URL. Total: every input, including the empty string,
/// maps to exactly one category.
pub fn classify(url: &str) -> DomainCategory {
    if url.is_empty() {
        return DomainCategory::TextOnly;
    }
    if url.contains("reddit.com") {
        return DomainCategory::SelfPost;
    }
    if ACADEMIC_DOMAINS.iter().any(|d| url.contains(d)) {
        return DomainCategory::AcademicMedical;
    }
    if SOCIAL_DOMAINS.iter().any(|d| url.contains(d)) {
        return DomainCategory::SocialMedia;
    }
    DomainCategory::OtherWeb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_text_only() {
        assert_eq!(classify(""), DomainCategory::TextOnly);
    }

    #[test]
    fn test_each_bucket() {
        assert_eq!(
            classify("https://www.reddit.com/r/mentalhealth/comments/abc/"),
            DomainCategory::SelfPost
        );
        assert_eq!(
            classify("https://www.ncbi.nlm.nih.gov/pmc/articles/PMC123/"),
            DomainCategory::AcademicMedical
        );
        assert_eq!(
            classify("https://psychology.stanford.edu/news/item"),
            DomainCategory::AcademicMedical
        );
        assert_eq!(
            classify("https://www.tiktok.com/@someone/video/1"),
            DomainCategory::SocialMedia
        );
        assert_eq!(
            classify("https://www.youtube.com/watch?v=abc"),
            DomainCategory::SocialMedia
        );
        assert_eq!(
            classify("https://example.com/blog/post"),
            DomainCategory::OtherWeb
        );
    }

    #[test]
    fn test_self_post_wins_over_academic() {
        // A same-platform URL containing an academic substring is still a
        // self post: rule order is significant.
        assert_eq!(
            classify("https://www.reddit.com/r/science/comments/abc/"),
            DomainCategory::SelfPost
        );
    }

    #[test]
    fn test_academic_wins_over_social() {
        assert_eq!(
            classify("https://scholar.example.org/watch?src=youtube.com"),
            DomainCategory::AcademicMedical
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let url = "https://example.com/a";
        assert_eq!(classify(url), classify(url));
    }
}
