use regex::{Regex, RegexBuilder};

/// Case-insensitive whole-word matcher over a configured term list. An
/// empty list compiles to a matcher that never matches, not to a malformed
/// empty alternation.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    pattern: Option<Regex>,
}

impl KeywordMatcher {
    pub fn new(terms: &[String]) -> Result<Self, regex::Error> {
        let terms: Vec<&str> = terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();

        if terms.is_empty() {
            return Ok(Self { pattern: None });
        }

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().map_or(false, |re| re.is_match(text))
    }
}

/// The two boolean content signals tracked per post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentFlags {
    pub has_disclaimer: bool,
    pub mentions_influencers: bool,
}

#[derive(Debug, Clone)]
pub struct ContentFlagClassifier {
    disclaimer: KeywordMatcher,
    influencer: KeywordMatcher,
}

impl ContentFlagClassifier {
    pub fn new(
        disclaimer_terms: &[String],
        influencer_terms: &[String],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            disclaimer: KeywordMatcher::new(disclaimer_terms)?,
            influencer: KeywordMatcher::new(influencer_terms)?,
        })
    }

    pub fn classify(&self, text: &str) -> ContentFlags {
        ContentFlags {
            has_disclaimer: self.disclaimer.is_match(text),
            mentions_influencers: self.influencer.is_match(text),
        }
    }
}
