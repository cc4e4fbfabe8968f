//! Tokenization and sentence segmentation shared by the parser and matcher

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<String>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self {
            stop_words: Self::create_stop_words(),
        }
    }

    /// Tokenize text into lowercased words using Unicode segmentation.
    ///
    /// Stop words and one-character tokens are dropped; a token must contain
    /// at least one alphabetic character.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for word in text.unicode_words() {
            let normalized = word.to_lowercase();

            if !self.stop_words.contains(&normalized) && normalized.len() > 1 {
                if normalized.chars().any(|c| c.is_alphabetic()) {
                    tokens.push(normalized);
                }
            }
        }

        tokens
    }

    /// Split text into sentences on Unicode sentence boundaries.
    ///
    /// Line breaks are hard boundaries, so resume bullet lines come out as
    /// individual sentences even without terminating punctuation.
    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Standard English stop-word list used for term vectorization
    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "a", "about", "above", "across", "after", "afterwards", "again", "against",
            "all", "almost", "alone", "along", "already", "also", "although", "always",
            "am", "among", "amongst", "amount", "an", "and", "another", "any", "anyhow",
            "anyone", "anything", "anyway", "anywhere", "are", "around", "as", "at",
            "back", "be", "became", "because", "become", "becomes", "becoming", "been",
            "before", "beforehand", "behind", "being", "below", "beside", "besides",
            "between", "beyond", "both", "bottom", "but", "by", "call", "can", "cannot",
            "could", "did", "do", "does", "done", "down", "due", "during", "each", "eg",
            "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc",
            "even", "ever", "every", "everyone", "everything", "everywhere", "except",
            "few", "fifteen", "fifty", "fill", "find", "first", "five", "for", "former",
            "formerly", "forty", "found", "four", "from", "front", "full", "further",
            "get", "give", "had", "has", "have", "he", "hence", "her", "here",
            "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him",
            "himself", "his", "how", "however", "hundred", "i", "ie", "if", "in",
            "indeed", "into", "is", "it", "its", "itself", "keep", "last", "latter",
            "latterly", "least", "less", "made", "many", "may", "me", "meanwhile",
            "might", "mine", "more", "moreover", "most", "mostly", "move", "much",
            "must", "my", "myself", "name", "namely", "neither", "never",
            "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
            "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
            "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
            "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
            "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems",
            "serious", "several", "she", "should", "show", "side", "since", "six",
            "sixty", "so", "some", "somehow", "someone", "something", "sometime",
            "sometimes", "somewhere", "still", "such", "take", "ten", "than", "that",
            "the", "their", "them", "themselves", "then", "thence", "there",
            "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
            "they", "third", "this", "those", "though", "three", "through",
            "throughout", "thru", "thus", "to", "together", "too", "top", "toward",
            "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
            "us", "very", "via", "was", "we", "well", "were", "what", "whatever",
            "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
            "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
            "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
            "within", "without", "would", "yet", "you", "your", "yours", "yourself",
            "yourselves",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization_filters_stop_words() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Rust is a systems programming language");

        assert!(tokens.contains(&"rust".to_string()));
        assert!(tokens.contains(&"systems".to_string()));
        assert!(tokens.contains(&"programming".to_string()));
        assert!(tokens.contains(&"language".to_string()));
        assert!(!tokens.contains(&"is".to_string()));
        assert!(!tokens.contains(&"a".to_string()));
    }

    #[test]
    fn test_tokenization_lowercases() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Docker Kubernetes AWS");

        assert_eq!(tokens, vec!["docker", "kubernetes", "aws"]);
    }

    #[test]
    fn test_single_character_tokens_are_dropped() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("I x y coding");

        assert_eq!(tokens, vec!["coding"]);
    }

    #[test]
    fn test_sentence_splitting_on_terminators() {
        let processor = TextProcessor::new();
        let sentences = processor
            .split_sentences("I have experience with Python. I worked at Acme Corp for 3 years.");

        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("I have experience"));
        assert!(sentences[1].contains("Acme Corp"));
    }

    #[test]
    fn test_sentence_splitting_on_line_breaks() {
        let processor = TextProcessor::new();
        let sentences = processor.split_sentences("John Doe\nSoftware Engineer\n\nSkills: Python");

        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "John Doe");
    }

    #[test]
    fn test_empty_text() {
        let processor = TextProcessor::new();

        assert!(processor.tokenize("").is_empty());
        assert!(processor.split_sentences("").is_empty());
    }
}
