//! Deterministic rule-based emotion detection.
//!
//! # Decision Sequence
//!
//! Evaluated over normalized text, first match wins:
//!
//! 1. **Short guard**: fewer than 5 characters and no lexicon word ⇒ `neutral`
//! 2. **Neutral phrase** (substring) ⇒ `neutral`
//! 3. **Irony phrase** (substring) ⇒ `sadness`
//! 4. **Negated positive**: a negation token plus a happiness word ⇒ `sadness`
//! 5. **Scoring**: count word-boundary matches per category; the highest count
//!    wins, ties go to the category declared first, all-zero ⇒ `neutral`
//!
//! Rule 3 reads every irony phrase as concealed negative affect regardless of
//! what is being mocked. It is an approximation kept for fidelity with the
//! established behavior and should not be extended.

mod turkish;

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::text::normalize;
use crate::types::{EmotionLabel, Stage, Trace};

/// Texts shorter than this (in characters) need a lexicon word to be scored.
pub const SHORT_TEXT_CHARS: usize = 5;

static BUILTIN: OnceLock<LexiconClassifier> = OnceLock::new();

/// Raw vocabulary for a [`LexiconClassifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconTables {
    pub negations: Vec<String>,
    pub irony_phrases: Vec<String>,
    pub neutral_phrases: Vec<String>,
    /// Category word lists, in tie-break order.
    pub categories: Vec<(EmotionLabel, Vec<String>)>,
}

impl LexiconTables {
    /// The built-in Turkish vocabulary.
    pub fn turkish() -> Self {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            negations: owned(turkish::NEGATIONS),
            irony_phrases: owned(turkish::IRONY_PHRASES),
            neutral_phrases: owned(turkish::NEUTRAL_PHRASES),
            categories: turkish::CATEGORIES
                .iter()
                .map(|(label, words)| (*label, owned(words)))
                .collect(),
        }
    }
}

impl Default for LexiconTables {
    fn default() -> Self {
        Self::turkish()
    }
}

/// Which rule produced a lexicon verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum LexiconRule {
    ShortText,
    NeutralPhrase { phrase: String },
    IronyPhrase { phrase: String },
    NegatedPositive { negation: String },
    Scored { score: usize },
    NoMatch,
}

/// Output of [`LexiconClassifier::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconVerdict {
    pub label: EmotionLabel,
    pub rule: LexiconRule,
}

impl LexiconVerdict {
    fn new(label: EmotionLabel, rule: LexiconRule) -> Self {
        Self { label, rule }
    }
}

/// Compiled word-boundary matcher for one lexicon entry.
#[derive(Debug)]
struct WordPattern {
    word: String,
    regex: Regex,
}

impl WordPattern {
    fn compile(word: &str) -> CoreResult<Self> {
        let pattern = format!(r"\b{}\b", regex::escape(word));
        let regex = Regex::new(&pattern).map_err(|e| CoreError::InvalidLexiconEntry {
            entry: word.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            word: word.to_string(),
            regex,
        })
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Rule-based emotion classifier over a fixed vocabulary.
#[derive(Debug)]
pub struct LexiconClassifier {
    negations: Vec<String>,
    irony_phrases: Vec<String>,
    neutral_phrases: Vec<String>,
    categories: Vec<(EmotionLabel, Vec<WordPattern>)>,
}

impl LexiconClassifier {
    /// Compile a classifier from custom tables.
    pub fn new(tables: LexiconTables) -> CoreResult<Self> {
        let categories = tables
            .categories
            .iter()
            .map(|(label, words)| {
                let patterns = words
                    .iter()
                    .map(|w| WordPattern::compile(w))
                    .collect::<CoreResult<Vec<_>>>()?;
                Ok((*label, patterns))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            negations: tables.negations,
            irony_phrases: tables.irony_phrases,
            neutral_phrases: tables.neutral_phrases,
            categories,
        })
    }

    /// Shared classifier over the built-in Turkish vocabulary.
    pub fn builtin() -> &'static LexiconClassifier {
        BUILTIN.get_or_init(|| {
            LexiconClassifier::new(LexiconTables::turkish())
                .expect("built-in lexicon patterns must compile")
        })
    }

    /// Whether any category word occurs in `text` on word boundaries.
    pub fn contains_lexicon_word(&self, text: &str) -> bool {
        self.categories
            .iter()
            .flat_map(|(_, patterns)| patterns.iter())
            .any(|p| p.is_match(text))
    }

    /// Short text with no lexicon word: too little signal to classify.
    pub fn is_low_signal(&self, normalized: &str) -> bool {
        normalized.chars().count() < SHORT_TEXT_CHARS && !self.contains_lexicon_word(normalized)
    }

    /// Classify `text`. The text is normalized first.
    pub fn classify(&self, text: &str) -> LexiconVerdict {
        let text = normalize(text);

        if self.is_low_signal(&text) {
            return LexiconVerdict::new(EmotionLabel::Neutral, LexiconRule::ShortText);
        }

        if let Some(phrase) = self.neutral_phrases.iter().find(|p| text.contains(p.as_str())) {
            return LexiconVerdict::new(
                EmotionLabel::Neutral,
                LexiconRule::NeutralPhrase {
                    phrase: phrase.clone(),
                },
            );
        }

        if let Some(phrase) = self.irony_phrases.iter().find(|p| text.contains(p.as_str())) {
            return LexiconVerdict::new(
                EmotionLabel::Sadness,
                LexiconRule::IronyPhrase {
                    phrase: phrase.clone(),
                },
            );
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        if let Some(negation) = self.negations.iter().find(|n| tokens.contains(&n.as_str())) {
            if self.matches_category(EmotionLabel::Happiness, &text) {
                return LexiconVerdict::new(
                    EmotionLabel::Sadness,
                    LexiconRule::NegatedPositive {
                        negation: negation.clone(),
                    },
                );
            }
        }

        let mut best: Option<(EmotionLabel, usize)> = None;
        for (label, patterns) in &self.categories {
            let score = patterns.iter().filter(|p| p.is_match(&text)).count();
            // Strictly greater keeps the earliest category on ties.
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((*label, score));
            }
        }

        match best {
            Some((label, score)) => LexiconVerdict::new(label, LexiconRule::Scored { score }),
            None => LexiconVerdict::new(EmotionLabel::Neutral, LexiconRule::NoMatch),
        }
    }

    /// [`classify`](Self::classify) plus a trace line describing the rule.
    pub fn classify_traced(&self, text: &str, trace: &mut Trace) -> LexiconVerdict {
        let verdict = self.classify(text);
        let mut line = format!("lexicon -> {} ({})", verdict.label, describe(&verdict.rule));
        if let LexiconRule::Scored { .. } = verdict.rule {
            line.push_str(&format!(": {}", self.matched_words(verdict.label, text).join(", ")));
        }
        trace.push(Stage::Lexicon, line);
        verdict
    }

    /// Words matched for one category, for diagnostics.
    pub fn matched_words(&self, label: EmotionLabel, text: &str) -> Vec<&str> {
        let text = normalize(text);
        self.categories
            .iter()
            .filter(|(l, _)| *l == label)
            .flat_map(|(_, patterns)| patterns.iter())
            .filter(|p| p.is_match(&text))
            .map(|p| p.word.as_str())
            .collect()
    }

    fn matches_category(&self, label: EmotionLabel, text: &str) -> bool {
        self.categories
            .iter()
            .filter(|(l, _)| *l == label)
            .flat_map(|(_, patterns)| patterns.iter())
            .any(|p| p.is_match(text))
    }
}

fn describe(rule: &LexiconRule) -> String {
    match rule {
        LexiconRule::ShortText => "short text".to_string(),
        LexiconRule::NeutralPhrase { phrase } => format!("neutral phrase '{}'", phrase),
        LexiconRule::IronyPhrase { phrase } => format!("irony phrase '{}'", phrase),
        LexiconRule::NegatedPositive { negation } => format!("negated positive '{}'", negation),
        LexiconRule::Scored { score } => format!("score {}", score),
        LexiconRule::NoMatch => "no match".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> LexiconVerdict {
        LexiconClassifier::builtin().classify(text)
    }

    #[test]
    fn test_short_text_without_lexicon_word_is_neutral() {
        let v = classify("hmm");
        assert_eq!(v.label, EmotionLabel::Neutral);
        assert_eq!(v.rule, LexiconRule::ShortText);
    }

    #[test]
    fn test_short_text_with_lexicon_word_is_scored() {
        let v = classify("IYI");
        assert_eq!(v.label, EmotionLabel::Happiness);
        assert_eq!(v.rule, LexiconRule::Scored { score: 1 });
    }

    #[test]
    fn test_neutral_phrase_wins_over_lexicon_words() {
        let v = classify("Bugün idare eder, mutlu sayılmam");
        assert_eq!(v.label, EmotionLabel::Neutral);
        assert!(matches!(v.rule, LexiconRule::NeutralPhrase { .. }));
    }

    #[test]
    fn test_irony_is_read_as_sadness() {
        let v = classify("tabii tabii çok güzel bir gün");
        assert_eq!(v.label, EmotionLabel::Sadness);
        assert_eq!(
            v.rule,
            LexiconRule::IronyPhrase {
                phrase: "tabii tabii".to_string()
            }
        );
    }

    #[test]
    fn test_negated_positive_is_sadness() {
        let v = classify("hiç mutlu hissetmiyorum");
        assert_eq!(v.label, EmotionLabel::Sadness);
        assert_eq!(
            v.rule,
            LexiconRule::NegatedPositive {
                negation: "hiç".to_string()
            }
        );
    }

    #[test]
    fn test_negation_must_be_standalone_token() {
        // "yoksa" contains "yok" but is not the token itself.
        let v = classify("yoksa mutlu muyuz");
        assert_eq!(v.label, EmotionLabel::Happiness);
    }

    #[test]
    fn test_highest_score_wins() {
        let v = classify("bu işten bıktım artık yeter");
        assert_eq!(v.label, EmotionLabel::Anger);
        assert_eq!(v.rule, LexiconRule::Scored { score: 2 });
    }

    #[test]
    fn test_tie_goes_to_first_declared_category() {
        let v = classify("mutlu ama yalnız");
        assert_eq!(v.label, EmotionLabel::Happiness);
        assert_eq!(v.rule, LexiconRule::Scored { score: 1 });
    }

    #[test]
    fn test_word_boundaries_are_respected() {
        // "mutluyum" does not match the whole word "mutlu".
        let v = classify("bugün mutluyum");
        assert_eq!(v.label, EmotionLabel::Neutral);
        assert_eq!(v.rule, LexiconRule::NoMatch);
    }

    #[test]
    fn test_multiword_lexicon_entry() {
        let v = classify("vay be bunu beklemiyordum");
        assert_eq!(v.label, EmotionLabel::Surprise);
    }

    #[test]
    fn test_custom_tables() {
        let tables = LexiconTables {
            negations: vec!["not".into()],
            irony_phrases: vec!["yeah right".into()],
            neutral_phrases: vec!["so-so".into()],
            categories: vec![
                (EmotionLabel::Happiness, vec!["glad".into(), "happy".into()]),
                (EmotionLabel::Fear, vec!["scared".into()]),
            ],
        };
        let lexicon = LexiconClassifier::new(tables).unwrap();
        assert_eq!(lexicon.classify("I am so scared").label, EmotionLabel::Fear);
        assert_eq!(lexicon.classify("I am not happy").label, EmotionLabel::Sadness);
        assert_eq!(lexicon.classify("yeah right, great").label, EmotionLabel::Sadness);
        assert_eq!(lexicon.classify("feeling so-so today").label, EmotionLabel::Neutral);
        assert_eq!(lexicon.matched_words(EmotionLabel::Happiness, "Glad and HAPPY"), vec!["glad", "happy"]);
    }

    #[test]
    fn test_classify_traced_records_rule() {
        let mut trace = Trace::new();
        let v = LexiconClassifier::builtin().classify_traced("panik oldum", &mut trace);
        assert_eq!(v.label, EmotionLabel::Fear);
        assert!(trace.contains(Stage::Lexicon, "fear"));

        let words = LexiconClassifier::builtin().matched_words(EmotionLabel::Fear, "panik oldum");
        assert!(!words.is_empty());
        for word in words {
            assert!(trace.contains(Stage::Lexicon, word));
        }
    }
}
