//! Built-in Turkish vocabulary for the lexicon classifier.

use crate::types::EmotionLabel;

/// Standalone negation tokens.
pub(super) const NEGATIONS: &[&str] = &[
    "değil", "degil", "hiç", "asla", "yok", "olmuyor", "olmadı", "olamaz",
];

/// Sarcastic set phrases; always read as concealed negative affect.
pub(super) const IRONY_PHRASES: &[&str] = &[
    "tabii tabii",
    "aynen",
    "çok komik",
    "hadi canım",
    "kesin",
    "ya tabi",
];

/// Hedging expressions that mark the text as deliberately non-committal.
pub(super) const NEUTRAL_PHRASES: &[&str] = &[
    "idare eder",
    "eh işte",
    "fena değil",
    "orta",
    "şöyle böyle",
    "ne iyi ne kötü",
    "normal",
    "bilmiyorum",
    "karışık",
    "ortalama",
    "eh",
    "idare",
    "kötü değil",
    "iyi değil",
];

/// Category lexicons in tie-break order.
pub(super) const CATEGORIES: &[(EmotionLabel, &[&str])] = &[
    (
        EmotionLabel::Happiness,
        &[
            "mutlu", "sevinç", "harika", "müthiş", "keyif", "huzur", "iyi", "güzel", "memnun",
        ],
    ),
    (
        EmotionLabel::Sadness,
        &["üzgün", "kırgın", "yalnız", "ağladım", "hasret", "pişman"],
    ),
    (
        EmotionLabel::Anger,
        &["sinir", "öfke", "kızgın", "nefret", "bıktım", "yeter"],
    ),
    (
        EmotionLabel::Fear,
        &["kork", "ürktüm", "panik", "dehşet", "endişe"],
    ),
    (
        EmotionLabel::Surprise,
        &["şaşkın", "inanmıyorum", "vay be", "ciddi misin"],
    ),
];
