//! Built-in Turkish phrase lists for event classification.

/// Praise, invitations and social plans.
pub(super) const ENERGY_UP_PHRASES: &[&str] = &[
    "tebrikler",
    "eline sağlık",
    "harika iş",
    "çok iyi olmuş",
    "başarılı",
    "güzel olmuş",
    "hadi",
    "gel",
    "buluşalım",
    "kahve",
    "yemeğe çıkalım",
];

/// Academic or workplace pressure: criticism, revisions, deadlines.
pub(super) const PRESSURE_PHRASES: &[&str] = &[
    "fazla basit",
    "basit kalmış",
    "yetersiz",
    "eksik",
    "tekrarlı",
    "yüzeysel",
    "revize",
    "güncelle",
    "ekleseniz",
    "ekleyin",
    "kullanacak mısınız",
    "kaç ekran",
    "detaylandır",
    "tekrar iletebilir",
    "yeniden gönder",
    "ders seviyesinde",
    "daha iyi olur",
    "bekliyoruz",
    "gerekiyor",
    "olmalı",
    "eklenmeli",
    "deadline",
    "son tarih",
    "acil",
    "hemen",
];
