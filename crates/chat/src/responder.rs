//! Keyword-driven canned response selection.
//!
//! Category resolution is deterministic: the input is case-folded and the
//! first rule (in table order) with any keyword contained as a substring
//! wins. Matching is plain substring containment, not whole-word matching,
//! so a keyword inside a longer word still triggers its rule. Only the draw
//! among a category's candidate replies is random, and that draw sits behind
//! [`CandidatePicker`] so tests can pin it down.

use serde::{Deserialize, Serialize};

use qhatu_core::{text, DomainError, DomainResult};

/// The five reply buckets the assistant knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseCategory {
    Greeting,
    Products,
    Prices,
    Help,
    Fallback,
}

impl ResponseCategory {
    pub const ALL: [ResponseCategory; 5] = [
        ResponseCategory::Greeting,
        ResponseCategory::Products,
        ResponseCategory::Prices,
        ResponseCategory::Help,
        ResponseCategory::Fallback,
    ];
}

/// Immutable keyword table: ordered matching rules plus the candidate replies
/// per category. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct ResponseTable {
    /// Checked in order; first hit wins. Keywords are stored case-folded.
    rules: Vec<(ResponseCategory, Vec<String>)>,
    replies: Vec<(ResponseCategory, Vec<String>)>,
}

impl ResponseTable {
    /// Build a custom table.
    ///
    /// Every category must have at least one candidate reply; rules may cover
    /// any subset of categories (`Fallback` needs no rule, it always applies).
    pub fn new(
        rules: Vec<(ResponseCategory, Vec<String>)>,
        replies: Vec<(ResponseCategory, Vec<String>)>,
    ) -> DomainResult<Self> {
        for category in ResponseCategory::ALL {
            let covered = replies
                .iter()
                .any(|(c, candidates)| *c == category && !candidates.is_empty());
            if !covered {
                return Err(DomainError::validation(format!(
                    "response table has no candidate replies for {category:?}"
                )));
            }
        }

        let rules = rules
            .into_iter()
            .map(|(category, keywords)| {
                (category, keywords.iter().map(|k| text::fold(k)).collect())
            })
            .collect();

        Ok(Self { rules, replies })
    }

    /// Deterministically resolve the category for one utterance.
    pub fn resolve(&self, input: &str) -> ResponseCategory {
        let folded = text::fold(input);
        for (category, keywords) in &self.rules {
            if keywords.iter().any(|k| folded.contains(k.as_str())) {
                return *category;
            }
        }
        ResponseCategory::Fallback
    }

    /// Candidate replies for a category. Never empty (checked at build time).
    pub fn candidates(&self, category: ResponseCategory) -> &[String] {
        self.replies
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, candidates)| candidates.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        qhatu_table()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The minimarket assistant's table.
fn qhatu_table() -> ResponseTable {
    let rules = vec![
        (
            ResponseCategory::Greeting,
            owned(&["hola", "buenos días", "buenas tardes", "buenas noches", "hi", "hello"]),
        ),
        (
            ResponseCategory::Products,
            owned(&["producto", "productos", "catálogo", "tienda"]),
        ),
        (
            ResponseCategory::Prices,
            owned(&["precio", "precios", "costo", "cuánto", "cuanto"]),
        ),
        (
            ResponseCategory::Help,
            owned(&["ayuda", "help", "como", "cómo", "que puedes hacer"]),
        ),
    ];

    let replies = vec![
        (
            ResponseCategory::Greeting,
            owned(&[
                "¡Hola! Soy tu asistente virtual. ¿En qué puedo ayudarte hoy?",
                "¡Buen día! ¿Cómo puedo asistirte?",
                "¡Hola! Estoy aquí para ayudarte con cualquier consulta.",
            ]),
        ),
        (
            ResponseCategory::Products,
            owned(&[
                "Tenemos una gran variedad de productos electrónicos, audio, computadoras y más.",
                "Puedes usar el escáner para obtener información detallada de cualquier producto.",
                "Nuestro catálogo incluye smartphones, laptops, auriculares y tablets de última generación.",
            ]),
        ),
        (
            ResponseCategory::Prices,
            owned(&[
                "Los precios varían según el producto. Usa el escáner para ver el precio exacto.",
                "Ofrecemos precios competitivos en todos nuestros productos.",
                "Puedes encontrar productos desde $199 hasta $1599.",
            ]),
        ),
        (
            ResponseCategory::Help,
            owned(&[
                "Puedo ayudarte con información sobre productos, precios y disponibilidad.",
                "Usa el escáner para obtener detalles de productos específicos.",
                "También puedo guiarte sobre cómo usar la aplicación.",
            ]),
        ),
        (
            ResponseCategory::Fallback,
            owned(&[
                "Interesante pregunta. ¿Podrías ser más específico?",
                "No estoy seguro de entender. ¿Puedes reformular tu pregunta?",
                "Hmm, no tengo información específica sobre eso. ¿Te puedo ayudar con algo más?",
            ]),
        ),
    ];

    // Literal table covering every category; the checked constructor is for
    // custom tables.
    ResponseTable { rules, replies }
}

/// Picks an index into a non-empty candidate list.
///
/// Implementations must return a value in `0..len`; `len` is always >= 1.
pub trait CandidatePicker: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random picker (the production default).
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPicker;

impl CandidatePicker for UniformPicker {
    fn pick(&self, len: usize) -> usize {
        use rand::Rng as _;
        rand::thread_rng().gen_range(0..len)
    }
}

/// Maps one free-text utterance to one canned reply.
pub struct Responder<P = UniformPicker> {
    table: ResponseTable,
    picker: P,
}

impl Responder<UniformPicker> {
    pub fn new(table: ResponseTable) -> Self {
        Self::with_picker(table, UniformPicker)
    }
}

impl Default for Responder<UniformPicker> {
    fn default() -> Self {
        Self::new(ResponseTable::default())
    }
}

impl<P: CandidatePicker> Responder<P> {
    pub fn with_picker(table: ResponseTable, picker: P) -> Self {
        Self { table, picker }
    }

    /// Deterministic category resolution (exposed for callers that only need
    /// the bucket, and for tests).
    pub fn resolve(&self, input: &str) -> ResponseCategory {
        self.table.resolve(input)
    }

    /// Produce a reply for the utterance. Total: every input, including the
    /// empty string, lands in some category and yields a candidate.
    pub fn reply(&self, input: &str) -> &str {
        let category = self.table.resolve(input);
        let candidates = self.table.candidates(category);
        &candidates[self.picker.pick(candidates.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always picks the same index (clamped), for deterministic draws.
    struct FixedPicker(usize);

    impl CandidatePicker for FixedPicker {
        fn pick(&self, len: usize) -> usize {
            self.0.min(len - 1)
        }
    }

    fn responder() -> Responder<FixedPicker> {
        Responder::with_picker(ResponseTable::default(), FixedPicker(0))
    }

    #[test]
    fn greeting_keywords_resolve_to_greeting() {
        let r = responder();
        assert_eq!(r.resolve("hola"), ResponseCategory::Greeting);
        assert_eq!(r.resolve("HOLA!!"), ResponseCategory::Greeting);
        assert_eq!(r.resolve("buenas tardes señor"), ResponseCategory::Greeting);
        assert_eq!(r.resolve("hello there"), ResponseCategory::Greeting);
    }

    #[test]
    fn first_match_wins_over_later_rules() {
        let r = responder();
        // Contains both a greeting and a products keyword.
        assert_eq!(r.resolve("hola, tienen productos?"), ResponseCategory::Greeting);
        // Products outranks prices.
        assert_eq!(
            r.resolve("precio de los productos"),
            ResponseCategory::Products
        );
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(responder().resolve(""), ResponseCategory::Fallback);
    }

    #[test]
    fn unmatched_input_falls_back() {
        assert_eq!(responder().resolve("xyzzy 42"), ResponseCategory::Fallback);
    }

    #[test]
    fn matching_is_substring_not_whole_word() {
        let r = responder();
        // "hola" inside "holanda" still counts.
        assert_eq!(r.resolve("holanda"), ResponseCategory::Greeting);
        // "costo" inside "costoso" still counts.
        assert_eq!(r.resolve("muy costoso"), ResponseCategory::Prices);
    }

    #[test]
    fn remaining_categories_resolve() {
        let r = responder();
        assert_eq!(r.resolve("qué productos tienen"), ResponseCategory::Products);
        assert_eq!(r.resolve("cuanto cuesta"), ResponseCategory::Prices);
        assert_eq!(r.resolve("necesito ayuda"), ResponseCategory::Help);
    }

    #[test]
    fn reply_is_drawn_from_the_resolved_category() {
        let r = Responder::default();
        let greetings = r.table.candidates(ResponseCategory::Greeting);
        for _ in 0..50 {
            let reply = r.reply("hola");
            assert!(greetings.iter().any(|c| c == reply));
        }
    }

    #[test]
    fn picker_index_selects_the_candidate() {
        let table = ResponseTable::default();
        let expected = table.candidates(ResponseCategory::Greeting)[1].clone();

        let r = Responder::with_picker(table, FixedPicker(1));
        assert_eq!(r.reply("hola"), expected);
    }

    #[test]
    fn alternate_tables_are_injectable() {
        let table = ResponseTable::new(
            vec![(ResponseCategory::Greeting, vec!["yo".to_string()])],
            ResponseCategory::ALL
                .into_iter()
                .map(|c| (c, vec![format!("{c:?}")]))
                .collect(),
        )
        .unwrap();
        let r = Responder::with_picker(table, FixedPicker(0));
        assert_eq!(r.reply("yo!"), "Greeting");
        assert_eq!(r.reply("anything else"), "Fallback");
    }

    #[test]
    fn table_without_fallback_candidates_is_rejected() {
        let replies: Vec<_> = ResponseCategory::ALL
            .into_iter()
            .filter(|c| *c != ResponseCategory::Fallback)
            .map(|c| (c, vec!["x".to_string()]))
            .collect();
        let err = ResponseTable::new(vec![], replies).unwrap_err();
        assert!(matches!(err, qhatu_core::DomainError::Validation(_)));
    }

    #[test]
    fn uniform_picker_stays_in_bounds() {
        let picker = UniformPicker;
        for len in 1..=5 {
            for _ in 0..100 {
                assert!(picker.pick(len) < len);
            }
        }
    }
}
