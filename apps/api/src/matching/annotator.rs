//! Linguistic annotation — tokens with part-of-speech tags, plus entity spans.
//!
//! The extractor only depends on the `Annotator` trait. `RuleAnnotator` is the
//! default backend: a model-free tagger built from a closed-class lexicon, suffix
//! heuristics, capitalisation and date patterns. It is built once at startup and
//! shared as `Arc<dyn Annotator>`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

// ────────────────────────────────────────────────────────────────────────────
// Annotation data model
// ────────────────────────────────────────────────────────────────────────────

/// Coarse universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Particle,
    Numeral,
    Punctuation,
    Symbol,
}

impl PartOfSpeech {
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text as it appears in the input.
    pub text: String,
    pub lower: String,
    pub pos: PartOfSpeech,
    /// Byte offsets into the annotated text.
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    /// Absolute or relative dates and durations ("6 years", "March 2021").
    Date,
    /// Free-standing numerals not covered by a date.
    Cardinal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Output of one annotation pass over a piece of text.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    pub text: String,
    pub tokens: Vec<Token>,
    pub entities: Vec<EntitySpan>,
}

impl Annotation {
    /// Base noun phrases: an optional determiner or possessive, any adjectives or
    /// numerals, then one or more nouns. Returned as surface text, in order.
    pub fn noun_chunks(&self) -> Vec<String> {
        let tokens = &self.tokens;
        let mut chunks = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let mut j = i;
            if is_chunk_opener(&tokens[j]) {
                j += 1;
            }
            while j < tokens.len()
                && matches!(
                    tokens[j].pos,
                    PartOfSpeech::Adjective | PartOfSpeech::Numeral
                )
            {
                j += 1;
            }
            let mut k = j;
            while k < tokens.len() && tokens[k].pos.is_nominal() {
                k += 1;
            }

            if k > j {
                chunks.push(self.text[tokens[i].start..tokens[k - 1].end].to_string());
                i = k;
            } else {
                i += 1;
            }
        }

        chunks
    }
}

fn is_chunk_opener(token: &Token) -> bool {
    token.pos == PartOfSpeech::Determiner || POSSESSIVES.contains(token.lower.as_str())
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Annotation capability consumed by the keyword extractor.
///
/// Implementations must be total over any input and safe to share across
/// concurrent requests.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Annotation;
}

// ────────────────────────────────────────────────────────────────────────────
// RuleAnnotator — default model-free backend
// ────────────────────────────────────────────────────────────────────────────

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’.\-][\p{L}\p{N}]+)*(?:\+\+|#)?|[^\s\p{L}\p{N}]")
        .expect("token pattern is valid")
});

const NUMBER_WORDS: &str = "a|an|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|\
    thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty|several|many|few";

const MONTHS: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|\
    sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

/// Date patterns, most specific first. Overlaps are resolved longest-first.
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let patterns = [
        // Durations: "6 years", "3-5 yrs", "six years of experience", "2+ years of professional experience"
        format!(
            r"(?i)\b(?:\d+\s*(?:-|–|to)\s*)?(?:\d+(?:\.\d+)?\+?|(?:{NUMBER_WORDS})\b)\s*(?:years?|yrs?|months?|weeks?|days?|decades?)\b(?:\s+of\s+(?:[\p{{L}}\-]+\s+)?experience\b)?"
        ),
        // Relative: "last year", "the past few months"
        r"(?i)\b(?:last|next|this|past|previous|coming)\s+(?:few\s+|several\s+)?(?:years?|months?|weeks?|decades?)\b".to_string(),
        r"(?i)\b(?:today|yesterday|tomorrow)\b".to_string(),
        // Month-year: "March 2021", "Sept. 2019"
        format!(r"(?i)\b(?:{MONTHS})\.?\s+(?:19|20)\d{{2}}\b"),
        // Year ranges and bare years: "2018 - present", "2020"
        r"(?i)\b(?:19|20)\d{2}\s*(?:-|–|to)\s*(?:(?:19|20)\d{2}|present|now|current)\b".to_string(),
        r"\b(?:19|20)\d{2}\b".to_string(),
    ];
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("date pattern is valid"))
        .collect()
});

fn word_set(words: &'static [&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static DETERMINERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "any", "some",
        "no", "all", "both", "either", "neither", "another", "such", "which", "whatever",
    ])
});

static POSSESSIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&["my", "your", "his", "her", "its", "our", "their", "whose"])
});

static PRONOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
        "what", "mine", "yours", "hers", "ours", "theirs", "someone", "anyone", "everyone",
        "something", "anything", "everything", "nothing", "one",
    ])
});

/// Pronouns that usually open a clause, so the next lowercase word is a verb.
static SUBJECT_PRONOUNS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| word_set(&["i", "you", "he", "she", "we", "they", "who"]));

static ADPOSITIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "from", "up", "down", "out",
        "off", "over", "under", "across", "within", "without", "toward", "towards", "upon",
        "among", "around", "via", "per", "like", "including", "throughout", "as",
    ])
});

static CONJUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while",
        "whereas", "if", "unless", "since", "whether", "than", "that", "&",
    ])
});

static AUXILIARIES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had",
        "having", "do", "does", "did", "will", "would", "shall", "should", "can", "could",
        "may", "might", "must", "'s", "'re", "'ve", "'m", "'ll", "'d",
    ])
});

static PARTICLES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| word_set(&["to", "not", "n't"]));

static ADVERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "very", "also", "well", "too", "just", "only", "even", "still", "already", "always",
        "never", "often", "sometimes", "usually", "here", "there", "now", "then", "again",
        "soon", "quite", "rather", "almost", "much", "more", "most", "less", "least", "how",
        "when", "where", "why", "however", "therefore", "ideally", "currently", "plus",
    ])
});

static COMMON_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "build", "built", "develop", "design", "lead", "led", "manage", "use", "used",
        "create", "make", "made", "know", "knew", "love", "join", "seek", "want", "need",
        "work", "apply", "ensure", "drive", "own", "ship", "deliver", "collaborate", "help",
        "write", "wrote", "maintain", "implement", "improve", "support", "get", "got", "give",
        "take", "took", "see", "saw", "think", "thought", "tell", "told", "ask", "say", "said",
        "go", "went", "come", "came", "run", "ran", "keep", "kept", "find", "found", "feel",
        "bring", "brought", "become", "became", "require", "requires", "offer", "offers",
        "enjoy", "learn", "learnt", "grew", "grow", "mentor", "architect", "deploy", "test",
    ])
});

static ADJECTIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "good", "great", "strong", "excellent", "new", "old", "senior", "junior", "large",
        "small", "big", "high", "low", "fast", "quick", "best", "better", "key", "solid",
        "deep", "broad", "proven", "relevant", "related", "modern", "remote", "hybrid",
        "full", "part", "other", "same", "different", "several", "many", "few", "various",
        "able", "first", "last", "next", "main", "top", "hard", "soft", "young", "long",
        "short", "own", "open", "agile", "preferred", "required", "nice", "happy", "keen",
    ])
});

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ship", "ance", "ence", "ism", "ist", "er", "or",
    "ure", "ogy", "work",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish", "ary", "ant", "ent",
];

/// Model-free annotator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleAnnotator;

impl Annotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> Annotation {
        let tokens = tokenize(text);
        let entities = find_entities(text, &tokens);
        Annotation {
            text: text.to_string(),
            tokens,
            entities,
        }
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for m in TOKEN_RE.find_iter(text) {
        let surface = m.as_str();
        let lower = surface.to_lowercase();
        let sentence_initial = match tokens.last() {
            None => true,
            Some(prev) => {
                matches!(prev.text.as_str(), "." | "!" | "?" | ":" | "•" | "-" | "*")
                    || text[prev.end..m.start()].contains('\n')
            }
        };
        let pos = tag(surface, &lower, sentence_initial, tokens.last());
        tokens.push(Token {
            text: surface.to_string(),
            lower,
            pos,
            start: m.start(),
            end: m.end(),
        });
    }

    tokens
}

fn tag(surface: &str, lower: &str, sentence_initial: bool, prev: Option<&Token>) -> PartOfSpeech {
    if !surface.chars().any(char::is_alphanumeric) {
        return if surface.chars().all(|c| ".,;:!?()[]{}\"'‘’“”-–—/…".contains(c)) {
            PartOfSpeech::Punctuation
        } else {
            PartOfSpeech::Symbol
        };
    }

    if surface
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return PartOfSpeech::Numeral;
    }

    let first_upper = surface.chars().next().is_some_and(char::is_uppercase);
    let all_caps = surface.chars().filter(|c| c.is_alphabetic()).count() >= 2
        && surface
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase);

    if let Some(closed) = closed_class(lower) {
        // "I" and sentence-initial function words keep their closed class.
        if !first_upper || sentence_initial || lower == "i" {
            return closed;
        }
    }

    if all_caps || (first_upper && !sentence_initial) {
        return PartOfSpeech::ProperNoun;
    }

    if lower.ends_with("ly") && lower.chars().count() > 4 {
        return PartOfSpeech::Adverb;
    }

    if let Some(prev) = prev {
        if prev.lower == "to" && COMMON_VERBS.contains(lower) {
            return PartOfSpeech::Verb;
        }
        if SUBJECT_PRONOUNS.contains(prev.lower.as_str()) && !ADJECTIVES.contains(lower) {
            return PartOfSpeech::Verb;
        }
    }

    if COMMON_VERBS.contains(lower) {
        return PartOfSpeech::Verb;
    }
    if ADJECTIVES.contains(lower) {
        return PartOfSpeech::Adjective;
    }

    if let Some(pos) = tag_by_suffix(lower) {
        return pos;
    }

    if first_upper {
        // Unknown capitalised word at the start of a sentence: most likely a name.
        return PartOfSpeech::ProperNoun;
    }

    PartOfSpeech::Noun
}

fn closed_class(lower: &str) -> Option<PartOfSpeech> {
    if DETERMINERS.contains(lower) {
        Some(PartOfSpeech::Determiner)
    } else if POSSESSIVES.contains(lower) || PRONOUNS.contains(lower) {
        Some(PartOfSpeech::Pronoun)
    } else if AUXILIARIES.contains(lower) {
        Some(PartOfSpeech::Auxiliary)
    } else if PARTICLES.contains(lower) {
        Some(PartOfSpeech::Particle)
    } else if ADPOSITIONS.contains(lower) {
        Some(PartOfSpeech::Adposition)
    } else if CONJUNCTIONS.contains(lower) {
        Some(PartOfSpeech::Conjunction)
    } else if ADVERBS.contains(lower) {
        Some(PartOfSpeech::Adverb)
    } else if NUMBER_WORDS.split('|').any(|w| w == lower) && !DETERMINERS.contains(lower) {
        Some(PartOfSpeech::Numeral)
    } else {
        None
    }
}

fn tag_by_suffix(lower: &str) -> Option<PartOfSpeech> {
    let len = lower.chars().count();
    if len < 4 {
        return None;
    }
    if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return Some(PartOfSpeech::Noun);
    }
    if (lower.ends_with("ing") && len > 5) || (lower.ends_with("ed") && len > 4) {
        return Some(PartOfSpeech::Verb);
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return Some(PartOfSpeech::Adjective);
    }
    None
}

fn find_entities(text: &str, tokens: &[Token]) -> Vec<EntitySpan> {
    let mut candidates: Vec<(usize, usize)> = DATE_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
        .collect();
    // Leftmost first, longest first on ties.
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut dates: Vec<(usize, usize)> = Vec::new();
    for (start, end) in candidates {
        if dates.last().map_or(true, |&(_, last_end)| start >= last_end) {
            dates.push((start, end));
        }
    }

    let mut entities: Vec<EntitySpan> = dates
        .iter()
        .map(|&(start, end)| EntitySpan {
            label: EntityLabel::Date,
            text: text[start..end].to_string(),
            start,
            end,
        })
        .collect();

    // Tokens and dates are both ordered by offset and dates do not overlap,
    // so one forward cursor over the dates is enough.
    let mut next_date = 0;
    for token in tokens.iter().filter(|t| t.pos == PartOfSpeech::Numeral) {
        while next_date < dates.len() && dates[next_date].1 <= token.start {
            next_date += 1;
        }
        let covered = dates
            .get(next_date)
            .is_some_and(|&(start, end)| token.start >= start && token.end <= end);
        if !covered {
            entities.push(EntitySpan {
                label: EntityLabel::Cardinal,
                text: token.text.clone(),
                start: token.start,
                end: token.end,
            });
        }
    }

    entities.sort_by_key(|e| e.start);
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_of(annotation: &Annotation, surface: &str) -> PartOfSpeech {
        annotation
            .tokens
            .iter()
            .find(|t| t.text == surface)
            .map(|t| t.pos)
            .unwrap_or_else(|| panic!("token {surface:?} not found"))
    }

    fn dates(annotation: &Annotation) -> Vec<&str> {
        annotation
            .entities
            .iter()
            .filter(|e| e.label == EntityLabel::Date)
            .map(|e| e.text.as_str())
            .collect()
    }

    #[test]
    fn test_empty_text_has_no_tokens_or_entities() {
        let annotation = RuleAnnotator.annotate("");
        assert!(annotation.tokens.is_empty());
        assert!(annotation.entities.is_empty());
        assert!(annotation.noun_chunks().is_empty());
    }

    #[test]
    fn test_tokenizer_keeps_hyphenated_and_dotted_words() {
        let annotation = RuleAnnotator.annotate("Strong problem-solving with Node.js and C++.");
        let surfaces: Vec<&str> = annotation.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            surfaces,
            vec!["Strong", "problem-solving", "with", "Node.js", "and", "C++", "."]
        );
    }

    #[test]
    fn test_token_offsets_slice_back_to_surface() {
        let text = "We use SQL daily.";
        let annotation = RuleAnnotator.annotate(text);
        for token in &annotation.tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_experience_sentence_tags() {
        let annotation =
            RuleAnnotator.annotate("I have 6 years of experience in Python and great teamwork skills");
        assert_eq!(pos_of(&annotation, "I"), PartOfSpeech::Pronoun);
        assert_eq!(pos_of(&annotation, "have"), PartOfSpeech::Auxiliary);
        assert_eq!(pos_of(&annotation, "6"), PartOfSpeech::Numeral);
        assert_eq!(pos_of(&annotation, "years"), PartOfSpeech::Noun);
        assert_eq!(pos_of(&annotation, "of"), PartOfSpeech::Adposition);
        assert_eq!(pos_of(&annotation, "experience"), PartOfSpeech::Noun);
        assert_eq!(pos_of(&annotation, "Python"), PartOfSpeech::ProperNoun);
        assert_eq!(pos_of(&annotation, "great"), PartOfSpeech::Adjective);
        assert_eq!(pos_of(&annotation, "teamwork"), PartOfSpeech::Noun);
        assert_eq!(pos_of(&annotation, "skills"), PartOfSpeech::Noun);
    }

    #[test]
    fn test_acronyms_are_proper_nouns_even_sentence_initial() {
        let annotation = RuleAnnotator.annotate("SQL and AWS are required.");
        assert_eq!(pos_of(&annotation, "SQL"), PartOfSpeech::ProperNoun);
        assert_eq!(pos_of(&annotation, "AWS"), PartOfSpeech::ProperNoun);
        assert_eq!(pos_of(&annotation, "required"), PartOfSpeech::Adjective);
    }

    #[test]
    fn test_sentence_initial_function_word_is_not_proper_noun() {
        let annotation = RuleAnnotator.annotate("The team ships. We build tools.");
        assert_eq!(pos_of(&annotation, "The"), PartOfSpeech::Determiner);
        assert_eq!(pos_of(&annotation, "We"), PartOfSpeech::Pronoun);
        assert_eq!(pos_of(&annotation, "build"), PartOfSpeech::Verb);
        assert_eq!(pos_of(&annotation, "tools"), PartOfSpeech::Noun);
    }

    #[test]
    fn test_suffix_heuristics() {
        let annotation = RuleAnnotator.annotate("they quickly improved deployment of scalable services");
        assert_eq!(pos_of(&annotation, "quickly"), PartOfSpeech::Adverb);
        assert_eq!(pos_of(&annotation, "improved"), PartOfSpeech::Verb);
        assert_eq!(pos_of(&annotation, "deployment"), PartOfSpeech::Noun);
        assert_eq!(pos_of(&annotation, "scalable"), PartOfSpeech::Adjective);
        assert_eq!(pos_of(&annotation, "services"), PartOfSpeech::Noun);
    }

    #[test]
    fn test_duration_dates() {
        let annotation = RuleAnnotator.annotate(
            "I have 6 years of experience, six years of professional experience and 3+ yrs of Go.",
        );
        assert_eq!(
            dates(&annotation),
            vec![
                "6 years of experience",
                "six years of professional experience",
                "3+ yrs"
            ]
        );
    }

    #[test]
    fn test_calendar_dates() {
        let annotation =
            RuleAnnotator.annotate("Worked there from March 2019, then 2020 - present, and last year.");
        assert_eq!(
            dates(&annotation),
            vec!["March 2019", "2020 - present", "last year"]
        );
    }

    #[test]
    fn test_date_match_keeps_original_case() {
        let annotation = RuleAnnotator.annotate("Minimum 5 Years required");
        assert_eq!(dates(&annotation), vec!["5 Years"]);
    }

    #[test]
    fn test_numbers_outside_dates_are_cardinal() {
        let annotation = RuleAnnotator.annotate("Managed 12 engineers for 2 years");
        let cardinals: Vec<&str> = annotation
            .entities
            .iter()
            .filter(|e| e.label == EntityLabel::Cardinal)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(cardinals, vec!["12"]);
        assert_eq!(dates(&annotation), vec!["2 years"]);
    }

    #[test]
    fn test_cardinals_between_many_dates() {
        let annotation =
            RuleAnnotator.annotate("2019 - 2021, 5 clients, March 2020 and 3 years, then 7 more");
        let cardinals: Vec<&str> = annotation
            .entities
            .iter()
            .filter(|e| e.label == EntityLabel::Cardinal)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(cardinals, vec!["5", "7"]);
        assert_eq!(dates(&annotation), vec!["2019 - 2021", "March 2020", "3 years"]);
    }

    #[test]
    fn test_alternating_numerals_and_years() {
        let annotation = RuleAnnotator.annotate(&"1 2020 ".repeat(200));
        assert_eq!(annotation.entities.len(), 400);
        assert!(annotation
            .entities
            .iter()
            .step_by(2)
            .all(|e| e.label == EntityLabel::Cardinal && e.text == "1"));
        assert!(annotation
            .entities
            .iter()
            .skip(1)
            .step_by(2)
            .all(|e| e.label == EntityLabel::Date && e.text == "2020"));
    }

    #[test]
    fn test_entities_are_ordered_by_position() {
        let annotation = RuleAnnotator.annotate("In 2021 we hired 4 people over 3 months");
        let starts: Vec<usize> = annotation.entities.iter().map(|e| e.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_noun_chunks() {
        let annotation =
            RuleAnnotator.annotate("The candidate discussed our data pipeline and great teamwork skills.");
        assert_eq!(
            annotation.noun_chunks(),
            vec!["The candidate", "our data pipeline", "great teamwork skills"]
        );
    }
}
