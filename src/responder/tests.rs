//! Intent matching, priority and reply selection.

use super::*;
use std::collections::HashSet;

/// Deterministic stand-in for the random source: yields 0, 1, 2, ...
struct CountingRng(u64);

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.0;
        self.0 = self.0.wrapping_add(1);
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn responder() -> Responder<CountingRng> {
    Responder::with_rng(CountingRng(0)).expect("built-in table compiles")
}

/// One input per category that no earlier category claims.
const SAMPLES: &[(Intent, &str)] = &[
    (Intent::Greeting, "hello there"),
    (Intent::Farewell, "bye now"),
    (Intent::Thanks, "thanks a lot"),
    (Intent::HowAreYou, "how are you doing today?"),
    (Intent::WhoAreYou, "who are you anyway"),
    (Intent::Love, "i love this place"),
    (Intent::Angry, "this is stupid"),
    (Intent::Meaning, "what is the meaning of life"),
    (Intent::Crypto, "should i buy bitcoin"),
    (Intent::Stocks, "nasdaq today"),
    (Intent::Market, "the economy is weird"),
    (Intent::Help, "i need help"),
    (Intent::Funny, "tell me a joke"),
    (Intent::Weather, "will it rain tomorrow"),
    (Intent::Food, "i want pizza"),
];

#[test]
fn every_category_has_a_sample() {
    let covered: HashSet<Intent> = SAMPLES.iter().map(|(intent, _)| *intent).collect();
    assert_eq!(covered.len(), CATEGORIES.len());
    for category in CATEGORIES {
        assert!(covered.contains(&category.intent), "{} has no sample", category.intent);
    }
}

#[test]
fn matching_input_draws_from_its_own_pool() {
    let mut responder = responder();
    for (intent, input) in SAMPLES {
        assert_eq!(responder.classify(input), Some(*intent), "classify({:?})", input);
        let pool = responder.pool(Some(*intent));
        for _ in 0..pool.len() * 2 {
            let reply = responder.respond(input);
            assert!(pool.contains(&reply), "{:?} -> {:?} not in {}", input, reply, intent);
            assert!(!FALLBACK.contains(&reply));
        }
    }
}

#[test]
fn blank_input_uses_fallback() {
    let mut responder = responder();
    for input in ["", "   ", "\t\n"] {
        assert_eq!(responder.classify(input), None);
        assert!(FALLBACK.contains(&responder.respond(input)));
    }
}

#[test]
fn unmatched_input_uses_fallback() {
    let mut responder = responder();
    for input in ["asdf qwerty", "the quick brown fox", "12345"] {
        assert_eq!(responder.classify(input), None, "classify({:?})", input);
        assert!(FALLBACK.contains(&responder.respond(input)));
    }
}

#[test]
fn earlier_category_wins() {
    let responder = responder();
    assert_eq!(responder.classify("hello, tell me about stocks"), Some(Intent::Greeting));
    assert_eq!(responder.classify("thanks, i love you"), Some(Intent::Thanks));
    assert_eq!(responder.classify("bitcoin stock market"), Some(Intent::Crypto));
    assert_eq!(responder.classify("what do you think about stocks"), Some(Intent::Stocks));
}

#[test]
fn greeting_is_prefix_anchored() {
    let responder = responder();
    assert_eq!(responder.classify("hey"), Some(Intent::Greeting));
    assert_eq!(responder.classify("good evening sir"), Some(Intent::Greeting));
    assert_eq!(responder.classify("whats up"), Some(Intent::Greeting));
    assert_ne!(responder.classify("well hello"), Some(Intent::Greeting));
    assert_ne!(responder.classify("history of the dow"), Some(Intent::Greeting));
}

#[test]
fn whole_word_tokens_do_not_match_inside_words() {
    let responder = responder();
    // "sol" inside "solid", "eat" inside "great"
    assert_eq!(responder.classify("a solid great idea"), None);
    assert_eq!(responder.classify("rug pull incoming"), Some(Intent::Crypto));
    assert_eq!(responder.classify("rugpull incoming"), Some(Intent::Crypto));
}

#[test]
fn normalization_is_idempotent() {
    let responder = responder();
    let forms = ["HELLO", "hello", "  hello  ", "\tHeLLo\n"];
    for form in forms {
        assert_eq!(responder.classify(form), Some(Intent::Greeting), "{:?}", form);
    }
}

#[test]
fn selection_covers_the_pool_without_mutating_it() {
    let mut responder = responder();
    let pool = responder.pool(Some(Intent::Weather));
    let before: Vec<&str> = pool.to_vec();
    let seen: HashSet<&str> = (0..pool.len()).map(|_| responder.respond("snow?")).collect();
    assert_eq!(seen.len(), pool.len());
    assert_eq!(responder.pool(Some(Intent::Weather)).to_vec(), before);
}

#[test]
fn intents_follow_table_order() {
    let responder = responder();
    let order: Vec<Intent> = responder.intents().collect();
    assert_eq!(order, Intent::ALL.to_vec());
}

#[test]
fn invalid_tables_are_rejected() {
    const BAD_PATTERN: &[Category] = &[Category {
        intent: Intent::Greeting,
        patterns: &["(unclosed"],
        replies: &["hi"],
    }];
    assert!(matches!(
        Responder::from_table(BAD_PATTERN, FALLBACK, CountingRng(0)),
        Err(ResponderError::InvalidPattern { intent: Intent::Greeting, .. })
    ));

    const EMPTY_POOL: &[Category] = &[Category {
        intent: Intent::Food,
        patterns: &["pizza"],
        replies: &[],
    }];
    assert!(matches!(
        Responder::from_table(EMPTY_POOL, FALLBACK, CountingRng(0)),
        Err(ResponderError::EmptyPool { .. })
    ));

    assert!(matches!(
        Responder::from_table(CATEGORIES, &[], CountingRng(0)),
        Err(ResponderError::EmptyPool { ref pool }) if pool == "fallback"
    ));
}

#[test]
fn uniform_index_stays_in_range() {
    let mut rng = CountingRng(u64::MAX - 3);
    for _ in 0..16 {
        assert!(uniform_index(&mut rng, 7) < 7);
    }
}

#[test]
fn intent_tags_round_trip() {
    for intent in Intent::ALL {
        assert_eq!(intent.as_str().parse::<Intent>(), Ok(intent));
    }
    assert!("nonsense".parse::<Intent>().is_err());
}
