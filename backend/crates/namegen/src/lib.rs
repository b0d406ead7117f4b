//! Playful username generation.
//!
//! Usernames are an adjective, a noun, and an optional lucky number joined
//! without separators (for example `CosmicDragon42`). The pools are finite,
//! so callers that need uniqueness must check for collisions and retry.

use rand::Rng;
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "Happy", "Cosmic", "Electric", "Magic", "Pixel", "Neon", "Cyber", "Turbo", "Mega", "Super",
    "Ultra", "Hyper", "Astro", "Rocket", "Thunder", "Crystal", "Golden", "Silver", "Rainbow",
    "Starry", "Speedy", "Lucky", "Epic", "Mystic", "Funky", "Groovy", "Jazzy", "Zippy", "Bouncy",
    "Sparkly", "Glowing", "Swift", "Brave", "Clever", "Mighty", "Noble", "Fancy", "Snazzy",
    "Dazzle",
];

const NOUNS: &[&str] = &[
    "Coder", "Gamer", "Wizard", "Ninja", "Pirate", "Dragon", "Phoenix", "Unicorn", "Tiger",
    "Panda", "Fox", "Wolf", "Eagle", "Falcon", "Lion", "Bear", "Knight", "Hero", "Champion",
    "Star", "Comet", "Galaxy", "Planet", "Moon", "Robot", "Alien", "Captain", "Pilot", "Explorer",
    "Builder", "Creator", "Maker", "Artist", "Genius", "Master", "Legend", "Ace", "Champ",
    "Warrior", "Guardian",
];

// The empty entry yields numberless names roughly once per eleven draws.
const NUMBERS: &[&str] = &["42", "99", "007", "123", "777", "888", "360", "101", "404", "808", ""];

/// Draw a username from the supplied random source.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let name = namegen::username_with(&mut rng);
/// assert!(!name.is_empty());
/// ```
pub fn username_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Happy");
    let noun = NOUNS.choose(rng).copied().unwrap_or("Coder");
    let number = NUMBERS.choose(rng).copied().unwrap_or("");
    format!("{adjective}{noun}{number}")
}

/// Draw a username from the thread-local random source.
///
/// # Examples
/// ```
/// let name = namegen::username();
/// assert!(name.chars().next().is_some_and(char::is_uppercase));
/// ```
pub fn username() -> String {
    username_with(&mut rand::thread_rng())
}
