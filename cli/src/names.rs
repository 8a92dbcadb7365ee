// SPDX-License-Identifier: MIT OR Apache-2.0

//! Player name validation and generation

use rand::seq::SliceRandom;
use rand::Rng;

pub const MAX_NAME_LEN: usize = 30;

const ADJECTIVES: &[&str] = &[
    "Brave", "Swift", "Clever", "Mighty", "Fierce", "Noble", "Cunning", "Bold", "Wise", "Strong",
    "Quick", "Silent", "Fearless", "Agile", "Sharp",
];

const ANIMALS: &[&str] = &[
    "Tiger", "Lion", "Elephant", "Leopard", "Wolf", "Dog", "Cat", "Rat", "Eagle", "Bear", "Fox",
    "Hawk", "Panther", "Jaguar", "Cheetah",
];

pub const NAME_RULES: &str =
    "Name must be 1-30 characters and contain only letters, numbers, spaces, hyphens, and underscores.";

/// 1-30 characters after trimming, from `[A-Za-z0-9 _-]`
pub fn validate_name(name: &str) -> bool {
    let name = name.trim();
    let len = name.chars().count();
    (1..=MAX_NAME_LEN).contains(&len)
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
}

/// "Adjective Animal", e.g. "Brave Tiger"
pub fn generate_random_name() -> String {
    generate_random_name_with(&mut rand::thread_rng())
}

pub fn generate_random_name_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Brave");
    let animal = ANIMALS.choose(rng).copied().unwrap_or("Tiger");
    format!("{} {}", adjective, animal)
}

/// Random name guaranteed to differ from `taken`
pub fn generate_distinct_name(taken: &str) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let name = generate_random_name_with(&mut rng);
        if name != taken {
            return name;
        }
    }
}
