// src/corpus/noise.rs
//! Noise injection: slang swaps, then (rarely) vowel stripping, then lowercase.
//! The order matters; swapping after stripping would never match the slang table.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::vocab::slang_for;
use crate::error::{Result, TriageError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseProfile {
    word_swap_probability: f64,
    vowel_strip_probability: f64,
}

impl NoiseProfile {
    pub fn new(word_swap_probability: f64, vowel_strip_probability: f64) -> Result<Self> {
        for (name, p) in [
            ("word_swap_probability", word_swap_probability),
            ("vowel_strip_probability", vowel_strip_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(TriageError::InvalidCorpusConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(Self {
            word_swap_probability,
            vowel_strip_probability,
        })
    }

    /// No swaps, no stripping (lowercasing still applies).
    pub fn none() -> Self {
        Self {
            word_swap_probability: 0.0,
            vowel_strip_probability: 0.0,
        }
    }

    pub fn apply<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let mut words: Vec<&str> = Vec::new();
        for word in text.split_whitespace() {
            let swapped = match slang_for(&word.to_lowercase()) {
                Some(variants) if rng.random_bool(self.word_swap_probability) => {
                    variants.choose(rng).copied()
                }
                _ => None,
            };
            words.push(swapped.unwrap_or(word));
        }

        let mut out = words.join(" ");
        if rng.random_bool(self.vowel_strip_probability) {
            out = strip_vowels(&out);
        }
        out.to_lowercase()
    }
}

pub fn strip_vowels(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn out_of_range_probabilities_are_rejected() {
        assert!(NoiseProfile::new(1.5, 0.1).is_err());
        assert!(NoiseProfile::new(0.3, -0.1).is_err());
        assert!(NoiseProfile::new(f64::NAN, 0.1).is_err());
        assert!(NoiseProfile::new(0.3, 0.1).is_ok());
    }

    #[test]
    fn zero_noise_only_lowercases() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = NoiseProfile::none().apply("Crossed GT Road. Road clear.", &mut rng);
        assert_eq!(out, "crossed gt road. road clear.");
    }

    #[test]
    fn certain_swap_replaces_every_eligible_word() {
        let mut rng = StdRng::seed_from_u64(2);
        let p = NoiseProfile::new(1.0, 0.0).unwrap();
        let out = p.apply("Please wait near Road", &mut rng);
        let words: Vec<&str> = out.split(' ').collect();
        assert!(["plz", "pls"].contains(&words[0]));
        assert_eq!(words[1], "wait");
        assert!(["nr", "pass"].contains(&words[2]));
        assert!(["rd", "rod", "rasta"].contains(&words[3]));
    }

    #[test]
    fn certain_strip_removes_all_vowels() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = NoiseProfile::new(0.0, 1.0).unwrap();
        assert_eq!(p.apply("Truck Overturned", &mut rng), "trck vrtrnd");
        assert_eq!(strip_vowels("AEIOU xyz"), " xyz");
    }

    #[test]
    fn swap_runs_before_strip() {
        let stripped = |w: &str| -> Vec<String> {
            slang_for(w)
                .unwrap()
                .iter()
                .map(|v| strip_vowels(v))
                .collect()
        };
        let mut expected = Vec::new();
        for r in stripped("road") {
            for n in stripped("near") {
                for a in stripped("accident") {
                    expected.push(format!("{r} {n} {a}"));
                }
            }
        }

        let p = NoiseProfile::new(1.0, 1.0).unwrap();
        let mut saw_variant = false;
        for seed in 0..30 {
            let out = p.apply("Road near Accident", &mut StdRng::seed_from_u64(seed));
            assert!(expected.contains(&out), "unexpected '{out}'");
            // Stripping first would leave "rd nr ccdnt" on every draw.
            saw_variant |= out != "rd nr ccdnt";
        }
        assert!(saw_variant);
    }
}
