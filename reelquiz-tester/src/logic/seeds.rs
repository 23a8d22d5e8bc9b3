//! Seed parsing for deterministic runs.

use anyhow::{Result, bail};

/// Seed used when the caller does not pass any.
pub const DEFAULT_SEED: u64 = 1337;

/// Turns raw CLI seed tokens into a deduplicated list of seeds.
///
/// Accepts plain unsigned values and negative numbers (mapped to their
/// magnitude so `-42` and `42` drive the same run). Duplicates keep the
/// first occurrence so report order follows the command line.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();

    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let seed = if let Ok(signed) = token.parse::<i64>() {
            signed.unsigned_abs()
        } else if let Ok(unsigned) = token.parse::<u64>() {
            unsigned
        } else {
            bail!("Unrecognized seed token: {token}");
        };

        log::debug!("Resolved seed token '{token}' to {seed}");
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }

    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_numbers_and_negatives() {
        let seeds = resolve_seed_inputs(&tokens(&["7", "-42", "7", "100"])).unwrap();
        assert_eq!(seeds, vec![7, 42, 100]);
    }

    #[test]
    fn falls_back_to_the_default_seed() {
        let seeds = resolve_seed_inputs(&tokens(&["", "  "])).unwrap();
        assert_eq!(seeds, vec![DEFAULT_SEED]);
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        let err = resolve_seed_inputs(&tokens(&["banana"])).unwrap_err();
        assert!(err.to_string().contains("banana"));
    }
}
