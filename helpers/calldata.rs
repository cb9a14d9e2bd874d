//! Calldata encoding helpers for constructor and call arguments.

use starknet::core::{types::Felt, utils::cairo_short_string_to_felt};

use crate::error::WorkflowError;

/// Encode an ASCII string of at most 31 characters as a single felt.
pub fn short_string(value: &str) -> Result<Felt, WorkflowError> {
    cairo_short_string_to_felt(value).map_err(|e| WorkflowError::ShortString {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Split a value into the `(low, high)` felt pair of a Cairo `u256`.
pub fn to_uint256(value: u128) -> [Felt; 2] {
    // u128 always fits in the low limb.
    [Felt::from(value), Felt::ZERO]
}

#[cfg(test)]
mod tests {
    use starknet::core::utils::parse_cairo_short_string;

    use super::*;

    #[test]
    fn short_strings_match_the_known_token_constants() {
        assert_eq!(
            short_string("testNft").unwrap(),
            Felt::from_hex_unchecked("0x746573744e6674")
        );
        assert_eq!(
            short_string("tNFT").unwrap(),
            Felt::from_hex_unchecked("0x744e4654")
        );
    }

    #[test]
    fn short_strings_round_trip() {
        let felt = short_string("ArcCoin").unwrap();
        assert_eq!(parse_cairo_short_string(&felt).unwrap(), "ArcCoin");
    }

    #[test]
    fn overlong_strings_are_rejected() {
        let err = short_string("a string that is much too long to fit a felt").unwrap_err();
        assert!(matches!(err, WorkflowError::ShortString { .. }));
    }

    #[test]
    fn uint256_splits_into_low_and_high() {
        assert_eq!(to_uint256(1_000_000), [Felt::from(1_000_000u64), Felt::ZERO]);
        assert_eq!(to_uint256(0), [Felt::ZERO, Felt::ZERO]);
    }
}
