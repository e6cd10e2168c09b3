//! Set-state checksum
//!
//! The firmware checks a weighted sum over the *hex digits* of the payload,
//! not over its bytes:
//! 1. Render the payload as hex, two digits per byte, no separators
//! 2. Multiply digit `i` by `(i % 2) + 1` (1, 2, 1, 2, ...)
//! 3. Sum, subtract 510
//! 4. Keep the low 8 bits
//!
//! Only the set-state template carries this checksum. The fixed command
//! payloads end in a plain byte sum and are sent verbatim.

use tracing::trace;

use crate::constants::CHECKSUM_BIAS;

/// Calculate the set-state checksum for `payload`
///
/// # Examples
///
/// ```
/// use zenkeo_core::checksum;
///
/// let checksum = checksum::calculate(&[0xFF, 0xFF]);
/// assert_eq!(checksum, 0x5C);
/// ```
pub fn calculate(payload: &[u8]) -> u8 {
    let sum = payload
        .iter()
        .flat_map(|byte| [byte >> 4, byte & 0x0F])
        .enumerate()
        .map(|(i, digit)| digit as u32 * (i as u32 % 2 + 1))
        .sum::<u32>();

    // Negative results wrap like the firmware's two's-complement byte
    let checksum = sum.wrapping_sub(CHECKSUM_BIAS) as u8;

    trace!(
        payload_len = payload.len(),
        checksum = format!("0x{:02X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Verify a payload whose last byte is its checksum
pub fn verify(payload: &[u8]) -> bool {
    match payload.split_last() {
        Some((expected, body)) => calculate(body) == *expected,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set_state_body(fields: [u8; 5], target: u8) -> Vec<u8> {
        let mut body = vec![
            0xFF, 0xFF, 0x22, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x4D, 0x5F,
        ];
        body.extend_from_slice(&[0; 10]);
        for field in fields {
            body.extend_from_slice(&[0x00, field]);
        }
        body.extend_from_slice(&[0x00, 0x00, 0x00, target]);
        body
    }

    #[test]
    fn test_checksum_known_vectors() {
        // power on, COOL, AUTO, limits off, health off, 22°C
        assert_eq!(calculate(&set_state_body([1, 3, 0, 1, 0], 6)), 0xBB);

        // polling body: power off, COOL, AUTO, 21°C
        assert_eq!(calculate(&set_state_body([1, 3, 0, 0, 0], 5)), 0xB7);

        // power on, HEAT, MIN, 19°C
        assert_eq!(calculate(&set_state_body([2, 2, 0, 1, 0], 3)), 0xB5);
    }

    #[test]
    fn test_checksum_empty_payload() {
        // 0 - 510 wraps to 0x02
        assert_eq!(calculate(&[]), 0x02);
    }

    #[test]
    fn test_checksum_digit_weights() {
        // High nibble weighs 1, low nibble weighs 2
        assert_eq!(calculate(&[0x10]), calculate(&[0x00]).wrapping_add(1));
        assert_eq!(calculate(&[0x01]), calculate(&[0x00]).wrapping_add(2));
    }

    #[test]
    fn test_checksum_single_field_perturbations() {
        let base = calculate(&set_state_body([1, 3, 0, 1, 0], 6));

        assert_ne!(base, calculate(&set_state_body([2, 3, 0, 1, 0], 6)));
        assert_ne!(base, calculate(&set_state_body([1, 2, 0, 1, 0], 6)));
        assert_ne!(base, calculate(&set_state_body([1, 3, 1, 1, 0], 6)));
        assert_ne!(base, calculate(&set_state_body([1, 3, 0, 0, 0], 6)));
        assert_ne!(base, calculate(&set_state_body([1, 3, 0, 1, 1], 6)));
        assert_ne!(base, calculate(&set_state_body([1, 3, 0, 1, 0], 7)));
    }

    #[test]
    fn test_checksum_verify() {
        let mut payload = set_state_body([1, 3, 0, 1, 0], 6);
        payload.push(calculate(&payload));

        assert!(verify(&payload));

        let last = payload.len() - 1;
        payload[last] = payload[last].wrapping_add(1);
        assert!(!verify(&payload));
        assert!(!verify(&[]));
    }

    proptest! {
        #[test]
        fn prop_checksum_deterministic(payload in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(calculate(&payload), calculate(&payload));
        }

        #[test]
        fn prop_low_nibble_perturbation_changes_checksum(
            fields in proptest::array::uniform5(0u8..5),
            target in 0u8..15,
        ) {
            // Low-nibble steps of 1 move the sum by 2, never a multiple of 256
            let mut bumped = fields;
            bumped[0] = fields[0] + 1;
            prop_assert_ne!(
                calculate(&set_state_body(fields, target)),
                calculate(&set_state_body(bumped, target))
            );
            prop_assert_ne!(
                calculate(&set_state_body(fields, target)),
                calculate(&set_state_body(fields, target + 1))
            );
        }
    }
}
