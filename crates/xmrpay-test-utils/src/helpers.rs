//! Shared fixtures.

use xmrpay_wallet::Transfer;

/// Alphabet used to pad generated address tokens.
const FILL: &[u8] = b"J29fmAqXhK7tUvR4bWyEnDcZsG8pLxVoT3iQ6NwuMeBdHkSgC5aPrYzF";

/// Deterministic well-formed address token (95 alphanumeric characters) for
/// index `n`. Distinct indices yield distinct tokens.
pub fn test_subaddress(n: u32) -> String {
    let mut token = format!("8{n:06}");
    let mut i = 0usize;
    while token.len() < 95 {
        token.push(FILL[(n as usize + i) % FILL.len()] as char);
        i += 1;
    }
    token
}

/// A confirmed transfer observed at `height`.
pub fn confirmed_transfer(amount: u64, height: u64) -> Transfer {
    Transfer {
        amount,
        txid: format!("tx{amount:x}at{height:x}"),
        height,
    }
}

/// A transfer still sitting in the pool.
pub fn pool_transfer(amount: u64) -> Transfer {
    Transfer {
        amount,
        txid: format!("pool{amount:x}"),
        height: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmrpay_checkout::is_well_formed_address;

    #[test]
    fn test_generated_tokens_are_well_formed() {
        for n in [0, 1, 7, 42, 99_999] {
            let token = test_subaddress(n);
            assert_eq!(token.len(), 95);
            assert!(is_well_formed_address(&token), "token for {n} malformed");
        }
    }

    #[test]
    fn test_generated_tokens_distinct() {
        assert_ne!(test_subaddress(1), test_subaddress(2));
    }
}
